use std::convert::Infallible;

use warp::{Filter, Reply};

use crate::handlers;
use crate::AppState;

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// All routes, with rejection recovery and request tracing applied.
pub fn routes(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let health = warp::path!("health").and(warp::get()).map(handlers::health);

    let infos = warp::path!("cities" / String / "infos")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::get_city_info);

    let create_recipe = warp::path!("cities" / String / "recipes")
        .and(warp::post())
        .and(warp::body::content_length_limit(state.max_body_bytes))
        .and(warp::body::bytes())
        .and(with_state(state.clone()))
        .and_then(handlers::create_recipe);

    let delete_recipe = warp::path!("cities" / String / "recipes" / String)
        .and(warp::delete())
        .and(with_state(state))
        .and_then(handlers::delete_recipe);

    health
        .or(infos)
        .or(create_recipe)
        .or(delete_recipe)
        .recover(handlers::handle_rejection)
        .with(warp::trace::request())
}
