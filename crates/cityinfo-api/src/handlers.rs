//! Request handlers. Each one always produces a response; failures are
//! rendered through [`ApiError`] rather than warp rejections.

use std::convert::Infallible;

use cityinfo_services::RecipeContent;
use serde_json::Value;
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::reply::{Reply, Response};
use warp::Rejection;

use crate::error::ApiError;
use crate::AppState;

/// GET /cities/{cityId}/infos
pub async fn get_city_info(city_id: String, state: AppState) -> Result<Response, Rejection> {
    let city_id = decode_segment(&city_id);
    tracing::debug!("Fetching infos for city {}", city_id);

    Ok(match state.service.get_city_info(&city_id).await {
        Ok(info) => warp::reply::with_status(warp::reply::json(&info), StatusCode::OK).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    })
}

/// POST /cities/{cityId}/recipes
pub async fn create_recipe(
    city_id: String,
    body: Bytes,
    state: AppState,
) -> Result<Response, Rejection> {
    let city_id = decode_segment(&city_id);

    // Validate before touching the upstream
    let content = match parse_recipe_body(&body) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("Rejected recipe for city {}: {}", city_id, e);
            return Ok(e.into_response());
        }
    };

    Ok(match state.service.create_recipe(&city_id, content).await {
        Ok(recipe) => {
            warp::reply::with_status(warp::reply::json(&recipe), StatusCode::CREATED)
                .into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    })
}

/// DELETE /cities/{cityId}/recipes/{recipeId}
pub async fn delete_recipe(
    city_id: String,
    recipe_id: String,
    state: AppState,
) -> Result<Response, Rejection> {
    let city_id = decode_segment(&city_id);

    // A non-numeric id can never match a stored recipe, but the city still decides the 404
    let Ok(recipe_id) = recipe_id.parse::<u64>() else {
        return Ok(match state.service.ensure_city_exists(&city_id).await {
            Ok(()) => ApiError::RecipeNotFound.into_response(),
            Err(e) => ApiError::from(e).into_response(),
        });
    };

    Ok(match state.service.delete_recipe(&city_id, recipe_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    })
}

/// GET /health
pub fn health() -> Response {
    warp::reply::json(&serde_json::json!({ "ok": true, "service": "cityinfo" })).into_response()
}

/// Turn a warp rejection (unknown route, wrong method, oversized body)
/// into the same JSON error shape the handlers use.
pub async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let api_err = if err.is_not_found() {
        ApiError::RouteNotFound
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        ApiError::PayloadTooLarge
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        ApiError::LengthRequired
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        ApiError::MethodNotAllowed
    } else {
        tracing::error!("Unhandled rejection: {:?}", err);
        ApiError::Internal(format!("{:?}", err))
    };

    Ok(api_err.into_response())
}

/// Extract and validate `content` from a recipe creation body.
///
/// An empty body is treated like `{}`.
fn parse_recipe_body(body: &[u8]) -> Result<RecipeContent, ApiError> {
    let value: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(serde_json::Map::new())
    } else {
        serde_json::from_slice(body).map_err(|_| ApiError::validation("Invalid JSON body"))?
    };

    let Value::Object(object) = value else {
        return Err(ApiError::validation("Invalid JSON body"));
    };

    match object.get("content") {
        None | Some(Value::Null) => Err(ApiError::validation("Content is required")),
        Some(Value::String(content)) => RecipeContent::parse(content.as_str())
            .map_err(|e| ApiError::validation(e.to_string())),
        Some(_) => Err(ApiError::validation("Content must be a string")),
    }
}

fn decode_segment(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}
