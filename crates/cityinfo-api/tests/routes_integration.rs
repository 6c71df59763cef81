//! End-to-end tests of the HTTP routes with wiremock standing in for the
//! City and Weather APIs.

use std::sync::Arc;
use std::time::Duration;

use cityinfo_api::{routes, AppState};
use cityinfo_services::{CityInfoService, RecipeStore};
use cityinfo_upstream::UpstreamClient;
use serde_json::{json, Value};
use warp::http::StatusCode;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn state_for(server: &MockServer) -> AppState {
    let client = UpstreamClient::with_base_url(&server.uri(), Duration::from_secs(5)).unwrap();
    AppState::new(
        CityInfoService::new(client, Arc::new(RecipeStore::new())),
        16 * 1024,
    )
}

/// Mock server knowing `paris` in both APIs.
async fn paris_server() -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cities/paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "coordinates": [48.8566, 2.3522],
            "population": 2148000,
            "knownFor": ["Eiffel Tower", "Louvre"]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/weather/paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "today": {"min": 12, "max": 22},
            "tomorrow": {"min": 10, "max": 18}
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cities/atlantis"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    mock_server
}

fn json_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

async fn post_recipe<F>(api: &F, city: &str, body: Value) -> warp::http::Response<warp::hyper::body::Bytes>
where
    F: warp::Filter + Clone + 'static,
    F::Extract: warp::Reply + Send,
{
    warp::test::request()
        .method("POST")
        .path(&format!("/cities/{}/recipes", city))
        .json(&body)
        .reply(api)
        .await
}

#[tokio::test]
async fn test_get_infos() {
    let mock_server = paris_server().await;
    let api = routes(state_for(&mock_server));

    let res = warp::test::request()
        .method("GET")
        .path("/cities/paris/infos")
        .reply(&api)
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res.body());
    assert_eq!(body["coordinates"], json!([48.8566, 2.3522]));
    assert_eq!(body["population"], json!(2148000));
    assert_eq!(body["knownFor"], json!(["Eiffel Tower", "Louvre"]));
    assert_eq!(body["weatherPredictions"][0]["when"], "today");
    assert_eq!(body["weatherPredictions"][1]["when"], "tomorrow");
    assert_eq!(body["weatherPredictions"][1]["max"], json!(18.0));
    assert_eq!(body["recipes"], json!([]));
}

#[tokio::test]
async fn test_get_infos_unknown_city() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cities/atlantis"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/weather/atlantis"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let api = routes(state_for(&mock_server));
    let res = warp::test::request()
        .path("/cities/atlantis/infos")
        .reply(&api)
        .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(res.body()), json!({"error": "City not found"}));
}

#[tokio::test]
async fn test_get_infos_missing_weather_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cities/ys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"population": 10})))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/weather/ys"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let api = routes(state_for(&mock_server));
    let res = warp::test::request().path("/cities/ys/infos").reply(&api).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(res.body()), json!({"error": "City not found"}));
}

#[tokio::test]
async fn test_get_infos_upstream_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cities/paris"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
        .mount(&mock_server)
        .await;

    let api = routes(state_for(&mock_server));
    let res = warp::test::request().path("/cities/paris/infos").reply(&api).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(res.body());
    assert_eq!(body["error"], "Internal server error");
    assert!(body["details"].as_str().unwrap().contains("database down"));
}

#[tokio::test]
async fn test_create_recipe_length_boundaries() {
    let mock_server = paris_server().await;
    let api = routes(state_for(&mock_server));

    let cases = [
        (9, StatusCode::BAD_REQUEST),
        (10, StatusCode::CREATED),
        (2000, StatusCode::CREATED),
        (2001, StatusCode::BAD_REQUEST),
    ];

    for (len, expected) in cases {
        let res = post_recipe(&api, "paris", json!({ "content": "r".repeat(len) })).await;
        assert_eq!(res.status(), expected, "content length {}", len);
    }
}

#[tokio::test]
async fn test_create_recipe_validation_messages() {
    let mock_server = paris_server().await;
    let api = routes(state_for(&mock_server));

    let res = post_recipe(&api, "paris", json!({})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res.body()), json!({"error": "Content is required"}));

    let res = post_recipe(&api, "paris", json!({"content": 42})).await;
    assert_eq!(json_body(res.body()), json!({"error": "Content must be a string"}));

    let res = post_recipe(&api, "paris", json!({"content": "short"})).await;
    assert_eq!(
        json_body(res.body()),
        json!({"error": "Content must be at least 10 characters"})
    );
}

#[tokio::test]
async fn test_invalid_content_never_reaches_upstream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cities/paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let api = routes(state_for(&mock_server));
    let res = post_recipe(&api, "paris", json!({"content": "tiny"})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_recipe_unknown_city() {
    let mock_server = paris_server().await;
    let api = routes(state_for(&mock_server));

    let res = post_recipe(&api, "atlantis", json!({"content": "Sunken seaweed stew"})).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(res.body()), json!({"error": "City not found"}));
}

#[tokio::test]
async fn test_created_recipe_listed_in_infos() {
    let mock_server = paris_server().await;
    let api = routes(state_for(&mock_server));

    let res = post_recipe(&api, "paris", json!({"content": "Soupe à l'oignon gratinée"})).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = json_body(res.body());
    assert!(created["id"].is_u64());
    assert_eq!(created["content"], "Soupe à l'oignon gratinée");

    let res = warp::test::request().path("/cities/paris/infos").reply(&api).await;
    let body = json_body(res.body());
    assert_eq!(body["recipes"], json!([created]));
}

#[tokio::test]
async fn test_delete_recipe_then_delete_again() {
    let mock_server = paris_server().await;
    let api = routes(state_for(&mock_server));

    let res = post_recipe(&api, "paris", json!({"content": "Blanquette de veau"})).await;
    let id = json_body(res.body())["id"].as_u64().unwrap();

    let delete = || {
        warp::test::request()
            .method("DELETE")
            .path(&format!("/cities/paris/recipes/{}", id))
    };

    let res = delete().reply(&api).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.body().is_empty());

    let res = delete().reply(&api).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(res.body()), json!({"error": "Recipe not found"}));

    let res = warp::test::request().path("/cities/paris/infos").reply(&api).await;
    assert_eq!(json_body(res.body())["recipes"], json!([]));
}

#[tokio::test]
async fn test_delete_never_created_recipe() {
    let mock_server = paris_server().await;
    let api = routes(state_for(&mock_server));

    for id in ["12345", "not-a-number"] {
        let res = warp::test::request()
            .method("DELETE")
            .path(&format!("/cities/paris/recipes/{}", id))
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "recipe id {}", id);
    }
}

#[tokio::test]
async fn test_delete_recipe_unknown_city() {
    let mock_server = paris_server().await;
    let api = routes(state_for(&mock_server));

    let res = warp::test::request()
        .method("DELETE")
        .path("/cities/atlantis/recipes/1")
        .reply(&api)
        .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(res.body()), json!({"error": "City not found"}));
}

#[tokio::test]
async fn test_delete_non_numeric_id_unknown_city() {
    let mock_server = paris_server().await;
    let api = routes(state_for(&mock_server));

    let res = warp::test::request()
        .method("DELETE")
        .path("/cities/atlantis/recipes/abc")
        .reply(&api)
        .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(res.body()), json!({"error": "City not found"}));
}

#[tokio::test]
async fn test_health_and_unknown_routes() {
    let mock_server = MockServer::start().await;
    let api = routes(state_for(&mock_server));

    let res = warp::test::request().path("/health").reply(&api).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res.body())["ok"], true);

    let res = warp::test::request().path("/nowhere").reply(&api).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(res.body()), json!({"error": "Not found"}));

    let res = warp::test::request()
        .method("PUT")
        .path("/cities/paris/infos")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let mock_server = MockServer::start().await;
    let client = UpstreamClient::with_base_url(&mock_server.uri(), Duration::from_secs(5)).unwrap();
    let api = routes(AppState::new(
        CityInfoService::new(client, Arc::new(RecipeStore::new())),
        64,
    ));

    let res = post_recipe(&api, "paris", json!({"content": "c".repeat(500)})).await;
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
