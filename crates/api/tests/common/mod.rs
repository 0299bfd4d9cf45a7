//! Shared helpers for API integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use vinoteca_api::config::ServerConfig;
use vinoteca_api::router::build_app_router;
use vinoteca_api::state::AppState;
use vinoteca_core::enrichment::SuggestionProvider;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        undo_history_depth: 10,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

/// Like [`build_test_app`], with a suggestion provider installed so the
/// generate-on-demand path is reachable.
pub fn build_test_app_with_provider(
    pool: PgPool,
    provider: Arc<dyn SuggestionProvider>,
) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone()).with_provider(provider);
    build_app_router(state, &config)
}

/// Send a GET request and return the raw response.
pub async fn get(app: Router, uri: &str) -> Response {
    request(app, Method::GET, uri, None).await
}

/// Send a DELETE request and return the raw response.
pub async fn delete(app: Router, uri: &str) -> Response {
    request(app, Method::DELETE, uri, None).await
}

/// Send a POST request with a JSON body and return the raw response.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    request(app, Method::POST, uri, Some(body)).await
}

/// Send a PUT request with a JSON body and return the raw response.
pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    request(app, Method::PUT, uri, Some(body)).await
}

async fn request(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    let request = builder.body(body).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body into a JSON value.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the response status and return the parsed body.
pub async fn expect_status(response: Response, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

/// Create a wine through the API and return its id.
pub async fn seed_wine(app: &Router, name: &str) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/v1/wines",
        serde_json::json!({ "name": name }),
    )
    .await;
    let json = expect_status(response, StatusCode::CREATED).await;
    json["data"]["id"].as_i64().unwrap()
}

/// Create a 6x8 storage unit through the API and return its id.
pub async fn seed_unit(app: &Router, name: &str, stacking: bool) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/v1/storage-units",
        serde_json::json!({
            "name": name,
            "shelf_count": 6,
            "column_count": 8,
            "stacking_enabled": stacking,
        }),
    )
    .await;
    let json = expect_status(response, StatusCode::CREATED).await;
    json["data"]["id"].as_i64().unwrap()
}
