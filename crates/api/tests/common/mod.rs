#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use loto_core::access::DEFAULT_ACCESS_CODE;
use sqlx::PgPool;
use tower::ServiceExt;

use loto_api::config::ServerConfig;
use loto_api::middleware::mode::ACCESS_CODE_HEADER;
use loto_api::router::build_app_router;
use loto_api::settings::SettingsStore;
use loto_api::state::AppState;

/// Access code seeded by the migrations; sends requests in Editor mode.
pub const EDITOR_CODE: &str = DEFAULT_ACCESS_CODE;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        log_json: false,
    }
}

/// Build the full application router over `pool`, with settings loaded from
/// the database as at startup.
pub async fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let settings = SettingsStore::load(&pool).await.unwrap();
    let state = AppState::new(pool, settings);
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Send one request. `code` goes into the access-code header when present.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    code: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(code) = code {
        builder = builder.header(ACCESS_CODE_HEADER, code);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// GET without an access code (Visitor mode).
pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

/// POST as Editor.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(EDITOR_CODE), Some(body)).await
}

/// PUT as Editor.
pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(EDITOR_CODE), Some(body)).await
}

/// DELETE as Editor.
pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, Some(EDITOR_CODE), None).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seeding through the API
// ---------------------------------------------------------------------------

/// Create a breaker and return its id.
pub async fn seed_breaker(pool: &PgPool, body: serde_json::Value) -> i64 {
    let app = build_test_app(pool.clone()).await;
    let response = post_json(app, "/api/v1/breakers", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create an unused lock in `zone` and return its id.
pub async fn seed_lock(pool: &PgPool, key: &str, zone: &str) -> i64 {
    let app = build_test_app(pool.clone()).await;
    let response = post_json(
        app,
        "/api/v1/locks",
        serde_json::json!({"key_number": key, "zone": zone}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Fetch a lock row by key number from the list endpoint.
pub async fn lock_by_key(pool: &PgPool, key: &str) -> serde_json::Value {
    let app = build_test_app(pool.clone()).await;
    let json = body_json(get(app, "/api/v1/locks").await).await;
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["key_number"] == key)
        .cloned()
        .unwrap_or_else(|| panic!("lock {key} not found"))
}

/// Fetch a breaker row by id.
pub async fn breaker(pool: &PgPool, id: i64) -> serde_json::Value {
    let app = build_test_app(pool.clone()).await;
    let json = body_json(get(app, &format!("/api/v1/breakers/{id}")).await).await;
    json["data"].clone()
}
