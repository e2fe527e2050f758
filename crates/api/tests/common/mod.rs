#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use ermel_api::config::ServerConfig;
use ermel_api::router::build_app_router;
use ermel_api::state::AppState;

/// Client address used by [`post_json`]; each test app starts with a fresh
/// limiter so sharing it between requests is fine.
pub const TEST_CLIENT_IP: &str = "203.0.113.10";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: String::new(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        quote_rate_limit_per_hour: 5,
        max_body_bytes: 102_400,
    }
}

/// Build the application router exactly as `main.rs` does.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_config(pool, test_config())
}

pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn send_json(app: Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-forwarded-for", TEST_CLIENT_IP)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A submission that passes every check: a 120cm x 150cm aluminum window.
pub fn valid_submission() -> Value {
    json!({
        "customer": "Juan Dela Cruz",
        "email": "juan@example.com",
        "project": "Sliding Window",
        "glassType": "Clear Glass",
        "color": "Clear",
        "material": "Aluminum Frame",
        "measurementUnit": "cm",
        "width": 120,
        "height": 150,
        "phone": "0917 123 4567",
        "address": "123 Rizal Street, Quezon City",
        "notes": "Sliding type please"
    })
}

/// Submit [`valid_submission`] and return the new order id.
pub async fn create_quote(app: &Router) -> String {
    let response = post_json(app.clone(), "/api/quotes", valid_submission()).await;
    assert_eq!(response.status(), 201);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

/// Move a quote one stage at a time up to `target`.
pub async fn advance_to(app: &Router, id: &str, stages: &[&str]) {
    for stage in stages {
        let response = put_json(
            app.clone(),
            &format!("/api/admin/quotes/{id}/status"),
            json!({ "status": stage }),
        )
        .await;
        assert_eq!(response.status(), 200, "moving {id} to {stage}");
    }
}
