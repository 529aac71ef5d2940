#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use calc_api::config::ServerConfig;
use calc_api::router::build_app_router;
use calc_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and instant tasks.
pub fn test_config() -> ServerConfig {
    ServerConfig::loopback()
}

/// Build fresh state plus the full application router over it.
///
/// The returned state shares its store with the router, so tests can mix
/// HTTP calls with direct store inspection.
pub fn build_test_app() -> (AppState, Router) {
    let config = test_config();
    let state = AppState::new(config.clone());
    let app = build_app_router(state.clone(), &config);
    (state, app)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Body::empty(), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(
        app,
        Method::POST,
        uri,
        Body::from(body.to_string()),
        Some("application/json"),
    )
    .await
}

/// POST an arbitrary (possibly malformed) body labelled as JSON.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    send(
        app,
        Method::POST,
        uri,
        Body::from(body),
        Some("application/json"),
    )
    .await
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Body,
    content_type: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(ct) = content_type {
        builder = builder.header("content-type", ct);
    }
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
