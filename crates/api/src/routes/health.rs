use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Tasks waiting for an agent.
    pub pending_tasks: usize,
    /// Tasks claimed by an agent but not yet resolved.
    pub in_flight_tasks: usize,
    /// Expressions ever submitted.
    pub expressions: usize,
}

/// GET /health -- returns service status and queue depth.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        pending_tasks: state.store.pending_count().await,
        in_flight_tasks: state.store.in_flight_count().await,
        expressions: state.store.expression_count().await,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
