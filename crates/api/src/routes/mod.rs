pub mod expressions;
pub mod health;
pub mod internal;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /calculate                 submit expression (POST)
/// /expressions               list expressions (GET)
/// /expressions/{id}          get expression (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    expressions::router()
}

/// Build the `/internal` route tree used by agents.
///
/// ```text
/// /task                      claim task (GET), submit result (POST)
/// ```
pub fn internal_routes() -> Router<AppState> {
    internal::router()
}
