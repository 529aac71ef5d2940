//! Route definitions for the public expression endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::expressions;
use crate::state::AppState;

/// Routes mounted at `/api/v1`.
///
/// ```text
/// POST   /calculate           -> calculate
/// GET    /expressions         -> list_expressions
/// GET    /expressions/{id}    -> get_expression
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calculate", post(expressions::calculate))
        .route("/expressions", get(expressions::list_expressions))
        .route("/expressions/{id}", get(expressions::get_expression))
}
