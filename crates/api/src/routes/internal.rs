use axum::routing::get;
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// Routes mounted at `/internal`.
///
/// ```text
/// GET    /task    -> claim_task
/// POST   /task    -> submit_result
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/task", get(tasks::claim_task).post(tasks::submit_result))
}
