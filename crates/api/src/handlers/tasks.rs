//! Handlers for the internal agent endpoints.
//!
//! Agents poll `GET /internal/task` and report back on `POST /internal/task`.
//! Neither handler evaluates anything: operands travel out unevaluated and
//! the agent's computed result is accepted as-is.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use calc_core::types::{EntityId, Task};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub task: Task,
}

#[derive(Debug, Deserialize)]
pub struct SubmitResultRequest {
    pub id: EntityId,
    pub result: f64,
}

/// GET /internal/task
///
/// Claim one pending task. 404 when the queue is empty; agents retry after
/// their poll interval.
pub async fn claim_task(State(state): State<AppState>) -> AppResult<Json<TaskResponse>> {
    let task = state.store.claim_task().await?;
    Ok(Json(TaskResponse { task }))
}

/// POST /internal/task
///
/// Accept the result for a claimed task. 404 if the task was never claimed
/// or its result was already recorded.
pub async fn submit_result(
    State(state): State<AppState>,
    AppJson(input): AppJson<SubmitResultRequest>,
) -> AppResult<StatusCode> {
    state.store.submit_result(&input.id, input.result).await?;
    Ok(StatusCode::OK)
}
