//! Handlers for the public expression endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use calc_core::types::{EntityId, Expression};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    pub expression: String,
}

#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub id: EntityId,
}

#[derive(Debug, Serialize)]
pub struct ExpressionListResponse {
    pub expressions: Vec<Expression>,
}

#[derive(Debug, Serialize)]
pub struct ExpressionResponse {
    pub expression: Expression,
}

/// POST /api/v1/calculate
///
/// Register an expression and queue its companion task. Returns 201 with
/// the new expression ID.
pub async fn calculate(
    State(state): State<AppState>,
    AppJson(input): AppJson<CalculateRequest>,
) -> AppResult<impl IntoResponse> {
    let id = state.store.create_expression(&input.expression).await;
    Ok((StatusCode::CREATED, Json(CalculateResponse { id })))
}

/// GET /api/v1/expressions
pub async fn list_expressions(State(state): State<AppState>) -> Json<ExpressionListResponse> {
    let expressions = state.store.list_expressions().await;
    Json(ExpressionListResponse { expressions })
}

/// GET /api/v1/expressions/{id}
pub async fn get_expression(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<ExpressionResponse>> {
    let expression = state.store.get_expression(&id).await?;
    Ok(Json(ExpressionResponse { expression }))
}
