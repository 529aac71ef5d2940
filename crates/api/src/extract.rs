//! JSON body extractor whose rejection is an [`AppError`].
//!
//! Axum's stock `Json` rejects bad bodies with 400, 415 or 422 depending on
//! the failure. Every write endpoint here answers 422 for any undecodable
//! body, with the usual `{ "error", "code" }` envelope.

use axum::extract::FromRequest;

use crate::error::AppError;

/// Drop-in replacement for `axum::Json` as a request extractor.
///
/// ```ignore
/// async fn handler(AppJson(input): AppJson<CalculateRequest>) -> AppResult<StatusCode> { ... }
/// ```
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
