/// Failures surfaced by the task/expression store.
///
/// Every variant is per-request and recoverable: callers may retry later
/// (polling agents do so on [`CoreError::NoTaskAvailable`]).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("no tasks")]
    NoTaskAvailable,
}
