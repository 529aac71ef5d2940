//! HTTP client for the orchestrator's internal task endpoints.

use std::time::Duration;

use calc_core::types::EntityId;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport failure, timeout or undecodable body.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The orchestrator no longer knows the task (already finalized or never
    /// claimed).
    #[error("task not found: {0}")]
    TaskNotFound(EntityId),

    #[error("unexpected status {0}")]
    UnexpectedStatus(StatusCode),
}

/// A task as handed out by `GET /internal/task`.
///
/// The operation is kept as the raw wire symbol; an unsupported one is
/// reported when the task is evaluated, not when it is fetched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClaimedTask {
    pub id: EntityId,
    pub expression_id: EntityId,
    pub arg1: f64,
    pub arg2: f64,
    pub operation: String,
    /// Simulated execution cost in milliseconds.
    pub operation_time: u64,
}

#[derive(Debug, Deserialize)]
struct TaskEnvelope {
    task: ClaimedTask,
}

#[derive(Debug, Serialize)]
struct SubmitResultBody<'a> {
    id: &'a str,
    result: f64,
}

/// Talks to `GET`/`POST /internal/task` on one orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorClient {
    http: reqwest::Client,
    task_url: String,
}

impl OrchestratorClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            task_url: format!("{}/internal/task", base_url.trim_end_matches('/')),
        })
    }

    /// Claim the next task. `Ok(None)` means the queue is empty.
    pub async fn fetch_task(&self) -> Result<Option<ClaimedTask>, ClientError> {
        let response = self.http.get(&self.task_url).send().await?;
        match response.status() {
            StatusCode::OK => {
                let envelope: TaskEnvelope = response.json().await?;
                Ok(Some(envelope.task))
            }
            StatusCode::NOT_FOUND => Ok(None),
            other => Err(ClientError::UnexpectedStatus(other)),
        }
    }

    /// Report the computed result for a claimed task.
    pub async fn submit_result(&self, task_id: &str, result: f64) -> Result<(), ClientError> {
        let response = self
            .http
            .post(&self.task_url)
            .json(&SubmitResultBody {
                id: task_id,
                result,
            })
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(()),
            StatusCode::NOT_FOUND => Err(ClientError::TaskNotFound(task_id.to_string())),
            other => Err(ClientError::UnexpectedStatus(other)),
        }
    }
}
