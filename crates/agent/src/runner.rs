//! Poll loops that claim tasks, compute them and report results.
//!
//! Each loop is independent: it claims a task, sleeps for the task's
//! `operation_time`, evaluates it and submits the result. When the queue is
//! empty or the orchestrator is unreachable, the loop waits one poll
//! interval and tries again.
//!
//! A task whose evaluation fails (division by zero, unsupported operation)
//! is dropped without submitting anything, so its expression stays pending.

use std::sync::Arc;
use std::time::Duration;

use calc_core::evaluation::{self, EvalError};
use calc_core::types::EntityId;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::client::{ClaimedTask, ClientError, OrchestratorClient};
use crate::config::AgentConfig;

/// What a single poll achieved.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The orchestrator had no task to hand out.
    Idle,
    /// A task was computed and its result accepted.
    Completed { task_id: EntityId, result: f64 },
    /// A task was claimed but could not be evaluated; nothing was submitted.
    EvalFailed { task_id: EntityId, error: EvalError },
}

/// Simulate the task's cost, then evaluate it.
pub async fn execute(task: &ClaimedTask) -> Result<f64, EvalError> {
    if task.operation_time > 0 {
        tokio::time::sleep(Duration::from_millis(task.operation_time)).await;
    }
    evaluation::evaluate_symbol(&task.operation, task.arg1, task.arg2)
}

/// Claim at most one task and see it through.
pub async fn poll_once(client: &OrchestratorClient) -> Result<PollOutcome, ClientError> {
    let Some(task) = client.fetch_task().await? else {
        return Ok(PollOutcome::Idle);
    };

    tracing::debug!(
        task_id = %task.id,
        expression_id = %task.expression_id,
        operation = %task.operation,
        "Claimed task",
    );

    match execute(&task).await {
        Ok(result) => {
            client.submit_result(&task.id, result).await?;
            Ok(PollOutcome::Completed {
                task_id: task.id,
                result,
            })
        }
        Err(error) => Ok(PollOutcome::EvalFailed {
            task_id: task.id,
            error,
        }),
    }
}

/// Run one poll loop until `cancel` fires.
///
/// A task already claimed is finished before the loop exits.
pub async fn run_worker(
    worker: usize,
    client: Arc<OrchestratorClient>,
    poll_interval: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(worker, "Worker started");

    while !cancel.is_cancelled() {
        let wait = match poll_once(&client).await {
            Ok(PollOutcome::Completed { task_id, result }) => {
                tracing::info!(worker, task_id = %task_id, result, "Result submitted");
                false
            }
            Ok(PollOutcome::EvalFailed { task_id, error }) => {
                tracing::error!(worker, task_id = %task_id, error = %error, "Task evaluation failed");
                false
            }
            Ok(PollOutcome::Idle) => {
                tracing::debug!(worker, "No tasks, waiting");
                true
            }
            Err(e) => {
                tracing::warn!(worker, error = %e, "Poll failed, waiting");
                true
            }
        };

        if wait {
            tokio::select! {
                () = cancel.cancelled() => break,
                () = tokio::time::sleep(poll_interval) => {}
            }
        }
    }

    tracing::info!(worker, "Worker stopped");
}

/// Start `computing_power` poll loops and wait for all of them to stop.
pub async fn run(config: &AgentConfig, cancel: CancellationToken) -> Result<(), ClientError> {
    let client = Arc::new(OrchestratorClient::new(
        &config.orchestrator_url,
        config.request_timeout,
    )?);

    let tracker = TaskTracker::new();
    for worker in 0..config.computing_power {
        tracker.spawn(run_worker(
            worker,
            Arc::clone(&client),
            config.poll_interval,
            cancel.clone(),
        ));
    }
    tracker.close();
    tracker.wait().await;

    Ok(())
}
