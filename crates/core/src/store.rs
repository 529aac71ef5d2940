//! Shared in-memory store of expressions and undispatched tasks.
//!
//! One [`TaskStore`] is constructed at process start and shared behind an
//! `Arc`. All state sits behind a single `RwLock`: every mutation (create,
//! claim, submit) holds the write guard for its whole critical section, so
//! an expression and its companion task are never observed half-written and
//! each task is handed to exactly one caller. Reads take the shared guard.
//!
//! No operation waits for work to appear. An empty queue is reported
//! immediately as [`CoreError::NoTaskAvailable`].
//!
//! A claimed task whose result never arrives leaves its expression pending
//! indefinitely; there is no requeue.

use std::collections::{HashMap, VecDeque};

use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::task::{new_id, TaskTemplate};
use crate::types::{EntityId, Expression, ExpressionStatus, Task};

#[derive(Default)]
struct StoreState {
    expressions: HashMap<EntityId, Expression>,
    /// Tasks not yet handed to any agent, oldest first.
    pending: VecDeque<Task>,
    /// Claimed task ID -> parent expression ID, until the result arrives.
    in_flight: HashMap<EntityId, EntityId>,
}

/// Thread-safe expression/task store.
pub struct TaskStore {
    template: TaskTemplate,
    state: RwLock<StoreState>,
}

impl TaskStore {
    /// Create an empty store generating tasks from the default template.
    pub fn new() -> Self {
        Self::with_template(TaskTemplate::default())
    }

    pub fn with_template(template: TaskTemplate) -> Self {
        Self {
            template,
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Register a new expression together with its single companion task.
    ///
    /// Returns the new expression ID.
    pub async fn create_expression(&self, text: &str) -> EntityId {
        let id = new_id();
        let task = self.template.instantiate(&id);
        let task_id = task.id.clone();

        let mut state = self.state.write().await;
        state.expressions.insert(
            id.clone(),
            Expression {
                id: id.clone(),
                expression: text.to_string(),
                status: ExpressionStatus::Pending,
                result: 0.0,
            },
        );
        state.pending.push_back(task);
        drop(state);

        tracing::info!(expression_id = %id, task_id = %task_id, "Expression created");
        id
    }

    /// Snapshot of every expression, in no particular order.
    pub async fn list_expressions(&self) -> Vec<Expression> {
        self.state
            .read()
            .await
            .expressions
            .values()
            .cloned()
            .collect()
    }

    pub async fn get_expression(&self, id: &str) -> Result<Expression, CoreError> {
        self.state
            .read()
            .await
            .expressions
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                entity: "expression",
                id: id.to_string(),
            })
    }

    /// Remove one pending task and hand it to the caller.
    ///
    /// Two concurrent claims never receive the same task.
    pub async fn claim_task(&self) -> Result<Task, CoreError> {
        let mut state = self.state.write().await;
        let task = state.pending.pop_front().ok_or(CoreError::NoTaskAvailable)?;
        state
            .in_flight
            .insert(task.id.clone(), task.expression_id.clone());
        drop(state);

        tracing::debug!(task_id = %task.id, expression_id = %task.expression_id, "Task claimed");
        Ok(task)
    }

    /// Record the result computed for a previously claimed task.
    ///
    /// The task is finalized: a second submission with the same ID, or a
    /// submission for a task that was never claimed, yields `NotFound`. A
    /// parent expression that no longer exists is skipped, as is one that is
    /// already done.
    pub async fn submit_result(&self, task_id: &str, result: f64) -> Result<(), CoreError> {
        let mut state = self.state.write().await;
        let expression_id = state
            .in_flight
            .remove(task_id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "task",
                id: task_id.to_string(),
            })?;

        match state.expressions.get_mut(&expression_id) {
            Some(expr) if expr.status.is_terminal() => {
                tracing::warn!(
                    task_id,
                    expression_id = %expression_id,
                    "Expression already done, ignoring result",
                );
            }
            Some(expr) => {
                expr.status = ExpressionStatus::Done;
                expr.result = result;
                tracing::info!(
                    task_id,
                    expression_id = %expression_id,
                    result,
                    "Expression done",
                );
            }
            None => {
                tracing::warn!(
                    task_id,
                    expression_id = %expression_id,
                    "Parent expression missing, discarding result",
                );
            }
        }

        Ok(())
    }

    /// Number of tasks waiting to be claimed.
    pub async fn pending_count(&self) -> usize {
        self.state.read().await.pending.len()
    }

    /// Number of claimed tasks still awaiting a result.
    pub async fn in_flight_count(&self) -> usize {
        self.state.read().await.in_flight.len()
    }

    pub async fn expression_count(&self) -> usize {
        self.state.read().await.expressions.len()
    }

    #[cfg(test)]
    async fn remove_expression(&self, id: &str) {
        self.state.write().await.expressions.remove(id);
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}
