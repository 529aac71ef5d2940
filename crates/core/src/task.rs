//! Companion-task generation.
//!
//! Expression text is not parsed. Every submitted expression yields exactly
//! one task built from a fixed [`TaskTemplate`].

use uuid::Uuid;

use crate::types::{EntityId, Operation, Task};

/// Default execution-time hint for generated tasks, in milliseconds.
pub const DEFAULT_OPERATION_TIME_MS: u64 = 1000;

/// Operands and operation stamped onto every generated task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskTemplate {
    pub arg1: f64,
    pub arg2: f64,
    pub operation: Operation,
    pub operation_time: u64,
}

impl TaskTemplate {
    /// Build the companion task for `expression_id` with a fresh task ID.
    pub fn instantiate(&self, expression_id: &str) -> Task {
        Task {
            id: new_id(),
            expression_id: expression_id.to_string(),
            arg1: self.arg1,
            arg2: self.arg2,
            operation: self.operation,
            operation_time: self.operation_time,
        }
    }

    pub fn with_operation_time(mut self, operation_time: u64) -> Self {
        self.operation_time = operation_time;
        self
    }
}

impl Default for TaskTemplate {
    /// `2 * 2`, taking one second.
    fn default() -> Self {
        Self {
            arg1: 2.0,
            arg2: 2.0,
            operation: Operation::Multiply,
            operation_time: DEFAULT_OPERATION_TIME_MS,
        }
    }
}

/// Generate a fresh identifier. Expressions and tasks draw from the same
/// generator but are stored in separate maps.
pub fn new_id() -> EntityId {
    Uuid::new_v4().to_string()
}
