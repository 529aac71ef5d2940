//! Agent-side arithmetic for claimed tasks.
//!
//! The orchestrator never evaluates; it only carries operands and the
//! operation symbol. Agents call [`evaluate`] and submit the result.

use crate::types::{Operation, Task};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("unknown operation: {0}")]
    UnknownOperation(String),
}

/// Apply `operation` to the two operands.
///
/// Division fails only when the divisor is exactly zero.
pub fn apply(operation: Operation, arg1: f64, arg2: f64) -> Result<f64, EvalError> {
    match operation {
        Operation::Add => Ok(arg1 + arg2),
        Operation::Subtract => Ok(arg1 - arg2),
        Operation::Multiply => Ok(arg1 * arg2),
        Operation::Divide => {
            if arg2 == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            Ok(arg1 / arg2)
        }
    }
}

/// Evaluate a task received from the orchestrator.
pub fn evaluate(task: &Task) -> Result<f64, EvalError> {
    apply(task.operation, task.arg1, task.arg2)
}

/// Evaluate an operation given as a raw symbol.
pub fn evaluate_symbol(symbol: &str, arg1: f64, arg2: f64) -> Result<f64, EvalError> {
    apply(symbol.parse()?, arg1, arg2)
}
