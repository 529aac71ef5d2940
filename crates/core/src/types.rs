//! Expression and task records as stored and as sent over the wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::evaluation::EvalError;

/// Expression and task identifiers are opaque strings (UUID v4 text).
pub type EntityId = String;

/// Lifecycle of a submitted expression.
///
/// The store moves an expression from `Pending` straight to `Done`; claiming
/// its task does not change the status. `Processing` is part of the wire
/// vocabulary only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionStatus {
    Pending,
    Processing,
    Done,
}

impl ExpressionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Done => "done",
        }
    }

    /// Terminal statuses accept no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for ExpressionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A submitted calculation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub id: EntityId,
    /// Raw source text as submitted. Never parsed.
    pub expression: String,
    pub status: ExpressionStatus,
    /// Meaningful only once `status` is [`ExpressionStatus::Done`].
    pub result: f64,
}

/// Binary arithmetic operation carried by a [`Task`].
///
/// Serialized as its symbol (`"+"`, `"-"`, `"*"`, `"/"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

impl FromStr for Operation {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Add),
            "-" => Ok(Self::Subtract),
            "*" => Ok(Self::Multiply),
            "/" => Ok(Self::Divide),
            other => Err(EvalError::UnknownOperation(other.to_string())),
        }
    }
}

impl TryFrom<String> for Operation {
    type Error = EvalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Operation> for String {
    fn from(op: Operation) -> Self {
        op.symbol().to_string()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One unit of arithmetic work dispatched to an agent on behalf of an
/// [`Expression`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: EntityId,
    pub expression_id: EntityId,
    pub arg1: f64,
    pub arg2: f64,
    pub operation: Operation,
    /// Simulated execution cost in milliseconds.
    pub operation_time: u64,
}
