//! Domain layer for the distributed calculator.
//!
//! Holds the expression/task types, the shared in-memory store that hands
//! tasks to polling agents, and the arithmetic the agents perform. Has no
//! dependency on any other workspace crate.

pub mod error;
pub mod evaluation;
pub mod store;
pub mod task;
pub mod types;
