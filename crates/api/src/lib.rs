//! Orchestrator HTTP server library.
//!
//! Exposes config, state, error handling and the router builder so the
//! binary entrypoint, integration tests and the agent's end-to-end tests all
//! serve the exact same application.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
