use std::sync::Arc;

use calc_core::store::TaskStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The single expression/task store for this process.
    pub store: Arc<TaskStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build state with a fresh store generating tasks per `config`.
    pub fn new(config: ServerConfig) -> Self {
        let store = TaskStore::with_template(config.task_template());
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}
