//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use disk_core::config::AppConfig;
use disk_database::store::UnitStore;
use disk_service::{HistoryService, MutationEngine, NodeService};

/// Shared application state, cloned into every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Unit store, kept for health checks.
    pub store: Arc<dyn UnitStore>,
    /// Import and delete.
    pub engine: Arc<MutationEngine>,
    /// Node reads.
    pub nodes: Arc<NodeService>,
    /// History reads.
    pub history: Arc<HistoryService>,
}

impl AppState {
    /// Build every service around one store handle.
    pub fn new(config: AppConfig, store: Arc<dyn UnitStore>) -> Self {
        Self {
            config: Arc::new(config),
            engine: Arc::new(MutationEngine::new(Arc::clone(&store))),
            nodes: Arc::new(NodeService::new(Arc::clone(&store))),
            history: Arc::new(HistoryService::new(Arc::clone(&store))),
            store,
        }
    }
}
