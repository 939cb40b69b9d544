//! Unit store backend configuration.

use serde::{Deserialize, Serialize};

/// Which implementation backs the unit and history stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// PostgreSQL via the configured database pool.
    #[default]
    Postgres,
    /// Process-local memory. State is lost on restart.
    Memory,
}

/// Store selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend implementation.
    #[serde(default)]
    pub backend: StoreBackend,
    /// Run pending migrations on startup (PostgreSQL only).
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            run_migrations: true,
        }
    }
}

fn default_true() -> bool {
    true
}
