//! Store construction from configuration.

use std::sync::Arc;

use tracing::info;

use disk_core::config::{AppConfig, StoreBackend};
use disk_core::result::AppResult;

use super::{MemoryUnitStore, PgUnitStore, UnitStore};
use crate::connection::DatabasePool;
use crate::migration::run_migrations;

/// Open the configured store backend.
///
/// For PostgreSQL this connects the pool and, when `store.run_migrations`
/// is set, applies pending migrations first.
pub async fn open_store(config: &AppConfig) -> AppResult<Arc<dyn UnitStore>> {
    match config.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory unit store");
            Ok(Arc::new(MemoryUnitStore::new()))
        }
        StoreBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            if config.store.run_migrations {
                run_migrations(pool.pool()).await?;
            }
            Ok(Arc::new(PgUnitStore::new(pool.into_pool())))
        }
    }
}
