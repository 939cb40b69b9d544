//! History and recent-change queries.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use disk_core::result::AppResult;
use disk_core::types::{UnitId, updates_window};
use disk_database::store::{TxMode, UnitStore};
use disk_entity::history::{HistoryRange, HistoryRecord};
use disk_entity::unit::Unit;

use crate::navigator;

/// Answers questions about past unit state.
#[derive(Debug, Clone)]
pub struct HistoryService {
    /// Unit store.
    store: Arc<dyn UnitStore>,
}

impl HistoryService {
    /// Creates a new history service.
    pub fn new(store: Arc<dyn UnitStore>) -> Self {
        Self { store }
    }

    /// Files whose `modified_at` lies in `[as_of - 24h, as_of]`.
    ///
    /// Folders are never returned even though their timestamps move too.
    pub async fn recent_file_changes(&self, as_of: DateTime<Utc>) -> AppResult<Vec<Unit>> {
        let from = as_of - updates_window();
        let mut tx = self.store.begin(TxMode::ReadOnly).await?;
        let files = tx.files_modified_between(from, as_of).await?;
        debug!(%from, to = %as_of, count = files.len(), "Recent file changes loaded");
        Ok(files)
    }

    /// History of one unit, optionally limited to `[start, end)`.
    ///
    /// Fails with `NotFound` for an unknown unit before the bounds are
    /// looked at; otherwise both bounds or neither must be given.
    pub async fn node_history(
        &self,
        id: &UnitId,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<HistoryRecord>> {
        let mut tx = self.store.begin(TxMode::ReadOnly).await?;
        navigator::require_unit(tx.as_mut(), id).await?;
        let range = HistoryRange::from_bounds(start, end)?;
        tx.history_of(id, range).await
    }
}
