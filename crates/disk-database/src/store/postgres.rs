//! PostgreSQL-backed unit store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

use disk_core::error::AppError;
use disk_core::result::AppResult;
use disk_core::types::UnitId;
use disk_entity::history::{HistoryRange, HistoryRecord, UnitSnapshot};
use disk_entity::unit::Unit;

use super::{TxMode, UnitStore, UnitTransaction};
use crate::error::db_error;
use crate::repositories::{history, unit};

/// Unit store on top of a PostgreSQL pool.
///
/// Write transactions run at `SERIALIZABLE`, so two batches touching
/// overlapping ancestor chains cannot both commit; the loser fails with a
/// retryable error. Read transactions run at `REPEATABLE READ` and see a
/// single snapshot for the whole traversal.
#[derive(Debug, Clone)]
pub struct PgUnitStore {
    pool: PgPool,
}

impl PgUnitStore {
    /// Create a store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitStore for PgUnitStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn begin(&self, mode: TxMode) -> AppResult<Box<dyn UnitTransaction>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        let isolation = match mode {
            TxMode::ReadOnly => "SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY",
            TxMode::ReadWrite => "SET TRANSACTION ISOLATION LEVEL SERIALIZABLE",
        };
        sqlx::query(isolation)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to set isolation level", e))?;

        debug!(?mode, "PostgreSQL transaction opened");
        Ok(Box::new(PgUnitTransaction { tx: Some(tx) }))
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| db_error("Health check failed", e))
    }
}

/// An open PostgreSQL transaction. Rolled back by sqlx when dropped
/// uncommitted.
pub struct PgUnitTransaction {
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgUnitTransaction {
    fn conn(&mut self) -> AppResult<&mut Transaction<'static, Postgres>> {
        self.tx
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction already committed"))
    }
}

#[async_trait]
impl UnitTransaction for PgUnitTransaction {
    async fn get_unit(&mut self, id: &UnitId) -> AppResult<Option<Unit>> {
        let tx = self.conn()?;
        unit::find_by_id(&mut **tx, id).await
    }

    async fn children_of(&mut self, id: &UnitId) -> AppResult<Vec<Unit>> {
        let tx = self.conn()?;
        unit::find_children(&mut **tx, id).await
    }

    async fn put_unit(&mut self, value: &Unit) -> AppResult<()> {
        let tx = self.conn()?;
        unit::upsert(&mut **tx, value).await
    }

    async fn delete_unit(&mut self, id: &UnitId) -> AppResult<bool> {
        let tx = self.conn()?;
        unit::delete(&mut **tx, id).await
    }

    async fn files_modified_between(
        &mut self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<Unit>> {
        let tx = self.conn()?;
        unit::find_files_modified_between(&mut **tx, from, to).await
    }

    async fn append_history(&mut self, snapshot: &UnitSnapshot) -> AppResult<HistoryRecord> {
        let tx = self.conn()?;
        history::append(&mut **tx, snapshot).await
    }

    async fn latest_history(&mut self, id: &UnitId) -> AppResult<Option<HistoryRecord>> {
        let tx = self.conn()?;
        history::find_latest(&mut **tx, id).await
    }

    async fn history_of(
        &mut self,
        id: &UnitId,
        range: HistoryRange,
    ) -> AppResult<Vec<HistoryRecord>> {
        let tx = self.conn()?;
        history::find_by_unit(&mut **tx, id, range).await
    }

    async fn purge_history(&mut self, id: &UnitId) -> AppResult<u64> {
        let tx = self.conn()?;
        history::delete_by_unit(&mut **tx, id).await
    }

    async fn commit(&mut self) -> AppResult<()> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| AppError::internal("Transaction already committed"))?;
        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))
    }
}
