//! Transactional unit and history store.
//!
//! The service layer sees storage only through [`UnitStore`]: it opens a
//! [`UnitTransaction`], performs reads and writes on it, and commits. A
//! transaction dropped without [`UnitTransaction::commit`] is rolled back,
//! so an error returned with `?` halfway through a batch leaves no trace.

pub mod factory;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use disk_core::result::AppResult;
use disk_core::types::UnitId;
use disk_entity::history::{HistoryRange, HistoryRecord, UnitSnapshot};
use disk_entity::unit::Unit;

pub use factory::open_store;
pub use memory::MemoryUnitStore;
pub use postgres::PgUnitStore;

/// Access mode of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxMode {
    /// Consistent snapshot reads; writes are rejected.
    ReadOnly,
    /// Serializable reads and writes.
    ReadWrite,
}

/// A durable store of current unit state and the unit history log.
#[async_trait]
pub trait UnitStore: Send + Sync + std::fmt::Debug + 'static {
    /// Backend name for logs (`"postgres"`, `"memory"`).
    fn backend(&self) -> &'static str;

    /// Open a transaction.
    async fn begin(&self, mode: TxMode) -> AppResult<Box<dyn UnitTransaction>>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// A group of store operations that become visible atomically on commit.
#[async_trait]
pub trait UnitTransaction: Send {
    /// Load a unit by id.
    async fn get_unit(&mut self, id: &UnitId) -> AppResult<Option<Unit>>;

    /// Direct children of a unit, in no particular order.
    async fn children_of(&mut self, id: &UnitId) -> AppResult<Vec<Unit>>;

    /// Insert or overwrite a unit.
    async fn put_unit(&mut self, unit: &Unit) -> AppResult<()>;

    /// Remove a single unit. Children are not touched.
    async fn delete_unit(&mut self, id: &UnitId) -> AppResult<bool>;

    /// Files with `from <= modified_at <= to`.
    async fn files_modified_between(
        &mut self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<Unit>>;

    /// Append a snapshot to the history log.
    async fn append_history(&mut self, snapshot: &UnitSnapshot) -> AppResult<HistoryRecord>;

    /// The most recently appended history record of a unit.
    async fn latest_history(&mut self, id: &UnitId) -> AppResult<Option<HistoryRecord>>;

    /// History of a unit ordered by `(recorded_at, seq)`.
    async fn history_of(
        &mut self,
        id: &UnitId,
        range: HistoryRange,
    ) -> AppResult<Vec<HistoryRecord>>;

    /// Remove every history record of a unit.
    async fn purge_history(&mut self, id: &UnitId) -> AppResult<u64>;

    /// Make all writes visible. The transaction cannot be used afterwards.
    async fn commit(&mut self) -> AppResult<()>;
}
