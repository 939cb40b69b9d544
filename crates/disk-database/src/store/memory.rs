//! In-memory unit store using a Tokio `RwLock` for single-process use.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};
use tracing::debug;

use disk_core::error::AppError;
use disk_core::result::AppResult;
use disk_core::types::UnitId;
use disk_entity::history::{HistoryRange, HistoryRecord, UnitSnapshot};
use disk_entity::unit::Unit;

use super::{TxMode, UnitStore, UnitTransaction};

/// Committed state.
#[derive(Debug, Default)]
struct MemoryState {
    units: HashMap<UnitId, Unit>,
    history: HashMap<UnitId, Vec<HistoryRecord>>,
    next_seq: i64,
}

/// In-memory unit store.
///
/// A write transaction holds the write lock from `begin` until it is
/// committed or dropped and stages its changes in an overlay, so readers
/// only ever observe fully committed batches. Read transactions share the
/// read lock.
#[derive(Debug, Clone, Default)]
pub struct MemoryUnitStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryUnitStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed units.
    pub async fn unit_count(&self) -> usize {
        self.state.read().await.units.len()
    }

    /// Every committed unit, sorted by id.
    pub async fn dump_units(&self) -> Vec<Unit> {
        let state = self.state.read().await;
        let mut units: Vec<Unit> = state.units.values().cloned().collect();
        units.sort_by(|a, b| a.id.cmp(&b.id));
        units
    }

    /// Number of committed history records across all units.
    pub async fn history_count(&self) -> usize {
        self.state.read().await.history.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl UnitStore for MemoryUnitStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn begin(&self, mode: TxMode) -> AppResult<Box<dyn UnitTransaction>> {
        let guard = match mode {
            TxMode::ReadOnly => Guard::Read(Arc::clone(&self.state).read_owned().await),
            TxMode::ReadWrite => Guard::Write(Arc::clone(&self.state).write_owned().await),
        };
        let next_seq = guard.state().next_seq;
        debug!(?mode, "Memory transaction opened");
        Ok(Box::new(MemoryTransaction {
            guard: Some(guard),
            overlay: Overlay {
                next_seq,
                ..Overlay::default()
            },
        }))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

enum Guard {
    Read(OwnedRwLockReadGuard<MemoryState>),
    Write(OwnedRwLockWriteGuard<MemoryState>),
}

impl Guard {
    fn state(&self) -> &MemoryState {
        match self {
            Self::Read(guard) => guard,
            Self::Write(guard) => guard,
        }
    }
}

/// Uncommitted changes of a write transaction.
#[derive(Debug, Default)]
struct Overlay {
    /// `Some` for upserts, `None` for deletions.
    units: HashMap<UnitId, Option<Unit>>,
    /// Units whose committed history is discarded on commit.
    purged: HashSet<UnitId>,
    /// Records appended in this transaction, in append order.
    appended: Vec<HistoryRecord>,
    next_seq: i64,
}

/// An open memory transaction.
pub struct MemoryTransaction {
    guard: Option<Guard>,
    overlay: Overlay,
}

impl MemoryTransaction {
    fn base(&self) -> AppResult<&MemoryState> {
        self.guard
            .as_ref()
            .map(Guard::state)
            .ok_or_else(|| AppError::internal("Transaction already committed"))
    }

    fn ensure_writable(&self) -> AppResult<()> {
        match self.guard {
            Some(Guard::Write(_)) => Ok(()),
            Some(Guard::Read(_)) => Err(AppError::internal(
                "Write attempted in a read-only transaction",
            )),
            None => Err(AppError::internal("Transaction already committed")),
        }
    }

    /// Committed records of `id` that are still visible, followed by the
    /// ones appended in this transaction.
    fn visible_history(&self, id: &UnitId) -> AppResult<Vec<HistoryRecord>> {
        let base = self.base()?;
        let mut records: Vec<HistoryRecord> = if self.overlay.purged.contains(id) {
            Vec::new()
        } else {
            base.history.get(id).cloned().unwrap_or_default()
        };
        records.extend(
            self.overlay
                .appended
                .iter()
                .filter(|r| &r.unit_id == id)
                .cloned(),
        );
        Ok(records)
    }
}

#[async_trait]
impl UnitTransaction for MemoryTransaction {
    async fn get_unit(&mut self, id: &UnitId) -> AppResult<Option<Unit>> {
        if let Some(staged) = self.overlay.units.get(id) {
            return Ok(staged.clone());
        }
        Ok(self.base()?.units.get(id).cloned())
    }

    async fn children_of(&mut self, id: &UnitId) -> AppResult<Vec<Unit>> {
        let base = self.base()?;
        let mut children: Vec<Unit> = base
            .units
            .values()
            .filter(|u| u.parent_id.as_ref() == Some(id))
            .filter(|u| !self.overlay.units.contains_key(&u.id))
            .cloned()
            .collect();
        children.extend(
            self.overlay
                .units
                .values()
                .flatten()
                .filter(|u| u.parent_id.as_ref() == Some(id))
                .cloned(),
        );
        Ok(children)
    }

    async fn put_unit(&mut self, unit: &Unit) -> AppResult<()> {
        self.ensure_writable()?;
        self.overlay
            .units
            .insert(unit.id.clone(), Some(unit.clone()));
        Ok(())
    }

    async fn delete_unit(&mut self, id: &UnitId) -> AppResult<bool> {
        self.ensure_writable()?;
        let existed = self.get_unit(id).await?.is_some();
        self.overlay.units.insert(id.clone(), None);
        Ok(existed)
    }

    async fn files_modified_between(
        &mut self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<Unit>> {
        let base = self.base()?;
        let mut files: Vec<Unit> = base
            .units
            .values()
            .filter(|u| !self.overlay.units.contains_key(&u.id))
            .chain(self.overlay.units.values().flatten())
            .filter(|u| u.is_file() && u.modified_at >= from && u.modified_at <= to)
            .cloned()
            .collect();
        files.sort_by(|a, b| a.modified_at.cmp(&b.modified_at).then(a.id.cmp(&b.id)));
        Ok(files)
    }

    async fn append_history(&mut self, snapshot: &UnitSnapshot) -> AppResult<HistoryRecord> {
        self.ensure_writable()?;
        self.overlay.next_seq += 1;
        let record = snapshot.clone().into_record(self.overlay.next_seq);
        self.overlay.appended.push(record.clone());
        Ok(record)
    }

    async fn latest_history(&mut self, id: &UnitId) -> AppResult<Option<HistoryRecord>> {
        Ok(self.visible_history(id)?.into_iter().max_by_key(|r| r.seq))
    }

    async fn history_of(
        &mut self,
        id: &UnitId,
        range: HistoryRange,
    ) -> AppResult<Vec<HistoryRecord>> {
        let mut records: Vec<HistoryRecord> = self
            .visible_history(id)?
            .into_iter()
            .filter(|r| range.contains(&r.recorded_at))
            .collect();
        records.sort_by(|a, b| a.recorded_at.cmp(&b.recorded_at).then(a.seq.cmp(&b.seq)));
        Ok(records)
    }

    async fn purge_history(&mut self, id: &UnitId) -> AppResult<u64> {
        self.ensure_writable()?;
        let removed = self.visible_history(id)?.len() as u64;
        self.overlay.appended.retain(|r| &r.unit_id != id);
        self.overlay.purged.insert(id.clone());
        Ok(removed)
    }

    async fn commit(&mut self) -> AppResult<()> {
        let guard = self
            .guard
            .take()
            .ok_or_else(|| AppError::internal("Transaction already committed"))?;

        let Guard::Write(mut state) = guard else {
            return Ok(());
        };

        let overlay = std::mem::take(&mut self.overlay);
        for id in overlay.purged {
            state.history.remove(&id);
        }
        for (id, staged) in overlay.units {
            match staged {
                Some(unit) => {
                    state.units.insert(id, unit);
                }
                None => {
                    state.units.remove(&id);
                }
            }
        }
        for record in overlay.appended {
            state
                .history
                .entry(record.unit_id.clone())
                .or_default()
                .push(record);
        }
        state.next_seq = overlay.next_seq;
        Ok(())
    }
}
