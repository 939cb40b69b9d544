//! Batched import and cascading delete.
//!
//! Each call runs in one read-write store transaction: validation, unit
//! writes, ancestor propagation and history appends commit together or not
//! at all.

pub mod validation;

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use disk_core::result::AppResult;
use disk_core::types::UnitId;
use disk_database::store::{TxMode, UnitStore, UnitTransaction};
use disk_entity::history::UnitSnapshot;
use disk_entity::unit::{ImportRecord, Unit};

use crate::{aggregator, navigator};

/// Outcome of an applied import batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Records that created a new unit.
    pub created: usize,
    /// Records that updated an existing unit.
    pub updated: usize,
    /// Units whose `modified_at` was set to the batch timestamp.
    pub touched: usize,
    /// History records appended.
    pub history_appended: usize,
}

/// Outcome of a cascading delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeleteSummary {
    /// Units removed, the target included.
    pub removed: usize,
    /// History records purged with them.
    pub history_purged: u64,
    /// Ancestors whose `modified_at` was set to the delete timestamp.
    pub touched: usize,
    /// History records appended for those ancestors.
    pub history_appended: usize,
}

/// Applies imports and deletes to the unit store.
#[derive(Debug, Clone)]
pub struct MutationEngine {
    /// Unit store.
    store: Arc<dyn UnitStore>,
}

impl MutationEngine {
    /// Creates a new mutation engine.
    pub fn new(store: Arc<dyn UnitStore>) -> Self {
        Self { store }
    }

    /// Create or update every record of a batch at `timestamp`.
    ///
    /// The batch is validated as a whole first; any invalid record rejects
    /// the entire batch with a validation error and nothing is written.
    pub async fn import_batch(
        &self,
        records: Vec<ImportRecord>,
        timestamp: DateTime<Utc>,
    ) -> AppResult<ImportSummary> {
        let mut tx = self.store.begin(TxMode::ReadWrite).await?;

        let existing = validation::validate_batch(tx.as_mut(), &records)
            .await
            .inspect_err(|e| {
                warn!(records = records.len(), error = %e, "Import batch rejected");
            })?;

        let mut summary = ImportSummary::default();
        let mut chain_starts: Vec<UnitId> = Vec::new();

        for record in &records {
            let unit = match existing.get(&record.id) {
                Some(current) => {
                    if let Some(old_parent) = &current.parent_id {
                        chain_starts.push(old_parent.clone());
                    }
                    let mut unit = current.clone();
                    unit.apply_import(record);
                    summary.updated += 1;
                    unit
                }
                None => {
                    summary.created += 1;
                    Unit::from_import(record, timestamp)
                }
            };
            if let Some(parent) = &record.parent_id {
                chain_starts.push(parent.clone());
            }
            tx.put_unit(&unit).await?;
        }

        // Record ids seed the walked set; each record's parent is a chain
        // start of its own, so stopping at a record loses no ancestor.
        let mut affected: Vec<UnitId> = records.iter().map(|r| r.id.clone()).collect();
        let mut walked: HashSet<UnitId> = affected.iter().cloned().collect();
        let mut ancestors = Vec::new();
        for start in &chain_starts {
            navigator::extend_chain(tx.as_mut(), start, &mut walked, &mut ancestors).await?;
        }
        affected.extend(ancestors);

        summary.touched = affected.len();
        summary.history_appended = touch_and_record(tx.as_mut(), &affected, timestamp).await?;

        tx.commit().await?;

        info!(
            created = summary.created,
            updated = summary.updated,
            touched = summary.touched,
            history_appended = summary.history_appended,
            %timestamp,
            "Import batch applied"
        );

        Ok(summary)
    }

    /// Delete a unit with all of its descendants and their history, then
    /// propagate `timestamp` up the former parent's ancestor chain.
    pub async fn delete_unit(
        &self,
        id: &UnitId,
        timestamp: DateTime<Utc>,
    ) -> AppResult<DeleteSummary> {
        let mut tx = self.store.begin(TxMode::ReadWrite).await?;

        let unit = navigator::require_unit(tx.as_mut(), id).await?;
        let doomed = navigator::subtree_ids(tx.as_mut(), id).await?;

        let mut summary = DeleteSummary::default();
        for unit_id in &doomed {
            tx.delete_unit(unit_id).await?;
            summary.history_purged += tx.purge_history(unit_id).await?;
        }
        summary.removed = doomed.len();

        if let Some(parent) = &unit.parent_id {
            let mut walked = HashSet::new();
            let mut ancestors = Vec::new();
            navigator::extend_chain(tx.as_mut(), parent, &mut walked, &mut ancestors).await?;
            summary.touched = ancestors.len();
            summary.history_appended =
                touch_and_record(tx.as_mut(), &ancestors, timestamp).await?;
        }

        tx.commit().await?;

        info!(
            unit_id = %id,
            removed = summary.removed,
            history_purged = summary.history_purged,
            touched = summary.touched,
            %timestamp,
            "Unit deleted"
        );

        Ok(summary)
    }
}

/// Set `modified_at` on every listed unit and append a snapshot for each
/// one whose content differs from its latest history record.
///
/// Returns the number of snapshots appended.
async fn touch_and_record(
    tx: &mut dyn UnitTransaction,
    ids: &[UnitId],
    timestamp: DateTime<Utc>,
) -> AppResult<usize> {
    let mut appended = 0;

    for id in ids {
        let mut unit = navigator::require_unit(tx, id).await?;
        unit.modified_at = timestamp;
        tx.put_unit(&unit).await?;

        let size = aggregator::compute_size(tx, &unit).await?;
        let snapshot = UnitSnapshot::capture(&unit, size);
        let changed = match tx.latest_history(id).await? {
            Some(latest) => !snapshot.same_content(&latest),
            None => true,
        };
        if changed {
            tx.append_history(&snapshot).await?;
            appended += 1;
        }
    }

    Ok(appended)
}
