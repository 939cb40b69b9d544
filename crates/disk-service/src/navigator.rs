//! Read-only traversal of the unit hierarchy inside an open transaction.
//!
//! Every walk carries a visited set and fails with `CycleDetected` when it
//! meets an id twice, so a corrupted parent graph can never loop forever.

use std::collections::HashSet;

use tracing::error;

use disk_core::error::AppError;
use disk_core::result::AppResult;
use disk_core::types::UnitId;
use disk_database::store::UnitTransaction;
use disk_entity::unit::Unit;

/// Load a unit or fail with `NotFound`.
pub async fn require_unit(tx: &mut dyn UnitTransaction, id: &UnitId) -> AppResult<Unit> {
    tx.get_unit(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Unit '{id}' not found")))
}

/// Direct children of a unit, sorted by id.
pub async fn children_of(tx: &mut dyn UnitTransaction, id: &UnitId) -> AppResult<Vec<Unit>> {
    let mut children = tx.children_of(id).await?;
    children.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(children)
}

/// Ancestors of a unit, from its immediate parent up to the root.
pub async fn ancestor_chain(tx: &mut dyn UnitTransaction, id: &UnitId) -> AppResult<Vec<Unit>> {
    let unit = require_unit(tx, id).await?;
    let mut visited = HashSet::from([unit.id.clone()]);
    let mut chain = Vec::new();
    let mut next = unit.parent_id;

    while let Some(parent_id) = next {
        if !visited.insert(parent_id.clone()) {
            return Err(cycle_at(&parent_id));
        }
        let parent = require_parent(tx, &parent_id).await?;
        next = parent.parent_id.clone();
        chain.push(parent);
    }

    Ok(chain)
}

/// Walk from `start` up to its root and append every id not yet in `walked`
/// to `out`.
///
/// The walk stops at the first id already in `walked`: the chain above it
/// was collected by an earlier call with the same set, which keeps a batch
/// from visiting a shared ancestor twice.
pub async fn extend_chain(
    tx: &mut dyn UnitTransaction,
    start: &UnitId,
    walked: &mut HashSet<UnitId>,
    out: &mut Vec<UnitId>,
) -> AppResult<()> {
    let mut path = HashSet::new();
    let mut next = Some(start.clone());

    while let Some(id) = next {
        if !path.insert(id.clone()) {
            return Err(cycle_at(&id));
        }
        if walked.contains(&id) {
            break;
        }
        let unit = require_parent(tx, &id).await?;
        next = unit.parent_id;
        walked.insert(id.clone());
        out.push(id);
    }

    Ok(())
}

/// Ids of a unit and all of its descendants, parents before children.
pub async fn subtree_ids(tx: &mut dyn UnitTransaction, root: &UnitId) -> AppResult<Vec<UnitId>> {
    let mut visited = HashSet::from([root.clone()]);
    let mut stack = vec![root.clone()];
    let mut ids = Vec::new();

    while let Some(id) = stack.pop() {
        let children = tx.children_of(&id).await?;
        ids.push(id);
        for child in children {
            if !visited.insert(child.id.clone()) {
                return Err(cycle_at(&child.id));
            }
            if child.is_folder() {
                stack.push(child.id);
            } else {
                ids.push(child.id);
            }
        }
    }

    Ok(ids)
}

async fn require_parent(tx: &mut dyn UnitTransaction, id: &UnitId) -> AppResult<Unit> {
    tx.get_unit(id).await?.ok_or_else(|| {
        error!(unit_id = %id, "Referenced parent is missing from the store");
        AppError::internal(format!("Parent unit '{id}' is missing"))
    })
}

pub(crate) fn cycle_at(id: &UnitId) -> AppError {
    error!(unit_id = %id, "Cycle detected in unit hierarchy");
    AppError::cycle_detected(format!("Unit '{id}' was reached twice while traversing"))
}
