//! Folder size derivation and subtree materialization.
//!
//! Folder sizes are never read from storage. They are summed from the
//! descendant files on every call.

use std::collections::HashSet;

use disk_core::error::AppError;
use disk_core::result::AppResult;
use disk_core::types::UnitId;
use disk_database::store::UnitTransaction;
use disk_entity::unit::{Unit, UnitNode};

use crate::navigator::{self, cycle_at};

/// Size of a unit: the stored size of a file, or the sum of every
/// descendant file of a folder.
pub async fn compute_size(tx: &mut dyn UnitTransaction, unit: &Unit) -> AppResult<i64> {
    if unit.is_file() {
        return Ok(unit.file_size());
    }

    let mut total: i64 = 0;
    let mut visited = HashSet::from([unit.id.clone()]);
    let mut stack = vec![unit.id.clone()];

    while let Some(id) = stack.pop() {
        for child in tx.children_of(&id).await? {
            if !visited.insert(child.id.clone()) {
                return Err(cycle_at(&child.id));
            }
            if child.is_file() {
                total = total.checked_add(child.file_size()).ok_or_else(|| {
                    AppError::internal(format!("Size of folder '{}' overflows", unit.id))
                })?;
            } else {
                stack.push(child.id);
            }
        }
    }

    Ok(total)
}

/// Size of the unit with the given id.
pub async fn compute_size_of(tx: &mut dyn UnitTransaction, id: &UnitId) -> AppResult<i64> {
    let unit = navigator::require_unit(tx, id).await?;
    compute_size(tx, &unit).await
}

/// Materialize a unit and its full descendant tree.
///
/// Children are sorted by id. Each descendant is loaded once; nodes are
/// collected top-down into a flat list and then folded bottom-up, adding
/// every node's size to its parent as it is attached.
pub async fn build_subtree(tx: &mut dyn UnitTransaction, id: &UnitId) -> AppResult<UnitNode> {
    let root = navigator::require_unit(tx, id).await?;
    let mut visited = HashSet::from([root.id.clone()]);
    let root_is_folder = root.is_folder();

    // (node, index of parent)
    let mut arena: Vec<(UnitNode, Option<usize>)> = vec![(UnitNode::from_unit(root), None)];
    let mut stack = if root_is_folder { vec![0usize] } else { Vec::new() };

    while let Some(index) = stack.pop() {
        let folder_id = arena[index].0.id.clone();
        for child in navigator::children_of(tx, &folder_id).await? {
            if !visited.insert(child.id.clone()) {
                return Err(cycle_at(&child.id));
            }
            let is_folder = child.is_folder();
            arena.push((UnitNode::from_unit(child), Some(index)));
            if is_folder {
                stack.push(arena.len() - 1);
            }
        }
    }

    // Every child sits at a higher index than its parent, so popping from
    // the end completes a node before it is attached.
    while let Some((mut node, parent)) = arena.pop() {
        if let Some(children) = node.children.as_mut() {
            children.reverse();
        }
        match parent {
            Some(parent) => {
                let (parent_node, _) = &mut arena[parent];
                parent_node.size += node.size;
                parent_node.children.get_or_insert_with(Vec::new).push(node);
            }
            None => return Ok(node),
        }
    }

    Err(AppError::internal("Subtree root was lost while folding"))
}
