//! Read facade over the current tree.

use std::sync::Arc;

use tracing::debug;

use disk_core::result::AppResult;
use disk_core::types::UnitId;
use disk_database::store::{TxMode, UnitStore};
use disk_entity::unit::{Unit, UnitNode};

use crate::{aggregator, navigator};

/// Serves node lookups from a consistent snapshot.
#[derive(Debug, Clone)]
pub struct NodeService {
    /// Unit store.
    store: Arc<dyn UnitStore>,
}

impl NodeService {
    /// Creates a new node service.
    pub fn new(store: Arc<dyn UnitStore>) -> Self {
        Self { store }
    }

    /// A unit with its computed size and full descendant tree.
    pub async fn get_node(&self, id: &UnitId) -> AppResult<UnitNode> {
        let mut tx = self.store.begin(TxMode::ReadOnly).await?;
        let node = aggregator::build_subtree(tx.as_mut(), id).await?;
        debug!(unit_id = %id, nodes = node.count(), size = node.size, "Subtree built");
        Ok(node)
    }

    /// A single unit as stored.
    pub async fn get_unit(&self, id: &UnitId) -> AppResult<Unit> {
        let mut tx = self.store.begin(TxMode::ReadOnly).await?;
        navigator::require_unit(tx.as_mut(), id).await
    }

    /// Direct children of a unit.
    pub async fn children(&self, id: &UnitId) -> AppResult<Vec<Unit>> {
        let mut tx = self.store.begin(TxMode::ReadOnly).await?;
        navigator::require_unit(tx.as_mut(), id).await?;
        navigator::children_of(tx.as_mut(), id).await
    }

    /// Ancestors of a unit from its parent up to the root.
    pub async fn ancestors(&self, id: &UnitId) -> AppResult<Vec<Unit>> {
        let mut tx = self.store.begin(TxMode::ReadOnly).await?;
        navigator::ancestor_chain(tx.as_mut(), id).await
    }

    /// Computed size of a unit.
    pub async fn size_of(&self, id: &UnitId) -> AppResult<i64> {
        let mut tx = self.store.begin(TxMode::ReadOnly).await?;
        aggregator::compute_size_of(tx.as_mut(), id).await
    }
}
