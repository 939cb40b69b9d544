//! Materialized subtree returned by node lookups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use disk_core::types::UnitId;

use super::kind::UnitKind;
use super::model::Unit;

/// A unit with its computed size and, for folders, its full descendant tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitNode {
    /// Unit ID.
    pub id: UnitId,
    /// Content url (files only).
    pub url: Option<String>,
    /// Parent folder.
    pub parent_id: Option<UnitId>,
    /// File or folder.
    #[serde(rename = "type")]
    pub kind: UnitKind,
    /// Stored size for files, recursive descendant sum for folders.
    pub size: i64,
    /// Last modification timestamp.
    pub modified_at: DateTime<Utc>,
    /// `None` for files, the direct children for folders.
    pub children: Option<Vec<UnitNode>>,
}

impl UnitNode {
    /// Create a leaf node with no children attached yet.
    pub fn from_unit(unit: Unit) -> Self {
        let children = unit.is_folder().then(Vec::new);
        Self {
            size: unit.file_size(),
            id: unit.id,
            url: unit.url,
            parent_id: unit.parent_id,
            kind: unit.kind,
            modified_at: unit.modified_at,
            children,
        }
    }

    /// Total number of nodes in this subtree, including this one.
    pub fn count(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(UnitNode::count)
            .sum::<usize>()
    }

    /// Find a node by id anywhere in this subtree.
    pub fn find(&self, id: &UnitId) -> Option<&UnitNode> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter().flatten().find_map(|child| child.find(id))
    }
}
