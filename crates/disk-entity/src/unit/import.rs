//! Import record submitted as part of a batch.

use serde::{Deserialize, Serialize};

use disk_core::types::UnitId;

use super::kind::UnitKind;

/// One create-or-update instruction inside an import batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    /// Unit identifier.
    pub id: UnitId,
    /// Content url, files only.
    #[serde(default)]
    pub url: Option<String>,
    /// Containing folder, `None` for a root.
    #[serde(default)]
    pub parent_id: Option<UnitId>,
    /// File or folder.
    #[serde(rename = "type")]
    pub kind: UnitKind,
    /// File size, files only.
    #[serde(default)]
    pub size: Option<i64>,
}

impl ImportRecord {
    /// Size as it is persisted: folders never store one.
    pub fn stored_size(&self) -> Option<i64> {
        match self.kind {
            UnitKind::File => self.size,
            UnitKind::Folder => None,
        }
    }
}
