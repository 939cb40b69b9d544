//! Unit entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use disk_core::types::UnitId;

use super::import::ImportRecord;
use super::kind::UnitKind;

/// Current state of a node in the hierarchy, as held by the unit store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    /// Globally unique identifier.
    pub id: UnitId,
    /// File or folder. Never changes after creation.
    #[serde(rename = "type")]
    pub kind: UnitKind,
    /// Location of a file's content. Always `None` for folders.
    pub url: Option<String>,
    /// Containing folder, `None` for roots.
    pub parent_id: Option<UnitId>,
    /// Stored size for files. Folders store `None`; their size is derived.
    pub size: Option<i64>,
    /// Most recent change to this unit or any descendant.
    pub modified_at: DateTime<Utc>,
}

impl Unit {
    /// Build a new unit from an import record.
    pub fn from_import(record: &ImportRecord, modified_at: DateTime<Utc>) -> Self {
        Self {
            id: record.id.clone(),
            kind: record.kind,
            url: record.url.clone(),
            parent_id: record.parent_id.clone(),
            size: record.stored_size(),
            modified_at,
        }
    }

    /// Overwrite the mutable fields from an import record. `kind` and
    /// `modified_at` are left untouched.
    pub fn apply_import(&mut self, record: &ImportRecord) {
        self.url = record.url.clone();
        self.parent_id = record.parent_id.clone();
        self.size = record.stored_size();
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Check if this is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    /// Stored file size, zero for folders.
    pub fn file_size(&self) -> i64 {
        match self.kind {
            UnitKind::File => self.size.unwrap_or(0),
            UnitKind::Folder => 0,
        }
    }
}
