//! History record entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use disk_core::types::UnitId;

use crate::unit::{Unit, UnitKind};

/// An immutable snapshot of a unit's state, as stored in the history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// Store-assigned sequence number; orders records with equal timestamps.
    pub seq: i64,
    /// The unit this snapshot belongs to.
    pub unit_id: UnitId,
    /// File or folder.
    #[serde(rename = "type")]
    pub kind: UnitKind,
    /// Content url at that time.
    pub url: Option<String>,
    /// Parent at that time.
    pub parent_id: Option<UnitId>,
    /// File size, or the recomputed folder size.
    pub size: i64,
    /// The unit's `modified_at` when the snapshot was taken.
    pub recorded_at: DateTime<Utc>,
}

/// A snapshot about to be appended to the history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSnapshot {
    /// The unit this snapshot belongs to.
    pub unit_id: UnitId,
    /// File or folder.
    pub kind: UnitKind,
    /// Content url.
    pub url: Option<String>,
    /// Parent folder.
    pub parent_id: Option<UnitId>,
    /// Stored or aggregated size.
    pub size: i64,
    /// Snapshot timestamp.
    pub recorded_at: DateTime<Utc>,
}

impl UnitSnapshot {
    /// Capture a unit's state with an externally computed size.
    pub fn capture(unit: &Unit, size: i64) -> Self {
        Self {
            unit_id: unit.id.clone(),
            kind: unit.kind,
            url: unit.url.clone(),
            parent_id: unit.parent_id.clone(),
            size,
            recorded_at: unit.modified_at,
        }
    }

    /// Compare content fields (kind, url, parent, size). Timestamps are
    /// not compared.
    pub fn same_content(&self, record: &HistoryRecord) -> bool {
        self.kind == record.kind
            && self.url == record.url
            && self.parent_id == record.parent_id
            && self.size == record.size
    }

    /// Turn the snapshot into a stored record with the given sequence number.
    pub fn into_record(self, seq: i64) -> HistoryRecord {
        HistoryRecord {
            seq,
            unit_id: self.unit_id,
            kind: self.kind,
            url: self.url,
            parent_id: self.parent_id,
            size: self.size,
            recorded_at: self.recorded_at,
        }
    }
}
