//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use disk_core::types::timestamp::iso8601;
use disk_entity::history::HistoryRecord;
use disk_entity::unit::{Unit, UnitKind, UnitNode};

/// Wrapper for list endpoints: `{"items": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsResponse<T> {
    /// Returned items.
    pub items: Vec<T>,
}

impl<T> ItemsResponse<T> {
    /// Wrap a list of items.
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

/// A unit with its subtree, as returned by `GET /nodes/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeResponse {
    /// Unit ID.
    pub id: String,
    /// Content url, `null` for folders.
    pub url: Option<String>,
    /// Parent ID, `null` for roots.
    pub parent_id: Option<String>,
    /// `FILE` or `FOLDER`.
    #[serde(rename = "type")]
    pub kind: UnitKind,
    /// File size or summed folder size.
    pub size: i64,
    /// Last modification.
    #[serde(with = "iso8601")]
    pub date: DateTime<Utc>,
    /// `null` for files, a list for folders.
    pub children: Option<Vec<NodeResponse>>,
}

impl From<UnitNode> for NodeResponse {
    fn from(node: UnitNode) -> Self {
        Self {
            id: node.id.into_inner(),
            url: node.url,
            parent_id: node.parent_id.map(|p| p.into_inner()),
            kind: node.kind,
            size: node.size,
            date: node.modified_at,
            children: node
                .children
                .map(|children| children.into_iter().map(NodeResponse::from).collect()),
        }
    }
}

/// Flat unit state, used by `/updates` and `/node/{id}/history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitItem {
    /// Unit ID.
    pub id: String,
    /// Content url.
    pub url: Option<String>,
    /// Parent ID.
    pub parent_id: Option<String>,
    /// `FILE` or `FOLDER`.
    #[serde(rename = "type")]
    pub kind: UnitKind,
    /// Size at that point.
    pub size: i64,
    /// Modification time.
    #[serde(with = "iso8601")]
    pub date: DateTime<Utc>,
}

impl From<Unit> for UnitItem {
    fn from(unit: Unit) -> Self {
        Self {
            size: unit.file_size(),
            id: unit.id.into_inner(),
            url: unit.url,
            parent_id: unit.parent_id.map(|p| p.into_inner()),
            kind: unit.kind,
            date: unit.modified_at,
        }
    }
}

impl From<HistoryRecord> for UnitItem {
    fn from(record: HistoryRecord) -> Self {
        Self {
            id: record.unit_id.into_inner(),
            url: record.url,
            parent_id: record.parent_id.map(|p| p.into_inner()),
            kind: record.kind,
            size: record.size,
            date: record.recorded_at,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Store backend name.
    pub store: String,
    /// Whether the store answered.
    pub store_healthy: bool,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use disk_core::types::UnitId;

    use super::*;

    #[test]
    fn test_node_json_shape() {
        let modified_at = Utc.with_ymd_and_hms(2022, 2, 1, 12, 0, 0).unwrap();
        let file = UnitNode {
            id: UnitId::new("f"),
            url: Some("/file/f".to_string()),
            parent_id: Some(UnitId::new("d")),
            kind: UnitKind::File,
            size: 10,
            modified_at,
            children: None,
        };
        let folder = UnitNode {
            id: UnitId::new("d"),
            url: None,
            parent_id: None,
            kind: UnitKind::Folder,
            size: 10,
            modified_at,
            children: Some(vec![file]),
        };

        let json = serde_json::to_value(NodeResponse::from(folder)).unwrap();
        assert_eq!(json["type"], "FOLDER");
        assert_eq!(json["date"], "2022-02-01T12:00:00.000Z");
        assert!(json["parentId"].is_null());
        assert_eq!(json["children"][0]["parentId"], "d");
        assert!(json["children"][0]["children"].is_null());
    }
}
