//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use disk_core::result::AppResult;
use disk_core::types::{UnitId, parse_timestamp};
use disk_entity::unit::{ImportRecord, UnitKind};

/// `POST /imports` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    /// Records to create or update.
    #[validate(nested)]
    pub items: Vec<ImportItem>,
    /// Batch timestamp, ISO-8601.
    pub update_date: String,
}

impl ImportRequest {
    /// Convert into engine records and a parsed batch timestamp.
    pub fn into_batch(self) -> AppResult<(Vec<ImportRecord>, DateTime<Utc>)> {
        let timestamp = parse_timestamp(&self.update_date)?;
        let records = self.items.into_iter().map(ImportRecord::from).collect();
        Ok((records, timestamp))
    }
}

/// One element of an import batch.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImportItem {
    /// Unit ID.
    #[validate(length(min = 1, max = 256))]
    pub id: String,
    /// Content url, files only.
    #[serde(default)]
    #[validate(length(max = 256))]
    pub url: Option<String>,
    /// Parent folder ID.
    #[serde(default)]
    #[validate(length(min = 1, max = 256))]
    pub parent_id: Option<String>,
    /// `FILE` or `FOLDER`.
    #[serde(rename = "type")]
    pub kind: UnitKind,
    /// File size.
    #[serde(default)]
    #[validate(range(min = 0))]
    pub size: Option<i64>,
}

impl From<ImportItem> for ImportRecord {
    fn from(item: ImportItem) -> Self {
        Self {
            id: UnitId::new(item.id),
            url: item.url,
            parent_id: item.parent_id.map(UnitId::new),
            kind: item.kind,
            size: item.size,
        }
    }
}

/// `?date=` query of `/updates` and `/delete/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateQuery {
    /// ISO-8601 timestamp.
    pub date: String,
}

impl DateQuery {
    /// Parsed timestamp.
    pub fn timestamp(&self) -> AppResult<DateTime<Utc>> {
        parse_timestamp(&self.date)
    }
}

/// `?dateStart=&dateEnd=` query of `/node/{id}/history`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    /// Inclusive lower bound.
    #[serde(default)]
    pub date_start: Option<String>,
    /// Exclusive upper bound.
    #[serde(default)]
    pub date_end: Option<String>,
}

impl HistoryQuery {
    /// Parsed bounds; each is `None` when absent.
    pub fn bounds(&self) -> AppResult<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
        let start = self.date_start.as_deref().map(parse_timestamp).transpose()?;
        let end = self.date_end.as_deref().map(parse_timestamp).transpose()?;
        Ok((start, end))
    }
}
