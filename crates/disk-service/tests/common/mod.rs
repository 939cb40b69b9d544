//! Shared fixtures for service tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Utc};

use disk_core::types::{UnitId, parse_timestamp};
use disk_database::store::{MemoryUnitStore, UnitStore};
use disk_entity::unit::{ImportRecord, UnitKind};
use disk_service::{HistoryService, MutationEngine, NodeService};

/// Services wired to one in-memory store.
pub struct Fixture {
    /// Direct store handle for inspection
    pub store: Arc<MemoryUnitStore>,
    /// Mutation engine
    pub engine: MutationEngine,
    /// Node reads
    pub nodes: NodeService,
    /// History reads
    pub history: HistoryService,
}

impl Fixture {
    /// Create services over an empty store
    pub fn new() -> Self {
        let store = Arc::new(MemoryUnitStore::new());
        let shared: Arc<dyn UnitStore> = store.clone();
        Self {
            engine: MutationEngine::new(Arc::clone(&shared)),
            nodes: NodeService::new(Arc::clone(&shared)),
            history: HistoryService::new(shared),
            store,
        }
    }

    /// Import a batch that must succeed
    pub async fn import(&self, records: Vec<ImportRecord>, at: &str) {
        self.engine
            .import_batch(records, ts(at))
            .await
            .expect("Import failed");
    }
}

/// Parse a test timestamp
pub fn ts(raw: &str) -> DateTime<Utc> {
    parse_timestamp(raw).expect("Bad test timestamp")
}

/// Shorthand for a unit id
pub fn id(raw: &str) -> UnitId {
    UnitId::new(raw)
}

/// Folder import record
pub fn folder(id: &str, parent: Option<&str>) -> ImportRecord {
    ImportRecord {
        id: UnitId::new(id),
        url: None,
        parent_id: parent.map(UnitId::new),
        kind: UnitKind::Folder,
        size: None,
    }
}

/// File import record
pub fn file(id: &str, parent: Option<&str>, size: i64) -> ImportRecord {
    ImportRecord {
        id: UnitId::new(id),
        url: Some(format!("/file/{id}")),
        parent_id: parent.map(UnitId::new),
        kind: UnitKind::File,
        size: Some(size),
    }
}
