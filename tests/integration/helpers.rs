//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use disk_core::config::{AppConfig, StoreBackend};
use disk_database::store::{MemoryUnitStore, UnitStore};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store handle for direct inspection
    pub store: Arc<MemoryUnitStore>,
}

impl TestApp {
    /// Create a new test application over an empty in-memory store
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.store.backend = StoreBackend::Memory;

        let store = Arc::new(MemoryUnitStore::new());
        let shared: Arc<dyn UnitStore> = store.clone();
        let router = disk_api::build_router(disk_api::AppState::new(config, shared));

        Self { router, store }
    }

    /// POST /imports with the given items and date
    pub async fn import(&self, items: Value, update_date: &str) -> TestResponse {
        let body = json!({ "items": items, "updateDate": update_date });
        self.request("POST", "/imports", Some(body)).await
    }

    /// Import that must succeed
    pub async fn import_ok(&self, items: Value, update_date: &str) {
        let response = self.import(items, update_date).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Import failed: {:?}",
            response.body
        );
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Assert the standard validation error body
    pub fn assert_validation_failed(&self) {
        assert_eq!(self.status, StatusCode::BAD_REQUEST, "{:?}", self.body);
        assert_eq!(self.body, json!({ "code": 400, "message": "Validation Failed" }));
    }

    /// Assert the standard not-found error body
    pub fn assert_not_found(&self) {
        assert_eq!(self.status, StatusCode::NOT_FOUND, "{:?}", self.body);
        assert_eq!(self.body, json!({ "code": 404, "message": "Item not found" }));
    }
}
