//! Integration tests for `GET /nodes/{id}` and `GET /health`.

mod helpers;

use helpers::TestApp;
use http::StatusCode;
use serde_json::json;

async fn seeded() -> TestApp {
    let app = TestApp::new().await;
    app.import_ok(
        json!([
            {"id": "root", "type": "FOLDER"},
            {"id": "docs", "parentId": "root", "type": "FOLDER"},
            {"id": "b.txt", "url": "/file/b", "parentId": "docs", "type": "FILE", "size": 30},
            {"id": "a.txt", "url": "/file/a", "parentId": "docs", "type": "FILE", "size": 12}
        ]),
        "2022-02-01T12:00:00Z",
    )
    .await;
    app.import_ok(
        json!([{"id": "empty", "parentId": "root", "type": "FOLDER"}]),
        "2022-02-02T08:30:00Z",
    )
    .await;
    app
}

#[tokio::test]
async fn test_get_node_returns_full_tree() {
    let app = seeded().await;

    let response = app.request("GET", "/nodes/root", None).await;
    assert_eq!(response.status, StatusCode::OK);

    assert_eq!(
        response.body,
        json!({
            "id": "root",
            "url": null,
            "parentId": null,
            "type": "FOLDER",
            "size": 42,
            "date": "2022-02-02T08:30:00.000Z",
            "children": [
                {
                    "id": "docs",
                    "url": null,
                    "parentId": "root",
                    "type": "FOLDER",
                    "size": 42,
                    "date": "2022-02-01T12:00:00.000Z",
                    "children": [
                        {
                            "id": "a.txt",
                            "url": "/file/a",
                            "parentId": "docs",
                            "type": "FILE",
                            "size": 12,
                            "date": "2022-02-01T12:00:00.000Z",
                            "children": null
                        },
                        {
                            "id": "b.txt",
                            "url": "/file/b",
                            "parentId": "docs",
                            "type": "FILE",
                            "size": 30,
                            "date": "2022-02-01T12:00:00.000Z",
                            "children": null
                        }
                    ]
                },
                {
                    "id": "empty",
                    "url": null,
                    "parentId": "root",
                    "type": "FOLDER",
                    "size": 0,
                    "date": "2022-02-02T08:30:00.000Z",
                    "children": []
                }
            ]
        })
    );
}

#[tokio::test]
async fn test_get_file_node() {
    let app = seeded().await;

    let response = app.request("GET", "/nodes/a.txt", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["type"], "FILE");
    assert_eq!(response.body["size"], 12);
    assert!(response.body["children"].is_null());
}

#[tokio::test]
async fn test_get_unknown_node_is_404() {
    let app = seeded().await;
    app.request("GET", "/nodes/nothing", None)
        .await
        .assert_not_found();
}

#[tokio::test]
async fn test_file_update_propagates_date_to_ancestors_only() {
    let app = seeded().await;
    app.import_ok(
        json!([{"id": "a.txt", "url": "/file/a", "parentId": "docs", "type": "FILE", "size": 100}]),
        "2022-02-03T00:00:00Z",
    )
    .await;

    let root = app.request("GET", "/nodes/root", None).await;
    assert_eq!(root.body["size"], 130);
    assert_eq!(root.body["date"], "2022-02-03T00:00:00.000Z");
    assert_eq!(root.body["children"][0]["date"], "2022-02-03T00:00:00.000Z");
    assert_eq!(root.body["children"][0]["children"][1]["date"], "2022-02-01T12:00:00.000Z");
    assert_eq!(root.body["children"][1]["date"], "2022-02-02T08:30:00.000Z");
}

#[tokio::test]
async fn test_health_reports_memory_store() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["store"], "memory");
    assert_eq!(response.body["store_healthy"], true);
}
