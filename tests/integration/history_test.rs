//! Integration tests for `GET /updates` and `GET /node/{id}/history`.

mod helpers;

use helpers::TestApp;
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_updates_lists_files_in_window() {
    let app = TestApp::new().await;
    app.import_ok(json!([{"id": "root", "type": "FOLDER"}]), "2022-02-01T00:00:00Z")
        .await;
    app.import_ok(
        json!([{"id": "old", "url": "/file/old", "parentId": "root", "type": "FILE", "size": 1}]),
        "2022-02-01T06:00:00Z",
    )
    .await;
    app.import_ok(
        json!([{"id": "new", "url": "/file/new", "parentId": "root", "type": "FILE", "size": 2}]),
        "2022-02-02T06:00:00Z",
    )
    .await;

    let response = app
        .request("GET", "/updates?date=2022-02-02T12:00:00Z", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({
            "items": [{
                "id": "new",
                "url": "/file/new",
                "parentId": "root",
                "type": "FILE",
                "size": 2,
                "date": "2022-02-02T06:00:00.000Z"
            }]
        })
    );
}

#[tokio::test]
async fn test_updates_requires_valid_date() {
    let app = TestApp::new().await;

    app.request("GET", "/updates", None)
        .await
        .assert_validation_failed();
    app.request("GET", "/updates?date=2022-13-45", None)
        .await
        .assert_validation_failed();
}

#[tokio::test]
async fn test_node_history_tracks_folder_size() {
    let app = TestApp::new().await;
    app.import_ok(json!([{"id": "A", "type": "FOLDER"}]), "2022-02-01T12:00:00Z")
        .await;
    app.import_ok(
        json!([
            {"id": "B", "parentId": "A", "type": "FOLDER"},
            {"id": "F", "url": "/file/F", "parentId": "B", "type": "FILE", "size": 128}
        ]),
        "2022-02-02T12:00:00Z",
    )
    .await;
    let deleted = app
        .request("DELETE", "/delete/F?date=2022-02-03T12:00:00Z", None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let response = app.request("GET", "/node/A/history", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let points: Vec<(String, i64)> = response.body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| {
            (
                item["date"].as_str().unwrap().to_string(),
                item["size"].as_i64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        points,
        vec![
            ("2022-02-01T12:00:00.000Z".to_string(), 0),
            ("2022-02-02T12:00:00.000Z".to_string(), 128),
            ("2022-02-03T12:00:00.000Z".to_string(), 0),
        ]
    );

    let ranged = app
        .request(
            "GET",
            "/node/A/history?dateStart=2022-02-02T00:00:00Z&dateEnd=2022-02-03T12:00:00Z",
            None,
        )
        .await;
    assert_eq!(ranged.status, StatusCode::OK);
    let items = ranged.body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["size"], 128);
    assert_eq!(items[0]["type"], "FOLDER");
}

#[tokio::test]
async fn test_node_history_errors() {
    let app = TestApp::new().await;
    app.import_ok(json!([{"id": "A", "type": "FOLDER"}]), "2022-02-01T12:00:00Z")
        .await;

    app.request("GET", "/node/missing/history", None)
        .await
        .assert_not_found();
    app.request(
        "GET",
        "/node/A/history?dateStart=2022-02-03T00:00:00Z&dateEnd=2022-02-01T00:00:00Z",
        None,
    )
    .await
    .assert_validation_failed();
    app.request("GET", "/node/A/history?dateStart=garbage&dateEnd=2022-02-01T00:00:00Z", None)
        .await
        .assert_validation_failed();
    app.request("GET", "/node/A/history?dateStart=2022-02-01T00:00:00Z", None)
        .await
        .assert_validation_failed();
}

#[tokio::test]
async fn test_node_history_unknown_id_with_one_bound_is_404() {
    let app = TestApp::new().await;

    app.request("GET", "/node/missing/history?dateStart=2022-02-01T00:00:00Z", None)
        .await
        .assert_not_found();
}

#[tokio::test]
async fn test_deleted_node_history_is_gone() {
    let app = TestApp::new().await;
    app.import_ok(
        json!([
            {"id": "root", "type": "FOLDER"},
            {"id": "f", "url": "/file/f", "parentId": "root", "type": "FILE", "size": 3}
        ]),
        "2022-02-01T12:00:00Z",
    )
    .await;
    app.request("DELETE", "/delete/f?date=2022-02-02T12:00:00Z", None)
        .await;

    app.request("GET", "/node/f/history", None)
        .await
        .assert_not_found();
    assert_eq!(app.store.history_count().await, 2);
}
