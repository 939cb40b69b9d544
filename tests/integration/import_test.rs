//! Integration tests for `POST /imports` and `DELETE /delete/{id}`.

mod helpers;

use helpers::TestApp;
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_import_returns_empty_200() {
    let app = TestApp::new().await;

    let response = app
        .import(
            json!([
                {"id": "root", "parentId": null, "type": "FOLDER"},
                {"id": "f1", "url": "/file/f1", "parentId": "root", "type": "FILE", "size": 64}
            ]),
            "2022-02-01T12:00:00Z",
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.store.unit_count().await, 2);
}

#[tokio::test]
async fn test_import_rejects_malformed_body() {
    let app = TestApp::new().await;

    let cases = [
        json!({"items": [{"id": "f", "type": "LINK"}], "updateDate": "2022-02-01T12:00:00Z"}),
        json!({"items": [{"id": "f", "url": "/f", "type": "FILE", "size": 1}]}),
        json!({"items": [{"id": "f", "url": "/f", "type": "FILE", "size": 1}], "updateDate": "tomorrow"}),
        json!({"items": [{"id": "", "type": "FOLDER"}], "updateDate": "2022-02-01T12:00:00Z"}),
        json!({"items": [{"id": "f", "url": "/f", "type": "FILE", "size": -5}], "updateDate": "2022-02-01T12:00:00Z"}),
    ];

    for body in cases {
        let response = app.request("POST", "/imports", Some(body.clone())).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{body}");
        response.assert_validation_failed();
    }
    assert_eq!(app.store.unit_count().await, 0);
}

#[tokio::test]
async fn test_import_rejects_structural_errors() {
    let app = TestApp::new().await;
    app.import_ok(
        json!([
            {"id": "root", "type": "FOLDER"},
            {"id": "f1", "url": "/file/f1", "parentId": "root", "type": "FILE", "size": 10}
        ]),
        "2022-02-01T12:00:00Z",
    )
    .await;

    // file as parent
    app.import(
        json!([{"id": "f2", "url": "/file/f2", "parentId": "f1", "type": "FILE", "size": 1}]),
        "2022-02-02T12:00:00Z",
    )
    .await
    .assert_validation_failed();

    // kind change
    app.import(
        json!([{"id": "f1", "type": "FOLDER"}]),
        "2022-02-02T12:00:00Z",
    )
    .await
    .assert_validation_failed();

    // duplicate id
    app.import(
        json!([
            {"id": "d", "type": "FOLDER"},
            {"id": "d", "type": "FOLDER"}
        ]),
        "2022-02-02T12:00:00Z",
    )
    .await
    .assert_validation_failed();

    // folder with url
    app.import(
        json!([{"id": "d", "url": "/nope", "type": "FOLDER"}]),
        "2022-02-02T12:00:00Z",
    )
    .await
    .assert_validation_failed();

    // unknown parent
    app.import(
        json!([{"id": "d", "parentId": "ghost", "type": "FOLDER"}]),
        "2022-02-02T12:00:00Z",
    )
    .await
    .assert_validation_failed();

    assert_eq!(app.store.unit_count().await, 2);
}

#[tokio::test]
async fn test_rejected_batch_is_atomic() {
    let app = TestApp::new().await;
    app.import_ok(json!([{"id": "root", "type": "FOLDER"}]), "2022-02-01T12:00:00Z")
        .await;

    app.import(
        json!([
            {"id": "ok", "url": "/file/ok", "parentId": "root", "type": "FILE", "size": 5},
            {"id": "bad", "url": "/file/bad", "parentId": "root", "type": "FILE"}
        ]),
        "2022-02-02T12:00:00Z",
    )
    .await
    .assert_validation_failed();

    app.request("GET", "/nodes/ok", None)
        .await
        .assert_not_found();

    let root = app.request("GET", "/nodes/root", None).await;
    assert_eq!(root.body["size"], 0);
    assert_eq!(root.body["date"], "2022-02-01T12:00:00.000Z");
}

#[tokio::test]
async fn test_reparent_cycle_is_rejected() {
    let app = TestApp::new().await;
    app.import_ok(
        json!([
            {"id": "a", "type": "FOLDER"},
            {"id": "b", "parentId": "a", "type": "FOLDER"}
        ]),
        "2022-02-01T12:00:00Z",
    )
    .await;

    app.import(
        json!([{"id": "a", "parentId": "b", "type": "FOLDER"}]),
        "2022-02-02T12:00:00Z",
    )
    .await
    .assert_validation_failed();

    let a = app.request("GET", "/nodes/a", None).await;
    assert!(a.body["parentId"].is_null());
}

#[tokio::test]
async fn test_delete_cascades() {
    let app = TestApp::new().await;
    app.import_ok(
        json!([
            {"id": "root", "type": "FOLDER"},
            {"id": "sub", "parentId": "root", "type": "FOLDER"},
            {"id": "f1", "url": "/file/f1", "parentId": "sub", "type": "FILE", "size": 10},
            {"id": "f2", "url": "/file/f2", "parentId": "root", "type": "FILE", "size": 20}
        ]),
        "2022-02-01T12:00:00Z",
    )
    .await;

    let response = app
        .request("DELETE", "/delete/sub?date=2022-02-02T12:00:00Z", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    app.request("GET", "/nodes/sub", None)
        .await
        .assert_not_found();
    app.request("GET", "/nodes/f1", None)
        .await
        .assert_not_found();

    let root = app.request("GET", "/nodes/root", None).await;
    assert_eq!(root.body["size"], 20);
    assert_eq!(root.body["date"], "2022-02-02T12:00:00.000Z");
}

#[tokio::test]
async fn test_delete_errors() {
    let app = TestApp::new().await;
    app.import_ok(json!([{"id": "root", "type": "FOLDER"}]), "2022-02-01T12:00:00Z")
        .await;

    app.request("DELETE", "/delete/ghost?date=2022-02-02T12:00:00Z", None)
        .await
        .assert_not_found();

    app.request("DELETE", "/delete/root", None)
        .await
        .assert_validation_failed();

    app.request("DELETE", "/delete/root?date=not-a-date", None)
        .await
        .assert_validation_failed();

    assert_eq!(app.store.unit_count().await, 1);
}
