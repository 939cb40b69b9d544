//! Readers racing writers: a batch is visible completely or not at all.

mod common;

use chrono::Duration;

use common::{Fixture, file, folder, id, ts};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_reader_never_sees_half_a_batch() {
    let fx = Fixture::new();
    fx.import(vec![folder("root", None)], "2022-02-01T00:00:00Z")
        .await;

    let engine = fx.engine.clone();
    let start = ts("2022-02-01T00:00:00Z");
    let writer = tokio::spawn(async move {
        for i in 0..200 {
            let batch = vec![
                file(&format!("f{i}-a"), Some("root"), 1),
                file(&format!("f{i}-b"), Some("root"), 1),
            ];
            engine
                .import_batch(batch, start + Duration::seconds(i + 1))
                .await?;
        }
        Ok::<_, disk_core::error::AppError>(())
    });

    let mut reads = 0usize;
    let mut odd = Vec::new();
    loop {
        let size = fx.nodes.size_of(&id("root")).await.unwrap();
        if size % 2 != 0 {
            odd.push(size);
        }
        reads += 1;
        if writer.is_finished() {
            break;
        }
        tokio::task::yield_now().await;
    }
    writer.await.unwrap().unwrap();

    assert!(odd.is_empty(), "partial batches observed: {odd:?}");
    assert!(reads > 0);
    assert_eq!(fx.nodes.size_of(&id("root")).await.unwrap(), 400);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_overlapping_batches_both_commit() {
    let fx = Fixture::new();
    fx.import(
        vec![
            folder("root", None),
            folder("left", Some("root")),
            folder("right", Some("root")),
        ],
        "2022-02-01T00:00:00Z",
    )
    .await;

    let at = ts("2022-02-02T00:00:00Z");
    let left = {
        let engine = fx.engine.clone();
        tokio::spawn(async move {
            engine
                .import_batch(vec![file("l", Some("left"), 10)], at)
                .await
        })
    };
    let right = {
        let engine = fx.engine.clone();
        tokio::spawn(async move {
            engine
                .import_batch(vec![file("r", Some("right"), 20)], at)
                .await
        })
    };

    let (left, right) = tokio::join!(left, right);
    left.unwrap().unwrap();
    right.unwrap().unwrap();

    let root = fx.nodes.get_node(&id("root")).await.unwrap();
    assert_eq!(root.size, 30);
    assert_eq!(root.modified_at, at);

    let history = fx.history.node_history(&id("root"), None, None).await.unwrap();
    let sizes: Vec<i64> = history.iter().map(|r| r.size).collect();
    assert_eq!(sizes.len(), 3, "{sizes:?}");
    assert_eq!(sizes[0], 0);
    assert!(sizes[1] == 10 || sizes[1] == 20, "{sizes:?}");
    assert_eq!(sizes[2], 30);

    for (folder_id, size) in [("left", 10), ("right", 20)] {
        let records = fx
            .history
            .node_history(&id(folder_id), None, None)
            .await
            .unwrap();
        let last = records.last().unwrap();
        assert_eq!(last.size, size);
        assert_eq!(last.recorded_at, at);
    }
}
