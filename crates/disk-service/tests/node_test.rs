//! Node read facade.

mod common;

use common::{Fixture, file, folder, id};
use disk_core::error::ErrorKind;

async fn seeded() -> Fixture {
    let fx = Fixture::new();
    fx.import(
        vec![
            folder("root", None),
            folder("docs", Some("root")),
            file("b.txt", Some("docs"), 2),
            file("a.txt", Some("docs"), 1),
            folder("sub", Some("docs")),
        ],
        "2022-02-01T12:00:00Z",
    )
    .await;
    fx
}

#[tokio::test]
async fn test_children_are_direct_and_sorted() {
    let fx = seeded().await;

    let children = fx.nodes.children(&id("docs")).await.unwrap();
    let ids: Vec<&str> = children.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["a.txt", "b.txt", "sub"]);

    assert!(fx.nodes.children(&id("a.txt")).await.unwrap().is_empty());

    let err = fx.nodes.children(&id("missing")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_ancestors_run_from_parent_to_root() {
    let fx = seeded().await;

    let chain = fx.nodes.ancestors(&id("a.txt")).await.unwrap();
    let ids: Vec<&str> = chain.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["docs", "root"]);

    assert!(fx.nodes.ancestors(&id("root")).await.unwrap().is_empty());

    let err = fx.nodes.ancestors(&id("missing")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_size_of_matches_subtree() {
    let fx = seeded().await;

    assert_eq!(fx.nodes.size_of(&id("root")).await.unwrap(), 3);
    assert_eq!(fx.nodes.size_of(&id("sub")).await.unwrap(), 0);
    assert_eq!(fx.nodes.get_node(&id("root")).await.unwrap().size, 3);
}
