//! Show a unit with its subtree.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use disk_api::dto::response::NodeResponse;
use disk_core::error::AppError;
use disk_core::types::{UnitId, format_timestamp};
use disk_entity::unit::{Unit, UnitNode};
use disk_service::NodeService;

use crate::output::{self, OutputFormat};

/// Arguments for the node command
#[derive(Debug, Args)]
pub struct NodeArgs {
    /// Unit ID
    pub id: String,
}

/// Tree display row
#[derive(Debug, Serialize, Tabled)]
struct TreeRow {
    /// Indented ID
    id: String,
    /// FILE or FOLDER
    #[tabled(rename = "type")]
    kind: String,
    /// Size in bytes
    size: i64,
    /// Last modification
    date: String,
}

/// Execute the node command
pub async fn execute(
    args: &NodeArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let nodes = NodeService::new(super::open_store(&config).await?);
    let id = UnitId::new(args.id.clone());
    let node = nodes.get_node(&id).await?;

    match format {
        OutputFormat::Json => output::print_json(&NodeResponse::from(node)),
        OutputFormat::Table => {
            let ancestors = nodes.ancestors(&id).await?;
            output::print_kv("Path", &path_line(&ancestors, &id));
            output::print_list(&tree_rows(&node), format)
        }
    }
}

/// `root / docs / id`, built from an ancestor chain ordered parent first.
fn path_line(ancestors: &[Unit], id: &UnitId) -> String {
    ancestors
        .iter()
        .rev()
        .map(|unit| unit.id.as_str())
        .chain(std::iter::once(id.as_str()))
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Pre-order rows with the id indented by depth.
fn tree_rows(root: &UnitNode) -> Vec<TreeRow> {
    let mut rows = Vec::with_capacity(root.count());
    let mut stack = vec![(root, 0usize)];

    while let Some((node, depth)) = stack.pop() {
        rows.push(TreeRow {
            id: format!("{}{}", "  ".repeat(depth), node.id),
            kind: node.kind.to_string(),
            size: node.size,
            date: format_timestamp(&node.modified_at),
        });
        for child in node.children.iter().flatten().rev() {
            stack.push((child, depth + 1));
        }
    }

    rows
}
