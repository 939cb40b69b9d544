//! Show the history of a unit.

use clap::Args;

use disk_core::error::AppError;
use disk_core::types::{UnitId, parse_timestamp};
use disk_service::HistoryService;

use super::UnitRow;
use crate::output::{self, OutputFormat};

/// Arguments for the history command
#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Unit ID
    pub id: String,
    /// Inclusive lower bound, ISO-8601
    #[arg(long)]
    pub start: Option<String>,
    /// Exclusive upper bound, ISO-8601
    #[arg(long)]
    pub end: Option<String>,
}

/// Execute the history command
pub async fn execute(
    args: &HistoryArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let start = args.start.as_deref().map(parse_timestamp).transpose()?;
    let end = args.end.as_deref().map(parse_timestamp).transpose()?;

    let config = super::load_config(config_path)?;
    let history = HistoryService::new(super::open_store(&config).await?);

    let rows: Vec<UnitRow> = history
        .node_history(&UnitId::new(args.id.clone()), start, end)
        .await?
        .into_iter()
        .map(UnitRow::from)
        .collect();

    output::print_list(&rows, format)
}
