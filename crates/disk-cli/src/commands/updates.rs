//! List recently changed files.

use clap::Args;

use disk_core::error::AppError;
use disk_core::types::parse_timestamp;
use disk_service::HistoryService;

use super::UnitRow;
use crate::output::{self, OutputFormat};

/// Arguments for the updates command
#[derive(Debug, Args)]
pub struct UpdatesArgs {
    /// End of the 24 hour window, ISO-8601
    pub date: String,
}

/// Execute the updates command
pub async fn execute(
    args: &UpdatesArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let as_of = parse_timestamp(&args.date)?;
    let config = super::load_config(config_path)?;
    let history = HistoryService::new(super::open_store(&config).await?);

    let rows: Vec<UnitRow> = history
        .recent_file_changes(as_of)
        .await?
        .into_iter()
        .map(UnitRow::from)
        .collect();

    output::print_list(&rows, format)
}
