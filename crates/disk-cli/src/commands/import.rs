//! Apply an import batch from a file.

use std::path::PathBuf;

use clap::Args;

use disk_api::dto::request::ImportRequest;
use disk_core::error::AppError;
use disk_service::MutationEngine;

use crate::output::{self, OutputFormat};

/// Arguments for the import command
#[derive(Debug, Args)]
pub struct ImportArgs {
    /// JSON file with the same body as `POST /imports`
    pub file: PathBuf,
}

/// Execute the import command
pub async fn execute(
    args: &ImportArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let raw = tokio::fs::read_to_string(&args.file).await.map_err(|e| {
        AppError::validation(format!("Cannot read '{}': {e}", args.file.display()))
    })?;
    let request: ImportRequest = serde_json::from_str(&raw)
        .map_err(|e| AppError::validation(format!("Invalid import file: {e}")))?;
    let (records, timestamp) = request.into_batch()?;

    let config = super::load_config(config_path)?;
    let engine = MutationEngine::new(super::open_store(&config).await?);
    let summary = engine.import_batch(records, timestamp).await?;

    match format {
        OutputFormat::Json => output::print_json(&summary)?,
        OutputFormat::Table => {
            output::print_success("Import batch applied.");
            output::print_kv("Created", &summary.created.to_string());
            output::print_kv("Updated", &summary.updated.to_string());
            output::print_kv("Touched", &summary.touched.to_string());
            output::print_kv("History appended", &summary.history_appended.to_string());
        }
    }

    Ok(())
}
