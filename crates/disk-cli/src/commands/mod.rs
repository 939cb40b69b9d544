//! CLI command definitions and dispatch.

pub mod history;
pub mod import;
pub mod migrate;
pub mod node;
pub mod serve;
pub mod updates;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use disk_core::config::AppConfig;
use disk_core::error::AppError;
use disk_core::types::format_timestamp;
use disk_database::store::UnitStore;
use disk_entity::history::HistoryRecord;
use disk_entity::unit::Unit;

use crate::output::OutputFormat;

/// Disk: hierarchical file and folder tracking service
#[derive(Debug, Parser)]
#[command(name = "disk", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Apply an import batch from a JSON file
    Import(import::ImportArgs),
    /// Show a unit and its subtree
    Node(node::NodeArgs),
    /// List files changed in the 24 hours before a date
    Updates(updates::UpdatesArgs),
    /// Show the history of a unit
    History(history::HistoryArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::Import(args) => import::execute(args, &self.config, self.format).await,
            Commands::Node(args) => node::execute(args, &self.config, self.format).await,
            Commands::Updates(args) => updates::execute(args, &self.config, self.format).await,
            Commands::History(args) => history::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration, with the overlay named by `DISK_ENV`
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    let env = std::env::var("DISK_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(config_path, &env)
}

/// Helper: open the configured unit store
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn UnitStore>, AppError> {
    disk_database::store::open_store(config).await
}

/// Flat unit display row
#[derive(Debug, Serialize, Tabled)]
pub struct UnitRow {
    /// Unit ID
    pub id: String,
    /// FILE or FOLDER
    #[tabled(rename = "type")]
    pub kind: String,
    /// Parent ID
    pub parent: String,
    /// Size in bytes
    pub size: i64,
    /// Content url
    pub url: String,
    /// Timestamp
    pub date: String,
}

impl From<Unit> for UnitRow {
    fn from(unit: Unit) -> Self {
        Self {
            size: unit.file_size(),
            id: unit.id.into_inner(),
            kind: unit.kind.to_string(),
            parent: unit.parent_id.map(|p| p.into_inner()).unwrap_or_default(),
            url: unit.url.unwrap_or_default(),
            date: format_timestamp(&unit.modified_at),
        }
    }
}

impl From<HistoryRecord> for UnitRow {
    fn from(record: HistoryRecord) -> Self {
        Self {
            id: record.unit_id.into_inner(),
            kind: record.kind.to_string(),
            parent: record.parent_id.map(|p| p.into_inner()).unwrap_or_default(),
            size: record.size,
            url: record.url.unwrap_or_default(),
            date: format_timestamp(&record.recorded_at),
        }
    }
}
