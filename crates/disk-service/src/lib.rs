//! # disk-service
//!
//! Business logic for the Disk unit hierarchy. Services receive the unit
//! store as an injected `Arc<dyn UnitStore>` and run every operation inside
//! one store transaction.
//!
//! The traversal helpers in [`navigator`] and [`aggregator`] operate on an
//! open transaction so the mutation engine and the read services share them.

pub mod aggregator;
pub mod engine;
pub mod history;
pub mod navigator;
pub mod node;

pub use engine::{DeleteSummary, ImportSummary, MutationEngine};
pub use history::HistoryService;
pub use node::NodeService;
