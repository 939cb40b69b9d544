//! Historical unit snapshots.

pub mod model;
pub mod range;

pub use model::{HistoryRecord, UnitSnapshot};
pub use range::HistoryRange;
