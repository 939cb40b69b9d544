//! Shared domain value types.

pub mod id;
pub mod timestamp;

pub use id::UnitId;
pub use timestamp::{Timestamp, format_timestamp, parse_timestamp, updates_window};
