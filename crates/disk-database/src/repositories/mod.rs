//! SQL for the unit and history tables.
//!
//! Every query runs on a caller-supplied connection so that the store can
//! group them into a single transaction.

pub mod history;
pub mod unit;
