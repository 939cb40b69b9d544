//! HTTP request handlers.

pub mod health;
pub mod history;
pub mod imports;
pub mod nodes;
