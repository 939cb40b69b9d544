//! # disk-core
//!
//! Core crate for Disk. Contains configuration schemas, the typed unit
//! identifier, timestamp conversion helpers, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Disk crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
