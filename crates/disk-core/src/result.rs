//! Convenience result type alias for Disk.

use crate::error::AppError;

/// A specialized `Result` type for Disk operations.
pub type AppResult<T> = Result<T, AppError>;
