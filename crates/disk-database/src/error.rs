//! Classification of sqlx errors into application errors.

use disk_core::error::{AppError, ErrorKind};

/// PostgreSQL SQLSTATE for `serialization_failure`.
const SERIALIZATION_FAILURE: &str = "40001";
/// PostgreSQL SQLSTATE for `deadlock_detected`.
const DEADLOCK_DETECTED: &str = "40P01";

/// Map a sqlx error into an [`AppError`].
///
/// Conditions the caller can resolve by retrying (pool exhaustion, lost
/// connections, serialization conflicts) become
/// [`ErrorKind::ServiceUnavailable`]; everything else is
/// [`ErrorKind::Database`].
pub fn db_error(context: &str, err: sqlx::Error) -> AppError {
    let kind = if is_transient(&err) {
        ErrorKind::ServiceUnavailable
    } else {
        ErrorKind::Database
    };
    AppError::with_source(kind, format!("{context}: {err}"), err)
}

fn is_transient(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => true,
        sqlx::Error::Database(db_err) => matches!(
            db_err.code().as_deref(),
            Some(SERIALIZATION_FAILURE) | Some(DEADLOCK_DETECTED)
        ),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_retryable() {
        let err = db_error("Failed to begin transaction", sqlx::Error::PoolTimedOut);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_row_not_found_is_database() {
        let err = db_error("Failed to load unit", sqlx::Error::RowNotFound);
        assert_eq!(err.kind, ErrorKind::Database);
        assert!(!err.is_retryable());
    }
}
