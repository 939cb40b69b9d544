//! ISO-8601 timestamp conversion at the system boundary.
//!
//! Timestamps cross the API as ISO-8601 strings and are converted to
//! [`Timestamp`] immediately; everything below the transport layer compares
//! `DateTime<Utc>` values directly.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::error::AppError;

/// Internal timestamp representation.
pub type Timestamp = DateTime<Utc>;

/// Width of the "recently changed files" window: 24 hours.
pub fn updates_window() -> Duration {
    Duration::hours(24)
}

/// Parse an RFC 3339 / ISO-8601 string with an explicit offset into UTC.
pub fn parse_timestamp(raw: &str) -> Result<Timestamp, AppError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::validation(format!("Invalid ISO-8601 date '{raw}': {e}")))
}

/// Render a timestamp as ISO-8601 UTC with millisecond precision, e.g.
/// `2022-02-01T12:00:00.000Z`.
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde adapter rendering [`Timestamp`] with [`format_timestamp`].
pub mod iso8601 {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{Timestamp, format_timestamp, parse_timestamp};

    /// Serialize as ISO-8601 UTC with millisecond precision.
    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_timestamp(ts))
    }

    /// Deserialize from any RFC 3339 string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(|e| serde::de::Error::custom(e.message))
    }
}
