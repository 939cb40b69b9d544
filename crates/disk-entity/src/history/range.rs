//! Time range filter for history queries.

use chrono::{DateTime, Utc};

use disk_core::error::AppError;

/// Which part of a unit's history to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryRange {
    /// The complete history.
    All,
    /// Records with `start <= recorded_at < end`.
    Between {
        /// Inclusive lower bound.
        start: DateTime<Utc>,
        /// Exclusive upper bound.
        end: DateTime<Utc>,
    },
}

impl HistoryRange {
    /// Build a range from optional bounds. Both or neither must be given,
    /// and `start` must not be after `end`.
    pub fn from_bounds(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self, AppError> {
        match (start, end) {
            (None, None) => Ok(Self::All),
            (Some(start), Some(end)) if start <= end => Ok(Self::Between { start, end }),
            (Some(_), Some(_)) => Err(AppError::validation(
                "dateStart must not be later than dateEnd",
            )),
            _ => Err(AppError::validation(
                "dateStart and dateEnd must be given together",
            )),
        }
    }

    /// Check whether a timestamp falls inside the range.
    pub fn contains(&self, ts: &DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Between { start, end } => start <= ts && ts < end,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_single_bound_rejected() {
        let t = Utc.with_ymd_and_hms(2022, 2, 1, 0, 0, 0).unwrap();
        assert!(HistoryRange::from_bounds(Some(t), None).is_err());
        assert!(HistoryRange::from_bounds(None, Some(t)).is_err());
    }

    #[test]
    fn test_half_open() {
        let start = Utc.with_ymd_and_hms(2022, 2, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2022, 2, 2, 0, 0, 0).unwrap();
        let range = HistoryRange::from_bounds(Some(start), Some(end)).unwrap();
        assert!(range.contains(&start));
        assert!(!range.contains(&end));
    }

    #[test]
    fn test_inverted_rejected() {
        let start = Utc.with_ymd_and_hms(2022, 2, 2, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2022, 2, 1, 0, 0, 0).unwrap();
        assert!(HistoryRange::from_bounds(Some(start), Some(end)).is_err());
    }
}
