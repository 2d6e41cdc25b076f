//! Timestamp helpers shared by the storage layer

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

use crate::error::{AppError, AppResult};

/// Current time truncated to microseconds
///
/// Both databases store microsecond precision, so values produced here read
/// back unchanged.
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Formats a timestamp for TEXT storage
///
/// The width is fixed so that lexical order equals chronological order.
///
/// Example output: "2025-06-14T10:03:54.374120Z"
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parses a timestamp written by [`format_timestamp`] (or any RFC 3339 value)
pub fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::Database(format!("Invalid stored timestamp '{}': {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_format_timestamp() {
        let dt = Utc.with_ymd_and_hms(2025, 6, 14, 10, 3, 54).unwrap();
        assert_eq!(format_timestamp(dt), "2025-06-14T10:03:54.000000Z");
    }

    #[test]
    fn test_current_timestamp_round_trips_through_text() {
        let now = current_timestamp();
        assert_eq!(now.nanosecond() % 1_000, 0);
        assert_eq!(parse_timestamp(&format_timestamp(now)).unwrap(), now);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(AppError::Database(_))
        ));
    }

    #[test]
    fn test_text_order_matches_time_order() {
        let earlier = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let later = earlier + chrono::Duration::microseconds(1);
        assert!(format_timestamp(earlier) < format_timestamp(later));
    }
}
