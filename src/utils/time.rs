/*!
 * Timestamp parsing shared by the list query parameters and the write validator.
 *
 * Browsers send due dates either as full ISO 8601 instants (`2025-03-01T00:00:00.000Z`)
 * or as bare calendar dates from `<input type="date">` (`2025-03-01`). Both are
 * accepted; values without an offset are read as UTC.
 */

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse an ISO 8601 timestamp or calendar date into a UTC instant.
///
/// Returns `None` for anything that is not a valid calendar date/time, including
/// impossible dates such as `2025-02-30`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parses_rfc3339_with_offset() {
        let parsed = parse_timestamp("2025-03-01T08:30:00+08:00").unwrap();
        assert_eq!(parsed.hour(), 0);
        assert_eq!(parsed.minute(), 30);
    }

    #[test]
    fn test_parses_browser_iso_string() {
        let parsed = parse_timestamp("2025-03-01T00:00:00.000Z").unwrap();
        assert_eq!(parsed.day(), 1);
        assert_eq!(parsed.month(), 3);
    }

    #[test]
    fn test_parses_calendar_date_as_utc_midnight() {
        let parsed = parse_timestamp("2025-12-31").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-12-31T00:00:00+00:00");
    }

    #[test]
    fn test_parses_naive_datetime() {
        assert!(parse_timestamp("2025-06-15T10:00").is_some());
        assert!(parse_timestamp("2025-06-15T10:00:30").is_some());
    }

    #[test]
    fn test_rejects_invalid_dates() {
        assert!(parse_timestamp("not-a-date").is_none());
        assert!(parse_timestamp("2025-02-30").is_none());
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("   ").is_none());
    }
}
