//! Common utility functions

use chrono::{DateTime, NaiveDateTime, Utc};

/// Timestamp format for database storage (microsecond precision)
pub const DB_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Accepts any fractional precision, including none
const DB_TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Convert DateTime to database string format
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format(DB_TIMESTAMP_FORMAT).to_string()
}

/// Parse database timestamp string
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, DB_TIMESTAMP_PARSE_FORMAT)
        .ok()
        .map(|ndt| DateTime::from_naive_utc_and_offset(ndt, Utc))
}

/// Current time formatted for the database
pub fn now_timestamp() -> String {
    format_timestamp(&Utc::now())
}

/// Normalize an email address for lookup: trimmed and lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check that an email has the shape `local@domain.tld`
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_roundtrip() {
        let dt = Utc.with_ymd_and_hms(2016, 12, 15, 17, 23, 54).unwrap();
        let formatted = format_timestamp(&dt);
        assert_eq!(formatted, "2016-12-15 17:23:54.000000");
        assert_eq!(parse_timestamp(&formatted), Some(dt));
    }

    #[test]
    fn test_timestamp_keeps_microseconds() {
        let dt = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
            + chrono::Duration::microseconds(123_456);
        let formatted = format_timestamp(&dt);
        assert_eq!(formatted, "2024-05-01 08:00:00.123456");
        assert_eq!(parse_timestamp(&formatted), Some(dt));
    }

    #[test]
    fn test_parse_millisecond_timestamp() {
        let dt = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
            + chrono::Duration::milliseconds(250);
        assert_eq!(parse_timestamp("2024-05-01 08:00:00.250"), Some(dt));
    }

    #[test]
    fn test_timestamps_sort_lexically() {
        let earlier = Utc.with_ymd_and_hms(2024, 1, 9, 23, 59, 59).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        assert!(format_timestamp(&earlier) < format_timestamp(&later));
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert!(parse_timestamp("invalid").is_none());
        assert!(parse_timestamp("2023-13-01 00:00:00.000").is_none());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Jane@Example.COM "), "jane@example.com");
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("j.doe+tag@mail.example.org"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("jane"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("jane@.com"));
        assert!(!is_valid_email("jane@example."));
        assert!(!is_valid_email("ja ne@example.com"));
        assert!(!is_valid_email("jane@ex@ample.com"));
    }
}
