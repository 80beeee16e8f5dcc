mod atomic;

pub use atomic::atomic_write;

use chrono::{DateTime, SecondsFormat, Utc};
use std::path::PathBuf;

/// The name of the per-user chukfi folder
pub const CHUKFI_FOLDER: &str = ".chukfi";

/// Get the path to the per-user chukfi folder (`~/.chukfi`)
#[must_use]
pub fn get_chukfi_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CHUKFI_FOLDER)
}

/// Get current timestamp in ISO 8601 format, millisecond precision with a `Z` suffix
#[must_use]
pub fn now_iso() -> String {
    format_iso(Utc::now())
}

/// Format a timestamp the way the dashboard writes `createdAt`/`deletedAt`.
#[must_use]
pub fn format_iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an ISO 8601 / RFC 3339 timestamp; `None` when unparseable.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_now_iso_format() {
        let timestamp = now_iso();

        assert!(timestamp.ends_with('Z'), "Should use the Z suffix");
        assert!(timestamp.contains('T'), "Should contain the date/time separator");
        assert!(parse_timestamp(&timestamp).is_some(), "Should be parseable");
    }

    #[test]
    fn test_format_iso_matches_dashboard_shape() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_iso(at), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_parse_timestamp_accepts_offsets() {
        let parsed = parse_timestamp("2024-01-01T02:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_chukfi_home_ends_with_folder() {
        assert!(get_chukfi_home().ends_with(CHUKFI_FOLDER));
    }
}
