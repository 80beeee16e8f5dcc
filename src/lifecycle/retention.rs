//! Trash retention window.
use crate::utils::parse_timestamp;
use chrono::{DateTime, Duration, Utc};

/// Days a record stays in the trash before it counts as expired.
pub const DEFAULT_RETENTION_DAYS: u32 = 30;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Whole days (rounded up) until a record deleted at `deleted_at` expires.
///
/// Zero or negative once expired; `None` if the timestamp is unparseable.
#[must_use]
pub fn days_remaining(deleted_at: &str, now: DateTime<Utc>, retention_days: u32) -> Option<i64> {
    let deleted = parse_timestamp(deleted_at)?;
    let expiry = deleted.checked_add_signed(Duration::days(i64::from(retention_days)))?;
    let left = expiry.signed_duration_since(now).num_milliseconds();
    // ceil(left / day), valid for negative values too
    left.checked_neg()?
        .div_euclid(MILLIS_PER_DAY)
        .checked_neg()
}

/// Whether a record deleted at `deleted_at` is past the retention window.
///
/// Unparseable timestamps never expire.
#[must_use]
pub fn is_expired(deleted_at: &str, now: DateTime<Utc>, retention_days: u32) -> bool {
    let Some(deleted) = parse_timestamp(deleted_at) else {
        return false;
    };
    deleted
        .checked_add_signed(Duration::days(i64::from(retention_days)))
        .is_some_and(|expiry| expiry <= now)
}
