//! Time related utils.

use chrono::Utc;

/// DateTime is the UTC instant type used for token expiry.
pub type DateTime = chrono::DateTime<Utc>;

/// Get the current wall-clock time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Get the instant `secs` seconds from now, saturating on overflow.
pub fn now_plus_secs(secs: u64) -> DateTime {
    i64::try_from(secs)
        .ok()
        .and_then(chrono::TimeDelta::try_seconds)
        .and_then(|delta| now().checked_add_signed(delta))
        .unwrap_or(DateTime::MAX_UTC)
}
