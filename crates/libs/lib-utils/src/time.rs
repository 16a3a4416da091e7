//! # Time Utilities
//!
//! Deadline arithmetic using chrono.

use chrono::{DateTime, Duration, Utc};

pub const SECONDS_PER_MINUTE: u64 = 60;

/// Get current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Format time as RFC3339 string.
pub fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339()
}

/// Convert whole minutes to seconds, `None` on overflow.
pub fn minutes_to_seconds(minutes: u64) -> Option<u64> {
    minutes.checked_mul(SECONDS_PER_MINUTE)
}

/// Absolute expiry of a deadline that is `seconds` from `now`.
pub fn deadline_from(now: DateTime<Utc>, seconds: u64) -> Result<DateTime<Utc>, Error> {
    let secs = i64::try_from(seconds).map_err(|_| Error::DeadlineOutOfRange(seconds))?;
    let offset = Duration::try_seconds(secs).ok_or(Error::DeadlineOutOfRange(seconds))?;
    now.checked_add_signed(offset)
        .ok_or(Error::DeadlineOutOfRange(seconds))
}

// region:    --- Error
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("deadline of {0}s is out of range")]
    DeadlineOutOfRange(u64),
}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_minutes_to_seconds() {
        assert_eq!(minutes_to_seconds(15), Some(900));
        assert_eq!(minutes_to_seconds(0), Some(0));
        assert_eq!(minutes_to_seconds(u64::MAX), None);
    }

    #[test]
    fn test_deadline_from() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let expiry = deadline_from(now, 1200).unwrap();
        assert_eq!(format_time(expiry), "2024-01-01T12:20:00+00:00");
        assert_eq!(expiry.timestamp() - now.timestamp(), 1200);
    }

    #[test]
    fn test_deadline_from_out_of_range() {
        let now = now_utc();
        assert_eq!(
            deadline_from(now, u64::MAX),
            Err(Error::DeadlineOutOfRange(u64::MAX))
        );
    }
}
