//! Civil-timestamp utilities.
//!
//! Every timestamp in the store is the fixed format `YYYY-MM-DD HH:MM:SS`
//! interpreted in IST (+05:30) — never epoch seconds, never ISO with an
//! offset. Parsing is a plain result: a malformed string is an expected
//! value the caller decides a fallback for, not an exception.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

pub const CIVIL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const IST_SECONDS: i32 = 5 * 3600 + 30 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid civil timestamp {input:?}: {reason}")]
pub struct TimestampError {
    pub input: String,
    pub reason: String,
}

/// The one fixed timezone of the system. +05:30 is always in range.
pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_SECONDS).unwrap()
}

/// Current wall-clock time in IST.
pub fn now_ist() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&ist())
}

/// Parse a `YYYY-MM-DD HH:MM:SS` string as an IST instant.
pub fn parse_civil(s: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    let naive = NaiveDateTime::parse_from_str(s, CIVIL_FORMAT).map_err(|e| TimestampError {
        input: s.to_string(),
        reason: e.to_string(),
    })?;
    // A fixed offset maps every local time to exactly one instant.
    ist()
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| TimestampError {
            input: s.to_string(),
            reason: "ambiguous local time".to_string(),
        })
}

/// Format an IST instant back to `YYYY-MM-DD HH:MM:SS`.
/// Exact inverse of [`parse_civil`] on valid input.
pub fn format_civil(dt: DateTime<FixedOffset>) -> String {
    dt.format(CIVIL_FORMAT).to_string()
}

/// Default window anchor for a slot whose timestamps failed to parse:
/// 09:00:00 on `now`'s calendar day.
pub fn fallback_window_start(now: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    ist()
        .with_ymd_and_hms(now.year(), now.month(), now.day(), 9, 0, 0)
        .single()
        .unwrap_or(now)
}
