//! Derived display values for snippet listings.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Fallback shown for a timestamp that cannot be parsed.
pub const UNKNOWN_TIME: &str = "Unknown";

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Renders an `updated_at` timestamp as a relative "x ago" phrase.
///
/// Accepts RFC 3339 timestamps as well as the bare
/// `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DD` forms, both read as UTC.
/// Anything else degrades to [`UNKNOWN_TIME`] rather than erroring; a
/// malformed stored timestamp is a display problem, not a failure.
#[must_use]
pub fn relative_update_time(updated_at: &str, now: DateTime<Utc>) -> String {
    let Some(instant) = parse_instant(updated_at) else {
        return UNKNOWN_TIME.to_string();
    };
    let seconds = now.signed_duration_since(instant).num_seconds();
    // A timestamp ahead of the clock reads as just-now.
    if seconds < MINUTE {
        return "less than a minute ago".to_string();
    }
    format!("{} ago", describe(seconds))
}

fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}

fn describe(seconds: i64) -> String {
    if seconds < 2 * MINUTE {
        "1 minute".to_string()
    } else if seconds < HOUR {
        format!("{} minutes", seconds / MINUTE)
    } else if seconds < 2 * HOUR {
        "about 1 hour".to_string()
    } else if seconds < DAY {
        format!("about {} hours", seconds / HOUR)
    } else if seconds < 2 * DAY {
        "1 day".to_string()
    } else if seconds < MONTH {
        format!("{} days", seconds / DAY)
    } else if seconds < 2 * MONTH {
        "about 1 month".to_string()
    } else if seconds < YEAR {
        format!("{} months", seconds / MONTH)
    } else if seconds < 2 * YEAR {
        "about 1 year".to_string()
    } else {
        format!("about {} years", seconds / YEAR)
    }
}
