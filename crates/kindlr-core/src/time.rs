//! Timestamp formatting.

use chrono::{DateTime, Utc};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;

fn unit(n: u64, singular: &str) -> String {
    if n == 1 {
        format!("1 {singular} ago")
    } else {
        format!("{n} {singular}s ago")
    }
}

/// Relative time for timestamps less than a week before `now`, a short date
/// (`Mar 5, 2024`) otherwise.
///
/// Timestamps in the future are shown as `"now"`.
pub fn format_time_ago(timestamp: u64, now: u64) -> String {
    let Some(diff) = now.checked_sub(timestamp) else {
        return "now".to_string();
    };

    match diff {
        0 => "now".to_string(),
        d if d < MINUTE => unit(d, "second"),
        d if d < HOUR => unit(d / MINUTE, "minute"),
        d if d < DAY => unit(d / HOUR, "hour"),
        d if d < 2 * DAY => "yesterday".to_string(),
        d if d < WEEK => unit(d / DAY, "day"),
        _ => format_date(timestamp),
    }
}

fn to_datetime(timestamp: u64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(i64::try_from(timestamp).ok()?, 0)
}

/// Short calendar date, e.g. `Mar 5, 2024`.
pub fn format_date(timestamp: u64) -> String {
    to_datetime(timestamp)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

/// Full UTC date and time, e.g. `2024-03-05 14:07:00 UTC`.
pub fn format_datetime(timestamp: u64) -> String {
    to_datetime(timestamp)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
