//! Date parsing and display helpers.
//!
//! Odoo sends dates as `YYYY-MM-DD` and datetimes as `YYYY-MM-DD HH:MM:SS`
//! (UTC, no offset). RFC 3339 strings are accepted as well.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Placeholder shown for missing or unparseable dates.
pub const NOT_AVAILABLE: &str = "N/A";

/// Parses the date formats the server is known to send.
pub fn parse(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Formats as `DD/MM/YYYY`, or [`NOT_AVAILABLE`].
pub fn format_date(input: &str) -> String {
    parse(input).map_or_else(
        || NOT_AVAILABLE.to_string(),
        |dt| dt.format("%d/%m/%Y").to_string(),
    )
}

/// Formats as `DD/MM/YYYY HH:mm`, or [`NOT_AVAILABLE`].
pub fn format_date_time(input: &str) -> String {
    parse(input).map_or_else(
        || NOT_AVAILABLE.to_string(),
        |dt| dt.format("%d/%m/%Y %H:%M").to_string(),
    )
}

/// Returns true if both timestamps fall on the same calendar day.
pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// Whole days between two timestamps, rounded up, ignoring order.
pub fn days_between(a: NaiveDateTime, b: NaiveDateTime) -> i64 {
    let seconds = (b - a).num_seconds().abs();
    (seconds + 86_399) / 86_400
}

/// Describes `then` relative to `now`, e.g. "3 hours ago".
///
/// Falls back to `DD/MM/YYYY` after a week.
pub fn relative_time(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let seconds = (now - then).num_seconds();
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if seconds < 60 {
        "just now".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days < 7 {
        plural(days, "day")
    } else {
        then.format("%d/%m/%Y").to_string()
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}
