use crate::engine::types::FieldValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Millisecond UTC timestamp of an ISO-8601 string; `None` is an invalid date.
///
/// Offsets are honoured; naive date-times and bare dates are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// Timestamp of a stored or filter value. Numbers are epoch milliseconds.
pub fn value_timestamp(value: &FieldValue) -> Option<i64> {
    match value {
        FieldValue::Str(s) | FieldValue::Date(s) => parse_timestamp(s),
        FieldValue::Number(n) if n.is_finite() => Some(n.trunc() as i64),
        _ => None,
    }
}

/// UTC calendar day of a timestamp.
pub fn calendar_day(millis: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.date_naive())
}
