//! Timestamp parsing for date columns.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::input::Value;

/// A chrono layout guarded by the text shape it may be applied to.
///
/// chrono's `%Y` also accepts short years, so every four-digit-year
/// layout is gated on a shape that pins the year width.
struct Layout {
    shape: Regex,
    format: &'static str,
    has_time: bool,
}

fn layout(shape: &str, format: &'static str, has_time: bool) -> Layout {
    Layout {
        shape: Regex::new(shape).unwrap(),
        format,
        has_time,
    }
}

// Tried in order; date-only layouts assume midnight.
static LAYOUTS: Lazy<Vec<Layout>> = Lazy::new(|| {
    vec![
        layout(r"^\d{4}-\d{1,2}-\d{1,2} \d{1,2}:\d{2}:\d{2}$", "%Y-%m-%d %H:%M:%S", true),
        layout(r"^\d{4}-\d{1,2}-\d{1,2} \d{1,2}:\d{2}:\d{2}\.\d+$", "%Y-%m-%d %H:%M:%S%.f", true),
        layout(r"^\d{4}-\d{1,2}-\d{1,2}T\d{1,2}:\d{2}:\d{2}$", "%Y-%m-%dT%H:%M:%S", true),
        layout(r"^\d{4}-\d{1,2}-\d{1,2}T\d{1,2}:\d{2}:\d{2}\.\d+$", "%Y-%m-%dT%H:%M:%S%.f", true),
        layout(r"^\d{4}-\d{1,2}-\d{1,2} \d{1,2}:\d{2}$", "%Y-%m-%d %H:%M", true),
        layout(r"^\d{4}-\d{1,2}-\d{1,2}T\d{1,2}:\d{2}$", "%Y-%m-%dT%H:%M", true),
        layout(r"^\d{4}/\d{1,2}/\d{1,2} \d{1,2}:\d{2}:\d{2}$", "%Y/%m/%d %H:%M:%S", true),
        layout(r"^\d{1,2}/\d{1,2}/\d{4} \d{1,2}:\d{2}:\d{2}$", "%m/%d/%Y %H:%M:%S", true),
        layout(r"^\d{1,2}/\d{1,2}/\d{4} \d{1,2}:\d{2}$", "%m/%d/%Y %H:%M", true),
        layout(r"^\d{1,2}/\d{1,2}/\d{2} \d{1,2}:\d{2}:\d{2}$", "%m/%d/%y %H:%M:%S", true),
        layout(r"^\d{1,2}/\d{1,2}/\d{2} \d{1,2}:\d{2}$", "%m/%d/%y %H:%M", true),
        layout(r"^\d{4}-\d{1,2}-\d{1,2}$", "%Y-%m-%d", false),
        layout(r"^\d{4}/\d{1,2}/\d{1,2}$", "%Y/%m/%d", false),
        layout(r"^\d{1,2}/\d{1,2}/\d{4}$", "%m/%d/%Y", false),
        layout(r"^\d{1,2}/\d{1,2}/\d{2}$", "%m/%d/%y", false),
        layout(r"^\d{1,2}\.\d{1,2}\.\d{4}$", "%d.%m.%Y", false),
        layout(r"^\d{8}$", "%Y%m%d", false),
        layout(r"^[A-Za-z]+ \d{1,2}, \d{4}$", "%B %d, %Y", false),
        layout(r"^[A-Za-z]+ \d{1,2}, \d{4}$", "%b %d, %Y", false),
        layout(r"^\d{1,2} [A-Za-z]+ \d{4}$", "%d %B %Y", false),
        layout(r"^\d{1,2} [A-Za-z]+ \d{4}$", "%d %b %Y", false),
    ]
});

/// A value in a date column that is not a recognizable timestamp.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("row {row}: '{value}' is not a date")]
pub struct UnparseableDate {
    pub row: usize,
    pub value: String,
}

/// Parse a text cell as a timestamp.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    LAYOUTS
        .iter()
        .filter(|l| l.shape.is_match(trimmed))
        .find_map(|l| {
            if l.has_time {
                NaiveDateTime::parse_from_str(trimmed, l.format).ok()
            } else {
                NaiveDate::parse_from_str(trimmed, l.format)
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            }
        })
}

/// Convert one cell to [`Value::Timestamp`] or [`Value::Missing`].
///
/// Already-parsed timestamps pass through unchanged. Integral numbers are
/// read as `YYYYMMDD`.
pub fn to_timestamp(value: &Value) -> Option<Value> {
    match value {
        Value::Missing => Some(Value::Missing),
        Value::Timestamp(ts) => Some(Value::Timestamp(*ts)),
        Value::Text(s) if s.trim().is_empty() => Some(Value::Missing),
        Value::Text(s) => parse_timestamp(s).map(Value::Timestamp),
        Value::Number(n) if n.fract() == 0.0 && (1e7..1e8).contains(n) => {
            NaiveDate::parse_from_str(&format!("{}", *n as u64), "%Y%m%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(Value::Timestamp)
        }
        Value::Number(_) => None,
    }
}

/// Convert a whole column, failing on the first unparseable cell.
pub fn parse_column<'a>(
    values: impl Iterator<Item = &'a Value>,
) -> Result<Vec<Value>, UnparseableDate> {
    values
        .enumerate()
        .map(|(row, value)| {
            to_timestamp(value).ok_or_else(|| UnparseableDate {
                row,
                value: describe(value),
            })
        })
        .collect()
}

fn describe(value: &Value) -> String {
    match value {
        Value::Text(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Timestamp(ts) => ts.to_string(),
        Value::Missing => String::new(),
    }
}
