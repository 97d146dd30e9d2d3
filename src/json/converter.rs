//! Value Coercion
//!
//! Converts arbitrary cell values to a declared column type. Coercion is
//! total: every (type, value) pair maps to a value, and input that has no
//! sensible reading still produces one (`NaN`, the invalid-date sentinel,
//! an empty array) rather than an error.

use crate::core::{ColumnType, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Converts values to column types
pub struct ValueConverter;

impl ValueConverter {
    /// Coerce `value` to `column_type`.
    pub fn coerce(column_type: ColumnType, value: &Value) -> Value {
        match column_type {
            ColumnType::String => Value::Text(Self::stringify(value)),
            // null persists NaN, so it reads back as NaN rather than 0
            ColumnType::Number => match value {
                Value::Null => Value::Number(f64::NAN),
                other => Value::Number(other.to_number()),
            },
            ColumnType::Boolean => {
                Value::Boolean(value.to_string().trim().to_lowercase() == "true")
            }
            ColumnType::Array => Value::Array(Self::to_elements(value)),
            ColumnType::Date => match value {
                Value::Date(dt) => Value::Date(*dt),
                other => Value::Date(parse_date(&other.to_string())),
            },
        }
    }

    /// String form stored in `string` columns.
    ///
    /// Differs from `Display` in three places: null is empty, negative zero
    /// keeps its sign, and null array elements print as `null`.
    fn stringify(value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::Number(n) if *n == 0.0 && n.is_sign_negative() => "-0".to_string(),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Null => "null".to_string(),
                    other => Self::stringify(other),
                })
                .collect::<Vec<_>>()
                .join(","),
            other => other.to_string(),
        }
    }

    fn to_elements(value: &Value) -> Vec<Value> {
        match value {
            Value::Array(items) => items.clone(),
            Value::Text(s) => s.chars().map(|c| Value::Text(c.to_string())).collect(),
            Value::Object(map) => map.values().cloned().collect(),
            Value::Null | Value::Boolean(_) | Value::Number(_) | Value::Date(_) => Vec::new(),
        }
    }
}

/// Calendar date/time parsing. Zone-less forms are read as UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
