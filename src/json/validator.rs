//! Schema Sanitizer
//!
//! Turns loosely-shaped column declarations into sanitized [`Column`]s.
//! Declarations without a usable name or type are dropped; everything else
//! is normalized rather than rejected.

use super::converter::ValueConverter;
use crate::core::{Column, ColumnSpec, ColumnType};
use log::trace;
use serde_json::Value as JsonValue;

/// Sanitize typed column declarations, preserving input order.
///
/// Duplicate names are kept; see [`crate::storage::Table::column`] for how
/// lookups resolve them.
pub fn sanitize_columns(specs: &[ColumnSpec]) -> Vec<Column> {
    specs.iter().filter_map(sanitize_column).collect()
}

/// Sanitize a raw JSON column list. Non-arrays yield no columns and items
/// that are not column-shaped objects are dropped.
pub fn sanitize_raw_columns(raw: &JsonValue) -> Vec<Column> {
    let Some(items) = raw.as_array() else {
        return Vec::new();
    };
    let specs: Vec<ColumnSpec> = items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(spec) => Some(spec),
            Err(err) => {
                trace!("dropping malformed column declaration {}: {}", item, err);
                None
            }
        })
        .collect();
    sanitize_columns(&specs)
}

fn sanitize_column(spec: &ColumnSpec) -> Option<Column> {
    let name = spec.name.as_deref()?.trim();
    let raw_type = spec.column_type.as_deref()?;
    if name.is_empty() || raw_type.is_empty() {
        return None;
    }

    let column_type = ColumnType::parse_lenient(raw_type);
    let ai = (column_type == ColumnType::Number)
        .then(|| matches!(spec.ai, Some(JsonValue::Bool(true))));
    let default = spec
        .default
        .as_ref()
        .filter(|value| !value.is_null())
        .map(|value| ValueConverter::coerce(column_type, value));

    Some(Column {
        name: name.to_string(),
        column_type,
        ai,
        default,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;
    use serde_json::json;

    #[test]
    fn test_drops_columns_without_name_or_type() {
        let columns = sanitize_raw_columns(&json!([
            {"name": "id", "type": "number"},
            {"name": "missing_type"},
            {"type": "string"},
            {"name": "", "type": "string"},
            {"name": "   ", "type": "string"},
            {"name": 5, "type": "string"},
            "not an object"
        ]));
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].name, "id");
    }

    #[test]
    fn test_normalizes_name_and_type() {
        let columns = sanitize_raw_columns(&json!([
            {"name": "  title ", "type": " STRING "},
            {"name": "tags", "type": "Array"},
            {"name": "weird", "type": "uuid"}
        ]));
        assert_eq!(columns[0].name, "title");
        assert_eq!(columns[0].column_type, ColumnType::String);
        assert_eq!(columns[1].column_type, ColumnType::Array);
        assert_eq!(columns[2].column_type, ColumnType::String);
    }

    #[test]
    fn test_ai_only_on_number_columns() {
        let columns = sanitize_raw_columns(&json!([
            {"name": "id", "type": "number", "ai": true},
            {"name": "count", "type": "number", "ai": "true"},
            {"name": "plain", "type": "number"},
            {"name": "label", "type": "string", "ai": true}
        ]));
        assert_eq!(columns[0].ai, Some(true));
        assert_eq!(columns[1].ai, Some(false));
        assert_eq!(columns[2].ai, Some(false));
        assert_eq!(columns[3].ai, None);
    }

    #[test]
    fn test_default_is_coerced_to_column_type() {
        let columns = sanitize_columns(&[
            ColumnSpec::new("n", "number").default_value("7"),
            ColumnSpec::new("flag", "boolean").default_value("TRUE"),
            ColumnSpec::new("s", "string"),
        ]);
        assert_eq!(columns[0].default, Some(Value::Number(7.0)));
        assert_eq!(columns[1].default, Some(Value::Boolean(true)));
        assert_eq!(columns[2].default, None);
    }

    #[test]
    fn test_duplicate_names_are_preserved() {
        let columns = sanitize_raw_columns(&json!([
            {"name": "a", "type": "string"},
            {"name": "a", "type": "number"}
        ]));
        assert_eq!(columns.len(), 2);
    }

    #[test]
    fn test_non_array_input_yields_nothing() {
        assert!(sanitize_raw_columns(&json!({"name": "a"})).is_empty());
        assert!(sanitize_raw_columns(&json!(null)).is_empty());
    }
}
