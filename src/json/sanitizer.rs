//! Document Sanitizer
//!
//! Every document that becomes authoritative passes through here. The pass
//! stamps the current version, sanitizes each table's columns, drops tables
//! left without columns and coerces every row to its column types. Nothing
//! is rejected: malformed pieces are dropped and the rest survives.

use super::converter::ValueConverter;
use super::validator::sanitize_raw_columns;
use crate::core::{Column, Row, Value};
use crate::storage::{Document, Table};
use im::OrdMap;
use log::debug;
use serde_json::Value as JsonValue;

/// Sanitize a parsed document. Idempotent.
pub fn sanitize_document(raw: &JsonValue) -> Document {
    let mut tables = OrdMap::new();

    let raw_tables = raw.get("tables").and_then(JsonValue::as_object);
    for (name, raw_table) in raw_tables.into_iter().flatten() {
        let columns = sanitize_raw_columns(raw_table.get("columns").unwrap_or(&JsonValue::Null));
        if columns.is_empty() {
            debug!("dropping table '{}': no valid columns", name);
            continue;
        }

        let raw_data = raw_table.get("data").unwrap_or(&JsonValue::Null);
        let data = coerce_rows(&columns, raw_data);
        tables.insert(name.clone(), Table::with_data(columns, data));
    }

    Document::from_tables(tables)
}

/// Keep the array rows whose length matches the schema, coercing each
/// position to its column's type. Everything else is silently dropped.
pub fn coerce_rows(columns: &[Column], raw_data: &JsonValue) -> Vec<Row> {
    let Some(candidates) = raw_data.as_array() else {
        return Vec::new();
    };

    let rows: Vec<Row> = candidates
        .iter()
        .filter_map(JsonValue::as_array)
        .filter(|cells| cells.len() == columns.len())
        .map(|cells| {
            columns
                .iter()
                .zip(cells)
                .map(|(column, cell)| {
                    ValueConverter::coerce(column.column_type, &Value::from_json(cell))
                })
                .collect()
        })
        .collect();

    if rows.len() != candidates.len() {
        debug!(
            "dropped {} malformed row(s)",
            candidates.len() - rows.len()
        );
    }
    rows
}
