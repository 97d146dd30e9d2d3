//! Row Codec
//!
//! Rows are stored positionally and exposed as keyed views. Both directions
//! are driven by column order, never by the key order of a view, so a view
//! built by hand in any order encodes to the same row.

use crate::core::{Column, Row, RowView, Value};
use im::Vector;

/// Zip a stored row with its column names.
///
/// When a schema repeats a name the later column's value wins, keeping the
/// key at the position of its first occurrence.
pub fn to_view(row: &Row, columns: &Vector<Column>) -> RowView {
    columns
        .iter()
        .zip(row.iter())
        .map(|(column, value)| (column.name.clone(), value.clone()))
        .collect()
}

/// Lay a view out in column order. Names missing from the view store null.
pub fn to_storage(view: &RowView, columns: &Vector<Column>) -> Row {
    columns
        .iter()
        .map(|column| view.get(&column.name).cloned().unwrap_or(Value::Null))
        .collect()
}
