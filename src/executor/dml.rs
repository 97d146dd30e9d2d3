use super::query::Query;
use crate::core::{Column, RowView, Value};
use crate::json::ValueConverter;
use crate::storage::{Document, Table};
use log::debug;

/// Operations on one existing table of a document.
///
/// The handle borrows the document mutably for its whole life, so at most
/// one handle (or query built from it) can write at a time.
pub struct TableHandle<'a> {
    document: &'a mut Document,
    name: String,
}

impl<'a> TableHandle<'a> {
    /// Handle for the table stored under exactly `name`, or `None`.
    pub fn open(document: &'a mut Document, name: &str) -> Option<Self> {
        if !document.table_exists(name) {
            return None;
        }
        Some(Self {
            document,
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn table(&self) -> Option<&Table> {
        self.document.table(&self.name)
    }

    pub(crate) fn into_parts(self) -> (&'a mut Document, String) {
        (self.document, self.name)
    }

    /// The table's schema.
    pub fn columns(&self) -> Vec<Column> {
        self.table()
            .map(|t| t.columns().iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn row_count(&self) -> usize {
        self.table().map(Table::row_count).unwrap_or(0)
    }

    /// Insert one row.
    ///
    /// Every column starts at its default (or null), known keys of `row` are
    /// coerced onto it and unknown keys are ignored. Auto-increment columns
    /// are then overwritten with one more than the largest finite value
    /// currently in the column, starting at 1.
    pub fn insert(&mut self, row: impl Into<RowView>) -> bool {
        let row = row.into();
        let Some(table) = self.table() else {
            return false;
        };
        let mut table = table.clone();

        let mut view = RowView::new();
        for column in table.columns() {
            let value = column
                .default
                .as_ref()
                .map(|d| ValueConverter::coerce(column.column_type, d))
                .unwrap_or(Value::Null);
            view.insert(column.name.clone(), value);
        }

        for (key, value) in row.iter() {
            if let Some(column) = table.column(key) {
                view.insert(key, ValueConverter::coerce(column.column_type, value));
            }
        }

        for column in table.columns().iter().filter(|c| c.is_auto_increment()) {
            view.insert(column.name.clone(), next_auto_increment(&table, &column.name));
        }

        let encoded = table.encode(&view);
        table.push_row(encoded);
        debug!("Inserted row into '{}' ({} rows)", self.name, table.row_count());
        self.document.put_table(self.name.clone(), table);
        true
    }

    /// Rows for which `predicate` holds, in table order.
    pub fn find<F>(self, predicate: F) -> Query<'a>
    where
        F: Fn(&RowView) -> bool,
    {
        let matches: Vec<(usize, RowView)> = match self.table() {
            Some(table) => table
                .views()
                .enumerate()
                .filter(|(_, view)| predicate(view))
                .collect(),
            None => Vec::new(),
        };
        Query::new(self, matches)
    }

    /// Every row, in table order.
    pub fn all(self) -> Query<'a> {
        self.find(|_| true)
    }
}

fn next_auto_increment(table: &Table, column: &str) -> Value {
    let max = table
        .views()
        .filter_map(|view| view.get(column).map(Value::to_number))
        .filter(|n| n.is_finite())
        .fold(None, |max: Option<f64>, n| Some(max.map_or(n, |m| m.max(n))));
    Value::Number(max.unwrap_or(0.0) + 1.0)
}
