use super::codec;
use crate::core::{Column, Row, RowView};
use im::Vector;
use serde::Serialize;

/// A table: its sanitized schema and positional rows.
///
/// Both sequences are persistent vectors, so cloning a table (and therefore
/// a whole document) shares structure with the original; writes copy only
/// the touched chunks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    columns: Vector<Column>,
    data: Vector<Row>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns: columns.into(),
            data: Vector::new(),
        }
    }

    /// Caller guarantees every row already matches `columns` in length.
    pub(crate) fn with_data(columns: Vec<Column>, data: Vec<Row>) -> Self {
        Self {
            columns: columns.into(),
            data: data.into(),
        }
    }

    pub fn columns(&self) -> &Vector<Column> {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Column declaration for `name`. With repeated names the last
    /// declaration wins, matching the value a row view exposes.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().rev().find(|c| c.name == name)
    }

    pub fn data(&self) -> &Vector<Row> {
        &self.data
    }

    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    pub fn view(&self, row: &Row) -> RowView {
        codec::to_view(row, &self.columns)
    }

    pub fn views(&self) -> impl Iterator<Item = RowView> + '_ {
        self.data.iter().map(|row| self.view(row))
    }

    pub fn encode(&self, view: &RowView) -> Row {
        codec::to_storage(view, &self.columns)
    }

    pub(crate) fn push_row(&mut self, row: Row) {
        self.data.push_back(row);
    }

    pub(crate) fn set_row(&mut self, index: usize, row: Row) {
        self.data.set(index, row);
    }

    pub(crate) fn replace_data(&mut self, data: Vector<Row>) {
        self.data = data;
    }
}
