use crate::core::{RowView, Value};
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Rows returned by a read: each one a column-name → value view, in
/// selection order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Selection {
    rows: Vec<RowView>,
}

impl Selection {
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn new(rows: Vec<RowView>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[RowView] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<RowView> {
        self.rows
    }

    pub fn first(&self) -> Option<&RowView> {
        self.rows.first()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Page through the selection: skip `offset` rows, then keep at most
    /// `limit` of the rest (all of them when `None`).
    pub fn limit(&self, offset: usize, limit: Option<usize>) -> Selection {
        let rest = self.rows.iter().skip(offset);
        let rows = match limit {
            Some(limit) => rest.take(limit).cloned().collect(),
            None => rest.cloned().collect(),
        };
        Selection { rows }
    }

    pub fn to_json(&self) -> JsonValue {
        JsonValue::Array(self.rows.iter().map(RowView::to_json).collect())
    }

    /// Column names in first-seen order across all rows.
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for row in &self.rows {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.to_string());
                }
            }
        }
        columns
    }

    /// Render as an aligned text table.
    pub fn render(&self) -> String {
        let columns = self.columns();
        if columns.is_empty() {
            return "Empty result set\n".to_string();
        }

        let cell = |row: &RowView, column: &str| -> String {
            match row.get(column) {
                Some(Value::Null) | None => String::new(),
                Some(value) => value.to_string(),
            }
        };

        let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (i, column) in columns.iter().enumerate() {
                widths[i] = widths[i].max(cell(row, column).chars().count());
            }
        }

        let mut out = String::new();
        let header: Vec<String> = columns
            .iter()
            .enumerate()
            .map(|(i, col)| format!("{:width$}", col, width = widths[i]))
            .collect();
        out.push_str(header.join(" | ").trim_end());
        out.push('\n');

        let separator: String = widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-");
        out.push_str(&separator);
        out.push('\n');

        for row in &self.rows {
            let line: Vec<String> = columns
                .iter()
                .enumerate()
                .map(|(i, col)| format!("{:width$}", cell(row, col), width = widths[i]))
                .collect();
            out.push_str(line.join(" | ").trim_end());
            out.push('\n');
        }

        out.push_str(&format!("\n{} row(s)\n", self.rows.len()));
        out
    }

    pub fn print(&self) {
        print!("{}", self.render());
    }
}

impl From<Vec<RowView>> for Selection {
    fn from(rows: Vec<RowView>) -> Self {
        Self::new(rows)
    }
}

impl IntoIterator for Selection {
    type Item = RowView;
    type IntoIter = std::vec::IntoIter<RowView>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
