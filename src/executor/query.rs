use super::dml::TableHandle;
use super::sort::{SortExecutor, SortKey};
use crate::core::RowView;
use crate::result::Selection;
use crate::storage::{Document, Table};
use log::trace;

/// Rows matched by [`TableHandle::find`].
///
/// Matches are fixed when the query is built. `delete` and `update` act on
/// exactly those rows, identified by their position in the table at that
/// moment; the mutable borrow of the document guarantees the positions are
/// still valid.
pub struct Query<'a> {
    pub(super) document: &'a mut Document,
    pub(super) table_name: String,
    pub(super) matches: Vec<(usize, RowView)>,
}

impl<'a> Query<'a> {
    pub(super) fn new(handle: TableHandle<'a>, matches: Vec<(usize, RowView)>) -> Self {
        let (document, table_name) = handle.into_parts();
        trace!("Query on '{}' matched {} row(s)", table_name, matches.len());
        Self {
            document,
            table_name,
            matches,
        }
    }

    pub fn count(&self) -> usize {
        self.matches.len()
    }

    pub(super) fn table(&self) -> Option<&Table> {
        self.document.table(&self.table_name)
    }

    fn rows(&self) -> Vec<RowView> {
        self.matches.iter().map(|(_, view)| view.clone()).collect()
    }

    /// Matched rows, optionally projected to `keys`.
    pub fn get(&self, keys: Option<&[&str]>) -> Selection {
        match self.table() {
            Some(table) => project(self.rows(), keys, table),
            None => Selection::empty(),
        }
    }

    /// The first matched row, if any.
    pub fn first(&self, keys: Option<&[&str]>) -> Selection {
        let mut selection = self.get(keys).into_rows();
        selection.truncate(1);
        Selection::new(selection)
    }

    /// Sort the matched rows by `(column, "asc" | "desc")` pairs.
    pub fn order_by<K, D>(&self, orders: impl IntoIterator<Item = (K, D)>) -> OrderedQuery
    where
        K: AsRef<str>,
        D: AsRef<str>,
    {
        let Some(table) = self.table() else {
            return OrderedQuery {
                rows: Vec::new(),
                table: None,
            };
        };
        let sort_keys = SortKey::resolve(orders, table);
        let mut rows = self.rows();
        SortExecutor::sort(&mut rows, &sort_keys);
        OrderedQuery {
            rows,
            table: Some(table.clone()),
        }
    }
}

/// Matched rows in a requested order. Read-only.
pub struct OrderedQuery {
    rows: Vec<RowView>,
    table: Option<Table>,
}

impl OrderedQuery {
    pub fn get(&self, keys: Option<&[&str]>) -> Selection {
        match &self.table {
            Some(table) => project(self.rows.clone(), keys, table),
            None => Selection::empty(),
        }
    }

    pub fn first(&self, keys: Option<&[&str]>) -> Selection {
        let mut rows = self.get(keys).into_rows();
        rows.truncate(1);
        Selection::new(rows)
    }
}

/// Keep only the requested keys that the schema declares, in the order they
/// were requested. Rows left with no keys are dropped. Without `keys`, rows
/// come back whole.
fn project(rows: Vec<RowView>, keys: Option<&[&str]>, table: &Table) -> Selection {
    let Some(keys) = keys else {
        return Selection::new(rows);
    };
    let wanted: Vec<&str> = keys.iter().copied().filter(|k| table.has_column(k)).collect();

    let rows = rows
        .into_iter()
        .map(|row| {
            wanted
                .iter()
                .filter_map(|key| row.get(key).map(|value| (*key, value.clone())))
                .collect::<RowView>()
        })
        .filter(|row| !row.is_empty())
        .collect();
    Selection::new(rows)
}
