use super::dml::TableHandle;
use crate::core::ColumnSpec;
use crate::json::sanitize_columns;
use crate::storage::{Document, Table};
use log::{debug, trace};

/// Table lifecycle on a document: list and create.
pub struct Tables<'a> {
    document: &'a mut Document,
}

impl<'a> Tables<'a> {
    pub fn new(document: &'a mut Document) -> Self {
        Self { document }
    }

    /// Names of all tables, sorted.
    pub fn get(&self) -> Vec<String> {
        self.document.table_names()
    }

    /// Create `name` (trimmed) with the sanitized `columns` and no rows.
    ///
    /// Fails when the name is blank or no column survives sanitization. An
    /// existing table of the same name is replaced.
    pub fn add(&mut self, name: &str, columns: &[ColumnSpec]) -> bool {
        let name = name.trim();
        if name.is_empty() {
            trace!("Rejected table with blank name");
            return false;
        }

        let columns = sanitize_columns(columns);
        if columns.is_empty() {
            trace!("Rejected table '{}': no valid columns", name);
            return false;
        }

        if self.document.table_exists(name) {
            debug!("Replacing table '{}'", name);
        }
        debug!("Created table '{}' with {} column(s)", name, columns.len());
        self.document.put_table(name, Table::new(columns));
        true
    }
}

impl TableHandle<'_> {
    /// Drop the table stored under this handle's name, trimmed.
    pub fn delete(self) {
        let (document, name) = self.into_parts();
        let name = name.trim();
        if document.remove_table(name).is_some() {
            debug!("Dropped table '{}'", name);
        }
    }
}
