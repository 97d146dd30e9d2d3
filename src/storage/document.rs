use super::Table;
use crate::core::Result;
use crate::json::sanitize_document;
use im::OrdMap;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Version tag every sanitized document carries.
pub const CURRENT_VERSION: &str = "1.0";

/// The whole database: a version tag and named tables.
///
/// Documents are values. Cloning is cheap (persistent maps and vectors), and
/// the `with_*`/`without_*` methods return a new document while the old one
/// stays valid, so a snapshot handed out earlier never observes later writes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    version: String,
    tables: OrdMap<String, Table>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            version: CURRENT_VERSION.to_string(),
            tables: OrdMap::new(),
        }
    }

    pub(crate) fn from_tables(tables: OrdMap<String, Table>) -> Self {
        Self {
            version: CURRENT_VERSION.to_string(),
            tables,
        }
    }

    /// Parse serialized bytes and sanitize the result.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let raw: JsonValue = serde_json::from_slice(bytes)?;
        Ok(sanitize_document(&raw))
    }

    pub fn to_vec(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn to_json(&self) -> Result<JsonValue> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn table_exists(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn table_names(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    pub fn tables(&self) -> impl Iterator<Item = (&String, &Table)> {
        self.tables.iter()
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// New document with `table` stored under `name`, replacing any table
    /// already there.
    pub fn with_table(mut self, name: impl Into<String>, table: Table) -> Self {
        self.tables.insert(name.into(), table);
        self
    }

    /// New document without `name`; unchanged if there was no such table.
    pub fn without_table(mut self, name: &str) -> Self {
        self.tables.remove(name);
        self
    }

    pub(crate) fn put_table(&mut self, name: impl Into<String>, table: Table) {
        self.tables.insert(name.into(), table);
    }

    pub(crate) fn remove_table(&mut self, name: &str) -> Option<Table> {
        self.tables.remove(name)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
