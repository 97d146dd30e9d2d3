use super::config::DatabaseConfig;
use crate::core::Result;
use crate::executor::{TableHandle, Tables};
use crate::json::sanitize_document;
use crate::storage::{CURRENT_VERSION, Document, DocumentStorage, LocationId};
use log::{Level, log, warn};
use serde_json::Value as JsonValue;
use tracing::{Instrument, info_span};

/// A JSON document database persisted through a [`DocumentStorage`].
///
/// The database owns the current document. Table operations borrow it
/// mutably and change only memory; `save`, `flush` and `set` write the whole
/// document back through the storage and reload what was written.
///
/// ```no_run
/// use jsontabledb::{ColumnSpec, DatabaseConfig, FileStorage, JsonDatabase, RowView};
///
/// # async fn run() -> jsontabledb::Result<()> {
/// let mut db = JsonDatabase::new(FileStorage::new("data"), DatabaseConfig::new("heroes"));
/// db.open().await?;
///
/// db.tables().add("heroes", &[
///     ColumnSpec::new("id", "number").auto_increment(),
///     ColumnSpec::new("name", "string"),
/// ]);
/// if let Some(mut heroes) = db.table("heroes") {
///     heroes.insert([("name", "Batman")]);
/// }
/// db.flush().await?;
/// # Ok(())
/// # }
/// ```
pub struct JsonDatabase<S: DocumentStorage> {
    storage: S,
    config: DatabaseConfig,
    document: Document,
    /// Document as last written or read, if any
    persisted: Option<Document>,
    location: Option<LocationId>,
    loaded: bool,
}

impl<S: DocumentStorage> JsonDatabase<S> {
    /// An unloaded database holding the empty document. Nothing touches
    /// storage until `open`, `load` or `save`.
    pub fn new(storage: S, config: DatabaseConfig) -> Self {
        Self {
            storage,
            config,
            document: Document::new(),
            persisted: None,
            location: None,
            loaded: false,
        }
    }

    /// Load the configured document, creating it first if it does not exist.
    pub async fn open(&mut self) -> Result<()> {
        let found = self
            .storage
            .document_exists(&self.config.database, &self.config.container)
            .await?;
        match found {
            Some(location) => self.load(&location).await,
            None => {
                log!(
                    self.log_level(),
                    "Creating '{}' in '{}'",
                    self.config.database,
                    self.config.container
                );
                self.save().await.map(|_| ())
            }
        }
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Snapshot of the current document. Later writes do not affect it.
    pub fn get(&self) -> Document {
        self.document.clone()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Replace the whole document with `raw`, sanitized, and save it.
    ///
    /// Returns `Ok(false)` and changes nothing when `raw.version` is not the
    /// current version.
    pub async fn set(&mut self, raw: &JsonValue) -> Result<bool> {
        let version = raw.get("version").and_then(JsonValue::as_str);
        if version != Some(CURRENT_VERSION) {
            warn!(
                "Rejected document with version {:?}, expected {}",
                version, CURRENT_VERSION
            );
            return Ok(false);
        }

        self.document = sanitize_document(raw);
        log!(self.log_level(), "Replaced document ({} tables)", self.document.table_count());
        self.save().await?;
        Ok(true)
    }

    /// Write the whole document, then reload it from where it was written.
    pub async fn save(&mut self) -> Result<LocationId> {
        let bytes = self.document.to_vec()?;
        let size = bytes.len();
        let span = info_span!(
            "save",
            database = %self.config.database,
            container = %self.config.container,
            bytes = size
        );
        let location = self
            .storage
            .write_document(&self.config.database, &self.config.container, bytes)
            .instrument(span)
            .await?;
        log!(self.log_level(), "Saved {} bytes to {}", size, location);

        self.load(&location).await?;
        Ok(location)
    }

    /// Read, parse and sanitize the document at `location` and make it
    /// current.
    pub async fn load(&mut self, location: &LocationId) -> Result<()> {
        let span = info_span!("load", location = %location);
        let bytes = self.storage.read_document(location).instrument(span).await?;
        let raw: JsonValue = serde_json::from_slice(&bytes)?;

        if let Some(version) = raw.get("version").and_then(JsonValue::as_str) {
            if version != CURRENT_VERSION {
                warn!("Loaded document version {} as {}", version, CURRENT_VERSION);
            }
        }

        let document = sanitize_document(&raw);
        log!(
            self.log_level(),
            "Loaded {} ({} tables)",
            location,
            document.table_count()
        );
        self.document = document.clone();
        self.persisted = Some(document);
        self.location = Some(location.clone());
        self.loaded = true;
        Ok(())
    }

    /// Save only if the document changed since it was last saved or loaded.
    /// Returns whether anything was written.
    pub async fn flush(&mut self) -> Result<bool> {
        if !self.is_dirty() {
            return Ok(false);
        }
        self.save().await?;
        Ok(true)
    }

    pub fn version(&self) -> &str {
        self.document.version()
    }

    pub fn tables(&mut self) -> Tables<'_> {
        Tables::new(&mut self.document)
    }

    /// Handle for the table named exactly `name`.
    pub fn table(&mut self, name: &str) -> Option<TableHandle<'_>> {
        TableHandle::open(&mut self.document, name)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_dirty(&self) -> bool {
        self.persisted.as_ref() != Some(&self.document)
    }

    /// Location of the last document written or read.
    pub fn location(&self) -> Option<&LocationId> {
        self.location.as_ref()
    }

    fn log_level(&self) -> Level {
        if self.config.debug {
            Level::Info
        } else {
            Level::Debug
        }
    }
}
