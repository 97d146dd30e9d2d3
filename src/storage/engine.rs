use crate::core::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier a storage backend hands out for a stored document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Blob store the database persists its serialized document to.
///
/// Documents are addressed by `(name, container)` for writes and existence
/// checks, and by the returned [`LocationId`] for reads. Implementations own
/// authentication, retries and timeouts; the database only propagates their
/// errors.
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    /// Exact bytes last written at `location`.
    async fn read_document(&self, location: &LocationId) -> Result<Vec<u8>>;

    /// Create or overwrite `name` in `container`, returning its location.
    async fn write_document(&self, name: &str, container: &str, bytes: Vec<u8>)
    -> Result<LocationId>;

    /// Location of `name` in `container`, if it exists.
    async fn document_exists(&self, name: &str, container: &str) -> Result<Option<LocationId>>;
}
