use super::engine::{DocumentStorage, LocationId};
use crate::core::{DbError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct StoredDocument {
    container: String,
    name: String,
    bytes: Vec<u8>,
}

/// Process-local blob store.
///
/// New documents get a random UUID location; rewriting the same name in the
/// same container keeps its location, like an upload that patches an
/// existing file.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<LocationId, StoredDocument>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document directly, bypassing any database.
    pub async fn put(&self, name: &str, container: &str, bytes: Vec<u8>) -> LocationId {
        let mut documents = self.documents.write().await;
        let location = Self::find(&documents, name, container)
            .unwrap_or_else(|| LocationId::new(Uuid::new_v4().to_string()));
        documents.insert(
            location.clone(),
            StoredDocument {
                container: container.to_string(),
                name: name.to_string(),
                bytes,
            },
        );
        location
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    fn find(
        documents: &HashMap<LocationId, StoredDocument>,
        name: &str,
        container: &str,
    ) -> Option<LocationId> {
        documents
            .iter()
            .find(|(_, doc)| doc.name == name && doc.container == container)
            .map(|(location, _)| location.clone())
    }
}

#[async_trait]
impl DocumentStorage for MemoryStorage {
    async fn read_document(&self, location: &LocationId) -> Result<Vec<u8>> {
        self.documents
            .read()
            .await
            .get(location)
            .map(|doc| doc.bytes.clone())
            .ok_or_else(|| DbError::DocumentNotFound(location.to_string()))
    }

    async fn write_document(
        &self,
        name: &str,
        container: &str,
        bytes: Vec<u8>,
    ) -> Result<LocationId> {
        Ok(self.put(name, container, bytes).await)
    }

    async fn document_exists(&self, name: &str, container: &str) -> Result<Option<LocationId>> {
        let documents = self.documents.read().await;
        Ok(Self::find(&documents, name, container))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_then_read() {
        let storage = MemoryStorage::new();
        let location = storage
            .write_document("db.json", "root", b"{}".to_vec())
            .await
            .unwrap();
        assert_eq!(storage.read_document(&location).await.unwrap(), b"{}");
    }

    #[tokio::test]
    async fn test_rewrite_keeps_location() {
        let storage = MemoryStorage::new();
        let first = storage.write_document("db.json", "root", b"1".to_vec()).await.unwrap();
        let second = storage.write_document("db.json", "root", b"2".to_vec()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(storage.len().await, 1);
        assert_eq!(storage.read_document(&first).await.unwrap(), b"2");
    }

    #[tokio::test]
    async fn test_exists_is_scoped_by_container() {
        let storage = MemoryStorage::new();
        storage.write_document("db.json", "a", b"{}".to_vec()).await.unwrap();
        assert!(storage.document_exists("db.json", "a").await.unwrap().is_some());
        assert!(storage.document_exists("db.json", "b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_read_unknown_location_fails() {
        let storage = MemoryStorage::new();
        let err = storage
            .read_document(&LocationId::new("nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::DocumentNotFound(_)));
    }
}
