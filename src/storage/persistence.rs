//! Local-directory document storage.
//!
//! Containers are sub-directories of a root and documents are files inside
//! them. Writes go to a temporary file in the target directory which is
//! synced and then renamed over the destination, so readers only ever see a
//! complete document.

use super::engine::{DocumentStorage, LocationId};
use crate::core::{DbError, Result};
use async_trait::async_trait;
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `container/name`, after checking both are single plain path segments.
    fn location_for(name: &str, container: &str) -> Result<LocationId> {
        for segment in [name, container] {
            if !is_plain_segment(segment) {
                return Err(DbError::StorageError(format!(
                    "Invalid document path segment '{}'",
                    segment
                )));
            }
        }
        Ok(LocationId::new(format!("{}/{}", container, name)))
    }

    fn path_for(&self, location: &LocationId) -> Result<PathBuf> {
        let relative = Path::new(location.as_str());
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(DbError::StorageError(format!(
                "Invalid location '{}'",
                location
            )));
        }
        Ok(self.root.join(relative))
    }
}

fn is_plain_segment(segment: &str) -> bool {
    let mut components = Path::new(segment).components();
    !segment.is_empty()
        && matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none()
}

fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| std::io::Error::new(ErrorKind::InvalidInput, "document path has no parent"))?;
    std::fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.flush()?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl DocumentStorage for FileStorage {
    async fn read_document(&self, location: &LocationId) -> Result<Vec<u8>> {
        let path = self.path_for(location)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(DbError::DocumentNotFound(location.to_string()))
            }
            Err(e) => Err(DbError::IoError(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn write_document(
        &self,
        name: &str,
        container: &str,
        bytes: Vec<u8>,
    ) -> Result<LocationId> {
        let location = Self::location_for(name, container)?;
        let path = self.path_for(&location)?;

        tokio::task::spawn_blocking(move || write_atomically(&path, &bytes))
            .await
            .map_err(|e| DbError::StorageError(format!("Write task failed: {}", e)))?
            .map_err(|e| DbError::IoError(format!("Failed to write document: {}", e)))?;

        Ok(location)
    }

    async fn document_exists(&self, name: &str, container: &str) -> Result<Option<LocationId>> {
        let location = Self::location_for(name, container)?;
        let path = self.path_for(&location)?;
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(Some(location)),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_container_and_reads_back() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        let location = storage
            .write_document("db.json", "app", b"{\"a\":1}".to_vec())
            .await
            .unwrap();
        assert_eq!(location.as_str(), "app/db.json");
        assert!(temp_dir.path().join("app").join("db.json").is_file());
        assert_eq!(storage.read_document(&location).await.unwrap(), b"{\"a\":1}");
    }

    #[tokio::test]
    async fn test_overwrite_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.write_document("db.json", "app", b"1".to_vec()).await.unwrap();
        storage.write_document("db.json", "app", b"2".to_vec()).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(temp_dir.path().join("app"))
            .unwrap()
            .collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_exists() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        assert_eq!(storage.document_exists("db.json", "app").await.unwrap(), None);
        storage.write_document("db.json", "app", b"{}".to_vec()).await.unwrap();
        assert_eq!(
            storage.document_exists("db.json", "app").await.unwrap(),
            Some(LocationId::new("app/db.json"))
        );
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        assert!(storage.write_document("../x.json", "app", vec![]).await.is_err());
        assert!(storage.write_document("x.json", "a/b", vec![]).await.is_err());
        assert!(storage.read_document(&LocationId::new("../etc/passwd")).await.is_err());
    }

    #[tokio::test]
    async fn test_read_missing_document() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        let err = storage
            .read_document(&LocationId::new("app/none.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::DocumentNotFound(_)));
    }
}
