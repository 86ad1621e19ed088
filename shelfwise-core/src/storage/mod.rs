//! Storage abstraction layer
//!
//! Byte-blob backends live behind [`StorageProvider`]; the book collection is
//! written through a [`BookRepository`] on top of one of them.

mod repository;

pub use repository::{BookRepository, JsonRepository, BOOKS_KEY};

use crate::error::StorageError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Abstract key/blob storage
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Read data from the given path
    async fn read(&self, path: &str) -> StorageResult<Vec<u8>>;

    /// Replace the data at the given path
    async fn write(&self, path: &str, data: Vec<u8>) -> StorageResult<()>;
}

/// Local filesystem storage provider
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Create a new local storage provider with the given root directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Safely resolve a path, preventing path traversal attacks
    fn full_path(&self, path: &str) -> StorageResult<PathBuf> {
        use std::path::Component;

        // Normalize path components, rejecting any that escape the root
        let mut normalized = PathBuf::new();
        for component in Path::new(path).components() {
            match component {
                Component::Normal(c) => normalized.push(c),
                Component::CurDir => {} // Ignore "."
                Component::ParentDir | Component::Prefix(_) | Component::RootDir => {
                    return Err(StorageError::BackendError(
                        "Path traversal attempt detected".to_string(),
                    ));
                }
            }
        }

        Ok(self.root.join(normalized))
    }
}

fn map_io_error(path: &Path, err: std::io::Error) -> StorageError {
    let subject = format!("{}: {}", path.display(), err);
    match err.kind() {
        ErrorKind::NotFound => StorageError::NotFound(subject),
        ErrorKind::PermissionDenied => StorageError::PermissionDenied(subject),
        _ => StorageError::BackendError(subject),
    }
}

#[async_trait]
impl StorageProvider for LocalStorage {
    async fn read(&self, path: &str) -> StorageResult<Vec<u8>> {
        let full_path = self.full_path(path)?;
        tokio::fs::read(&full_path)
            .await
            .map_err(|e| map_io_error(&full_path, e))
    }

    /// Writes to a temp file then renames to avoid partial writes
    async fn write(&self, path: &str, data: Vec<u8>) -> StorageResult<()> {
        let full_path = self.full_path(path)?;
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| map_io_error(parent, e))?;
        }

        let mut temp_name = full_path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        tokio::fs::write(&temp_path, data)
            .await
            .map_err(|e| map_io_error(&temp_path, e))?;
        tokio::fs::rename(&temp_path, &full_path)
            .await
            .map_err(|e| map_io_error(&full_path, e))
    }
}

/// In-memory storage provider (tests, throwaway sessions)
#[derive(Default)]
pub struct MemoryStorage {
    data: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StorageError {
    StorageError::BackendError("memory storage lock poisoned".to_string())
}

#[async_trait]
impl StorageProvider for MemoryStorage {
    async fn read(&self, path: &str) -> StorageResult<Vec<u8>> {
        self.data
            .read()
            .map_err(|_| poisoned())?
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    async fn write(&self, path: &str, data: Vec<u8>) -> StorageResult<()> {
        self.data
            .write()
            .map_err(|_| poisoned())?
            .insert(path.to_string(), data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::new();

        assert!(matches!(
            storage.read("books.json").await,
            Err(StorageError::NotFound(_))
        ));

        storage.write("books.json", b"[]".to_vec()).await.unwrap();
        assert_eq!(storage.read("books.json").await.unwrap(), b"[]");

        storage.write("books.json", b"[1]".to_vec()).await.unwrap();
        assert_eq!(storage.read("books.json").await.unwrap(), b"[1]");
    }

    #[tokio::test]
    async fn test_local_storage_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("nested"));

        assert!(matches!(
            storage.read("books.json").await,
            Err(StorageError::NotFound(_))
        ));

        storage.write("books.json", b"hello".to_vec()).await.unwrap();
        assert_eq!(storage.read("books.json").await.unwrap(), b"hello");
        assert!(!temp_dir.path().join("nested/books.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_local_storage_rejects_traversal() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        let err = storage.write("../escape.json", Vec::new()).await.unwrap_err();
        assert!(matches!(err, StorageError::BackendError(_)));
    }
}
