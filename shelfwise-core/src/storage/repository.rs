//! Whole-collection persistence for the book list

use super::{LocalStorage, StorageProvider, StorageResult};
use crate::error::StorageError;
use crate::types::Book;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// Key of the blob holding the serialized collection
pub const BOOKS_KEY: &str = "shelfwise_books.json";

/// Loads and saves the entire book collection in one piece
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Load the stored collection. Nothing stored yet is an empty list;
    /// unreadable data is [`StorageError::Corrupt`].
    async fn load(&self) -> StorageResult<Vec<Book>>;

    /// Replace the stored collection
    async fn save_all(&self, books: &[Book]) -> StorageResult<()>;
}

/// Stores the collection as a JSON array under one key of a [`StorageProvider`]
#[derive(Clone)]
pub struct JsonRepository {
    storage: Arc<dyn StorageProvider>,
    key: String,
}

impl JsonRepository {
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self::with_key(storage, BOOKS_KEY)
    }

    pub fn with_key(storage: Arc<dyn StorageProvider>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Repository backed by a JSON file inside `dir`
    pub fn local(dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(LocalStorage::new(dir)))
    }
}

#[async_trait]
impl BookRepository for JsonRepository {
    async fn load(&self) -> StorageResult<Vec<Book>> {
        let data = match self.storage.read(&self.key).await {
            Ok(data) => data,
            Err(StorageError::NotFound(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        serde_json::from_slice(&data).map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    async fn save_all(&self, books: &[Book]) -> StorageResult<()> {
        let data = serde_json::to_vec_pretty(books)
            .map_err(|e| StorageError::BackendError(e.to_string()))?;
        self.storage.write(&self.key, data).await
    }
}
