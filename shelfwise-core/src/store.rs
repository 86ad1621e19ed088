//! The book store: sole owner of the reading list
//!
//! Every mutation writes the whole collection through the repository before
//! returning and broadcasts a [`Notice`]. Storage failures never abort an
//! operation; they are logged and reported as notices instead.

use crate::error::Result;
use crate::notice::Notice;
use crate::storage::BookRepository;
use crate::types::{Book, BookFilter, BookUpdate, NewBook};
use chrono::Utc;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::broadcast;

const NOTICE_CAPACITY: usize = 100;

pub struct BookStore {
    /// Insertion order; display order is computed on read
    books: Vec<Book>,
    repository: Arc<dyn BookRepository>,
    notices: broadcast::Sender<Notice>,
    load_notice: Option<Notice>,
}

impl BookStore {
    /// Load the persisted collection, starting empty if it is missing or
    /// unreadable.
    pub async fn open(repository: Arc<dyn BookRepository>) -> Self {
        let (books, load_notice) = match repository.load().await {
            Ok(books) => {
                tracing::debug!("Loaded {} books", books.len());
                (books, None)
            }
            Err(e) => {
                tracing::warn!("Failed to load books, starting fresh: {}", e);
                (
                    Vec::new(),
                    Some(Notice::LoadFailed {
                        reason: e.to_string(),
                    }),
                )
            }
        };

        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);

        Self {
            books,
            repository,
            notices,
            load_notice,
        }
    }

    /// The error notice from start-up, if loading failed
    pub fn load_notice(&self) -> Option<&Notice> {
        self.load_notice.as_ref()
    }

    /// Subscribe to notices for subsequent mutations
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// All books, most recently added first
    pub fn list(&self) -> Vec<Book> {
        self.filter(&BookFilter::default())
    }

    /// Books matching `filter`, most recently added first
    pub fn filter(&self, filter: &BookFilter) -> Vec<Book> {
        // Reverse before the stable sort so equal timestamps keep the later
        // insertion first
        let mut books: Vec<Book> = self
            .books
            .iter()
            .rev()
            .filter(|book| filter.matches(book))
            .cloned()
            .collect();
        books.sort_by(|a, b| b.added_date.cmp(&a.added_date));
        books
    }

    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Distinct genres, sorted
    pub fn genres(&self) -> Vec<String> {
        self.books
            .iter()
            .map(|book| book.genre.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Add a book, assigning its id and added timestamp
    pub async fn add(&mut self, new_book: NewBook) -> Result<Book> {
        let book = new_book.into_book(Utc::now())?;
        tracing::info!("Adding '{}' ({})", book.title, book.id);

        self.books.push(book.clone());
        self.persist().await;
        self.broadcast(Notice::BookAdded {
            id: book.id.clone(),
            title: book.title.clone(),
        });

        Ok(book)
    }

    /// Apply a partial update. Returns `Ok(None)` without touching storage
    /// when no book has this id.
    pub async fn update(&mut self, id: &str, update: BookUpdate) -> Result<Option<Book>> {
        let Some(index) = self.position(id) else {
            tracing::debug!("Update for unknown book {} ignored", id);
            return Ok(None);
        };

        let updated = self.books[index].merged(update)?;
        self.books[index] = updated.clone();
        self.persist().await;
        self.broadcast(Notice::BookUpdated {
            id: updated.id.clone(),
            title: updated.title.clone(),
        });

        Ok(Some(updated))
    }

    /// Record reading progress on a book that is currently being read
    pub async fn update_progress(
        &mut self,
        id: &str,
        current_page: u32,
        total_pages: Option<u32>,
    ) -> Result<Option<Book>> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        let updated = self.books[index].with_progress(current_page, total_pages)?;
        self.books[index] = updated.clone();
        self.persist().await;
        self.broadcast(Notice::ProgressUpdated {
            id: updated.id.clone(),
            title: updated.title.clone(),
        });

        Ok(Some(updated))
    }

    /// Remove a book. The collection is written back even when nothing
    /// matched; the notice is only sent for an actual removal.
    pub async fn delete(&mut self, id: &str) -> Option<Book> {
        let removed = self.position(id).map(|index| self.books.remove(index));
        self.persist().await;

        if let Some(ref book) = removed {
            tracing::info!("Deleted '{}' ({})", book.title, book.id);
            self.broadcast(Notice::BookDeleted {
                id: book.id.clone(),
                title: book.title.clone(),
            });
        }

        removed
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }

    /// Write the full collection. In-memory state stays authoritative for the
    /// session if the write fails.
    async fn persist(&self) {
        if let Err(e) = self.repository.save_all(&self.books).await {
            tracing::error!("Failed to save books: {}", e);
            self.broadcast(Notice::SaveFailed {
                reason: e.to_string(),
            });
        }
    }

    fn broadcast(&self, notice: Notice) {
        // Ignore errors (no subscribers)
        let _ = self.notices.send(notice);
    }
}
