//! List filtering (status, genre, free-text search)

use super::{Book, Status};
use serde::Deserialize;

/// Criteria for narrowing the book list. Empty criteria match everything.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct BookFilter {
    #[serde(default)]
    pub status: Option<Status>,

    /// Exact genre match
    #[serde(default)]
    pub genre: Option<String>,

    /// Case-insensitive substring of title or author
    #[serde(default)]
    pub search: Option<String>,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(status) = self.status {
            if book.status() != status {
                return false;
            }
        }

        if let Some(ref genre) = self.genre {
            if &book.genre != genre {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim) {
            Some(search) if !search.is_empty() => {
                let search_lower = search.to_lowercase();
                book.title.to_lowercase().contains(&search_lower)
                    || book.author.to_lowercase().contains(&search_lower)
            }
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewBook;
    use chrono::Utc;

    fn book(title: &str, author: &str, genre: &str, status: Status) -> Book {
        NewBook::new(title, author, genre)
            .with_status(status)
            .into_book(Utc::now())
            .unwrap()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let b = book("Dune", "Frank Herbert", "Science Fiction", Status::ToRead);
        assert!(BookFilter::default().matches(&b));
    }

    #[test]
    fn test_filters_combine() {
        let dune = book("Dune", "Frank Herbert", "Science Fiction", Status::Reading);
        let emma = book("Emma", "Jane Austen", "Classic", Status::Finished);

        let filter = BookFilter {
            status: Some(Status::Reading),
            genre: Some("Science Fiction".to_string()),
            search: Some("herb".to_string()),
        };
        assert!(filter.matches(&dune));
        assert!(!filter.matches(&emma));

        let by_author = BookFilter {
            search: Some("AUSTEN".to_string()),
            ..Default::default()
        };
        assert!(by_author.matches(&emma));
        assert!(!by_author.matches(&dune));
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let dune = book("Dune", "Frank Herbert", "Science Fiction", Status::ToRead);
        let filter = BookFilter {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&dune));
    }
}
