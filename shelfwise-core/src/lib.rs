//! ShelfWise Core Library
//!
//! This crate provides the reading-list types, the persisted [`BookStore`]
//! and the recommendation requester shared by the ShelfWise CLI and server.

pub mod config;
pub mod error;
pub mod notice;
pub mod recommend;
pub mod storage;
pub mod store;
pub mod types;

pub use config::{LlmSettings, Settings};
pub use error::{RecommendError, Result, ShelfError, StorageError, ValidationError};
pub use notice::Notice;
pub use recommend::{
    request_recommendations, LlmRecommender, RecommendationOutcome, RecommendationRequest,
    RecommendationResponse, Recommender,
};
pub use store::BookStore;
pub use types::{Book, BookFilter, BookUpdate, NewBook, Progress, Shelf, Status};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_creation() {
        let book = NewBook::new("Test Book", "Test Author", "Test Genre")
            .into_book(chrono::Utc::now())
            .unwrap();
        assert_eq!(book.title, "Test Book");
        assert_eq!(book.status(), Status::ToRead);
    }
}
