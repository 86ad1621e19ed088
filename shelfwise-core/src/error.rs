//! Error types for ShelfWise Core

use thiserror::Error;

/// Result type alias using ShelfError
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Error returned by store operations.
///
/// Storage failures are not here: the store reports them as notices and
/// keeps going. Recommendation failures become an outcome, not an error.
#[derive(Debug, Error)]
pub enum ShelfError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Rejected book input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} is too long (max {max} characters)")]
    TooLong { field: &'static str, max: usize },

    #[error("Cover image must be a valid URL: {0}")]
    InvalidUrl(String),

    #[error("Total pages must be at least 1")]
    ZeroTotalPages,

    #[error("Current page ({current}) cannot exceed total pages ({total})")]
    PageOutOfRange { current: u32, total: u32 },

    #[error("Please set total pages first or update both")]
    MissingTotalPages,

    #[error("Progress can only be tracked while a book is being read")]
    NotReading,

    #[error("Unknown status: {0} (expected to-read, reading or finished)")]
    UnknownStatus(String),
}

/// Errors that occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Stored data is unreadable: {0}")]
    Corrupt(String),
}

/// Errors raised by a recommendation backend
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for RecommendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RecommendError::MalformedResponse(err.to_string())
        } else {
            RecommendError::Transport(err.to_string())
        }
    }
}
