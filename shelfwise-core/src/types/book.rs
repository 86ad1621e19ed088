//! The Book record and the inputs that create or change it

use super::{Progress, Shelf, Status};
use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

pub const TITLE_MAX_LEN: usize = 100;
pub const AUTHOR_MAX_LEN: usize = 100;
pub const GENRE_MAX_LEN: usize = 50;

/// One entry on the reading list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier, assigned on creation
    pub id: String,

    pub title: String,

    pub author: String,

    pub genre: String,

    /// Status plus page progress while reading
    #[serde(flatten)]
    pub shelf: Shelf,

    /// Optional URL of a cover image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,

    /// When the book was added; never changes afterwards
    pub added_date: DateTime<Utc>,
}

impl Book {
    pub fn status(&self) -> Status {
        self.shelf.status()
    }

    pub fn progress(&self) -> Option<&Progress> {
        self.shelf.progress()
    }

    /// Merge a partial update onto a copy of this book.
    ///
    /// The page invariant is re-established here: leaving `reading` clears
    /// progress, entering it starts at page 0, and an inconsistent
    /// current/total pair is rejected.
    pub fn merged(&self, update: BookUpdate) -> Result<Book, ValidationError> {
        let mut next = self.clone();

        if let Some(title) = update.title {
            next.title = validate_text("Title", &title, TITLE_MAX_LEN)?;
        }
        if let Some(author) = update.author {
            next.author = validate_text("Author", &author, AUTHOR_MAX_LEN)?;
        }
        if let Some(genre) = update.genre {
            next.genre = validate_text("Genre", &genre, GENRE_MAX_LEN)?;
        }
        if let Some(cover_image) = update.cover_image {
            next.cover_image = validate_cover(cover_image)?;
        }

        let status = update.status.unwrap_or_else(|| self.status());
        let existing = self.progress();
        let current_page = update
            .current_page
            .or_else(|| existing.map(Progress::current_page));
        let total_pages = match update.total_pages {
            Some(total) => total,
            None => existing.and_then(Progress::total_pages),
        };
        next.shelf = Shelf::from_parts(status, current_page, total_pages)?;

        Ok(next)
    }

    /// Copy of this book with new page progress.
    ///
    /// Without a new total the stored one is kept; a book with no known total
    /// needs one supplied.
    pub fn with_progress(
        &self,
        current_page: u32,
        total_pages: Option<u32>,
    ) -> Result<Book, ValidationError> {
        let Shelf::Reading(progress) = &self.shelf else {
            return Err(ValidationError::NotReading);
        };
        let total = total_pages
            .or(progress.total_pages())
            .ok_or(ValidationError::MissingTotalPages)?;

        let mut next = self.clone();
        next.shelf = Shelf::Reading(Progress::new(current_page, Some(total))?);
        Ok(next)
    }
}

/// Everything needed to add a book; id and timestamp are assigned by the store
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_cover_image(mut self, url: impl Into<String>) -> Self {
        self.cover_image = Some(url.into());
        self
    }

    pub fn with_pages(mut self, current_page: Option<u32>, total_pages: Option<u32>) -> Self {
        self.current_page = current_page;
        self.total_pages = total_pages;
        self
    }

    /// Validate the input and stamp it with a fresh id and the given time
    pub fn into_book(self, added_date: DateTime<Utc>) -> Result<Book, ValidationError> {
        Ok(Book {
            id: Uuid::new_v4().to_string(),
            title: validate_text("Title", &self.title, TITLE_MAX_LEN)?,
            author: validate_text("Author", &self.author, AUTHOR_MAX_LEN)?,
            genre: validate_text("Genre", &self.genre, GENRE_MAX_LEN)?,
            shelf: Shelf::from_parts(self.status, self.current_page, self.total_pages)?,
            cover_image: validate_cover(self.cover_image)?,
            added_date,
        })
    }
}

/// A partial change to an existing book. `None` leaves a field alone.
///
/// For the clearable fields, `Some(None)` (JSON `null`) removes the value.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default, deserialize_with = "double_option")]
    pub cover_image: Option<Option<String>>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default, deserialize_with = "double_option")]
    pub total_pages: Option<Option<u32>>,
}

impl BookUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Distinguish a missing field from an explicit `null`
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn validate_text(field: &'static str, value: &str, max: usize) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(value.to_string())
}

/// Blank covers count as no cover
fn validate_cover(cover: Option<String>) -> Result<Option<String>, ValidationError> {
    let Some(cover) = cover else {
        return Ok(None);
    };
    let cover = cover.trim();
    if cover.is_empty() {
        return Ok(None);
    }
    url::Url::parse(cover).map_err(|e| ValidationError::InvalidUrl(e.to_string()))?;
    Ok(Some(cover.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading_book(current: u32, total: Option<u32>) -> Book {
        NewBook::new("Dune", "Frank Herbert", "Science Fiction")
            .with_status(Status::Reading)
            .with_pages(Some(current), total)
            .into_book(Utc::now())
            .unwrap()
    }

    #[test]
    fn test_new_book_trims_and_assigns_id() {
        let book = NewBook::new("  Dune ", "Frank Herbert", "Science Fiction")
            .into_book(Utc::now())
            .unwrap();
        assert_eq!(book.title, "Dune");
        assert!(Uuid::parse_str(&book.id).is_ok());
        assert_eq!(book.status(), Status::ToRead);
    }

    #[test]
    fn test_new_book_requires_fields() {
        let err = NewBook::new("", "Author", "Genre")
            .into_book(Utc::now())
            .unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "Title" });

        let err = NewBook::new("Title", "Author", "g".repeat(GENRE_MAX_LEN + 1))
            .into_book(Utc::now())
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooLong {
                field: "Genre",
                max: GENRE_MAX_LEN
            }
        );
    }

    #[test]
    fn test_new_book_cover_validation() {
        let book = NewBook::new("Dune", "Frank Herbert", "Science Fiction")
            .with_cover_image("")
            .into_book(Utc::now())
            .unwrap();
        assert_eq!(book.cover_image, None);

        let err = NewBook::new("Dune", "Frank Herbert", "Science Fiction")
            .with_cover_image("not a url")
            .into_book(Utc::now())
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidUrl(_)));
    }

    #[test]
    fn test_non_reading_book_drops_pages() {
        let book = NewBook::new("Emma", "Jane Austen", "Classic")
            .with_status(Status::Finished)
            .with_pages(Some(10), Some(400))
            .into_book(Utc::now())
            .unwrap();
        assert_eq!(book.shelf, Shelf::Finished);
    }

    #[test]
    fn test_merge_leaving_reading_clears_progress() {
        let book = reading_book(40, Some(100));
        let update = BookUpdate {
            status: Some(Status::Finished),
            ..Default::default()
        };
        let merged = book.merged(update).unwrap();
        assert_eq!(merged.shelf, Shelf::Finished);
        assert_eq!(merged.id, book.id);
        assert_eq!(merged.added_date, book.added_date);
    }

    #[test]
    fn test_merge_entering_reading_starts_at_zero() {
        let book = NewBook::new("Emma", "Jane Austen", "Classic")
            .into_book(Utc::now())
            .unwrap();
        let update = BookUpdate {
            status: Some(Status::Reading),
            total_pages: Some(Some(474)),
            ..Default::default()
        };
        let merged = book.merged(update).unwrap();
        let progress = merged.progress().unwrap();
        assert_eq!(progress.current_page(), 0);
        assert_eq!(progress.total_pages(), Some(474));
    }

    #[test]
    fn test_merge_rejects_page_past_total() {
        let book = reading_book(40, Some(100));
        let update = BookUpdate {
            current_page: Some(101),
            ..Default::default()
        };
        assert_eq!(
            book.merged(update).unwrap_err(),
            ValidationError::PageOutOfRange {
                current: 101,
                total: 100
            }
        );
    }

    #[test]
    fn test_merge_can_clear_total_and_cover() {
        let mut book = reading_book(40, Some(100));
        book.cover_image = Some("https://example.com/dune.jpg".to_string());
        let update: BookUpdate =
            serde_json::from_str(r#"{"totalPages": null, "coverImage": null}"#).unwrap();
        let merged = book.merged(update).unwrap();
        assert_eq!(merged.progress().unwrap().total_pages(), None);
        assert_eq!(merged.progress().unwrap().current_page(), 40);
        assert_eq!(merged.cover_image, None);
    }

    #[test]
    fn test_update_absent_vs_null() {
        let update: BookUpdate = serde_json::from_str(r#"{"title": "New"}"#).unwrap();
        assert_eq!(update.total_pages, None);
        assert_eq!(update.cover_image, None);
        assert!(!update.is_empty());
        assert!(BookUpdate::default().is_empty());
    }

    #[test]
    fn test_with_progress() {
        let book = reading_book(10, Some(300));
        let next = book.with_progress(150, None).unwrap();
        assert_eq!(next.progress().unwrap().current_page(), 150);
        assert_eq!(next.progress().unwrap().total_pages(), Some(300));

        assert_eq!(
            book.with_progress(301, None).unwrap_err(),
            ValidationError::PageOutOfRange {
                current: 301,
                total: 300
            }
        );

        let no_total = reading_book(0, None);
        assert_eq!(
            no_total.with_progress(5, None).unwrap_err(),
            ValidationError::MissingTotalPages
        );
        assert!(no_total.with_progress(5, Some(50)).is_ok());
    }

    #[test]
    fn test_with_progress_requires_reading() {
        let book = NewBook::new("Emma", "Jane Austen", "Classic")
            .into_book(Utc::now())
            .unwrap();
        assert_eq!(
            book.with_progress(1, Some(2)).unwrap_err(),
            ValidationError::NotReading
        );
    }

    #[test]
    fn test_book_serialization_layout() {
        let book = reading_book(3, Some(9));
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["status"], "reading");
        assert_eq!(json["currentPage"], 3);
        assert_eq!(json["totalPages"], 9);
        assert!(json["addedDate"].is_string());
        assert!(json.get("coverImage").is_none());

        let back: Book = serde_json::from_value(json).unwrap();
        assert_eq!(back, book);
    }

    #[test]
    fn test_stray_pages_ignored_for_non_reading() {
        let json = serde_json::json!({
            "id": "abc",
            "title": "Emma",
            "author": "Jane Austen",
            "genre": "Classic",
            "status": "finished",
            "currentPage": 12,
            "addedDate": "2024-01-01T00:00:00Z"
        });
        let book: Book = serde_json::from_value(json).unwrap();
        assert_eq!(book.shelf, Shelf::Finished);
    }
}
