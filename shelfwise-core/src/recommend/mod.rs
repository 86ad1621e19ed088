//! Recommendation requests built from the reading list
//!
//! The list is reduced to distinct titles, authors and genres and handed to a
//! [`Recommender`] exactly once per request. Nothing here mutates the store.

mod llm;

pub use llm::LlmRecommender;

use crate::error::RecommendError;
use crate::types::Book;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const NEEDS_BOOKS_MESSAGE: &str =
    "Please add some books to your list to get personalized recommendations.";
pub const NONE_FOUND_MESSAGE: &str =
    "No recommendations found. Try adding more diverse books to your list.";
pub const FAILED_MESSAGE: &str =
    "Sorry, something went wrong while generating recommendations. Please try again.";

/// What the recommendation service is told about the reader
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub titles: Vec<String>,
    pub authors: Vec<String>,
    pub genres: Vec<String>,
}

impl RecommendationRequest {
    /// Distinct, non-empty values in first-seen order
    pub fn from_books(books: &[Book]) -> Self {
        Self {
            titles: distinct(books.iter().map(|b| b.title.as_str())),
            authors: distinct(books.iter().map(|b| b.author.as_str())),
            genres: distinct(books.iter().map(|b| b.genre.as_str())),
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .map(str::trim)
        .filter(|value| !value.is_empty() && seen.insert(*value))
        .map(str::to_string)
        .collect()
}

/// What the recommendation service answers. `recommendations` is required;
/// an object without it is malformed, not an empty answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<String>,
}

/// A backend able to turn a request into recommended titles
#[async_trait]
pub trait Recommender: Send + Sync {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResponse, RecommendError>;
}

/// Result of one recommendation attempt, as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RecommendationOutcome {
    /// The list is empty; no request was made
    NeedsBooks,
    Found { recommendations: Vec<String> },
    /// The service answered with nothing
    NoneFound,
    Failed,
}

impl RecommendationOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            RecommendationOutcome::NeedsBooks => NEEDS_BOOKS_MESSAGE,
            RecommendationOutcome::Found { .. } => {
                "Here are some books you might enjoy based on your reading list:"
            }
            RecommendationOutcome::NoneFound => NONE_FOUND_MESSAGE,
            RecommendationOutcome::Failed => FAILED_MESSAGE,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RecommendationOutcome::Failed)
    }
}

/// Ask `recommender` for titles based on `books`.
///
/// An empty list short-circuits without calling the recommender. Failures
/// are logged and collapsed into [`RecommendationOutcome::Failed`].
pub async fn request_recommendations(
    books: &[Book],
    recommender: &dyn Recommender,
) -> RecommendationOutcome {
    if books.is_empty() {
        return RecommendationOutcome::NeedsBooks;
    }

    let request = RecommendationRequest::from_books(books);
    tracing::debug!(
        titles = request.titles.len(),
        authors = request.authors.len(),
        genres = request.genres.len(),
        "Requesting recommendations"
    );

    match recommender.recommend(&request).await {
        Ok(response) if response.recommendations.is_empty() => RecommendationOutcome::NoneFound,
        Ok(response) => RecommendationOutcome::Found {
            recommendations: response.recommendations,
        },
        Err(e) => {
            tracing::error!("Failed to generate recommendations: {}", e);
            RecommendationOutcome::Failed
        }
    }
}
