//! Recommendation handler

use super::ApiError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use shelfwise_core::{request_recommendations, RecommendationOutcome};

/// Recommendation response
#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    #[serde(flatten)]
    pub outcome: RecommendationOutcome,
    pub message: &'static str,
}

/// Request recommendations based on the current list.
///
/// Only one request runs at a time; a second caller gets 409 until the
/// first finishes.
pub async fn recommend(
    State(state): State<AppState>,
) -> Result<Json<RecommendationsResponse>, ApiError> {
    let _guard = state.begin_recommendation().ok_or_else(|| {
        ApiError::new(
            StatusCode::CONFLICT,
            "A recommendation request is already in progress",
        )
    })?;

    // Snapshot the list so the store is not locked across the remote call
    let books = state.store.read().await.list();
    let outcome = request_recommendations(&books, state.recommender.as_ref()).await;

    Ok(Json(RecommendationsResponse {
        message: outcome.message(),
        outcome,
    }))
}
