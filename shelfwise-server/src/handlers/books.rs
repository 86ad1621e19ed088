//! Book list handlers

use super::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use shelfwise_core::{Book, BookFilter, BookUpdate, NewBook};

/// List response
#[derive(Debug, Serialize)]
pub struct ListBooksResponse {
    pub books: Vec<Book>,
    pub total: usize,
}

/// List books, most recently added first
pub async fn list_books(
    State(state): State<AppState>,
    Query(filter): Query<BookFilter>,
) -> Json<ListBooksResponse> {
    let store = state.store.read().await;
    let books = store.filter(&filter);

    Json(ListBooksResponse {
        total: books.len(),
        books,
    })
}

/// Add a new book
pub async fn add_book(
    State(state): State<AppState>,
    Json(new_book): Json<NewBook>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let mut store = state.store.write().await;
    let book = store.add(new_book).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Get a single book
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let store = state.store.read().await;
    store
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found(&id))
}

/// Apply a partial update to a book
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<BookUpdate>,
) -> Result<Json<Book>, ApiError> {
    let mut store = state.store.write().await;
    store
        .update(&id, update)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(&id))
}

/// Reading progress request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRequest {
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// Record reading progress
pub async fn update_progress(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(progress): Json<ProgressRequest>,
) -> Result<Json<Book>, ApiError> {
    let mut store = state.store.write().await;
    store
        .update_progress(&id, progress.current_page, progress.total_pages)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(&id))
}

/// Delete a book
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    match store.delete(&id).await {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(ApiError::not_found(&id)),
    }
}

/// Distinct genres in the list
pub async fn list_genres(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.store.read().await.genres())
}
