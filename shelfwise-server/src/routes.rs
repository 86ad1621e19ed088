//! API routes

use crate::handlers;
use crate::state::AppState;
use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    // SHELFWISE_CORS_ORIGINS can be comma-separated list of origins, or "*" for any
    let cors = match std::env::var("SHELFWISE_CORS_ORIGINS").ok() {
        Some(origins) if origins.trim() == "*" => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        Some(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allowed))
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => {
            // Default: allow localhost origins for development
            CorsLayer::new()
                .allow_origin(AllowOrigin::list([
                    HeaderValue::from_static("http://localhost:3000"),
                    HeaderValue::from_static("http://localhost:5173"),
                    HeaderValue::from_static("http://127.0.0.1:3000"),
                    HeaderValue::from_static("http://127.0.0.1:5173"),
                ]))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let api_routes = Router::new()
        // Book list endpoints
        .route("/books", get(handlers::list_books).post(handlers::add_book))
        .route(
            "/books/:id",
            get(handlers::get_book)
                .patch(handlers::update_book)
                .delete(handlers::delete_book),
        )
        .route("/books/:id/progress", put(handlers::update_progress))
        .route("/genres", get(handlers::list_genres))
        .route("/recommendations", post(handlers::recommend))
        // Notices
        .route("/notices", get(handlers::list_notices))
        .route("/sync", get(handlers::sync_events));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(handlers::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
