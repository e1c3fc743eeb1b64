//! HTTP API route definitions.

use axum::{http::Method, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{health, metrics_export, usda_search, youtube_search, AppState};

/// Create the API router.
///
/// Each search is mounted twice: under `/api/v1` and under the
/// `/.netlify/functions` paths existing front ends already call.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    Router::new()
        // Health and metrics
        .route("/health", get(health))
        .route("/metrics", get(metrics_export))
        // Search endpoints
        .route("/api/v1/usda-search", get(usda_search))
        .route("/api/v1/youtube-search", get(youtube_search))
        .route("/.netlify/functions/usda-search", get(usda_search))
        .route("/.netlify/functions/youtube-search", get(youtube_search))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
