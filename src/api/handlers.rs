//! HTTP API handlers.

use axum::{
    extract::{RawQuery, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tracing::error;

use crate::config::{Config, USDA_API_KEY_VAR, YOUTUBE_API_KEY_VAR};
use crate::food::{self, FoodResult, FoodSearchRequest, UsdaClient};
use crate::metrics;
use crate::video::{self, VideoResult, VideoSearchRequest, YouTubeClient};

use super::error::ApiError;
use super::params::{parse_limit, required, FoodParams, VideoParams};

/// Endpoint label of the food search.
pub const FOOD_ENDPOINT: &str = "usda-search";

/// Endpoint label of the video search.
pub const VIDEO_ENDPOINT: &str = "youtube-search";

/// Application state shared with handlers.
///
/// A client is `None` when its API key is not configured.
#[derive(Clone, Default)]
pub struct AppState {
    /// FoodData Central client.
    pub usda: Option<UsdaClient>,
    /// YouTube Data API client.
    pub youtube: Option<YouTubeClient>,
    /// Prometheus render handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Build clients for every configured upstream.
    pub fn from_config(config: &Config, http: reqwest::Client) -> Self {
        Self {
            usda: config
                .usda_key()
                .map(|key| UsdaClient::new(http.clone(), &config.usda_base_url, key)),
            youtube: config
                .youtube_key()
                .map(|key| YouTubeClient::new(http.clone(), &config.youtube_base_url, key)),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Successful search response.
#[derive(Debug, Serialize)]
pub struct SearchResponse<T> {
    /// Normalized results, in upstream order.
    pub results: Vec<T>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Prometheus exposition handler - 404 when no recorder is installed.
pub async fn metrics_export(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Food search handler.
pub async fn usda_search(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<SearchResponse<FoodResult>>, ApiError> {
    let outcome = run_usda_search(&state, raw.as_deref()).await;
    record_outcome(FOOD_ENDPOINT, &outcome);
    outcome.map(|results| Json(SearchResponse { results }))
}

async fn run_usda_search(state: &AppState, raw: Option<&str>) -> Result<Vec<FoodResult>, ApiError> {
    let client = state
        .usda
        .as_ref()
        .ok_or(ApiError::NotConfigured(USDA_API_KEY_VAR))?;

    let params = FoodParams::from_query(raw);
    let query = required(params.q).ok_or(ApiError::MissingParam("q"))?;

    let request = FoodSearchRequest::new(query)
        .with_limit(parse_limit(params.limit.as_deref()))
        .with_data_types(params.data_type.as_deref());

    food::search(client, &request).await.map_err(|e| {
        error!(endpoint = FOOD_ENDPOINT, service = e.service(), error = %e, "Search failed");
        ApiError::Internal(e)
    })
}

/// Video search handler.
pub async fn youtube_search(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<SearchResponse<VideoResult>>, ApiError> {
    let outcome = run_youtube_search(&state, raw.as_deref()).await;
    record_outcome(VIDEO_ENDPOINT, &outcome);
    outcome.map(|results| Json(SearchResponse { results }))
}

async fn run_youtube_search(
    state: &AppState,
    raw: Option<&str>,
) -> Result<Vec<VideoResult>, ApiError> {
    let client = state
        .youtube
        .as_ref()
        .ok_or(ApiError::NotConfigured(YOUTUBE_API_KEY_VAR))?;

    let params = VideoParams::from_query(raw);
    let query = required(params.q).ok_or(ApiError::MissingParam("q"))?;

    let request = VideoSearchRequest::new(query)
        .with_limit(parse_limit(params.limit.as_deref()))
        .with_order(params.order.as_deref());

    video::search(client, &request).await.map_err(|e| {
        error!(endpoint = VIDEO_ENDPOINT, service = e.service(), error = %e, "Search failed");
        ApiError::Internal(e)
    })
}

fn record_outcome<T>(endpoint: &'static str, outcome: &Result<T, ApiError>) {
    let label = match outcome {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    metrics::inc_search_requests(endpoint, label);
}
