//! YouTube Data API v3 client.

use tracing::{debug, instrument};

use crate::error::UpstreamError;
use crate::upstream;

use super::types::{SearchItem, SearchListResponse, VideoDetail, VideoListResponse};

/// Service label used in errors, logs, and metrics.
pub const SERVICE: &str = "youtube";

/// Parts requested from `/videos`.
const DETAIL_PARTS: &str = "snippet,statistics,contentDetails";

/// YouTube Data API REST client.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    /// Shared HTTP client.
    http: reqwest::Client,
    /// Base URL, without trailing slash.
    base_url: String,
    /// API key forwarded as `key`.
    api_key: String,
}

impl YouTubeClient {
    /// Create a client against `base_url` using `api_key`.
    pub fn new(http: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Search videos by free text.
    #[instrument(skip(self), fields(service = SERVICE))]
    pub async fn search_videos(
        &self,
        query: &str,
        max_results: u64,
        order: &str,
    ) -> Result<Vec<SearchItem>, UpstreamError> {
        let url = format!("{}/search", self.base_url);
        let params = [
            ("part", "snippet".to_string()),
            ("q", query.to_string()),
            ("type", "video".to_string()),
            ("maxResults", max_results.to_string()),
            ("order", order.to_string()),
            ("key", self.api_key.clone()),
        ];

        let response: SearchListResponse =
            upstream::get_json(&self.http, SERVICE, &url, &params).await?;
        let items = response.items.unwrap_or_default();

        debug!(count = items.len(), "Video search returned");
        Ok(items)
    }

    /// Fetch full records for a batch of video IDs in one call.
    ///
    /// An empty batch returns immediately without calling upstream.
    #[instrument(skip(self), fields(service = SERVICE, count = video_ids.len()))]
    pub async fn get_video_details(
        &self,
        video_ids: &[&str],
    ) -> Result<Vec<VideoDetail>, UpstreamError> {
        if video_ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/videos", self.base_url);
        let params = [
            ("part", DETAIL_PARTS.to_string()),
            ("id", video_ids.join(",")),
            ("key", self.api_key.clone()),
        ];

        let response: VideoListResponse =
            upstream::get_json(&self.http, SERVICE, &url, &params).await?;
        Ok(response.items.unwrap_or_default())
    }
}
