//! Video search: one search call, then at most one batched detail call.

use std::collections::HashMap;

use tracing::{debug, info, instrument};

use crate::error::UpstreamError;

use super::client::YouTubeClient;
use super::merge::merge_video;
use super::types::{SearchItem, VideoDetail, VideoResult};

/// Results returned when no limit is given.
pub const DEFAULT_LIMIT: u64 = 5;

/// Sort order used when none is given.
pub const DEFAULT_ORDER: &str = "relevance";

/// Parameters of one video search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSearchRequest {
    /// Free-text query.
    pub query: String,
    /// Upstream `maxResults`.
    pub limit: u64,
    /// Upstream `order` (date, rating, relevance, title, videoCount, viewCount).
    pub order: String,
}

impl VideoSearchRequest {
    /// A request for `query` with default limit and order.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: DEFAULT_LIMIT,
            order: DEFAULT_ORDER.to_string(),
        }
    }

    /// Set `maxResults`.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Set the sort order; an empty value keeps the default.
    pub fn with_order(mut self, order: Option<&str>) -> Self {
        if let Some(order) = order.map(str::trim).filter(|o| !o.is_empty()) {
            self.order = order.to_string();
        }
        self
    }
}

/// IDs of the hits typed as videos, in search order.
pub fn collect_video_ids(items: &[SearchItem]) -> Vec<&str> {
    items.iter().filter_map(SearchItem::video_id).collect()
}

/// Run a video search.
///
/// Channel and playlist hits are dropped before the detail call. A failed
/// detail call fails the whole search.
#[instrument(skip(client, request), fields(query = %request.query, limit = request.limit))]
pub async fn search(
    client: &YouTubeClient,
    request: &VideoSearchRequest,
) -> Result<Vec<VideoResult>, UpstreamError> {
    let items = client
        .search_videos(&request.query, request.limit, &request.order)
        .await?;

    let video_ids = collect_video_ids(&items);
    if video_ids.is_empty() {
        debug!(hits = items.len(), "No video hits, skipping detail lookup");
        return Ok(Vec::new());
    }

    let details = client.get_video_details(&video_ids).await?;
    let details_by_id: HashMap<&str, &VideoDetail> = details
        .iter()
        .filter_map(|d| Some((d.id.as_deref()?, d)))
        .collect();

    let results: Vec<VideoResult> = items
        .iter()
        .filter_map(|item| {
            let video_id = item.video_id()?;
            Some(merge_video(
                video_id,
                item.snippet.as_ref(),
                details_by_id.get(video_id).copied(),
            ))
        })
        .collect();

    info!(
        count = results.len(),
        matched = details_by_id.len(),
        "Video search complete"
    );
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;

    fn client(server: &Server) -> YouTubeClient {
        YouTubeClient::new(reqwest::Client::new(), &server.url(), "yt-key")
    }

    #[test]
    fn request_defaults_and_empty_order() {
        let request = VideoSearchRequest::new("lofi").with_order(Some(""));
        assert_eq!(request.limit, 5);
        assert_eq!(request.order, "relevance");

        let request = VideoSearchRequest::new("lofi").with_order(Some("date"));
        assert_eq!(request.order, "date");
    }

    #[tokio::test]
    async fn non_video_hits_are_dropped_everywhere() {
        let mut server = Server::new_async().await;
        let _search = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"items": [
                    {"id": {"kind": "youtube#video", "videoId": "v1"}, "snippet": {"title": "one"}},
                    {"id": {"kind": "youtube#channel", "channelId": "UC9"}, "snippet": {"title": "a channel"}},
                    {"id": {"kind": "youtube#video", "videoId": "v2"}, "snippet": {"title": "two"}}
                ]}"#,
            )
            .create_async()
            .await;
        let details = server
            .mock("GET", "/videos")
            .match_query(Matcher::UrlEncoded("id".into(), "v1,v2".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"items": [
                    {"id": "v2", "snippet": {"title": "two (full)"}, "statistics": {"viewCount": "7", "likeCount": "1"}}
                ]}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let results = search(&client(&server), &VideoSearchRequest::new("x"))
            .await
            .unwrap();

        let ids: Vec<&str> = results.iter().map(|r| r.video_id.as_str()).collect();
        assert_eq!(ids, vec!["v1", "v2"]);

        assert_eq!(results[0].title, "one");
        assert_eq!(results[0].view_count, "");
        assert_eq!(results[0].thumbnail_url, "https://i.ytimg.com/vi/v1/hqdefault.jpg");

        assert_eq!(results[1].title, "two (full)");
        assert_eq!(results[1].view_count, "7");
        assert_eq!(results[1].like_count, "1");

        details.assert_async().await;
    }

    #[tokio::test]
    async fn no_videos_skips_detail_call() {
        let mut server = Server::new_async().await;
        let _search = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"items": [{"id": {"kind": "youtube#playlist", "playlistId": "PL1"}}]}"#)
            .create_async()
            .await;
        let details = server
            .mock("GET", "/videos")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let results = search(&client(&server), &VideoSearchRequest::new("x"))
            .await
            .unwrap();

        assert!(results.is_empty());
        details.assert_async().await;
    }

    #[tokio::test]
    async fn failed_detail_call_fails_the_search() {
        let mut server = Server::new_async().await;
        let _search = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"items": [{"id": {"kind": "youtube#video", "videoId": "v1"}}]}"#)
            .create_async()
            .await;
        let _details = server
            .mock("GET", "/videos")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let err = search(&client(&server), &VideoSearchRequest::new("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Status { service: "youtube", .. }));
    }
}
