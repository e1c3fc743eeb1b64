//! YouTube Data API payloads and the normalized video result.

use serde::{Deserialize, Serialize};

/// Resource kind of a video search hit.
pub const VIDEO_KIND: &str = "youtube#video";

/// Response from `GET /search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Option<Vec<SearchItem>>,
}

/// One search hit, which may be a video, channel, or playlist.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub id: Option<ResourceId>,
    #[serde(default)]
    pub snippet: Option<Snippet>,
}

/// Typed identifier of a search hit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub video_id: Option<String>,
}

impl SearchItem {
    /// The video ID, only if this hit is explicitly typed as a video.
    pub fn video_id(&self) -> Option<&str> {
        let id = self.id.as_ref()?;
        if id.kind.as_deref() != Some(VIDEO_KIND) {
            return None;
        }
        id.video_id.as_deref().filter(|v| !v.is_empty())
    }
}

/// Snippet shared by search hits and video resources.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub channel_title: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub thumbnails: Option<Thumbnails>,
}

/// Thumbnail set keyed by size.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnails {
    #[serde(default)]
    pub default: Option<Thumbnail>,
    #[serde(default)]
    pub medium: Option<Thumbnail>,
    #[serde(default)]
    pub high: Option<Thumbnail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: Option<String>,
}

/// Response from `GET /videos`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Option<Vec<VideoDetail>>,
}

/// Full video resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoDetail {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub snippet: Option<Snippet>,
    #[serde(default)]
    pub statistics: Option<Statistics>,
}

/// Video statistics. YouTube sends counts as strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    #[serde(default)]
    pub view_count: Option<String>,
    #[serde(default)]
    pub like_count: Option<String>,
}

/// Normalized video record returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResult {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    pub published_at: String,
    pub view_count: String,
    pub like_count: String,
    pub thumbnail_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: serde_json::Value) -> SearchItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn only_video_kind_has_video_id() {
        assert_eq!(
            item(json!({ "id": { "kind": "youtube#video", "videoId": "abc" } })).video_id(),
            Some("abc")
        );
        assert_eq!(
            item(json!({ "id": { "kind": "youtube#channel", "channelId": "UC1" } })).video_id(),
            None
        );
        assert_eq!(
            item(json!({ "id": { "kind": "youtube#playlist", "videoId": "abc" } })).video_id(),
            None
        );
        assert_eq!(item(json!({})).video_id(), None);
    }

    #[test]
    fn statistics_are_read_as_strings() {
        let detail: VideoDetail = serde_json::from_value(json!({
            "id": "abc",
            "statistics": { "viewCount": "1200", "likeCount": "35", "commentCount": "2" }
        }))
        .unwrap();

        let stats = detail.statistics.unwrap();
        assert_eq!(stats.view_count.as_deref(), Some("1200"));
        assert_eq!(stats.like_count.as_deref(), Some("35"));
    }
}
