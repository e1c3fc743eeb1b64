//! Merge of a search hit with its detail record into a [`VideoResult`].

use super::types::{Snippet, VideoDetail, VideoResult};

/// Title used when neither source has one.
pub const UNTITLED: &str = "Untitled video";

/// Thumbnail URL built from the video ID when no source has one.
pub fn fallback_thumbnail_url(video_id: &str) -> String {
    format!("https://i.ytimg.com/vi/{video_id}/hqdefault.jpg")
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

/// First non-empty value of `field`, from `preferred` then `fallback`.
fn pick<'a>(
    preferred: Option<&'a Snippet>,
    fallback: Option<&'a Snippet>,
    field: impl Fn(&'a Snippet) -> Option<&'a String>,
) -> Option<String> {
    non_empty(preferred.and_then(&field))
        .or_else(|| non_empty(fallback.and_then(&field)))
        .map(str::to_string)
}

/// Merge one video.
///
/// The detail snippet is preferred over the search snippet field by field.
/// Thumbnails come from the preferred snippet's set if it has one, else the
/// search snippet's, trying medium, high, then default. Statistics are empty
/// strings when `detail` is `None`.
pub fn merge_video(
    video_id: &str,
    search_snippet: Option<&Snippet>,
    detail: Option<&VideoDetail>,
) -> VideoResult {
    let preferred = detail.and_then(|d| d.snippet.as_ref()).or(search_snippet);

    let thumbnails = preferred
        .and_then(|s| s.thumbnails.as_ref())
        .or_else(|| search_snippet.and_then(|s| s.thumbnails.as_ref()));
    let thumbnail_url = thumbnails
        .and_then(|t| {
            [&t.medium, &t.high, &t.default]
                .into_iter()
                .find_map(|thumb| non_empty(thumb.as_ref()?.url.as_ref()))
        })
        .map(str::to_string)
        .unwrap_or_else(|| fallback_thumbnail_url(video_id));

    let stats = detail.and_then(|d| d.statistics.as_ref());

    VideoResult {
        video_id: video_id.to_string(),
        title: pick(preferred, search_snippet, |s| s.title.as_ref())
            .unwrap_or_else(|| UNTITLED.to_string()),
        channel_title: pick(preferred, search_snippet, |s| s.channel_title.as_ref())
            .unwrap_or_default(),
        published_at: pick(preferred, search_snippet, |s| s.published_at.as_ref())
            .unwrap_or_default(),
        view_count: stats.and_then(|s| s.view_count.clone()).unwrap_or_default(),
        like_count: stats.and_then(|s| s.like_count.clone()).unwrap_or_default(),
        thumbnail_url,
    }
}
