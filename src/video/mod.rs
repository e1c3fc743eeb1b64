//! Video search proxy over the YouTube Data API v3.
//!
//! This module handles:
//! - YouTube payload types
//! - The REST client (search and batched video details)
//! - Merging search hits with their detail records
//! - The search flow that ties them together

pub mod client;
pub mod merge;
pub mod search;
pub mod types;

pub use client::YouTubeClient;
pub use merge::{fallback_thumbnail_url, merge_video};
pub use search::{collect_video_ids, search, VideoSearchRequest, DEFAULT_LIMIT, DEFAULT_ORDER};
pub use types::VideoResult;
