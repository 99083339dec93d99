//! Channel statistics collaborator.
//!
//! The dispatcher only sees the [`ChannelSource`] trait. [`YouTubeClient`]
//! implements it against the YouTube Data API v3; tests substitute fakes.

mod api;
mod client;
mod errors;

use serde::{Deserialize, Serialize};

pub use self::client::YouTubeClient;
pub use self::errors::UpstreamError;

/// Result of resolving a channel URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelLookup {
    /// Canonical channel identifier.
    pub channel_id: String,
}

/// Result of a subscriber count query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberCount {
    /// Number of subscribers reported by the API.
    pub subscribers: u64,
}

/// Summary of a single uploaded video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSummary {
    pub title: String,
    pub description: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
}

/// Most recent uploads of a channel, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoList {
    pub videos: Vec<VideoSummary>,
}

/// Source of channel data consumed by the dispatcher.
///
/// Implementations are shared across connection threads and must be safe to
/// call concurrently without external locking.
pub trait ChannelSource: Send + Sync {
    /// Resolves a channel page URL to its channel identifier.
    fn resolve_channel_id(&self, channel_url: &str) -> Result<ChannelLookup, UpstreamError>;

    /// Fetches the subscriber count of a channel.
    fn subscriber_count(&self, channel_id: &str) -> Result<SubscriberCount, UpstreamError>;

    /// Fetches up to `count` of the channel's most recent videos.
    fn recent_videos(&self, channel_id: &str, count: u32) -> Result<VideoList, UpstreamError>;
}

impl<T> ChannelSource for std::sync::Arc<T>
where
    T: ChannelSource + ?Sized,
{
    fn resolve_channel_id(&self, channel_url: &str) -> Result<ChannelLookup, UpstreamError> {
        (**self).resolve_channel_id(channel_url)
    }

    fn subscriber_count(&self, channel_id: &str) -> Result<SubscriberCount, UpstreamError> {
        (**self).subscriber_count(channel_id)
    }

    fn recent_videos(&self, channel_id: &str, count: u32) -> Result<VideoList, UpstreamError> {
        (**self).recent_videos(channel_id, count)
    }
}
