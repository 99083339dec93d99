//! Wire shapes of the YouTube Data API v3 responses the client reads.
//!
//! Only the fields the service uses are modelled; everything else in the
//! payload is ignored.

use serde::Deserialize;

use super::UpstreamError;

#[derive(Debug, Default, Deserialize)]
pub(super) struct SearchListResponse {
    #[serde(default)]
    pub(super) items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchResult {
    pub(super) id: ResourceId,
    #[serde(default)]
    pub(super) snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ResourceId {
    #[serde(default)]
    pub(super) channel_id: Option<String>,
    #[serde(default)]
    pub(super) video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct Snippet {
    #[serde(default)]
    pub(super) title: String,
    #[serde(default)]
    pub(super) description: String,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ChannelListResponse {
    #[serde(default)]
    pub(super) items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChannelItem {
    #[serde(default)]
    pub(super) statistics: ChannelStatistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ChannelStatistics {
    #[serde(default)]
    pub(super) subscriber_count: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct VideoListResponse {
    #[serde(default)]
    pub(super) items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
pub(super) struct VideoItem {
    pub(super) id: String,
    #[serde(default)]
    pub(super) statistics: VideoStatistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct VideoStatistics {
    #[serde(default)]
    pub(super) view_count: Option<String>,
    #[serde(default)]
    pub(super) like_count: Option<String>,
    #[serde(default)]
    pub(super) comment_count: Option<String>,
}

/// Error envelope the API returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelope {
    pub(super) error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub(super) message: String,
}

/// Parses one of the API's decimal-string counters.
pub(super) fn parse_count(field: &'static str, value: &str) -> Result<u64, UpstreamError> {
    value
        .trim()
        .parse()
        .map_err(|_| UpstreamError::InvalidCount {
            field,
            value: value.to_owned(),
        })
}

/// Parses an optional counter, treating an absent value as zero.
pub(super) fn count_or_zero(field: &'static str, value: Option<&str>) -> Result<u64, UpstreamError> {
    value.map_or(Ok(0), |text| parse_count(field, text))
}

/// Extracts the API's error message from a failure body, falling back to the
/// raw text.
pub(super) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| body.trim().to_owned())
}
