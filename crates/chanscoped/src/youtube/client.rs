//! Blocking YouTube Data API client.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use chanscope_config::Config;

use super::api::{self, ChannelListResponse, SearchListResponse, VideoListResponse};
use super::{ChannelLookup, ChannelSource, SubscriberCount, UpstreamError, VideoList, VideoSummary};

const CLIENT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::youtube");
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Largest `maxResults` the search endpoint accepts.
pub const MAX_RESULTS_PER_PAGE: u32 = 50;

/// [`ChannelSource`] backed by the YouTube Data API v3.
///
/// The underlying HTTP client pools connections internally and is safe to
/// share between connection threads.
#[derive(Clone)]
pub struct YouTubeClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for YouTubeClient {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("YouTubeClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl YouTubeClient {
    /// Builds a client from the service configuration.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::MissingApiKey`] when no key is configured and
    /// [`UpstreamError::ClientBuild`] when the HTTP stack cannot initialise.
    pub fn from_config(config: &Config) -> Result<Self, UpstreamError> {
        let api_key = config.api_key().ok_or(UpstreamError::MissingApiKey)?;
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(config.http_timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| UpstreamError::ClientBuild { source })?;
        Ok(Self::with_http(http, config.api_base_url(), api_key))
    }

    /// Builds a client around an existing HTTP client.
    pub fn with_http(http: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            http,
            base_url,
            api_key: api_key.into(),
        }
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &[(&str, &str)],
    ) -> Result<T, UpstreamError> {
        debug!(target: CLIENT_TARGET, endpoint, "calling YouTube Data API");
        let response = self
            .http
            .get(format!("{}/{endpoint}", self.base_url))
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .map_err(|source| UpstreamError::Transport {
                endpoint,
                source: source.without_url(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|source| UpstreamError::Transport {
                endpoint,
                source: source.without_url(),
            })?;
        if !status.is_success() {
            return Err(UpstreamError::Status {
                endpoint,
                status: status.as_u16(),
                message: api::error_message(&body),
            });
        }
        serde_json::from_str(&body).map_err(|source| UpstreamError::Decode { endpoint, source })
    }
}

impl ChannelSource for YouTubeClient {
    fn resolve_channel_id(&self, channel_url: &str) -> Result<ChannelLookup, UpstreamError> {
        let term = channel_search_term(channel_url);
        if term.is_empty() {
            return Err(UpstreamError::ChannelNotFound {
                query: channel_url.to_owned(),
            });
        }
        let response: SearchListResponse = self.get_json(
            "search",
            &[("part", "id"), ("type", "channel"), ("q", term)],
        )?;
        response
            .items
            .into_iter()
            .next()
            .ok_or_else(|| UpstreamError::ChannelNotFound {
                query: term.to_owned(),
            })?
            .id
            .channel_id
            .map(|channel_id| ChannelLookup { channel_id })
            .ok_or(UpstreamError::MissingField {
                endpoint: "search",
                field: "id.channelId",
            })
    }

    fn subscriber_count(&self, channel_id: &str) -> Result<SubscriberCount, UpstreamError> {
        let response: ChannelListResponse =
            self.get_json("channels", &[("part", "statistics"), ("id", channel_id)])?;
        let channel =
            response
                .items
                .into_iter()
                .next()
                .ok_or_else(|| UpstreamError::ChannelNotFound {
                    query: channel_id.to_owned(),
                })?;
        let raw = channel
            .statistics
            .subscriber_count
            .ok_or(UpstreamError::MissingField {
                endpoint: "channels",
                field: "statistics.subscriberCount",
            })?;
        Ok(SubscriberCount {
            subscribers: api::parse_count("subscriberCount", &raw)?,
        })
    }

    fn recent_videos(&self, channel_id: &str, count: u32) -> Result<VideoList, UpstreamError> {
        if count > MAX_RESULTS_PER_PAGE {
            return Err(UpstreamError::TooManyResults {
                requested: count,
                max: MAX_RESULTS_PER_PAGE,
            });
        }
        if count == 0 {
            return Ok(VideoList::default());
        }

        let max_results = count.to_string();
        let search: SearchListResponse = self.get_json(
            "search",
            &[
                ("part", "snippet"),
                ("channelId", channel_id),
                ("maxResults", max_results.as_str()),
                ("order", "date"),
                ("type", "video"),
            ],
        )?;
        let uploads: Vec<(String, api::Snippet)> = search
            .items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                Some((video_id, item.snippet.unwrap_or_default()))
            })
            .collect();
        if uploads.is_empty() {
            return Ok(VideoList::default());
        }

        let ids = uploads
            .iter()
            .map(|(video_id, _)| video_id.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let statistics: VideoListResponse =
            self.get_json("videos", &[("part", "statistics"), ("id", ids.as_str())])?;
        let mut by_id: HashMap<String, api::VideoStatistics> = statistics
            .items
            .into_iter()
            .map(|item| (item.id, item.statistics))
            .collect();

        let videos = uploads
            .into_iter()
            .map(|(video_id, snippet)| {
                let stats = by_id.remove(&video_id).unwrap_or_default();
                Ok(VideoSummary {
                    title: snippet.title,
                    description: snippet.description,
                    views: api::count_or_zero("viewCount", stats.view_count.as_deref())?,
                    likes: api::count_or_zero("likeCount", stats.like_count.as_deref())?,
                    comments: api::count_or_zero("commentCount", stats.comment_count.as_deref())?,
                })
            })
            .collect::<Result<Vec<_>, UpstreamError>>()?;
        Ok(VideoList { videos })
    }
}

/// Derives the search term from a channel URL: its last non-empty path
/// segment, without query string or fragment.
fn channel_search_term(channel_url: &str) -> &str {
    let without_suffix = channel_url
        .split(['?', '#'])
        .next()
        .unwrap_or(channel_url)
        .trim()
        .trim_end_matches('/');
    without_suffix
        .rsplit('/')
        .next()
        .unwrap_or(without_suffix)
}
