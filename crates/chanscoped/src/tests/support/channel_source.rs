//! Channel source doubles: a canned fake for end-to-end flows and a
//! `mockall` mock for call-level expectations.

use mockall::mock;

use crate::youtube::{
    ChannelLookup, ChannelSource, SubscriberCount, UpstreamError, VideoList, VideoSummary,
};

mock! {
    pub ChannelSource {}
    impl ChannelSource for ChannelSource {
        fn resolve_channel_id(&self, channel_url: &str) -> Result<ChannelLookup, UpstreamError>;
        fn subscriber_count(&self, channel_id: &str) -> Result<SubscriberCount, UpstreamError>;
        fn recent_videos(&self, channel_id: &str, count: u32) -> Result<VideoList, UpstreamError>;
    }
}

/// Deterministic channel source.
///
/// Every URL resolves to `abc`, every channel has 42 subscribers, and
/// `recent_videos` returns exactly `count` videos. [`FakeChannelSource::unresolvable`]
/// makes channel lookups fail instead.
#[derive(Debug, Clone)]
pub struct FakeChannelSource {
    channel_id: String,
    subscribers: u64,
    resolvable: bool,
}

impl Default for FakeChannelSource {
    fn default() -> Self {
        Self {
            channel_id: "abc".to_owned(),
            subscribers: 42,
            resolvable: true,
        }
    }
}

impl FakeChannelSource {
    /// Source whose channel lookups always report no match.
    pub fn unresolvable() -> Self {
        Self {
            resolvable: false,
            ..Self::default()
        }
    }
}

impl ChannelSource for FakeChannelSource {
    fn resolve_channel_id(&self, channel_url: &str) -> Result<ChannelLookup, UpstreamError> {
        if !self.resolvable {
            return Err(UpstreamError::ChannelNotFound {
                query: channel_url.to_owned(),
            });
        }
        Ok(ChannelLookup {
            channel_id: self.channel_id.clone(),
        })
    }

    fn subscriber_count(&self, _channel_id: &str) -> Result<SubscriberCount, UpstreamError> {
        Ok(SubscriberCount {
            subscribers: self.subscribers,
        })
    }

    fn recent_videos(&self, channel_id: &str, count: u32) -> Result<VideoList, UpstreamError> {
        let videos = (0..u64::from(count))
            .map(|index| VideoSummary {
                title: format!("{channel_id} upload {index}"),
                description: String::new(),
                views: index * 100,
                likes: index * 10,
                comments: index,
            })
            .collect();
        Ok(VideoList { videos })
    }
}
