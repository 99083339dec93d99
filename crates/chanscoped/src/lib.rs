//! Channel statistics service.
//!
//! `chanscoped` listens on a TCP or Unix socket and answers one JSON request
//! per connection with a `{"type": ..., "data": ...}` response. The supported
//! methods are:
//!
//! - `channel`: resolve a channel page URL to its channel identifier.
//! - `subs`: fetch a channel's subscriber count.
//! - `videos`: fetch a channel's most recent uploads with their view, like
//!   and comment counts (`count` defaults to 10).
//!
//! The data comes from the YouTube Data API v3 through [`YouTubeClient`],
//! which sits behind the [`ChannelSource`] trait so the protocol layer can be
//! exercised against fakes.
//!
//! Startup follows a fixed sequence: load configuration, install structured
//! telemetry, prepare the socket filesystem, build the channel source, bind
//! the listener. Each stage is reported through a [`HealthReporter`], and the
//! process stops on `SIGTERM`, `SIGINT`, `SIGQUIT` or `SIGHUP`.

mod bootstrap;
pub mod dispatch;
mod health;
mod process;
mod telemetry;
mod transport;
pub mod youtube;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Daemon, RunningService, StaticConfigLoader, SystemConfigLoader,
    bootstrap_with,
};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use process::{LaunchError, ShutdownError, ShutdownSignal, SystemShutdownSignal, run_daemon};
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use transport::{FramingError, ListenerError};
pub use youtube::{ChannelSource, UpstreamError, YouTubeClient};

#[cfg(test)]
mod tests;
