//! Shared fixtures and test doubles for the service test suites.

mod channel_source;
mod client;
mod config_loader;
mod reporter;
mod shutdown;
mod world;

pub use channel_source::{FakeChannelSource, MockChannelSource};
#[cfg(unix)]
pub use client::exchange_unix_json;
pub use client::exchange_json;
pub use config_loader::{FailingConfigLoader, TestConfigLoader};
pub use reporter::{HealthEvent, RecordingHealthReporter};
pub use shutdown::TestShutdownSignal;
pub use world::{TestWorld, world};
