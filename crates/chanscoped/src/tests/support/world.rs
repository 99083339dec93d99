//! BDD test world for the bootstrap suite: holds the loader, reporter and
//! the daemon or error each step produced.

use std::cell::RefCell;
use std::sync::Arc;

use serde_json::Value;

use crate::bootstrap::{BootstrapError, ConfigLoader, Daemon, RunningService, bootstrap_with};
use crate::youtube::YouTubeClient;

use super::channel_source::FakeChannelSource;
use super::client::exchange_json;
use super::config_loader::{FailingConfigLoader, TestConfigLoader};
use super::reporter::RecordingHealthReporter;

/// Scenario world shared across BDD steps.
pub struct TestWorld {
    loader: Box<dyn ConfigLoader>,
    pub reporter: Arc<RecordingHealthReporter>,
    source_available: bool,
    daemon: Option<Daemon<FakeChannelSource>>,
    service: Option<RunningService>,
    bootstrap_error: Option<BootstrapError>,
    pub last_reply: Option<Value>,
}

impl TestWorld {
    /// Builds a world with a successful configuration loader.
    #[must_use]
    pub fn new() -> Self {
        Self {
            loader: Box::new(TestConfigLoader::tcp()),
            reporter: Arc::new(RecordingHealthReporter::default()),
            source_available: true,
            daemon: None,
            service: None,
            bootstrap_error: None,
            last_reply: None,
        }
    }

    /// Installs a loader that always fails.
    pub fn use_failing_loader(&mut self) {
        self.loader = Box::new(FailingConfigLoader);
        self.reset_results();
    }

    /// Installs a loader that succeeds with a TCP endpoint.
    pub fn use_successful_loader(&mut self) {
        self.loader = Box::new(TestConfigLoader::tcp());
        self.reset_results();
    }

    /// Makes the channel source fail to build, as the real client does
    /// without an API key.
    pub fn withhold_api_key(&mut self) {
        self.source_available = false;
        self.reset_results();
    }

    /// Runs the bootstrap sequence once.
    pub fn bootstrap(&mut self) {
        if self.daemon.is_some() || self.bootstrap_error.is_some() {
            return;
        }

        let source_available = self.source_available;
        let result = bootstrap_with(&*self.loader, self.reporter.clone(), |config| {
            if source_available {
                Ok(FakeChannelSource::default())
            } else {
                YouTubeClient::from_config(config).map(|_| FakeChannelSource::default())
            }
        });
        match result {
            Ok(daemon) => self.daemon = Some(daemon),
            Err(error) => self.bootstrap_error = Some(error),
        }
    }

    /// Starts the listener of a bootstrapped daemon.
    pub fn start(&mut self) -> Result<(), String> {
        let daemon = self.daemon.take().ok_or("daemon was not bootstrapped")?;
        let service = daemon.start().map_err(|error| error.to_string())?;
        self.service = Some(service);
        Ok(())
    }

    /// Sends a raw request to the running service.
    pub fn send(&mut self, request: &str) -> Result<(), String> {
        let addr = self
            .service
            .as_ref()
            .and_then(RunningService::local_addr)
            .ok_or("service is not listening on TCP")?;
        self.last_reply = Some(exchange_json(addr, request.as_bytes()));
        Ok(())
    }

    /// Stops the running service.
    pub fn stop(&mut self) -> Result<(), String> {
        let service = self.service.take().ok_or("service is not running")?;
        service.stop().map_err(|error| error.to_string())
    }

    /// Returns whether bootstrap produced an error.
    #[must_use]
    pub fn bootstrap_error(&self) -> Option<&BootstrapError> {
        self.bootstrap_error.as_ref()
    }

    /// Returns true when the daemon handle is available.
    #[must_use]
    pub fn daemon_ready(&self) -> bool {
        self.daemon.is_some()
    }

    fn reset_results(&mut self) {
        self.daemon = None;
        self.service = None;
        self.bootstrap_error = None;
        self.last_reply = None;
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TestWorld {
    fn drop(&mut self) {
        if let Some(service) = self.service.take() {
            let _ = service.stop();
        }
    }
}

/// Default test world fixture.
#[must_use]
pub fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::new())
}
