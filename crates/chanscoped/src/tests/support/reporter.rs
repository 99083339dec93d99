//! Test double for [`HealthReporter`] that records lifecycle events for
//! assertions.

use std::net::SocketAddr;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use chanscope_config::{Config, SocketEndpoint};

use crate::bootstrap::BootstrapError;
use crate::health::HealthReporter;

/// Structured health events tracked during scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthEvent {
    BootstrapStarting,
    BootstrapSucceeded,
    BootstrapFailed(String),
    ListenerReady(Option<SocketAddr>),
    ListenerStopped,
}

/// Records health events for assertions.
#[derive(Debug, Default)]
pub struct RecordingHealthReporter {
    events: Mutex<Vec<HealthEvent>>,
}

impl RecordingHealthReporter {
    /// Captures a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<HealthEvent> {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .clone()
    }

    pub fn record(&self, event: HealthEvent) {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .push(event);
    }

    /// Polls until the listener reports ready and returns its TCP address,
    /// which is `None` for Unix sockets.
    pub fn wait_for_listener(&self, timeout: Duration) -> Result<Option<SocketAddr>, String> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            let ready = self.events().into_iter().find_map(|event| match event {
                HealthEvent::ListenerReady(addr) => Some(addr),
                _ => None,
            });
            if let Some(addr) = ready {
                return Ok(addr);
            }
            thread::sleep(Duration::from_millis(10));
        }
        Err(format!("listener did not report ready within {timeout:?}"))
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn bootstrap_starting(&self) {
        self.record(HealthEvent::BootstrapStarting);
    }

    fn bootstrap_succeeded(&self, _config: &Config) {
        self.record(HealthEvent::BootstrapSucceeded);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        self.record(HealthEvent::BootstrapFailed(error.to_string()));
    }

    fn listener_ready(&self, _endpoint: &SocketEndpoint, local_addr: Option<SocketAddr>) {
        self.record(HealthEvent::ListenerReady(local_addr));
    }

    fn listener_stopped(&self, _endpoint: &SocketEndpoint) {
        self.record(HealthEvent::ListenerStopped);
    }
}
