//! Service bootstrap orchestration.

use std::net::SocketAddr;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;

use chanscope_config::{Config, SocketEndpoint, SocketPreparationError};

use crate::dispatch::{DispatchConnectionHandler, DispatchOptions, Dispatcher};
use crate::health::HealthReporter;
use crate::telemetry::{self, TelemetryError, TelemetryHandle};
use crate::transport::{ListenerError, ListenerHandle, ServeOptions, SocketListener};
use crate::youtube::{ChannelSource, UpstreamError};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the service configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader that always yields the same, already resolved configuration.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps a resolved configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        #[source]
        source: TelemetryError,
    },
    /// Socket preparation failed.
    #[error("failed to prepare listener socket: {source}")]
    Socket {
        #[source]
        source: SocketPreparationError,
    },
    /// The channel data source could not be constructed.
    #[error("failed to initialise channel source: {source}")]
    Source {
        #[source]
        source: UpstreamError,
    },
}

/// Result of a successful bootstrap invocation.
pub struct Daemon<S> {
    config: Config,
    source: S,
    telemetry: TelemetryHandle,
    reporter: Arc<dyn HealthReporter>,
}

impl<S> Daemon<S> {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }
}

impl<S> Daemon<S>
where
    S: ChannelSource + 'static,
{
    /// Binds the configured endpoint and starts accepting connections.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError`] when the endpoint cannot be bound or the
    /// listener cannot switch to non-blocking mode.
    pub fn start(self) -> Result<RunningService, ListenerError> {
        let Self {
            config,
            source,
            reporter,
            ..
        } = self;
        let listener = SocketListener::bind(config.listen())?;
        let endpoint = listener.endpoint().clone();
        let local_addr = listener.local_addr();

        let dispatcher = Dispatcher::new(
            source,
            DispatchOptions {
                redact_diagnostics: config.redact_diagnostics(),
            },
        );
        let handler = Arc::new(DispatchConnectionHandler::new(
            dispatcher,
            config.max_request_bytes(),
        ));
        let handle = listener.start(handler, ServeOptions::from_config(&config))?;
        reporter.listener_ready(&endpoint, local_addr);

        Ok(RunningService {
            handle,
            endpoint,
            local_addr,
            reporter,
        })
    }
}

/// Service whose listener thread is accepting connections.
pub struct RunningService {
    handle: ListenerHandle,
    endpoint: SocketEndpoint,
    local_addr: Option<SocketAddr>,
    reporter: Arc<dyn HealthReporter>,
}

impl RunningService {
    /// Endpoint the listener was bound to.
    #[must_use]
    pub fn endpoint(&self) -> &SocketEndpoint {
        &self.endpoint
    }

    /// Bound address of a TCP listener; `None` for Unix sockets.
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Stops accepting connections and waits for the listener thread.
    ///
    /// Connections already handed to worker threads run to completion on
    /// their own.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::ThreadPanic`] if the listener thread panicked.
    pub fn stop(self) -> Result<(), ListenerError> {
        self.handle.shutdown();
        self.handle.join()?;
        self.reporter.listener_stopped(&self.endpoint);
        Ok(())
    }
}

/// Bootstraps the service using the supplied collaborators.
///
/// `connect` builds the channel source from the resolved configuration; the
/// production caller passes [`YouTubeClient::from_config`](crate::YouTubeClient::from_config).
pub fn bootstrap_with<S, F>(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
    connect: F,
) -> Result<Daemon<S>, BootstrapError>
where
    F: FnOnce(&Config) -> Result<S, UpstreamError>,
{
    reporter.bootstrap_starting();

    let config = match loader.load() {
        Ok(config) => config,
        Err(source) => {
            let error = BootstrapError::Configuration { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let telemetry = match telemetry::initialise(&config) {
        Ok(handle) => handle,
        Err(source) => {
            let error = BootstrapError::Telemetry { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    if let Err(source) = config.listen().prepare_filesystem() {
        let error = BootstrapError::Socket { source };
        reporter.bootstrap_failed(&error);
        return Err(error);
    }

    let source = match connect(&config) {
        Ok(source) => source,
        Err(source) => {
            let error = BootstrapError::Source { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    reporter.bootstrap_succeeded(&config);
    Ok(Daemon {
        config,
        source,
        telemetry,
        reporter,
    })
}
