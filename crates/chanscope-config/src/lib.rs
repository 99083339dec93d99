//! Shared configuration for the chanscope service.
//!
//! Values are layered by [`ortho_config`]: built-in defaults, then an optional
//! TOML file (`--config-path` or `CHANSCOPE_CONFIG_PATH`), then `CHANSCOPE_*`
//! environment variables, then command-line flags.

mod defaults;
mod logging;
mod serve;
mod socket;

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_API_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_LOG_FILTER, DEFAULT_MAX_REQUEST_BYTES,
    DEFAULT_TCP_HOST, DEFAULT_TCP_PORT, default_api_base_url, default_http_timeout_secs,
    default_listen_endpoint, default_log_filter, default_log_filter_string, default_log_format,
    default_max_request_bytes, default_serve_mode,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use serve::{ServeMode, ServeModeParseError};
pub use socket::{SocketEndpoint, SocketParseError, SocketPreparationError};

/// Resolved service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "CHANSCOPE")]
pub struct Config {
    /// Endpoint the service listens on.
    #[serde(default = "default_listen_endpoint")]
    pub listen: SocketEndpoint,
    /// Tracing filter expression.
    #[serde(default = "default_log_filter_string")]
    pub log_filter: String,
    /// Log output format.
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
    /// Whether connections are served one at a time or on their own threads.
    #[serde(default = "default_serve_mode")]
    pub serve_mode: ServeMode,
    /// Upper bound on the size of a single request message.
    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: usize,
    /// Read and write deadline applied to accepted connections.
    #[serde(default)]
    pub connection_timeout_secs: Option<u64>,
    /// YouTube Data API developer key.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL of the YouTube Data API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Timeout for each upstream HTTP request.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    /// Replace upstream diagnostics with a generic message in responses.
    #[serde(default)]
    pub redact_diagnostics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: default_listen_endpoint(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            serve_mode: default_serve_mode(),
            max_request_bytes: default_max_request_bytes(),
            connection_timeout_secs: None,
            api_key: None,
            api_base_url: default_api_base_url(),
            http_timeout_secs: default_http_timeout_secs(),
            redact_diagnostics: false,
        }
    }
}

impl Config {
    /// Endpoint the service listens on.
    #[must_use]
    pub fn listen(&self) -> &SocketEndpoint {
        &self.listen
    }

    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Connection scheduling mode.
    #[must_use]
    pub fn serve_mode(&self) -> ServeMode {
        self.serve_mode
    }

    /// Upper bound on the size of a single request message.
    #[must_use]
    pub fn max_request_bytes(&self) -> usize {
        self.max_request_bytes
    }

    /// Deadline for connection reads and writes, if any.
    #[must_use]
    pub fn connection_timeout(&self) -> Option<Duration> {
        self.connection_timeout_secs.map(Duration::from_secs)
    }

    /// API key, ignoring blank values.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Base URL of the YouTube Data API without a trailing slash.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    /// Timeout for each upstream HTTP request.
    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Whether diagnostics are hidden from clients.
    #[must_use]
    pub fn redact_diagnostics(&self) -> bool {
        self.redact_diagnostics
    }
}
