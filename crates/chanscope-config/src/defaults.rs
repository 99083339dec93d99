use crate::logging::LogFormat;
use crate::serve::ServeMode;
use crate::socket::SocketEndpoint;

/// Default TCP host for the service listener.
pub const DEFAULT_TCP_HOST: &str = "127.0.0.1";

/// Default TCP port for the service listener.
pub const DEFAULT_TCP_PORT: u16 = 65433;

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default ceiling on a single request message.
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 1024 * 1024;

/// Default YouTube Data API location.
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Default timeout for each upstream HTTP request, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Default log filter expression used by the binaries.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binaries.
pub fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Default connection scheduling mode.
pub fn default_serve_mode() -> ServeMode {
    ServeMode::Concurrent
}

/// Computes the default listener endpoint.
pub fn default_listen_endpoint() -> SocketEndpoint {
    SocketEndpoint::tcp(DEFAULT_TCP_HOST, DEFAULT_TCP_PORT)
}

/// Default ceiling on a single request message.
pub fn default_max_request_bytes() -> usize {
    DEFAULT_MAX_REQUEST_BYTES
}

/// Owned API base URL used by serde defaults.
pub fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_owned()
}

/// Default timeout for each upstream HTTP request, in seconds.
pub fn default_http_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}
