//! Failures raised by channel data sources.

use thiserror::Error;

/// Errors surfaced while talking to the YouTube Data API.
///
/// None of the variants carry request URLs, so the API key never reaches a
/// client-visible diagnostic.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The client was built without an API key.
    #[error("no YouTube API key configured")]
    MissingApiKey,

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },

    /// No channel matched the query.
    #[error("no channel found for '{query}'")]
    ChannelNotFound { query: String },

    /// The request did not complete.
    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    #[error("{endpoint} request returned HTTP {status}: {message}")]
    Status {
        endpoint: &'static str,
        status: u16,
        message: String,
    },

    /// The API answered with a body that does not match its schema.
    #[error("{endpoint} response could not be decoded: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A field the operation depends on was absent.
    #[error("{endpoint} response is missing {field}")]
    MissingField {
        endpoint: &'static str,
        field: &'static str,
    },

    /// A statistics field held something other than a decimal count.
    #[error("{field} value '{value}' is not a valid count")]
    InvalidCount { field: &'static str, value: String },

    /// More results were requested than one API page can hold.
    #[error("requested {requested} videos but at most {max} can be fetched")]
    TooManyResults { requested: u32, max: u32 },
}
