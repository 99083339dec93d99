//! Error types for request dispatch failures.
//!
//! Every variant is converted into an `error` response before it reaches the
//! transport; [`DispatchError::client_message`] decides what text the client
//! sees.

use std::error::Error as StdError;

use thiserror::Error;

use crate::youtube::UpstreamError;

/// Client-visible text for an unrecognised or absent method.
pub const METHOD_NOT_FOUND: &str = "method not found";
/// Client-visible text for a request missing a required argument.
pub const WRONG_ARGS: &str = "Wrong args";
/// Replacement text used when diagnostics are redacted.
pub const REDACTED_DIAGNOSTIC: &str = "internal error";

/// Errors surfaced during request decoding and dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The `method` field is absent, not a string, or not registered.
    #[error("method not found")]
    MethodNotFound,

    /// A required argument is absent from the request.
    #[error("missing required argument '{name}'")]
    MissingArgument { name: &'static str },

    /// An argument is present but cannot be used as the operation expects.
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// The request bytes are not a JSON object.
    #[error("malformed request: {message}")]
    MalformedRequest {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// The channel data source failed.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The operation result could not be converted into response data.
    #[error("failed to encode result: {0}")]
    EncodeResult(#[source] serde_json::Error),
}

impl DispatchError {
    /// Creates a malformed request error from a JSON parse failure.
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::MalformedRequest {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates a malformed request error with a custom message.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRequest {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Returns `true` for failures reported through the diagnostic path.
    pub fn is_diagnostic(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. } | Self::Upstream(_) | Self::EncodeResult(_)
        )
    }

    /// Text placed in the response's `error` field.
    ///
    /// Method and argument failures use fixed strings. Diagnostic failures
    /// carry [`DispatchError::diagnostic`] unless `redact` is set.
    pub fn client_message(&self, method: &str, redact: bool) -> String {
        match self {
            Self::MethodNotFound => METHOD_NOT_FOUND.to_owned(),
            Self::MissingArgument { .. } => WRONG_ARGS.to_owned(),
            Self::MalformedRequest { .. } => self.to_string(),
            Self::InvalidArgument { .. } | Self::Upstream(_) | Self::EncodeResult(_) => {
                if redact {
                    REDACTED_DIAGNOSTIC.to_owned()
                } else {
                    self.diagnostic(method)
                }
            }
        }
    }

    /// Full description of the failure: the method, the error, and each
    /// source in the chain not already spelled out by its parent.
    pub fn diagnostic(&self, method: &str) -> String {
        let mut text = format!("{method}: {self}");
        let mut source: Option<&(dyn StdError + 'static)> = self.source();
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !text.ends_with(&cause_text) {
                text.push_str(": ");
                text.push_str(&cause_text);
            }
            source = cause.source();
        }
        text
    }
}
