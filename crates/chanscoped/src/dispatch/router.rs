//! Method routing and failure classification.
//!
//! The [`Dispatcher`] turns every request into exactly one [`Response`].
//! Nothing it calls can make it fail: unknown methods, bad arguments and
//! upstream failures all become `error` responses.

use tracing::{debug, info, warn};

use crate::youtube::ChannelSource;

use super::errors::DispatchError;
use super::registry::{Invocation, OperationRegistry};
use super::request::Request;
use super::response::Response;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Label used in diagnostics for failures that happen before a method is
/// known.
const REQUEST_LABEL: &str = "request";

/// Dispatcher behaviour switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Replace diagnostic text in client responses with a generic message.
    pub redact_diagnostics: bool,
}

/// Routes requests to the channel source.
#[derive(Debug)]
pub struct Dispatcher<S> {
    source: S,
    registry: OperationRegistry,
    options: DispatchOptions,
}

impl<S: ChannelSource> Dispatcher<S> {
    /// Creates a dispatcher over the standard operation table.
    pub fn new(source: S, options: DispatchOptions) -> Self {
        Self {
            source,
            registry: OperationRegistry::standard(),
            options,
        }
    }

    /// Decodes raw request bytes and dispatches them.
    ///
    /// Decode failures become `malformed request` error responses.
    pub fn respond(&self, message: &[u8]) -> Response {
        match Request::decode(message) {
            Ok(request) => self.dispatch(&request),
            Err(error) => {
                warn!(target: DISPATCH_TARGET, %error, "rejecting malformed request");
                Response::error(error.client_message(REQUEST_LABEL, self.options.redact_diagnostics))
            }
        }
    }

    /// Dispatches a decoded request.
    pub fn dispatch(&self, request: &Request) -> Response {
        let Some(descriptor) = request
            .method()
            .and_then(|method| self.registry.lookup(method))
        else {
            let method = request.method().unwrap_or_default();
            return self.failure(method, &DispatchError::MethodNotFound);
        };

        let method = descriptor.method.as_str();
        debug!(target: DISPATCH_TARGET, method, "dispatching request");
        match descriptor
            .bind(request)
            .and_then(|invocation| self.execute(&invocation))
        {
            Ok(response) => {
                info!(target: DISPATCH_TARGET, method, outcome = "success", "request handled");
                response
            }
            Err(error) => self.failure(method, &error),
        }
    }

    fn execute(&self, invocation: &Invocation) -> Result<Response, DispatchError> {
        let response = match invocation {
            Invocation::Channel { channel_url } => {
                Response::success(&self.source.resolve_channel_id(channel_url)?)
            }
            Invocation::Subs { channel_id } => {
                Response::success(&self.source.subscriber_count(channel_id)?)
            }
            Invocation::Videos { channel_id, count } => {
                Response::success(&self.source.recent_videos(channel_id, *count)?)
            }
        };
        response.map_err(DispatchError::EncodeResult)
    }

    fn failure(&self, method: &str, error: &DispatchError) -> Response {
        if error.is_diagnostic() {
            warn!(
                target: DISPATCH_TARGET,
                method,
                outcome = "failed",
                diagnostic = %error.diagnostic(method),
                "operation failed"
            );
        } else {
            let outcome = match error {
                DispatchError::MethodNotFound => "method_not_found",
                _ => "wrong_args",
            };
            info!(target: DISPATCH_TARGET, method, outcome, %error, "request rejected");
        }
        Response::error(error.client_message(method, self.options.redact_diagnostics))
    }
}
