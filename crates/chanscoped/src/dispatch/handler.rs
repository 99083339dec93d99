//! Connection handler that runs one request/response cycle per connection.
//!
//! The handler reads the framed request, dispatches it, writes the encoded
//! response, and half-closes the stream. Framing failures drop the connection
//! without a reply; every other failure is answered with an `error` response.

use tracing::{debug, warn};

use crate::transport::{ConnectionHandler, ConnectionStream, read_request, write_response};
use crate::youtube::ChannelSource;

use super::router::{DISPATCH_TARGET, Dispatcher};

/// Connection handler that decodes and dispatches single requests.
#[derive(Debug)]
pub struct DispatchConnectionHandler<S> {
    dispatcher: Dispatcher<S>,
    max_request_bytes: usize,
}

impl<S: ChannelSource> DispatchConnectionHandler<S> {
    /// Creates a handler that rejects requests above `max_request_bytes`.
    pub fn new(dispatcher: Dispatcher<S>, max_request_bytes: usize) -> Self {
        Self {
            dispatcher,
            max_request_bytes,
        }
    }

    fn serve(&self, mut stream: ConnectionStream) {
        let message = match read_request(&mut stream, self.max_request_bytes) {
            Ok(message) => message,
            Err(error) => {
                warn!(target: DISPATCH_TARGET, %error, "dropping connection");
                return;
            }
        };

        let response = self.dispatcher.respond(&message);
        let payload = match response.encode() {
            Ok(payload) => payload,
            Err(error) => {
                warn!(target: DISPATCH_TARGET, %error, "failed to encode response");
                return;
            }
        };

        if let Err(error) = write_response(&mut stream, &payload) {
            warn!(target: DISPATCH_TARGET, %error, "failed to write response");
            return;
        }
        if let Err(error) = stream.shutdown_write() {
            debug!(target: DISPATCH_TARGET, %error, "peer closed before shutdown");
        }
    }
}

impl<S> ConnectionHandler for DispatchConnectionHandler<S>
where
    S: ChannelSource + 'static,
{
    fn handle(&self, stream: ConnectionStream) {
        self.serve(stream);
    }
}
