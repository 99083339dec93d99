//! Socket transport for the service.
//!
//! The listener binds the configured endpoint and accepts connections on a
//! background thread. Each accepted stream carries exactly one request and
//! one response; the framer in [`framing`] delimits them.

mod errors;
mod framing;
mod handler;
mod listener;
#[cfg(test)]
mod test_utils;

pub use self::errors::{FramingError, ListenerError};
#[cfg(test)]
pub(crate) use self::framing::READ_CHUNK_BYTES;
pub(crate) use self::framing::{read_request, write_response};
pub(crate) use self::handler::{ConnectionHandler, ConnectionStream};
pub(crate) use self::listener::{ListenerHandle, ServeOptions, SocketListener};
#[cfg(test)]
pub(crate) use self::test_utils::CountingHandler;

const LISTENER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");
