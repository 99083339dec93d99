//! Request dispatch for the channel statistics service.
//!
//! Each connection carries a single JSON request:
//!
//! ```json
//! {"method":"videos","channel_id":"UC123","count":2}
//! ```
//!
//! The [`Dispatcher`] looks the method up in the [`OperationRegistry`],
//! validates its arguments, calls the [`ChannelSource`](crate::ChannelSource),
//! and answers with a single [`Response`]:
//!
//! ```json
//! {"type":"success","data":{"videos":[...]}}
//! {"type":"error","data":{"error":"Wrong args"}}
//! ```
//!
//! ## Failure classes
//!
//! - Absent or unknown `method`: `"method not found"`.
//! - A required argument missing: `"Wrong args"`.
//! - Anything else the operation raises: a diagnostic naming the method and
//!   the failure chain, or `"internal error"` when diagnostics are redacted.
//! - Undecodable input: `"malformed request: ..."`.
//!
//! Read and write failures on the connection never produce a response.

mod errors;
mod handler;
mod registry;
mod request;
mod response;
mod router;

pub(crate) use self::handler::DispatchConnectionHandler;
pub use self::errors::{DispatchError, METHOD_NOT_FOUND, REDACTED_DIAGNOSTIC, WRONG_ARGS};
pub use self::registry::{
    DEFAULT_VIDEO_COUNT, Invocation, Method, OperationDescriptor, OperationRegistry,
    OptionalArgument,
};
pub use self::request::Request;
pub use self::response::{ErrorBody, Response};
pub use self::router::{DispatchOptions, Dispatcher};
