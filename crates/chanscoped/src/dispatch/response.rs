//! Response encoding for the dispatch loop.
//!
//! Responses always carry exactly two top-level fields:
//!
//! ```json
//! {"type":"success","data":{"subscribers":42}}
//! {"type":"error","data":{"error":"method not found"}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outcome of a single request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "data",
    rename_all = "snake_case",
    deny_unknown_fields
)]
pub enum Response {
    /// The operation's result payload.
    Success(Map<String, Value>),
    /// A failure description.
    Error(ErrorBody),
}

/// Payload of an `error` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorBody {
    pub error: String,
}

impl Response {
    /// Wraps an operation result.
    ///
    /// # Errors
    ///
    /// Fails when the result does not serialize to a JSON object.
    pub fn success<T: Serialize>(result: &T) -> Result<Self, serde_json::Error> {
        use serde::ser::Error as _;

        match serde_json::to_value(result)? {
            Value::Object(data) => Ok(Self::Success(data)),
            _ => Err(serde_json::Error::custom(
                "operation result must serialize to an object",
            )),
        }
    }

    /// Builds an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ErrorBody {
            error: message.into(),
        })
    }

    /// Returns `true` for `success` responses.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Encodes the response as UTF-8 JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; a response built from JSON values does
    /// not produce one in practice.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decodes a response as a client would.
    ///
    /// # Errors
    ///
    /// Fails on invalid JSON or on anything but the two-field shape.
    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
