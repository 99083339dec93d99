//! Request decoding for the dispatch loop.
//!
//! A request is a JSON object carrying a `method` field plus method-specific
//! arguments at the top level, e.g. `{"method":"subs","channel_id":"UC123"}`.

use serde_json::{Map, Value};

use super::errors::DispatchError;

/// Decoded client request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    fields: Map<String, Value>,
}

impl Request {
    /// Decodes a request message.
    ///
    /// Surrounding ASCII whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MalformedRequest`] if the message is empty,
    /// not valid UTF-8 JSON, or not a JSON object.
    pub fn decode(bytes: &[u8]) -> Result<Self, DispatchError> {
        let trimmed = bytes.trim_ascii();
        if trimmed.is_empty() {
            return Err(DispatchError::malformed("empty request"));
        }

        match serde_json::from_slice(trimmed).map_err(DispatchError::from_json_error)? {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(DispatchError::malformed(format!(
                "expected a JSON object, found {}",
                value_kind(&other)
            ))),
        }
    }

    /// Builds a request from already decoded fields.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// The `method` field, if present and a string.
    pub fn method(&self) -> Option<&str> {
        self.fields.get("method").and_then(Value::as_str)
    }

    /// Looks up an argument by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Short JSON type name used in error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
