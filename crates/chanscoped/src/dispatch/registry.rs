//! Static table of the operations the service exposes.
//!
//! Each [`OperationDescriptor`] names its required string arguments and its
//! optional count argument. Binding a descriptor to a [`Request`] validates
//! the arguments and produces an [`Invocation`] ready to execute.

use serde_json::Value;

use super::errors::DispatchError;
use super::request::{Request, value_kind};

/// Default number of videos returned by `videos`.
pub const DEFAULT_VIDEO_COUNT: u32 = 10;

/// Operations known to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Resolve a channel URL to its identifier.
    Channel,
    /// Fetch a channel's subscriber count.
    Subs,
    /// Fetch a channel's most recent videos.
    Videos,
}

impl Method {
    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Channel => "channel",
            Self::Subs => "subs",
            Self::Videos => "videos",
        }
    }
}

/// Optional integer argument with a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionalArgument {
    pub name: &'static str,
    pub default: u32,
}

/// Argument shape of a single operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub method: Method,
    pub required: &'static [&'static str],
    pub optional: Option<OptionalArgument>,
}

/// Validated call ready for the channel source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Channel { channel_url: String },
    Subs { channel_id: String },
    Videos { channel_id: String, count: u32 },
}

const STANDARD_OPERATIONS: &[OperationDescriptor] = &[
    OperationDescriptor {
        method: Method::Channel,
        required: &["channel_url"],
        optional: None,
    },
    OperationDescriptor {
        method: Method::Subs,
        required: &["channel_id"],
        optional: None,
    },
    OperationDescriptor {
        method: Method::Videos,
        required: &["channel_id"],
        optional: Some(OptionalArgument {
            name: "count",
            default: DEFAULT_VIDEO_COUNT,
        }),
    },
];

/// Immutable method table shared by every connection.
#[derive(Debug, Clone, Copy)]
pub struct OperationRegistry {
    operations: &'static [OperationDescriptor],
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl OperationRegistry {
    /// The `channel`, `subs`, and `videos` operations.
    pub fn standard() -> Self {
        Self {
            operations: STANDARD_OPERATIONS,
        }
    }

    /// Finds the descriptor for `method`. Matching is exact and
    /// case-sensitive.
    pub fn lookup(&self, method: &str) -> Option<&'static OperationDescriptor> {
        self.operations
            .iter()
            .find(|descriptor| descriptor.method.as_str() == method)
    }

    /// Iterates over the registered operations.
    pub fn operations(&self) -> impl Iterator<Item = &'static OperationDescriptor> {
        self.operations.iter()
    }
}

impl OperationDescriptor {
    /// Extracts and validates this operation's arguments from a request.
    ///
    /// All required arguments are checked for presence before any value is
    /// inspected, so a missing argument always wins over a malformed one.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MissingArgument`] when a required argument is
    /// absent and [`DispatchError::InvalidArgument`] when a value has the
    /// wrong type or range.
    pub fn bind(&self, request: &Request) -> Result<Invocation, DispatchError> {
        if let Some(name) = self
            .required
            .iter()
            .copied()
            .find(|name| request.field(name).is_none())
        {
            return Err(DispatchError::MissingArgument { name });
        }

        let count = match self.optional {
            Some(optional) => match request.field(optional.name) {
                Some(value) => coerce_count(optional.name, value)?,
                None => optional.default,
            },
            None => 0,
        };

        match self.method {
            Method::Channel => Ok(Invocation::Channel {
                channel_url: string_argument(request, "channel_url")?,
            }),
            Method::Subs => Ok(Invocation::Subs {
                channel_id: string_argument(request, "channel_id")?,
            }),
            Method::Videos => Ok(Invocation::Videos {
                channel_id: string_argument(request, "channel_id")?,
                count,
            }),
        }
    }
}

fn string_argument(request: &Request, name: &'static str) -> Result<String, DispatchError> {
    match request.field(name) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(other) => Err(DispatchError::invalid_argument(
            name,
            format!("expected a string, found {}", value_kind(other)),
        )),
        None => Err(DispatchError::MissingArgument { name }),
    }
}

/// Coerces a count argument to a non-negative integer.
///
/// Accepts JSON integers, finite numbers (truncated toward zero), and strings
/// holding a decimal integer.
pub(crate) fn coerce_count(name: &'static str, value: &Value) -> Result<u32, DispatchError> {
    let out_of_range = || DispatchError::invalid_argument(name, "value is out of range");
    let negative = || DispatchError::invalid_argument(name, "value must not be negative");

    match value {
        Value::Number(number) => {
            if let Some(unsigned) = number.as_u64() {
                u32::try_from(unsigned).map_err(|_| out_of_range())
            } else if number.as_i64().is_some() {
                Err(negative())
            } else {
                let float = number.as_f64().unwrap_or(f64::NAN);
                if !float.is_finite() {
                    return Err(DispatchError::invalid_argument(
                        name,
                        "expected a finite number",
                    ));
                }
                let truncated = float.trunc();
                if truncated < 0.0 {
                    Err(negative())
                } else if truncated > f64::from(u32::MAX) {
                    Err(out_of_range())
                } else {
                    #[expect(
                        clippy::cast_possible_truncation,
                        clippy::cast_sign_loss,
                        reason = "range checked above"
                    )]
                    let count = truncated as u32;
                    Ok(count)
                }
            }
        }
        Value::String(text) => {
            let parsed: i64 = text.trim().parse().map_err(|_| {
                DispatchError::invalid_argument(
                    name,
                    format!("'{text}' is not an integer"),
                )
            })?;
            if parsed < 0 {
                return Err(negative());
            }
            u32::try_from(parsed).map_err(|_| out_of_range())
        }
        other => Err(DispatchError::invalid_argument(
            name,
            format!("expected an integer, found {}", value_kind(other)),
        )),
    }
}
