use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How the listener schedules accepted connections.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ServeMode {
    /// Each connection is handled on its own thread.
    #[default]
    Concurrent,
    /// Connections are handled one at a time on the accept thread.
    Sequential,
}

/// Errors encountered while parsing a [`ServeMode`] from text.
pub type ServeModeParseError = strum::ParseError;
