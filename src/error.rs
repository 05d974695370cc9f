//! Crate-level error types.

use std::fmt;

use crate::grid::GridSize;

/// Errors produced by the kinesis crate.
#[derive(Debug)]
pub enum KinesisError {
    /// No animation is registered under the requested name.
    UnknownAnimation {
        /// Name that was requested.
        name: String,
        /// Names that are registered.
        available: Vec<&'static str>,
    },
    /// A frame or target grid did not match the rig's dimensions.
    DimensionMismatch {
        /// What produced the grid (animation name or collaborator).
        origin: String,
        /// Dimensions the rig expects.
        expected: GridSize,
        /// Dimensions that were received.
        found: GridSize,
    },
    /// A grid was built from ragged or empty rows.
    MalformedGrid(String),
    /// Options failed validation.
    InvalidOptions(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to encode a frame for a recording.
    Recording(serde_json::Error),
}

impl fmt::Display for KinesisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAnimation { name, available } => {
                write!(
                    f,
                    "unknown animation '{name}' (available: {})",
                    available.join(", ")
                )
            }
            Self::DimensionMismatch {
                origin,
                expected,
                found,
            } => write!(
                f,
                "{origin} produced a {found} grid, rig is {expected}"
            ),
            Self::MalformedGrid(msg) => write!(f, "malformed grid: {msg}"),
            Self::InvalidOptions(msg) => write!(f, "invalid options: {msg}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Recording(e) => write!(f, "frame recording error: {e}"),
        }
    }
}

impl std::error::Error for KinesisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Recording(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for KinesisError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for KinesisError {
    fn from(e: serde_json::Error) -> Self {
        Self::Recording(e)
    }
}
