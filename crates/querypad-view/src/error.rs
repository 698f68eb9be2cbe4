//! Error types.
//!
//! Rendering, searching and navigation never fail; out-of-range inputs are
//! clamped and empty inputs produce empty results. Only configuration supplied
//! by the host can be rejected.

use std::fmt;

/// A rejected [`ViewerConfig`](crate::ViewerConfig).
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `line_height_px` must be finite and strictly positive.
    InvalidLineHeight(f64),
    /// The configuration document could not be parsed.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLineHeight(px) => {
                write!(f, "line height must be a positive number of pixels, got {px}")
            }
            Self::Parse(msg) => write!(f, "invalid viewer configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
