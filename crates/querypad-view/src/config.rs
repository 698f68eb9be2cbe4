//! Viewer tuning: activation threshold, line geometry, buffer margin, search.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Line count at which windowed rendering takes over.
pub const DEFAULT_ACTIVATION_THRESHOLD: usize = 5_000;
/// Fixed height of one rendered line, in CSS pixels.
pub const DEFAULT_LINE_HEIGHT_PX: f64 = 18.0;
/// Lines rendered above and below the visible range.
pub const DEFAULT_BUFFER_LINES: usize = 30;

/// Search tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    /// Match letter case exactly. Off by default.
    pub case_sensitive: bool,
}

/// Tuning knobs for [`TextViewer`](crate::TextViewer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerConfig {
    /// Documents with at least this many lines are rendered windowed.
    pub activation_threshold: usize,
    /// Fixed per-line height used for all scroll geometry.
    pub line_height_px: f64,
    /// Extra lines materialized on each side of the visible range to avoid
    /// gaps during fast scrolling.
    pub buffer_lines: usize,
    /// Default search behavior for [`TextViewer::search`](crate::TextViewer::search).
    pub search: SearchConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            activation_threshold: DEFAULT_ACTIVATION_THRESHOLD,
            line_height_px: DEFAULT_LINE_HEIGHT_PX,
            buffer_lines: DEFAULT_BUFFER_LINES,
            search: SearchConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Parse a JSON configuration document and validate it.
    ///
    /// Missing fields take their defaults; unknown fields are ignored.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject geometry the window calculator cannot divide by.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.line_height_px.is_finite() || self.line_height_px <= 0.0 {
            return Err(ConfigError::InvalidLineHeight(self.line_height_px));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_activation_threshold(mut self, lines: usize) -> Self {
        self.activation_threshold = lines;
        self
    }

    #[must_use]
    pub fn with_line_height_px(mut self, px: f64) -> Self {
        self.line_height_px = px;
        self
    }

    #[must_use]
    pub fn with_buffer_lines(mut self, lines: usize) -> Self {
        self.buffer_lines = lines;
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }
}
