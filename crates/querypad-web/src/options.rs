//! Host options passed to the JS constructor as a JSON string.
//!
//! Viewer tuning fields sit at the top level next to DOM-only fields:
//!
//! ```json
//! { "activationThreshold": 5000, "lineHeightPx": 18, "bufferLines": 30,
//!   "search": { "caseSensitive": false }, "blockClass": "result-lines" }
//! ```

use querypad_view::{ConfigError, ViewerConfig};
use serde::Deserialize;

/// CSS class given to the materialized block when the host sets none.
pub const DEFAULT_BLOCK_CLASS: &str = "qp-block";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerOptions {
    #[serde(flatten)]
    pub viewer: ViewerConfig,
    /// Class attribute of the element holding the rendered lines.
    pub block_class: String,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            viewer: ViewerConfig::default(),
            block_class: DEFAULT_BLOCK_CLASS.to_owned(),
        }
    }
}

impl ViewerOptions {
    /// Parse options; `None` or a blank string yields the defaults.
    pub fn parse(json: Option<&str>) -> Result<Self, ConfigError> {
        let Some(json) = json.filter(|s| !s.trim().is_empty()) else {
            return Ok(Self::default());
        };
        let options: Self = serde_json::from_str(json)?;
        options.viewer.validate()?;
        Ok(options)
    }
}
