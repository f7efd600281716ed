//! Editor tuning knobs.
//!
//! # Responsibility
//! - Hold layout offsets and input caps used by the graph store and
//!   catalog.
//! - Allow hosts to override defaults from a JSON object.
//!
//! # Invariants
//! - Missing keys fall back to `EditorConfig::default()`.
//! - Caps are counted in Unicode scalar values, not bytes.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Layout, paste and input-length settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Horizontal distance between a parent and its children.
    pub child_offset_x: f64,
    /// Vertical distance between a parent and its first pair of children.
    pub child_offset_y: f64,
    /// Extra vertical distance for each further pair of children.
    pub child_row_step: f64,
    /// Offset applied on both axes to pasted and duplicated nodes.
    pub paste_offset: f64,
    /// Suffix appended to labels of pasted and duplicated nodes.
    pub copy_suffix: String,
    pub label_max_chars: usize,
    pub comment_max_chars: usize,
    /// Number of entries kept in the recent-maps list.
    pub recent_maps_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            child_offset_x: 250.0,
            child_offset_y: 200.0,
            child_row_step: 150.0,
            paste_offset: 50.0,
            copy_suffix: " (Copy)".to_string(),
            label_max_chars: 500,
            comment_max_chars: 200,
            recent_maps_limit: 10,
        }
    }
}

/// Error returned when an override document cannot be applied.
#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    /// A cap or limit was set to zero.
    ZeroLimit(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid editor config: {err}"),
            Self::ZeroLimit(field) => write!(f, "editor config `{field}` must be > 0"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::ZeroLimit(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl EditorConfig {
    /// Parses a JSON override object on top of the defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects zero caps, which would make every edit a no-op.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.label_max_chars == 0 {
            return Err(ConfigError::ZeroLimit("labelMaxChars"));
        }
        if self.comment_max_chars == 0 {
            return Err(ConfigError::ZeroLimit("commentMaxChars"));
        }
        if self.recent_maps_limit == 0 {
            return Err(ConfigError::ZeroLimit("recentMapsLimit"));
        }
        Ok(())
    }
}

/// Truncates `value` to at most `max_chars` characters.
pub(crate) fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}
