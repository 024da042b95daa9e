//! Editor preferences.
//!
//! Settings are a plain value handed to [`crate::EditCoordinator::with_settings`]; nothing is
//! read from process-wide state.

use crate::error::EditError;
use crate::undo::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};

/// Default document size (in characters) above which re-highlighting after undo/redo is
/// deferred to the next [`crate::EditCoordinator::tick`].
pub const DEFAULT_LARGE_DOCUMENT_THRESHOLD: usize = 100_000;

/// Preferences that drive the editing pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Indent unit width in spaces.
    pub indent_width: usize,
    /// Maximum number of undo breakpoints kept.
    pub history_limit: usize,
    /// Size above which post-undo highlighting is deferred.
    pub large_document_threshold: usize,
    /// Run curly-bracket auto-indentation on typed newlines and braces.
    pub auto_indent: bool,
    /// Run incremental highlighting.
    pub highlighting: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            indent_width: 4,
            history_limit: DEFAULT_HISTORY_LIMIT,
            large_document_threshold: DEFAULT_LARGE_DOCUMENT_THRESHOLD,
            auto_indent: true,
            highlighting: true,
        }
    }
}

impl EditorSettings {
    /// Parse settings from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, EditError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, EditError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
