//! Error types.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced by the edit-coordination engine.
///
/// Undo/redo with nothing to replay is not an error; those calls simply report `false`.
pub enum EditError {
    #[error("position {position} is out of range (document length {len})")]
    /// An edit addressed a position past the end of the document.
    PositionOutOfRange {
        /// The requested character offset.
        position: usize,
        /// Document length in characters.
        len: usize,
    },

    #[error("invalid indent unit {0:?}: expected one or more spaces")]
    /// An indent unit was empty or contained characters other than spaces.
    InvalidIndentUnit(String),

    #[error("I/O error on {}: {source}", path.display())]
    /// Reading or writing a document failed.
    Io {
        /// The file being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    #[error("settings parse error: {0}")]
    /// Editor settings could not be deserialized.
    Settings(#[from] serde_json::Error),
}
