//! Reading and writing documents.
//!
//! Files are read line by line; the buffer text is the lines joined with `"\n"` and never
//! gets a trailing separator. Saving splits the buffer on `"\n"` and joins with the requested
//! [`LineEnding`].

use crate::error::EditError;
use crate::line_ending::LineEnding;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

fn io_error(path: &Path, source: std::io::Error) -> EditError {
    tracing::warn!(path = %path.display(), "file I/O failed: {source}");
    EditError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read `path` into a list of lines without their terminators (`"\n"` or `"\r\n"`).
pub fn read_lines(path: &Path) -> Result<Vec<String>, EditError> {
    let file = File::open(path).map_err(|err| io_error(path, err))?;
    let lines = BufReader::new(file)
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| io_error(path, err))?;
    tracing::debug!(path = %path.display(), lines = lines.len(), "read document");
    Ok(lines)
}

/// Write LF-separated `text` to `path` using `line_ending` between lines.
pub fn write_text(path: &Path, text: &str, line_ending: LineEnding) -> Result<(), EditError> {
    std::fs::write(path, line_ending.apply_to_text(text)).map_err(|err| io_error(path, err))?;
    tracing::debug!(path = %path.display(), ?line_ending, "wrote document");
    Ok(())
}
