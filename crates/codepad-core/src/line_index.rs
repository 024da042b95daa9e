//! Logical line index.
//!
//! Tracks the character offset at which every line starts. Edits update the table from the
//! edit content alone (newlines inserted or removed), so typing never rescans the document.
//! Each update reports a [`LineCountChange`] that a line-number gutter can apply by appending
//! or dropping entries instead of redrawing from scratch.

use crate::edit::{Edit, EditKind};
use std::ops::Range;

/// How the number of lines changed after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCountChange {
    /// Same number of lines.
    Unchanged,
    /// Lines were added at the end of the gutter.
    Grew {
        /// Line count before the update.
        from: usize,
        /// Line count after the update.
        to: usize,
    },
    /// Lines were dropped from the end of the gutter.
    Shrank {
        /// Line count before the update.
        from: usize,
        /// Line count after the update.
        to: usize,
    },
}

impl LineCountChange {
    pub(crate) fn between(from: usize, to: usize) -> Self {
        match from.cmp(&to) {
            std::cmp::Ordering::Equal => Self::Unchanged,
            std::cmp::Ordering::Less => Self::Grew { from, to },
            std::cmp::Ordering::Greater => Self::Shrank { from, to },
        }
    }

    /// Zero-based line numbers that must be appended to a gutter.
    pub fn appended(&self) -> Range<usize> {
        match *self {
            Self::Grew { from, to } => from..to,
            _ => 0..0,
        }
    }

    /// Number of gutter entries that must be removed from the end.
    pub fn removed(&self) -> usize {
        match *self {
            Self::Shrank { from, to } => from - to,
            _ => 0,
        }
    }

    /// Returns `true` if the line count did not change.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

/// Line start table (character offsets).
///
/// An empty document has one line; `N` newlines make `N + 1` lines, matching
/// `str::split('\n')`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// `line_starts[i]` is the offset of the first character of line `i`. Never empty.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Index of an empty document.
    pub fn new() -> Self {
        Self {
            line_starts: vec![0],
        }
    }

    /// Build the index for `text`.
    pub fn from_text(text: &str) -> Self {
        let mut index = Self::new();
        index.rebuild(text);
        index
    }

    fn rebuild(&mut self, text: &str) {
        self.line_starts.clear();
        self.line_starts.push(0);
        self.line_starts.extend(
            text.chars()
                .enumerate()
                .filter(|(_, ch)| *ch == '\n')
                .map(|(i, _)| i + 1),
        );
    }

    /// Recompute the whole index from `text`.
    ///
    /// Used as the catch-up pass after a bulk load.
    pub fn update(&mut self, text: &str) -> LineCountChange {
        let before = self.line_count();
        self.rebuild(text);
        LineCountChange::between(before, self.line_count())
    }

    /// Update the index for an edit that has just been applied to the buffer.
    pub fn apply_edit(&mut self, edit: &Edit) -> LineCountChange {
        let before = self.line_count();
        let pos = edit.position;
        let len = edit.char_len();
        // Starts equal to `pos` stay put: text inserted at a line start belongs to that line.
        let first_after = self.line_starts.partition_point(|&s| s <= pos);

        match edit.kind {
            EditKind::Insert => {
                for start in &mut self.line_starts[first_after..] {
                    *start += len;
                }
                let new_starts: Vec<usize> = edit
                    .content
                    .chars()
                    .enumerate()
                    .filter(|(_, ch)| *ch == '\n')
                    .map(|(i, _)| pos + i + 1)
                    .collect();
                if !new_starts.is_empty() {
                    self.line_starts.splice(first_after..first_after, new_starts);
                }
            }
            EditKind::Remove => {
                // Lines whose preceding newline was removed start in (pos, pos + len].
                let removed_end = self.line_starts.partition_point(|&s| s <= pos + len);
                self.line_starts.drain(first_after..removed_end);
                for start in &mut self.line_starts[first_after..] {
                    *start -= len;
                }
            }
        }

        debug_assert_eq!(self.line_starts.first(), Some(&0));
        LineCountChange::between(before, self.line_count())
    }

    /// Total line count (at least 1).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Start offset of `line`.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Exclusive end offset of `line`'s content (the position of its newline, or `doc_len` for
    /// the last line).
    pub fn line_end(&self, line: usize, doc_len: usize) -> usize {
        match self.line_starts.get(line + 1) {
            Some(next) => next - 1,
            None => doc_len,
        }
    }

    /// Content range of `line` (without the newline).
    pub fn line_range(&self, line: usize, doc_len: usize) -> Range<usize> {
        let start = self.line_start(line).unwrap_or(doc_len);
        start..self.line_end(line, doc_len).max(start)
    }

    /// Line containing `offset`. Offsets past the end map to the last line.
    pub fn line_of(&self, offset: usize) -> usize {
        self.line_starts
            .partition_point(|&s| s <= offset)
            .saturating_sub(1)
    }

    /// `(line, column)` of `offset`.
    pub fn position_of(&self, offset: usize) -> (usize, usize) {
        let line = self.line_of(offset);
        (line, offset - self.line_starts[line])
    }

    /// Offset of `(line, column)`, clamped to the line's content and the document end.
    pub fn offset_of(&self, line: usize, column: usize, doc_len: usize) -> usize {
        if line >= self.line_count() {
            return doc_len;
        }
        let range = self.line_range(line, doc_len);
        (range.start + column).min(range.end)
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}
