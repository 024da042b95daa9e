//! Curly-brace auto-indentation.
//!
//! Two pure functions compute the follow-up edit for a freshly typed newline or closing
//! brace; the indent unit lives in an explicit [`IndentState`] owned by the coordinator.
//! Only used for languages with `curly_bracket_indent`.

use crate::buffer::TextBuffer;
use crate::edit::Edit;
use crate::error::EditError;
use crate::line_index::LineIndex;

/// The string inserted or removed as one level of indentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentState {
    unit: String,
}

impl IndentState {
    /// An indent unit of `width` spaces (at least one).
    pub fn spaces(width: usize) -> Self {
        Self {
            unit: " ".repeat(width.max(1)),
        }
    }

    /// Replace the indent unit. Only non-empty runs of spaces are accepted.
    pub fn set_unit(&mut self, unit: &str) -> Result<(), EditError> {
        if unit.is_empty() || unit.chars().any(|c| c != ' ') {
            return Err(EditError::InvalidIndentUnit(unit.to_string()));
        }
        self.unit = unit.to_string();
        Ok(())
    }

    /// The indent unit.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Length of the indent unit in characters.
    pub fn width(&self) -> usize {
        self.unit.len()
    }
}

impl Default for IndentState {
    fn default() -> Self {
        Self::spaces(4)
    }
}

fn leading_spaces(text: &str) -> usize {
    text.chars().take_while(|&c| c == ' ').count()
}

/// Indentation for the line that follows a newline at `newline_pos`.
///
/// Copies the leading spaces of the line the newline terminates (up to the newline) and adds
/// one unit when the character before the newline is `{`. Returns the insertion to perform
/// right after the newline, or `None` when there is nothing to insert.
pub fn on_newline<B: TextBuffer + ?Sized>(
    buffer: &B,
    lines: &LineIndex,
    newline_pos: usize,
    state: &IndentState,
) -> Option<Edit> {
    if buffer.char_at(newline_pos) != Some('\n') {
        return None;
    }
    let line = lines.line_of(newline_pos);
    let line_start = lines.line_start(line)?;
    let before = buffer.slice(line_start, newline_pos - line_start);

    let mut indent = " ".repeat(leading_spaces(&before));
    if before.ends_with('{') {
        indent.push_str(state.unit());
    }
    if indent.is_empty() {
        return None;
    }
    Some(Edit::insert(newline_pos + 1, indent))
}

/// Outdent for a closing brace just typed at `brace_pos`.
///
/// Removes one unit right before the brace when the brace is preceded on its line only by
/// spaces ending in exactly one unit, and its column is not less than the body level (opener
/// indentation plus one unit) of the nearest unmatched `{` before it.
pub fn on_close_brace<B: TextBuffer + ?Sized>(
    buffer: &B,
    lines: &LineIndex,
    brace_pos: usize,
    state: &IndentState,
) -> Option<Edit> {
    if buffer.char_at(brace_pos) != Some('}') {
        return None;
    }
    let width = state.width();
    let line = lines.line_of(brace_pos);
    let line_start = lines.line_start(line)?;
    let column = brace_pos - line_start;
    if column < width {
        return None;
    }
    let prefix = buffer.slice(line_start, column);
    if leading_spaces(&prefix) != column || !prefix.ends_with(state.unit()) {
        return None;
    }

    let opener_indent = find_open_brace_indent(buffer, lines, brace_pos)?;
    if column < opener_indent + width {
        tracing::trace!(column, opener_indent, "brace already at block level");
        return None;
    }
    Some(Edit::remove(brace_pos - width, state.unit()))
}

/// Leading-space count of the line holding the nearest unmatched `{` before `pos`.
fn find_open_brace_indent<B: TextBuffer + ?Sized>(
    buffer: &B,
    lines: &LineIndex,
    pos: usize,
) -> Option<usize> {
    let mut depth = 0usize;
    let doc_len = buffer.len_chars();
    for line in (0..=lines.line_of(pos)).rev() {
        let range = lines.line_range(line, doc_len);
        let end = range.end.min(pos);
        let text = buffer.slice(range.start, end.saturating_sub(range.start));
        for ch in text.chars().rev() {
            match ch {
                '}' => depth += 1,
                '{' if depth == 0 => {
                    let full_line = buffer.slice(range.start, range.end - range.start);
                    return Some(leading_spaces(&full_line));
                }
                '{' => depth -= 1,
                _ => {}
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::RopeBuffer;

    fn setup(text: &str) -> (RopeBuffer, LineIndex) {
        (RopeBuffer::from_text(text), LineIndex::from_text(text))
    }

    #[test]
    fn test_newline_copies_leading_spaces() {
        let (buffer, lines) = setup("    let x = 1;\n");
        let edit = on_newline(&buffer, &lines, 14, &IndentState::default()).unwrap();
        assert_eq!(edit, Edit::insert(15, "    "));
    }

    #[test]
    fn test_newline_after_open_brace_adds_unit() {
        let (buffer, lines) = setup("    if (x) {\n");
        let edit = on_newline(&buffer, &lines, 12, &IndentState::default()).unwrap();
        assert_eq!(edit, Edit::insert(13, "        "));
    }

    #[test]
    fn test_newline_on_flush_line_is_noop() {
        let (buffer, lines) = setup("x\n");
        assert!(on_newline(&buffer, &lines, 1, &IndentState::default()).is_none());
        assert!(on_newline(&buffer, &lines, 0, &IndentState::default()).is_none());
    }

    #[test]
    fn test_newline_in_middle_of_indent_copies_prefix_only() {
        let (buffer, lines) = setup("  \n  x");
        let edit = on_newline(&buffer, &lines, 2, &IndentState::spaces(2)).unwrap();
        assert_eq!(edit, Edit::insert(3, "  "));
    }

    #[test]
    fn test_close_brace_outdents() {
        let (buffer, lines) = setup("{\n    }");
        let edit = on_close_brace(&buffer, &lines, 6, &IndentState::default()).unwrap();
        assert_eq!(edit, Edit::remove(2, "    "));
    }

    #[test]
    fn test_close_brace_nested() {
        let text = "class A {\n    void f() {\n        x();\n        }";
        let (buffer, lines) = setup(text);
        let pos = text.chars().count() - 1;
        let edit = on_close_brace(&buffer, &lines, pos, &IndentState::default()).unwrap();
        assert_eq!(edit.position, pos - 4);
    }

    #[test]
    fn test_close_brace_at_block_level_is_kept() {
        let (buffer, lines) = setup("    {\n    }");
        assert!(on_close_brace(&buffer, &lines, 10, &IndentState::default()).is_none());
    }

    #[test]
    fn test_close_brace_after_code_is_kept() {
        let (buffer, lines) = setup("{\n  x }");
        assert!(on_close_brace(&buffer, &lines, 6, &IndentState::spaces(2)).is_none());
    }

    #[test]
    fn test_close_brace_without_opener_is_kept() {
        let (buffer, lines) = setup("    }");
        assert!(on_close_brace(&buffer, &lines, 4, &IndentState::default()).is_none());
    }

    #[test]
    fn test_indent_unit_validation() {
        let mut state = IndentState::default();
        assert!(state.set_unit("  ").is_ok());
        assert_eq!(state.width(), 2);
        assert!(matches!(
            state.set_unit("\t"),
            Err(EditError::InvalidIndentUnit(_))
        ));
        assert!(state.set_unit("").is_err());
        assert_eq!(state.unit(), "  ");
    }
}
