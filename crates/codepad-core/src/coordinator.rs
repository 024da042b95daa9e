//! Edit coordination.
//!
//! [`EditCoordinator`] owns the buffer and every component derived from it, and is the only
//! path by which text changes. A user edit is applied to the buffer, mirrored into the line
//! index and the span table synchronously, recorded for undo, and then followed by the
//! highlight and indent follow-ups, which are drained before the call returns.
//!
//! Re-entrancy is governed by one explicit [`CoordinatorState`]. Edits produced while
//! [`CoordinatorState::Suspended`] go through the same mutation path, but the suspension
//! reason decides whether they are recorded and whether they schedule follow-ups.
//!
//! # Example
//!
//! ```rust
//! use codepad_core::{EditCoordinator, LanguageDescriptor};
//!
//! let mut editor = EditCoordinator::new();
//! editor.set_language(Some(LanguageDescriptor::java()));
//! editor.insert(0, "    if (x) {").unwrap();
//! editor.insert(12, "\n").unwrap();
//! assert_eq!(editor.text(), "    if (x) {\n        ");
//!
//! assert!(editor.undo());
//! assert_eq!(editor.text(), "");
//! ```

use crate::buffer::{RopeBuffer, TextBuffer};
use crate::edit::{Edit, EditKind};
use crate::error::EditError;
use crate::file_io;
use crate::highlight::{HighlightStats, IncrementalHighlighter};
use crate::indent::{self, IndentState};
use crate::line_ending::LineEnding;
use crate::line_index::LineIndex;
use crate::observer::{EditingStateObserver, ObservedState};
use crate::settings::EditorSettings;
use crate::spans::{HighlightSpan, StyleId};
use crate::undo::UndoEngine;
use codepad_lang::LanguageDescriptor;
use std::collections::VecDeque;
use std::ops::Range;
use std::path::Path;

/// Why the pipeline is suspended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspendReason {
    /// A document is being loaded; nothing incremental runs.
    BulkLoad,
    /// Undo/redo replay; edits are not recorded.
    History,
    /// The language is being switched.
    LanguageSwitch,
    /// An indent follow-up is being applied; it joins the current undo unit.
    FollowUp,
}

/// Coordinator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinatorState {
    /// Waiting for input.
    #[default]
    Idle,
    /// A user edit is being fanned out.
    Applying,
    /// Edits are applied without the usual recording/follow-ups.
    Suspended(SuspendReason),
}

impl CoordinatorState {
    /// Returns `true` while suspended for any reason.
    pub fn is_suspended(&self) -> bool {
        matches!(self, Self::Suspended(_))
    }
}

/// Work scheduled after a user edit has committed.
#[derive(Debug)]
enum FollowUp {
    Highlight(Edit),
    Indent(Edit),
}

/// Single-threaded editing pipeline over a [`TextBuffer`].
pub struct EditCoordinator<B: TextBuffer = RopeBuffer> {
    buffer: B,
    lines: LineIndex,
    history: UndoEngine,
    indent: IndentState,
    highlighter: IncrementalHighlighter,
    settings: EditorSettings,
    state: CoordinatorState,
    pending: VecDeque<FollowUp>,
    /// A full re-highlight was postponed to the next [`EditCoordinator::tick`].
    deferred_highlight: bool,
    cursor: usize,
    selection: Option<Range<usize>>,
    observer: Option<Box<dyn EditingStateObserver>>,
    published: ObservedState,
}

impl EditCoordinator<RopeBuffer> {
    /// Empty document with default settings.
    pub fn new() -> Self {
        Self::with_settings(EditorSettings::default())
    }

    /// Empty document with `settings`.
    pub fn with_settings(settings: EditorSettings) -> Self {
        Self::with_buffer(RopeBuffer::new(), settings)
    }
}

impl Default for EditCoordinator<RopeBuffer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: TextBuffer> EditCoordinator<B> {
    /// Wrap an existing buffer. Its current content is treated as freshly loaded and saved.
    pub fn with_buffer(buffer: B, settings: EditorSettings) -> Self {
        let lines = LineIndex::from_text(&buffer.text());
        let mut coordinator = Self {
            buffer,
            lines,
            history: UndoEngine::new(settings.history_limit),
            indent: IndentState::spaces(settings.indent_width),
            highlighter: IncrementalHighlighter::new(),
            settings,
            state: CoordinatorState::Idle,
            pending: VecDeque::new(),
            deferred_highlight: false,
            cursor: 0,
            selection: None,
            observer: None,
            published: ObservedState {
                changed: false,
                can_undo: false,
                can_redo: false,
                has_selection: false,
                cursor: (0, 0),
                line_count: 1,
            },
        };
        coordinator.published = coordinator.observed_state();
        coordinator
    }

    // ----- queries -----

    /// The underlying buffer.
    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    /// The complete document text.
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Document length in characters.
    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    /// The line index.
    pub fn lines(&self) -> &LineIndex {
        &self.lines
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    /// The undo history.
    pub fn history(&self) -> &UndoEngine {
        &self.history
    }

    /// Current state of the pipeline.
    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    /// Active settings.
    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Caret offset.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Caret `(line, column)`.
    pub fn cursor_position(&self) -> (usize, usize) {
        self.lines.position_of(self.cursor)
    }

    /// Current selection, if any.
    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    /// Bound language (`None` = plain text).
    pub fn language(&self) -> Option<&LanguageDescriptor> {
        self.highlighter.language()
    }

    /// All highlight spans.
    pub fn spans(&self) -> &[HighlightSpan] {
        self.highlighter.spans()
    }

    /// Highlight spans overlapping `range`.
    pub fn spans_in(&self, range: Range<usize>) -> &[HighlightSpan] {
        self.highlighter.spans_in(range)
    }

    /// Style at `pos` (`None` = normal).
    pub fn style_at(&self, pos: usize) -> Option<StyleId> {
        self.highlighter.style_at(pos)
    }

    /// Extents of the block comments found by the last full highlight pass.
    pub fn block_comments(&self) -> &[Range<usize>] {
        self.highlighter.block_comments()
    }

    /// Highlight pass counters.
    pub fn highlight_stats(&self) -> HighlightStats {
        self.highlighter.stats()
    }

    /// The indent unit.
    pub fn indent_unit(&self) -> &str {
        self.indent.unit()
    }

    /// Returns `true` if a unit can be undone.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns `true` if a unit can be redone.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Returns `true` if the history pointer is exactly at the last save (or load).
    pub fn is_saved(&self) -> bool {
        self.history.is_at_saving_point()
    }

    /// Returns `true` if a re-highlight is waiting for [`EditCoordinator::tick`].
    pub fn has_deferred(&self) -> bool {
        self.deferred_highlight
    }

    // ----- observer -----

    /// Install the UI observer. It is told about changes from now on.
    pub fn set_observer(&mut self, observer: Box<dyn EditingStateObserver>) {
        self.observer = Some(observer);
        self.published = self.observed_state();
    }

    /// Remove and return the observer.
    pub fn take_observer(&mut self) -> Option<Box<dyn EditingStateObserver>> {
        self.observer.take()
    }

    fn observed_state(&self) -> ObservedState {
        ObservedState {
            changed: !self.is_saved(),
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            has_selection: self.selection.is_some(),
            cursor: self.cursor_position(),
            line_count: self.lines.line_count(),
        }
    }

    fn publish(&mut self) {
        let current = self.observed_state();
        if let Some(observer) = self.observer.as_deref_mut() {
            current.publish_diff(&self.published, observer);
        }
        self.published = current;
    }

    // ----- user edits -----

    /// Insert `text` at `position`. Positions past the end are refused.
    pub fn insert(&mut self, position: usize, text: &str) -> Result<(), EditError> {
        self.flush_deferred();
        self.insert_inner(position, text)?;
        self.publish();
        Ok(())
    }

    /// Remove `len` characters at `position`. A range running past the end is clamped; a
    /// start past the end is refused.
    pub fn remove(&mut self, position: usize, len: usize) -> Result<(), EditError> {
        self.flush_deferred();
        self.remove_inner(position, len)?;
        self.publish();
        Ok(())
    }

    /// Replace `range` with `text` (typing over a selection).
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> Result<(), EditError> {
        self.flush_deferred();
        self.remove_inner(range.start, range.end.saturating_sub(range.start))?;
        self.insert_inner(range.start, text)?;
        self.publish();
        Ok(())
    }

    fn check_position(&self, position: usize) -> Result<(), EditError> {
        let len = self.buffer.len_chars();
        if position > len {
            tracing::warn!(position, len, "edit refused: position out of range");
            return Err(EditError::PositionOutOfRange { position, len });
        }
        Ok(())
    }

    fn insert_inner(&mut self, position: usize, text: &str) -> Result<(), EditError> {
        self.check_position(position)?;
        if text.is_empty() {
            return Ok(());
        }
        let edit = Edit::insert(position, text);
        self.cursor = edit.end();
        self.apply_user_edit(edit);
        Ok(())
    }

    fn remove_inner(&mut self, position: usize, len: usize) -> Result<(), EditError> {
        self.check_position(position)?;
        let available = self.buffer.len_chars() - position;
        if len > available {
            tracing::warn!(position, len, available, "removal clamped to document end");
        }
        let len = len.min(available);
        if len == 0 {
            return Ok(());
        }
        let edit = Edit::remove(position, self.buffer.slice(position, len));
        self.cursor = position;
        self.apply_user_edit(edit);
        Ok(())
    }

    fn apply_user_edit(&mut self, edit: Edit) {
        debug_assert_eq!(self.state, CoordinatorState::Idle, "re-entrant user edit");
        self.state = CoordinatorState::Applying;
        self.selection = None;

        if self.settings.highlighting && self.highlighter.language().is_some() {
            self.pending.push_back(FollowUp::Highlight(edit.clone()));
        }
        if self.wants_indent(&edit) {
            self.pending.push_back(FollowUp::Indent(edit.clone()));
        }
        self.mutate(edit);
        self.drain_follow_ups();

        self.state = CoordinatorState::Idle;
    }

    fn wants_indent(&self, edit: &Edit) -> bool {
        edit.is_insert()
            && self.settings.auto_indent
            && self
                .highlighter
                .language()
                .is_some_and(|lang| lang.curly_bracket_indent)
            && matches!(edit.content.chars().last(), Some('\n' | '}'))
    }

    /// The single buffer mutation path. What happens besides the mutation depends on why
    /// the edit is being made.
    fn mutate(&mut self, edit: Edit) {
        edit.apply(&mut self.buffer);
        let change = self.lines.apply_edit(&edit);
        if !change.is_unchanged() {
            tracing::trace!(?change, "line count changed");
        }
        self.highlighter.shift_for_edit(&edit);

        match self.state {
            CoordinatorState::Applying => self.history.add_edit(edit),
            CoordinatorState::Suspended(SuspendReason::FollowUp) => {
                self.history.append_to_current_unit(edit)
            }
            CoordinatorState::Suspended(_) | CoordinatorState::Idle => {}
        }
    }

    fn drain_follow_ups(&mut self) {
        while let Some(job) = self.pending.pop_front() {
            match job {
                FollowUp::Highlight(edit) => self.rehighlight(Some(&edit)),
                FollowUp::Indent(edit) => {
                    if let Some(fix) = self.indent_fix(&edit) {
                        self.apply_follow_up(fix);
                    }
                }
            }
        }
    }

    fn indent_fix(&self, edit: &Edit) -> Option<Edit> {
        let last = edit.end().checked_sub(1)?;
        match edit.content.chars().last()? {
            '\n' => indent::on_newline(&self.buffer, &self.lines, last, &self.indent),
            '}' => indent::on_close_brace(&self.buffer, &self.lines, last, &self.indent),
            _ => None,
        }
    }

    fn apply_follow_up(&mut self, fix: Edit) {
        tracing::trace!(position = fix.position, kind = ?fix.kind, "indent follow-up");
        let previous = self.state;
        self.state = CoordinatorState::Suspended(SuspendReason::FollowUp);
        self.move_caret_for(&fix);
        self.mutate(fix.clone());
        self.rehighlight(Some(&fix));
        self.state = previous;
    }

    /// Keep the caret on the same character across an edit it did not cause.
    fn move_caret_for(&mut self, edit: &Edit) {
        let len = edit.char_len();
        match edit.kind {
            EditKind::Insert if self.cursor >= edit.position => self.cursor += len,
            EditKind::Remove if self.cursor >= edit.position + len => self.cursor -= len,
            EditKind::Remove if self.cursor > edit.position => self.cursor = edit.position,
            _ => {}
        }
    }

    fn rehighlight(&mut self, change: Option<&Edit>) {
        if !self.settings.highlighting {
            return;
        }
        let pass = self.highlighter.highlight(&self.buffer, &self.lines, change);
        tracing::trace!(?pass, "highlight pass");
    }

    // ----- history -----

    /// Request an undo-unit boundary before the next edit.
    pub fn mark_breakpoint(&mut self) {
        self.history.mark_breakpoint();
    }

    /// Undo the newest unit. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.flush_deferred();
        let edits = self.history.undo();
        let Some(last) = edits.last().cloned() else {
            return false;
        };
        self.replay(edits);
        self.cursor = match last.kind {
            // On the last restored character.
            EditKind::Insert => last.end().saturating_sub(1),
            EditKind::Remove => last.position,
        };
        self.after_replay();
        true
    }

    /// Redo the next unit. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.flush_deferred();
        let edits = self.history.redo();
        let Some(last) = edits.last().cloned() else {
            return false;
        };
        self.replay(edits);
        self.cursor = match last.kind {
            EditKind::Insert => last.end(),
            EditKind::Remove => last.position,
        };
        self.after_replay();
        true
    }

    fn replay(&mut self, edits: Vec<Edit>) {
        self.state = CoordinatorState::Suspended(SuspendReason::History);
        for edit in edits {
            self.mutate(edit);
        }
        self.state = CoordinatorState::Idle;
    }

    fn after_replay(&mut self) {
        self.selection = None;
        if self.settings.highlighting && self.highlighter.language().is_some() {
            let len = self.buffer.len_chars();
            if len > self.settings.large_document_threshold {
                tracing::debug!(len, "deferring re-highlight of large document");
                self.deferred_highlight = true;
            } else {
                self.rehighlight(None);
            }
        }
        self.publish();
    }

    /// Run deferred work. Returns `true` if anything ran.
    pub fn tick(&mut self) -> bool {
        if !self.deferred_highlight {
            return false;
        }
        self.deferred_highlight = false;
        self.rehighlight(None);
        true
    }

    fn flush_deferred(&mut self) {
        if self.tick() {
            tracing::trace!("flushed deferred re-highlight");
        }
    }

    // ----- saving -----

    /// Mark the current history position as saved.
    pub fn mark_saved(&mut self) {
        self.history.mark_saving_point();
        self.publish();
    }

    /// Write the document to `path` and mark it saved. On failure the in-memory document
    /// is untouched and stays unsaved.
    pub fn save_file(&mut self, path: &Path, line_ending: LineEnding) -> Result<(), EditError> {
        file_io::write_text(path, &self.buffer.text(), line_ending)?;
        self.mark_saved();
        Ok(())
    }

    // ----- caret and selection -----

    /// Move the caret. Jumping away from the typing position starts a new undo unit.
    pub fn set_cursor(&mut self, position: usize) {
        let position = position.min(self.buffer.len_chars());
        if position != self.cursor {
            self.history.mark_breakpoint();
            self.cursor = position;
        }
        self.publish();
    }

    /// Set or clear the selection. Empty ranges clear it.
    pub fn set_selection(&mut self, selection: Option<Range<usize>>) {
        let len = self.buffer.len_chars();
        self.selection = selection
            .map(|r| r.start.min(len)..r.end.min(len))
            .filter(|r| r.start < r.end);
        self.publish();
    }

    // ----- configuration -----

    /// Bind a language (`None` = plain text). Switching to plain text clears all spans;
    /// switching to a language runs a full highlight pass.
    pub fn set_language(&mut self, language: Option<LanguageDescriptor>) {
        self.flush_deferred();
        self.state = CoordinatorState::Suspended(SuspendReason::LanguageSwitch);
        tracing::debug!(
            language = language.as_ref().map(|l| l.name.as_str()).unwrap_or("plain text"),
            "switching language"
        );
        let highlighted = language.is_some();
        self.highlighter.set_language(language);
        if highlighted {
            self.rehighlight(None);
        }
        self.state = CoordinatorState::Idle;
    }

    /// Replace the indent unit (spaces only).
    pub fn set_indent_unit(&mut self, unit: &str) -> Result<(), EditError> {
        self.indent.set_unit(unit)
    }

    // ----- loading -----

    /// Replace the document with `text`. `"\r\n"` line breaks are stored as `"\n"`, the
    /// same as [`EditCoordinator::load_file`].
    pub fn load_text(&mut self, text: &str) {
        self.load_lines(text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line)));
    }

    /// Replace the document with `lines` joined by `"\n"` (no trailing separator).
    ///
    /// Nothing incremental runs during the load; afterwards the line index is recomputed,
    /// the document is highlighted once, the history is reset and the document is saved.
    pub fn load_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.state = CoordinatorState::Suspended(SuspendReason::BulkLoad);
        self.pending.clear();
        self.deferred_highlight = false;

        let len = self.buffer.len_chars();
        self.buffer.remove(0, len);
        for (i, line) in lines.into_iter().enumerate() {
            let end = self.buffer.len_chars();
            if i > 0 {
                self.buffer.insert(end, "\n");
            }
            let end = self.buffer.len_chars();
            self.buffer.insert(end, line.as_ref());
        }

        let change = self.lines.update(&self.buffer.text());
        tracing::debug!(
            lines = self.lines.line_count(),
            chars = self.buffer.len_chars(),
            ?change,
            "document loaded"
        );
        self.highlighter.clear();
        self.rehighlight(None);
        self.history.reset();
        self.cursor = 0;
        self.selection = None;
        self.state = CoordinatorState::Idle;
        self.publish();
    }

    /// Load the file at `path`. On failure the current document is kept.
    pub fn load_file(&mut self, path: &Path) -> Result<(), EditError> {
        let lines = file_io::read_lines(path)?;
        self.load_lines(lines);
        Ok(())
    }

    // ----- programmatic edits -----

    /// Apply a batch of edits from outside the typing path (paste, find/replace) as one
    /// undo unit. No indent follow-ups run; when `rehighlight` is set the document is
    /// highlighted once afterwards.
    ///
    /// Without `rehighlight`, existing spans are only shifted: text inserted inside a span
    /// takes that span's style, and spans stay stale until the next full pass (a language
    /// switch, a load, a re-highlighting programmatic edit, or an undo/redo).
    ///
    /// Edits made before a failing transaction call stay applied and undoable.
    pub fn apply_programmatic<R>(
        &mut self,
        rehighlight: bool,
        f: impl FnOnce(&mut EditTransaction<'_, B>) -> Result<R, EditError>,
    ) -> Result<R, EditError> {
        self.flush_deferred();
        self.history.mark_breakpoint();
        self.state = CoordinatorState::Applying;
        self.selection = None;

        let mut transaction = EditTransaction {
            coordinator: self,
            edits: 0,
        };
        let result = f(&mut transaction);
        let edits = transaction.edits;

        self.history.mark_breakpoint();
        self.state = CoordinatorState::Idle;
        if rehighlight && edits > 0 && self.highlighter.language().is_some() {
            self.rehighlight(None);
        }
        tracing::debug!(edits, "programmatic edit applied");
        self.publish();
        result
    }
}

/// Edits collected by [`EditCoordinator::apply_programmatic`].
pub struct EditTransaction<'a, B: TextBuffer> {
    coordinator: &'a mut EditCoordinator<B>,
    edits: usize,
}

impl<B: TextBuffer> EditTransaction<'_, B> {
    /// Current document text.
    pub fn text(&self) -> String {
        self.coordinator.buffer.text()
    }

    /// Current document length in characters.
    pub fn len_chars(&self) -> usize {
        self.coordinator.buffer.len_chars()
    }

    /// Insert `text` at `position`.
    pub fn insert(&mut self, position: usize, text: &str) -> Result<(), EditError> {
        self.coordinator.check_position(position)?;
        if text.is_empty() {
            return Ok(());
        }
        let edit = Edit::insert(position, text);
        self.coordinator.cursor = edit.end();
        self.record(edit);
        Ok(())
    }

    /// Remove `len` characters at `position`, clamped to the document end.
    pub fn remove(&mut self, position: usize, len: usize) -> Result<(), EditError> {
        self.coordinator.check_position(position)?;
        let len = len.min(self.coordinator.buffer.len_chars() - position);
        if len == 0 {
            return Ok(());
        }
        let edit = Edit::remove(position, self.coordinator.buffer.slice(position, len));
        self.coordinator.cursor = position;
        self.record(edit);
        Ok(())
    }

    /// Replace `range` with `text`.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> Result<(), EditError> {
        self.remove(range.start, range.end.saturating_sub(range.start))?;
        self.insert(range.start, text)
    }

    fn record(&mut self, edit: Edit) {
        // The first edit opens the unit, the rest join it.
        self.coordinator.state = if self.edits == 0 {
            CoordinatorState::Applying
        } else {
            CoordinatorState::Suspended(SuspendReason::FollowUp)
        };
        self.coordinator.mutate(edit);
        self.coordinator.state = CoordinatorState::Applying;
        self.edits += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spans::STYLE_KEYWORD;

    #[test]
    fn test_state_returns_to_idle() {
        let mut editor = EditCoordinator::new();
        editor.set_language(Some(LanguageDescriptor::java()));
        editor.insert(0, "{\n").unwrap();
        assert_eq!(editor.state(), CoordinatorState::Idle);
        editor.undo();
        assert_eq!(editor.state(), CoordinatorState::Idle);
    }

    #[test]
    fn test_insert_past_end_is_refused() {
        let mut editor = EditCoordinator::new();
        editor.load_text("abc");
        let err = editor.insert(4, "x").unwrap_err();
        assert!(matches!(
            err,
            EditError::PositionOutOfRange {
                position: 4,
                len: 3
            }
        ));
        assert_eq!(editor.text(), "abc");
        assert!(editor.is_saved());
    }

    #[test]
    fn test_remove_past_end_is_clamped() {
        let mut editor = EditCoordinator::new();
        editor.load_text("abc");
        editor.remove(1, 10).unwrap();
        assert_eq!(editor.text(), "a");
        assert!(editor.undo());
        assert_eq!(editor.text(), "abc");
    }

    #[test]
    fn test_indent_follow_up_moves_caret() {
        let mut editor = EditCoordinator::new();
        editor.set_language(Some(LanguageDescriptor::c()));
        editor.insert(0, "{").unwrap();
        editor.insert(1, "\n").unwrap();
        assert_eq!(editor.text(), "{\n    ");
        assert_eq!(editor.cursor(), 6);
        assert_eq!(editor.cursor_position(), (1, 4));
    }

    #[test]
    fn test_no_indent_for_plain_text() {
        let mut editor = EditCoordinator::new();
        editor.insert(0, "    {\n").unwrap();
        assert_eq!(editor.text(), "    {\n");
    }

    #[test]
    fn test_programmatic_edits_form_one_unit() {
        let mut editor = EditCoordinator::new();
        editor.set_language(Some(LanguageDescriptor::java()));
        editor.load_text("x = a; y = a;");
        editor
            .apply_programmatic(true, |tx| {
                tx.replace(11..12, "int")?;
                tx.replace(4..5, "int")
            })
            .unwrap();
        assert_eq!(editor.text(), "x = int; y = int;");
        assert_eq!(editor.style_at(4), Some(STYLE_KEYWORD));
        assert!(editor.undo());
        assert_eq!(editor.text(), "x = a; y = a;");
        assert!(!editor.can_undo());
    }
}
