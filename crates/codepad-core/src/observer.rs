//! UI-facing notifications.
//!
//! The coordinator compares its observable state before and after every public operation and
//! calls the observer only for values that actually changed.

use crate::line_index::LineCountChange;

/// Push interface implemented by the host UI.
///
/// All methods have empty default bodies so a host only implements what it displays.
pub trait EditingStateObserver {
    /// The document became modified (`true`) or returned to its saved state (`false`).
    fn on_changed_state(&mut self, _changed: bool) {}

    /// Undo/redo availability changed.
    fn on_undoable_state(&mut self, _can_undo: bool, _can_redo: bool) {}

    /// A selection appeared (`true`) or disappeared (`false`).
    fn on_selection_state(&mut self, _has_selection: bool) {}

    /// The caret moved to `(line, column)`, both 0-based.
    fn on_cursor_state(&mut self, _line: usize, _column: usize) {}

    /// The line count changed; lets a gutter append or remove entries incrementally.
    fn on_line_count(&mut self, _change: LineCountChange) {}
}

/// Snapshot of everything an [`EditingStateObserver`] is told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ObservedState {
    pub changed: bool,
    pub can_undo: bool,
    pub can_redo: bool,
    pub has_selection: bool,
    pub cursor: (usize, usize),
    pub line_count: usize,
}

impl ObservedState {
    /// Notify `observer` of every field that differs from `previous`.
    pub fn publish_diff(&self, previous: &ObservedState, observer: &mut dyn EditingStateObserver) {
        if self.changed != previous.changed {
            observer.on_changed_state(self.changed);
        }
        if (self.can_undo, self.can_redo) != (previous.can_undo, previous.can_redo) {
            observer.on_undoable_state(self.can_undo, self.can_redo);
        }
        if self.has_selection != previous.has_selection {
            observer.on_selection_state(self.has_selection);
        }
        if self.cursor != previous.cursor {
            observer.on_cursor_state(self.cursor.0, self.cursor.1);
        }
        if self.line_count != previous.line_count {
            observer.on_line_count(LineCountChange::between(previous.line_count, self.line_count));
        }
    }
}
