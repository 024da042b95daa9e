//! Linear, prunable undo history.
//!
//! The history is one flat list of [`Edit`]s partitioned into undoable units by
//! *breakpoints*. A breakpoint `k` means "edit `k` starts a new unit"; the first unit always
//! starts at 0. `applied` is the number of edits currently reflected in the buffer (the undo
//! pointer plus one). Recording an edit while `applied < len` destroys the redo branch: there
//! is no undo tree.
//!
//! The engine never touches the buffer. [`UndoEngine::undo`] and [`UndoEngine::redo`] return
//! the edits the caller has to apply, in order.

use crate::edit::{Edit, EditKind};

/// Default number of breakpoints kept before the oldest unit is dropped.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Undo/redo history grouped into units.
#[derive(Debug, Clone)]
pub struct UndoEngine {
    edits: Vec<Edit>,
    /// Strictly increasing indices into `edits`, each > 0.
    breakpoints: Vec<usize>,
    applied: usize,
    /// Value of `applied` at the last save, if still reachable.
    saved: Option<usize>,
    /// A breakpoint was requested before the next recorded edit.
    break_requested: bool,
    limit: usize,
}

impl UndoEngine {
    /// Create an empty history keeping at most `limit` breakpoints.
    pub fn new(limit: usize) -> Self {
        Self {
            edits: Vec::new(),
            breakpoints: Vec::new(),
            applied: 0,
            saved: Some(0),
            break_requested: false,
            limit: limit.max(1),
        }
    }

    /// Drop all history and treat the current buffer as saved.
    pub fn reset(&mut self) {
        self.edits.clear();
        self.breakpoints.clear();
        self.applied = 0;
        self.saved = Some(0);
        self.break_requested = false;
    }

    /// Record a user edit, deciding whether it starts a new undoable unit.
    pub fn add_edit(&mut self, edit: Edit) {
        self.discard_redo_branch();

        let index = self.edits.len();
        if index > 0 && self.starts_new_unit(&self.edits[index - 1], &edit) {
            self.breakpoints.push(index);
        }
        self.break_requested = false;

        tracing::trace!(index, kind = ?edit.kind, len = edit.char_len(), "record edit");
        self.edits.push(edit);
        self.applied = self.edits.len();
        self.trim();
        self.check_invariants();
    }

    /// Record a programmatic follow-up edit inside the unit that is currently open.
    ///
    /// Used for auto-indent edits: undoing the newline that triggered them also undoes them.
    pub fn append_to_current_unit(&mut self, edit: Edit) {
        self.discard_redo_branch();
        self.edits.push(edit);
        self.applied = self.edits.len();
        self.check_invariants();
    }

    fn starts_new_unit(&self, prev: &Edit, next: &Edit) -> bool {
        if self.break_requested {
            return true;
        }
        // The edit following a typed newline (typically its indentation) joins its unit.
        if prev.is_single_newline() {
            return false;
        }
        let replaces_selection = prev.kind == EditKind::Remove
            && next.kind == EditKind::Insert
            && next.position == prev.position;
        if next.kind != prev.kind && !replaces_selection {
            return true;
        }
        if next.kind == EditKind::Remove && next.char_len() > 1 {
            return true;
        }
        prev.kind == EditKind::Remove && prev.char_len() > 1 && !replaces_selection
    }

    fn discard_redo_branch(&mut self) {
        if self.applied == self.edits.len() {
            return;
        }
        tracing::debug!(
            discarded = self.edits.len() - self.applied,
            "discarding redo branch"
        );
        self.edits.truncate(self.applied);
        let applied = self.applied;
        self.breakpoints.retain(|&b| b < applied);
        if self.saved.is_some_and(|saved| saved > applied) {
            self.saved = None;
        }
    }

    fn trim(&mut self) {
        while self.breakpoints.len() > self.limit {
            let dropped = self.breakpoints.remove(0);
            self.edits.drain(..dropped);
            for b in &mut self.breakpoints {
                *b -= dropped;
            }
            self.applied -= dropped;
            self.saved = match self.saved {
                Some(saved) if saved >= dropped => Some(saved - dropped),
                _ => None,
            };
            tracing::debug!(dropped, "trimmed oldest undo unit");
        }
    }

    /// Request a unit boundary before the next recorded edit.
    pub fn mark_breakpoint(&mut self) {
        self.break_requested = true;
    }

    /// Remember the current pointer as the saved state.
    pub fn mark_saving_point(&mut self) {
        self.saved = Some(self.applied);
        self.break_requested = true;
    }

    /// Returns `true` if the pointer is exactly at the saved state.
    pub fn is_at_saving_point(&self) -> bool {
        self.saved == Some(self.applied)
    }

    /// Returns `true` if a unit can be undone.
    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    /// Returns `true` if a unit can be redone.
    pub fn can_redo(&self) -> bool {
        self.applied < self.edits.len()
    }

    /// Number of recorded edits.
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Number of undoable units in the history (applied or not).
    pub fn unit_count(&self) -> usize {
        if self.edits.is_empty() {
            0
        } else {
            self.breakpoints.len() + 1
        }
    }

    /// Breakpoint indices.
    pub fn breakpoints(&self) -> &[usize] {
        &self.breakpoints
    }

    /// Number of edits currently applied.
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Step back over the newest applied unit.
    ///
    /// Returns the inverse edits to apply, newest first. Empty when there is nothing to undo.
    pub fn undo(&mut self) -> Vec<Edit> {
        if self.applied == 0 {
            return Vec::new();
        }
        let last = self.applied - 1;
        let unit_start = self
            .breakpoints
            .iter()
            .rev()
            .find(|&&b| b <= last)
            .copied()
            .unwrap_or(0);

        let inverse: Vec<Edit> = self.edits[unit_start..self.applied]
            .iter()
            .rev()
            .map(Edit::inverse)
            .collect();
        self.applied = unit_start;
        self.break_requested = true;
        self.check_invariants();
        inverse
    }

    /// Step forward over the next unit.
    ///
    /// Returns the edits to re-apply, oldest first. Empty when there is nothing to redo.
    pub fn redo(&mut self) -> Vec<Edit> {
        if self.applied >= self.edits.len() {
            return Vec::new();
        }
        let unit_end = self
            .breakpoints
            .iter()
            .find(|&&b| b > self.applied)
            .copied()
            .unwrap_or(self.edits.len());

        let forward = self.edits[self.applied..unit_end].to_vec();
        self.applied = unit_end;
        self.break_requested = true;
        self.check_invariants();
        forward
    }

    fn check_invariants(&self) {
        debug_assert!(
            self.applied <= self.edits.len(),
            "undo pointer {} outside history of {} edits",
            self.applied,
            self.edits.len()
        );
        debug_assert!(
            self.breakpoints.windows(2).all(|w| w[0] < w[1]),
            "breakpoints not strictly increasing: {:?}",
            self.breakpoints
        );
        debug_assert!(
            self.breakpoints
                .iter()
                .all(|&b| b > 0 && b < self.edits.len().max(1)),
            "breakpoint outside history: {:?}",
            self.breakpoints
        );
    }
}

impl Default for UndoEngine {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(engine: &mut UndoEngine, start: usize, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            engine.add_edit(Edit::insert(start + i, ch.to_string()));
        }
    }

    #[test]
    fn test_consecutive_inserts_form_one_unit() {
        let mut engine = UndoEngine::default();
        typed(&mut engine, 0, "abc");
        assert_eq!(engine.unit_count(), 1);

        let inverse = engine.undo();
        assert_eq!(inverse.len(), 3);
        assert_eq!(inverse[0], Edit::remove(2, "c"));
        assert!(!engine.can_undo());
        assert!(engine.can_redo());
    }

    #[test]
    fn test_kind_change_breaks_unit() {
        let mut engine = UndoEngine::default();
        typed(&mut engine, 0, "ab");
        engine.add_edit(Edit::remove(1, "b"));
        assert_eq!(engine.breakpoints(), &[2]);

        assert_eq!(engine.undo(), vec![Edit::insert(1, "b")]);
        assert_eq!(engine.applied(), 2);
    }

    #[test]
    fn test_replace_selection_stays_merged() {
        let mut engine = UndoEngine::default();
        typed(&mut engine, 0, "foo");
        engine.add_edit(Edit::remove(0, "foo"));
        engine.add_edit(Edit::insert(0, "x"));
        assert_eq!(engine.breakpoints(), &[3]);
        assert_eq!(engine.undo().len(), 2);
    }

    #[test]
    fn test_multi_char_removal_is_its_own_unit() {
        let mut engine = UndoEngine::default();
        typed(&mut engine, 0, "abcd");
        engine.add_edit(Edit::remove(3, "d"));
        engine.add_edit(Edit::remove(0, "ab"));
        engine.add_edit(Edit::remove(0, "c"));
        assert_eq!(engine.breakpoints(), &[4, 5, 6]);
    }

    #[test]
    fn test_newline_merges_following_edit() {
        let mut engine = UndoEngine::default();
        engine.add_edit(Edit::insert(0, "a"));
        engine.add_edit(Edit::insert(1, "\n"));
        // Merges despite the kind change.
        engine.add_edit(Edit::remove(0, "a"));
        assert!(engine.breakpoints().is_empty());

        engine.add_edit(Edit::insert(1, "y"));
        assert_eq!(engine.breakpoints(), &[3]);
    }

    #[test]
    fn test_explicit_breakpoint() {
        let mut engine = UndoEngine::default();
        typed(&mut engine, 0, "ab");
        engine.mark_breakpoint();
        typed(&mut engine, 2, "cd");
        assert_eq!(engine.breakpoints(), &[2]);
        assert_eq!(engine.undo().len(), 2);
        assert_eq!(engine.undo().len(), 2);
        assert!(engine.undo().is_empty());
    }

    #[test]
    fn test_new_edit_discards_redo_branch() {
        let mut engine = UndoEngine::default();
        typed(&mut engine, 0, "ab");
        engine.mark_breakpoint();
        typed(&mut engine, 2, "cd");
        engine.undo();
        engine.add_edit(Edit::insert(2, "x"));
        assert_eq!(engine.len(), 3);
        assert_eq!(engine.breakpoints(), &[2]);
        assert!(!engine.can_redo());
    }

    #[test]
    fn test_redo_boundaries() {
        let mut engine = UndoEngine::default();
        assert!(engine.redo().is_empty());
        typed(&mut engine, 0, "ab");
        engine.mark_breakpoint();
        typed(&mut engine, 2, "c");
        engine.undo();
        engine.undo();
        assert_eq!(engine.redo(), vec![Edit::insert(0, "a"), Edit::insert(1, "b")]);
        assert_eq!(engine.redo(), vec![Edit::insert(2, "c")]);
        assert!(engine.redo().is_empty());
    }

    #[test]
    fn test_saving_point_tracking() {
        let mut engine = UndoEngine::default();
        assert!(engine.is_at_saving_point());
        typed(&mut engine, 0, "ab");
        assert!(!engine.is_at_saving_point());
        engine.mark_saving_point();
        assert!(engine.is_at_saving_point());

        typed(&mut engine, 2, "c");
        assert!(!engine.is_at_saving_point());
        engine.undo();
        assert!(engine.is_at_saving_point());
        engine.undo();
        assert!(!engine.is_at_saving_point());
        engine.redo();
        assert!(engine.is_at_saving_point());
    }

    #[test]
    fn test_saving_point_in_discarded_branch_is_lost() {
        let mut engine = UndoEngine::default();
        typed(&mut engine, 0, "a");
        engine.mark_saving_point();
        engine.undo();
        engine.add_edit(Edit::insert(0, "b"));
        engine.undo();
        assert!(!engine.is_at_saving_point());
    }

    #[test]
    fn test_trimming_drops_oldest_unit() {
        let mut engine = UndoEngine::new(2);
        for i in 0..4 {
            engine.mark_breakpoint();
            engine.add_edit(Edit::insert(i, "x"));
        }
        assert_eq!(engine.unit_count(), 3);
        assert_eq!(engine.len(), 3);
        assert_eq!(engine.breakpoints(), &[1, 2]);
        // Saved point (empty document) fell inside the dropped unit.
        engine.undo();
        engine.undo();
        engine.undo();
        assert!(!engine.can_undo());
        assert!(!engine.is_at_saving_point());
    }
}
