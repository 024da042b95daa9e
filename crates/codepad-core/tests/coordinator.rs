use codepad_core::{
    CoordinatorState, EditCoordinator, EditError, EditingStateObserver, EditorSettings,
    LanguageDescriptor, LineCountChange, RopeBuffer, STYLE_KEYWORD,
};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Changed(bool),
    Undoable(bool, bool),
    Selection(bool),
    Cursor(usize, usize),
    Lines(LineCountChange),
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<Event>>>);

impl Recorder {
    fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

impl EditingStateObserver for Recorder {
    fn on_changed_state(&mut self, changed: bool) {
        self.0.borrow_mut().push(Event::Changed(changed));
    }
    fn on_undoable_state(&mut self, can_undo: bool, can_redo: bool) {
        self.0.borrow_mut().push(Event::Undoable(can_undo, can_redo));
    }
    fn on_selection_state(&mut self, has_selection: bool) {
        self.0.borrow_mut().push(Event::Selection(has_selection));
    }
    fn on_cursor_state(&mut self, line: usize, column: usize) {
        self.0.borrow_mut().push(Event::Cursor(line, column));
    }
    fn on_line_count(&mut self, change: LineCountChange) {
        self.0.borrow_mut().push(Event::Lines(change));
    }
}

fn observed_editor(text: &str) -> (EditCoordinator, Recorder) {
    let mut editor = EditCoordinator::new();
    editor.load_text(text);
    let recorder = Recorder::default();
    editor.set_observer(Box::new(recorder.clone()));
    (editor, recorder)
}

#[test]
fn test_observer_is_told_what_changed() {
    let (mut editor, recorder) = observed_editor("ab");

    editor.insert(2, "\n").unwrap();
    assert_eq!(
        recorder.take(),
        vec![
            Event::Changed(true),
            Event::Undoable(true, false),
            Event::Cursor(1, 0),
            Event::Lines(LineCountChange::Grew { from: 1, to: 2 }),
        ]
    );

    editor.undo();
    assert_eq!(
        recorder.take(),
        vec![
            Event::Changed(false),
            Event::Undoable(false, true),
            Event::Cursor(0, 2),
            Event::Lines(LineCountChange::Shrank { from: 2, to: 1 }),
        ]
    );
}

#[test]
fn test_observer_is_silent_when_nothing_changes() {
    let (mut editor, recorder) = observed_editor("abc");
    editor.set_cursor(0);
    editor.undo();
    editor.set_selection(None);
    assert!(recorder.take().is_empty());
}

#[test]
fn test_taken_observer_hears_nothing_more() {
    let (mut editor, recorder) = observed_editor("ab");
    assert!(editor.take_observer().is_some());
    assert!(editor.take_observer().is_none());

    editor.insert(0, "x").unwrap();
    assert!(recorder.take().is_empty());
}

#[test]
fn test_selection_and_cursor_notifications() {
    let (mut editor, recorder) = observed_editor("one\ntwo");
    editor.set_selection(Some(0..3));
    editor.set_cursor(5);
    editor.set_selection(Some(2..2));
    assert_eq!(
        recorder.take(),
        vec![
            Event::Selection(true),
            Event::Cursor(1, 1),
            Event::Selection(false),
        ]
    );
    assert_eq!(editor.selection(), None);
}

#[test]
fn test_typing_over_selection_clears_it() {
    let (mut editor, recorder) = observed_editor("abc");
    editor.set_selection(Some(0..2));
    recorder.take();

    editor.replace(0..2, "x").unwrap();
    assert_eq!(editor.text(), "xc");
    assert_eq!(editor.selection(), None);
    assert!(recorder.take().contains(&Event::Selection(false)));
}

#[test]
fn test_save_notifies_changed_state() {
    let (mut editor, recorder) = observed_editor("");
    editor.insert(0, "a").unwrap();
    recorder.take();
    editor.mark_saved();
    assert_eq!(recorder.take(), vec![Event::Changed(false)]);
}

#[test]
fn test_cursor_jump_starts_a_new_unit() {
    let mut editor = EditCoordinator::new();
    editor.insert(0, "a").unwrap();
    editor.insert(1, "b").unwrap();
    editor.set_cursor(0);
    editor.insert(0, "c").unwrap();
    assert_eq!(editor.text(), "cab");

    editor.undo();
    assert_eq!(editor.text(), "ab");
}

#[test]
fn test_cursor_from_line_and_column() {
    let (mut editor, recorder) = observed_editor("one\ntwo\nthree");
    let offset = editor.lines().offset_of(2, 3, editor.len_chars());
    assert_eq!(offset, 11);

    editor.set_cursor(offset);
    assert_eq!(editor.cursor_position(), (2, 3));
    assert_eq!(recorder.take(), vec![Event::Cursor(2, 3)]);
}

#[test]
fn test_cursor_is_clamped() {
    let mut editor = EditCoordinator::new();
    editor.load_text("ab");
    editor.set_cursor(99);
    assert_eq!(editor.cursor(), 2);
}

#[test]
fn test_load_lines_joins_without_trailing_newline() {
    let mut editor = EditCoordinator::new();
    editor.insert(0, "old").unwrap();
    editor.load_lines(["fn main() {", "}"]);

    assert_eq!(editor.text(), "fn main() {\n}");
    assert_eq!(editor.line_count(), 2);
    assert!(editor.is_saved());
    assert!(!editor.can_undo());
    assert_eq!(editor.state(), CoordinatorState::Idle);
}

#[test]
fn test_load_text_normalizes_crlf() {
    let mut editor = EditCoordinator::new();
    editor.load_text("a\r\nb\r\n");
    assert_eq!(editor.text(), "a\nb\n");
    assert_eq!(editor.line_count(), 3);
    assert_eq!(editor.lines().line_end(0, editor.len_chars()), 1);
}

#[test]
fn test_load_highlights_once() {
    let mut editor = EditCoordinator::new();
    editor.set_language(Some(LanguageDescriptor::java()));
    let before = editor.highlight_stats();
    editor.load_text("int a;\nint b;");
    assert_eq!(editor.highlight_stats().full_passes, before.full_passes + 1);
    assert_eq!(editor.highlight_stats().line_passes, 0);
    assert_eq!(editor.style_at(7), Some(STYLE_KEYWORD));
}

#[test]
fn test_wrapping_an_existing_buffer() {
    let editor = EditCoordinator::with_buffer(
        RopeBuffer::from_text("x\ny\nz"),
        EditorSettings::default(),
    );
    assert_eq!(editor.line_count(), 3);
    assert!(editor.is_saved());
    assert_eq!(editor.lines().line_start(2), Some(4));
}

#[test]
fn test_invalid_positions_leave_document_untouched() {
    let mut editor = EditCoordinator::new();
    editor.load_text("abc");
    assert!(editor.insert(9, "x").is_err());
    assert!(matches!(
        editor.remove(4, 1),
        Err(EditError::PositionOutOfRange { position: 4, len: 3 })
    ));
    assert!(editor.replace(5..6, "x").is_err());
    assert_eq!(editor.text(), "abc");
    assert!(!editor.can_undo());
}

#[test]
fn test_programmatic_edit_without_rehighlight_only_shifts_spans() {
    let mut editor = EditCoordinator::new();
    editor.load_text("x = 1;");
    editor.set_language(Some(LanguageDescriptor::java()));
    editor
        .apply_programmatic(false, |tx| tx.insert(0, "int "))
        .unwrap();
    assert_eq!(editor.text(), "int x = 1;");
    assert_eq!(editor.style_at(0), None);
    assert_eq!(editor.cursor(), 4);
}

#[test]
fn test_unhighlighted_programmatic_edit_leaves_spans_stale_until_next_pass() {
    let mut editor = EditCoordinator::new();
    editor.load_text("int x;");
    editor.set_language(Some(LanguageDescriptor::java()));

    editor
        .apply_programmatic(false, |tx| tx.insert(1, "zz"))
        .unwrap();
    assert_eq!(editor.text(), "izznt x;");
    assert_eq!(editor.style_at(1), Some(STYLE_KEYWORD));

    editor
        .apply_programmatic(true, |tx| {
            let end = tx.len_chars();
            tx.insert(end, " ")
        })
        .unwrap();
    assert_eq!(editor.style_at(0), None);
    assert_eq!(editor.style_at(1), None);
}

#[test]
fn test_failed_programmatic_edit_keeps_applied_part() {
    let mut editor = EditCoordinator::new();
    editor.load_text("abc");
    let result = editor.apply_programmatic(true, |tx| {
        tx.insert(0, "x")?;
        tx.insert(100, "y")
    });
    assert!(result.is_err());
    assert_eq!(editor.text(), "xabc");
    assert_eq!(editor.state(), CoordinatorState::Idle);

    assert!(editor.undo());
    assert_eq!(editor.text(), "abc");
}

#[test]
fn test_programmatic_edit_is_separate_from_typing() {
    let mut editor = EditCoordinator::new();
    editor.insert(0, "a").unwrap();
    editor
        .apply_programmatic(true, |tx| {
            let end = tx.len_chars();
            tx.insert(end, "bc")
        })
        .unwrap();
    editor.insert(3, "d").unwrap();
    assert_eq!(editor.text(), "abcd");

    editor.undo();
    assert_eq!(editor.text(), "abc");
    editor.undo();
    assert_eq!(editor.text(), "a");
    editor.undo();
    assert_eq!(editor.text(), "");
}
