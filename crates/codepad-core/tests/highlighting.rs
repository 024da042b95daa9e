use codepad_core::{
    EditCoordinator, EditorSettings, HighlightSpan, LanguageDescriptor, STYLE_COMMENT,
    STYLE_KEYWORD, STYLE_STRING,
};
use pretty_assertions::assert_eq;

fn editor_with(language: LanguageDescriptor, text: &str) -> EditCoordinator {
    let mut editor = EditCoordinator::new();
    editor.load_text(text);
    editor.set_language(Some(language));
    editor
}

fn type_at(editor: &mut EditCoordinator, pos: usize, text: &str) {
    editor.set_cursor(pos);
    for ch in text.chars() {
        let pos = editor.cursor();
        editor.insert(pos, &ch.to_string()).unwrap();
    }
}

#[test]
fn test_line_comment_covers_braces() {
    let editor = editor_with(LanguageDescriptor::java(), "// x { y");
    assert_eq!(editor.spans(), &[HighlightSpan::new(0, 8, STYLE_COMMENT)]);
}

#[test]
fn test_single_character_typing_rescans_only_its_line() {
    let text = "/* header */\nclass A {\n    \n}";
    let mut editor = editor_with(LanguageDescriptor::java(), text);
    let before = editor.highlight_stats();
    assert_eq!(before.full_passes, 1);

    type_at(&mut editor, 27, "int y;");
    let after = editor.highlight_stats();
    assert_eq!(after.full_passes, 1);
    assert_eq!(after.line_passes, before.line_passes + 6);
    assert_eq!(editor.style_at(27), Some(STYLE_KEYWORD));
    assert_eq!(editor.style_at(3), Some(STYLE_COMMENT));
}

#[test]
fn test_typing_block_comment_delimiter_rescans_document() {
    let mut editor = editor_with(LanguageDescriptor::java(), "int a;\nint b;");
    type_at(&mut editor, 0, "/");
    assert_eq!(editor.highlight_stats().full_passes, 1);
    assert_eq!(editor.style_at(8), Some(STYLE_KEYWORD));

    type_at(&mut editor, 1, "*");
    assert_eq!(editor.highlight_stats().full_passes, 2);
    assert_eq!(editor.style_at(9), Some(STYLE_COMMENT));
    assert_eq!(editor.block_comments(), &[0..15]);
}

#[test]
fn test_closing_a_block_comment_uncomments_the_rest() {
    let mut editor = editor_with(LanguageDescriptor::c(), "/* a\nint b;\nint c;");
    assert_eq!(editor.style_at(13), Some(STYLE_COMMENT));

    editor.insert(4, " */").unwrap();
    assert_eq!(editor.text(), "/* a */\nint b;\nint c;");
    assert_eq!(editor.style_at(8), Some(STYLE_KEYWORD));
    assert_eq!(editor.style_at(15), Some(STYLE_KEYWORD));

    editor.undo();
    assert_eq!(editor.style_at(13), Some(STYLE_COMMENT));
}

#[test]
fn test_comment_token_in_string_is_not_a_comment() {
    let editor = editor_with(
        LanguageDescriptor::java(),
        "String s = \"a // b\"; int x;",
    );
    assert_eq!(editor.style_at(13), Some(STYLE_STRING));
    assert_eq!(editor.style_at(21), Some(STYLE_KEYWORD));
}

#[test]
fn test_switching_languages() {
    let mut editor = editor_with(LanguageDescriptor::java(), "int x; # y");
    assert_eq!(editor.style_at(0), Some(STYLE_KEYWORD));
    assert_eq!(editor.style_at(9), None);

    editor.set_language(None);
    assert!(editor.spans().is_empty());
    assert!(editor.language().is_none());

    editor.set_language(Some(LanguageDescriptor::python()));
    assert_eq!(editor.style_at(0), None);
    assert_eq!(editor.style_at(9), Some(STYLE_COMMENT));
}

#[test]
fn test_plain_text_typing_has_no_spans() {
    let mut editor = EditCoordinator::new();
    editor.insert(0, "int x; // y").unwrap();
    assert!(editor.spans().is_empty());
    assert_eq!(editor.highlight_stats().line_passes, 0);
}

#[test]
fn test_highlighting_can_be_disabled() {
    let settings = EditorSettings {
        highlighting: false,
        ..EditorSettings::default()
    };
    let mut editor = EditCoordinator::with_settings(settings);
    editor.set_language(Some(LanguageDescriptor::java()));
    editor.insert(0, "int x;").unwrap();
    assert!(editor.spans().is_empty());
}

#[test]
fn test_large_document_rehighlight_is_deferred_after_undo() {
    let settings = EditorSettings {
        large_document_threshold: 10,
        ..EditorSettings::default()
    };
    let mut editor = EditCoordinator::with_settings(settings);
    editor.load_text("int a;\nint b;");
    editor.set_language(Some(LanguageDescriptor::java()));
    editor.insert(0, "/*").unwrap();
    assert_eq!(editor.style_at(2), Some(STYLE_COMMENT));

    editor.undo();
    assert!(editor.has_deferred());
    // Spans were only shifted so far.
    assert_eq!(editor.style_at(0), Some(STYLE_COMMENT));

    assert!(editor.tick());
    assert!(!editor.has_deferred());
    assert_eq!(editor.style_at(0), Some(STYLE_KEYWORD));
    assert!(!editor.tick());
}

#[test]
fn test_deferred_rehighlight_runs_before_next_edit() {
    let settings = EditorSettings {
        large_document_threshold: 0,
        ..EditorSettings::default()
    };
    let mut editor = EditCoordinator::with_settings(settings);
    editor.set_language(Some(LanguageDescriptor::java()));
    editor.insert(0, "int a;").unwrap();
    editor.undo();
    editor.redo();
    assert!(editor.has_deferred());

    editor.insert(6, " ").unwrap();
    assert!(!editor.has_deferred());
    assert_eq!(editor.style_at(0), Some(STYLE_KEYWORD));
}

#[test]
fn test_typing_under_an_unclosed_comment_rescans_only_its_line() {
    let mut editor = editor_with(LanguageDescriptor::java(), "/* notes\nabc");
    let before = editor.highlight_stats();

    editor.insert(10, "x").unwrap();
    let end = editor.len_chars();
    editor.insert(end, "y").unwrap();

    assert_eq!(editor.text(), "/* notes\naxbcy");
    let after = editor.highlight_stats();
    assert_eq!(after.full_passes, before.full_passes);
    assert_eq!(after.line_passes, before.line_passes + 2);
    assert_eq!(editor.style_at(13), Some(STYLE_COMMENT));
    assert_eq!(editor.block_comments(), &[0..14]);
}
