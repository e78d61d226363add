use super::{cell_width, column_at_cell, Document, LineEnding, Position, TextBuffer, TextSpan};
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_lines_split_without_trailing_empty_line() {
    let doc = Document::from_text("# A\nbody\n");
    assert_eq!(doc.lines(), ["# A", "body"]);
    assert_eq!(doc.line_count(), 2);
    assert_eq!(doc.to_text(), "# A\nbody\n");
}

#[test]
fn test_empty_document_has_one_line() {
    let doc = Document::from_text("");
    assert_eq!(doc.line_count(), 1);
    assert_eq!(doc.line(0), Some(""));
}

#[test]
fn test_crlf_is_detected_and_preserved() {
    let doc = Document::from_text("# A\r\nbody\r\n");
    assert_eq!(doc.line_ending(), LineEnding::CrLf);
    assert_eq!(doc.lines(), ["# A", "body"]);
    assert_eq!(doc.line_separator(), "\r\n");
    assert_eq!(doc.to_text(), "# A\r\nbody\r\n");
}

#[test]
fn test_range_text_joins_with_native_separator() {
    let doc = Document::from_text("one\r\ntwo\r\nthree");
    let span = TextSpan {
        start: Position::new(0, 0),
        end: Position::new(1, 3),
    };
    assert_eq!(doc.range_text(span), "one\r\ntwo");
}

#[test]
fn test_range_text_respects_character_columns() {
    let doc = Document::from_text("héllo\nwörld");
    let span = TextSpan {
        start: Position::new(0, 1),
        end: Position::new(1, 2),
    };
    assert_eq!(doc.range_text(span), "éllo\nwö");
}

#[test]
fn test_set_selection_moves_cursor_to_start_and_scroll_is_taken_once() {
    let mut doc = Document::from_text("a\nb\nc");
    let span = TextSpan {
        start: Position::new(0, 0),
        end: Position::new(1, 1),
    };
    doc.set_selection(span);
    doc.scroll_into_view(span);

    assert_eq!(doc.selection(), Some(span));
    assert_eq!(doc.cursor(), Position::new(0, 0));
    assert_eq!(doc.take_scroll_request(), Some(span));
    assert_eq!(doc.take_scroll_request(), None);
}

#[test]
fn test_edits_bump_revision_and_clear_selection() {
    let mut doc = Document::from_text("# A\nbody");
    let span = TextSpan {
        start: Position::new(0, 0),
        end: Position::new(0, 3),
    };
    doc.set_selection(span);
    let before = doc.revision();

    doc.move_to(1, 4);
    doc.insert_char('!');
    assert_eq!(doc.line(1), Some("body!"));
    assert!(doc.revision() > before);
    assert!(doc.selection().is_none());
    assert!(doc.is_dirty());
}

#[test]
fn test_newline_and_backspace_round_trip() {
    let mut doc = Document::from_text("# Title");
    doc.move_to(0, 2);
    doc.insert_newline();
    assert_eq!(doc.lines(), ["# ", "Title"]);
    assert_eq!(doc.cursor(), Position::new(1, 0));

    doc.backspace();
    assert_eq!(doc.lines(), ["# Title"]);
    assert_eq!(doc.cursor(), Position::new(0, 2));
}

#[test]
fn test_backspace_at_document_start_is_noop() {
    let mut doc = Document::from_text("x");
    let rev = doc.revision();
    doc.backspace();
    assert_eq!(doc.revision(), rev);
    assert!(!doc.is_dirty());
}

#[test]
fn test_cursor_is_clamped() {
    let mut doc = Document::from_text("ab\nc");
    doc.move_to(9, 9);
    assert_eq!(doc.cursor(), Position::new(1, 1));
    doc.move_right();
    assert_eq!(doc.cursor(), Position::new(1, 1));
    doc.move_to(1, 0);
    doc.move_left();
    assert_eq!(doc.cursor(), Position::new(0, 2));
}

#[test]
fn test_open_and_save_keep_line_endings() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "# Head\r\ntext\r\n").unwrap();
    let path = file.path().to_path_buf();

    let mut doc = Document::open(&path).unwrap();
    doc.move_to(1, 4);
    doc.insert_char('s');
    doc.save().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "# Head\r\ntexts\r\n");
    assert!(!doc.is_dirty());
}

#[test]
fn test_save_without_path_fails() {
    let mut doc = Document::from_text("x");
    assert!(doc.save().is_err());
}

#[test]
fn test_cell_columns_account_for_wide_characters() {
    let line = "a日b";
    assert_eq!(cell_width(line, 0), 0);
    assert_eq!(cell_width(line, 2), 3);
    assert_eq!(cell_width(line, 9), 4);

    assert_eq!(column_at_cell(line, 0), 0);
    assert_eq!(column_at_cell(line, 1), 1);
    assert_eq!(column_at_cell(line, 2), 1);
    assert_eq!(column_at_cell(line, 3), 2);
    assert_eq!(column_at_cell(line, 40), 3);
}

#[test]
fn test_mixed_line_endings_are_saved_as_crlf() {
    let doc = Document::from_text("# A\r\none\ntwo\r\n");
    assert_eq!(doc.line_ending(), LineEnding::CrLf);
    assert_eq!(doc.lines(), ["# A", "one", "two"]);
    assert_eq!(doc.to_text(), "# A\r\none\r\ntwo\r\n");
}
