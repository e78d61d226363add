use super::with_icons;
use crate::surface::{Affordance, Button};
use ratatui::text::{Line, Span};

fn affordance(column: usize) -> Affordance {
    Affordance {
        line: 0,
        row: 0,
        column,
        buttons: vec![Button::Select, Button::Copy],
    }
}

/// Cells painted before the first icon.
fn icon_start(spans: &[Span]) -> usize {
    let first_icon = spans
        .iter()
        .position(|s| s.content == Button::Select.icon())
        .unwrap();
    Line::from(spans[..first_icon].to_vec()).width()
}

#[test]
fn test_wide_text_is_padded_in_cells() {
    let spans = with_icons(vec![Span::raw("日本語")], 6, &affordance(7), 40);
    assert_eq!(icon_start(&spans), 7);
    assert_eq!(Line::from(spans).width(), 13);
}

#[test]
fn test_truncation_never_splits_a_wide_character() {
    // Only 16 cells: icons pulled back to cell 10, text cut to fit.
    let text = "## 日本語の見出しです";
    let spans = with_icons(vec![Span::raw(text)], 21, &affordance(22), 16);
    assert_eq!(icon_start(&spans), 10);
    assert!(spans[0].content.starts_with("## 日本"));
    assert!(!spans[0].content.contains('の'));
}
