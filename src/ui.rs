//! The UI renders the application state into something visible and clickable.
//!
//! The draw function dispatches based on the current view (editor, reading or settings).
//! Both surfaces paint heading icons from their own affordance set, so what is drawn is always
//! what a click will hit.

use crate::app_state::{AppState, ContentArea, EditMode, View};
use crate::buffer::cell_width;
use crate::reading_view::ElementKind;
use crate::section::heading_level;
use crate::settings::{presentation, SettingKey};
use crate::surface::{is_painted, Affordance};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let surface = match app.current_view {
        View::Command => app.last_surface,
        view => view,
    };
    match surface {
        View::Settings => draw_settings(f, app, chunks[0]),
        View::Reading => draw_reading(f, app, chunks[0]),
        View::Editor | View::Command => draw_editor(f, app, chunks[0]),
    }
    draw_status(f, app, chunks[1]);
}

fn heading_style(level: usize) -> Style {
    let color = match level {
        1 => Color::Magenta,
        2 => Color::Cyan,
        3 => Color::Green,
        4 => Color::Yellow,
        _ => Color::Blue,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Lays out the line's spans followed by the affordance icons.
///
/// Text is padded or truncated in terminal cells, so the icons land on the cell hit-testing
/// expects even for wide characters.
fn with_icons<'a>(
    mut spans: Vec<Span<'a>>,
    text_width: usize,
    affordance: &Affordance,
    width: usize,
) -> Vec<Span<'a>> {
    let column = affordance.paint_column(width);
    if text_width <= column {
        spans.push(Span::raw(" ".repeat(column - text_width)));
    } else {
        let mut budget = column;
        let mut cut = false;
        spans = spans
            .into_iter()
            .map(|span| {
                let mut kept = String::new();
                for c in span.content.chars() {
                    let w = c.width().unwrap_or(0);
                    if cut || w > budget {
                        cut = true;
                        break;
                    }
                    budget -= w;
                    kept.push(c);
                }
                Span::styled(kept, span.style)
            })
            .collect();
        // A wide character cut at the edge leaves a gap before the icons.
        if budget > 0 {
            spans.push(Span::raw(" ".repeat(budget)));
        }
    }
    for button in &affordance.buttons {
        spans.push(Span::styled(button.icon(), Style::default().fg(Color::LightBlue)));
    }
    spans
}

fn surface_block(f: &mut Frame, app: &mut AppState, area: Rect, title: String) -> Rect {
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    app.content_area = ContentArea {
        x: inner.x,
        y: inner.y,
        width: inner.width,
        height: inner.height,
    };
    app.editor.set_height(usize::from(inner.height));
    app.reading.set_height(usize::from(inner.height));
    app.refresh_surfaces();
    inner
}

fn draw_editor(f: &mut Frame, app: &mut AppState, area: Rect) {
    let name = app
        .document
        .path()
        .map_or_else(|| "[scratch]".to_string(), |p| p.display().to_string());
    let dirty = if app.document.is_dirty() { " [+]" } else { "" };
    let mode = match app.mode {
        EditMode::Normal => "",
        EditMode::Insert => " -- INSERT --",
    };
    let inner = surface_block(f, app, area, format!("Editor: {name}{dirty}{mode}"));

    let width = usize::from(inner.width);
    let always = presentation::always_show();
    let cursor = app.document.cursor();
    let selection = app.document.selection();
    let lines = app.document.lines();

    let rendered: Vec<Line> = app
        .editor
        .viewport()
        .filter(|&i| i < lines.len())
        .map(|i| {
            let text = &lines[i];
            let mut style = heading_level(text).map_or_else(Style::default, heading_style);
            if selection.is_some_and(|s| (s.start.line..=s.end.line).contains(&i)) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let spans = vec![Span::styled(text.as_str(), style)];

            match app.editor.affordances().get(i) {
                Some(affordance)
                    if is_painted(i, always, Some(cursor.line), app.hover_row) =>
                {
                    Line::from(with_icons(spans, text.width(), affordance, width))
                }
                _ => Line::from(spans),
            }
        })
        .collect();
    f.render_widget(Paragraph::new(rendered), inner);

    if app.current_view == View::Editor {
        if let (Ok(x), Ok(y)) = (
            u16::try_from(
                lines
                    .get(cursor.line)
                    .map_or(cursor.column, |l| cell_width(l, cursor.column)),
            ),
            u16::try_from(cursor.line.saturating_sub(app.editor.top())),
        ) {
            if x < inner.width && y < inner.height {
                f.set_cursor_position((inner.x + x, inner.y + y));
            }
        }
    }
}

fn draw_reading(f: &mut Frame, app: &mut AppState, area: Rect) {
    let inner = surface_block(f, app, area, "Reading".to_string());

    let width = usize::from(inner.width);
    let always = presentation::always_show();
    let focus = app.reading.focus();
    let top = app.reading.top();
    let elements = app.reading.elements();

    let rendered: Vec<Line> = elements
        .iter()
        .enumerate()
        .skip(top)
        .take(usize::from(inner.height))
        .map(|(row, element)| {
            let mut style = match element.kind {
                ElementKind::Heading { level, .. } => heading_style(level),
                ElementKind::Body => Style::default(),
            };
            if focus == Some(row) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let spans = vec![Span::styled(element.text.as_str(), style)];

            match app.reading.affordances().get(row) {
                Some(affordance) if is_painted(row, always, focus, app.hover_row) => {
                    Line::from(with_icons(
                        spans,
                        element.text.width(),
                        affordance,
                        width,
                    ))
                }
                _ => Line::from(spans),
            }
        })
        .collect();
    f.render_widget(Paragraph::new(rendered), inner);
}

fn draw_settings(f: &mut Frame, app: &AppState, area: Rect) {
    let settings = *app.settings.get();
    let items: Vec<ListItem> = SettingKey::ALL
        .iter()
        .enumerate()
        .map(|(i, &key)| {
            let mark = if settings.get(key) { "[x]" } else { "[ ]" };
            let text = Text::from(vec![
                Line::from(format!("{mark} {}", key.name())),
                Line::from(Span::styled(
                    format!("    {}", key.description()),
                    Style::default().fg(Color::DarkGray),
                )),
            ]);
            let style = if i == app.settings_index {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let title = format!("Settings ({})", app.settings.path().display());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}

fn draw_status(f: &mut Frame, app: &AppState, area: Rect) {
    let (text, style) = if app.current_view == View::Command {
        (format!(":{}", app.command_buffer), Style::default())
    } else if let Some(notice) = app.notices.current() {
        let style = if notice.is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        (notice.text.clone(), style)
    } else {
        let help = match (app.current_view, app.mode) {
            (View::Editor, EditMode::Insert) => "Esc: Normal mode | Type to edit",
            (View::Editor, EditMode::Normal) => {
                "s: Select section | y: Copy section | i: Insert | Tab: Reading | ,: Settings | :w :q"
            }
            (View::Reading, _) => {
                "↑/↓: Scroll | n/p: Next/Prev heading | s: Select | y: Copy | Tab: Editor | ,: Settings | q: Quit"
            }
            (View::Settings, _) => "↑/↓: Choose | Space/Enter: Toggle | Esc: Back",
            (View::Command, _) => "",
        };
        (help.to_string(), Style::default())
    };

    let status =
        Paragraph::new(Span::styled(text, style)).block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

#[cfg(test)]
#[path = "tests/ui.rs"]
mod tests;
