//! The core state machine bridging the document, its two surfaces and section commands.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the user clicks
//! icons, types and changes settings. Section commands always go through here so the current
//! settings are applied the same way whichever surface the command came from, and clipboard
//! completions are turned into notices in one place.

use crate::actions::{perform_action, ActionReport, SectionAction};
use crate::buffer::{column_at_cell, Document, TextBuffer};
use crate::clipboard::ClipboardSink;
use crate::editor_view::EditorSurface;
use crate::formats::markdown::MarkdownFormat;
use crate::notice::Notices;
use crate::reading_view::{ElementKind, ReadingSurface};
use crate::settings::{presentation, SettingKey, SettingsStore};
use crate::surface::Button;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Determines which UI screen renders and how input is interpreted.
pub enum View {
    /// Live editing surface showing the raw markdown.
    Editor,
    /// Rendered surface with markers stripped.
    Reading,
    /// The settings toggles.
    Settings,
    /// Captures vim-style command input after ':' keystroke.
    Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How keys typed in the editor are treated.
pub enum EditMode {
    /// Keys are commands.
    Normal,
    /// Keys insert text.
    Insert,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Screen rectangle the active surface was last painted into.
pub struct ContentArea {
    /// Left edge.
    pub x: u16,
    /// Top edge.
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl ContentArea {
    /// Surface-relative (row, column) of a screen cell inside the area.
    fn locate(self, x: u16, y: u16) -> Option<(usize, usize)> {
        let inside = x >= self.x
            && y >= self.y
            && x < self.x.saturating_add(self.width)
            && y < self.y.saturating_add(self.height);
        inside.then(|| (usize::from(y - self.y), usize::from(x - self.x)))
    }
}

/// Message shown after a successful copy.
pub const COPIED: &str = "Section copied to clipboard!";

/// Bridges the document, its surfaces and the section commands.
pub struct AppState {
    /// The open document.
    pub document: Document,
    /// Active UI screen determining input handling.
    pub current_view: View,
    /// Surface to return to when leaving settings or command input.
    pub last_surface: View,
    /// Editor key handling mode.
    pub mode: EditMode,
    /// Persisted section settings.
    pub settings: SettingsStore,
    /// Editable surface state.
    pub editor: EditorSurface,
    /// Rendered surface state.
    pub reading: ReadingSurface,
    /// Transient status messages.
    pub notices: Notices,
    /// Accumulates vim-style command input after ':' is pressed.
    pub command_buffer: String,
    /// Highlighted row in the settings view.
    pub settings_index: usize,
    /// Surface row under the mouse pointer.
    pub hover_row: Option<usize>,
    /// Where the active surface was last painted.
    pub content_area: ContentArea,
    clipboard: Box<dyn ClipboardSink>,
}

impl AppState {
    #[must_use]
    /// Initialises application state with the editor surface active.
    pub fn new(
        document: Document,
        settings: SettingsStore,
        clipboard: Box<dyn ClipboardSink>,
        notice_ttl: Duration,
    ) -> Self {
        Self {
            document,
            current_view: View::Editor,
            last_surface: View::Editor,
            mode: EditMode::Normal,
            settings,
            editor: EditorSurface::default(),
            reading: ReadingSurface::default(),
            notices: Notices::new(notice_ttl),
            command_buffer: String::new(),
            settings_index: 0,
            hover_row: None,
            content_area: ContentArea::default(),
            clipboard,
        }
    }

    /// Runs a section command on the heading at `heading_line`.
    ///
    /// Selecting from the rendered view switches to the editor so the selection is visible.
    pub fn run_section_action(
        &mut self,
        heading_line: usize,
        action: SectionAction,
    ) -> Option<ActionReport> {
        let include_header = self.settings.get().include_header_in_selection;
        let report = perform_action(
            &mut self.document,
            heading_line,
            action,
            include_header,
            self.clipboard.as_mut(),
        )?;
        if action.select && self.current_view == View::Reading {
            self.show_surface(View::Editor);
        }
        Some(report)
    }

    /// Runs a section command on the cursor line (editor) or the focused heading (reading).
    pub fn act_on_focus(&mut self, action: SectionAction) -> Option<ActionReport> {
        let line = match self.current_view {
            View::Editor => self.document.cursor().line,
            View::Reading => self.reading.focused_line()?,
            View::Settings | View::Command => return None,
        };
        self.run_section_action(line, action)
    }

    /// Handles a left click at screen cell (`x`, `y`).
    ///
    /// Clicking an icon runs its command; clicking elsewhere moves the cursor (editor) or the
    /// focus (reading).
    pub fn click(&mut self, x: u16, y: u16) -> Option<ActionReport> {
        let (offset, column) = self.content_area.locate(x, y)?;
        let width = usize::from(self.content_area.width);
        match self.current_view {
            View::Editor => {
                let row = self.editor.top() + offset;
                if let Some((line, button)) = self.editor.affordances().hit(row, column, width) {
                    return self.press(line, button);
                }
                let column = self
                    .document
                    .line(row)
                    .map_or(column, |text| column_at_cell(text, column));
                self.document.move_to(row, column);
                None
            }
            View::Reading => {
                let row = self.reading.top() + offset;
                if let Some((line, button)) = self.reading.affordances().hit(row, column, width) {
                    return self.press(line, button);
                }
                let is_heading = self
                    .reading
                    .elements()
                    .get(row)
                    .is_some_and(|e| matches!(e.kind, ElementKind::Heading { .. }));
                if is_heading {
                    self.reading.set_focus(row);
                }
                None
            }
            View::Settings | View::Command => None,
        }
    }

    fn press(&mut self, line: usize, button: Button) -> Option<ActionReport> {
        tracing::debug!(line, button = button.label(), "icon clicked");
        self.run_section_action(line, button.action())
    }

    /// Tracks the surface row under the mouse pointer.
    pub fn hover(&mut self, x: u16, y: u16) {
        let top = match self.current_view {
            View::Editor => self.editor.top(),
            View::Reading => self.reading.top(),
            View::Settings | View::Command => {
                self.hover_row = None;
                return;
            }
        };
        self.hover_row = self.content_area.locate(x, y).map(|(row, _)| top + row);
    }

    /// Turns finished clipboard writes into notices.
    pub fn poll_clipboard(&mut self) {
        for outcome in self.clipboard.poll() {
            match outcome.result {
                Ok(chars) => {
                    tracing::info!(ticket = outcome.ticket.0, chars, "section copied");
                    self.notices.info(COPIED);
                }
                Err(e) => {
                    tracing::warn!(ticket = outcome.ticket.0, "copy failed: {e}");
                    self.notices.error(format!("Copy failed: {e}"));
                }
            }
        }
    }

    /// Periodic housekeeping between input events.
    pub fn tick(&mut self, now: Instant) {
        self.poll_clipboard();
        self.notices.expire(now);
    }

    /// Applies pending scroll requests and brings both surfaces' affordances up to date.
    pub fn refresh_surfaces(&mut self) {
        match self.document.take_scroll_request() {
            Some(span) => self.editor.reveal(span),
            None => self.editor.follow(self.document.cursor().line),
        }
        let settings = *self.settings.get();
        let revision = self.settings.revision();
        self.editor.refresh(&self.document, &settings, revision);
        if let Err(e) = self
            .reading
            .refresh(&self.document, &settings, revision, &MarkdownFormat)
        {
            tracing::error!("rendering failed: {e}");
            self.notices.error(format!("Rendering failed: {e}"));
        }
    }

    /// Switches between the editor and reading surfaces.
    pub fn toggle_surface(&mut self) {
        let next = match self.current_view {
            View::Reading => View::Editor,
            _ => View::Reading,
        };
        self.show_surface(next);
    }

    fn show_surface(&mut self, view: View) {
        self.current_view = view;
        self.last_surface = view;
        self.mode = EditMode::Normal;
        self.hover_row = None;
    }

    /// Opens the settings view.
    pub fn open_settings(&mut self) {
        self.current_view = View::Settings;
        self.hover_row = None;
    }

    /// Opens command input.
    pub fn open_command(&mut self) {
        self.current_view = View::Command;
        self.command_buffer.clear();
    }

    /// Leaves settings or command input for the last surface.
    pub fn close_overlay(&mut self) {
        self.current_view = self.last_surface;
        self.command_buffer.clear();
    }

    /// Flips the highlighted setting and saves the whole settings object.
    pub fn toggle_setting(&mut self) {
        let key = SettingKey::ALL[self.settings_index.min(SettingKey::ALL.len() - 1)];
        match self.settings.toggle(key) {
            Ok(()) => {
                let state = if self.settings.get().get(key) { "on" } else { "off" };
                self.notices.info(format!("{}: {state}", key.name()));
            }
            Err(e) => {
                tracing::error!("saving settings failed: {e}");
                self.notices.error(format!("Could not save settings: {e}"));
            }
        }
    }

    /// Moves the settings highlight by one row.
    pub fn move_settings_cursor(&mut self, down: bool) {
        let last = SettingKey::ALL.len() - 1;
        self.settings_index = if down {
            (self.settings_index + 1).min(last)
        } else {
            self.settings_index.saturating_sub(1)
        };
    }

    /// Writes the document to disk, reporting the outcome as a notice.
    pub fn save_document(&mut self) -> bool {
        match self.document.save() {
            Ok(()) => {
                self.notices.info("Saved");
                true
            }
            Err(e) => {
                self.notices.error(format!("Error saving: {e}"));
                false
            }
        }
    }

    /// Whether the application may quit now; refuses with a notice while edits are unsaved.
    pub fn request_quit(&mut self) -> bool {
        if self.document.is_dirty() {
            self.notices
                .error("Unsaved changes (use :q! to discard or :wq to save)");
            false
        } else {
            true
        }
    }

    /// Runs the command typed after ':'. Returns whether the application should quit.
    pub fn execute_command(&mut self) -> bool {
        let cmd = std::mem::take(&mut self.command_buffer);
        self.close_overlay();

        match cmd.trim() {
            "w" => {
                self.save_document();
                false
            }
            "wq" | "x" => self.save_document(),
            "q" => self.request_quit(),
            "q!" => true,
            "" => false,
            other => {
                self.notices.error(format!("Unknown command: {other}"));
                false
            }
        }
    }

    /// Clears the process-wide presentation state on the way out.
    pub fn shutdown(&mut self) {
        presentation::clear();
        tracing::info!("shutting down");
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
