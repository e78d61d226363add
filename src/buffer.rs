//! The line-oriented text buffer that sections are resolved against.
//!
//! Section logic only ever talks to the [`TextBuffer`] trait, so it can run over anything that
//! hands out lines by index. [`Document`] is the buffer the terminal host owns: it remembers the
//! file's native line separator so copied text and saved files keep the same line endings the
//! file arrived with.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use unicode_width::UnicodeWidthChar;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
/// A location in the buffer, counted in lines and characters (not bytes).
pub struct Position {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based character offset within the line.
    pub column: usize,
}

impl Position {
    #[must_use]
    /// Builds a position from a line index and character column.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A character range between two positions, end exclusive.
pub struct TextSpan {
    /// First character covered by the span.
    pub start: Position,
    /// Position just past the last covered character.
    pub end: Position,
}

/// Read access to lines plus the two mutations section commands need.
///
/// The buffer is the only source of truth for document content; callers never cache lines
/// across calls.
pub trait TextBuffer {
    /// Number of lines; an empty document still has one (empty) line.
    fn line_count(&self) -> usize;

    /// Text of the line at `index`, without its separator.
    fn line(&self, index: usize) -> Option<&str>;

    /// Separator placed between lines when a range is read back as one string.
    fn line_separator(&self) -> &str {
        "\n"
    }

    /// Concatenates the text covered by `span`, joining lines with the native separator.
    ///
    /// The last line never gets a trailing separator.
    fn range_text(&self, span: TextSpan) -> String {
        let mut out = String::new();
        for index in span.start.line..=span.end.line {
            let Some(line) = self.line(index) else {
                break;
            };
            if index > span.start.line {
                out.push_str(self.line_separator());
            }
            let from = if index == span.start.line {
                byte_offset(line, span.start.column)
            } else {
                0
            };
            let to = if index == span.end.line {
                byte_offset(line, span.end.column)
            } else {
                line.len()
            };
            if from < to {
                out.push_str(&line[from..to]);
            }
        }
        out
    }

    /// Replaces the current selection with `span`.
    fn set_selection(&mut self, span: TextSpan);

    /// Asks the view to bring `span` on screen at the next paint.
    fn scroll_into_view(&mut self, span: TextSpan);
}

/// Byte offset of the `column`th character, clamped to the end of the line.
#[must_use]
pub fn byte_offset(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map_or(line.len(), |(offset, _)| offset)
}

/// Terminal cells taken by the first `column` characters of `line`.
#[must_use]
pub fn cell_width(line: &str, column: usize) -> usize {
    line.chars()
        .take(column)
        .map(|c| c.width().unwrap_or(0))
        .sum()
}

/// Character column painted over terminal cell `cell`, clamped to the end of the line.
#[must_use]
pub fn column_at_cell(line: &str, cell: usize) -> usize {
    let mut used = 0;
    for (column, c) in line.chars().enumerate() {
        used += c.width().unwrap_or(0);
        if used > cell {
            return column;
        }
    }
    line.chars().count()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Line separator detected when a document is loaded.
pub enum LineEnding {
    /// Unix `\n`.
    #[default]
    Lf,
    /// Windows `\r\n`.
    CrLf,
}

impl LineEnding {
    #[must_use]
    /// The separator as written to disk and to the clipboard.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// In-memory markdown document with a cursor, a selection and a revision counter.
///
/// Every mutation of the text bumps `revision`, which is how rendering surfaces notice that the
/// document changed under them.
#[derive(Clone, Debug)]
pub struct Document {
    lines: Vec<String>,
    line_ending: LineEnding,
    trailing_newline: bool,
    path: Option<PathBuf>,
    cursor: Position,
    selection: Option<TextSpan>,
    scroll_request: Option<TextSpan>,
    revision: u64,
    dirty: bool,
}

impl Document {
    #[must_use]
    /// Splits `text` into lines, remembering its line ending and trailing newline.
    pub fn from_text(text: &str) -> Self {
        let line_ending = if text.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        };
        let trailing_newline = text.ends_with('\n');
        let body = text.strip_suffix('\n').unwrap_or(text);
        let body = body.strip_suffix('\r').unwrap_or(body);

        let lines = body
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();

        Self {
            lines,
            line_ending,
            trailing_newline,
            path: None,
            cursor: Position::default(),
            selection: None,
            scroll_request: None,
            revision: 0,
            dirty: false,
        }
    }

    /// Reads a document from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not UTF-8.
    pub fn open(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        let mut doc = Self::from_text(&text);
        doc.path = Some(path.to_path_buf());
        tracing::info!(path = %path.display(), lines = doc.lines.len(), "opened document");
        Ok(doc)
    }

    /// Writes the document back to the file it was opened from.
    ///
    /// # Errors
    ///
    /// Returns an error if the document has no path or the write fails.
    pub fn save(&mut self) -> io::Result<()> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "document has no file path"))?;
        fs::write(&path, self.to_text())?;
        self.dirty = false;
        tracing::info!(path = %path.display(), "saved document");
        Ok(())
    }

    #[must_use]
    /// Joins the lines back into file text using the original line ending.
    pub fn to_text(&self) -> String {
        let sep = self.line_ending.as_str();
        let mut text = self.lines.join(sep);
        if self.trailing_newline {
            text.push_str(sep);
        }
        text
    }

    #[must_use]
    /// All lines of the document.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    /// File the document was opened from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    /// The detected line ending.
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    #[must_use]
    /// Counter bumped by every text mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    /// Whether there are unsaved edits.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    /// Current cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    #[must_use]
    /// Current selection, if any.
    pub fn selection(&self) -> Option<TextSpan> {
        self.selection
    }

    /// Drops the selection, keeping the cursor where it is.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Hands the pending scroll request to the view, clearing it.
    pub fn take_scroll_request(&mut self) -> Option<TextSpan> {
        self.scroll_request.take()
    }

    fn line_chars(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, |l| l.chars().count())
    }

    /// Moves the cursor, clamping it into the document.
    pub fn move_to(&mut self, line: usize, column: usize) {
        let line = line.min(self.lines.len().saturating_sub(1));
        let column = column.min(self.line_chars(line));
        self.cursor = Position::new(line, column);
    }

    /// Moves the cursor up by `n` lines.
    pub fn move_up(&mut self, n: usize) {
        self.move_to(self.cursor.line.saturating_sub(n), self.cursor.column);
    }

    /// Moves the cursor down by `n` lines.
    pub fn move_down(&mut self, n: usize) {
        self.move_to(self.cursor.line.saturating_add(n), self.cursor.column);
    }

    /// Moves the cursor one character left, wrapping to the end of the previous line.
    pub fn move_left(&mut self) {
        if self.cursor.column > 0 {
            self.cursor.column -= 1;
        } else if self.cursor.line > 0 {
            let line = self.cursor.line - 1;
            self.cursor = Position::new(line, self.line_chars(line));
        }
    }

    /// Moves the cursor one character right, wrapping to the start of the next line.
    pub fn move_right(&mut self) {
        if self.cursor.column < self.line_chars(self.cursor.line) {
            self.cursor.column += 1;
        } else if self.cursor.line + 1 < self.lines.len() {
            self.cursor = Position::new(self.cursor.line + 1, 0);
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.dirty = true;
        self.selection = None;
    }

    /// Inserts a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        let Position { line, column } = self.cursor;
        let text = &mut self.lines[line];
        let at = byte_offset(text, column);
        text.insert(at, c);
        self.cursor.column += 1;
        self.touch();
    }

    /// Splits the current line at the cursor.
    pub fn insert_newline(&mut self) {
        let Position { line, column } = self.cursor;
        let at = byte_offset(&self.lines[line], column);
        let rest = self.lines[line].split_off(at);
        self.lines.insert(line + 1, rest);
        self.cursor = Position::new(line + 1, 0);
        self.touch();
    }

    /// Deletes the character before the cursor, joining lines at column zero.
    pub fn backspace(&mut self) {
        let Position { line, column } = self.cursor;
        if column > 0 {
            let text = &mut self.lines[line];
            let at = byte_offset(text, column - 1);
            text.remove(at);
            self.cursor.column -= 1;
        } else if line > 0 {
            let tail = self.lines.remove(line);
            let joined_at = self.line_chars(line - 1);
            self.lines[line - 1].push_str(&tail);
            self.cursor = Position::new(line - 1, joined_at);
        } else {
            return;
        }
        self.touch();
    }
}

impl TextBuffer for Document {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    fn line_separator(&self) -> &str {
        self.line_ending.as_str()
    }

    fn set_selection(&mut self, span: TextSpan) {
        self.selection = Some(span);
        self.cursor = span.start;
    }

    fn scroll_into_view(&mut self, span: TextSpan) {
        self.scroll_request = Some(span);
    }
}

#[cfg(test)]
#[path = "tests/buffer.rs"]
mod tests;
