//! Section boundary resolution for ATX-style markdown headings.
//!
//! A section is a heading line plus every following line up to (but not including) the next
//! heading whose level is less than or equal to its own, or the end of the document. Sections
//! are never stored: they are recomputed from the buffer every time a command asks for one, so
//! the result only ever depends on the buffer content and the header policy.

use crate::buffer::{Position, TextBuffer, TextSpan};
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#+)\s").expect("heading pattern is valid"));

#[must_use]
/// Number of leading `#` characters when `line` is a heading, `None` otherwise.
///
/// A heading is any line matching `^(#+)\s`: hashes at column zero followed by whitespace. The
/// level is not capped at six.
pub fn heading_level(line: &str) -> Option<usize> {
    HEADING.captures(line).map(|caps| caps[1].len())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A heading occurrence in a buffer.
pub struct Heading {
    /// Line index of the heading.
    pub line: usize,
    /// Count of leading `#` characters.
    pub level: usize,
}

/// Every heading whose line falls in `lines`, clamped to the buffer.
pub fn headings_in<B: TextBuffer + ?Sized>(buffer: &B, lines: Range<usize>) -> Vec<Heading> {
    let end = lines.end.min(buffer.line_count());
    (lines.start..end)
        .filter_map(|line| {
            let level = heading_level(buffer.line(line)?)?;
            Some(Heading { line, level })
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Inclusive line range of a resolved section.
pub struct SectionRange {
    /// First line to act on.
    pub start_line: usize,
    /// Last line to act on (inclusive).
    pub end_line: usize,
}

impl SectionRange {
    #[must_use]
    /// Character span from column zero of the first line to the end of the last line.
    pub fn span<B: TextBuffer + ?Sized>(&self, buffer: &B) -> TextSpan {
        let end_column = buffer
            .line(self.end_line)
            .map_or(0, |line| line.chars().count());
        TextSpan {
            start: Position::new(self.start_line, 0),
            end: Position::new(self.end_line, end_column),
        }
    }

    #[must_use]
    /// Whether `line` lies inside the range.
    pub fn contains(&self, line: usize) -> bool {
        (self.start_line..=self.end_line).contains(&line)
    }
}

#[must_use]
/// Last line belonging to a section of `level` whose heading sits on `heading_line`.
///
/// Scans forward for the first heading of level `<= level`; the section ends on the line before
/// it, or on the last line of the buffer when there is none.
pub fn find_section_end<B: TextBuffer + ?Sized>(
    buffer: &B,
    heading_line: usize,
    level: usize,
) -> usize {
    let line_count = buffer.line_count();
    ((heading_line + 1)..line_count)
        .find(|&i| {
            buffer
                .line(i)
                .and_then(heading_level)
                .is_some_and(|next| next <= level)
        })
        .map_or(line_count.saturating_sub(1), |next_heading| next_heading - 1)
}

#[must_use]
/// Resolves the section headed by `heading_line`.
///
/// Returns `None` when the line is not a heading, or when the header is excluded and the
/// section has no body lines. With the header included, a section always resolves to at least
/// the heading line itself.
pub fn resolve_section<B: TextBuffer + ?Sized>(
    buffer: &B,
    heading_line: usize,
    include_header: bool,
) -> Option<SectionRange> {
    let level = heading_level(buffer.line(heading_line)?)?;
    let end_line = find_section_end(buffer, heading_line, level);
    let start_line = if include_header {
        heading_line
    } else {
        heading_line + 1
    };

    if start_line > end_line {
        return include_header.then_some(SectionRange {
            start_line: heading_line,
            end_line: heading_line,
        });
    }

    Some(SectionRange {
        start_line,
        end_line,
    })
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
