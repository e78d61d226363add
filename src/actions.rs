//! Section commands: select a section in the buffer, copy it to the clipboard, or both.
//!
//! Both commands resolve the section afresh from the buffer, then translate the inclusive line
//! range into a character span running from column zero of the first line to the end of the
//! last line. When resolution yields nothing, neither command does anything.

use crate::buffer::TextBuffer;
use crate::clipboard::{ClipboardSink, CopyTicket};
use crate::section::{resolve_section, SectionRange};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Which outcomes one invocation asks for.
pub struct SectionAction {
    /// Select the section and scroll it into view.
    pub select: bool,
    /// Put the section text on the clipboard.
    pub copy: bool,
}

impl SectionAction {
    /// Select only.
    pub const SELECT: Self = Self {
        select: true,
        copy: false,
    };
    /// Copy only.
    pub const COPY: Self = Self {
        select: false,
        copy: true,
    };
    /// Select and copy.
    pub const BOTH: Self = Self {
        select: true,
        copy: true,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What a section command actually did.
pub struct ActionReport {
    /// The resolved section.
    pub range: SectionRange,
    /// Ticket of the queued clipboard write, when copying.
    pub copy: Option<CopyTicket>,
}

/// Runs `action` on the section headed by `heading_line`.
///
/// Returns `None` when there was nothing to act on (not a heading, or an empty section with the
/// header excluded). The clipboard write is only queued here; its completion arrives through
/// [`ClipboardSink::poll`].
pub fn perform_action<B, C>(
    buffer: &mut B,
    heading_line: usize,
    action: SectionAction,
    include_header: bool,
    clipboard: &mut C,
) -> Option<ActionReport>
where
    B: TextBuffer + ?Sized,
    C: ClipboardSink + ?Sized,
{
    let Some(range) = resolve_section(buffer, heading_line, include_header) else {
        tracing::debug!(heading_line, "no section to act on");
        return None;
    };
    let span = range.span(buffer);

    if action.select {
        buffer.set_selection(span);
        buffer.scroll_into_view(span);
    }

    let copy = action
        .copy
        .then(|| clipboard.submit(buffer.range_text(span)));

    tracing::debug!(
        heading_line,
        start = range.start_line,
        end = range.end_line,
        select = action.select,
        copy = action.copy,
        "section action"
    );
    Some(ActionReport { range, copy })
}

#[cfg(test)]
#[path = "tests/actions.rs"]
pub(crate) mod tests;
