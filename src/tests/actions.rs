use super::{perform_action, SectionAction};
use crate::buffer::{Document, Position, TextBuffer};
use crate::clipboard::{ClipboardSink, CopyOutcome, CopyTicket};
use crate::error::Error;
use crate::section::SectionRange;

/// Clipboard stand-in that records writes and finishes them on the next poll.
#[derive(Default)]
pub(crate) struct MemoryClipboard {
    pub(crate) written: Vec<String>,
    pub(crate) fail_with: Option<String>,
    pub(crate) pending: Vec<CopyOutcome>,
}

impl ClipboardSink for MemoryClipboard {
    fn submit(&mut self, text: String) -> CopyTicket {
        let ticket = CopyTicket(self.written.len() as u64);
        let result = match &self.fail_with {
            Some(reason) => Err(Error::Clipboard(reason.clone())),
            None => Ok(text.chars().count()),
        };
        self.written.push(text);
        self.pending.push(CopyOutcome { ticket, result });
        ticket
    }

    fn poll(&mut self) -> Vec<CopyOutcome> {
        std::mem::take(&mut self.pending)
    }
}

fn sample() -> Document {
    Document::from_text("# A\nbody1\n## B\nbody2\n# C\nbody3\n")
}

#[test]
fn test_select_sets_selection_and_scroll() {
    let mut doc = sample();
    let mut clipboard = MemoryClipboard::default();

    let report = perform_action(&mut doc, 2, SectionAction::SELECT, true, &mut clipboard).unwrap();

    assert_eq!(
        report.range,
        SectionRange {
            start_line: 2,
            end_line: 3
        }
    );
    assert!(report.copy.is_none());
    let selection = doc.selection().unwrap();
    assert_eq!(selection.start, Position::new(2, 0));
    assert_eq!(selection.end, Position::new(3, 5));
    assert_eq!(doc.take_scroll_request(), Some(selection));
    assert!(clipboard.written.is_empty());
}

#[test]
fn test_copy_queues_exact_section_text() {
    let mut doc = sample();
    let mut clipboard = MemoryClipboard::default();

    let report = perform_action(&mut doc, 0, SectionAction::COPY, false, &mut clipboard).unwrap();

    assert_eq!(report.copy, Some(CopyTicket(0)));
    assert_eq!(clipboard.written, ["body1\n## B\nbody2"]);
    assert!(doc.selection().is_none());

    let outcomes = clipboard.poll();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].result.as_ref().unwrap(), &16);
}

#[test]
fn test_both_actions_in_one_call() {
    let mut doc = sample();
    let mut clipboard = MemoryClipboard::default();

    let report = perform_action(&mut doc, 4, SectionAction::BOTH, true, &mut clipboard).unwrap();

    assert!(report.copy.is_some());
    assert_eq!(clipboard.written, ["# C\nbody3"]);
    assert!(doc.selection().is_some());
}

#[test]
fn test_copy_uses_native_line_separator() {
    let mut doc = Document::from_text("# A\r\none\r\ntwo\r\n");
    let mut clipboard = MemoryClipboard::default();

    perform_action(&mut doc, 0, SectionAction::COPY, true, &mut clipboard).unwrap();

    assert_eq!(clipboard.written, ["# A\r\none\r\ntwo"]);
}

#[test]
fn test_nothing_happens_without_a_section() {
    let mut doc = Document::from_text("# Only");
    let mut clipboard = MemoryClipboard::default();

    assert!(perform_action(&mut doc, 0, SectionAction::BOTH, false, &mut clipboard).is_none());
    assert!(perform_action(&mut doc, 3, SectionAction::BOTH, true, &mut clipboard).is_none());
    assert!(doc.selection().is_none());
    assert!(doc.take_scroll_request().is_none());
    assert!(clipboard.written.is_empty());
}

#[test]
fn test_heading_only_section_selects_heading_line() {
    let mut doc = Document::from_text("# Only");
    let mut clipboard = MemoryClipboard::default();

    perform_action(&mut doc, 0, SectionAction::BOTH, true, &mut clipboard).unwrap();

    assert_eq!(clipboard.written, ["# Only"]);
    assert_eq!(doc.selection().unwrap().end, Position::new(0, 6));
    assert_eq!(doc.line_count(), 1);
}

#[test]
fn test_each_copy_gets_its_own_ticket() {
    let mut doc = sample();
    let mut clipboard = MemoryClipboard::default();

    let first = perform_action(&mut doc, 0, SectionAction::COPY, true, &mut clipboard).unwrap();
    let second = perform_action(&mut doc, 2, SectionAction::COPY, true, &mut clipboard).unwrap();

    assert_ne!(first.copy, second.copy);
    assert_eq!(clipboard.poll().len(), 2);
}
