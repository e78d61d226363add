//! The editable surface: document lines shown verbatim with icons after each heading.
//!
//! The surface subscribes to two kinds of change. When the document revision or the settings
//! revision moves, every affordance is stale and placement starts over. When only the viewport
//! moves, affordances that scrolled out are dropped and the newly visible headings get theirs.
//! Either way, placement only ever scans the visible lines.

use crate::buffer::{Document, TextBuffer, TextSpan};
use crate::section::{headings_in, Heading};
use crate::settings::Settings;
use crate::surface::{place_affordances, AffordanceSet, HeadingSurface};
use std::ops::Range;
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Which notifications a refresh saw.
pub struct ChangeSet {
    /// Document text changed.
    pub doc_changed: bool,
    /// Visible line range changed.
    pub viewport_changed: bool,
    /// Settings were saved.
    pub settings_changed: bool,
}

impl ChangeSet {
    #[must_use]
    /// Whether anything changed at all.
    pub fn any(self) -> bool {
        self.doc_changed || self.viewport_changed || self.settings_changed
    }
}

/// Viewport and affordances of the editable view.
#[derive(Debug, Default)]
pub struct EditorSurface {
    top: usize,
    height: usize,
    affordances: AffordanceSet,
    seen_revision: Option<u64>,
    seen_settings: Option<u64>,
    seen_viewport: Option<Range<usize>>,
}

struct EditorHeadings<'a> {
    doc: &'a Document,
    affordances: &'a mut AffordanceSet,
}

impl HeadingSurface for EditorHeadings<'_> {
    type Element = Heading;

    fn locate_headings(&self, region: Range<usize>) -> Vec<Heading> {
        headings_in(self.doc, region)
    }

    fn element_key(&self, element: &Heading) -> usize {
        element.line
    }

    fn line_index(&self, element: &Heading) -> Option<usize> {
        Some(element.line)
    }

    fn anchor_column(&self, element: &Heading) -> usize {
        self.doc
            .line(element.line)
            .map_or(0, |text| text.width() + 1)
    }

    fn affordances(&mut self) -> &mut AffordanceSet {
        self.affordances
    }
}

impl EditorSurface {
    #[must_use]
    /// First visible line.
    pub fn top(&self) -> usize {
        self.top
    }

    #[must_use]
    /// Lines currently on screen.
    pub fn viewport(&self) -> Range<usize> {
        self.top..self.top + self.height
    }

    #[must_use]
    /// Attached affordances.
    pub fn affordances(&self) -> &AffordanceSet {
        &self.affordances
    }

    /// Records how many lines fit on screen.
    pub fn set_height(&mut self, height: usize) {
        self.height = height;
    }

    /// Scrolls just enough to keep `line` on screen.
    pub fn follow(&mut self, line: usize) {
        if line < self.top {
            self.top = line;
        } else if self.height > 0 && line >= self.top + self.height {
            self.top = line + 1 - self.height;
        }
    }

    /// Scrolls so `span` is on screen, preferring its first line when it does not fit.
    pub fn reveal(&mut self, span: TextSpan) {
        self.follow(span.end.line);
        self.follow(span.start.line);
    }

    /// Scrolls by `delta` lines, clamped to the document.
    pub fn scroll_by(&mut self, delta: isize, line_count: usize) {
        let max_top = line_count.saturating_sub(1);
        self.top = self.top.saturating_add_signed(delta).min(max_top);
    }

    /// Brings affordances up to date with the document, viewport and settings.
    pub fn refresh(
        &mut self,
        doc: &Document,
        settings: &Settings,
        settings_revision: u64,
    ) -> ChangeSet {
        let viewport = self.viewport();
        let changes = ChangeSet {
            doc_changed: self.seen_revision != Some(doc.revision()),
            viewport_changed: self.seen_viewport.as_ref() != Some(&viewport),
            settings_changed: self.seen_settings != Some(settings_revision),
        };
        if !changes.any() {
            return changes;
        }

        if changes.doc_changed || changes.settings_changed {
            self.affordances.clear();
        } else {
            self.affordances.retain(|line| viewport.contains(&line));
        }

        let mut surface = EditorHeadings {
            doc,
            affordances: &mut self.affordances,
        };
        place_affordances(&mut surface, viewport.clone(), settings);

        self.seen_revision = Some(doc.revision());
        self.seen_settings = Some(settings_revision);
        self.seen_viewport = Some(viewport);
        changes
    }
}

#[cfg(test)]
#[path = "tests/editor_view.rs"]
mod tests;
