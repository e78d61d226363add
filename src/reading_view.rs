//! The rendered (reading) surface.
//!
//! The document is rendered into a flat list of elements: headings lose their `#` markers and are
//! styled by level, every other line is shown as-is. Icons are then appended to the heading
//! elements in a post-processing pass over the rendered output, the same pass regardless of how
//! often the view is repainted.

use crate::buffer::Document;
use crate::error::Result;
use crate::formats::Format;
use crate::input::extract_headings;
use crate::settings::Settings;
use crate::surface::{place_affordances, AffordanceSet, HeadingSurface};
use std::ops::Range;
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Debug, PartialEq, Eq)]
/// What a rendered element came from.
pub enum ElementKind {
    /// A heading element.
    Heading {
        /// Heading level.
        level: usize,
        /// Source line of the heading.
        line: usize,
    },
    /// Any other source line.
    Body,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One rendered row.
pub struct RenderedElement {
    /// Element type.
    pub kind: ElementKind,
    /// Text to display.
    pub text: String,
}

/// Renders `doc` into elements, one per source line.
///
/// # Errors
///
/// Returns an error if heading discovery fails.
pub fn render(doc: &Document, format: &dyn Format) -> Result<Vec<RenderedElement>> {
    let source = doc.lines().join("\n");
    let mut headings = extract_headings(&source, format)?.into_iter().peekable();

    let elements = doc
        .lines()
        .iter()
        .enumerate()
        .map(|(line, text)| {
            while headings.peek().is_some_and(|h| h.line < line) {
                headings.next();
            }
            match headings.peek() {
                Some(h) if h.line == line => RenderedElement {
                    kind: ElementKind::Heading {
                        level: h.level,
                        line,
                    },
                    text: h.title.clone(),
                },
                _ => RenderedElement {
                    kind: ElementKind::Body,
                    text: text.clone(),
                },
            }
        })
        .collect();
    Ok(elements)
}

/// Rendered elements, scroll position, focus and affordances of the reading view.
#[derive(Debug, Default)]
pub struct ReadingSurface {
    elements: Vec<RenderedElement>,
    top: usize,
    height: usize,
    focus: Option<usize>,
    affordances: AffordanceSet,
    seen_revision: Option<u64>,
    seen_settings: Option<u64>,
}

struct RenderedHeadings<'a> {
    elements: &'a [RenderedElement],
    affordances: &'a mut AffordanceSet,
}

impl HeadingSurface for RenderedHeadings<'_> {
    type Element = usize;

    fn locate_headings(&self, region: Range<usize>) -> Vec<usize> {
        let end = region.end.min(self.elements.len());
        (region.start..end)
            .filter(|&i| matches!(self.elements[i].kind, ElementKind::Heading { .. }))
            .collect()
    }

    fn element_key(&self, element: &usize) -> usize {
        *element
    }

    fn line_index(&self, element: &usize) -> Option<usize> {
        match self.elements.get(*element)?.kind {
            ElementKind::Heading { line, .. } => Some(line),
            ElementKind::Body => None,
        }
    }

    fn anchor_column(&self, element: &usize) -> usize {
        self.elements
            .get(*element)
            .map_or(0, |e| e.text.width() + 1)
    }

    fn affordances(&mut self) -> &mut AffordanceSet {
        self.affordances
    }
}

impl ReadingSurface {
    #[must_use]
    /// Rendered elements.
    pub fn elements(&self) -> &[RenderedElement] {
        &self.elements
    }

    #[must_use]
    /// Attached affordances.
    pub fn affordances(&self) -> &AffordanceSet {
        &self.affordances
    }

    #[must_use]
    /// First visible element.
    pub fn top(&self) -> usize {
        self.top
    }

    #[must_use]
    /// Focused heading element, if any.
    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    #[must_use]
    /// Source line of the focused heading.
    pub fn focused_line(&self) -> Option<usize> {
        match self.elements.get(self.focus?)?.kind {
            ElementKind::Heading { line, .. } => Some(line),
            ElementKind::Body => None,
        }
    }

    /// Records how many rows fit on screen.
    pub fn set_height(&mut self, height: usize) {
        self.height = height;
    }

    /// Re-renders after document changes and re-runs the post-processing pass.
    ///
    /// Returns whether anything was re-rendered or re-placed.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails; the previous rendering is kept.
    pub fn refresh(
        &mut self,
        doc: &Document,
        settings: &Settings,
        settings_revision: u64,
        format: &dyn Format,
    ) -> Result<bool> {
        let doc_changed = self.seen_revision != Some(doc.revision());
        let settings_changed = self.seen_settings != Some(settings_revision);
        if !doc_changed && !settings_changed {
            return Ok(false);
        }

        if doc_changed {
            self.elements = render(doc, format)?;
            self.focus = self.focus.filter(|&i| i < self.elements.len());
            self.top = self.top.min(self.elements.len().saturating_sub(1));
        }
        self.affordances.clear();

        let mut surface = RenderedHeadings {
            elements: &self.elements,
            affordances: &mut self.affordances,
        };
        place_affordances(&mut surface, 0..self.elements.len(), settings);

        self.seen_revision = Some(doc.revision());
        self.seen_settings = Some(settings_revision);
        Ok(true)
    }

    /// Re-runs only the post-processing pass over the current rendering.
    ///
    /// Idempotent: headings that already carry icons are left alone.
    pub fn post_process(&mut self, settings: &Settings) -> usize {
        let mut surface = RenderedHeadings {
            elements: &self.elements,
            affordances: &mut self.affordances,
        };
        place_affordances(&mut surface, 0..self.elements.len(), settings)
    }

    fn heading_indices(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| matches!(e.kind, ElementKind::Heading { .. }))
            .map(|(i, _)| i)
    }

    /// Moves focus to the next heading element.
    pub fn focus_next(&mut self) {
        let after = self.focus.map_or(0, |i| i + 1);
        let next = self.heading_indices().find(|&i| i >= after);
        if let Some(next) = next {
            self.set_focus(next);
        }
    }

    /// Moves focus to the previous heading element.
    pub fn focus_prev(&mut self) {
        let before = self.focus.unwrap_or(self.elements.len());
        let prev = self.heading_indices().rev().find(|&i| i < before);
        if let Some(prev) = prev {
            self.set_focus(prev);
        }
    }

    /// Focuses element `index` and scrolls it into view.
    pub fn set_focus(&mut self, index: usize) {
        self.focus = Some(index);
        if index < self.top {
            self.top = index;
        } else if self.height > 0 && index >= self.top + self.height {
            self.top = index + 1 - self.height;
        }
    }

    /// Scrolls by `delta` rows, clamped to the rendering.
    pub fn scroll_by(&mut self, delta: isize) {
        let max_top = self.elements.len().saturating_sub(1);
        self.top = self.top.saturating_add_signed(delta).min(max_top);
    }
}

#[cfg(test)]
#[path = "tests/reading_view.rs"]
mod tests;
