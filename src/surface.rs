//! Heading icons ("affordances") shared by every rendering surface.
//!
//! A surface only has to say how it finds heading elements, which source line an element stands
//! for, and where its icon goes. [`place_affordances`] does the rest the same way for the
//! editable view and the rendered view. Attachment is keyed by element, so placing twice over
//! the same element leaves exactly one affordance.

use crate::actions::SectionAction;
use crate::settings::Settings;
use std::collections::BTreeMap;
use std::ops::Range;
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// One clickable icon.
pub enum Button {
    /// Selects the section.
    Select,
    /// Copies the section.
    Copy,
}

impl Button {
    #[must_use]
    /// Glyphs painted for the button.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Select => "[s]",
            Self::Copy => "[c]",
        }
    }

    #[must_use]
    /// Accessible label, used in the help line.
    pub fn label(self) -> &'static str {
        match self {
            Self::Select => "Select Section",
            Self::Copy => "Copy Section",
        }
    }

    #[must_use]
    /// The section command this button runs.
    pub fn action(self) -> SectionAction {
        match self {
            Self::Select => SectionAction::SELECT,
            Self::Copy => SectionAction::COPY,
        }
    }

    fn width(self) -> usize {
        self.icon().width()
    }
}

#[must_use]
/// Buttons enabled by `settings`, in display order.
pub fn enabled_buttons(settings: &Settings) -> Vec<Button> {
    let mut buttons = Vec::with_capacity(2);
    if settings.show_select_button {
        buttons.push(Button::Select);
    }
    if settings.show_copy_button {
        buttons.push(Button::Copy);
    }
    buttons
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Icons attached next to one heading element.
pub struct Affordance {
    /// Source line of the heading; the line section commands run on.
    pub line: usize,
    /// Surface row the heading element occupies.
    pub row: usize,
    /// Terminal cell the icons want to start at.
    pub column: usize,
    /// Buttons offered, left to right.
    pub buttons: Vec<Button>,
}

impl Affordance {
    #[must_use]
    /// Total painted width of all buttons.
    pub fn width(&self) -> usize {
        self.buttons.iter().map(|b| b.width()).sum()
    }

    #[must_use]
    /// Column actually painted at in a surface `width` cells wide.
    ///
    /// Icons that would run off the right edge are pulled back inside it.
    pub fn paint_column(&self, width: usize) -> usize {
        self.column.min(width.saturating_sub(self.width()))
    }

    #[must_use]
    /// Button under `column` when painted in a surface `width` cells wide.
    pub fn button_at(&self, column: usize, width: usize) -> Option<Button> {
        let mut left = self.paint_column(width);
        for &button in &self.buttons {
            let right = left + button.width();
            if (left..right).contains(&column) {
                return Some(button);
            }
            left = right;
        }
        None
    }
}

#[must_use]
/// Whether an affordance on `row` is painted this frame.
///
/// Visibility never decides whether an affordance exists, only whether it is drawn.
pub fn is_painted(
    row: usize,
    always_show: bool,
    focus: Option<usize>,
    hover: Option<usize>,
) -> bool {
    always_show || focus == Some(row) || hover == Some(row)
}

#[derive(Clone, Debug, Default)]
/// Affordances attached to a surface, keyed by element.
pub struct AffordanceSet {
    entries: BTreeMap<usize, Affordance>,
}

impl AffordanceSet {
    /// Attaches `affordance` to the element `key` unless it already carries one.
    ///
    /// Returns whether anything was attached.
    pub fn attach(&mut self, key: usize, affordance: Affordance) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, affordance);
        true
    }

    /// Keeps only the affordances whose element key passes `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(usize) -> bool) {
        self.entries.retain(|&key, _| keep(key));
    }

    /// Detaches everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    /// Affordance attached to element `key`.
    pub fn get(&self, key: usize) -> Option<&Affordance> {
        self.entries.get(&key)
    }

    /// Attached affordances in element order.
    pub fn iter(&self) -> impl Iterator<Item = &Affordance> {
        self.entries.values()
    }

    #[must_use]
    /// Number of attached affordances.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    /// Whether nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    /// Heading line and button under a click at (`row`, `column`).
    pub fn hit(&self, row: usize, column: usize, width: usize) -> Option<(usize, Button)> {
        self.entries
            .values()
            .filter(|a| a.row == row)
            .find_map(|a| a.button_at(column, width).map(|b| (a.line, b)))
    }
}

/// What a rendering surface must provide for heading icons to be placed on it.
pub trait HeadingSurface {
    /// The surface's notion of a heading element.
    type Element;

    /// Heading elements whose rows fall in `region`.
    fn locate_headings(&self, region: Range<usize>) -> Vec<Self::Element>;

    /// Key (and row) identifying `element` on this surface.
    fn element_key(&self, element: &Self::Element) -> usize;

    /// Source line section commands should run on for `element`.
    fn line_index(&self, element: &Self::Element) -> Option<usize>;

    /// Column the icons should start at.
    fn anchor_column(&self, element: &Self::Element) -> usize;

    /// The surface's attached affordances.
    fn affordances(&mut self) -> &mut AffordanceSet;
}

/// Attaches an affordance to every heading element in `region` that lacks one.
///
/// Returns how many were newly attached. Nothing is attached when both buttons are disabled.
pub fn place_affordances<S: HeadingSurface + ?Sized>(
    surface: &mut S,
    region: Range<usize>,
    settings: &Settings,
) -> usize {
    let buttons = enabled_buttons(settings);
    if buttons.is_empty() {
        return 0;
    }

    let mut attached = 0;
    for element in surface.locate_headings(region) {
        let Some(line) = surface.line_index(&element) else {
            continue;
        };
        let row = surface.element_key(&element);
        let affordance = Affordance {
            line,
            row,
            column: surface.anchor_column(&element),
            buttons: buttons.clone(),
        };
        if surface.affordances().attach(row, affordance) {
            attached += 1;
        }
    }
    tracing::trace!(attached, "placed affordances");
    attached
}

#[cfg(test)]
#[path = "tests/surface.rs"]
mod tests;
