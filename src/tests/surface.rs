use super::{
    enabled_buttons, is_painted, place_affordances, Affordance, AffordanceSet, Button,
    HeadingSurface,
};
use crate::settings::Settings;
use std::ops::Range;

/// Rows of (heading line, text width); `None` rows are body text.
struct FakeSurface {
    rows: Vec<Option<(usize, usize)>>,
    set: AffordanceSet,
}

impl HeadingSurface for FakeSurface {
    type Element = usize;

    fn locate_headings(&self, region: Range<usize>) -> Vec<usize> {
        region
            .filter(|&row| self.rows.get(row).copied().flatten().is_some())
            .collect()
    }

    fn element_key(&self, element: &usize) -> usize {
        *element
    }

    fn line_index(&self, element: &usize) -> Option<usize> {
        self.rows[*element].map(|(line, _)| line)
    }

    fn anchor_column(&self, element: &usize) -> usize {
        self.rows[*element].map_or(0, |(_, width)| width + 1)
    }

    fn affordances(&mut self) -> &mut AffordanceSet {
        &mut self.set
    }
}

fn surface() -> FakeSurface {
    FakeSurface {
        rows: vec![Some((0, 5)), None, Some((4, 8)), None],
        set: AffordanceSet::default(),
    }
}

#[test]
fn test_placing_twice_attaches_once() {
    let mut s = surface();
    let settings = Settings::default();

    assert_eq!(place_affordances(&mut s, 0..4, &settings), 2);
    assert_eq!(place_affordances(&mut s, 0..4, &settings), 0);
    assert_eq!(s.set.len(), 2);
}

#[test]
fn test_placement_respects_region() {
    let mut s = surface();
    place_affordances(&mut s, 1..3, &Settings::default());

    assert!(s.set.get(0).is_none());
    let affordance = s.set.get(2).unwrap();
    assert_eq!(affordance.line, 4);
    assert_eq!(affordance.column, 9);
}

#[test]
fn test_no_buttons_means_no_affordance() {
    let mut s = surface();
    let settings = Settings {
        show_select_button: false,
        show_copy_button: false,
        ..Settings::default()
    };
    assert_eq!(place_affordances(&mut s, 0..4, &settings), 0);
    assert!(s.set.is_empty());
}

#[test]
fn test_enabled_buttons_follow_settings() {
    let copy_only = Settings {
        show_select_button: false,
        ..Settings::default()
    };
    assert_eq!(enabled_buttons(&copy_only), vec![Button::Copy]);
    assert_eq!(
        enabled_buttons(&Settings::default()),
        vec![Button::Select, Button::Copy]
    );
}

#[test]
fn test_retain_drops_rows_outside_region() {
    let mut s = surface();
    place_affordances(&mut s, 0..4, &Settings::default());
    s.set.retain(|row| row >= 2);
    assert_eq!(s.set.iter().map(|a| a.row).collect::<Vec<_>>(), vec![2]);
}

#[test]
fn test_hit_maps_click_to_line_and_button() {
    let mut s = surface();
    place_affordances(&mut s, 0..4, &Settings::default());

    // Row 0 anchors at column 6: "[s]" covers 6..9, "[c]" covers 9..12.
    assert_eq!(s.set.hit(0, 6, 80), Some((0, Button::Select)));
    assert_eq!(s.set.hit(0, 11, 80), Some((0, Button::Copy)));
    assert_eq!(s.set.hit(0, 12, 80), None);
    assert_eq!(s.set.hit(1, 6, 80), None);
    assert_eq!(s.set.hit(2, 9, 80), Some((4, Button::Select)));
}

#[test]
fn test_icons_are_pulled_inside_narrow_surfaces() {
    let affordance = Affordance {
        line: 0,
        row: 0,
        column: 40,
        buttons: vec![Button::Select, Button::Copy],
    };
    assert_eq!(affordance.width(), 6);
    assert_eq!(affordance.paint_column(20), 14);
    assert_eq!(affordance.button_at(19, 20), Some(Button::Copy));
}

#[test]
fn test_visibility_is_presentation_only() {
    assert!(is_painted(3, true, None, None));
    assert!(is_painted(3, false, Some(3), None));
    assert!(is_painted(3, false, None, Some(3)));
    assert!(!is_painted(3, false, Some(2), Some(4)));
}

#[test]
fn test_button_actions() {
    assert!(Button::Select.action().select);
    assert!(Button::Copy.action().copy);
    assert_eq!(Button::Copy.label(), "Copy Section");
}
