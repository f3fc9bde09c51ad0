//! Tests for the grouping controller.

use super::*;
use crate::dom::{Display, Element};
use lipgloss_extras::lipgloss::strip_ansi;
use lipgloss_extras::prelude::*;
use unicode_width::UnicodeWidthStr;

/// A record with a single "category" field.
struct Rec(GroupKey);

impl Record for Rec {
    fn field(&self, name: &str) -> GroupKey {
        match name {
            "category" => self.0.clone(),
            _ => GroupKey::Missing,
        }
    }
}

/// A host whose selection state the tests can inspect.
#[derive(Default)]
struct FakeHost {
    selected: Vec<Element>,
}

impl HostSelection for FakeHost {
    fn selected_rows(&self) -> Vec<Element> {
        self.selected.clone()
    }

    fn deselect_row(&mut self, row: &Element) {
        self.selected.retain(|r| !r.ptr_eq(row));
    }
}

fn grouper() -> Model {
    Model::new("category")
}

/// Runs one detection pass: builds a row per key under `body` and feeds it
/// through the row-format hook.
fn format_pass(grouper: &mut Model, body: &Element, keys: &[&str]) -> Vec<Element> {
    let mut rows = Vec::new();
    for (i, key) in keys.iter().enumerate() {
        let row = Element::new();
        row.add_class("row");
        row.set_width(40);
        if i == 0 {
            row.add_class(DEFAULT_FIRST_ROW_CLASS);
        }
        body.append_child(&row);
        assert!(grouper.format_row(&row, &Rec(GroupKey::from(*key))));
        rows.push(row);
    }
    rows
}

fn headers(body: &Element) -> Vec<Element> {
    body.children()
        .into_iter()
        .filter(|el| el.has_class(class::GROUP))
        .collect()
}

fn position_of(body: &Element, el: &Element) -> usize {
    body.children()
        .iter()
        .position(|c| c.ptr_eq(el))
        .expect("element is not in the body")
}

#[test]
fn test_detector_opens_group_on_every_key_change() {
    let mut g = grouper();
    let body = Element::new();
    let rows = format_pass(&mut g, &body, &["a", "a", "b", "b", "b", "a"]);

    // A recurring key still starts a fresh group: grouping is by
    // contiguous run, not global key equality.
    assert_eq!(g.groups().len(), 3);
    assert!(g.groups()[0].row.ptr_eq(&rows[0]));
    assert!(g.groups()[1].row.ptr_eq(&rows[2]));
    assert!(g.groups()[2].row.ptr_eq(&rows[5]));

    for (i, row) in rows.iter().enumerate() {
        assert_eq!(
            row.has_class(class::GROUP_FIRST_ROW),
            matches!(i, 0 | 2 | 5),
            "leading marker wrong on row {}",
            i
        );
    }
}

#[test]
fn test_zero_rows_produce_zero_groups() {
    let mut g = grouper();
    let body = Element::new();
    g.render_complete();

    assert!(g.groups().is_empty());
    assert!(body.children().is_empty());
}

#[test]
fn test_materialize_inserts_one_header_before_each_leading_row() {
    let mut g = grouper();
    let body = Element::new();
    let rows = format_pass(&mut g, &body, &["a", "a", "b"]);
    g.render_complete();

    assert_eq!(headers(&body).len(), g.groups().len());
    for boundary in g.groups() {
        let header = boundary.header.as_ref().expect("boundary not materialized");
        assert!(header.has_class(class::GROUP));
        assert!(header.has_class(class::GROUP_EXPANDED));
        assert_eq!(
            position_of(&body, header) + 1,
            position_of(&body, &boundary.row)
        );
    }

    // Header structure: liner wrapping icon and label, label text from the
    // group key.
    let first = g.groups()[0].header.as_ref().unwrap();
    let liner = first.query(class::LINER).expect("header has no liner");
    assert!(liner.query(class::ICON).is_some());
    assert_eq!(first.query(class::LABEL).unwrap().text(), "a");

    // Rows 5 elements total: 2 headers + 3 rows.
    assert_eq!(body.children().len(), rows.len() + 2);
}

#[test]
fn test_first_row_marker_transfers_to_header() {
    let mut g = grouper();
    let body = Element::new();
    let rows = format_pass(&mut g, &body, &["a", "b"]);
    g.render_complete();

    let first_header = g.groups()[0].header.as_ref().unwrap();
    assert!(first_header.has_class(class::GROUP_FIRST));
    assert!(!rows[0].has_class(DEFAULT_FIRST_ROW_CLASS));

    let second_header = g.groups()[1].header.as_ref().unwrap();
    assert!(!second_header.has_class(class::GROUP_FIRST));
}

#[test]
fn test_headers_take_their_leading_rows_width() {
    let mut g = grouper();
    let body = Element::new();
    let rows = format_pass(&mut g, &body, &["a", "b"]);
    g.render_complete();

    for boundary in g.groups() {
        assert_eq!(boundary.header.as_ref().unwrap().width(), 40);
    }

    // Column resize: rows get wider, headers follow.
    for row in &rows {
        row.set_width(55);
    }
    g.column_resized();
    for boundary in g.groups() {
        assert_eq!(boundary.header.as_ref().unwrap().width(), 55);
    }
}

#[test]
fn test_column_resize_with_no_groups_is_a_no_op() {
    let mut g = grouper();
    g.column_resized();
    assert!(g.groups().is_empty());
}

#[test]
fn test_materialize_twice_is_a_no_op() {
    let mut g = grouper();
    let body = Element::new();
    format_pass(&mut g, &body, &["a", "b"]);
    g.render_complete();
    let count = body.children().len();

    // Hosts can emit several render-completion signals for one logical
    // render; no duplicate headers may appear.
    g.render_complete();
    g.sort_changed();
    assert_eq!(body.children().len(), count);
    assert_eq!(headers(&body).len(), 2);
}

#[test]
fn test_sort_changed_materializes_as_a_pre_pass() {
    let mut g = grouper();
    let body = Element::new();
    format_pass(&mut g, &body, &["a", "b"]);
    g.sort_changed();

    assert_eq!(headers(&body).len(), 2);
    g.render_complete();
    assert_eq!(headers(&body).len(), 2);
}

#[test]
fn test_next_pass_discards_stale_boundaries() {
    let mut g = grouper();
    let body = Element::new();
    format_pass(&mut g, &body, &["a", "b"]);
    g.render_complete();

    // A re-render builds a fresh body; the first formatted row clears the
    // previous pass's boundaries.
    let body2 = Element::new();
    let rows2 = format_pass(&mut g, &body2, &["c"]);
    assert_eq!(g.groups().len(), 1);
    assert_eq!(g.groups()[0].key, GroupKey::from("c"));
    assert!(g.groups()[0].row.ptr_eq(&rows2[0]));

    g.render_complete();
    assert_eq!(headers(&body2).len(), 1);
}

#[test]
fn test_collapse_hides_exactly_the_interior_rows() {
    let mut g = grouper();
    let body = Element::new();
    let rows = format_pass(&mut g, &body, &["a", "a", "a", "b"]);
    g.render_complete();

    let header_a = g.groups()[0].header.clone().unwrap();
    let header_b = g.groups()[1].header.clone().unwrap();

    g.toggle_visibility(&header_a);

    assert!(header_a.has_class(class::GROUP_COLLAPSED));
    assert!(!header_a.has_class(class::GROUP_EXPANDED));
    assert!(rows[0].has_class(class::GROUP_FIRST_ROW_COLLAPSED));
    assert!(!rows[0].has_class(class::GROUP_FIRST_ROW));

    // Exactly the two interior rows are hidden; the leading row, the next
    // group's header and its rows are untouched.
    assert_eq!(rows[0].display(), Display::Visible);
    assert_eq!(rows[1].display(), Display::Hidden);
    assert_eq!(rows[2].display(), Display::Hidden);
    assert_eq!(header_b.display(), Display::Visible);
    assert_eq!(rows[3].display(), Display::Visible);

    g.toggle_visibility(&header_a);

    assert!(header_a.has_class(class::GROUP_EXPANDED));
    assert!(rows[0].has_class(class::GROUP_FIRST_ROW));
    for row in &rows {
        assert_eq!(row.display(), Display::Visible);
    }
}

#[test]
fn test_collapsing_the_last_group_stops_at_end_of_list() {
    let mut g = grouper();
    let body = Element::new();
    let rows = format_pass(&mut g, &body, &["a", "b", "b"]);
    g.render_complete();

    let header_b = g.groups()[1].header.clone().unwrap();
    g.toggle_visibility(&header_b);

    assert_eq!(rows[1].display(), Display::Visible);
    assert_eq!(rows[2].display(), Display::Hidden);
}

#[test]
fn test_collapsing_a_group_with_no_interior_rows_is_trivial() {
    let mut g = grouper();
    let body = Element::new();
    let rows = format_pass(&mut g, &body, &["a", "b"]);
    g.render_complete();

    let header_a = g.groups()[0].header.clone().unwrap();
    g.toggle_visibility(&header_a);

    assert!(header_a.has_class(class::GROUP_COLLAPSED));
    assert!(rows[0].has_class(class::GROUP_FIRST_ROW_COLLAPSED));
    assert_eq!(rows[0].display(), Display::Visible);
    assert_eq!(rows[1].display(), Display::Visible);
}

#[test]
fn test_icon_click_toggles_without_selecting() {
    let mut g = grouper();
    let mut host = FakeHost::default();
    let body = Element::new();
    format_pass(&mut g, &body, &["a", "a"]);
    g.render_complete();

    let header = g.groups()[0].header.clone().unwrap();
    let icon = header.query(class::ICON).unwrap();

    assert!(g.handle_click(&mut host, &icon));
    assert!(header.has_class(class::GROUP_COLLAPSED));
    assert!(g.selected_group().is_none());
}

#[test]
fn test_header_body_click_notifies_and_selects() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let mut g = grouper();
    let mut host = FakeHost::default();
    let body = Element::new();
    format_pass(&mut g, &body, &["a", "b"]);
    g.render_complete();

    let clicked: Rc<RefCell<Vec<Element>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = clicked.clone();
    g.on_group_click(move |header| sink.borrow_mut().push(header.clone()));

    let header = g.groups()[0].header.clone().unwrap();
    let label = header.query(class::LABEL).unwrap();

    // The click lands on the label; it resolves to the enclosing header.
    assert!(g.handle_click(&mut host, &label));
    assert_eq!(clicked.borrow().len(), 1);
    assert!(clicked.borrow()[0].ptr_eq(&header));
    assert!(header.has_class(class::GROUP_SELECTED));
    assert!(g.selected_group().unwrap().ptr_eq(&header));
}

#[test]
fn test_click_outside_any_header_is_not_consumed() {
    let mut g = grouper();
    let mut host = FakeHost::default();
    let body = Element::new();
    let rows = format_pass(&mut g, &body, &["a"]);
    g.render_complete();

    assert!(!g.handle_click(&mut host, &rows[0]));
    assert!(g.selected_group().is_none());
}

#[test]
fn test_select_on_click_can_be_disabled() {
    let mut g = grouper().with_select_on_click(false);
    let mut host = FakeHost::default();
    let body = Element::new();
    format_pass(&mut g, &body, &["a"]);
    g.render_complete();

    let header = g.groups()[0].header.clone().unwrap();
    assert!(g.handle_click(&mut host, &header));
    assert!(g.selected_group().is_none());
    assert!(!header.has_class(class::GROUP_SELECTED));
}

#[test]
fn test_at_most_one_header_is_selected() {
    let mut g = grouper();
    let mut host = FakeHost::default();
    let body = Element::new();
    format_pass(&mut g, &body, &["a", "b"]);
    g.render_complete();

    let header_a = g.groups()[0].header.clone().unwrap();
    let header_b = g.groups()[1].header.clone().unwrap();

    g.select_group(&mut host, &header_a);
    g.select_group(&mut host, &header_b);

    assert!(!header_a.has_class(class::GROUP_SELECTED));
    assert!(header_b.has_class(class::GROUP_SELECTED));
    assert!(g.selected_group().unwrap().ptr_eq(&header_b));
}

#[test]
fn test_selecting_a_group_deselects_host_rows() {
    let mut g = grouper();
    let body = Element::new();
    let rows = format_pass(&mut g, &body, &["a", "a"]);
    g.render_complete();

    let mut host = FakeHost {
        selected: vec![rows[1].clone()],
    };
    let header = g.groups()[0].header.clone().unwrap();
    g.select_group(&mut host, &header);

    assert!(host.selected.is_empty());
    assert!(header.has_class(class::GROUP_SELECTED));
}

#[test]
fn test_row_click_clears_group_selection() {
    let mut g = grouper();
    let mut host = FakeHost::default();
    let body = Element::new();
    format_pass(&mut g, &body, &["a"]);
    g.render_complete();

    let header = g.groups()[0].header.clone().unwrap();
    g.select_group(&mut host, &header);
    assert!(g.selected_group().is_some());

    g.row_clicked();
    assert!(g.selected_group().is_none());
    assert!(!header.has_class(class::GROUP_SELECTED));

    // Unconditional: clicking a row with nothing selected is fine too.
    g.row_clicked();
    assert!(g.selected_group().is_none());
}

#[test]
fn test_numeric_and_textual_keys_group_together() {
    let mut g = grouper();
    let body = Element::new();

    for key in [GroupKey::from("0"), GroupKey::from(0.0), GroupKey::from("1")] {
        let row = Element::new();
        body.append_child(&row);
        g.format_row(&row, &Rec(key));
    }

    // "0" and 0 are the same key under loose comparison.
    assert_eq!(g.groups().len(), 2);
}

#[test]
fn test_missing_field_yields_one_implicit_group() {
    let mut g = Model::new("no-such-field");
    let body = Element::new();
    let rows = format_pass(&mut g, &body, &["a", "b", "c"]);
    g.render_complete();

    assert_eq!(g.groups().len(), 1);
    assert!(g.groups()[0].row.ptr_eq(&rows[0]));
    assert_eq!(g.groups()[0].key, GroupKey::Missing);
    // The implicit group's label is empty, not an error.
    let header = g.groups()[0].header.as_ref().unwrap();
    assert_eq!(header.query(class::LABEL).unwrap().text(), "");
}

#[test]
fn test_view_header_pads_to_header_width() {
    let mut g = grouper();
    let body = Element::new();
    format_pass(&mut g, &body, &["west"]);
    g.render_complete();

    let header = g.groups()[0].header.clone().unwrap();
    let line = strip_ansi(&g.view_header(&header));
    assert_eq!(line.width(), header.width());
    assert!(line.contains("west"));
    assert!(line.contains(EXPANDED_ICON));

    g.toggle_visibility(&header);
    let line = strip_ansi(&g.view_header(&header));
    assert!(line.contains(COLLAPSED_ICON));
}

#[test]
fn test_view_header_applies_icon_and_label_styles() {
    let mut plain = grouper();
    let body = Element::new();
    format_pass(&mut plain, &body, &["west"]);
    plain.render_complete();
    let header = plain.groups()[0].header.clone().unwrap();
    let default_rendering = plain.view_header(&header);

    let styled = plain.with_styles(GroupStyles {
        icon: Style::new().foreground(Color::from("200")),
        label: Style::new().bold(true).underline(true),
        ..GroupStyles::default()
    });
    let custom_rendering = styled.view_header(&header);

    // Customizing the icon and label styles changes the output, without
    // changing the visible text or its padded width.
    assert_ne!(custom_rendering, default_rendering);
    assert_eq!(
        strip_ansi(&custom_rendering),
        strip_ansi(&default_rendering)
    );
    assert_eq!(strip_ansi(&custom_rendering).width(), header.width());
}

#[test]
#[should_panic(expected = "not inside a group header")]
fn test_toggle_on_detached_element_is_a_fatal_defect() {
    let mut g = grouper();
    g.toggle_visibility(&Element::new());
}
