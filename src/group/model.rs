//! The grouping controller.

use super::style::{COLLAPSED_ICON, EXPANDED_ICON, GroupStyles};
use super::types::{GroupBoundary, GroupKey, Record, class};
use crate::dom::{Display, Element};
use std::fmt;
use unicode_width::UnicodeWidthStr;

/// Default class a host stamps on its first rendered row.
///
/// During materialization this marker is transferred from the row to the
/// group header standing in front of it (as [`class::GROUP_FIRST`]), so
/// first-element styling lands on the header instead of the row. Hosts using
/// a different marker configure it with [`Model::with_first_row_class`].
pub const DEFAULT_FIRST_ROW_CLASS: &str = "first-row";

/// Selection capabilities the grouping controller needs from its host table.
///
/// Selecting a group deselects every selected row, so a group and a data row
/// are never selected at the same time. This trait is the whole of that
/// dependency; hosts with no row selection can implement both methods as
/// no-ops.
pub trait HostSelection {
    /// Returns the host's currently selected row elements.
    fn selected_rows(&self) -> Vec<Element>;

    /// Deselects the given row.
    fn deselect_row(&mut self, row: &Element);
}

type GroupClickFn = Box<dyn FnMut(&Element)>;

/// A row-grouping overlay for a host table.
///
/// The controller partitions consecutive rows sharing a grouping-field value
/// into groups, inserts a header element in front of each group, and lets the
/// user collapse a group's rows or select a group as a unit.
///
/// It never renders rows itself. The host drives it through five entry
/// points, all synchronous:
///
/// - [`format_row`](Model::format_row) once per row while the host formats
///   its rows, in render order;
/// - [`render_complete`](Model::render_complete) once after all rows of a
///   pass are formatted;
/// - [`sort_changed`](Model::sort_changed) when the sort order changes
///   (optional flicker-avoidance pre-pass);
/// - [`column_resized`](Model::column_resized) when column widths change;
/// - [`row_clicked`](Model::row_clicked) when the user clicks a data row,
///   plus [`handle_click`](Model::handle_click) for clicks landing on a
///   header.
///
/// # Examples
///
/// ```rust
/// use bubbletea_grouped_table::dom::Element;
/// use bubbletea_grouped_table::group::{self, GroupKey, Record};
///
/// struct Item(&'static str);
///
/// impl Record for Item {
///     fn field(&self, name: &str) -> GroupKey {
///         match name {
///             "region" => GroupKey::from(self.0),
///             _ => GroupKey::Missing,
///         }
///     }
/// }
///
/// let mut grouper = group::Model::new("region");
/// let body = Element::new();
/// for region in ["west", "west", "east"] {
///     let row = Element::new();
///     body.append_child(&row);
///     grouper.format_row(&row, &Item(region));
/// }
/// grouper.render_complete();
///
/// // Two groups, each header sitting immediately before its leading row.
/// assert_eq!(grouper.groups().len(), 2);
/// assert_eq!(body.children().len(), 5);
/// ```
pub struct Model {
    /// The data field whose value partitions rows into groups.
    group_by: String,
    /// Key of the group currently being scanned during a format pass.
    current_group_key: Option<GroupKey>,
    /// Boundaries of the current pass, in render order.
    groups: Vec<GroupBoundary>,
    /// Guard ensuring exactly one detect/materialize cycle per render pass.
    reset_groups: bool,
    /// The selected header, if any.
    selected_group: Option<Element>,
    /// Whether a header body click selects the group (the default policy).
    select_on_click: bool,
    first_row_class: String,
    styles: GroupStyles,
    on_group_click: Vec<GroupClickFn>,
}

impl Model {
    /// Creates a grouping controller that groups rows by the given field.
    pub fn new(group_by: impl Into<String>) -> Self {
        Self {
            group_by: group_by.into(),
            current_group_key: None,
            groups: Vec::new(),
            reset_groups: true,
            selected_group: None,
            select_on_click: true,
            first_row_class: DEFAULT_FIRST_ROW_CLASS.to_string(),
            styles: GroupStyles::default(),
            on_group_click: Vec::new(),
        }
    }

    /// Sets the header styles.
    pub fn with_styles(mut self, styles: GroupStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Enables or disables the default selection policy.
    ///
    /// When disabled, a header body click still notifies the registered
    /// [`on_group_click`](Model::on_group_click) listeners and still swallows
    /// the click, but no group gets selected; hosts wanting a custom policy
    /// call [`select_group`](Model::select_group) from a listener themselves.
    pub fn with_select_on_click(mut self, select: bool) -> Self {
        self.select_on_click = select;
        self
    }

    /// Sets the class the host stamps on its first rendered row.
    pub fn with_first_row_class(mut self, class: impl Into<String>) -> Self {
        self.first_row_class = class.into();
        self
    }

    /// Registers a listener for header body clicks.
    ///
    /// Listeners fire before the default selection policy runs, with the
    /// clicked header element.
    pub fn on_group_click(&mut self, listener: impl FnMut(&Element) + 'static) {
        self.on_group_click.push(Box::new(listener));
    }

    /// Returns the configured grouping field.
    pub fn group_by(&self) -> &str {
        &self.group_by
    }

    /// Returns the header styles.
    pub fn styles(&self) -> &GroupStyles {
        &self.styles
    }

    /// Returns the boundaries detected by the latest format pass.
    pub fn groups(&self) -> &[GroupBoundary] {
        &self.groups
    }

    /// Returns the currently selected header, if any.
    pub fn selected_group(&self) -> Option<&Element> {
        self.selected_group.as_ref()
    }

    /// Row-format hook. The host calls this once per row, in render order,
    /// while formatting the row.
    ///
    /// Compares the row's grouping-field value against the previous row's;
    /// on change, records a new boundary and tags the row as the leading row
    /// of its group. The first call of a pass discards every boundary left
    /// over from the previous pass, so stale groups never leak forward.
    ///
    /// Always returns `true`: the host proceeds with its own default cell
    /// rendering regardless of grouping.
    pub fn format_row(&mut self, row: &Element, record: &dyn Record) -> bool {
        if self.reset_groups {
            self.groups.clear();
            self.current_group_key = None;
            self.reset_groups = false;
        }

        let key = record.field(&self.group_by);

        // The marker starts unset, so the first row of a pass always opens
        // a group.
        if self.current_group_key.as_ref() != Some(&key) {
            row.add_class(class::GROUP_FIRST_ROW);
            self.groups.push(GroupBoundary {
                key: key.clone(),
                row: row.clone(),
                header: None,
            });
        }

        self.current_group_key = Some(key);
        true
    }

    /// Render-complete signal: materializes the pending boundaries.
    ///
    /// Inserts one header per boundary, immediately before its leading row,
    /// then arms the reset guard. Calling this again without an intervening
    /// format pass is a no-op, which tolerates hosts that emit more than one
    /// render-completion signal per logical render.
    pub fn render_complete(&mut self) {
        self.init_groups();
    }

    /// Sort-changed signal: same guarded materialization as
    /// [`render_complete`](Model::render_complete), run as a pre-pass to
    /// avoid flicker between the sort and the following render.
    pub fn sort_changed(&mut self) {
        self.init_groups();
    }

    fn init_groups(&mut self) {
        if self.reset_groups {
            return;
        }

        for index in 0..self.groups.len() {
            let header = self.insert_group(&self.groups[index]);
            self.groups[index].header = Some(header);
        }

        self.reset_groups = true;
    }

    /// Builds a header element for one boundary and inserts it before the
    /// leading row.
    fn insert_group(&self, boundary: &GroupBoundary) -> Element {
        let row = &boundary.row;

        let header = Element::new();
        header.add_class(class::GROUP);
        // Groups start expanded.
        header.add_class(class::GROUP_EXPANDED);

        // If this is the first row of the table, the header now stands in
        // front of it and takes over the marker.
        if row.has_class(&self.first_row_class) {
            row.remove_class(&self.first_row_class);
            header.add_class(class::GROUP_FIRST);
        }

        let liner = Element::new();
        liner.add_class(class::LINER);

        let icon = Element::new();
        icon.add_class(class::ICON);
        liner.append_child(&icon);

        let label = Element::with_text(boundary.key.to_string());
        label.add_class(class::LABEL);
        liner.append_child(&label);

        header.append_child(&liner);

        set_group_width(&header, row);

        let parent = row
            .parent()
            .expect("leading row is not attached to a table body");
        parent.insert_before(&header, row);

        header
    }

    /// Column-resize signal: re-sizes every header of the latest
    /// materialized pass to its leading row's current width.
    ///
    /// A no-op when no groups exist.
    pub fn column_resized(&mut self) {
        for boundary in &self.groups {
            if let Some(header) = &boundary.header {
                set_group_width(header, &boundary.row);
            }
        }
    }

    /// Row-click signal: clears group selection unconditionally.
    pub fn row_clicked(&mut self) {
        self.unselect_group();
    }

    /// Routes a click whose target sits inside a group header.
    ///
    /// A click on the icon toggles the group's visibility; a click anywhere
    /// else on the header notifies the registered listeners and, under the
    /// default policy, selects the group. Returns `true` when the click was
    /// consumed, in which case the host must not run its own row-click
    /// handling for this event; `false` means the target was not part of any
    /// header and the click is the host's to handle.
    pub fn handle_click(&mut self, host: &mut dyn HostSelection, target: &Element) -> bool {
        if target.closest(class::ICON).is_some() {
            self.toggle_visibility(target);
            return true;
        }

        if target.closest(class::GROUP).is_some() {
            self.handle_group_click(host, target);
            return true;
        }

        false
    }

    fn handle_group_click(&mut self, host: &mut dyn HostSelection, target: &Element) {
        let group = target
            .closest(class::GROUP)
            .expect("click target is not inside a group header");

        for listener in &mut self.on_group_click {
            listener(&group);
        }

        if self.select_on_click {
            self.select_group(host, &group);
        }
    }

    /// Selects a header, replacing any previous selection.
    ///
    /// The previous header loses its selected tag, the new one gains it, and
    /// every selected host row is deselected: a group and a data row are
    /// never selected at the same time.
    pub fn select_group(&mut self, host: &mut dyn HostSelection, header: &Element) {
        self.unselect_group();

        header.add_class(class::GROUP_SELECTED);
        self.selected_group = Some(header.clone());

        for row in host.selected_rows() {
            host.deselect_row(&row);
        }
    }

    /// Clears group selection, if any.
    pub fn unselect_group(&mut self) {
        if let Some(header) = self.selected_group.take() {
            header.remove_class(class::GROUP_SELECTED);
        }
    }

    /// Toggles the visibility of the group whose header contains `target`.
    ///
    /// Swaps the header between its expanded and collapsed classes, swaps
    /// the leading row's marker to match, then walks forward through the
    /// leading row's siblings hiding (or re-showing) every row until the
    /// next group begins or the list ends. A group with zero interior rows
    /// is legal; the walk stops immediately.
    ///
    /// The walk is O(rows in the group) per toggle; nothing caches group
    /// sizes.
    ///
    /// # Panics
    ///
    /// Panics when `target` is not inside a header, or the header has no
    /// following sibling. Both mean the host and the controller disagree
    /// about the element tree, which is an integration defect.
    pub fn toggle_visibility(&mut self, target: &Element) {
        let group = target
            .closest(class::GROUP)
            .expect("click target is not inside a group header");
        let leading_row = group
            .next_sibling()
            .expect("group header has no leading row sibling");

        let visible = if group.has_class(class::GROUP_EXPANDED) {
            group.replace_class(class::GROUP_EXPANDED, class::GROUP_COLLAPSED);
            false
        } else {
            group.replace_class(class::GROUP_COLLAPSED, class::GROUP_EXPANDED);
            true
        };

        if visible {
            leading_row.replace_class(class::GROUP_FIRST_ROW_COLLAPSED, class::GROUP_FIRST_ROW);
        } else {
            leading_row.replace_class(class::GROUP_FIRST_ROW, class::GROUP_FIRST_ROW_COLLAPSED);
        }

        // Hide or show the interior rows: everything up to the next group's
        // header or leading row, or the end of the list.
        let mut next = leading_row.next_sibling();
        while let Some(sibling) = next {
            if sibling.has_class(class::GROUP)
                || sibling.has_class(class::GROUP_FIRST_ROW)
                || sibling.has_class(class::GROUP_FIRST_ROW_COLLAPSED)
            {
                break;
            }

            sibling.set_display(if visible {
                Display::Visible
            } else {
                Display::Hidden
            });

            next = sibling.next_sibling();
        }
    }

    /// Renders a header element as a styled line of the given header's
    /// width.
    ///
    /// The line is the state icon rendered in the icon style, followed by
    /// the group label rendered in the label style, padded with spaces to
    /// the header's width (measured in display cells) and wrapped in the
    /// style matching the header's current classes. Hosts that render the
    /// element tree to the terminal call this for every element carrying
    /// the [`class::GROUP`] tag.
    pub fn view_header(&self, header: &Element) -> String {
        let collapsed = header.has_class(class::GROUP_COLLAPSED);
        let glyph = if collapsed {
            COLLAPSED_ICON
        } else {
            EXPANDED_ICON
        };

        let label = header
            .query(class::LABEL)
            .map(|label| label.text())
            .unwrap_or_default();

        // Pad from the plain widths; the icon and label styles add ANSI
        // sequences with no cell width.
        let pad = header
            .width()
            .saturating_sub(glyph.width() + 1 + label.width());

        let mut line = format!(
            "{} {}",
            self.styles.icon.clone().render(glyph),
            self.styles.label.clone().render(&label)
        );
        line.push_str(&" ".repeat(pad));

        let style = if header.has_class(class::GROUP_SELECTED) {
            &self.styles.header_selected
        } else if collapsed {
            &self.styles.header_collapsed
        } else {
            &self.styles.header
        };

        style.clone().render(&line)
    }
}

/// Sizes a header to its leading row's current rendered width.
fn set_group_width(header: &Element, row: &Element) {
    header.set_width(row.width());
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("group_by", &self.group_by)
            .field("groups", &self.groups.len())
            .field("reset_groups", &self.reset_groups)
            .field("selected_group", &self.selected_group.is_some())
            .field("select_on_click", &self.select_on_click)
            .field("listeners", &self.on_group_click.len())
            .finish()
    }
}
