//! A lightweight table host with optional row grouping.
//!
//! This is a reference host for the [`group`](crate::group) controller: it
//! owns columns, rows and single-row selection, renders its rows into the
//! [`dom`](crate::dom) element tree, and fires the grouping hooks at the
//! right points of its render cycle. Applications with their own table
//! widget can ignore this module and drive `group::Model` directly; the
//! wiring here shows where each hook belongs.

use crate::dom::{Display, Element};
use crate::group;
use crate::group::{GroupKey, HostSelection, Record, class};
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;
use unicode_width::UnicodeWidthStr;

/// Class stamped on every rendered data row.
pub const ROW_CLASS: &str = "row";

/// Class stamped on the currently selected data row.
pub const ROW_SELECTED_CLASS: &str = "row-selected";

/// A table column with an optional fixed display width.
#[derive(Debug, Clone)]
pub struct Column {
    /// The column title, also used as the record field name.
    pub title: String,
    /// Fixed display width; defaults to the title's width.
    pub width: Option<usize>,
}

impl Column {
    /// Creates a column with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: None,
        }
    }

    /// Sets a fixed display width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }
}

/// A table row: one cell per column.
#[derive(Debug, Clone)]
pub struct Row {
    /// Cell contents, in column order.
    pub cells: Vec<String>,
}

impl Row {
    /// Creates a row from its cells.
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }
}

/// Adapter presenting a row's cells as a record keyed by column title.
struct RowRecord<'a> {
    columns: &'a [Column],
    cells: &'a [String],
}

impl Record for RowRecord<'_> {
    fn field(&self, name: &str) -> GroupKey {
        match self.columns.iter().position(|c| c.title == name) {
            Some(index) => self
                .cells
                .get(index)
                .map(|cell| GroupKey::from(cell.as_str()))
                .unwrap_or(GroupKey::Missing),
            None => GroupKey::Missing,
        }
    }
}

/// Styles for the table's own chrome.
#[derive(Debug, Clone)]
pub struct TableStyles {
    /// Style for the column title line.
    pub header: Style,
    /// Style for the selected data row.
    pub selected_row: Style,
}

impl Default for TableStyles {
    fn default() -> Self {
        Self {
            header: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#1A1A1A",
                Dark: "#DDDDDD",
            }),
            selected_row: Style::new().foreground(Color::from("212")),
        }
    }
}

/// A table model with columns, rows, single selection and optional grouping.
///
/// # Examples
///
/// ```rust
/// use bubbletea_grouped_table::group;
/// use bubbletea_grouped_table::table::{Column, Model, Row};
///
/// let mut table = Model::new(vec![
///     Column::new("Region").with_width(8),
///     Column::new("City").with_width(12),
/// ])
/// .with_rows(vec![
///     Row::new(vec!["West".into(), "Portland".into()]),
///     Row::new(vec!["West".into(), "Oakland".into()]),
///     Row::new(vec!["East".into(), "Boston".into()]),
/// ])
/// .with_grouping(group::Model::new("Region"));
///
/// table.render();
/// assert_eq!(table.grouping().unwrap().groups().len(), 2);
/// println!("{}", table.view());
/// ```
#[derive(Debug)]
pub struct Model {
    columns: Vec<Column>,
    rows: Vec<Row>,
    selected: Option<usize>,
    body: Element,
    row_elements: Vec<Element>,
    grouper: Option<group::Model>,
    styles: TableStyles,
}

impl Model {
    /// Creates an empty table with the given columns.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            selected: None,
            body: Element::new(),
            row_elements: Vec::new(),
            grouper: None,
            styles: TableStyles::default(),
        }
    }

    /// Replaces the table's rows.
    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    /// Attaches a grouping controller.
    pub fn with_grouping(mut self, grouper: group::Model) -> Self {
        self.grouper = Some(grouper);
        self
    }

    /// Sets the table styles.
    pub fn with_styles(mut self, styles: TableStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Appends a row. Call [`render`](Model::render) afterwards to rebuild
    /// the element tree.
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Returns the attached grouping controller, if any.
    pub fn grouping(&self) -> Option<&group::Model> {
        self.grouper.as_ref()
    }

    /// Returns the attached grouping controller mutably.
    pub fn grouping_mut(&mut self) -> Option<&mut group::Model> {
        self.grouper.as_mut()
    }

    /// Returns the body element holding the rendered rows and headers.
    pub fn body(&self) -> &Element {
        &self.body
    }

    /// Returns the currently selected row's data.
    pub fn selected_row(&self) -> Option<&Row> {
        self.rows.get(self.selected?)
    }

    fn column_width(&self, index: usize) -> usize {
        let column = &self.columns[index];
        column.width.unwrap_or_else(|| column.title.width())
    }

    /// Total rendered width of one row: the two-cell cursor prefix plus the
    /// columns and their separators.
    fn table_width(&self) -> usize {
        let cells: usize = (0..self.columns.len()).map(|i| self.column_width(i)).sum();
        let separators = 3 * self.columns.len().saturating_sub(1);
        2 + cells + separators
    }

    /// Runs a full render pass: rebuilds the element tree, formats every
    /// row through the grouping hook, then signals render completion.
    pub fn render(&mut self) {
        self.body = Element::new();
        self.row_elements.clear();
        let width = self.table_width();

        // The grouper moves out for the duration of the pass so row records
        // can borrow the table's data.
        let mut grouper = self.grouper.take();

        for (index, row) in self.rows.iter().enumerate() {
            let element = Element::new();
            element.add_class(ROW_CLASS);
            element.set_width(width);
            if index == 0 {
                element.add_class(group::DEFAULT_FIRST_ROW_CLASS);
            }
            if self.selected == Some(index) {
                element.add_class(ROW_SELECTED_CLASS);
            }
            self.body.append_child(&element);

            if let Some(g) = grouper.as_mut() {
                let record = RowRecord {
                    columns: &self.columns,
                    cells: &row.cells,
                };
                g.format_row(&element, &record);
            }

            self.row_elements.push(element);
        }

        if let Some(g) = grouper.as_mut() {
            g.render_complete();
        }
        self.grouper = grouper;
    }

    /// Sorts rows by the given column and re-renders.
    pub fn sort_by(&mut self, column: &str) {
        let Some(index) = self.columns.iter().position(|c| c.title == column) else {
            return;
        };
        self.rows
            .sort_by(|a, b| a.cells.get(index).cmp(&b.cells.get(index)));
        // Pre-pass before the re-render, to avoid flicker between the sort
        // and the new headers.
        if let Some(g) = self.grouper.as_mut() {
            g.sort_changed();
        }
        self.render();
    }

    /// Changes a column's width and resyncs row and header widths.
    pub fn set_column_width(&mut self, index: usize, width: usize) {
        let Some(column) = self.columns.get_mut(index) else {
            return;
        };
        column.width = Some(width);

        let table_width = self.table_width();
        for element in &self.row_elements {
            element.set_width(table_width);
        }
        if let Some(g) = self.grouper.as_mut() {
            g.column_resized();
        }
    }

    /// Selects the row at `index`, as a user click would.
    ///
    /// Row clicks clear any group selection.
    pub fn click_row(&mut self, index: usize) {
        if index >= self.rows.len() {
            return;
        }

        if let Some(previous) = self.selected {
            if let Some(element) = self.row_elements.get(previous) {
                element.remove_class(ROW_SELECTED_CLASS);
            }
        }
        self.selected = Some(index);
        if let Some(element) = self.row_elements.get(index) {
            element.add_class(ROW_SELECTED_CLASS);
        }

        if let Some(g) = self.grouper.as_mut() {
            g.row_clicked();
        }
    }

    /// Routes a click that landed on `target` somewhere in the rendered
    /// tree.
    ///
    /// The grouping overlay gets the first look; clicks it consumes (header
    /// and icon clicks) never reach row selection. Anything else selects the
    /// enclosing row, if there is one.
    pub fn click(&mut self, target: &Element) {
        if let Some(mut g) = self.grouper.take() {
            let consumed = g.handle_click(self, target);
            self.grouper = Some(g);
            if consumed {
                return;
            }
        }

        if let Some(row) = target.closest(ROW_CLASS) {
            if let Some(index) = self.row_elements.iter().position(|el| el.ptr_eq(&row)) {
                self.click_row(index);
            }
        }
    }

    /// Moves the selection to the next row, wrapping at the end.
    pub fn select_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let next = match self.selected {
            Some(index) => (index + 1) % self.rows.len(),
            None => 0,
        };
        self.click_row(next);
    }

    /// Moves the selection to the previous row, wrapping at the start.
    pub fn select_prev(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let previous = match self.selected {
            Some(0) | None => self.rows.len() - 1,
            Some(index) => index - 1,
        };
        self.click_row(previous);
    }

    /// Returns the header of the group containing the row at `index`.
    fn header_for_row(&self, index: usize) -> Option<Element> {
        let grouper = self.grouper.as_ref()?;
        let mut header = None;
        for boundary in grouper.groups() {
            let lead = self
                .row_elements
                .iter()
                .position(|el| el.ptr_eq(&boundary.row))?;
            if lead <= index {
                header = boundary.header.clone();
            } else {
                break;
            }
        }
        header
    }

    /// Handles key messages: up/down move the row cursor, enter toggles the
    /// cursor row's group, space selects it.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            match key_msg.key {
                KeyCode::Up => self.select_prev(),
                KeyCode::Down => self.select_next(),
                KeyCode::Enter => {
                    if let Some(header) = self.selected.and_then(|i| self.header_for_row(i)) {
                        if let Some(g) = self.grouper.as_mut() {
                            g.toggle_visibility(&header);
                        }
                    }
                }
                KeyCode::Char(' ') => {
                    if let Some(header) = self.selected.and_then(|i| self.header_for_row(i)) {
                        if let Some(mut g) = self.grouper.take() {
                            g.select_group(self, &header);
                            self.grouper = Some(g);
                        }
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Renders the table: the column title line, then headers and visible
    /// rows in element-tree order.
    pub fn view(&self) -> String {
        let mut output = String::new();

        let mut titles = String::from("  ");
        for (index, column) in self.columns.iter().enumerate() {
            if index > 0 {
                titles.push_str(" | ");
            }
            titles.push_str(&pad(&column.title, self.column_width(index)));
        }
        output.push_str(&self.styles.header.clone().render(&titles));
        output.push('\n');

        for element in self.body.children() {
            if element.has_class(class::GROUP) {
                if let Some(g) = &self.grouper {
                    output.push_str(&g.view_header(&element));
                    output.push('\n');
                }
                continue;
            }
            if element.display() == Display::Hidden {
                continue;
            }
            let Some(index) = self.row_elements.iter().position(|el| el.ptr_eq(&element)) else {
                continue;
            };

            let selected = element.has_class(ROW_SELECTED_CLASS);
            let mut line = String::from(if selected { "> " } else { "  " });
            for (col, _) in self.columns.iter().enumerate() {
                if col > 0 {
                    line.push_str(" | ");
                }
                let cell = self.rows[index].cells.get(col).map_or("", String::as_str);
                line.push_str(&pad(cell, self.column_width(col)));
            }

            if selected {
                output.push_str(&self.styles.selected_row.clone().render(&line));
            } else {
                output.push_str(&line);
            }
            output.push('\n');
        }

        output
    }
}

impl HostSelection for Model {
    fn selected_rows(&self) -> Vec<Element> {
        self.row_elements
            .iter()
            .filter(|el| el.has_class(ROW_SELECTED_CLASS))
            .cloned()
            .collect()
    }

    fn deselect_row(&mut self, row: &Element) {
        row.remove_class(ROW_SELECTED_CLASS);
        if let Some(index) = self.row_elements.iter().position(|el| el.ptr_eq(row)) {
            if self.selected == Some(index) {
                self.selected = None;
            }
        }
    }
}

fn pad(text: &str, width: usize) -> String {
    let mut out = text.to_string();
    out.push_str(&" ".repeat(width.saturating_sub(text.width())));
    out
}
