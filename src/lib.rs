#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-grouped-table/")]

//! # bubbletea-grouped-table
//!
//! A row-grouping overlay for table widgets in
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs) applications.
//!
//! Given the rows a table renders and a grouping field, the overlay
//! partitions consecutive rows sharing that field's value into visual
//! groups, inserts a header in front of each group, and lets the user
//! collapse a group's rows or select a group as a unit instead of a row.
//!
//! ## Crate layout
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`group`] | The grouping controller: boundary detection, header materialization, collapse/expand and selection state |
//! | [`dom`] | The retained element model the controller tags and rearranges |
//! | [`table`] | A lightweight reference table host wired up to the controller |
//!
//! ## How it fits together
//!
//! The controller never renders rows itself and never talks to a data
//! source. A host table drives it through a handful of synchronous hooks:
//! once per row while formatting ([`group::Model::format_row`]), once after
//! a full render ([`group::Model::render_complete`]), and once per
//! column-resize or row-click event. Everything the controller does to the
//! host's output goes through class tags on [`dom::Element`]s — the fixed
//! names in [`group::class`] are a stable styling interface.
//!
//! ## Quick start
//!
//! ```rust
//! use bubbletea_grouped_table::prelude::*;
//!
//! let mut table = Table::new(vec![
//!     Column::new("Region").with_width(8),
//!     Column::new("City").with_width(12),
//! ])
//! .with_rows(vec![
//!     Row::new(vec!["West".into(), "Portland".into()]),
//!     Row::new(vec!["West".into(), "Oakland".into()]),
//!     Row::new(vec!["East".into(), "Boston".into()]),
//! ])
//! .with_grouping(Grouper::new("Region"));
//!
//! table.render();
//!
//! // Two headers: one per contiguous run of equal Region values.
//! assert_eq!(table.grouping().unwrap().groups().len(), 2);
//! print!("{}", table.view());
//! ```
//!
//! ## Using your own table widget
//!
//! [`table::Model`] is a reference host, not a requirement. To group rows
//! of an existing widget, create a [`group::Model`], call its hooks from
//! your render cycle, implement [`group::Record`] for your row data and
//! [`group::HostSelection`] for your selection state, and render every
//! element tagged [`group::class::GROUP`] with
//! [`group::Model::view_header`]. Custom selection policy goes through
//! [`group::Model::on_group_click`].

pub mod dom;
pub mod group;
pub mod table;

pub use dom::{Display, Element};
pub use group::{
    GroupBoundary, GroupKey, GroupStyles, HostSelection, Model as Grouper, Record, class,
};
pub use table::{Column, Model as Table, Row, TableStyles};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_grouped_table::prelude::*;
///
/// let grouper = Grouper::new("Region");
/// assert_eq!(grouper.group_by(), "Region");
/// ```
pub mod prelude {
    pub use crate::dom::{Display, Element};
    pub use crate::group::{
        GroupBoundary, GroupKey, GroupStyles, HostSelection, Model as Grouper, Record, class,
    };
    pub use crate::table::{Column, Model as Table, Row, TableStyles};
}
