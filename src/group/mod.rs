//! Row grouping for tabular widgets.
//!
//! This module implements the grouping overlay proper: given the rows a host
//! table renders and a grouping field, it partitions consecutive rows sharing
//! that field's value into groups, puts a header element in front of each
//! group, and maintains collapse and selection state for them.
//!
//! ## How a render pass works
//!
//! Grouping is re-derived from scratch on every full render of the host:
//!
//! 1. **Detection** — the host calls [`Model::format_row`] once per row, in
//!    render order. Whenever a row's grouping-field value differs from the
//!    previous row's, a [`GroupBoundary`] is recorded and the row is tagged
//!    as the leading row of a new group. Grouping is purely by contiguous
//!    run: a value that recurs later in the data starts a fresh group.
//! 2. **Materialization** — the host calls [`Model::render_complete`] once
//!    after all rows are formatted. Each pending boundary becomes a header
//!    element (`liner` wrapping `icon` and `label`), sized to its leading
//!    row and inserted immediately before it. A guard flag makes this
//!    idempotent until the next detection pass begins, and makes the next
//!    pass start from a clean slate.
//!
//! Column resizes and row clicks drive two independent side effects:
//! [`Model::column_resized`] re-sizes every header to its leading row, and
//! [`Model::row_clicked`] clears group selection.
//!
//! ## Visual contract
//!
//! All state is expressed through the fixed class names in [`class`]; they
//! are a stable interface for hosts and stylesheets. [`GroupStyles`] maps
//! those states to lipgloss styles for hosts that render with
//! [`Model::view_header`].
//!
//! ## Concurrency
//!
//! Everything here is synchronous and single-threaded: each entry point runs
//! to completion inside the host's own event handling, and one controller
//! instance belongs to exactly one table.

mod model;
mod style;
mod types;

#[cfg(test)]
mod tests;

pub use model::{DEFAULT_FIRST_ROW_CLASS, HostSelection, Model};
pub use style::{COLLAPSED_ICON, EXPANDED_ICON, GroupStyles};
pub use types::{GroupBoundary, GroupKey, Record, class};
