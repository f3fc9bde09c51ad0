//! Core types for the grouping controller.

use crate::dom::Element;
use std::fmt;

/// The fixed class names the grouping controller stamps onto elements.
///
/// These names are a stable styling interface: hosts and stylesheets match
/// on them to render group headers and rows, so they must not change between
/// releases.
pub mod class {
    /// Every group header element.
    pub const GROUP: &str = "group";
    /// A header whose group is currently expanded.
    pub const GROUP_EXPANDED: &str = "group-expanded";
    /// A header whose group is currently collapsed.
    pub const GROUP_COLLAPSED: &str = "group-collapsed";
    /// The currently selected header. At most one element carries this.
    pub const GROUP_SELECTED: &str = "group-selected";
    /// A header that took over the host's first-row marker.
    pub const GROUP_FIRST: &str = "group-first";
    /// The leading row of an expanded group.
    pub const GROUP_FIRST_ROW: &str = "group-first-row";
    /// The leading row of a collapsed group.
    pub const GROUP_FIRST_ROW_COLLAPSED: &str = "group-first-row-collapsed";
    /// The expand/collapse toggle inside a header.
    pub const ICON: &str = "icon";
    /// The text label inside a header.
    pub const LABEL: &str = "label";
    /// The container wrapping a header's icon and label.
    pub const LINER: &str = "liner";
}

/// A grouping-field value extracted from a row's record.
///
/// Keys compare with deliberately loose, coercing equality: a numeric key and
/// its textual spelling are the same key (`GroupKey::from(0.0)` equals
/// `GroupKey::from("0")`), and two missing values are equal to each other but
/// to nothing else. Records whose grouping field is absent therefore fall
/// into a single implicit group rather than producing an error.
///
/// # Examples
///
/// ```rust
/// use bubbletea_grouped_table::group::GroupKey;
///
/// assert_eq!(GroupKey::from("7"), GroupKey::from(7.0));
/// assert_ne!(GroupKey::from("seven"), GroupKey::from(7.0));
/// assert_eq!(GroupKey::Missing, GroupKey::Missing);
/// assert_ne!(GroupKey::Missing, GroupKey::from(""));
/// ```
#[derive(Debug, Clone)]
pub enum GroupKey {
    /// A textual key.
    Text(String),
    /// A numeric key.
    Number(f64),
    /// The grouping field was absent from the record.
    Missing,
}

impl GroupKey {
    fn as_number(&self) -> Option<f64> {
        match self {
            GroupKey::Number(n) => Some(*n),
            GroupKey::Text(s) => s.trim().parse().ok(),
            GroupKey::Missing => None,
        }
    }
}

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (GroupKey::Missing, GroupKey::Missing) => true,
            (GroupKey::Missing, _) | (_, GroupKey::Missing) => false,
            (GroupKey::Text(a), GroupKey::Text(b)) => a == b,
            (GroupKey::Number(a), GroupKey::Number(b)) => a == b,
            // Mixed text/number falls back to numeric coercion.
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Text(s) => f.write_str(s),
            GroupKey::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            GroupKey::Missing => Ok(()),
        }
    }
}

impl From<&str> for GroupKey {
    fn from(value: &str) -> Self {
        GroupKey::Text(value.to_string())
    }
}

impl From<String> for GroupKey {
    fn from(value: String) -> Self {
        GroupKey::Text(value)
    }
}

impl From<f64> for GroupKey {
    fn from(value: f64) -> Self {
        GroupKey::Number(value)
    }
}

impl From<i64> for GroupKey {
    fn from(value: i64) -> Self {
        GroupKey::Number(value as f64)
    }
}

/// A row's data record, as seen by the grouping controller.
///
/// The controller reads exactly one thing from a record: the value of the
/// configured grouping field. Hosts implement this for whatever record type
/// backs their rows; a field the record does not have yields
/// [`GroupKey::Missing`].
pub trait Record {
    /// Returns the value of the named field.
    fn field(&self, name: &str) -> GroupKey;
}

/// One detected group: the key, the leading row, and (after materialization)
/// the inserted header element.
///
/// Boundaries live for a single render pass. They are accumulated while the
/// host formats rows, consumed when the pass completes, and discarded
/// wholesale at the start of the next pass; no identity is carried across
/// passes.
#[derive(Debug, Clone)]
pub struct GroupBoundary {
    /// The grouping-field value shared by the rows of this group.
    pub key: GroupKey,
    /// The first row of the group in render order.
    pub row: Element,
    /// The header element, populated by materialization.
    pub header: Option<Element>,
}
