//! Styling for group headers.
//!
//! Class names decide *which* style applies (see [`super::types::class`]);
//! this module decides what each state looks like. All defaults use
//! `AdaptiveColor` so headers stay readable in both light and dark
//! terminals.
//!
//! # Examples
//!
//! ```rust
//! use bubbletea_grouped_table::group::{GroupStyles, COLLAPSED_ICON, EXPANDED_ICON};
//! use lipgloss_extras::prelude::*;
//!
//! let mut styles = GroupStyles::default();
//! styles.header = Style::new()
//!     .background(Color::from("#7D56F4"))
//!     .foreground(Color::from("#FFFFFF"))
//!     .bold(true);
//!
//! assert_ne!(EXPANDED_ICON, COLLAPSED_ICON);
//! ```

use lipgloss_extras::prelude::*;

/// Glyph shown on an expanded group's header icon.
pub const EXPANDED_ICON: &str = "▼";

/// Glyph shown on a collapsed group's header icon.
pub const COLLAPSED_ICON: &str = "▶";

/// Styles for every visual state a group header can be in.
#[derive(Debug, Clone)]
pub struct GroupStyles {
    /// Style for an expanded header.
    pub header: Style,
    /// Style for a collapsed header.
    pub header_collapsed: Style,
    /// Style for the selected header, whichever visibility state it is in.
    pub header_selected: Style,
    /// Style applied to the icon glyph.
    pub icon: Style,
    /// Style applied to the label text.
    pub label: Style,
}

impl Default for GroupStyles {
    fn default() -> Self {
        let header_fg = AdaptiveColor {
            Light: "#1A1A1A",
            Dark: "#DDDDDD",
        };
        let header_bg = AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        };

        Self {
            header: Style::new()
                .foreground(header_fg.clone())
                .background(header_bg.clone())
                .bold(true),
            header_collapsed: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#9B9B9B",
                    Dark: "#777777",
                })
                .background(header_bg)
                .bold(true),
            header_selected: Style::new()
                .background(Color::from("62"))
                .foreground(Color::from("230"))
                .bold(true),
            icon: Style::new().foreground(AdaptiveColor {
                Light: "#847A85",
                Dark: "#979797",
            }),
            label: Style::new(),
        }
    }
}
