//! A minimal retained element model for table hosts.
//!
//! Grouping works by tagging and rearranging the elements a host table has
//! already rendered: rows get marker classes, headers are inserted as
//! siblings, collapsed rows are hidden through their display state. This
//! module provides just enough of an element tree to express those
//! operations: class tags, display state, a measured width, text content and
//! parent/child/sibling relationships.
//!
//! [`Element`] is a cheaply clonable handle to shared node state, so a
//! grouping controller and its host table can both hold references to the
//! same row. Identity comparisons use [`Element::ptr_eq`].
//!
//! # Examples
//!
//! ```rust
//! use bubbletea_grouped_table::dom::{Display, Element};
//!
//! let body = Element::new();
//! let row = Element::new();
//! body.append_child(&row);
//!
//! let header = Element::new();
//! header.add_class("group");
//! body.insert_before(&header, &row);
//!
//! assert!(header.next_sibling().unwrap().ptr_eq(&row));
//! assert_eq!(row.display(), Display::Visible);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Whether an element occupies a line in the rendered output.
///
/// The terminal analog of toggling a row's inline display style between
/// `table-row` and `none`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    /// The element is rendered normally.
    #[default]
    Visible,
    /// The element is skipped when the host renders its output.
    Hidden,
}

struct Node {
    classes: Vec<String>,
    display: Display,
    width: usize,
    text: String,
    children: Vec<Element>,
    parent: Option<Weak<RefCell<Node>>>,
}

impl Node {
    fn new(text: String) -> Self {
        Self {
            classes: Vec::new(),
            display: Display::Visible,
            width: 0,
            text,
            children: Vec::new(),
            parent: None,
        }
    }
}

/// A shared handle to one element in a host table's rendered tree.
#[derive(Clone)]
pub struct Element {
    inner: Rc<RefCell<Node>>,
}

impl Default for Element {
    fn default() -> Self {
        Self::new()
    }
}

impl Element {
    /// Creates an empty element with no classes and no content.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Node::new(String::new()))),
        }
    }

    /// Creates an element carrying the given text content.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Node::new(text.into()))),
        }
    }

    /// Returns `true` when both handles refer to the same element.
    pub fn ptr_eq(&self, other: &Element) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Adds a class tag, ignoring duplicates.
    pub fn add_class(&self, class: &str) {
        let mut node = self.inner.borrow_mut();
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
    }

    /// Removes a class tag if present.
    pub fn remove_class(&self, class: &str) {
        self.inner.borrow_mut().classes.retain(|c| c != class);
    }

    /// Replaces one class tag with another.
    ///
    /// The old class is removed when present and the new class is added
    /// either way, mirroring the usual stylesheet toolkit semantics.
    pub fn replace_class(&self, old: &str, new: &str) {
        self.remove_class(old);
        self.add_class(new);
    }

    /// Returns `true` when the element carries the given class tag.
    pub fn has_class(&self, class: &str) -> bool {
        self.inner.borrow().classes.iter().any(|c| c == class)
    }

    /// Returns a snapshot of the element's class tags.
    pub fn class_list(&self) -> Vec<String> {
        self.inner.borrow().classes.clone()
    }

    /// Returns the element's display state.
    pub fn display(&self) -> Display {
        self.inner.borrow().display
    }

    /// Sets the element's display state.
    pub fn set_display(&self, display: Display) {
        self.inner.borrow_mut().display = display;
    }

    /// Returns the element's measured width in terminal cells.
    pub fn width(&self) -> usize {
        self.inner.borrow().width
    }

    /// Records the element's measured width in terminal cells.
    ///
    /// Widths are assigned by whoever renders the element (the host table
    /// for rows, the grouping controller for headers); the element itself
    /// does no measuring.
    pub fn set_width(&self, width: usize) {
        self.inner.borrow_mut().width = width;
    }

    /// Returns the element's text content.
    pub fn text(&self) -> String {
        self.inner.borrow().text.clone()
    }

    /// Appends a child element, re-parenting it onto this element.
    pub fn append_child(&self, child: &Element) {
        child.inner.borrow_mut().parent = Some(Rc::downgrade(&self.inner));
        self.inner.borrow_mut().children.push(child.clone());
    }

    /// Inserts `new` as a child of this element, immediately before
    /// `reference`.
    ///
    /// # Panics
    ///
    /// Panics when `reference` is not a child of this element; a caller that
    /// trips this has lost track of the tree it is mutating, which is an
    /// integration defect rather than a recoverable condition.
    pub fn insert_before(&self, new: &Element, reference: &Element) {
        new.inner.borrow_mut().parent = Some(Rc::downgrade(&self.inner));
        let mut node = self.inner.borrow_mut();
        let index = node
            .children
            .iter()
            .position(|c| c.ptr_eq(reference))
            .expect("insert_before reference element is not a child of this element");
        node.children.insert(index, new.clone());
    }

    /// Removes all children, leaving them detached.
    pub fn clear_children(&self) {
        let children = std::mem::take(&mut self.inner.borrow_mut().children);
        for child in &children {
            child.inner.borrow_mut().parent = None;
        }
    }

    /// Returns a snapshot of the element's children, in order.
    pub fn children(&self) -> Vec<Element> {
        self.inner.borrow().children.clone()
    }

    /// Returns the element's parent, if attached.
    pub fn parent(&self) -> Option<Element> {
        let node = self.inner.borrow();
        let weak = node.parent.as_ref()?;
        weak.upgrade().map(|inner| Element { inner })
    }

    /// Returns the sibling immediately after this element, if any.
    pub fn next_sibling(&self) -> Option<Element> {
        let parent = self.parent()?;
        let node = parent.inner.borrow();
        let index = node.children.iter().position(|c| c.ptr_eq(self))?;
        node.children.get(index + 1).cloned()
    }

    /// Walks from this element up through its ancestors and returns the
    /// first element carrying the given class, including this element
    /// itself.
    pub fn closest(&self, class: &str) -> Option<Element> {
        let mut current = Some(self.clone());
        while let Some(element) = current {
            if element.has_class(class) {
                return Some(element);
            }
            current = element.parent();
        }
        None
    }

    /// Returns the first descendant carrying the given class, searching
    /// depth-first. Does not consider this element itself.
    pub fn query(&self, class: &str) -> Option<Element> {
        for child in self.children() {
            if child.has_class(class) {
                return Some(child);
            }
            if let Some(found) = child.query(class) {
                return Some(found);
            }
        }
        None
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.inner.borrow();
        f.debug_struct("Element")
            .field("classes", &node.classes)
            .field("display", &node.display)
            .field("width", &node.width)
            .field("text", &node.text)
            .field("children", &node.children.len())
            .finish()
    }
}
