//! Host panel seam.
//!
//! The layout solver treats content as a measurable, positionable,
//! showable box. Hosts implement [`Panel`] for whatever they draw.

use crate::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// A rectangle of content managed by a layout stack.
pub trait Panel {
    /// Current rectangle in stack-local coordinates.
    fn rect(&self) -> Rect;

    /// Replace the rectangle.
    fn set_rect(&mut self, rect: Rect);

    /// Whether the host wants this panel shown.
    fn is_visible(&self) -> bool;

    /// Show or hide the panel.
    fn set_visible(&mut self, visible: bool);

    /// Resize, keeping the origin.
    fn reshape(&mut self, width: i32, height: i32) {
        let rect = self.rect().with_size(Size::new(width, height));
        self.set_rect(rect);
    }

    /// Move, keeping the size.
    fn set_origin(&mut self, origin: Point) {
        let rect = self.rect().with_origin(origin);
        self.set_rect(rect);
    }
}

/// Minimal named panel: a rectangle and a visibility flag.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoxPanel {
    /// Host-side name
    pub name: String,
    /// Current rectangle
    pub rect: Rect,
    /// Visibility flag
    pub visible: bool,
}

impl BoxPanel {
    /// A visible panel of the given size at the origin.
    #[must_use]
    pub fn new(name: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            name: name.into(),
            rect: Rect::new(0, 0, width, height),
            visible: true,
        }
    }

    /// Start hidden.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

impl Panel for BoxPanel {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
