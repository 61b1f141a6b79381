//! Resize handle seam.
//!
//! A handle is the draggable strip on the trailing edge of a stacked item.
//! Mouse capture and drag mechanics belong to the host; the solver only
//! reads capture state and writes the handle's rectangle, limits and
//! visibility once per frame.

use crate::axis::Orientation;
use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Edge of the item a handle is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeSide {
    /// Trailing edge of a horizontally stacked item
    Right,
    /// Trailing edge of a vertically stacked item
    Bottom,
}

impl ResizeSide {
    /// The trailing side for items stacked along `orientation`.
    #[must_use]
    pub const fn trailing(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => Self::Right,
            Orientation::Vertical => Self::Bottom,
        }
    }
}

/// A draggable separator owned by one layout item.
pub trait ResizeHandle {
    /// Create a handle for the given side. `min_cross` is the owning item's
    /// cross-axis minimum.
    fn attach(side: ResizeSide, min_cross: i32) -> Self
    where
        Self: Sized;

    /// Whether the handle currently holds mouse capture (a drag is live).
    fn has_capture(&self) -> bool;

    /// Set the allowed main-axis size range of the owning item.
    fn set_resize_limits(&mut self, min: i32, max: i32);

    /// Current `(min, max)` limits.
    fn resize_limits(&self) -> (i32, i32);

    /// Set the hit rectangle.
    fn set_rect(&mut self, rect: Rect);

    /// Current hit rectangle.
    fn rect(&self) -> Rect;

    /// Show or hide the handle.
    fn set_visible(&mut self, visible: bool);

    /// Whether the handle is shown.
    fn is_visible(&self) -> bool;

    /// Clamp a requested main-axis size into the current limits.
    fn clamp_drag(&self, requested: i32) -> i32 {
        let (min, max) = self.resize_limits();
        requested.min(max).max(min)
    }
}

/// Default handle: plain state with host-driven capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeBar {
    side: ResizeSide,
    min_cross: i32,
    min_limit: i32,
    max_limit: i32,
    rect: Rect,
    visible: bool,
    captured: bool,
}

impl ResizeBar {
    /// Side this bar sits on.
    #[must_use]
    pub const fn side(&self) -> ResizeSide {
        self.side
    }

    /// Cross-axis minimum of the owning item.
    #[must_use]
    pub const fn min_cross(&self) -> i32 {
        self.min_cross
    }

    /// Host signals the pointer grabbed this bar.
    pub fn begin_drag(&mut self) {
        self.captured = true;
    }

    /// Host signals the pointer released this bar.
    pub fn end_drag(&mut self) {
        self.captured = false;
    }
}

impl ResizeHandle for ResizeBar {
    fn attach(side: ResizeSide, min_cross: i32) -> Self {
        Self {
            side,
            min_cross,
            min_limit: 0,
            max_limit: i32::MAX,
            rect: Rect::default(),
            visible: false,
            captured: false,
        }
    }

    fn has_capture(&self) -> bool {
        self.captured
    }

    fn set_resize_limits(&mut self, min: i32, max: i32) {
        self.min_limit = min;
        self.max_limit = max;
    }

    fn resize_limits(&self) -> (i32, i32) {
        (self.min_limit, self.max_limit)
    }

    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}
