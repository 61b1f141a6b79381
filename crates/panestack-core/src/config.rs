//! Stack tunables.

use serde::{Deserialize, Serialize};

/// Default gap between adjacent items, in pixels.
pub const DEFAULT_SPACING: i32 = 3;

/// Default amount a handle extends past each side of the seam it covers.
pub const DEFAULT_HANDLE_OVERLAP: i32 = 1;

/// Tunables shared by every item in a stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// Gap between adjacent items (not before the first or after the last)
    pub spacing: i32,
    /// Handle overhang on either side of a seam
    pub handle_overlap: i32,
    /// Time constant for opening animations, seconds
    pub open_time: f32,
    /// Time constant for closing and collapse animations, seconds
    pub close_time: f32,
    /// Visible fraction above which it snaps to 1
    pub visible_snap: f32,
    /// Visible fraction below which it snaps to 0
    pub hidden_snap: f32,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_SPACING,
            handle_overlap: DEFAULT_HANDLE_OVERLAP,
            open_time: 0.02,
            close_time: 0.03,
            visible_snap: 0.99,
            hidden_snap: 0.001,
        }
    }
}

impl StackConfig {
    /// Set the inter-item spacing. Negative values clamp to zero.
    #[must_use]
    pub fn spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing.max(0);
        self
    }

    /// Set the handle overlap. Negative values clamp to zero.
    #[must_use]
    pub fn handle_overlap(mut self, overlap: i32) -> Self {
        self.handle_overlap = overlap.max(0);
        self
    }

    /// Copy with every field forced into its valid range.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            spacing: self.spacing.max(0),
            handle_overlap: self.handle_overlap.max(0),
            ..self
        }
    }
}
