//! Stack orientation and main/cross axis projection.

use crate::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction in which a stack lays out its items.
///
/// `Horizontal` places items left to right, so the main axis is width and the
/// cross axis is height. `Vertical` is the transpose, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Left to right
    Horizontal,
    /// Top to bottom
    #[default]
    Vertical,
}

impl Orientation {
    /// Extent of `size` along the main axis.
    #[must_use]
    pub const fn main(self, size: Size) -> i32 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Extent of `size` along the cross axis.
    #[must_use]
    pub const fn cross(self, size: Size) -> i32 {
        match self {
            Self::Horizontal => size.height,
            Self::Vertical => size.width,
        }
    }

    /// Build a size from main and cross extents.
    #[must_use]
    pub const fn compose(self, main: i32, cross: i32) -> Size {
        match self {
            Self::Horizontal => Size::new(main, cross),
            Self::Vertical => Size::new(cross, main),
        }
    }

    /// Build a point from a main-axis offset and a cross-axis offset.
    #[must_use]
    pub const fn point(self, main: i32, cross: i32) -> Point {
        match self {
            Self::Horizontal => Point::new(main, cross),
            Self::Vertical => Point::new(cross, main),
        }
    }

    /// Replace the main-axis extent of `rect`, keeping its leading edge.
    #[must_use]
    pub const fn with_main(self, rect: Rect, main: i32) -> Rect {
        match self {
            Self::Horizontal => rect.with_width(main),
            Self::Vertical => rect.with_height(main),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => f.write_str("horizontal"),
            Self::Vertical => f.write_str("vertical"),
        }
    }
}

/// Error returned when an orientation string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrientationParseError(pub String);

impl fmt::Display for OrientationParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown orientation '{}'", self.0)
    }
}

impl std::error::Error for OrientationParseError {}

impl FromStr for Orientation {
    type Err = OrientationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            other => Err(OrientationParseError(other.to_string())),
        }
    }
}
