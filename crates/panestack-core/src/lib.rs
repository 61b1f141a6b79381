//! Core types and seams for the panestack layout solver.
//!
//! This crate provides the pieces the solver is built from:
//! - Pixel geometry: [`Point`], [`Size`], [`Rect`]
//! - Axis projection: [`Orientation`]
//! - Frame animation: [`Interpolator`], [`CriticalDamp`]
//! - Host seams: [`Panel`] for content, [`ResizeHandle`] for separators
//! - Tunables: [`StackConfig`]

mod axis;
mod config;
mod damping;
mod geometry;
mod handle;
mod panel;

pub use axis::{Orientation, OrientationParseError};
pub use config::{StackConfig, DEFAULT_HANDLE_OVERLAP, DEFAULT_SPACING};
pub use damping::{clamp_rescale, lerp, round_half_up, CriticalDamp, Interpolator};
pub use geometry::{Point, Rect, Size};
pub use handle::{ResizeBar, ResizeHandle, ResizeSide};
pub use panel::{BoxPanel, Panel};
