#![allow(clippy::float_cmp)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::too_many_lines)]
//! Layout stack for Panestack.
//!
//! Arranges a sequence of resizable panels along one axis and re-settles
//! them every frame:
//!
//! - **Minimums**: no panel is ever sized below its main-axis minimum
//! - **Animation**: show/hide and collapse/expand ease in with critical damping
//! - **Redistribution**: slack or deficit is split greedily in visual order
//! - **Fill guarantee**: a forced second pass runs when `auto_resize` items
//!   alone cannot fill the stack
//! - **Handles**: each item owns a resize handle whose drag limits are
//!   refreshed every frame
//!
//! See [`LayoutStack`] for the per-frame algorithm.

mod item;
mod stack;

pub use item::{Animate, LayoutItem, PanelId, PanelOptions};
pub use stack::{ChildRef, LayoutReport, LayoutStack, NegotiationMode};
