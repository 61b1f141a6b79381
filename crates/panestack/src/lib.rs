//! Panestack: adaptive one-dimensional panel layout.
//!
//! A [`LayoutStack`](layout::LayoutStack) arranges panels in a row or a
//! column, hands out slack and takes back deficit every frame, and animates
//! panels in and out of view.
//!
//! ```
//! use panestack::prelude::*;
//!
//! let mut stack: LayoutStack<BoxPanel> = LayoutStack::new(Orientation::Horizontal);
//! stack.reshape(300, 40);
//! stack.set_spacing(10);
//! for name in ["left", "middle", "right"] {
//!     stack.push_panel(BoxPanel::new(name, 50, 40), PanelOptions::new().min_width(50));
//! }
//! let report = stack.update_layout(&CriticalDamp::instant());
//! assert!(report.filled);
//! ```

pub use panestack_core::*;
pub use panestack_layout as layout;
pub use panestack_yaml as yaml;

/// The types most hosts need.
pub mod prelude {
    pub use panestack_core::{
        BoxPanel, CriticalDamp, Interpolator, Orientation, Panel, Point, Rect, ResizeBar,
        ResizeHandle, Size, StackConfig,
    };
    pub use panestack_layout::{Animate, ChildRef, LayoutReport, LayoutStack, PanelId, PanelOptions};
    pub use panestack_yaml::{build_stack, ParseError, StackManifest};
}
