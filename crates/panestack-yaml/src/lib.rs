//! YAML stack manifests for panestack.
//!
//! A manifest names a stack's orientation, border size and panels with
//! their constraints; [`build_stack`] turns it into a settled
//! [`LayoutStack`](panestack_layout::LayoutStack).

mod error;
mod manifest;

pub use error::ParseError;
pub use manifest::{build_stack, PanelKind, PanelManifest, StackManifest, StackSettings, DEFAULT_BORDER_SIZE};
