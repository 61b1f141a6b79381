//! YAML manifest types for layout stacks.

use crate::error::ParseError;
use panestack_core::{BoxPanel, Interpolator, Orientation, Panel, StackConfig};
use panestack_layout::{LayoutStack, PanelId, PanelOptions};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Border size used when a manifest does not name one.
pub const DEFAULT_BORDER_SIZE: i32 = 3;

/// Stack manifest loaded from a `.yaml` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackManifest {
    /// The stack description
    pub stack: StackSettings,
}

/// Stack-level settings and the ordered panel list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackSettings {
    /// Stack name
    #[serde(default)]
    pub name: String,
    /// `horizontal` or `vertical`
    #[serde(default = "default_orientation")]
    pub orientation: String,
    /// Gap between adjacent panels
    #[serde(default = "default_border_size")]
    pub border_size: i32,
    /// Initial stack width
    #[serde(default)]
    pub width: i32,
    /// Initial stack height
    #[serde(default)]
    pub height: i32,
    /// Panels in layout order
    #[serde(default)]
    pub panels: Vec<PanelManifest>,
}

fn default_orientation() -> String {
    "vertical".to_string()
}

const fn default_border_size() -> i32 {
    DEFAULT_BORDER_SIZE
}

const fn default_true() -> bool {
    true
}

/// What kind of child a manifest entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    /// A dedicated layout panel; user-resizable unless told otherwise
    #[default]
    LayoutPanel,
    /// Any other widget; fixed unless told otherwise
    Widget,
}

/// One panel entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelManifest {
    /// Panel name, unique within the stack
    pub name: String,
    /// Child kind
    #[serde(default)]
    pub kind: PanelKind,
    /// Initial width
    #[serde(default)]
    pub width: i32,
    /// Initial height
    #[serde(default)]
    pub height: i32,
    /// Minimum width
    #[serde(default)]
    pub min_width: i32,
    /// Minimum height
    #[serde(default)]
    pub min_height: i32,
    /// Takes part in automatic redistribution
    #[serde(default = "default_true")]
    pub auto_resize: bool,
    /// Shows a draggable resize handle; defaults by kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_resize: Option<bool>,
    /// Starts shown
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Starts collapsed
    #[serde(default)]
    pub collapsed: bool,
}

impl StackManifest {
    /// Parse and validate a manifest from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        let manifest: Self = serde_yaml_ng::from_str(yaml)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Serialize the manifest to a YAML string.
    pub fn to_yaml(&self) -> Result<String, ParseError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check sizes and names.
    ///
    /// Sizes and minimums must not be negative and panel names must be
    /// non-empty and unique. A negative `border_size` is not an error; it
    /// clamps to zero when the stack is built.
    pub fn validate(&self) -> Result<(), ParseError> {
        let settings = &self.stack;
        non_negative("width", settings.width)?;
        non_negative("height", settings.height)?;

        let mut seen = HashSet::new();
        for (i, panel) in settings.panels.iter().enumerate() {
            if panel.name.is_empty() {
                return Err(ParseError::invalid(format!("panels[{i}].name"), "must not be empty"));
            }
            if !seen.insert(panel.name.as_str()) {
                return Err(ParseError::Validation(format!(
                    "duplicate panel name '{}'",
                    panel.name
                )));
            }
            non_negative(&format!("panels[{i}].width"), panel.width)?;
            non_negative(&format!("panels[{i}].height"), panel.height)?;
            non_negative(&format!("panels[{i}].min_width"), panel.min_width)?;
            non_negative(&format!("panels[{i}].min_height"), panel.min_height)?;
        }
        Ok(())
    }

    /// Look up a panel entry by name.
    #[must_use]
    pub fn panel(&self, name: &str) -> Option<&PanelManifest> {
        self.stack.panels.iter().find(|p| p.name == name)
    }
}

fn non_negative(field: &str, value: i32) -> Result<(), ParseError> {
    if value < 0 {
        return Err(ParseError::invalid(field, format!("must not be negative, got {value}")));
    }
    Ok(())
}

impl StackSettings {
    /// Parsed orientation. Unknown names log a warning and fall back to
    /// vertical.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation.parse().unwrap_or_else(|err| {
            warn!(stack = %self.name, %err, "falling back to vertical orientation");
            Orientation::Vertical
        })
    }

    /// Border size clamped to zero.
    #[must_use]
    pub fn border_size(&self) -> i32 {
        self.border_size.max(0)
    }

    /// Stack tunables derived from the manifest.
    #[must_use]
    pub fn config(&self) -> StackConfig {
        StackConfig::default().spacing(self.border_size())
    }
}

impl PanelManifest {
    /// Whether the panel gets a draggable handle, after kind defaults.
    #[must_use]
    pub fn user_resize(&self) -> bool {
        self.user_resize.unwrap_or(self.kind == PanelKind::LayoutPanel)
    }

    /// Constraints to add the panel with.
    #[must_use]
    pub fn options(&self) -> PanelOptions {
        PanelOptions::new()
            .min_width(self.min_width)
            .min_height(self.min_height)
            .auto_resize(self.auto_resize)
            .user_resize(self.user_resize())
    }

    /// A plain [`BoxPanel`] with this entry's name, size and visibility.
    #[must_use]
    pub fn box_panel(&self) -> BoxPanel {
        let panel = BoxPanel::new(self.name.clone(), self.width, self.height);
        if self.visible {
            panel
        } else {
            panel.hidden()
        }
    }
}

/// Build a stack from a manifest.
///
/// `factory` is called once per entry in order; returning `None` skips the
/// entry. Each panel gets the entry's visibility before it is added
/// (without animation), collapsed entries are collapsed, and one
/// [`update_layout`](LayoutStack::update_layout) runs before the stack is
/// returned together with the `(name, id)` of every panel that was added.
pub fn build_stack<P, F>(
    manifest: &StackManifest,
    interp: &dyn Interpolator,
    mut factory: F,
) -> (LayoutStack<P>, Vec<(String, PanelId)>)
where
    P: Panel,
    F: FnMut(&PanelManifest) -> Option<P>,
{
    let settings = &manifest.stack;
    let mut stack = LayoutStack::with_config(settings.orientation(), settings.config());
    stack.reshape(settings.width, settings.height);

    let mut ids = Vec::with_capacity(settings.panels.len());
    for entry in &settings.panels {
        let Some(mut panel) = factory(entry) else {
            debug!(panel = %entry.name, "factory skipped panel");
            continue;
        };
        panel.set_visible(entry.visible);
        let id = stack.push_panel(panel, entry.options());
        if entry.collapsed {
            stack.collapse_panel(id, true);
        }
        ids.push((entry.name.clone(), id));
    }

    let report = stack.update_layout(interp);
    debug!(
        stack = %settings.name,
        panels = ids.len(),
        filled = report.filled,
        "stack built from manifest"
    );
    (stack, ids)
}
