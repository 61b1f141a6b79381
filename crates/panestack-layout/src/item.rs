//! A single stacked panel with its constraints and animation state.

use panestack_core::{
    clamp_rescale, lerp, round_half_up, Interpolator, Orientation, Panel, Rect, ResizeBar,
    ResizeHandle, ResizeSide, StackConfig,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stack-issued identity of a managed panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PanelId(pub(crate) u64);

impl PanelId {
    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel#{}", self.0)
    }
}

/// Per-panel constraints supplied when a panel joins a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelOptions {
    /// Minimum width
    pub min_width: i32,
    /// Minimum height
    pub min_height: i32,
    /// Takes part in automatic slack/deficit redistribution
    pub auto_resize: bool,
    /// Shows a user-draggable resize handle
    pub user_resize: bool,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            min_width: 0,
            min_height: 0,
            auto_resize: true,
            user_resize: true,
        }
    }
}

impl PanelOptions {
    /// Default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum width.
    #[must_use]
    pub const fn min_width(mut self, min_width: i32) -> Self {
        self.min_width = min_width;
        self
    }

    /// Set the minimum height.
    #[must_use]
    pub const fn min_height(mut self, min_height: i32) -> Self {
        self.min_height = min_height;
        self
    }

    /// Set whether the panel auto-resizes.
    #[must_use]
    pub const fn auto_resize(mut self, auto_resize: bool) -> Self {
        self.auto_resize = auto_resize;
        self
    }

    /// Set whether the panel is user-resizable.
    #[must_use]
    pub const fn user_resize(mut self, user_resize: bool) -> Self {
        self.user_resize = user_resize;
        self
    }
}

/// Whether a newly added panel expands in from nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Animate {
    /// Appear at full size immediately
    #[default]
    No,
    /// Start hidden, then grow in
    Yes,
}

/// One panel in a stack: the content, its limits, and its animation state.
///
/// Two animated fractions drive the item:
/// - `visible_fraction` approaches 1 while the panel is shown, 0 while hidden
/// - `collapse_fraction` approaches 1 while collapsed, 0 otherwise
///
/// Both feed [`LayoutItem::collapse_factor`], the single scalar the solver
/// and the clip step consume.
#[derive(Debug)]
pub struct LayoutItem<P, H = ResizeBar> {
    id: PanelId,
    panel: P,
    handle: H,
    orientation: Orientation,
    min_width: i32,
    min_height: i32,
    auto_resize: bool,
    user_resize: bool,
    collapsed: bool,
    visible_fraction: f32,
    collapse_fraction: f32,
}

impl<P: Panel, H: ResizeHandle> LayoutItem<P, H> {
    pub(crate) fn new(id: PanelId, panel: P, orientation: Orientation, options: PanelOptions) -> Self {
        let min_cross = match orientation {
            Orientation::Horizontal => options.min_height,
            Orientation::Vertical => options.min_width,
        };
        let handle = H::attach(ResizeSide::trailing(orientation), min_cross);
        // panels that join hidden must not start partially visible
        let visible_fraction = if panel.is_visible() { 1.0 } else { 0.0 };
        Self {
            id,
            panel,
            handle,
            orientation,
            min_width: options.min_width,
            min_height: options.min_height,
            auto_resize: options.auto_resize,
            user_resize: options.user_resize,
            collapsed: false,
            visible_fraction,
            collapse_fraction: 0.0,
        }
    }

    /// Identity within the owning stack.
    #[must_use]
    pub const fn id(&self) -> PanelId {
        self.id
    }

    /// The managed panel.
    #[must_use]
    pub const fn panel(&self) -> &P {
        &self.panel
    }

    /// The managed panel, mutably.
    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    /// The owned resize handle.
    #[must_use]
    pub const fn handle(&self) -> &H {
        &self.handle
    }

    /// The owned resize handle, mutably.
    pub fn handle_mut(&mut self) -> &mut H {
        &mut self.handle
    }

    pub(crate) fn into_panel(self) -> P {
        self.panel
    }

    /// Minimum width.
    #[must_use]
    pub const fn min_width(&self) -> i32 {
        self.min_width
    }

    /// Minimum height.
    #[must_use]
    pub const fn min_height(&self) -> i32 {
        self.min_height
    }

    /// Minimum along the stack's main axis.
    #[must_use]
    pub const fn min_main(&self) -> i32 {
        match self.orientation {
            Orientation::Horizontal => self.min_width,
            Orientation::Vertical => self.min_height,
        }
    }

    /// Minimum along the stack's cross axis.
    #[must_use]
    pub const fn min_cross(&self) -> i32 {
        match self.orientation {
            Orientation::Horizontal => self.min_height,
            Orientation::Vertical => self.min_width,
        }
    }

    /// Current panel extent along the main axis.
    #[must_use]
    pub fn main_size(&self) -> i32 {
        self.orientation.main(self.panel.rect().size())
    }

    /// Slack above the minimum, reclaimable when the stack shrinks.
    #[must_use]
    pub fn headroom(&self) -> i32 {
        self.main_size() - self.min_main()
    }

    /// Participates in automatic redistribution.
    #[must_use]
    pub const fn auto_resize(&self) -> bool {
        self.auto_resize
    }

    /// Shows a user resize handle.
    #[must_use]
    pub const fn user_resize(&self) -> bool {
        self.user_resize
    }

    /// Target collapse state.
    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub(crate) fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    /// Animated visibility in `[0, 1]`.
    #[must_use]
    pub const fn visible_fraction(&self) -> f32 {
        self.visible_fraction
    }

    /// Animated collapse progress in `[0, 1]`.
    #[must_use]
    pub const fn collapse_fraction(&self) -> f32 {
        self.collapse_fraction
    }

    /// Combined visibility and collapse scale.
    ///
    /// The collapse part rescales from 1 (expanded) down to
    /// `min_main / main_size` (fully collapsed). Vertical stacks additionally
    /// cap that ratio at 1; horizontal stacks do not.
    #[must_use]
    pub fn collapse_factor(&self) -> f32 {
        let current = self.main_size().max(1) as f32;
        let mut collapsed_ratio = self.min_main() as f32 / current;
        if self.orientation == Orientation::Vertical {
            collapsed_ratio = collapsed_ratio.min(1.0);
        }
        let collapse_scale = clamp_rescale(self.collapse_fraction, 0.0, 1.0, 1.0, collapsed_ratio);
        self.visible_fraction * collapse_scale
    }

    /// Not animating: fully shown and fully expanded.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.collapse_factor() == 1.0
    }

    /// Main-axis pixels this item currently occupies.
    #[must_use]
    pub fn consumed_main(&self) -> i32 {
        round_half_up(self.main_size() as f32 * self.collapse_factor())
    }

    /// Panel rectangle cut down to the animated extent, anchored at its
    /// leading edge.
    #[must_use]
    pub fn clip_rect(&self) -> Rect {
        self.orientation.with_main(self.panel.rect(), self.consumed_main())
    }

    /// May the solver change this item's size in the current pass.
    pub(crate) fn is_adjustable(&self, forced: bool) -> bool {
        !self.handle.has_capture() && (forced || self.auto_resize)
    }

    /// Grow the panel to its main-axis minimum if it has fallen below.
    pub(crate) fn enforce_min_main(&mut self) {
        if self.main_size() < self.min_main() {
            let rect = self.orientation.with_main(self.panel.rect(), self.min_main());
            self.panel.set_rect(rect);
        }
    }

    /// Step both animated fractions one frame toward their targets.
    pub(crate) fn advance(&mut self, interp: &dyn Interpolator, config: &StackConfig) {
        if self.panel.is_visible() {
            self.visible_fraction = lerp(self.visible_fraction, 1.0, interp.interpolant(config.open_time));
            if self.visible_fraction > config.visible_snap {
                self.visible_fraction = 1.0;
            }
        } else {
            self.visible_fraction = lerp(self.visible_fraction, 0.0, interp.interpolant(config.close_time));
            if self.visible_fraction < config.hidden_snap {
                self.visible_fraction = 0.0;
            }
        }

        // collapse converges without snapping
        let target = if self.collapsed { 1.0 } else { 0.0 };
        self.collapse_fraction = lerp(self.collapse_fraction, target, interp.interpolant(config.close_time));
    }
}
