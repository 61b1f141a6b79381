//! The layout stack: per-frame negotiation of item sizes along one axis.
//!
//! Every frame the host calls [`LayoutStack::update_layout`] (or
//! [`LayoutStack::draw`], which calls it first). One update:
//!
//! 1. recomputes the stack minimums from the item minimums,
//! 2. steps every item's visibility and collapse animation,
//! 3. negotiates sizes, honoring `auto_resize`,
//! 4. if the items did not end exactly at the far edge, negotiates again
//!    with every settled item treated as resizable.
//!
//! Redistribution is a single greedy pass. Growth is split evenly, but each
//! item's share is rounded and the remainder re-divided among the items that
//! follow. Shrinking is proportional to each item's headroom over a
//! denominator that loses that item's headroom once it is processed. Both
//! splits depend on item order and must stay sequential: a simultaneous
//! proportional split distributes rounding differently with three or more
//! items.

use crate::item::{Animate, LayoutItem, PanelId, PanelOptions};
use panestack_core::{
    round_half_up, Interpolator, Orientation, Panel, Point, Rect, ResizeBar, ResizeHandle, Size,
    StackConfig,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Whether a negotiation pass respects each item's `auto_resize` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NegotiationMode {
    /// Only `auto_resize` items absorb slack or deficit
    RespectAutoResize,
    /// Every settled, uncaptured item absorbs slack or deficit
    Forced,
}

impl NegotiationMode {
    const fn is_forced(self) -> bool {
        matches!(self, Self::Forced)
    }
}

/// Outcome of one [`LayoutStack::update_layout`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutReport {
    /// Negotiation passes run (1 or 2)
    pub passes: u8,
    /// Where the placement cursor stopped
    pub end_cursor: i32,
    /// Where the cursor had to stop for the stack to be exactly filled
    pub target: i32,
    /// `end_cursor == target` after the last pass
    pub filled: bool,
}

/// A child of the stack in hit-test order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChildRef {
    /// A managed panel
    Panel(PanelId),
    /// The resize handle owned by that panel's item
    Handle(PanelId),
}

#[derive(Debug, Clone, Copy)]
struct PassOutcome {
    end_cursor: i32,
    target: i32,
}

impl PassOutcome {
    const fn filled(self) -> bool {
        self.end_cursor == self.target
    }
}

/// Ordered collection of panels sized along one axis.
#[derive(Debug)]
pub struct LayoutStack<P, H = ResizeBar> {
    orientation: Orientation,
    config: StackConfig,
    rect: Rect,
    items: Vec<LayoutItem<P, H>>,
    /// Front to back: the first entry is hit first.
    z_order: Vec<ChildRef>,
    min_main: i32,
    min_cross: i32,
    next_id: u64,
}

impl<P: Panel, H: ResizeHandle> LayoutStack<P, H> {
    /// Empty stack with default tunables.
    #[must_use]
    pub fn new(orientation: Orientation) -> Self {
        Self::with_config(orientation, StackConfig::default())
    }

    /// Empty stack with the given tunables.
    #[must_use]
    pub fn with_config(orientation: Orientation, config: StackConfig) -> Self {
        Self {
            orientation,
            config: config.sanitized(),
            rect: Rect::default(),
            items: Vec::new(),
            z_order: Vec::new(),
            min_main: 0,
            min_cross: 0,
            next_id: 0,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Layout direction, fixed at construction.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Current tunables.
    #[must_use]
    pub const fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Gap between adjacent items.
    #[must_use]
    pub const fn spacing(&self) -> i32 {
        self.config.spacing
    }

    /// Change the gap between adjacent items. Negative values clamp to zero.
    pub fn set_spacing(&mut self, spacing: i32) {
        self.config.spacing = spacing.max(0);
        self.calc_min_extents();
    }

    /// The stack's own rectangle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Replace the stack's own rectangle.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// Resize the stack, keeping its origin.
    pub fn reshape(&mut self, width: i32, height: i32) {
        self.rect = self.rect.with_size(Size::new(width, height));
    }

    /// Smallest footprint that fits every item at its minimum.
    #[must_use]
    pub const fn min_size(&self) -> Size {
        self.orientation.compose(self.min_main, self.min_cross)
    }

    /// Sum of main-axis minimums plus spacing.
    #[must_use]
    pub const fn min_main(&self) -> i32 {
        self.min_main
    }

    /// Largest cross-axis minimum.
    #[must_use]
    pub const fn min_cross(&self) -> i32 {
        self.min_cross
    }

    /// Number of managed panels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// No panels managed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in visual order.
    #[must_use]
    pub fn items(&self) -> &[LayoutItem<P, H>] {
        &self.items
    }

    /// Panel ids in visual order.
    pub fn ids(&self) -> impl Iterator<Item = PanelId> + '_ {
        self.items.iter().map(LayoutItem::id)
    }

    /// Position of a panel in visual order.
    #[must_use]
    pub fn index_of(&self, id: PanelId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Item managing `id`.
    #[must_use]
    pub fn item(&self, id: PanelId) -> Option<&LayoutItem<P, H>> {
        self.items.iter().find(|item| item.id() == id)
    }

    fn item_mut(&mut self, id: PanelId) -> Option<&mut LayoutItem<P, H>> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// Managed panel.
    #[must_use]
    pub fn panel(&self, id: PanelId) -> Option<&P> {
        self.item(id).map(LayoutItem::panel)
    }

    /// Managed panel, mutably. Use this to show or hide it.
    pub fn panel_mut(&mut self, id: PanelId) -> Option<&mut P> {
        self.item_mut(id).map(LayoutItem::panel_mut)
    }

    /// Resize handle owned by the panel's item.
    #[must_use]
    pub fn handle(&self, id: PanelId) -> Option<&H> {
        self.item(id).map(LayoutItem::handle)
    }

    /// Resize handle owned by the panel's item, mutably.
    pub fn handle_mut(&mut self, id: PanelId) -> Option<&mut H> {
        self.item_mut(id).map(LayoutItem::handle_mut)
    }

    /// Children front to back, as the host should hit-test them.
    #[must_use]
    pub fn hit_order(&self) -> &[ChildRef] {
        &self.z_order
    }

    // =========================================================================
    // Membership
    // =========================================================================

    /// Append a panel without animation.
    pub fn push_panel(&mut self, panel: P, options: PanelOptions) -> PanelId {
        let index = self.items.len();
        self.add_panel(panel, options, Animate::No, index)
    }

    /// Insert a panel at `index` (clamped to `0..=len`).
    ///
    /// With [`Animate::Yes`] the panel is hidden while its item is created and
    /// shown again afterwards, so it grows in from nothing over the next
    /// frames. Every resize handle is then brought to the front of the hit
    /// order so seams stay clickable where they overlap panel edges.
    pub fn add_panel(&mut self, mut panel: P, options: PanelOptions, animate: Animate, index: usize) -> PanelId {
        if animate == Animate::Yes {
            panel.set_visible(false);
        }

        let id = PanelId(self.next_id);
        self.next_id += 1;

        let index = index.min(self.items.len());
        self.items.insert(index, LayoutItem::new(id, panel, self.orientation, options));

        self.z_order.insert(0, ChildRef::Panel(id));
        self.z_order.insert(0, ChildRef::Handle(id));
        for item_id in self.items.iter().map(LayoutItem::id).collect::<Vec<_>>() {
            self.send_to_front(ChildRef::Handle(item_id));
        }

        if animate == Animate::Yes {
            self.items[index].panel_mut().set_visible(true);
        }

        self.calc_min_extents();
        trace!(%id, index, len = self.items.len(), "panel added");
        id
    }

    /// Remove a panel, dropping its item and handle. Returns the panel, or
    /// `None` if it is not managed here.
    pub fn remove_panel(&mut self, id: PanelId) -> Option<P> {
        let index = self.index_of(id)?;
        let item = self.items.remove(index);
        self.z_order
            .retain(|child| !matches!(child, ChildRef::Panel(c) | ChildRef::Handle(c) if *c == id));
        self.calc_min_extents();
        trace!(%id, len = self.items.len(), "panel removed");
        Some(item.into_panel())
    }

    /// Set a panel's target collapse state. Returns `false` (and does
    /// nothing) if the panel is not managed here.
    pub fn collapse_panel(&mut self, id: PanelId, collapsed: bool) -> bool {
        match self.item_mut(id) {
            Some(item) => {
                item.set_collapsed(collapsed);
                true
            }
            None => false,
        }
    }

    fn send_to_front(&mut self, child: ChildRef) {
        if let Some(pos) = self.z_order.iter().position(|c| *c == child) {
            let child = self.z_order.remove(pos);
            self.z_order.insert(0, child);
        }
    }

    // =========================================================================
    // Negotiation
    // =========================================================================

    /// Settle sizes and positions for this frame.
    ///
    /// Runs one pass that respects `auto_resize`; if that leaves the stack
    /// under- or over-filled, runs exactly one forced pass.
    pub fn update_layout(&mut self, interp: &dyn Interpolator) -> LayoutReport {
        self.begin_frame(interp);

        let first = self.negotiate(NegotiationMode::RespectAutoResize);
        if first.filled() {
            return Self::report(1, first);
        }

        debug!(
            end = first.end_cursor,
            target = first.target,
            "layout missed the far edge, forcing a second pass"
        );
        let second = self.negotiate(NegotiationMode::Forced);
        if !second.filled() {
            debug!(
                end = second.end_cursor,
                target = second.target,
                min_main = self.min_main,
                "forced layout pass still missed the far edge"
            );
        }
        Self::report(2, second)
    }

    /// Settle sizes with every item treated as resizable from the start.
    pub fn force_layout(&mut self, interp: &dyn Interpolator) -> LayoutReport {
        self.begin_frame(interp);
        let outcome = self.negotiate(NegotiationMode::Forced);
        Self::report(1, outcome)
    }

    const fn report(passes: u8, outcome: PassOutcome) -> LayoutReport {
        LayoutReport {
            passes,
            end_cursor: outcome.end_cursor,
            target: outcome.target,
            filled: outcome.filled(),
        }
    }

    fn begin_frame(&mut self, interp: &dyn Interpolator) {
        self.calc_min_extents();
        for item in &mut self.items {
            item.advance(interp, &self.config);
        }
    }

    fn calc_min_extents(&mut self) {
        let gaps = self.items.len().saturating_sub(1) as i32;
        self.min_main = self.items.iter().map(LayoutItem::min_main).sum::<i32>() + gaps * self.config.spacing;
        self.min_cross = self.items.iter().map(LayoutItem::min_cross).max().unwrap_or(0);
    }

    /// Cross-axis size every item is given.
    fn pass_through_cross(&self) -> i32 {
        self.min_cross.max(self.orientation.cross(self.rect.size()))
    }

    fn negotiate(&mut self, mode: NegotiationMode) -> PassOutcome {
        let orientation = self.orientation;
        let spacing = self.config.spacing;
        let overlap = self.config.handle_overlap;
        let forced = mode.is_forced();
        let container_main = orientation.main(self.rect.size());
        let cross = self.pass_through_cross();

        let mut total_current = 0;
        for (index, item) in self.items.iter_mut().enumerate() {
            item.enforce_min_main();
            total_current += item.consumed_main();
            if index > 0 {
                total_current += spacing;
            }
        }

        // Items mid-animation are left out. Captured and non-adjustable items
        // still count toward the headroom the handles may offer.
        let mut resizable_count = 0_i32;
        let mut available_headroom = 0_i32;
        let mut total_headroom = 0_i32;
        for item in self.items.iter().filter(|item| item.is_settled()) {
            let headroom = item.headroom();
            total_headroom += headroom;
            if item.is_adjustable(forced) {
                resizable_count += 1;
                available_headroom += headroom;
            }
        }

        let mut to_distribute = container_main - total_current;
        trace!(
            ?mode,
            container_main,
            total_current,
            to_distribute,
            resizable_count,
            available_headroom,
            total_headroom,
            "negotiating"
        );

        let mut cursor = 0_i32;
        for item in &mut self.items {
            let factor = item.collapse_factor();
            let current = item.main_size();
            let headroom = item.headroom();
            let mut new_main = current.max(item.min_main());
            let mut delta = 0;

            if factor == 1.0 && item.is_adjustable(forced) {
                if to_distribute < 0 {
                    delta = if available_headroom > 0 {
                        round_half_up(to_distribute as f32 * (headroom as f32 / available_headroom as f32))
                    } else {
                        0
                    };
                    available_headroom -= headroom;
                } else {
                    delta = if resizable_count > 0 {
                        round_half_up(to_distribute as f32 / resizable_count as f32)
                    } else {
                        0
                    };
                    resizable_count -= 1;
                }
                to_distribute -= delta;
                new_main = item.min_main().max(current + delta);
            }

            total_headroom += delta;

            let rect = Rect::from_origin_size(orientation.point(cursor, 0), orientation.compose(new_main, cross));
            item.panel_mut().set_rect(rect);
            item.handle_mut().set_rect(seam_rect(orientation, rect, spacing, overlap));

            cursor += round_half_up(new_main as f32 * factor) + spacing;
        }

        let mut last_enabled = None;
        for (index, item) in self.items.iter_mut().enumerate() {
            let min = item.min_main();
            item.handle_mut().set_resize_limits(min, min + total_headroom);

            let enabled = item.panel().is_visible() && item.user_resize();
            item.handle_mut().set_visible(enabled);
            if enabled {
                last_enabled = Some(index);
            }
        }
        // a trailing handle has nothing after it to trade space with
        if let Some(index) = last_enabled {
            self.items[index].handle_mut().set_visible(false);
        }

        PassOutcome {
            end_cursor: cursor,
            target: container_main + spacing,
        }
    }

    // =========================================================================
    // Drawing and interaction
    // =========================================================================

    /// Panel rectangle cut to its animated extent.
    #[must_use]
    pub fn clip_rect(&self, id: PanelId) -> Option<Rect> {
        self.item(id).map(LayoutItem::clip_rect)
    }

    /// Settle the layout, then hand each drawable panel and its clip rect to
    /// `paint` in visual order. Hidden panels are still painted while their
    /// clip rect is non-empty so hide animations remain visible.
    pub fn draw<F>(&mut self, interp: &dyn Interpolator, mut paint: F) -> LayoutReport
    where
        F: FnMut(PanelId, &P, Rect),
    {
        let report = self.update_layout(interp);
        for item in &self.items {
            let clip = item.clip_rect();
            if item.panel().is_visible() || !clip.is_empty() {
                paint(item.id(), item.panel(), clip);
            }
        }
        report
    }

    /// Frontmost visible child under `point`.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<ChildRef> {
        self.z_order.iter().copied().find(|child| match *child {
            ChildRef::Handle(id) => self
                .handle(id)
                .is_some_and(|h| h.is_visible() && h.rect().contains(point)),
            ChildRef::Panel(id) => self
                .item(id)
                .is_some_and(|item| item.panel().is_visible() && item.clip_rect().contains(point)),
        })
    }

    /// Resize a panel the way its handle does during a drag: the requested
    /// main-axis size is clamped into the handle's current limits. Returns
    /// the size applied.
    pub fn drag_handle(&mut self, id: PanelId, requested: i32) -> Option<i32> {
        let orientation = self.orientation;
        let item = self.item_mut(id)?;
        let size = item.handle().clamp_drag(requested);
        let rect = orientation.with_main(item.panel().rect(), size);
        item.panel_mut().set_rect(rect);
        Some(size)
    }
}

/// Hit rectangle for the seam after `panel`, widened by `overlap` on both
/// sides so it never becomes a zero-width target.
fn seam_rect(orientation: Orientation, panel: Rect, spacing: i32, overlap: i32) -> Rect {
    let thickness = spacing + 2 * overlap;
    match orientation {
        Orientation::Horizontal => Rect::new(panel.right() - overlap, panel.y, thickness, panel.height),
        Orientation::Vertical => Rect::new(panel.x, panel.bottom() - overlap, panel.width, thickness),
    }
}
