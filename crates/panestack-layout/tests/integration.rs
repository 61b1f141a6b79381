//! Integration tests for panestack-layout.
//!
//! These exercise whole frames through the public API: fill, minimum,
//! animation, collapse and drag behaviour.

use panestack_core::{BoxPanel, CriticalDamp, Orientation, Panel, Rect, StackConfig};
use panestack_layout::{Animate, ChildRef, LayoutReport, LayoutStack, PanelId, PanelOptions};
use proptest::prelude::*;

// =============================================================================
// Helpers
// =============================================================================

fn stack(orientation: Orientation, main: i32, cross: i32, spacing: i32) -> LayoutStack<BoxPanel> {
    let mut stack = LayoutStack::with_config(orientation, StackConfig::default().spacing(spacing));
    let size = orientation.compose(main, cross);
    stack.reshape(size.width, size.height);
    stack
}

fn main_sizes(stack: &LayoutStack<BoxPanel>) -> Vec<i32> {
    stack.items().iter().map(|item| item.main_size()).collect()
}

fn rects(stack: &LayoutStack<BoxPanel>) -> Vec<Rect> {
    stack.items().iter().map(|item| item.panel().rect()).collect()
}

fn placed_extent(stack: &LayoutStack<BoxPanel>) -> i32 {
    let gaps = stack.len().saturating_sub(1) as i32;
    stack.items().iter().map(|item| item.consumed_main()).sum::<i32>() + gaps * stack.spacing()
}

// =============================================================================
// Concrete scenarios
// =============================================================================

#[test]
fn test_three_equal_panels_fill_three_hundred() {
    let mut s = stack(Orientation::Horizontal, 300, 40, 10);
    for name in ["left", "middle", "right"] {
        s.push_panel(BoxPanel::new(name, 50, 40), PanelOptions::new().min_width(50));
    }
    let report = s.update_layout(&CriticalDamp::instant());
    assert_eq!(main_sizes(&s), vec![93, 94, 93]);
    assert_eq!(placed_extent(&s), 300);
    assert!(report.filled);
}

#[test]
fn test_vertical_stack_matches_horizontal_transposed() {
    let mut h = stack(Orientation::Horizontal, 300, 40, 10);
    let mut v = stack(Orientation::Vertical, 300, 40, 10);
    for name in ["a", "b", "c"] {
        h.push_panel(BoxPanel::new(name, 50, 40), PanelOptions::new().min_width(50));
        v.push_panel(BoxPanel::new(name, 40, 50), PanelOptions::new().min_height(50));
    }
    h.update_layout(&CriticalDamp::instant());
    v.update_layout(&CriticalDamp::instant());
    assert_eq!(main_sizes(&h), main_sizes(&v));
    let ys: Vec<i32> = v.items().iter().map(|i| i.panel().rect().y).collect();
    assert_eq!(ys, vec![0, 103, 207]);
}

#[test]
fn test_stack_resize_redistributes_every_frame() {
    let mut s = stack(Orientation::Horizontal, 300, 40, 0);
    s.push_panel(BoxPanel::new("a", 10, 40), PanelOptions::new().min_width(20));
    s.push_panel(BoxPanel::new("b", 10, 40), PanelOptions::new().min_width(20));
    s.update_layout(&CriticalDamp::instant());
    assert_eq!(main_sizes(&s), vec![150, 150]);

    s.reshape(200, 40);
    s.update_layout(&CriticalDamp::instant());
    assert_eq!(main_sizes(&s), vec![100, 100]);

    s.reshape(30, 40);
    let report = s.update_layout(&CriticalDamp::instant());
    assert_eq!(main_sizes(&s), vec![20, 20]);
    assert!(!report.filled);
}

#[test]
fn test_hide_animation_is_monotonic_and_finishes() {
    let mut s = stack(Orientation::Horizontal, 300, 40, 3);
    let a = s.push_panel(BoxPanel::new("a", 150, 40), PanelOptions::new());
    s.push_panel(BoxPanel::new("b", 150, 40), PanelOptions::new());
    s.update_layout(&CriticalDamp::instant());

    if let Some(panel) = s.panel_mut(a) {
        panel.set_visible(false);
    }
    let damp = CriticalDamp::at_fps(60.0);
    let mut last = 1.0_f32;
    let mut frames = 0;
    loop {
        s.update_layout(&damp);
        let fraction = s.item(a).map_or(0.0, |item| item.visible_fraction());
        assert!(fraction <= last);
        last = fraction;
        frames += 1;
        if fraction == 0.0 {
            break;
        }
        assert!(frames < 120, "hide did not settle");
    }
    // the remaining panel takes everything but the trailing gap
    assert_eq!(s.items()[1].main_size(), 297);
}

#[test]
fn test_animated_insert_pushes_neighbours_aside_gradually() {
    let mut s = stack(Orientation::Horizontal, 400, 40, 0);
    s.push_panel(BoxPanel::new("a", 400, 40), PanelOptions::new().min_width(100));
    s.update_layout(&CriticalDamp::instant());

    let b = s.add_panel(BoxPanel::new("b", 100, 40), PanelOptions::new(), Animate::Yes, 0);
    let damp = CriticalDamp::at_fps(60.0);
    let mut widths = Vec::new();
    for _ in 0..30 {
        s.update_layout(&damp);
        widths.push(s.items()[1].main_size());
    }
    assert!(widths.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(s.item(b).map(|i| i.visible_fraction()), Some(1.0));
    assert_eq!(placed_extent(&s), 400);
}

#[test]
fn test_collapse_then_expand_restores_fill() {
    let mut s = stack(Orientation::Vertical, 200, 80, 2);
    let top = s.push_panel(BoxPanel::new("top", 80, 100), PanelOptions::new().min_height(20));
    s.push_panel(BoxPanel::new("bottom", 80, 98), PanelOptions::new());
    s.update_layout(&CriticalDamp::instant());

    assert!(s.collapse_panel(top, true));
    s.update_layout(&CriticalDamp::instant());
    assert_eq!(s.item(top).map(|i| i.consumed_main()), Some(20));
    assert_eq!(placed_extent(&s), 200);

    assert!(s.collapse_panel(top, false));
    s.update_layout(&CriticalDamp::instant());
    assert_eq!(placed_extent(&s), 200);
    assert!(s.item(top).is_some_and(|i| i.is_settled()));
}

#[test]
fn test_non_auto_panel_absorbs_only_when_forced() {
    let mut s = stack(Orientation::Horizontal, 300, 40, 0);
    let fixed = s.push_panel(BoxPanel::new("fixed", 100, 40), PanelOptions::new().auto_resize(false));
    let flex = s.push_panel(BoxPanel::new("flex", 100, 40), PanelOptions::new().min_width(100));
    s.update_layout(&CriticalDamp::instant());
    assert_eq!(s.panel(fixed).map(|p| p.rect.width), Some(100));
    assert_eq!(s.panel(flex).map(|p| p.rect.width), Some(200));

    // the flexible panel is already at its minimum, so the fixed one must give
    s.reshape(150, 40);
    let report = s.update_layout(&CriticalDamp::instant());
    assert_eq!(report.passes, 2);
    assert!(report.filled);
    assert_eq!(s.panel(fixed).map(|p| p.rect.width), Some(50));
    assert_eq!(s.panel(flex).map(|p| p.rect.width), Some(100));
}

#[test]
fn test_drag_then_release_keeps_dragged_size() {
    let mut s = stack(Orientation::Horizontal, 300, 40, 0);
    let a = s.push_panel(BoxPanel::new("a", 100, 40), PanelOptions::new().min_width(20));
    s.push_panel(BoxPanel::new("b", 100, 40), PanelOptions::new().min_width(20));
    s.push_panel(BoxPanel::new("c", 100, 40), PanelOptions::new().min_width(20));
    s.update_layout(&CriticalDamp::instant());

    if let Some(handle) = s.handle_mut(a) {
        handle.begin_drag();
    }
    s.drag_handle(a, 200);
    s.update_layout(&CriticalDamp::instant());
    assert_eq!(main_sizes(&s), vec![200, 50, 50]);

    if let Some(handle) = s.handle_mut(a) {
        handle.end_drag();
    }
    s.update_layout(&CriticalDamp::instant());
    assert_eq!(main_sizes(&s), vec![200, 50, 50]);
}

#[test]
fn test_report_and_hit_order_round_trip_through_json() {
    let mut s = stack(Orientation::Horizontal, 300, 40, 10);
    let a = s.push_panel(BoxPanel::new("a", 100, 40), PanelOptions::new());
    s.push_panel(BoxPanel::new("b", 100, 40), PanelOptions::new());
    let report = s.update_layout(&CriticalDamp::instant());

    let json = serde_json::to_value(report).unwrap();
    assert_eq!(json["filled"], true);
    assert_eq!(json["target"], 310);
    let back: LayoutReport = serde_json::from_value(json).unwrap();
    assert_eq!(back, report);

    let order = s.hit_order().to_vec();
    let text = serde_json::to_string(&order).unwrap();
    assert!(text.contains("\"Handle\""));
    let back: Vec<ChildRef> = serde_json::from_str(&text).unwrap();
    assert_eq!(back, order);
    assert!(back.contains(&ChildRef::Panel(a)));
}

// =============================================================================
// Properties
// =============================================================================

fn arb_panels() -> impl Strategy<Value = Vec<(i32, i32, bool)>> {
    prop::collection::vec((0i32..200, 0i32..60, any::<bool>()), 1..7)
}

fn build(panels: &[(i32, i32, bool)], main: i32, spacing: i32) -> (LayoutStack<BoxPanel>, Vec<PanelId>) {
    let mut s = stack(Orientation::Horizontal, main, 30, spacing);
    let ids = panels
        .iter()
        .enumerate()
        .map(|(i, &(width, min, auto))| {
            s.push_panel(
                BoxPanel::new(format!("p{i}"), width, 30),
                PanelOptions::new().min_width(min).auto_resize(auto),
            )
        })
        .collect();
    (s, ids)
}

proptest! {
    #[test]
    fn prop_fills_whenever_minimums_fit(panels in arb_panels(), extra in 0i32..500, spacing in 0i32..12) {
        let gaps = (panels.len() as i32 - 1) * spacing;
        let min_total: i32 = panels.iter().map(|p| p.1).sum::<i32>() + gaps;
        let (mut s, _) = build(&panels, min_total + extra, spacing);
        let report = s.update_layout(&CriticalDamp::instant());
        prop_assert!(report.filled);
        prop_assert!(report.passes <= 2);
        prop_assert_eq!(placed_extent(&s), min_total + extra);
    }

    #[test]
    fn prop_never_below_minimum(panels in arb_panels(), main in 0i32..600, spacing in 0i32..12) {
        let (mut s, _) = build(&panels, main, spacing);
        s.update_layout(&CriticalDamp::instant());
        for item in s.items() {
            prop_assert!(item.main_size() >= item.min_main());
        }
    }

    #[test]
    fn prop_second_update_is_idempotent(panels in arb_panels(), main in 0i32..600, spacing in 0i32..12) {
        let (mut s, _) = build(&panels, main, spacing);
        s.update_layout(&CriticalDamp::instant());
        let first = rects(&s);
        s.update_layout(&CriticalDamp::instant());
        prop_assert_eq!(first, rects(&s));
    }

    #[test]
    fn prop_captured_item_is_untouched(panels in arb_panels(), main in 0i32..600, pick in any::<prop::sample::Index>()) {
        let (mut s, ids) = build(&panels, main, 3);
        s.update_layout(&CriticalDamp::instant());
        let target = ids[pick.index(ids.len())];
        if let Some(handle) = s.handle_mut(target) {
            handle.begin_drag();
        }
        let before = s.item(target).map(|i| i.main_size());
        s.reshape(main + 137, 30);
        s.update_layout(&CriticalDamp::instant());
        prop_assert_eq!(before, s.item(target).map(|i| i.main_size()));
    }

    #[test]
    fn prop_collapsed_item_consumes_its_minimum(width in 1i32..400, min in 0i32..100) {
        let mut s = stack(Orientation::Horizontal, 1000, 30, 0);
        let id = s.push_panel(BoxPanel::new("c", width, 30), PanelOptions::new().min_width(min));
        s.push_panel(BoxPanel::new("rest", 10, 30), PanelOptions::new());
        s.collapse_panel(id, true);
        s.update_layout(&CriticalDamp::instant());
        prop_assert_eq!(s.item(id).map(|i| i.consumed_main()), Some(min));
    }
}
