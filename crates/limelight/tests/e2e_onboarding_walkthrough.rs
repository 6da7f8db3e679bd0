#![forbid(unsafe_code)]

//! End-to-end walkthrough of a five-target home screen.
//!
//! Drives the full pipeline (registry pass → controller → resolver →
//! renderer → canvas) on a deterministic 60 fps clock.
//!
//! Run:
//!   cargo test -p limelight --test e2e_onboarding_walkthrough

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use limelight::{
    AnchorId, Canvas, Insets, OverlayOptions, Phase, Rect, RegionRegistry, SequenceController,
    ShowCase, Size, StaticLayout, TapOutcome,
};

const FRAME: Duration = Duration::from_millis(16);
const SCREEN: Size = Size::new(390.0, 844.0);
const TOP_INSET: f32 = 47.0;

const LOCATION: AnchorId = AnchorId::new(1);
const FAVOURITE: AnchorId = AnchorId::new(2);
const DEVICE: AnchorId = AnchorId::new(3);
const TAGS: AnchorId = AnchorId::new(4);
const PERSONAL: AnchorId = AnchorId::new(5);

fn home_layout() -> StaticLayout {
    StaticLayout::new(SCREEN, Insets::vertical(TOP_INSET, 34.0))
        .with_anchor(LOCATION, Rect::new(331.0, 15.0, 44.0, 44.0))
        .with_anchor(FAVOURITE, Rect::new(331.0, 69.0, 44.0, 44.0))
        .with_anchor(DEVICE, Rect::new(60.0, 700.0, 45.0, 45.0))
        .with_anchor(TAGS, Rect::new(172.5, 700.0, 45.0, 45.0))
        .with_anchor(PERSONAL, Rect::new(285.0, 700.0, 45.0, 45.0))
}

fn commit_home(registry: &mut RegionRegistry) {
    let mut pass = registry.begin_pass();
    LOCATION.show_case(0, "My Current Location", 10.0).contribute(&mut pass);
    FAVOURITE.show_case(1, "Favourite Location's", 10.0).contribute(&mut pass);
    pass.subtree(|tab_bar| {
        DEVICE.show_case(2, "My Device", 10.0).contribute(tab_bar);
        TAGS.show_case(4, "Location Enable Tag's", 10.0).contribute(tab_bar);
        PERSONAL.show_case(3, "Personal Info", 10.0).contribute(tab_bar);
    });
    registry.commit(pass);
}

fn run_frames(ctl: &mut SequenceController, layout: &StaticLayout, frames: usize) {
    for _ in 0..frames {
        ctl.tick(FRAME);
        let _ = ctl.frame(layout);
    }
}

#[test]
fn walkthrough_visits_all_targets_and_finishes_once() {
    let finished = Rc::new(Cell::new(0u32));
    let seen = Rc::clone(&finished);
    let mut ctl = SequenceController::new(OverlayOptions::new(move || seen.set(seen.get() + 1)));
    let mut registry = RegionRegistry::new();
    let layout = home_layout();

    commit_home(&mut registry);
    ctl.on_registry_change(registry.snapshot());
    assert_eq!(ctl.sorted_orders(), &[0, 1, 2, 3, 4]);

    let mut titles = Vec::new();
    loop {
        run_frames(&mut ctl, &layout, 40);
        assert_eq!(ctl.phase(), Phase::ShowingTitle);
        let scene = ctl.frame(&layout).expect("scene while showing");
        let popover = scene.popover.expect("title visible");
        titles.push(popover.title.clone());
        match ctl.tap() {
            TapOutcome::Advanced { from, to } => assert!(to > from),
            TapOutcome::Finished { last } => {
                assert_eq!(last, 4);
                break;
            }
            TapOutcome::Ignored => panic!("tap ignored while showing"),
        }
        assert_eq!(finished.get(), 0, "completion fired before the last tap");
    }

    assert_eq!(
        titles,
        [
            "My Current Location",
            "Favourite Location's",
            "My Device",
            "Personal Info",
            "Location Enable Tag's",
        ]
    );
    assert_eq!(finished.get(), 1);

    run_frames(&mut ctl, &layout, 30);
    assert!(ctl.frame(&layout).is_none(), "overlay gone after the fade");
    assert_eq!(finished.get(), 1);
}

#[test]
fn cutout_sits_on_target_with_top_inset() {
    let mut ctl = SequenceController::new(OverlayOptions::default());
    let mut registry = RegionRegistry::new();
    let layout = home_layout();
    commit_home(&mut registry);
    ctl.on_registry_change(registry.snapshot());

    let scene = ctl.frame(&layout).expect("scene");
    let cutout = scene.cutout.expect("cutout");
    assert_eq!(
        cutout.shape.rect,
        Rect::new(331.0 - 2.5, 15.0 + TOP_INSET - 2.5, 49.0, 49.0)
    );
    assert_eq!(scene.dim.bounds, Rect::from_size(SCREEN));
    assert_eq!(scene.tap_region, Rect::from_size(SCREEN));
}

#[test]
fn layout_change_is_followed_without_restarting() {
    let mut ctl = SequenceController::new(OverlayOptions::default());
    let mut registry = RegionRegistry::new();
    let mut layout = home_layout();
    commit_home(&mut registry);
    ctl.on_registry_change(registry.snapshot());
    run_frames(&mut ctl, &layout, 10);
    ctl.tap();
    run_frames(&mut ctl, &layout, 5);
    assert_eq!(ctl.current_order(), Some(1));

    // Rotation mid-morph: the favourite button moves.
    layout.set_screen_size(Size::new(844.0, 390.0));
    layout.set_anchor(FAVOURITE, Rect::new(700.0, 40.0, 44.0, 44.0));
    commit_home(&mut registry);
    ctl.on_registry_change(registry.snapshot());
    assert_eq!(ctl.current_order(), Some(1), "sequence not restarted");

    run_frames(&mut ctl, &layout, 60);
    let scene = ctl.frame(&layout).expect("scene");
    let rect = scene.cutout.expect("cutout").shape.rect;
    assert!((rect.x - 697.5).abs() < 0.01, "{rect:?}");
    assert!((rect.y - (40.0 + TOP_INSET - 2.5)).abs() < 0.01, "{rect:?}");
    assert_eq!(scene.dim.bounds, Rect::new(0.0, 0.0, 844.0, 390.0));
    assert_eq!(ctl.phase(), Phase::ShowingTitle);
}

#[test]
fn missing_anchor_dims_without_cutout() {
    let mut ctl = SequenceController::new(OverlayOptions::default());
    let mut registry = RegionRegistry::new();
    let mut layout = home_layout();
    layout.remove_anchor(LOCATION);
    commit_home(&mut registry);
    ctl.on_registry_change(registry.snapshot());
    run_frames(&mut ctl, &layout, 10);

    let scene = ctl.frame(&layout).expect("dim layer still drawn");
    assert!(scene.cutout.is_none());
    assert!(scene.popover.is_none());
    assert_eq!(ctl.tap(), TapOutcome::Advanced { from: 0, to: 1 });
    run_frames(&mut ctl, &layout, 40);
    assert!(ctl.frame(&layout).and_then(|s| s.cutout).is_some());
}

#[test]
fn disabled_overlay_never_draws() {
    let mut ctl = SequenceController::new(OverlayOptions::disabled());
    let mut registry = RegionRegistry::new();
    let layout = home_layout();
    commit_home(&mut registry);
    ctl.on_registry_change(registry.snapshot());

    let mut canvas = Canvas::fit(SCREEN, 39, 42);
    for _ in 0..60 {
        ctl.tick(FRAME);
        assert_eq!(ctl.tap(), TapOutcome::Ignored);
        if let Some(scene) = ctl.frame(&layout) {
            canvas.paint(&scene);
        }
    }
    assert!(canvas.is_blank());
}

#[test]
fn teardown_before_title_is_inert() {
    let finished = Rc::new(Cell::new(false));
    let seen = Rc::clone(&finished);
    let mut ctl = SequenceController::new(OverlayOptions::new(move || seen.set(true)));
    let mut registry = RegionRegistry::new();
    let layout = home_layout();
    commit_home(&mut registry);
    ctl.on_registry_change(registry.snapshot());
    ctl.tap();
    assert!(ctl.pending_continuations() > 0);

    ctl.detach();
    run_frames(&mut ctl, &layout, 100);
    assert_eq!(ctl.phase(), Phase::ShowingHighlight);
    assert!(ctl.frame(&layout).is_none());
    assert_eq!(ctl.tap(), TapOutcome::Ignored);
    assert!(!finished.get());
}

#[test]
fn canvas_shows_title_and_hole() {
    let mut ctl = SequenceController::new(OverlayOptions::default());
    let mut registry = RegionRegistry::new();
    let layout = home_layout();
    commit_home(&mut registry);
    ctl.on_registry_change(registry.snapshot());
    run_frames(&mut ctl, &layout, 10);

    let scene = ctl.frame(&layout).expect("scene");
    let mut canvas = Canvas::fit(SCREEN, 78, 60);
    canvas.paint(&scene);
    let text = canvas.to_ascii();
    assert!(text.contains("My Current Location"), "{text}");
    assert!(canvas.dimmed_cells() > 78 * 60 / 2);
    assert!(canvas.dimmed_cells() < 78 * 60);
}
