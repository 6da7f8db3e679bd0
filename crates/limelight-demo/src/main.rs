#![forbid(unsafe_code)]

//! Limelight Demo
//!
//! Headless replay of the home-screen onboarding: a map with two floating
//! buttons on the right and a three-item tab bar at the bottom. The demo taps
//! through every highlight on a simulated 60 fps clock and prints each frame
//! of the overlay as ASCII.
//!
//! # Running
//!
//! ```sh
//! cargo run -p limelight-demo
//! cargo run -p limelight-demo -- --width 60 --height 50 --frames-per-step 40
//! RUST_LOG=limelight=trace cargo run -p limelight-demo -- --no-highlights
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use limelight::{
    AnchorId, Canvas, Insets, OverlayOptions, Phase, Rect, RegionRegistry, SequenceController,
    ShowCase, Size, StaticLayout, TapOutcome,
};

const FRAME: Duration = Duration::from_millis(16);
const SCREEN: Size = Size::new(390.0, 844.0);
const SAFE_AREA: Insets = Insets::vertical(47.0, 34.0);
const TAB_ITEM: f32 = 45.0;

const LOCATION_BUTTON: AnchorId = AnchorId::new(1);
const FAVOURITE_BUTTON: AnchorId = AnchorId::new(2);
const DEVICE_TAB: AnchorId = AnchorId::new(3);
const TAGS_TAB: AnchorId = AnchorId::new(4);
const PERSONAL_TAB: AnchorId = AnchorId::new(5);

#[derive(Debug, Clone, Copy)]
struct DemoArgs {
    width: u16,
    height: u16,
    frames_per_step: usize,
    show_highlights: bool,
}

fn flag_value<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .skip_while(|a| *a != flag)
        .nth(1)
        .and_then(|s| s.parse().ok())
}

fn parse_args() -> DemoArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    DemoArgs {
        width: flag_value(&args, "--width").unwrap_or(39),
        height: flag_value(&args, "--height").unwrap_or(42),
        frames_per_step: flag_value(&args, "--frames-per-step").unwrap_or(45),
        show_highlights: !args.iter().any(|a| a == "--no-highlights"),
    }
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("limelight=debug"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// The home screen as the host lays it out, in content coordinates.
fn home_layout() -> StaticLayout {
    let content_height = SCREEN.height - SAFE_AREA.vertical_sum();
    let tab_y = content_height - TAB_ITEM - 16.0;
    let slot = SCREEN.width / 3.0;
    let tab = |i: f32| Rect::new(slot * i + (slot - TAB_ITEM) / 2.0, tab_y, TAB_ITEM, TAB_ITEM);

    StaticLayout::new(SCREEN, SAFE_AREA)
        .with_anchor(LOCATION_BUTTON, Rect::new(331.0, 15.0, 44.0, 44.0))
        .with_anchor(FAVOURITE_BUTTON, Rect::new(331.0, 69.0, 44.0, 44.0))
        .with_anchor(DEVICE_TAB, tab(0.0))
        .with_anchor(TAGS_TAB, tab(1.0))
        .with_anchor(PERSONAL_TAB, tab(2.0))
}

/// One layout pass over the home screen tree.
fn declare_home(registry: &mut RegionRegistry) {
    let mut pass = registry.begin_pass();
    pass.subtree(|map| {
        LOCATION_BUTTON
            .show_case(0, "My Current Location", 10.0)
            .contribute(map);
        FAVOURITE_BUTTON
            .show_case(1, "Favourite Location's", 10.0)
            .contribute(map);
    });
    pass.subtree(|tab_bar| {
        DEVICE_TAB.show_case(2, "My Device", 10.0).contribute(tab_bar);
        TAGS_TAB
            .show_case(4, "Location Enable Tag's", 10.0)
            .contribute(tab_bar);
        PERSONAL_TAB
            .show_case(3, "Personal Info", 10.0)
            .contribute(tab_bar);
    });
    registry.commit(pass);
}

fn print_frame(canvas: &mut Canvas, ctl: &mut SequenceController, layout: &StaticLayout, label: &str) {
    println!("── {label} ({:?}, t={} ms)", ctl.phase(), ctl.now().as_millis());
    match ctl.frame(layout) {
        Some(scene) => {
            canvas.paint(&scene);
            print!("{}", canvas.to_ascii());
        }
        None => println!("(nothing rendered)"),
    }
}

fn run_frames(ctl: &mut SequenceController, layout: &StaticLayout, frames: usize) {
    for _ in 0..frames {
        ctl.tick(FRAME);
        // Frames between printed samples still drive the cutout morph.
        let _ = ctl.frame(layout);
    }
}

fn main() {
    setup_tracing();
    let args = parse_args();
    let started = web_time::Instant::now();

    let finished = Rc::new(Cell::new(false));
    let on_finished = {
        let finished = Rc::clone(&finished);
        move || {
            println!("Finished Onboarding");
            finished.set(true);
        }
    };
    let options = OverlayOptions::new(on_finished).show_highlights(args.show_highlights);
    let mut ctl = SequenceController::new(options);
    let layout = home_layout();
    let mut registry = RegionRegistry::new();
    let mut canvas = Canvas::fit(SCREEN, args.width, args.height);

    declare_home(&mut registry);
    ctl.on_registry_change(registry.snapshot());
    tracing::info!(
        target: "limelight.demo",
        orders = ?ctl.sorted_orders(),
        show_highlights = args.show_highlights,
        "home screen declared"
    );

    let mut step = 0usize;
    loop {
        run_frames(&mut ctl, &layout, args.frames_per_step);
        let label = match ctl.current_highlight() {
            Some(spec) => format!("step {step}: order {} {:?}", spec.order, spec.title),
            None => format!("step {step}"),
        };
        print_frame(&mut canvas, &mut ctl, &layout, &label);

        match ctl.tap() {
            TapOutcome::Advanced { .. } => step += 1,
            TapOutcome::Finished { .. } => break,
            TapOutcome::Ignored => {
                println!("tap ignored; highlights are disabled");
                break;
            }
        }
    }

    if ctl.phase() == Phase::Finished {
        run_frames(&mut ctl, &layout, 8);
        print_frame(&mut canvas, &mut ctl, &layout, "fading out");
        run_frames(&mut ctl, &layout, 30);
        print_frame(&mut canvas, &mut ctl, &layout, "after fade");
    }
    ctl.detach();

    tracing::info!(
        target: "limelight.demo",
        steps = step + 1,
        finished = finished.get(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "walkthrough done"
    );
}
