#![forbid(unsafe_code)]

//! The onboarding state machine.
//!
//! [`SequenceController`] owns the cursor into the sorted highlight orders and
//! the current [`Phase`]. The host drives it with four kinds of input:
//! registry snapshots ([`SequenceController::on_registry_change`]), taps
//! ([`SequenceController::tap`]), elapsed time ([`SequenceController::tick`]),
//! and frame requests ([`SequenceController::frame`]).
//!
//! ```text
//!          registry valid            title delay
//!   Idle ─────────────────▶ ShowingHighlight ─────────▶ ShowingTitle
//!    ▲                         ▲      │ tap (not last)      │
//!    │ cursor out of range     └──────┴─────────────────────┤
//!    │                                                      │ tap (last)
//!    └── any ◀── set_show_highlights(false)                 ▼
//!                                                        Finished
//! ```
//!
//! # Invariants
//!
//! 1. Highlights are visited in strictly ascending `order`, each once.
//! 2. `on_finished` runs exactly once, on the tap made while the last
//!    highlight is showing, and never when highlights are disabled.
//! 3. A title continuation only takes effect if no tap, toggle, registry
//!    invalidation, or detach happened since it was scheduled.
//! 4. After [`SequenceController::detach`] nothing mutates phase or renders.
//! 5. Once [`Phase::Finished`] is reached it is never left.

use std::fmt;
use std::time::Duration;

use limelight_core::animation::{Animation, Fade, RectMorph, Spring, ease_in_out};
use limelight_core::delay::DelayQueue;

use crate::config::OverlayConfig;
use crate::gate::{FixedDelay, Transition, TransitionGate, Wait};
use crate::highlight::HighlightSpec;
use crate::overlay::{OverlayRenderer, OverlayScene, RenderState};
use crate::registry::RegistrySnapshot;
use crate::resolve::{LayoutPass, resolve};

/// Where the sequence is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Nothing to show yet, or the cursor is out of range.
    Idle,
    /// Cutout visible, title hidden.
    ShowingHighlight,
    /// Cutout and title visible.
    ShowingTitle,
    /// The last highlight was tapped; the overlay fades out.
    Finished,
}

impl Phase {
    /// Whether a highlight is on screen.
    #[must_use]
    pub const fn is_presenting(self) -> bool {
        matches!(self, Self::ShowingHighlight | Self::ShowingTitle)
    }
}

/// Host-supplied overlay options.
pub struct OverlayOptions {
    pub show_highlights: bool,
    pub on_finished: Option<Box<dyn FnOnce()>>,
}

impl OverlayOptions {
    /// Enabled overlay calling `on_finished` when the sequence completes.
    #[must_use]
    pub fn new(on_finished: impl FnOnce() + 'static) -> Self {
        Self {
            show_highlights: true,
            on_finished: Some(Box::new(on_finished)),
        }
    }

    /// An overlay that never shows anything.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            show_highlights: false,
            on_finished: None,
        }
    }

    #[must_use]
    pub fn show_highlights(mut self, show: bool) -> Self {
        self.show_highlights = show;
        self
    }
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            show_highlights: true,
            on_finished: None,
        }
    }
}

impl fmt::Debug for OverlayOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayOptions")
            .field("show_highlights", &self.show_highlights)
            .field("on_finished", &self.on_finished.as_ref().map(|_| ".."))
            .finish()
    }
}

/// What a tap did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Nothing is presented, highlights are disabled, or the overlay is gone.
    Ignored,
    /// Moved from one order to the next.
    Advanced { from: i32, to: i32 },
    /// The last highlight was tapped and the sequence completed.
    Finished { last: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continuation {
    ShowTitle,
}

#[derive(Debug, Clone, Copy)]
struct SettleWait {
    not_before: Duration,
}

/// Single owner of the sequence state.
pub struct SequenceController {
    config: OverlayConfig,
    renderer: OverlayRenderer,
    gate: Box<dyn TransitionGate>,
    show_highlights: bool,
    on_finished: Option<Box<dyn FnOnce()>>,

    snapshot: RegistrySnapshot,
    sorted_orders: Vec<i32>,
    current_index: usize,
    phase: Phase,

    morph: Option<RectMorph>,
    morph_order: Option<i32>,
    animate_next_morph: bool,
    fade: Option<Fade>,

    pending: DelayQueue<Continuation>,
    /// Cleared together with `pending` by every transition.
    settle_wait: Option<SettleWait>,
    attached: bool,
}

impl fmt::Debug for SequenceController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceController")
            .field("phase", &self.phase)
            .field("current_index", &self.current_index)
            .field("sorted_orders", &self.sorted_orders)
            .field("show_highlights", &self.show_highlights)
            .field("gate", &self.gate)
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}

impl SequenceController {
    /// Create a controller with default configuration and fixed delays.
    #[must_use]
    pub fn new(options: OverlayOptions) -> Self {
        let config = OverlayConfig::default();
        Self {
            renderer: OverlayRenderer::new(&config),
            gate: Box::new(FixedDelay::from_timing(&config.timing)),
            config,
            show_highlights: options.show_highlights,
            on_finished: options.on_finished,
            snapshot: RegistrySnapshot::new(),
            sorted_orders: Vec::new(),
            current_index: 0,
            phase: Phase::Idle,
            morph: None,
            morph_order: None,
            animate_next_morph: false,
            fade: None,
            pending: DelayQueue::new(),
            settle_wait: None,
            attached: true,
        }
    }

    /// Replace the configuration. Also resets the gate to [`FixedDelay`]
    /// built from the new timing; call [`Self::with_gate`] afterwards to
    /// override it.
    #[must_use]
    pub fn with_config(mut self, config: OverlayConfig) -> Self {
        self.renderer = OverlayRenderer::new(&config);
        self.gate = Box::new(FixedDelay::from_timing(&config.timing));
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_gate(mut self, gate: impl TransitionGate + 'static) -> Self {
        self.gate = Box::new(gate);
        self
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Order key under the cursor, if the cursor is in range.
    #[must_use]
    pub fn current_order(&self) -> Option<i32> {
        self.sorted_orders.get(self.current_index).copied()
    }

    #[must_use]
    pub fn current_highlight(&self) -> Option<&HighlightSpec> {
        self.current_order().and_then(|order| self.snapshot.get(order))
    }

    #[must_use]
    pub fn sorted_orders(&self) -> &[i32] {
        &self.sorted_orders
    }

    #[must_use]
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    #[must_use]
    pub fn show_highlights(&self) -> bool {
        self.show_highlights
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Logical time driven by [`Self::tick`].
    #[must_use]
    pub fn now(&self) -> Duration {
        self.pending.now()
    }

    /// Number of scheduled title continuations.
    #[must_use]
    pub fn pending_continuations(&self) -> usize {
        self.pending.len() + usize::from(self.settle_wait.is_some())
    }

    /// Whether the cutout morph is at rest.
    #[must_use]
    pub fn is_morph_settled(&self) -> bool {
        !self.animate_next_morph && self.morph.as_ref().is_none_or(RectMorph::is_settled)
    }

    // -----------------------------------------------------------------------
    // Inputs
    // -----------------------------------------------------------------------

    /// Accept the snapshot of a new layout pass.
    pub fn on_registry_change(&mut self, snapshot: &RegistrySnapshot) {
        if !self.attached {
            return;
        }
        self.snapshot = snapshot.clone();
        self.sorted_orders = self.snapshot.sorted_orders();
        tracing::debug!(
            target: "limelight.sequence",
            entries = self.sorted_orders.len(),
            cursor = self.current_index,
            phase = ?self.phase,
            "registry changed"
        );
        self.sync_presence();
    }

    /// Enable or disable the overlay at runtime.
    pub fn set_show_highlights(&mut self, show: bool) {
        if !self.attached || self.show_highlights == show {
            return;
        }
        self.show_highlights = show;
        tracing::debug!(target: "limelight.sequence", show, "show_highlights toggled");
        self.sync_presence();
    }

    /// Handle a tap anywhere on the overlay.
    pub fn tap(&mut self) -> TapOutcome {
        if !self.attached || !self.show_highlights || !self.phase.is_presenting() {
            tracing::trace!(target: "limelight.sequence", phase = ?self.phase, "tap ignored");
            return TapOutcome::Ignored;
        }
        let Some(from) = self.current_order() else {
            return TapOutcome::Ignored;
        };

        if self.current_index + 1 >= self.sorted_orders.len() {
            self.finish(from);
            return TapOutcome::Finished { last: from };
        }

        self.current_index += 1;
        let to = self.sorted_orders[self.current_index];
        self.cancel_title();
        self.phase = Phase::ShowingHighlight;
        self.animate_next_morph = true;
        tracing::debug!(
            target: "limelight.sequence",
            from,
            to,
            index = self.current_index,
            "advanced"
        );
        self.schedule_title(Transition::Advance);
        TapOutcome::Advanced { from, to }
    }

    /// Advance animations and fire due continuations.
    pub fn tick(&mut self, dt: Duration) {
        if !self.attached {
            return;
        }
        if let Some(morph) = self.morph.as_mut() {
            morph.tick(dt);
        }
        if let Some(fade) = self.fade.as_mut() {
            fade.tick(dt);
        }
        for continuation in self.pending.advance(dt) {
            match continuation {
                Continuation::ShowTitle => self.show_title(),
            }
        }
        if let Some(wait) = self.settle_wait
            && self.pending.now() >= wait.not_before
            && self.is_morph_settled()
        {
            self.settle_wait = None;
            self.show_title();
        }
    }

    /// Build this frame's scene against the host's current layout pass.
    ///
    /// Returns `None` whenever nothing should be drawn.
    pub fn frame(&mut self, layout: &dyn LayoutPass) -> Option<OverlayScene> {
        if !self.attached || !self.show_highlights {
            return None;
        }
        let opacity = match self.phase {
            Phase::Idle => return None,
            Phase::ShowingHighlight | Phase::ShowingTitle => 1.0,
            Phase::Finished => match &self.fade {
                Some(fade) if !fade.is_complete() => 1.0 - fade.value(),
                _ => return None,
            },
        };

        let order = self.current_order()?;
        let highlight = self.snapshot.get(order)?.clone();
        let target = resolve(highlight.anchor, layout);

        let cutout = if target.is_degenerate() {
            // Nothing to morph toward; the next resolvable target snaps.
            self.animate_next_morph = false;
            None
        } else {
            let resting = self.renderer.cutout_frame(&highlight, &target);
            let spring = Spring::interactive(
                self.config.timing.morph_response(),
                self.config.timing.morph_damping_fraction,
            );
            let morph = match self.morph.take() {
                Some(mut morph) if self.morph_order == Some(order) => {
                    morph.follow(resting);
                    morph
                }
                Some(mut morph) if self.animate_next_morph => {
                    morph.retarget(resting, spring);
                    morph
                }
                // Registry-driven jumps snap instead of animating.
                _ => RectMorph::resting(resting),
            };
            let sample = morph.current();
            self.morph = Some(morph);
            self.morph_order = Some(order);
            self.animate_next_morph = false;
            Some(sample)
        };

        let state = RenderState {
            phase: self.phase,
            opacity,
            cutout,
        };
        Some(self.renderer.render(&highlight, &target, &state))
    }

    /// Tear the overlay down. Every scheduled continuation becomes inert and
    /// all further input is ignored.
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        let dropped = self.cancel_title();
        self.morph = None;
        self.fade = None;
        self.on_finished = None;
        tracing::debug!(
            target: "limelight.sequence",
            dropped,
            phase = ?self.phase,
            "detached"
        );
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    fn sync_presence(&mut self) {
        if self.phase == Phase::Finished {
            return;
        }
        let valid = self.current_index < self.sorted_orders.len();
        let should_present = self.show_highlights && valid;

        match (self.phase.is_presenting(), should_present) {
            (false, true) => {
                self.cancel_title();
                self.phase = Phase::ShowingHighlight;
                tracing::debug!(
                    target: "limelight.sequence",
                    index = self.current_index,
                    order = self.sorted_orders[self.current_index],
                    "showing highlight"
                );
                self.schedule_title(Transition::Appear);
            }
            (true, false) => {
                self.cancel_title();
                self.phase = Phase::Idle;
                self.morph = None;
                self.morph_order = None;
                self.animate_next_morph = false;
                tracing::debug!(
                    target: "limelight.sequence",
                    index = self.current_index,
                    entries = self.sorted_orders.len(),
                    enabled = self.show_highlights,
                    "nothing to present"
                );
            }
            _ => {}
        }
    }

    fn finish(&mut self, last: i32) {
        self.cancel_title();
        self.phase = Phase::Finished;
        self.fade = Some(Fade::new(self.config.timing.finish_fade()).easing(ease_in_out));
        tracing::debug!(target: "limelight.sequence", last, "sequence finished");
        if let Some(on_finished) = self.on_finished.take() {
            on_finished();
        }
    }

    /// Drop every scheduled title. Returns how many were dropped.
    fn cancel_title(&mut self) -> usize {
        self.pending.cancel_all() + usize::from(self.settle_wait.take().is_some())
    }

    fn schedule_title(&mut self, transition: Transition) {
        match self.gate.wait_for(transition) {
            Wait::After(delay) => self.pending.schedule(delay, Continuation::ShowTitle),
            Wait::UntilSettled { at_least } => {
                self.settle_wait = Some(SettleWait {
                    not_before: self.pending.now() + at_least,
                });
            }
        }
    }

    fn show_title(&mut self) {
        if self.phase != Phase::ShowingHighlight {
            tracing::trace!(
                target: "limelight.sequence",
                phase = ?self.phase,
                "title continuation ignored"
            );
            return;
        }
        self.phase = Phase::ShowingTitle;
        tracing::debug!(
            target: "limelight.sequence",
            order = self.current_order(),
            "showing title"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use limelight_core::geometry::{Insets, Rect, Size};

    use super::*;
    use crate::gate::AnimationSettled;
    use crate::highlight::AnchorId;
    use crate::resolve::StaticLayout;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn snapshot(orders: &[i32]) -> RegistrySnapshot {
        orders
            .iter()
            .map(|&o| HighlightSpec::new(o, AnchorId::new(o as u64), format!("title {o}")))
            .collect()
    }

    fn layout(orders: &[i32]) -> StaticLayout {
        let mut layout = StaticLayout::new(Size::new(390.0, 844.0), Insets::vertical(47.0, 34.0));
        for &o in orders {
            layout.set_anchor(
                AnchorId::new(o as u64),
                Rect::new(20.0 + o as f32 * 40.0, 600.0, 45.0, 45.0),
            );
        }
        layout
    }

    fn counting() -> (OverlayOptions, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        (OverlayOptions::new(move || seen.set(seen.get() + 1)), count)
    }

    #[test]
    fn starts_idle_and_appears_on_first_snapshot() {
        let mut ctl = SequenceController::new(OverlayOptions::default());
        assert_eq!(ctl.phase(), Phase::Idle);
        assert!(ctl.frame(&layout(&[])).is_none());

        ctl.on_registry_change(&snapshot(&[2, 4, 3]));
        assert_eq!(ctl.sorted_orders(), &[2, 3, 4]);
        assert_eq!(ctl.phase(), Phase::ShowingHighlight);
        assert_eq!(ctl.current_order(), Some(2));

        ctl.tick(ms(79));
        assert_eq!(ctl.phase(), Phase::ShowingHighlight);
        ctl.tick(ms(1));
        assert_eq!(ctl.phase(), Phase::ShowingTitle);
    }

    #[test]
    fn advance_waits_for_advance_delay() {
        let mut ctl = SequenceController::new(OverlayOptions::default());
        ctl.on_registry_change(&snapshot(&[0, 1]));
        ctl.tick(ms(80));
        assert_eq!(ctl.tap(), TapOutcome::Advanced { from: 0, to: 1 });
        assert_eq!(ctl.phase(), Phase::ShowingHighlight);
        ctl.tick(ms(519));
        assert_eq!(ctl.phase(), Phase::ShowingHighlight);
        ctl.tick(ms(1));
        assert_eq!(ctl.phase(), Phase::ShowingTitle);
    }

    #[test]
    fn tap_before_title_supersedes_pending_title() {
        let mut ctl = SequenceController::new(OverlayOptions::default());
        ctl.on_registry_change(&snapshot(&[0, 1, 2]));
        ctl.tap();
        // The 80 ms title of order 0 must not show order 1's title early.
        ctl.tick(ms(100));
        assert_eq!(ctl.phase(), Phase::ShowingHighlight);
        assert_eq!(ctl.pending_continuations(), 1);
    }

    #[test]
    fn hiding_cancels_the_scheduled_title() {
        let mut ctl = SequenceController::new(OverlayOptions::default());
        ctl.on_registry_change(&snapshot(&[0, 1]));
        ctl.tick(ms(40));
        ctl.set_show_highlights(false);
        ctl.set_show_highlights(true);
        assert_eq!(ctl.pending_continuations(), 1);
        // The first 80 ms title was dropped; only the rescheduled one counts.
        ctl.tick(ms(40));
        assert_eq!(ctl.phase(), Phase::ShowingHighlight);
        ctl.tick(ms(40));
        assert_eq!(ctl.phase(), Phase::ShowingTitle);
        assert_eq!(ctl.pending_continuations(), 0);
    }

    #[test]
    fn completion_fires_once_on_last_tap() {
        let (options, count) = counting();
        let mut ctl = SequenceController::new(options);
        ctl.on_registry_change(&snapshot(&[5, 1, 3]));
        assert!(matches!(ctl.tap(), TapOutcome::Advanced { .. }));
        assert!(matches!(ctl.tap(), TapOutcome::Advanced { .. }));
        assert_eq!(count.get(), 0);
        assert_eq!(ctl.tap(), TapOutcome::Finished { last: 5 });
        assert_eq!(count.get(), 1);
        assert_eq!(ctl.tap(), TapOutcome::Ignored);
        assert_eq!(count.get(), 1);
        assert_eq!(ctl.phase(), Phase::Finished);
    }

    #[test]
    fn finished_fades_then_renders_nothing() {
        let orders = [0];
        let mut ctl = SequenceController::new(OverlayOptions::default());
        ctl.on_registry_change(&snapshot(&orders));
        ctl.tap();
        let first = ctl.frame(&layout(&orders)).expect("fading frame");
        assert_eq!(first.opacity, 1.0);
        assert!(first.popover.is_none());
        ctl.tick(ms(125));
        let mid = ctl.frame(&layout(&orders)).expect("fading frame");
        assert!((mid.opacity - 0.5).abs() < 1e-3);
        ctl.tick(ms(125));
        assert!(ctl.frame(&layout(&orders)).is_none());

        ctl.on_registry_change(&snapshot(&[0, 1]));
        assert_eq!(ctl.phase(), Phase::Finished);
        assert!(ctl.frame(&layout(&[0, 1])).is_none());
    }

    #[test]
    fn disabled_accepts_snapshots_silently() {
        let mut ctl = SequenceController::new(OverlayOptions::disabled());
        ctl.on_registry_change(&snapshot(&[0, 1]));
        assert_eq!(ctl.sorted_orders(), &[0, 1]);
        assert_eq!(ctl.phase(), Phase::Idle);
        assert_eq!(ctl.tap(), TapOutcome::Ignored);
        ctl.tick(ms(1000));
        assert!(ctl.frame(&layout(&[0, 1])).is_none());
    }

    #[test]
    fn toggling_show_highlights_hides_and_reappears() {
        let mut ctl = SequenceController::new(OverlayOptions::default());
        ctl.on_registry_change(&snapshot(&[0, 1]));
        ctl.tick(ms(80));
        ctl.set_show_highlights(false);
        assert_eq!(ctl.phase(), Phase::Idle);
        assert_eq!(ctl.pending_continuations(), 0);
        ctl.set_show_highlights(true);
        assert_eq!(ctl.phase(), Phase::ShowingHighlight);
        ctl.tick(ms(80));
        assert_eq!(ctl.phase(), Phase::ShowingTitle);
    }

    #[test]
    fn out_of_range_cursor_renders_nothing_until_valid() {
        let mut ctl = SequenceController::new(OverlayOptions::default());
        ctl.on_registry_change(&snapshot(&[0, 1, 2]));
        ctl.tap();
        ctl.tap();
        assert_eq!(ctl.current_index(), 2);

        ctl.on_registry_change(&snapshot(&[0]));
        assert_eq!(ctl.phase(), Phase::Idle);
        assert!(ctl.frame(&layout(&[0])).is_none());
        assert_eq!(ctl.tap(), TapOutcome::Ignored);
        ctl.tick(ms(1000));
        assert_eq!(ctl.phase(), Phase::Idle);

        ctl.on_registry_change(&snapshot(&[0, 1, 2]));
        assert_eq!(ctl.phase(), Phase::ShowingHighlight);
        assert_eq!(ctl.current_order(), Some(2));
    }

    #[test]
    fn detach_makes_pending_titles_inert() {
        let (options, count) = counting();
        let mut ctl = SequenceController::new(options);
        ctl.on_registry_change(&snapshot(&[0, 1]));
        assert_eq!(ctl.pending_continuations(), 1);
        ctl.detach();
        assert_eq!(ctl.pending_continuations(), 0);
        ctl.tick(ms(1000));
        assert_eq!(ctl.phase(), Phase::ShowingHighlight);
        assert!(ctl.frame(&layout(&[0, 1])).is_none());
        assert_eq!(ctl.tap(), TapOutcome::Ignored);
        ctl.on_registry_change(&snapshot(&[7]));
        assert_eq!(ctl.sorted_orders(), &[0, 1]);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn settled_gate_waits_for_morph() {
        let orders = [0, 1];
        let layout = layout(&orders);
        let mut ctl = SequenceController::new(OverlayOptions::default()).with_gate(AnimationSettled::default());
        ctl.on_registry_change(&snapshot(&orders));
        ctl.frame(&layout);
        ctl.tick(ms(80));
        assert_eq!(ctl.phase(), Phase::ShowingTitle);

        ctl.tap();
        ctl.tick(ms(16));
        assert_eq!(ctl.phase(), Phase::ShowingHighlight, "morph not started yet");
        let mut elapsed = 0;
        while ctl.phase() != Phase::ShowingTitle && elapsed < 5_000 {
            ctl.frame(&layout);
            ctl.tick(ms(16));
            elapsed += 16;
        }
        assert_eq!(ctl.phase(), Phase::ShowingTitle);
        assert!(ctl.is_morph_settled());
        assert!(elapsed > 100, "title waited for the morph ({elapsed} ms)");
    }

    #[test]
    fn morph_moves_between_targets() {
        let orders = [0, 1];
        let layout = layout(&orders);
        let mut ctl = SequenceController::new(OverlayOptions::default());
        ctl.on_registry_change(&snapshot(&orders));
        let start = ctl.frame(&layout).and_then(|s| s.cutout).expect("cutout").shape.rect;
        ctl.tap();
        let still = ctl.frame(&layout).and_then(|s| s.cutout).expect("cutout").shape.rect;
        assert_eq!(still, start, "morph starts at the old rect");
        ctl.tick(ms(100));
        let moving = ctl.frame(&layout).and_then(|s| s.cutout).expect("cutout").shape.rect;
        assert!(moving.x > start.x);
        for _ in 0..120 {
            ctl.tick(ms(16));
        }
        let end = ctl.frame(&layout).and_then(|s| s.cutout).expect("cutout").shape.rect;
        assert!((end.x - (start.x + 40.0)).abs() < 0.01);
    }
}
