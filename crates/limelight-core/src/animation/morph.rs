#![forbid(unsafe_code)]

//! Identity-preserving morph between two rounded rectangles.
//!
//! One [`RectMorph`] stands for one on-screen shape. Retargeting it starts a
//! new spring from wherever the shape currently is, so consecutive targets
//! read as continuous motion instead of a cross-fade.
//!
//! # Invariants
//!
//! 1. `current()` equals `from` at progress 0 and `to` once settled.
//! 2. `follow()` moves the destination without restarting the spring.
//! 3. Spring overshoot carries into the rectangle, but the corner radius
//!    never goes negative.

use std::time::Duration;

use super::{Animation, Spring};
use crate::geometry::Rect;

/// A rounded rectangle sampled from a morph.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MorphFrame {
    pub rect: Rect,
    pub corner_radius: f32,
}

impl MorphFrame {
    #[must_use]
    pub const fn new(rect: Rect, corner_radius: f32) -> Self {
        Self {
            rect,
            corner_radius,
        }
    }

    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            rect: self.rect.lerp(&other.rect, t),
            corner_radius: crate::geometry::lerp(self.corner_radius, other.corner_radius, t)
                .max(0.0),
        }
    }
}

/// Spring-driven morph from one [`MorphFrame`] to another.
#[derive(Debug, Clone)]
pub struct RectMorph {
    from: MorphFrame,
    to: MorphFrame,
    spring: Spring,
}

impl RectMorph {
    /// A morph already resting on `frame`.
    #[must_use]
    pub fn resting(frame: MorphFrame) -> Self {
        let mut spring = Spring::new(0.0, 1.0);
        spring.settle();
        Self {
            from: frame,
            to: frame,
            spring,
        }
    }

    /// Start morphing toward `to` from the current sample, using `spring`
    /// (normalized 0 → 1) for progress.
    pub fn retarget(&mut self, to: MorphFrame, mut spring: Spring) {
        self.from = self.current();
        self.to = to;
        spring.reset();
        self.spring = spring;
    }

    /// Update the destination in place, e.g. after a layout pass moved the
    /// target. The spring keeps its progress.
    pub fn follow(&mut self, to: MorphFrame) {
        self.to = to;
        if self.spring.is_at_rest() {
            self.from = to;
        }
    }

    /// Current sample.
    #[must_use]
    pub fn current(&self) -> MorphFrame {
        if self.spring.is_at_rest() {
            return self.to;
        }
        self.from.lerp(&self.to, self.spring.position() as f32)
    }

    /// Destination frame.
    #[must_use]
    pub fn destination(&self) -> MorphFrame {
        self.to
    }

    /// Whether the spring has settled on the destination.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.spring.is_at_rest()
    }

    /// Advance the morph.
    pub fn tick(&mut self, dt: Duration) {
        self.spring.tick(dt);
        if self.spring.is_at_rest() {
            self.from = self.to;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(x: f32, y: f32, w: f32, h: f32, r: f32) -> MorphFrame {
        MorphFrame::new(Rect::new(x, y, w, h), r)
    }

    fn spring() -> Spring {
        Spring::interactive(Duration::from_millis(300), 0.7)
    }

    #[test]
    fn resting_morph_reports_frame() {
        let start = frame(10.0, 10.0, 40.0, 40.0, 10.0);
        let morph = RectMorph::resting(start);
        assert!(morph.is_settled());
        assert_eq!(morph.current(), start);
    }

    #[test]
    fn retarget_starts_from_current_and_lands_on_destination() {
        let start = frame(10.0, 10.0, 40.0, 40.0, 10.0);
        let end = frame(200.0, 600.0, 45.0, 45.0, 22.5);
        let mut morph = RectMorph::resting(start);
        morph.retarget(end, spring());
        assert_eq!(morph.current(), start);
        assert!(!morph.is_settled());

        morph.tick(Duration::from_millis(100));
        let mid = morph.current();
        assert!(mid.rect.x > start.rect.x && mid.rect.x < 250.0);

        morph.tick(Duration::from_secs(3));
        assert!(morph.is_settled());
        assert_eq!(morph.current(), end);
    }

    #[test]
    fn retarget_mid_flight_is_continuous() {
        let a = frame(0.0, 0.0, 10.0, 10.0, 0.0);
        let b = frame(100.0, 0.0, 10.0, 10.0, 0.0);
        let c = frame(100.0, 100.0, 10.0, 10.0, 0.0);
        let mut morph = RectMorph::resting(a);
        morph.retarget(b, spring());
        morph.tick(Duration::from_millis(80));
        let before = morph.current();
        morph.retarget(c, spring());
        assert_eq!(morph.current(), before);
    }

    #[test]
    fn follow_moves_destination_without_restart() {
        let a = frame(0.0, 0.0, 10.0, 10.0, 0.0);
        let b = frame(100.0, 0.0, 10.0, 10.0, 0.0);
        let mut morph = RectMorph::resting(a);
        morph.retarget(b, spring());
        morph.tick(Duration::from_millis(80));
        let moved = frame(100.0, 50.0, 10.0, 10.0, 0.0);
        morph.follow(moved);
        assert!(!morph.is_settled());
        assert_eq!(morph.destination(), moved);
        morph.tick(Duration::from_secs(3));
        assert_eq!(morph.current(), moved);
    }

    #[test]
    fn follow_while_resting_snaps() {
        let a = frame(0.0, 0.0, 10.0, 10.0, 4.0);
        let mut morph = RectMorph::resting(a);
        let moved = frame(5.0, 5.0, 12.0, 12.0, 4.0);
        morph.follow(moved);
        assert_eq!(morph.current(), moved);
    }

    #[test]
    fn corner_radius_never_negative() {
        let a = frame(0.0, 0.0, 10.0, 10.0, 20.0);
        let b = frame(0.0, 0.0, 10.0, 10.0, 0.0);
        let mut morph = RectMorph::resting(a);
        morph.retarget(b, Spring::interactive(Duration::from_millis(300), 0.2));
        for _ in 0..120 {
            morph.tick(Duration::from_millis(8));
            assert!(morph.current().corner_radius >= 0.0);
        }
    }
}
