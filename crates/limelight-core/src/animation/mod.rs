#![forbid(unsafe_code)]

//! Deterministic, tick-driven animation primitives.
//!
//! Every animation advances only when the host calls [`Animation::tick`]
//! with an elapsed [`Duration`], so the same tick sequence always yields the
//! same values. Nothing here reads a wall clock.
//!
//! - [`Fade`]: eased 0 → 1 progress over a fixed duration.
//! - [`Spring`](spring::Spring): damped harmonic oscillator.
//! - [`RectMorph`](morph::RectMorph): spring-driven morph between two rectangles.

pub mod morph;
pub mod spring;

use std::time::Duration;

pub use morph::{MorphFrame, RectMorph};
pub use spring::Spring;

/// A time-driven animation producing a value in `[0.0, 1.0]`.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end state.
    fn is_complete(&self) -> bool;

    /// Current value, clamped to `[0.0, 1.0]`.
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);
}

/// An easing curve mapping linear progress `t ∈ [0, 1]` to eased progress.
pub type EasingFn = fn(f32) -> f32;

/// Identity easing.
#[inline]
pub fn linear(t: f32) -> f32 {
    t
}

/// Quadratic ease-in-out.
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Eased progress from 0.0 to 1.0 over a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    duration: Duration,
    elapsed: Duration,
    easing: EasingFn,
}

impl Fade {
    /// Create a linear fade. Zero durations are clamped to 1ns.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration: duration.max(Duration::from_nanos(1)),
            elapsed: Duration::ZERO,
            easing: linear,
        }
    }

    /// Set the easing function.
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }
}

impl Animation for Fade {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (self.easing)((t as f32).clamp(0.0, 1.0)).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}
