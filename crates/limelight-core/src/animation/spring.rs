#![forbid(unsafe_code)]

//! Damped harmonic oscillator used to drive cutout morphs.
//!
//! The spring obeys `F = -k·(x - target) - c·v` with unit mass and is
//! integrated with semi-implicit Euler in fixed sub-steps.
//!
//! Hosts usually describe springs by *response* (the period of the undamped
//! oscillation, in seconds) and *damping fraction* (1.0 = critically damped).
//! [`Spring::interactive`] converts those into stiffness and damping:
//!
//!   k = (2π / response)²,  c = 4π · damping_fraction / response
//!
//! # Invariants
//!
//! 1. Stiffness is at least [`MIN_STIFFNESS`]; damping is never negative.
//! 2. A spring at rest stays at rest until `reset()` wakes it.
//! 3. Large `dt` values are subdivided into steps of at most 4ms, so the
//!    outcome of a tick does not depend on frame pacing beyond rounding.
//! 4. One tick integrates at most [`MAX_ADVANCE`]; a longer stall counts as
//!    that horizon, which bounds the work done per tick.

use std::time::Duration;

use super::Animation;

const MAX_STEP_SECS: f64 = 0.004;

/// Longest span a single tick integrates.
pub const MAX_ADVANCE: Duration = Duration::from_secs(5);

const DEFAULT_REST_THRESHOLD: f64 = 0.001;

const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.01;

/// Smallest stiffness accepted; weaker springs never converge in practice.
pub const MIN_STIFFNESS: f64 = 0.1;

/// Smallest response accepted by [`Spring::interactive`], in seconds.
const MIN_RESPONSE_SECS: f64 = 0.01;

/// A damped spring moving `position` toward `target`.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    initial: f64,
    stiffness: f64,
    damping: f64,
    rest_threshold: f64,
    velocity_threshold: f64,
    at_rest: bool,
}

impl Spring {
    /// Create a spring starting at `initial` and targeting `target`
    /// (stiffness 170, damping 26).
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            initial,
            stiffness: 170.0,
            damping: 26.0,
            rest_threshold: DEFAULT_REST_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            at_rest: false,
        }
    }

    /// Create a normalized 0 → 1 spring from a response time and a damping
    /// fraction.
    ///
    /// ```
    /// use std::time::Duration;
    /// use limelight_core::animation::{Animation, Spring};
    ///
    /// let mut spring = Spring::interactive(Duration::from_millis(300), 0.7);
    /// spring.tick(Duration::from_secs(2));
    /// assert!(spring.is_complete());
    /// ```
    #[must_use]
    pub fn interactive(response: Duration, damping_fraction: f64) -> Self {
        let response = response.as_secs_f64().max(MIN_RESPONSE_SECS);
        let omega = std::f64::consts::TAU / response;
        let damping_fraction = if damping_fraction.is_finite() {
            damping_fraction.max(0.0)
        } else {
            1.0
        };
        Self::new(0.0, 1.0)
            .with_stiffness(omega * omega)
            .with_damping(2.0 * damping_fraction * omega)
    }

    /// Set stiffness (builder pattern). Clamped to [`MIN_STIFFNESS`].
    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = if k.is_finite() { k.max(MIN_STIFFNESS) } else { MIN_STIFFNESS };
        self
    }

    /// Set damping (builder pattern). Clamped to 0.
    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = if c.is_finite() { c.max(0.0) } else { 0.0 };
        self
    }

    /// Current position (unclamped).
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    #[inline]
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Whether the spring has settled at the target.
    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Jump straight to the target and stop.
    pub fn settle(&mut self) {
        self.position = self.target;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance the spring by `dt`, subdividing for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }

        let mut remaining = dt.min(MAX_ADVANCE).as_secs_f64();
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        if (self.position - self.target).abs() < self.rest_threshold
            && self.velocity.abs() < self.velocity_threshold
        {
            self.settle();
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    fn value(&self) -> f32 {
        (self.position as f32).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.velocity = 0.0;
        self.at_rest = false;
    }
}
