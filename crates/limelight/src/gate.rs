#![forbid(unsafe_code)]

//! When a title may follow a cutout transition.
//!
//! The controller never hard-codes how long to wait before showing a title.
//! It asks a [`TransitionGate`], which answers with a [`Wait`]: either a
//! fixed delay ([`FixedDelay`], the reference timing) or "after the morph
//! reports it has settled" ([`AnimationSettled`]).

use std::fmt;
use std::time::Duration;

use crate::config::TimingConfig;

/// The cutout transition a title is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The overlay just appeared on a highlight.
    Appear,
    /// The cutout started morphing to the next highlight.
    Advance,
}

/// How to wait for a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    /// Continue after a fixed delay.
    After(Duration),
    /// Continue once the cutout morph has settled, but never before
    /// `at_least` has passed.
    UntilSettled { at_least: Duration },
}

/// Policy deciding how long a title waits after a transition.
pub trait TransitionGate: fmt::Debug {
    fn wait_for(&self, transition: Transition) -> Wait;
}

/// Fixed delays approximating the animation length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    pub appear: Duration,
    pub advance: Duration,
}

impl FixedDelay {
    #[must_use]
    pub fn from_timing(timing: &TimingConfig) -> Self {
        Self {
            appear: timing.title_delay(),
            advance: timing.advance_title_delay(),
        }
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::from_timing(&TimingConfig::default())
    }
}

impl TransitionGate for FixedDelay {
    fn wait_for(&self, transition: Transition) -> Wait {
        match transition {
            Transition::Appear => Wait::After(self.appear),
            Transition::Advance => Wait::After(self.advance),
        }
    }
}

/// Waits for the morph's own completion signal on advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSettled {
    /// Delay on first appearance, where no morph runs.
    pub appear: Duration,
    /// Floor before a title may show after an advance.
    pub min_advance: Duration,
}

impl Default for AnimationSettled {
    fn default() -> Self {
        Self {
            appear: TimingConfig::default().title_delay(),
            min_advance: Duration::ZERO,
        }
    }
}

impl TransitionGate for AnimationSettled {
    fn wait_for(&self, transition: Transition) -> Wait {
        match transition {
            Transition::Appear => Wait::After(self.appear),
            Transition::Advance => Wait::UntilSettled {
                at_least: self.min_advance,
            },
        }
    }
}
