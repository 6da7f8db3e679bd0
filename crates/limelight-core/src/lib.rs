#![forbid(unsafe_code)]

//! Core primitives for Limelight.
//!
//! - [`geometry`]: fractional rectangles, points, and safe-area insets.
//! - [`animation`]: tick-driven fades, springs, and rectangle morphs.
//! - [`delay`]: delayed continuations on a logical clock.

pub mod animation;
pub mod delay;
pub mod geometry;

pub use animation::{Animation, Fade, MorphFrame, RectMorph, Spring};
pub use delay::DelayQueue;
pub use geometry::{Insets, Point, Rect, Size};
