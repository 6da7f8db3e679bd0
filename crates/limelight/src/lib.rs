#![forbid(unsafe_code)]

//! Limelight
//!
//! Spotlight onboarding overlays: an ordered walk through highlighted screen
//! regions, everything else dimmed, with a title popover per region and a tap
//! to advance.
//!
//! # Key Components
//!
//! - [`registry`]: elements declare highlight targets into a per-pass
//!   [`RegistrySnapshot`] (last declaration wins per order)
//! - [`resolve`]: anchors become screen rectangles against the host's
//!   [`LayoutPass`]
//! - [`SequenceController`]: the state machine owning the cursor, phase,
//!   title timing, and completion callback
//! - [`overlay`]: dim layer, shared-identity cutout, hit region, and popover
//!   as a backend-neutral [`OverlayScene`]
//! - [`canvas`]: rasterizes scenes into a cell grid
//!
//! # How it fits together
//!
//! Each layout pass the host commits a [`RegistryPass`] and forwards the
//! snapshot to [`SequenceController::on_registry_change`]. Its run loop calls
//! [`SequenceController::tick`] with elapsed time and
//! [`SequenceController::frame`] with the current [`LayoutPass`], drawing the
//! returned scene. Taps go to [`SequenceController::tap`]. Everything runs on
//! the host's one UI thread; no timers exist outside the controller's own
//! delay queue.
//!
//! # Testing
//!
//! TOML/JSON loading sits behind the `config` feature, and so do its tests:
//!
//! ```sh
//! cargo test -p limelight
//! cargo test -p limelight --features config
//! ```

pub mod canvas;
pub mod config;
pub mod controller;
pub mod gate;
pub mod highlight;
pub mod overlay;
pub mod registry;
pub mod resolve;

pub use canvas::{Canvas, Cell};
pub use config::{OverlayConfig, OverlayConfigError, PopoverConfig, TimingConfig, VisualConfig};
pub use controller::{OverlayOptions, Phase, SequenceController, TapOutcome};
pub use gate::{AnimationSettled, FixedDelay, Transition, TransitionGate, Wait};
pub use highlight::{AnchorId, CornerStyle, HighlightSpec};
pub use overlay::{
    Cutout, DimLayer, OverlayRenderer, OverlayScene, Popover, PopoverEdge, RenderState,
    RoundedRect, SHARED_CUTOUT_ID, ShapeId,
};
pub use registry::{
    Anchored, Decorated, RegionRegistry, RegistryPass, RegistrySnapshot, ShowCase,
};
pub use resolve::{LayoutPass, ResolvedTarget, StaticLayout, resolve};

pub use limelight_core::geometry::{Insets, Point, Rect, Size};
