#![forbid(unsafe_code)]

//! Overlay scene construction.
//!
//! [`OverlayRenderer`] turns the active highlight and its resolved geometry
//! into an [`OverlayScene`]: a backend-neutral description of what the host
//! should draw this frame.
//!
//! ```text
//! ┌──────────────────────────────┐  dim layer: black, 50 %, full screen
//! │░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░│
//! │░░░░░░░░╭──────╮░░░░░░░░░░░░░░│  cutout: target + border, rounded,
//! │░░░░░░░░│      │░░░░░░░░░░░░░░│          scaled, inverse-masked
//! │░░░░░░░░╰──────╯░░░░░░░░░░░░░░│
//! │░░░░░░░┌─────────────┐░░░░░░░░│  popover: title, below the hit region
//! │░░░░░░░│ My Device   │░░░░░░░░│          when it fits
//! │░░░░░░░└─────────────┘░░░░░░░░│
//! └──────────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. All scene coordinates are full-screen coordinates.
//! 2. The cutout always carries [`SHARED_CUTOUT_ID`], so consecutive scenes
//!    describe the same shape moving rather than two shapes cross-fading.
//! 3. A degenerate target produces a dim layer with no cutout, hit region,
//!    or popover.
//! 4. The popover is never interactively dismissible and only appears in
//!    [`Phase::ShowingTitle`].

use limelight_core::animation::MorphFrame;
use limelight_core::geometry::{Point, Rect};
use unicode_width::UnicodeWidthStr;

use crate::config::{OverlayConfig, PopoverConfig, VisualConfig};
use crate::controller::Phase;
use crate::highlight::{CornerStyle, HighlightSpec};
use crate::resolve::ResolvedTarget;

/// Identity of a morphing shape across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(&'static str);

impl ShapeId {
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

/// The single cutout shape shared by every highlight.
pub const SHARED_CUTOUT_ID: ShapeId = ShapeId("limelight.cutout");

/// Superellipse exponent approximating continuous corners.
const CONTINUOUS_EXPONENT: f32 = 4.0;

/// How far a continuous corner extends along each edge, relative to the radius.
const CONTINUOUS_EXTENT: f32 = 1.528;

/// A rectangle with rounded corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub rect: Rect,
    pub radius: f32,
    pub style: CornerStyle,
}

impl RoundedRect {
    #[must_use]
    pub const fn new(rect: Rect, radius: f32, style: CornerStyle) -> Self {
        Self {
            rect,
            radius,
            style,
        }
    }

    /// Whether `point` lies inside the rounded shape.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        if !self.rect.contains(point) {
            return false;
        }
        let half_min = self.rect.width.min(self.rect.height) / 2.0;
        let radius = self.radius.max(0.0);
        let extent = match self.style {
            CornerStyle::Circular => radius.min(half_min),
            CornerStyle::Continuous => (radius * CONTINUOUS_EXTENT).min(half_min),
        };
        if extent <= 0.0 {
            return true;
        }

        // Distance into the nearest corner box, 0 when outside every corner box.
        let dx = (self.rect.x + extent - point.x).max(point.x - (self.rect.max_x() - extent));
        let dy = (self.rect.y + extent - point.y).max(point.y - (self.rect.max_y() - extent));
        if dx <= 0.0 || dy <= 0.0 {
            return true;
        }
        let (nx, ny) = (dx / extent, dy / extent);
        match self.style {
            CornerStyle::Circular => nx * nx + ny * ny <= 1.0,
            CornerStyle::Continuous => {
                nx.powf(CONTINUOUS_EXPONENT) + ny.powf(CONTINUOUS_EXPONENT) <= 1.0
            }
        }
    }
}

/// Full-screen black dim layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimLayer {
    pub bounds: Rect,
    pub opacity: f32,
}

/// The inverse-masked hole in the dim layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cutout {
    pub id: ShapeId,
    pub shape: RoundedRect,
}

/// Side of the hit region the popover sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopoverEdge {
    Below,
    Above,
    Right,
    Left,
}

/// Floating title label.
#[derive(Debug, Clone, PartialEq)]
pub struct Popover {
    pub title: String,
    /// The hit region the popover points at.
    pub anchor: Rect,
    pub frame: Rect,
    pub edge: PopoverEdge,
    /// Always false: outside taps and swipes never dismiss the title.
    pub interactive_dismiss: bool,
}

/// Everything the host draws for one overlay frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayScene {
    pub screen: Rect,
    /// Whole-overlay opacity, animated on finish.
    pub opacity: f32,
    pub dim: DimLayer,
    pub cutout: Option<Cutout>,
    /// Transparent region hosting the popover anchor.
    pub hit_region: Option<RoundedRect>,
    pub popover: Option<Popover>,
    /// Region whose taps advance the sequence (the whole dim layer).
    pub tap_region: Rect,
}

/// Per-frame input that does not come from the highlight itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub phase: Phase,
    pub opacity: f32,
    /// Animated cutout sample; `None` draws the resting cutout.
    pub cutout: Option<MorphFrame>,
}

/// Builds [`OverlayScene`]s.
#[derive(Debug, Clone, Default)]
pub struct OverlayRenderer {
    visual: VisualConfig,
    popover: PopoverConfig,
}

impl OverlayRenderer {
    #[must_use]
    pub fn new(config: &OverlayConfig) -> Self {
        Self {
            visual: config.visual.clone(),
            popover: config.popover.clone(),
        }
    }

    /// Resting cutout for `target`: grown by the border, shifted back by half
    /// of it, scaled about its centre.
    #[must_use]
    pub fn cutout_frame(&self, highlight: &HighlightSpec, target: &ResolvedTarget) -> MorphFrame {
        let border = self.visual.cutout_border;
        let scale = highlight.effective_scale();
        let rect = target
            .screen
            .translate(-border / 2.0, -border / 2.0)
            .grow(border)
            .scale_about_center(scale);
        MorphFrame::new(rect, highlight.effective_corner_radius() * scale)
    }

    /// Transparent region around the target that anchors the popover.
    #[must_use]
    pub fn hit_region(&self, highlight: &HighlightSpec, target: &ResolvedTarget) -> RoundedRect {
        let margin = self.visual.hit_region_margin;
        let scale = highlight.effective_scale();
        let rect = target
            .screen
            .translate(-margin, -margin)
            .grow(self.visual.hit_region_border)
            .scale_about_center(scale);
        RoundedRect::new(
            rect,
            highlight.effective_corner_radius() * scale,
            highlight.corner_style,
        )
    }

    /// Build the scene for one frame.
    #[must_use]
    pub fn render(
        &self,
        highlight: &HighlightSpec,
        target: &ResolvedTarget,
        state: &RenderState,
    ) -> OverlayScene {
        let screen = target.screen_bounds;
        let opacity = state.opacity.clamp(0.0, 1.0);
        let dim = DimLayer {
            bounds: screen,
            opacity: self.visual.dim_opacity,
        };

        if target.is_degenerate() {
            tracing::debug!(
                target: "limelight.overlay",
                order = highlight.order,
                anchor = highlight.anchor.get(),
                "anchor did not resolve, drawing dim layer only"
            );
            return OverlayScene {
                screen,
                opacity,
                dim,
                cutout: None,
                hit_region: None,
                popover: None,
                tap_region: screen,
            };
        }

        let frame = state
            .cutout
            .unwrap_or_else(|| self.cutout_frame(highlight, target));
        let cutout = Cutout {
            id: SHARED_CUTOUT_ID,
            shape: RoundedRect::new(frame.rect, frame.corner_radius, highlight.corner_style),
        };
        let hit_region = self.hit_region(highlight, target);
        let popover = (state.phase == Phase::ShowingTitle)
            .then(|| self.popover(&highlight.title, hit_region.rect, screen));

        OverlayScene {
            screen,
            opacity,
            dim,
            cutout: Some(cutout),
            hit_region: Some(hit_region),
            popover,
            tap_region: screen,
        }
    }

    /// Size of the label needed for `title`.
    #[must_use]
    pub fn popover_size(&self, title: &str) -> (f32, f32) {
        let columns = UnicodeWidthStr::width(title) as f32;
        (
            columns * self.popover.glyph_width + self.popover.horizontal_padding * 2.0,
            self.popover.line_height + self.popover.vertical_padding * 2.0,
        )
    }

    fn popover(&self, title: &str, anchor: Rect, screen: Rect) -> Popover {
        let (frame, edge) = self.place_popover(title, anchor, screen);
        Popover {
            title: title.to_owned(),
            anchor,
            frame,
            edge,
            interactive_dismiss: false,
        }
    }

    /// Try below, above, right, then left of the anchor; clamp to the screen.
    fn place_popover(&self, title: &str, anchor: Rect, screen: Rect) -> (Rect, PopoverEdge) {
        let (width, height) = self.popover_size(title);
        let width = width.min(screen.width);
        let height = height.min(screen.height);
        let gap = self.popover.gap;
        let center_x = anchor.center().x - width / 2.0;
        let center_y = anchor.center().y - height / 2.0;

        let fits = |x: f32, y: f32| {
            x >= screen.x && y >= screen.y && x + width <= screen.max_x() && y + height <= screen.max_y()
        };

        let candidates = [
            (center_x, anchor.max_y() + gap, PopoverEdge::Below),
            (center_x, anchor.y - height - gap, PopoverEdge::Above),
            (anchor.max_x() + gap, center_y, PopoverEdge::Right),
            (anchor.x - width - gap, center_y, PopoverEdge::Left),
        ];
        let (x, y, edge) = candidates
            .iter()
            .copied()
            .find(|&(x, y, _)| fits(x, y))
            .unwrap_or(candidates[0]);

        let x = x.max(screen.x).min(screen.max_x() - width);
        let y = y.max(screen.y).min(screen.max_y() - height);
        (Rect::new(x, y, width, height), edge)
    }
}
