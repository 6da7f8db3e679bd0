#![forbid(unsafe_code)]

//! Highlight declarations.

/// Opaque handle to an element's bounds.
///
/// The host hands out anchors and resolves them against each layout pass;
/// Limelight never interprets the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(u64);

impl AnchorId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Corner rounding family for cutouts and hit regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "config",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum CornerStyle {
    /// Smooth, curvature-continuous corners (squircle-like).
    #[default]
    Continuous,
    /// Quarter-circle corners.
    Circular,
}

/// One declared highlight target.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightSpec {
    /// Presentation key; targets are shown in ascending order.
    pub order: i32,
    /// Bounds handle, resolved lazily on every frame.
    pub anchor: AnchorId,
    /// Popover text.
    pub title: String,
    pub corner_radius: f32,
    pub corner_style: CornerStyle,
    /// Multiplier applied to the resolved rectangle before masking.
    pub scale: f32,
}

impl HighlightSpec {
    /// Create a spec with square continuous corners and scale 1.
    #[must_use]
    pub fn new(order: i32, anchor: AnchorId, title: impl Into<String>) -> Self {
        Self {
            order,
            anchor,
            title: title.into(),
            corner_radius: 0.0,
            corner_style: CornerStyle::Continuous,
            scale: 1.0,
        }
    }

    #[must_use]
    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    #[must_use]
    pub fn corner_style(mut self, style: CornerStyle) -> Self {
        self.corner_style = style;
        self
    }

    #[must_use]
    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Scale with non-finite or non-positive values replaced by 1.
    #[must_use]
    pub fn effective_scale(&self) -> f32 {
        if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            1.0
        }
    }

    /// Corner radius with non-finite or negative values replaced by 0.
    #[must_use]
    pub fn effective_corner_radius(&self) -> f32 {
        if self.corner_radius.is_finite() {
            self.corner_radius.max(0.0)
        } else {
            0.0
        }
    }
}
