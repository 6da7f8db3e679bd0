#![forbid(unsafe_code)]

//! Anchor → rectangle resolution against the host's current layout pass.
//!
//! The host owns layout. It exposes each pass through [`LayoutPass`], which
//! reports anchor bounds in *content space* (origin at the top-left of the
//! safe area) together with the safe-area insets and full screen size.
//! [`resolve`] turns an anchor into a [`ResolvedTarget`] carrying both the
//! content-space rectangle and its full-screen counterpart, with the top
//! inset added to Y.
//!
//! Resolution is synchronous and never cached: call it for every frame.
//! Anchors that are unknown or produce non-finite bounds resolve to a
//! zero-area rectangle instead of failing.

use ahash::AHashMap;
use limelight_core::geometry::{Insets, Rect, Size};

use crate::highlight::AnchorId;

/// One layout pass of the host screen.
pub trait LayoutPass {
    /// Bounds of `anchor` in content space, if the element is laid out.
    fn anchor_bounds(&self, anchor: AnchorId) -> Option<Rect>;

    fn safe_area(&self) -> Insets;

    /// Full screen size, safe areas included.
    fn screen_size(&self) -> Size;
}

/// Geometry of one target in the current pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTarget {
    /// Bounds in content space.
    pub content: Rect,
    /// Bounds in full-screen space (`content` shifted down by the top inset).
    pub screen: Rect,
    pub safe_area: Insets,
    /// The whole screen, origin at zero.
    pub screen_bounds: Rect,
}

impl ResolvedTarget {
    /// Whether the anchor failed to resolve to a drawable area.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.content.is_empty()
    }
}

/// Resolve `anchor` against `layout`.
pub fn resolve(anchor: AnchorId, layout: &dyn LayoutPass) -> ResolvedTarget {
    let safe_area = layout.safe_area();
    let screen_bounds = Rect::from_size(layout.screen_size());
    let content = layout
        .anchor_bounds(anchor)
        .filter(Rect::is_finite)
        .unwrap_or(Rect::ZERO);
    let screen = if content.is_empty() {
        Rect::ZERO
    } else {
        content.translate(0.0, safe_area.top)
    };
    ResolvedTarget {
        content,
        screen,
        safe_area,
        screen_bounds,
    }
}

/// A [`LayoutPass`] backed by a plain table, for hosts that precompute
/// bounds and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticLayout {
    anchors: AHashMap<AnchorId, Rect>,
    safe_area: Insets,
    screen: Size,
}

impl StaticLayout {
    #[must_use]
    pub fn new(screen: Size, safe_area: Insets) -> Self {
        Self {
            anchors: AHashMap::new(),
            safe_area,
            screen,
        }
    }

    /// Place an anchor (builder pattern).
    #[must_use]
    pub fn with_anchor(mut self, anchor: AnchorId, bounds: Rect) -> Self {
        self.anchors.insert(anchor, bounds);
        self
    }

    /// Move or add an anchor.
    pub fn set_anchor(&mut self, anchor: AnchorId, bounds: Rect) {
        self.anchors.insert(anchor, bounds);
    }

    pub fn remove_anchor(&mut self, anchor: AnchorId) -> Option<Rect> {
        self.anchors.remove(&anchor)
    }

    pub fn set_safe_area(&mut self, safe_area: Insets) {
        self.safe_area = safe_area;
    }

    /// Resize the screen, e.g. on rotation.
    pub fn set_screen_size(&mut self, screen: Size) {
        self.screen = screen;
    }
}

impl LayoutPass for StaticLayout {
    fn anchor_bounds(&self, anchor: AnchorId) -> Option<Rect> {
        self.anchors.get(&anchor).copied()
    }

    fn safe_area(&self) -> Insets {
        self.safe_area
    }

    fn screen_size(&self) -> Size {
        self.screen
    }
}
