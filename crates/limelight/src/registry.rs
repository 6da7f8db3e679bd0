#![forbid(unsafe_code)]

//! Write-side aggregation of highlight declarations.
//!
//! Any element in the host tree can declare itself a highlight target. Each
//! layout pass, the host walks its tree with a [`RegistryPass`], collects the
//! declarations, and commits the pass to a [`RegionRegistry`], which keeps
//! the latest [`RegistrySnapshot`] for the sequence controller.
//!
//! # Invariants
//!
//! 1. A snapshot is rebuilt from scratch every pass; nothing carries over.
//! 2. When two declarations share an `order`, the one encountered later in
//!    the pass wins. Subtrees are reduced bottom-up with the same rule.
//! 3. `sorted_orders()` is strictly ascending and has one entry per key.
//!
//! # Example
//!
//! ```
//! use limelight::registry::{RegionRegistry, ShowCase};
//! use limelight::{AnchorId, CornerStyle};
//!
//! let mut registry = RegionRegistry::new();
//! let mut pass = registry.begin_pass();
//! AnchorId::new(1)
//!     .declare_highlight(2, "My Device", 10.0, CornerStyle::Continuous, 1.0)
//!     .contribute(&mut pass);
//! AnchorId::new(2).show_case(0, "My Current Location", 10.0).contribute(&mut pass);
//! registry.commit(pass);
//!
//! assert_eq!(registry.snapshot().sorted_orders(), vec![0, 2]);
//! ```

use ahash::AHashMap;

use crate::highlight::{AnchorId, CornerStyle, HighlightSpec};

/// Mapping from order key to the winning declaration of one layout pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrySnapshot {
    entries: AHashMap<i32, HighlightSpec>,
}

impl RegistrySnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a declaration, returning the one it replaced.
    pub fn insert(&mut self, spec: HighlightSpec) -> Option<HighlightSpec> {
        let replaced = self.entries.insert(spec.order, spec);
        if let Some(old) = &replaced {
            tracing::debug!(
                target: "limelight.registry",
                order = old.order,
                replaced_title = %old.title,
                "duplicate highlight order, last declaration wins"
            );
        }
        replaced
    }

    /// Reduce `next` into `self`; entries in `next` overwrite shared keys.
    pub fn merge(&mut self, next: RegistrySnapshot) {
        for (_, spec) in next.entries {
            self.insert(spec);
        }
    }

    #[must_use]
    pub fn get(&self, order: i32) -> Option<&HighlightSpec> {
        self.entries.get(&order)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All order keys, ascending.
    #[must_use]
    pub fn sorted_orders(&self) -> Vec<i32> {
        let mut orders: Vec<i32> = self.entries.keys().copied().collect();
        orders.sort_unstable();
        orders
    }

    /// Declarations in presentation order.
    pub fn iter_sorted(&self) -> impl Iterator<Item = &HighlightSpec> + '_ {
        self.sorted_orders()
            .into_iter()
            .filter_map(|order| self.entries.get(&order))
    }
}

impl FromIterator<HighlightSpec> for RegistrySnapshot {
    fn from_iter<I: IntoIterator<Item = HighlightSpec>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for spec in iter {
            snapshot.insert(spec);
        }
        snapshot
    }
}

/// Collector for one layout pass.
#[derive(Debug, Default)]
pub struct RegistryPass {
    snapshot: RegistrySnapshot,
}

impl RegistryPass {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a declaration at the current position in the tree walk.
    pub fn declare(&mut self, spec: HighlightSpec) {
        self.snapshot.insert(spec);
    }

    /// Collect a subtree into its own snapshot and reduce it into this pass.
    pub fn subtree(&mut self, build: impl FnOnce(&mut RegistryPass)) {
        let mut child = RegistryPass::new();
        build(&mut child);
        self.snapshot.merge(child.snapshot);
    }

    #[must_use]
    pub fn into_snapshot(self) -> RegistrySnapshot {
        self.snapshot
    }
}

/// Holder of the latest committed snapshot.
#[derive(Debug, Default)]
pub struct RegionRegistry {
    current: RegistrySnapshot,
    passes: u64,
}

impl RegionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start collecting a new layout pass.
    #[must_use]
    pub fn begin_pass(&self) -> RegistryPass {
        RegistryPass::new()
    }

    /// Replace the current snapshot with the pass. Returns whether the
    /// snapshot differs from the previous one.
    pub fn commit(&mut self, pass: RegistryPass) -> bool {
        let next = pass.into_snapshot();
        let changed = next != self.current;
        self.passes += 1;
        tracing::trace!(
            target: "limelight.registry",
            pass = self.passes,
            entries = next.len(),
            changed,
            "registry pass committed"
        );
        self.current = next;
        changed
    }

    #[must_use]
    pub fn snapshot(&self) -> &RegistrySnapshot {
        &self.current
    }

    /// Number of committed passes.
    #[must_use]
    pub fn pass_count(&self) -> u64 {
        self.passes
    }
}

/// Elements that can be resolved to bounds by the host.
pub trait Anchored {
    fn anchor(&self) -> AnchorId;
}

impl Anchored for AnchorId {
    fn anchor(&self) -> AnchorId {
        *self
    }
}

/// An element carrying a highlight declaration.
#[derive(Debug, Clone)]
pub struct Decorated<E> {
    element: E,
    spec: HighlightSpec,
}

impl<E> Decorated<E> {
    #[must_use]
    pub fn element(&self) -> &E {
        &self.element
    }

    #[must_use]
    pub fn spec(&self) -> &HighlightSpec {
        &self.spec
    }

    #[must_use]
    pub fn into_inner(self) -> E {
        self.element
    }

    /// Add this element's declaration to the pass.
    pub fn contribute(&self, pass: &mut RegistryPass) {
        pass.declare(self.spec.clone());
    }
}

impl<E: Anchored> Anchored for Decorated<E> {
    fn anchor(&self) -> AnchorId {
        self.element.anchor()
    }
}

/// Declaration entry point for any anchored element.
pub trait ShowCase: Anchored + Sized {
    /// Mark this element as highlight target `order`.
    fn declare_highlight(
        self,
        order: i32,
        title: impl Into<String>,
        corner_radius: f32,
        corner_style: CornerStyle,
        scale: f32,
    ) -> Decorated<Self> {
        let spec = HighlightSpec::new(order, self.anchor(), title)
            .corner_radius(corner_radius)
            .corner_style(corner_style)
            .scale(scale);
        Decorated {
            element: self,
            spec,
        }
    }

    /// Shorthand with continuous corners and scale 1.
    fn show_case(self, order: i32, title: impl Into<String>, corner_radius: f32) -> Decorated<Self> {
        self.declare_highlight(order, title, corner_radius, CornerStyle::Continuous, 1.0)
    }
}

impl<T: Anchored> ShowCase for T {}
