//! One mounted masonry grid.
//!
//! A [`LayoutSession`] owns everything a single grid instance needs: its
//! breakpoint resolver, the last measured container width and viewport, the
//! asset preload tracker, the placement animator, and the current layout.
//! Sessions share nothing, so two grids on one page never see each other's
//! state.
//!
//! ## Lifecycle
//!
//! ```text
//! new() ─▶ mount() ─▶ asset_settled()* ─┐
//!                     viewport_changed()*├─▶ relayout ─▶ place()
//!                     container_resized()┘
//!          pointer_enter() / pointer_leave()
//!          unmount()  (consumes the session)
//! ```
//!
//! Every size event recomputes the full layout from the latest width and
//! column count. Nothing is placed until the preload resolves; after that the
//! first placement is the entry cascade and every later one is a relayout.

use crate::animation::{Animator, PlacementAnimator, PlacementPass, Viewport};
use crate::breakpoints::BreakpointResolver;
use crate::config::{ConfigError, MasonryConfig};
use crate::observe::{Observation, ObserverRegistry, SubscriptionId};
use crate::packer::{Layout, pack};
use crate::preload::{AssetOutcome, Preload};
use crate::types::{Item, validate_items};

/// Where a session is in its placement lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Assets still loading; nothing placed.
    Uninitialized,
    /// Assets settled; the next placement is the entry cascade.
    FirstLayout,
    /// Entry done; placements glide.
    Relayout,
}

#[derive(Debug)]
pub struct LayoutSession {
    items: Vec<Item>,
    gap: f64,
    resolver: BreakpointResolver,
    viewport: Viewport,
    container_width: f64,
    preload: Preload,
    placement: PlacementAnimator,
    layout: Layout,
    subscriptions: Vec<SubscriptionId>,
}

impl LayoutSession {
    /// Validate configuration and items. All setup errors surface here.
    pub fn new(
        items: Vec<Item>,
        config: &MasonryConfig,
        viewport: Viewport,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        validate_items(&items)?;
        let resolver = BreakpointResolver::new(config.breakpoints.clone(), viewport.width)?;

        Ok(Self {
            preload: Preload::new(&items),
            items,
            gap: config.layout.gap,
            resolver,
            viewport,
            container_width: 0.0,
            placement: PlacementAnimator::new(config.animation.clone(), config.hover.clone()),
            layout: Layout::empty(),
            subscriptions: Vec::new(),
        })
    }

    /// Subscribe to viewport and container-size notifications. A session
    /// mounts once; later calls are ignored.
    pub fn mount(&mut self, registry: &mut impl ObserverRegistry) {
        if !self.subscriptions.is_empty() {
            log::warn!("session is already mounted");
            return;
        }
        let thresholds = self.resolver.ladder().thresholds();
        self.subscriptions
            .push(registry.observe(Observation::Viewport { thresholds }));
        self.subscriptions
            .push(registry.observe(Observation::ContainerSize));
    }

    pub fn phase(&self) -> SessionPhase {
        if !self.preload.is_resolved() {
            SessionPhase::Uninitialized
        } else if self.placement.has_completed_first_layout() {
            SessionPhase::Relayout
        } else {
            SessionPhase::FirstLayout
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The most recent layout; empty until the container has a width.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn columns(&self) -> u32 {
        self.resolver.columns()
    }

    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn preload(&self) -> &Preload {
        &self.preload
    }

    pub fn placement(&self) -> &PlacementAnimator {
        &self.placement
    }

    /// An image finished loading or failed. Both count as settled.
    pub fn asset_settled(
        &mut self,
        animator: &mut impl Animator,
        url: &str,
        outcome: AssetOutcome,
    ) -> Option<PlacementPass> {
        if !self.preload.settle(url, outcome) {
            return None;
        }
        log::debug!("all {} assets settled", self.items.len());
        self.relayout(animator)
    }

    /// The viewport changed size. Relayouts only if the column count changed.
    pub fn viewport_changed(
        &mut self,
        animator: &mut impl Animator,
        viewport: Viewport,
    ) -> Option<PlacementPass> {
        self.viewport = viewport;
        self.resolver.update(viewport.width)?;
        self.relayout(animator)
    }

    /// The grid container was measured at a new width. A width that is not
    /// a finite number counts as no measurement.
    pub fn container_resized(
        &mut self,
        animator: &mut impl Animator,
        width: f64,
    ) -> Option<PlacementPass> {
        let width = if width.is_finite() { width } else { 0.0 };
        if width == self.container_width {
            return None;
        }
        self.container_width = width;
        self.relayout(animator)
    }

    pub fn pointer_enter(&mut self, animator: &mut impl Animator, id: &str) {
        if self.layout.get(id).is_some() {
            self.placement.pointer_enter(animator, id);
        }
    }

    pub fn pointer_leave(&mut self, animator: &mut impl Animator, id: &str) {
        if self.layout.get(id).is_some() {
            self.placement.pointer_leave(animator, id);
        }
    }

    /// Recompute the layout and, once assets are ready, animate into it.
    fn relayout(&mut self, animator: &mut impl Animator) -> Option<PlacementPass> {
        if self.container_width <= 0.0 {
            self.layout = Layout::empty();
            return None;
        }

        let layout = match pack(
            self.resolver.columns(),
            self.container_width,
            self.gap,
            &self.items,
        ) {
            Ok(layout) => layout,
            Err(e) => {
                log::error!("layout skipped: {e}");
                return None;
            }
        };
        if layout.is_degenerate() {
            log::warn!(
                "container {}px is too narrow for {} columns with {}px gaps (column width {})",
                self.container_width,
                layout.columns,
                self.gap,
                layout.column_width
            );
        }
        self.layout = layout;

        if !self.preload.is_resolved() {
            return None;
        }
        Some(self.placement.place(animator, &self.layout, self.viewport))
    }

    /// Tear down: cancel every tween and release every subscription.
    pub fn unmount(mut self, animator: &mut impl Animator, registry: &mut impl ObserverRegistry) {
        self.placement.cancel_all(animator);
        for id in self.subscriptions.drain(..) {
            registry.release(id);
        }
        log::debug!("session unmounted");
    }
}
