//! Placement animation: entry cascade, relayout glide, hover settle.
//!
//! ```text
//!   first place()            every later place()
//! ┌──────────────┐         ┌──────────────────────┐
//! │ entry tween  │ ──────▶ │ cancel positional    │
//! │ from origin, │         │ tween, then glide    │
//! │ opacity 0,   │         │ x/y/width/height     │
//! │ blurred,     │         │ to the new box       │
//! │ staggered    │         └──────────────────────┘
//! └──────────────┘
//! ```
//!
//! The first-layout flag flips once the entry tweens are scheduled and is
//! never reset. Positional tweens (entry and relayout) and hover tweens are
//! tracked in separate maps: they touch disjoint properties, so a hover can
//! run while the same tile is gliding to a new position.
//!
//! Cancelling an entry tween also stops its fade. A relayout that cuts an
//! entry short therefore carries opacity and blur to their resting values as
//! well; every other relayout moves geometry only.

use super::animator::{Animator, Properties, TweenHandle, TweenOptions};
use crate::config::{AnimationConfig, HoverConfig};
use crate::packer::Layout;
use crate::types::PlacedItem;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Where entering tiles fly in from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginSide {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
    Center,
}

/// Visible area of the host, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Which transition a [`PlacementAnimator::place`] call issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementPass {
    Entry,
    Relayout,
}

/// Overlay opacity while hovered, when colour shift is enabled.
const OVERLAY_HOVER_OPACITY: f64 = 0.3;

/// Target name of a tile's colour-shift overlay.
pub fn overlay_target(id: &str) -> String {
    format!("{id}/overlay")
}

#[derive(Debug)]
pub struct PlacementAnimator {
    animation: AnimationConfig,
    hover: HoverConfig,
    has_completed_first_layout: bool,
    positional: HashMap<String, TweenHandle>,
    hovering: HashMap<String, TweenHandle>,
    overlays: HashMap<String, TweenHandle>,
    /// Tiles whose entry tween has not been superseded yet. Only those can
    /// still be mid-fade.
    entering: HashSet<String>,
}

impl PlacementAnimator {
    pub fn new(animation: AnimationConfig, hover: HoverConfig) -> Self {
        Self {
            animation,
            hover,
            has_completed_first_layout: false,
            positional: HashMap::new(),
            hovering: HashMap::new(),
            overlays: HashMap::new(),
            entering: HashSet::new(),
        }
    }

    pub fn has_completed_first_layout(&self) -> bool {
        self.has_completed_first_layout
    }

    /// Handle of the positional tween last issued for `id`.
    pub fn positional_tween(&self, id: &str) -> Option<TweenHandle> {
        self.positional.get(id).copied()
    }

    /// Start position for an entering tile.
    pub fn origin(&self, placed: &PlacedItem, layout: &Layout, viewport: Viewport) -> (f64, f64) {
        let offset = self.animation.offscreen_offset;
        match self.animation.animate_from {
            OriginSide::Top => (placed.x, -offset),
            OriginSide::Bottom => (placed.x, viewport.height + offset),
            OriginSide::Left => (-offset, placed.y),
            OriginSide::Right => (viewport.width + offset, placed.y),
            OriginSide::Center => (
                layout.container_width / 2.0 - placed.width / 2.0,
                layout.content_height() / 2.0 - placed.height / 2.0,
            ),
        }
    }

    /// Animate every tile of `layout` into place.
    pub fn place(
        &mut self,
        animator: &mut impl Animator,
        layout: &Layout,
        viewport: Viewport,
    ) -> PlacementPass {
        if self.has_completed_first_layout {
            self.relayout(animator, layout);
            return PlacementPass::Relayout;
        }

        self.enter(animator, layout, viewport);
        self.has_completed_first_layout = true;
        PlacementPass::Entry
    }

    fn enter(&mut self, animator: &mut impl Animator, layout: &Layout, viewport: Viewport) {
        let cfg = &self.animation;
        log::debug!(
            "entry: {} tiles from {:?}, stagger {}s",
            layout.placements.len(),
            cfg.animate_from,
            cfg.stagger
        );

        for (index, placed) in layout.placements.iter().enumerate() {
            let (x, y) = self.origin(placed, layout, viewport);
            let mut from = Properties::placement(placed).at(x, y).with_opacity(0.0);
            if cfg.blur_to_focus {
                from = from.with_blur(cfg.blur_radius);
            }
            let to = self.resting(placed);
            let options = TweenOptions::new(cfg.entry_duration, cfg.entry_easing)
                .delayed(index as f64 * cfg.stagger);

            let handle = animator.animate(&placed.id, Some(from), to, options);
            self.positional.insert(placed.id.clone(), handle);
            self.entering.insert(placed.id.clone());
        }
    }

    fn relayout(&mut self, animator: &mut impl Animator, layout: &Layout) {
        let options =
            TweenOptions::new(self.animation.relayout_duration, self.animation.relayout_easing);
        log::debug!("relayout: {} tiles", layout.placements.len());

        for placed in &layout.placements {
            let previous = self.positional.remove(&placed.id);
            let entry_cut_short = self.entering.remove(&placed.id)
                && previous.is_some_and(|handle| animator.is_active(handle));
            if let Some(previous) = previous {
                animator.cancel(previous);
            }
            let to = if entry_cut_short {
                self.resting(placed)
            } else {
                Properties::placement(placed)
            };
            let handle = animator.animate(&placed.id, None, to, options);
            self.positional.insert(placed.id.clone(), handle);
        }
    }

    /// Final state of a tile: its box, opaque, in focus.
    fn resting(&self, placed: &PlacedItem) -> Properties {
        let props = Properties::placement(placed).with_opacity(1.0);
        if self.animation.blur_to_focus {
            props.with_blur(0.0)
        } else {
            props
        }
    }

    /// Pointer entered a tile.
    pub fn pointer_enter(&mut self, animator: &mut impl Animator, id: &str) {
        self.hover_to(animator, id, self.hover.hover_scale, OVERLAY_HOVER_OPACITY);
    }

    /// Pointer left a tile.
    pub fn pointer_leave(&mut self, animator: &mut impl Animator, id: &str) {
        self.hover_to(animator, id, 1.0, 0.0);
    }

    fn hover_to(&mut self, animator: &mut impl Animator, id: &str, scale: f64, overlay: f64) {
        let options = TweenOptions::new(self.hover.duration, self.hover.easing);

        if self.hover.scale_on_hover {
            if let Some(previous) = self.hovering.remove(id) {
                animator.cancel(previous);
            }
            let handle = animator.animate(id, None, Properties::scale(scale), options);
            self.hovering.insert(id.to_string(), handle);
        }

        if self.hover.color_shift_on_hover {
            if let Some(previous) = self.overlays.remove(id) {
                animator.cancel(previous);
            }
            let handle = animator.animate(
                &overlay_target(id),
                None,
                Properties::opacity(overlay),
                TweenOptions::new(self.hover.duration, super::Easing::Linear),
            );
            self.overlays.insert(id.to_string(), handle);
        }
    }

    /// Cancel every tween this animator has issued.
    pub fn cancel_all(&mut self, animator: &mut impl Animator) {
        self.entering.clear();
        let handles: Vec<TweenHandle> = self
            .positional
            .drain()
            .chain(self.hovering.drain())
            .chain(self.overlays.drain())
            .map(|(_, handle)| handle)
            .collect();
        log::debug!("cancelling {} tweens", handles.len());
        for handle in handles {
            animator.cancel(handle);
        }
    }
}
