//! The animation capability the engine drives.
//!
//! The engine never touches a display. It asks an [`Animator`] to tween a set
//! of [`Properties`] on a named target and gets back a [`TweenHandle`] it can
//! cancel later. The headless [`Timeline`](super::Timeline) is the production
//! implementation; tests use a recorder that only logs calls.

use crate::animation::Easing;
use crate::types::PlacedItem;
use serde::Serialize;

/// Opaque id for one scheduled tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TweenHandle(pub u64);

/// A sparse set of animatable visual properties.
///
/// `None` means "not part of this tween". Unset properties render as
/// opacity 1, scale 1, blur 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Properties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Blur radius in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

impl Properties {
    /// The final box of a placement.
    pub fn placement(placed: &PlacedItem) -> Self {
        Self {
            x: Some(placed.x),
            y: Some(placed.y),
            width: Some(placed.width),
            height: Some(placed.height),
            ..Self::default()
        }
    }

    pub fn scale(value: f64) -> Self {
        Self {
            scale: Some(value),
            ..Self::default()
        }
    }

    pub fn opacity(value: f64) -> Self {
        Self {
            opacity: Some(value),
            ..Self::default()
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn with_opacity(mut self, value: f64) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn with_blur(mut self, value: f64) -> Self {
        self.blur = Some(value);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Does this set include any of x, y, width, height?
    pub fn is_positional(&self) -> bool {
        self.x.is_some() || self.y.is_some() || self.width.is_some() || self.height.is_some()
    }

    /// Combine two sets field by field.
    pub fn zip_with(
        &self,
        other: &Self,
        f: impl Fn(Option<f64>, Option<f64>) -> Option<f64>,
    ) -> Self {
        Self {
            x: f(self.x, other.x),
            y: f(self.y, other.y),
            width: f(self.width, other.width),
            height: f(self.height, other.height),
            opacity: f(self.opacity, other.opacity),
            blur: f(self.blur, other.blur),
            scale: f(self.scale, other.scale),
        }
    }

    /// Overwrite fields that are set in `overlay`.
    pub fn merge(&mut self, overlay: &Self) {
        *self = self.zip_with(overlay, |base, over| over.or(base));
    }

    /// Fill unset visual fields with how they render: opacity 1, scale 1,
    /// blur 0. Geometry stays unset.
    pub fn or_rendered(mut self) -> Self {
        self.opacity = self.opacity.or(Some(1.0));
        self.scale = self.scale.or(Some(1.0));
        self.blur = self.blur.or(Some(0.0));
        self
    }

    /// Keep only the fields that are set in `mask`.
    pub fn restricted_to(&self, mask: &Self) -> Self {
        self.zip_with(mask, |value, m| m.and(value))
    }
}

/// Timing for one tween, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TweenOptions {
    pub duration: f64,
    pub delay: f64,
    pub easing: Easing,
}

impl TweenOptions {
    pub fn new(duration: f64, easing: Easing) -> Self {
        Self {
            duration,
            delay: 0.0,
            easing,
        }
    }

    pub fn delayed(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }
}

/// Something that can tween properties on named targets.
pub trait Animator {
    /// Schedule a tween on `target` toward `to`.
    ///
    /// With `from = Some(..)` the target jumps to those values immediately and
    /// animates from there; with `None` it animates from whatever values it
    /// holds when the tween starts.
    fn animate(
        &mut self,
        target: &str,
        from: Option<Properties>,
        to: Properties,
        options: TweenOptions,
    ) -> TweenHandle;

    /// Abort a tween where it stands. Unknown or finished handles are ignored.
    fn cancel(&mut self, handle: TweenHandle);

    /// The tween is scheduled or still running.
    fn is_active(&self, handle: TweenHandle) -> bool;
}
