//! Tweening: the [`Animator`] capability, easing curves, the headless
//! [`Timeline`], and the [`PlacementAnimator`] state machine.
//!
//! | Piece | Role |
//! |---|---|
//! | [`Animator`] | `animate(target, from, to, options) → handle`, `cancel(handle)`, `is_active(handle)` |
//! | [`Easing`] | GSAP-style curve identifiers (`power3.out`, …) |
//! | [`Timeline`] | Production animator: clock-driven, per-target state |
//! | [`PlacementAnimator`] | Decides entry vs relayout vs hover tweens |

pub mod animator;
mod easing;
mod placement;
mod timeline;

pub use animator::{Animator, Properties, TweenHandle, TweenOptions};
pub use easing::{Easing, EasingParseError};
pub use placement::{OriginSide, PlacementAnimator, PlacementPass, Viewport, overlay_target};
pub use timeline::{Timeline, snap};
