//! # Simple Masonry
//!
//! A responsive masonry layout engine. Given an ordered list of items with
//! known heights, a container width and the viewport, it decides how many
//! columns to use, where every tile goes, and how tiles animate into place:
//! a staggered entry cascade the first time, smooth glides on every resize
//! after that.
//!
//! # Pipeline
//!
//! ```text
//! viewport width ─▶ breakpoints ─▶ columns ─┐
//! container width ─────────────────────────┼─▶ packer ─▶ Layout ─▶ animation
//! items (ordered, fixed heights) ───────────┘
//! ```
//!
//! Every size change recomputes the whole layout. Nothing is incremental, so
//! a layout is always a pure function of (columns, width, gap, items).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`breakpoints`] | Viewport width → column count, notifying only on change |
//! | [`packer`] | Greedy shortest-column placement |
//! | [`animation`] | Animator capability, easing, headless `Timeline`, entry/relayout/hover state machine |
//! | [`preload`] | Waits for every image to load or fail; offline image probing |
//! | [`observe`] | Subscribe/release capability for size observation |
//! | [`session`] | One mounted grid wiring all of the above |
//! | [`config`] | `masonry.toml` loading, defaults, validation, CSS generation |
//! | [`types`] | `Item`, `PlacedItem`, items-file loading |
//! | [`render`] | Static HTML snapshot of a layout, using Maud |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Host Capabilities as Traits
//!
//! The engine never touches a DOM, a clock or a resize observer directly.
//! Tweening goes through [`animation::Animator`] and size subscriptions
//! through [`observe::ObserverRegistry`]; the host forwards measurements and
//! load events into a [`session::LayoutSession`]. Tests drive sessions with a
//! recording animator and assert on the exact call sequence.
//!
//! ## Preload Gate
//!
//! Tiles stay hidden until every image has either loaded or failed. A failed
//! image renders as a blank box rather than blocking the grid. There is no
//! timeout.
//!
//! ## Per-Session State
//!
//! Each session owns its breakpoint resolver and animator state. Two grids on
//! one page are fully independent.

pub mod animation;
pub mod breakpoints;
pub mod config;
pub mod observe;
pub mod output;
pub mod packer;
pub mod preload;
pub mod render;
pub mod session;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
