//! Headless tween engine.
//!
//! [`Timeline`] keeps the current [`Properties`] of every target and a list of
//! scheduled tweens. The host advances the clock (typically once per frame);
//! each active tween samples its easing curve and writes the interpolated
//! values back into its target's state.
//!
//! Semantics mirror a browser tween library closely enough for the engine:
//!
//! - `from = Some(..)` renders the start values immediately, even while the
//!   tween is still waiting out its delay.
//! - `from = None` captures the target's values at the moment the tween
//!   starts, not when it was scheduled.
//! - Cancelling aborts in place; the target keeps whatever values it had.
//! - Tweens apply in scheduling order, so a later tween on the same property
//!   wins for the frame.

use super::animator::{Animator, Properties, TweenHandle, TweenOptions};
use super::easing::Easing;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct Tween {
    handle: TweenHandle,
    target: String,
    from: Option<Properties>,
    to: Properties,
    options: TweenOptions,
    start: f64,
    /// Start values, resolved when the tween first runs.
    origin: Option<Properties>,
}

#[derive(Debug, Default)]
pub struct Timeline {
    now: f64,
    next_handle: u64,
    tweens: Vec<Tween>,
    states: BTreeMap<String, Properties>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the timeline was created.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Current values of a target, if anything has touched it.
    pub fn state(&self, target: &str) -> Option<&Properties> {
        self.states.get(target)
    }

    /// Tweens scheduled or running.
    pub fn active_count(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_idle(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Move the clock forward by `dt` seconds and apply every running tween.
    pub fn advance(&mut self, dt: f64) {
        self.now += dt.max(0.0);
        let now = self.now;

        for tween in &mut self.tweens {
            if now < tween.start {
                continue;
            }
            let state = self.states.entry(tween.target.clone()).or_default();
            let origin = *tween.origin.get_or_insert_with(|| {
                let mut origin = state.or_rendered().restricted_to(&tween.to);
                if let Some(from) = &tween.from {
                    origin.merge(from);
                }
                origin
            });

            let progress = if tween.options.duration <= 0.0 {
                1.0
            } else {
                (now - tween.start) / tween.options.duration
            };
            let eased = tween.options.easing.sample(progress);
            state.merge(&interpolate(&origin, &tween.to, eased));
        }

        self.tweens.retain(|t| now < t.start + t.options.duration);
    }

    /// Advance in fixed steps until nothing is left to run.
    ///
    /// Returns the number of steps taken, capped at `max_steps`.
    pub fn run_to_completion(&mut self, step: f64, max_steps: usize) -> usize {
        let mut steps = 0;
        while !self.is_idle() && steps < max_steps {
            self.advance(step);
            steps += 1;
        }
        steps
    }
}

/// Interpolate every property set in `to`; a missing start value means no
/// motion for that property.
fn interpolate(from: &Properties, to: &Properties, t: f64) -> Properties {
    from.zip_with(to, |a, b| {
        b.map(|end| {
            let start = a.unwrap_or(end);
            start + (end - start) * t
        })
    })
}

impl Animator for Timeline {
    fn animate(
        &mut self,
        target: &str,
        from: Option<Properties>,
        to: Properties,
        options: TweenOptions,
    ) -> TweenHandle {
        self.next_handle += 1;
        let handle = TweenHandle(self.next_handle);

        if let Some(from) = &from {
            self.states.entry(target.to_string()).or_default().merge(from);
        }

        self.tweens.push(Tween {
            handle,
            target: target.to_string(),
            from,
            to,
            options,
            start: self.now + options.delay.max(0.0),
            origin: None,
        });
        handle
    }

    fn cancel(&mut self, handle: TweenHandle) {
        self.tweens.retain(|t| t.handle != handle);
    }

    fn is_active(&self, handle: TweenHandle) -> bool {
        self.tweens.iter().any(|t| t.handle == handle)
    }
}

/// Instant tween with no delay, for snapping a target into place.
pub fn snap() -> TweenOptions {
    TweenOptions::new(0.0, Easing::Linear)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::assert_close;

    fn linear(duration: f64) -> TweenOptions {
        TweenOptions::new(duration, Easing::Linear)
    }

    #[test]
    fn to_tween_interpolates_from_current_value() {
        let mut tl = Timeline::new();
        tl.animate("a", None, Properties::default().at(0.0, 0.0), snap());
        tl.advance(0.0);

        tl.animate("a", None, Properties::default().at(100.0, 50.0), linear(1.0));
        tl.advance(0.5);
        let state = tl.state("a").unwrap();
        assert_close(state.x.unwrap(), 50.0);
        assert_close(state.y.unwrap(), 25.0);

        tl.advance(0.5);
        assert_eq!(tl.state("a").unwrap().x, Some(100.0));
        assert!(tl.is_idle());
    }

    #[test]
    fn from_values_render_before_delay_elapses() {
        let mut tl = Timeline::new();
        let from = Properties::opacity(0.0).at(0.0, 900.0);
        let to = Properties::opacity(1.0).at(0.0, 0.0);
        tl.animate("a", Some(from), to, linear(1.0).delayed(0.5));

        assert_eq!(tl.state("a").unwrap().opacity, Some(0.0));
        tl.advance(0.25);
        assert_eq!(tl.state("a").unwrap().y, Some(900.0));

        tl.advance(0.75);
        let state = tl.state("a").unwrap();
        assert_close(state.opacity.unwrap(), 0.5);
        assert_close(state.y.unwrap(), 450.0);
    }

    #[test]
    fn cancel_leaves_target_where_it_was() {
        let mut tl = Timeline::new();
        tl.animate("a", Some(Properties::scale(1.0)), Properties::scale(0.0), linear(1.0));
        let handle = tl.animate("b", Some(Properties::scale(1.0)), Properties::scale(0.0), linear(1.0));
        tl.advance(0.5);
        tl.cancel(handle);
        assert!(!tl.is_active(handle));

        tl.advance(1.0);
        assert_close(tl.state("b").unwrap().scale.unwrap(), 0.5);
        assert_eq!(tl.state("a").unwrap().scale, Some(0.0));
    }

    #[test]
    fn later_tween_wins_on_shared_property() {
        let mut tl = Timeline::new();
        tl.animate("a", Some(Properties::scale(1.0)), Properties::scale(2.0), linear(1.0));
        tl.animate("a", None, Properties::scale(0.5), snap());
        tl.advance(0.1);
        assert_eq!(tl.state("a").unwrap().scale, Some(0.5));
    }

    #[test]
    fn disjoint_properties_run_side_by_side() {
        let mut tl = Timeline::new();
        tl.animate(
            "a",
            Some(Properties::default().at(0.0, 0.0)),
            Properties::default().at(100.0, 0.0),
            linear(1.0),
        );
        tl.animate("a", Some(Properties::scale(1.0)), Properties::scale(0.9), linear(0.5));
        tl.advance(0.5);
        let state = tl.state("a").unwrap();
        assert_close(state.x.unwrap(), 50.0);
        assert_close(state.scale.unwrap(), 0.9);
        assert_eq!(tl.active_count(), 1);
    }

    #[test]
    fn missing_geometry_snaps_to_end() {
        let mut tl = Timeline::new();
        tl.animate("a", None, Properties::default().at(10.0, 20.0), linear(1.0));
        tl.advance(0.1);
        assert_eq!(tl.state("a").unwrap().x, Some(10.0));
    }

    #[test]
    fn unset_scale_tweens_from_one() {
        let mut tl = Timeline::new();
        tl.animate("a", None, Properties::scale(0.5), linear(1.0));
        tl.advance(0.5);
        assert_close(tl.state("a").unwrap().scale.unwrap(), 0.75);
    }

    #[test]
    fn run_to_completion_stops_when_idle() {
        let mut tl = Timeline::new();
        tl.animate("a", None, Properties::scale(0.5), linear(0.3));
        let steps = tl.run_to_completion(0.1, 100);
        assert!(steps >= 3 && steps <= 4, "took {steps} steps");
        assert!(tl.is_idle());
        assert_close(tl.now(), steps as f64 * 0.1);
    }
}
