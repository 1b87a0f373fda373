//! Responsive column-count resolution.
//!
//! A [`BreakpointLadder`] is an ordered list of `viewport width >= min_width`
//! predicates, each paired with a column count, plus a default used when no
//! predicate matches. The first matching rung wins, so the ladder must be
//! written widest-first:
//!
//! ```text
//! >= 1500px → 5
//! >= 1000px → 4
//! >=  600px → 3
//! >=  400px → 2
//!  otherwise → 1
//! ```
//!
//! An unsorted ladder is not rejected; it simply resolves to the first rung
//! that matches, which is rarely what the author meant.
//! [`BreakpointLadder::is_descending`] lets config validation warn about it.
//!
//! [`BreakpointResolver`] holds the current column count for one session and
//! reports a change only when re-evaluation actually produces a different
//! count, so callers never relayout for a no-op viewport event.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};

/// One rung of the ladder: `min_width` in CSS pixels, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Breakpoint {
    pub min_width: f64,
    pub columns: u32,
}

impl Breakpoint {
    pub fn new(min_width: f64, columns: u32) -> Self {
        Self { min_width, columns }
    }

    /// Media predicate: does a viewport of `width` satisfy this rung?
    pub fn matches(&self, width: f64) -> bool {
        width >= self.min_width
    }
}

/// Ordered breakpoints plus the fallback column count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BreakpointLadder {
    /// Rungs, widest first.
    pub ladder: Vec<Breakpoint>,
    /// Column count when no rung matches. Required.
    pub default_columns: Option<u32>,
}

impl Default for BreakpointLadder {
    fn default() -> Self {
        Self {
            ladder: vec![
                Breakpoint::new(1500.0, 5),
                Breakpoint::new(1000.0, 4),
                Breakpoint::new(600.0, 3),
                Breakpoint::new(400.0, 2),
            ],
            default_columns: Some(1),
        }
    }
}

impl BreakpointLadder {
    /// Reject a missing default and zero column counts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let default = self
            .default_columns
            .ok_or(ConfigError::MissingDefaultColumns)?;
        if default == 0 || self.ladder.iter().any(|bp| bp.columns == 0) {
            return Err(ConfigError::ZeroColumns);
        }
        if let Some(bp) = self.ladder.iter().find(|bp| !bp.min_width.is_finite()) {
            return Err(ConfigError::Validation(format!(
                "breakpoint min_width must be finite, got {}",
                bp.min_width
            )));
        }
        Ok(())
    }

    /// True when thresholds are strictly descending.
    pub fn is_descending(&self) -> bool {
        self.ladder
            .windows(2)
            .all(|pair| pair[0].min_width > pair[1].min_width)
    }

    /// Thresholds in ladder order, for registering viewport observers.
    pub fn thresholds(&self) -> Vec<f64> {
        self.ladder.iter().map(|bp| bp.min_width).collect()
    }

    /// Column count for `width`: first matching rung, else the default.
    pub fn resolve(&self, width: f64) -> Result<u32, ConfigError> {
        match self.ladder.iter().find(|bp| bp.matches(width)) {
            Some(bp) => Ok(bp.columns),
            None => self
                .default_columns
                .ok_or(ConfigError::MissingDefaultColumns),
        }
    }
}

/// Per-session column-count state.
///
/// Construction validates the ladder, so [`update`](Self::update) and
/// [`columns`](Self::columns) cannot fail afterwards.
#[derive(Debug, Clone)]
pub struct BreakpointResolver {
    ladder: BreakpointLadder,
    default_columns: u32,
    columns: u32,
}

impl BreakpointResolver {
    /// Validate `ladder` and evaluate it once against `viewport_width`.
    pub fn new(ladder: BreakpointLadder, viewport_width: f64) -> Result<Self, ConfigError> {
        ladder.validate()?;
        let default_columns = ladder
            .default_columns
            .ok_or(ConfigError::MissingDefaultColumns)?;
        let mut resolver = Self {
            ladder,
            default_columns,
            columns: default_columns,
        };
        resolver.columns = resolver.evaluate(viewport_width);
        Ok(resolver)
    }

    fn evaluate(&self, width: f64) -> u32 {
        self.ladder
            .ladder
            .iter()
            .find(|bp| bp.matches(width))
            .map_or(self.default_columns, |bp| bp.columns)
    }

    /// Current column count.
    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn ladder(&self) -> &BreakpointLadder {
        &self.ladder
    }

    /// Re-evaluate for a new viewport width.
    ///
    /// Returns `Some(columns)` only when the count changed.
    pub fn update(&mut self, viewport_width: f64) -> Option<u32> {
        let next = self.evaluate(viewport_width);
        if next == self.columns {
            return None;
        }
        log::debug!(
            "breakpoint change at {viewport_width}px: {} → {next} columns",
            self.columns
        );
        self.columns = next;
        Some(next)
    }
}
