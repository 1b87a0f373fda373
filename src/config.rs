//! Masonry configuration.
//!
//! Handles loading, validating, and merging `masonry.toml`. Every key is
//! optional: stock defaults are serialized to a TOML table and the user file
//! is merged on top, so a config only needs the values it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [layout]
//! gap = 16                  # Pixels between tiles, both axes
//!
//! [breakpoints]
//! default_columns = 1       # Columns when no rung matches
//! ladder = [                # Widest first; first match wins
//!     { min_width = 1500, columns = 5 },
//!     { min_width = 1000, columns = 4 },
//!     { min_width = 600,  columns = 3 },
//!     { min_width = 400,  columns = 2 },
//! ]
//!
//! [animation]
//! animate_from = "bottom"   # top | bottom | left | right | center
//! entry_duration = 0.8      # Seconds
//! relayout_duration = 0.6   # Seconds
//! stagger = 0.05            # Seconds between consecutive entry tweens
//! entry_easing = "power3.out"
//! relayout_easing = "power3.out"
//! blur_to_focus = true
//! blur_radius = 10          # Pixels
//! offscreen_offset = 200    # Pixels past the viewport edge
//!
//! [hover]
//! scale_on_hover = true
//! hover_scale = 0.95
//! duration = 0.3
//! easing = "power2.out"
//! color_shift_on_hover = false
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::animation::{Easing, OriginSide};
use crate::breakpoints::BreakpointLadder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Fatal setup errors. Everything here is a caller bug and surfaces before
/// any layout happens.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("column count must be at least 1")]
    ZeroColumns,
    #[error("breakpoints need a default column count")]
    MissingDefaultColumns,
    #[error("gap must be a non-negative number, got {0}")]
    InvalidGap(f64),
    #[error("duplicate item id '{0}'")]
    DuplicateItemId(String),
}

/// Masonry configuration loaded from `masonry.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MasonryConfig {
    /// Grid spacing.
    pub layout: LayoutConfig,
    /// Viewport width → column count ladder.
    pub breakpoints: BreakpointLadder,
    /// Entry and relayout tweens.
    pub animation: AnimationConfig,
    /// Pointer hover tweens.
    pub hover: HoverConfig,
}

impl MasonryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let gap = self.layout.gap;
        if !gap.is_finite() || gap < 0.0 {
            return Err(ConfigError::InvalidGap(gap));
        }
        self.breakpoints.validate()?;
        if !self.breakpoints.is_descending() {
            log::warn!(
                "breakpoint ladder {:?} is not widest-first; the first matching rung wins",
                self.breakpoints.thresholds()
            );
        }

        let a = &self.animation;
        non_negative("animation.entry_duration", a.entry_duration)?;
        non_negative("animation.relayout_duration", a.relayout_duration)?;
        non_negative("animation.stagger", a.stagger)?;
        non_negative("animation.blur_radius", a.blur_radius)?;
        non_negative("animation.offscreen_offset", a.offscreen_offset)?;

        non_negative("hover.duration", self.hover.duration)?;
        if !self.hover.hover_scale.is_finite() || self.hover.hover_scale <= 0.0 {
            return Err(ConfigError::Validation(
                "hover.hover_scale must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

fn non_negative(key: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{key} must be a non-negative number, got {value}"
        )))
    }
}

/// Grid spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Pixels between tiles horizontally and vertically.
    pub gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { gap: 16.0 }
    }
}

/// Entry and relayout tween settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Side entering tiles fly in from.
    pub animate_from: OriginSide,
    /// Seconds for each entry tween.
    pub entry_duration: f64,
    /// Seconds for each relayout glide.
    pub relayout_duration: f64,
    /// Seconds between consecutive entry tween starts.
    pub stagger: f64,
    pub entry_easing: Easing,
    pub relayout_easing: Easing,
    /// Fade tiles in from a blur.
    pub blur_to_focus: bool,
    /// Starting blur radius in pixels.
    pub blur_radius: f64,
    /// How far past the viewport edge tiles start, in pixels.
    pub offscreen_offset: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            animate_from: OriginSide::Bottom,
            entry_duration: 0.8,
            relayout_duration: 0.6,
            stagger: 0.05,
            entry_easing: Easing::POWER3_OUT,
            relayout_easing: Easing::POWER3_OUT,
            blur_to_focus: true,
            blur_radius: 10.0,
            offscreen_offset: 200.0,
        }
    }
}

/// Hover tween settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HoverConfig {
    /// Shrink tiles slightly under the pointer.
    pub scale_on_hover: bool,
    /// Scale while hovered.
    pub hover_scale: f64,
    /// Seconds for hover in and out.
    pub duration: f64,
    pub easing: Easing,
    /// Fade in a gradient overlay under the pointer.
    pub color_shift_on_hover: bool,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            scale_on_hover: true,
            hover_scale: 0.95,
            duration: 0.3,
            easing: Easing::POWER2_OUT,
            color_shift_on_hover: false,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(MasonryConfig::default()).expect("default config must serialize")
}

/// Lay a user `masonry.toml` over the stock defaults.
///
/// Sections such as `[hover]` merge key by key, so a user file can change
/// one value and keep the rest. Anything that is not a table replaces the
/// default outright: a user `ladder` array is the whole ladder, never
/// appended to the stock rungs.
pub fn merge_toml(defaults: toml::Value, user: toml::Value) -> toml::Value {
    match (defaults, user) {
        (toml::Value::Table(mut table), toml::Value::Table(user_table)) => {
            for (key, value) in user_table {
                let merged = match table.remove(&key) {
                    Some(default) => merge_toml(default, value),
                    None => value,
                };
                table.insert(key, merged);
            }
            toml::Value::Table(table)
        }
        (_, user) => user,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<MasonryConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: MasonryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `path` over stock defaults. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<MasonryConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    if overlay.is_none() {
        log::debug!("no config at {}, using stock defaults", path.display());
    }
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `masonry.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Masonry Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
[layout]
# Pixels between tiles, horizontally and vertically. Must be >= 0.
gap = 16

# ---------------------------------------------------------------------------
# Breakpoints
# ---------------------------------------------------------------------------
# Each rung reads "viewport width >= min_width → columns". Rungs are checked
# in order and the first match wins, so list them widest first.
[breakpoints]
default_columns = 1
ladder = [
    { min_width = 1500, columns = 5 },
    { min_width = 1000, columns = 4 },
    { min_width = 600, columns = 3 },
    { min_width = 400, columns = 2 },
]

# ---------------------------------------------------------------------------
# Placement animation
# ---------------------------------------------------------------------------
[animation]
# Where tiles fly in from on first layout: top, bottom, left, right, center.
animate_from = "bottom"

# Seconds for each tile's entry tween.
entry_duration = 0.8

# Seconds for tiles to glide to new positions after a resize.
relayout_duration = 0.6

# Seconds between consecutive tiles starting their entry.
stagger = 0.05

# Easing identifiers: none, linear, power1-4 with .in / .out / .inOut.
entry_easing = "power3.out"
relayout_easing = "power3.out"

# Fade tiles in from a blur of blur_radius pixels.
blur_to_focus = true
blur_radius = 10

# How far past the viewport edge entering tiles start, in pixels.
offscreen_offset = 200

# ---------------------------------------------------------------------------
# Hover
# ---------------------------------------------------------------------------
[hover]
# Shrink the hovered tile to hover_scale.
scale_on_hover = true
hover_scale = 0.95

# Seconds for hover in and out.
duration = 0.3
easing = "power2.out"

# Fade in a gradient overlay on the hovered tile.
color_shift_on_hover = false
"##
}

/// Generate CSS custom properties from the config.
pub fn generate_grid_css(config: &MasonryConfig) -> String {
    format!(
        r#":root {{
    --masonry-gap: {gap}px;
    --masonry-hover-scale: {hover_scale};
    --masonry-hover-duration: {hover_duration}s;
}}"#,
        gap = config.layout.gap,
        hover_scale = config.hover.hover_scale,
        hover_duration = config.hover.duration,
    )
}
