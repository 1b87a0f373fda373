//! Shared types used across the engine.
//!
//! [`Item`] is the caller-supplied input; [`PlacedItem`] is what the packer
//! produces for it. Both serialize, so `layout --json` and the items file use
//! the same field names.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// A single gallery tile.
///
/// The height is fixed by the caller and never measured from the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Item {
    /// Stable identifier, unique within one item list.
    pub id: String,
    /// Image reference (URL or local path).
    pub img: String,
    /// Link opened in a new browsing context when the tile is clicked.
    pub url: String,
    /// Tile height in pixels.
    pub height: f64,
}

/// An [`Item`] with its computed box.
///
/// `height` always equals the source item's height; `width` is the uniform
/// column width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub id: String,
    pub img: String,
    pub url: String,
    /// Zero-based column the packer chose.
    pub column: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlacedItem {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Right edge of the box.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge of the box.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// On-disk shape of an items file:
///
/// ```toml
/// [[items]]
/// id = "1"
/// img = "https://picsum.photos/id/1015/600/900"
/// url = "https://example.com/one"
/// height = 400
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemList {
    #[serde(default)]
    pub items: Vec<Item>,
}

impl ItemList {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_items(&self.items)
    }
}

/// Reject duplicate ids and unusable heights.
pub fn validate_items(items: &[Item]) -> Result<(), ConfigError> {
    ensure_unique_ids(items)?;
    for item in items {
        if !item.height.is_finite() || item.height < 0.0 {
            return Err(ConfigError::Validation(format!(
                "item '{}' has invalid height {}",
                item.id, item.height
            )));
        }
    }
    Ok(())
}

/// Fail on the first id that appears twice.
pub fn ensure_unique_ids(items: &[Item]) -> Result<(), ConfigError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id.as_str()) {
            return Err(ConfigError::DuplicateItemId(item.id.clone()));
        }
    }
    Ok(())
}

/// Load and validate an items file.
pub fn load_items(path: &Path) -> Result<Vec<Item>, ConfigError> {
    let content = fs::read_to_string(path)?;
    let list: ItemList = toml::from_str(&content)?;
    list.validate()?;
    Ok(list.items)
}
