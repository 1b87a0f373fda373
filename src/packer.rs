//! Greedy shortest-column packing.
//!
//! Every item goes into whichever column is currently shortest (lowest index
//! on ties), directly below what is already there:
//!
//! ```text
//! columnWidth = (containerWidth − gap × (columns − 1)) / columns
//! x           = column × (columnWidth + gap)
//! y           = accumulated[column]
//! accumulated[column] += height + gap
//! ```
//!
//! The function is pure: identical inputs produce bit-identical layouts, and
//! the whole placement list is recomputed on every call.
//!
//! A container narrower than the gaps yields a zero or negative column width.
//! That is reported through [`Layout::is_degenerate`] rather than as an error;
//! whether to hide the grid at that size is the caller's decision.

use crate::config::ConfigError;
use crate::types::{Item, PlacedItem};
use serde::Serialize;

/// Result of one packing pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub columns: u32,
    pub container_width: f64,
    pub gap: f64,
    pub column_width: f64,
    /// Placements in input order.
    pub placements: Vec<PlacedItem>,
    /// Accumulated height per column, trailing gap included.
    pub column_heights: Vec<f64>,
}

impl Layout {
    /// An empty layout, used before the container has been measured.
    pub fn empty() -> Self {
        Self {
            columns: 0,
            container_width: 0.0,
            gap: 0.0,
            column_width: 0.0,
            placements: Vec::new(),
            column_heights: Vec::new(),
        }
    }

    /// Height the container must reserve: the tallest column.
    pub fn content_height(&self) -> f64 {
        self.column_heights.iter().copied().fold(0.0, f64::max)
    }

    /// Column width is zero, negative or not a number.
    pub fn is_degenerate(&self) -> bool {
        !self.placements.is_empty() && !(self.column_width > 0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&PlacedItem> {
        self.placements.iter().find(|p| p.id == id)
    }
}

/// Uniform column width for a container.
pub fn column_width(columns: u32, container_width: f64, gap: f64) -> f64 {
    (container_width - gap * (columns as f64 - 1.0)) / columns as f64
}

/// Place `items` into `columns` columns across `container_width`.
///
/// Fails only on configuration errors: zero columns or a negative /
/// non-finite gap. No partial layout is produced in that case.
pub fn pack(
    columns: u32,
    container_width: f64,
    gap: f64,
    items: &[Item],
) -> Result<Layout, ConfigError> {
    if columns == 0 {
        return Err(ConfigError::ZeroColumns);
    }
    if !gap.is_finite() || gap < 0.0 {
        return Err(ConfigError::InvalidGap(gap));
    }

    let width = column_width(columns, container_width, gap);
    let mut heights = vec![0.0_f64; columns as usize];

    let placements = items
        .iter()
        .map(|item| {
            let column = shortest_column(&heights);
            let placed = PlacedItem {
                id: item.id.clone(),
                img: item.img.clone(),
                url: item.url.clone(),
                column,
                x: column as f64 * (width + gap),
                y: heights[column],
                width,
                height: item.height,
            };
            heights[column] += item.height + gap;
            placed
        })
        .collect();

    Ok(Layout {
        columns,
        container_width,
        gap,
        column_width: width,
        placements,
        column_heights: heights,
    })
}

/// Index of the minimum height; the first one wins on ties.
fn shortest_column(heights: &[f64]) -> usize {
    let mut best = 0;
    for (i, &h) in heights.iter().enumerate().skip(1) {
        if h < heights[best] {
            best = i;
        }
    }
    best
}
