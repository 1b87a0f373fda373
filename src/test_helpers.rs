//! Shared test utilities.
//!
//! Item builders, the five-item reference gallery, and a float comparison
//! that reports both values on failure.

use crate::types::Item;

/// Build an item whose image and link are derived from its id.
pub fn item(id: &str, height: f64) -> Item {
    Item {
        id: id.to_string(),
        img: format!("https://picsum.photos/seed/{id}/600/900"),
        url: format!("https://example.com/{id}"),
        height,
    }
}

/// The reference gallery: ids "1".."5", heights 400, 250, 600, 450, 300.
pub fn scenario_items() -> Vec<Item> {
    [400.0, 250.0, 600.0, 450.0, 300.0]
        .iter()
        .enumerate()
        .map(|(i, &h)| item(&(i + 1).to_string(), h))
        .collect()
}

/// Assert two floats agree to within a hundredth of a pixel.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.01,
        "expected {expected}, got {actual}"
    );
}
