//! Asset preloading.
//!
//! The grid stays hidden until every image has *settled*: a successful load
//! and a load error count the same. A broken image therefore never blocks the
//! grid; it just renders as an empty box. There is no timeout, so an asset
//! whose load never settles keeps the grid hidden indefinitely.
//!
//! [`Preload`] is the per-session tracker the host feeds load/error events
//! into. [`probe_local_assets`] is the offline counterpart used by the CLI:
//! it decodes local image headers in parallel and reports which would fail.

use crate::types::Item;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// How one asset settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetOutcome {
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssetState {
    Pending,
    Settled(AssetOutcome),
}

/// Tracks every asset URL until all of them have settled.
#[derive(Debug, Clone)]
pub struct Preload {
    assets: BTreeMap<String, AssetState>,
}

impl Preload {
    /// Track the images of `items`. Duplicate URLs are tracked once.
    pub fn new(items: &[Item]) -> Self {
        let assets = items
            .iter()
            .map(|item| (item.img.clone(), AssetState::Pending))
            .collect();
        Self { assets }
    }

    /// Record a load or error event.
    ///
    /// Returns `true` if this event was the one that resolved the preload.
    /// Events for unknown URLs and repeat events are ignored.
    pub fn settle(&mut self, url: &str, outcome: AssetOutcome) -> bool {
        let was_resolved = self.is_resolved();
        match self.assets.get_mut(url) {
            Some(state) if *state == AssetState::Pending => {
                if outcome == AssetOutcome::Failed {
                    log::warn!("image failed to load, rendering blank: {url}");
                }
                *state = AssetState::Settled(outcome);
            }
            Some(_) => {}
            None => log::debug!("ignoring load event for untracked asset {url}"),
        }
        !was_resolved && self.is_resolved()
    }

    /// Every asset has loaded or failed.
    pub fn is_resolved(&self) -> bool {
        self.assets
            .values()
            .all(|state| matches!(state, AssetState::Settled(_)))
    }

    /// URLs still waiting for a load or error event.
    pub fn pending(&self) -> Vec<&str> {
        self.assets
            .iter()
            .filter(|(_, state)| **state == AssetState::Pending)
            .map(|(url, _)| url.as_str())
            .collect()
    }

    /// URLs that settled with an error.
    pub fn failed(&self) -> Vec<&str> {
        self.assets
            .iter()
            .filter(|(_, state)| **state == AssetState::Settled(AssetOutcome::Failed))
            .map(|(url, _)| url.as_str())
            .collect()
    }
}

/// Result of probing one item's image on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetProbe {
    pub id: String,
    pub img: String,
    pub status: ProbeStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProbeStatus {
    /// Decoded header; pixel dimensions.
    Loaded { width: u32, height: u32 },
    /// Remote URL, not fetched.
    Remote,
    /// Would render as a blank box.
    Failed(String),
}

impl AssetProbe {
    pub fn outcome(&self) -> AssetOutcome {
        match self.status {
            ProbeStatus::Failed(_) => AssetOutcome::Failed,
            _ => AssetOutcome::Loaded,
        }
    }
}

fn is_remote(img: &str) -> bool {
    img.starts_with("http://") || img.starts_with("https://") || img.starts_with("data:")
}

/// Check each item's image, resolving relative paths against `base`.
///
/// Runs on rayon's pool; results come back in item order.
pub fn probe_local_assets(items: &[Item], base: &Path) -> Vec<AssetProbe> {
    items
        .par_iter()
        .map(|item| {
            let status = if is_remote(&item.img) {
                ProbeStatus::Remote
            } else {
                let path: PathBuf = base.join(&item.img);
                match image::image_dimensions(&path) {
                    Ok((width, height)) => ProbeStatus::Loaded { width, height },
                    Err(e) => ProbeStatus::Failed(e.to_string()),
                }
            };
            AssetProbe {
                id: item.id.clone(),
                img: item.img.clone(),
                status,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{item, scenario_items};
    use crate::types::Item;
    use tempfile::TempDir;

    #[test]
    fn resolves_only_after_every_asset_settles() {
        let items = scenario_items();
        let mut preload = Preload::new(&items);
        assert!(!preload.is_resolved());

        for it in &items[..4] {
            assert!(!preload.settle(&it.img, AssetOutcome::Loaded));
        }
        assert_eq!(preload.pending(), vec![items[4].img.as_str()]);
        assert!(preload.settle(&items[4].img, AssetOutcome::Loaded));
        assert!(preload.is_resolved());
    }

    #[test]
    fn errors_settle_like_loads() {
        let items = scenario_items();
        let mut preload = Preload::new(&items);
        let mut resolved = false;
        for it in &items {
            resolved |= preload.settle(&it.img, AssetOutcome::Failed);
        }
        assert!(resolved);
        assert!(preload.is_resolved());
        assert_eq!(preload.failed().len(), 5);
    }

    #[test]
    fn empty_item_list_is_resolved() {
        assert!(Preload::new(&[]).is_resolved());
    }

    #[test]
    fn repeat_and_unknown_events_are_ignored() {
        let items = vec![item("a", 10.0), item("b", 10.0)];
        let mut preload = Preload::new(&items);
        assert!(!preload.settle("https://elsewhere.test/x.jpg", AssetOutcome::Loaded));
        assert!(!preload.settle(&items[0].img, AssetOutcome::Failed));
        assert!(!preload.settle(&items[0].img, AssetOutcome::Loaded));
        assert_eq!(preload.failed(), vec![items[0].img.as_str()]);
        assert!(preload.settle(&items[1].img, AssetOutcome::Loaded));
        assert!(!preload.settle(&items[1].img, AssetOutcome::Loaded));
    }

    #[test]
    fn shared_urls_are_tracked_once() {
        let mut a = item("a", 10.0);
        let mut b = item("b", 10.0);
        a.img = "same.jpg".into();
        b.img = "same.jpg".into();
        let mut preload = Preload::new(&[a, b]);
        assert!(preload.settle("same.jpg", AssetOutcome::Loaded));
    }

    #[test]
    fn probe_reports_local_files() {
        let tmp = TempDir::new().unwrap();
        image::RgbImage::new(6, 4)
            .save(tmp.path().join("ok.png"))
            .unwrap();
        std::fs::write(tmp.path().join("broken.png"), b"not an image").unwrap();

        let items = vec![
            Item {
                img: "ok.png".into(),
                ..item("ok", 10.0)
            },
            Item {
                img: "broken.png".into(),
                ..item("broken", 10.0)
            },
            Item {
                img: "missing.png".into(),
                ..item("missing", 10.0)
            },
            item("remote", 10.0),
        ];

        let probes = probe_local_assets(&items, tmp.path());
        let ids: Vec<&str> = probes.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["ok", "broken", "missing", "remote"]);
        assert_eq!(
            probes[0].status,
            ProbeStatus::Loaded {
                width: 6,
                height: 4
            }
        );
        assert!(matches!(probes[1].status, ProbeStatus::Failed(_)));
        assert!(matches!(probes[2].status, ProbeStatus::Failed(_)));
        assert_eq!(probes[3].status, ProbeStatus::Remote);
        assert_eq!(probes[1].outcome(), AssetOutcome::Failed);
        assert_eq!(probes[3].outcome(), AssetOutcome::Loaded);
    }
}
