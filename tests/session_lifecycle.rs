//! Drives a full session on the headless timeline: mount, preload, entry
//! cascade, resize mid-entry, hover, unmount.

use simple_masonry::animation::{Timeline, Viewport};
use simple_masonry::config::MasonryConfig;
use simple_masonry::observe::SubscriptionList;
use simple_masonry::preload::AssetOutcome;
use simple_masonry::session::{LayoutSession, SessionPhase};
use simple_masonry::types::Item;

const FRAME: f64 = 1.0 / 60.0;

fn items() -> Vec<Item> {
    [("1", 400.0), ("2", 250.0), ("3", 600.0), ("4", 450.0), ("5", 300.0)]
        .iter()
        .map(|(id, height)| Item {
            id: id.to_string(),
            img: format!("https://picsum.photos/seed/{id}/600/900"),
            url: format!("https://example.com/{id}"),
            height: *height,
        })
        .collect()
}

fn close(a: Option<f64>, b: f64) -> bool {
    a.is_some_and(|a| (a - b).abs() < 0.01)
}

/// Every tile's timeline state matches its packed position, fully visible.
fn assert_at_rest(session: &LayoutSession, timeline: &Timeline) {
    for placed in &session.layout().placements {
        let state = timeline
            .state(&placed.id)
            .unwrap_or_else(|| panic!("{} never animated", placed.id));
        assert!(close(state.x, placed.x), "{}: x {:?} != {}", placed.id, state.x, placed.x);
        assert!(close(state.y, placed.y), "{}: y {:?} != {}", placed.id, state.y, placed.y);
        assert!(close(state.width, placed.width), "{}: width", placed.id);
        assert!(close(state.opacity, 1.0), "{}: opacity {:?}", placed.id, state.opacity);
        assert!(close(state.blur, 0.0), "{}: blur {:?}", placed.id, state.blur);
    }
}

fn mounted() -> (LayoutSession, Timeline, SubscriptionList) {
    let mut timeline = Timeline::new();
    let mut registry = SubscriptionList::new();
    let mut session = LayoutSession::new(
        items(),
        &MasonryConfig::default(),
        Viewport::new(1200.0, 800.0),
    )
    .unwrap();
    session.mount(&mut registry);
    session.container_resized(&mut timeline, 952.0);
    (session, timeline, registry)
}

fn settle_all(session: &mut LayoutSession, timeline: &mut Timeline, outcome: AssetOutcome) {
    let urls: Vec<String> = session.items().iter().map(|i| i.img.clone()).collect();
    for url in urls {
        session.asset_settled(timeline, &url, outcome);
    }
}

#[test]
fn entry_cascade_lands_every_tile() {
    let (mut session, mut timeline, _registry) = mounted();
    assert_eq!(session.phase(), SessionPhase::Uninitialized);
    assert!(timeline.is_idle());

    settle_all(&mut session, &mut timeline, AssetOutcome::Loaded);
    assert_eq!(session.phase(), SessionPhase::Relayout);
    assert_eq!(timeline.active_count(), 5);

    // start state is rendered before the first frame
    let first = timeline.state("1").unwrap();
    assert_eq!(first.opacity, Some(0.0));
    assert_eq!(first.y, Some(1000.0));

    let steps = timeline.run_to_completion(FRAME, 1_000);
    assert!(steps < 1_000);
    // 0.8s entry plus 4 × 0.05s stagger
    assert!((timeline.now() - 1.0).abs() < 2.0 * FRAME);
    assert_at_rest(&session, &timeline);
}

#[test]
fn resize_mid_entry_still_ends_visible_at_new_positions() {
    let (mut session, mut timeline, _registry) = mounted();
    settle_all(&mut session, &mut timeline, AssetOutcome::Loaded);

    // tile 5 has not started its entry yet
    timeline.advance(0.1);
    session.container_resized(&mut timeline, 1100.0);
    assert_eq!(timeline.active_count(), 5);

    timeline.run_to_completion(FRAME, 1_000);
    assert_eq!(session.layout().container_width, 1100.0);
    assert_at_rest(&session, &timeline);
}

#[test]
fn breakpoint_crossing_moves_tiles_into_new_columns() {
    let (mut session, mut timeline, _registry) = mounted();
    settle_all(&mut session, &mut timeline, AssetOutcome::Failed);
    timeline.run_to_completion(FRAME, 1_000);
    assert_eq!(session.columns(), 4);

    session.viewport_changed(&mut timeline, Viewport::new(500.0, 800.0));
    session.container_resized(&mut timeline, 452.0);
    assert_eq!(session.columns(), 2);

    timeline.run_to_completion(FRAME, 1_000);
    assert_at_rest(&session, &timeline);
    let columns: Vec<usize> = session.layout().placements.iter().map(|p| p.column).collect();
    assert_eq!(columns, vec![0, 1, 1, 0, 0]);
}

#[test]
fn hover_scales_without_disturbing_position() {
    let (mut session, mut timeline, _registry) = mounted();
    settle_all(&mut session, &mut timeline, AssetOutcome::Loaded);
    timeline.run_to_completion(FRAME, 1_000);

    session.pointer_enter(&mut timeline, "3");
    timeline.run_to_completion(FRAME, 1_000);
    assert!(close(timeline.state("3").unwrap().scale, 0.95));
    assert_at_rest(&session, &timeline);

    session.pointer_leave(&mut timeline, "3");
    timeline.run_to_completion(FRAME, 1_000);
    assert!(close(timeline.state("3").unwrap().scale, 1.0));
}

#[test]
fn unmount_stops_tweens_and_releases_observers() {
    let (mut session, mut timeline, mut registry) = mounted();
    assert_eq!(registry.active().len(), 2);
    settle_all(&mut session, &mut timeline, AssetOutcome::Loaded);
    timeline.advance(0.3);
    let frozen = *timeline.state("1").unwrap();

    session.unmount(&mut timeline, &mut registry);
    assert!(registry.is_empty());
    assert!(timeline.is_idle());

    timeline.advance(1.0);
    assert_eq!(timeline.state("1"), Some(&frozen));
}
