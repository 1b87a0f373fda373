//! Viewport and container-size observation.
//!
//! The engine does not poll and does not know how sizes are measured. A
//! session registers what it wants to hear about through an
//! [`ObserverRegistry`] when mounted and releases those subscriptions on
//! unmount. The host then forwards each notification to the session.

use serde::Serialize;

/// Opaque subscription token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SubscriptionId(pub u64);

/// What a session wants to be told about.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Observation {
    /// Viewport size changes; `thresholds` are the breakpoint widths whose
    /// crossing matters.
    Viewport { thresholds: Vec<f64> },
    /// Content-box size changes of the grid container.
    ContainerSize,
}

/// Subscribe/release capability provided by the host.
pub trait ObserverRegistry {
    fn observe(&mut self, observation: Observation) -> SubscriptionId;
    fn release(&mut self, id: SubscriptionId);
}

/// In-memory registry that keeps the live subscriptions in a list.
///
/// Useful for headless hosts and tests: check [`active`](Self::active) to
/// confirm that nothing leaked after unmount.
#[derive(Debug, Default)]
pub struct SubscriptionList {
    next: u64,
    active: Vec<(SubscriptionId, Observation)>,
}

impl SubscriptionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &[(SubscriptionId, Observation)] {
        &self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl ObserverRegistry for SubscriptionList {
    fn observe(&mut self, observation: Observation) -> SubscriptionId {
        self.next += 1;
        let id = SubscriptionId(self.next);
        self.active.push((id, observation));
        id
    }

    fn release(&mut self, id: SubscriptionId) {
        self.active.retain(|(active, _)| *active != id);
    }
}
