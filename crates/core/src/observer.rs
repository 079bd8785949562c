//! Snapshot subscription.
//!
//! Rendering layers implement [`RoundObserver`]. A [`Publisher`] sits next to
//! the engine and, after each batch of intents or time steps, forwards the
//! new events followed by one snapshot. Nothing is published when the engine
//! has not changed since the previous call.

use crate::engine::GameEngine;
use crate::snapshot::RoundSnapshot;
use crate::types::GameEvent;

pub trait RoundObserver {
    fn on_snapshot(&mut self, snapshot: &RoundSnapshot);

    fn on_event(&mut self, _event: &GameEvent) {}
}

#[derive(Debug, Default)]
pub struct Publisher {
    last_revision: Option<u64>,
    scratch: RoundSnapshot,
}

impl Publisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish pending events and the current snapshot if anything changed.
    ///
    /// Returns whether a snapshot was delivered.
    pub fn publish(&mut self, engine: &mut GameEngine, observer: &mut dyn RoundObserver) -> bool {
        for event in engine.drain_events() {
            observer.on_event(&event);
        }

        if self.last_revision == Some(engine.revision()) {
            return false;
        }
        self.last_revision = Some(engine.revision());

        engine.snapshot_into(&mut self.scratch);
        observer.on_snapshot(&self.scratch);
        true
    }

    /// Force the next [`publish`](Self::publish) to deliver a snapshot.
    pub fn invalidate(&mut self) {
        self.last_revision = None;
    }
}
