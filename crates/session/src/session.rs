//! Async session: one engine owned by one tokio task.
//!
//! Intents arrive over an mpsc channel and are applied in order. A frame
//! interval feeds measured time into the engine's scheduler and the clock
//! driver. After every step the [`Publisher`] pushes events to a broadcast
//! channel and changed snapshots to a watch channel.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tokio::runtime::Handle;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::core::{ClockDriver, DeckRng, GameEngine, Publisher, RoundObserver, RoundSnapshot};
use crate::types::{GameEvent, Intent};

/// Intents queued before `try_send` reports back-pressure.
pub const INTENT_QUEUE: usize = 32;
/// Events buffered per subscriber before it starts lagging.
pub const EVENT_BUFFER: usize = 64;

/// Handle to a running session. Dropping it stops the session task.
pub struct Session {
    intents: mpsc::Sender<Intent>,
    snapshots: watch::Receiver<RoundSnapshot>,
    events: broadcast::Sender<GameEvent>,
    first_events: Option<broadcast::Receiver<GameEvent>>,
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
    seed: u64,
}

impl Session {
    /// Deal the first round and spawn the session task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(config: SessionConfig) -> Result<Self> {
        let handle = Handle::try_current().context("session requires a tokio runtime")?;

        let seed = config.seed.unwrap_or_else(DeckRng::entropy_seed);
        let mut engine = GameEngine::new(seed, config.timings);
        engine.start_round(config.difficulty);
        let clock = ClockDriver::for_engine(&engine);

        let (intent_tx, intent_rx) = mpsc::channel(INTENT_QUEUE);
        let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());
        let (event_tx, event_rx) = broadcast::channel(EVENT_BUFFER);
        let (stop_tx, stop_rx) = oneshot::channel();

        info!(
            seed,
            difficulty = config.difficulty.as_str(),
            frame_ms = config.frame_ms,
            "session started"
        );

        let actor = Actor {
            engine,
            clock,
            origin: Instant::now(),
            consumed_ms: 0,
            publisher: Publisher::new(),
            sink: ChannelSink {
                snapshots: snapshot_tx,
                events: event_tx.clone(),
            },
        };
        let frame = Duration::from_millis(u64::from(config.frame_ms.max(1)));
        let task = handle.spawn(actor.run(intent_rx, stop_rx, frame));

        Ok(Self {
            intents: intent_tx,
            snapshots: snapshot_rx,
            events: event_tx,
            first_events: Some(event_rx),
            stop: Some(stop_tx),
            task: Some(task),
            seed,
        })
    }

    /// Deck seed in use (useful for replaying a deal).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Queue an intent without waiting.
    pub fn try_send(&self, intent: Intent) -> Result<()> {
        self.intents.try_send(intent).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => anyhow!("session intent queue is full"),
            mpsc::error::TrySendError::Closed(_) => anyhow!("session has shut down"),
        })
    }

    /// Queue an intent, waiting for queue space.
    pub async fn send(&self, intent: Intent) -> Result<()> {
        self.intents
            .send(intent)
            .await
            .map_err(|_| anyhow!("session has shut down"))
    }

    /// Receiver that is notified whenever the round changes.
    pub fn snapshots(&self) -> watch::Receiver<RoundSnapshot> {
        self.snapshots.clone()
    }

    /// Copy of the most recently published snapshot.
    pub fn latest(&self) -> RoundSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Subscribe to game events.
    ///
    /// The first subscriber also receives events published before it
    /// subscribed (such as the opening `RoundStarted`); later subscribers only
    /// see events from the moment they subscribe.
    pub fn subscribe_events(&mut self) -> broadcast::Receiver<GameEvent> {
        self.first_events
            .take()
            .unwrap_or_else(|| self.events.subscribe())
    }

    /// Stop the session task and wait for it to finish.
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            task.await.context("session task failed")?;
        }
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

struct ChannelSink {
    snapshots: watch::Sender<RoundSnapshot>,
    events: broadcast::Sender<GameEvent>,
}

impl RoundObserver for ChannelSink {
    fn on_snapshot(&mut self, snapshot: &RoundSnapshot) {
        self.snapshots.send_modify(|s| s.clone_from(snapshot));
    }

    fn on_event(&mut self, event: &GameEvent) {
        // No receivers is fine.
        let _ = self.events.send(*event);
    }
}

struct Actor {
    engine: GameEngine,
    clock: ClockDriver,
    /// Session start; engine time is measured from here.
    origin: Instant,
    /// Milliseconds since `origin` already fed to the engine.
    consumed_ms: u64,
    publisher: Publisher,
    sink: ChannelSink,
}

impl Actor {
    async fn run(
        mut self,
        mut intents: mpsc::Receiver<Intent>,
        mut stop: oneshot::Receiver<()>,
        frame: Duration,
    ) {
        let mut frames = time::interval(frame);
        frames.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut stop => break,
                intent = intents.recv() => match intent {
                    Some(intent) => {
                        // Deferred delays are measured from the moment the
                        // intent is applied, not from the previous frame.
                        self.catch_up();
                        if !self.engine.apply(intent) {
                            debug!(?intent, "intent ignored");
                        }
                    }
                    None => break,
                },
                _ = frames.tick() => self.catch_up(),
            }
            self.publisher.publish(&mut self.engine, &mut self.sink);
        }

        debug!(
            generation = self.engine.generation(),
            pending = self.engine.pending_tasks(),
            "session stopped"
        );
    }

    /// Feed the time since the last catch-up to the scheduler and the clock.
    fn catch_up(&mut self) {
        let total_ms = self.origin.elapsed().as_millis() as u64;
        let step = u32::try_from(total_ms - self.consumed_ms).unwrap_or(u32::MAX);
        self.consumed_ms = total_ms;
        self.engine.advance(step);
        self.clock.advance(&mut self.engine, step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Difficulty;

    fn config() -> SessionConfig {
        SessionConfig {
            seed: Some(7),
            ..SessionConfig::default()
        }
    }

    #[test]
    fn spawn_outside_runtime_is_an_error() {
        assert!(Session::spawn(config()).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn first_snapshot_is_a_dealt_round() {
        let session = Session::spawn(config()).unwrap();
        let snap = session.latest();
        assert_eq!(snap.generation, 1);
        assert_eq!(snap.cards.len(), Difficulty::Easy.card_count());
        assert!(snap.is_running);
        assert_eq!(session.seed(), 7);
        session.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn first_subscriber_sees_round_started() {
        let mut session = Session::spawn(config()).unwrap();
        let mut events = session.subscribe_events();
        let first = events.recv().await.unwrap();
        assert!(matches!(first, GameEvent::RoundStarted { pair_count: 6, .. }));
        session.shutdown().await.unwrap();
    }
}
