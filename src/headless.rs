//! Headless JSON-lines harness.
//!
//! Reads one command per line, applies it to an engine on virtual time and
//! writes events and changed snapshots as JSON lines. Time only moves on
//! `advance`, so a run is reproducible for a given seed.
//!
//! ```text
//! > {"type":"select","id":0}
//! < {"type":"snapshot","generation":1,...}
//! > {"type":"advance","ms":1000}
//! < {"type":"snapshot",...}
//! ```

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ClockDriver, GameEngine, Publisher, RoundObserver, RoundSnapshot};
use crate::types::{CardId, Difficulty, GameEvent, Intent, Timings};

/// Inbound command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HarnessCommand {
    Select { id: CardId },
    Pause,
    Start { difficulty: Difficulty },
    Reset,
    Advance { ms: u32 },
    Snapshot,
}

/// Outbound line.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HarnessOutput<'a> {
    Event(&'a GameEvent),
    Snapshot(&'a RoundSnapshot),
    Error { message: String },
}

/// Writes observer callbacks as JSON lines, remembering the first failure.
struct JsonLines<W: Write> {
    out: W,
    failed: Option<anyhow::Error>,
}

impl<W: Write> JsonLines<W> {
    fn emit(&mut self, line: &HarnessOutput<'_>) {
        if self.failed.is_some() {
            return;
        }
        let res = serde_json::to_writer(&mut self.out, line)
            .map_err(anyhow::Error::from)
            .and_then(|()| self.out.write_all(b"\n").map_err(Into::into));
        if let Err(e) = res {
            self.failed = Some(e.context("writing harness output"));
        }
    }

    fn check(&mut self) -> Result<()> {
        match self.failed.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<W: Write> RoundObserver for JsonLines<W> {
    fn on_snapshot(&mut self, snapshot: &RoundSnapshot) {
        self.emit(&HarnessOutput::Snapshot(snapshot));
    }

    fn on_event(&mut self, event: &GameEvent) {
        self.emit(&HarnessOutput::Event(event));
    }
}

pub struct Harness<W: Write> {
    engine: GameEngine,
    clock: ClockDriver,
    publisher: Publisher,
    sink: JsonLines<W>,
}

impl<W: Write> Harness<W> {
    /// Deal the first round and write its opening event and snapshot.
    pub fn new(seed: u64, timings: Timings, difficulty: Difficulty, out: W) -> Result<Self> {
        let mut engine = GameEngine::new(seed, timings);
        engine.start_round(difficulty);
        let mut harness = Self {
            clock: ClockDriver::for_engine(&engine),
            engine,
            publisher: Publisher::new(),
            sink: JsonLines { out, failed: None },
        };
        harness.publish()?;
        Ok(harness)
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Process every line from `input` until EOF.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        for line in input.lines() {
            let line = line.context("reading harness input")?;
            self.handle_line(&line)?;
        }
        self.sink.out.flush().context("flushing harness output")
    }

    /// Handle one input line. Malformed commands produce an error line.
    pub fn handle_line(&mut self, line: &str) -> Result<()> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }
        match serde_json::from_str::<HarnessCommand>(line) {
            Ok(cmd) => self.handle(cmd),
            Err(e) => {
                debug!(error = %e, "malformed harness command");
                self.sink.emit(&HarnessOutput::Error {
                    message: format!("invalid command: {e}"),
                });
                self.sink.check()
            }
        }
    }

    pub fn handle(&mut self, cmd: HarnessCommand) -> Result<()> {
        match cmd {
            HarnessCommand::Select { id } => self.apply(Intent::Select { id }),
            HarnessCommand::Pause => self.apply(Intent::TogglePause),
            HarnessCommand::Start { difficulty } => self.apply(Intent::StartRound { difficulty }),
            HarnessCommand::Reset => self.apply(Intent::Reset),
            HarnessCommand::Advance { ms } => self.advance(ms),
            HarnessCommand::Snapshot => self.publisher.invalidate(),
        }
        self.publish()
    }

    pub fn into_inner(self) -> W {
        self.sink.out
    }

    fn apply(&mut self, intent: Intent) {
        if !self.engine.apply(intent) {
            debug!(?intent, "intent ignored");
        }
    }

    /// Step virtual time, stopping at every task deadline and clock boundary
    /// so transitions happen in the order they would in real time.
    fn advance(&mut self, ms: u32) {
        let mut remaining = ms;
        loop {
            let to_task = self
                .engine
                .next_due_in()
                .map_or(u32::MAX, |d| u32::try_from(d).unwrap_or(u32::MAX));
            let to_tick = self.clock.unit_ms() - self.clock.pending_ms();
            let step = remaining.min(to_task).min(to_tick);

            self.engine.advance(step);
            self.clock.advance(&mut self.engine, step);

            remaining -= step;
            if remaining == 0 {
                break;
            }
        }
    }

    fn publish(&mut self) -> Result<()> {
        self.publisher.publish(&mut self.engine, &mut self.sink);
        self.sink.check()
    }
}
