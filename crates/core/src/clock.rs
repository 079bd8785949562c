//! Fixed-interval clock driver.
//!
//! Converts frame time into whole elapsed-time units for
//! [`GameEngine::tick`]. The clock only runs while the round is running and
//! unpaused; whenever it stops, the partial unit is discarded, and a new round
//! restarts it from zero.

use crate::engine::GameEngine;
use crate::types::CLOCK_UNIT_MS;

#[derive(Debug, Clone)]
pub struct ClockDriver {
    unit_ms: u32,
    accum_ms: u32,
    /// Generation the clock is currently running for, `None` when stopped.
    armed: Option<u64>,
}

impl ClockDriver {
    pub fn new(unit_ms: u32) -> Self {
        Self {
            unit_ms: unit_ms.max(1),
            accum_ms: 0,
            armed: None,
        }
    }

    /// Clock matching the engine's configured unit.
    pub fn for_engine(engine: &GameEngine) -> Self {
        Self::new(engine.timings().clock_unit_ms)
    }

    pub fn unit_ms(&self) -> u32 {
        self.unit_ms
    }

    pub fn is_running(&self) -> bool {
        self.armed.is_some()
    }

    /// Milliseconds accumulated toward the next tick.
    pub fn pending_ms(&self) -> u32 {
        self.accum_ms
    }

    pub fn stop(&mut self) {
        self.armed = None;
        self.accum_ms = 0;
    }

    /// Feed `elapsed_ms` of frame time; returns the number of ticks delivered.
    pub fn advance(&mut self, engine: &mut GameEngine, elapsed_ms: u32) -> u32 {
        if !engine.clock_should_run() {
            self.stop();
            return 0;
        }

        if self.armed != Some(engine.generation()) {
            self.armed = Some(engine.generation());
            self.accum_ms = 0;
        }

        self.accum_ms = self.accum_ms.saturating_add(elapsed_ms);
        let mut ticks = 0;
        while self.accum_ms >= self.unit_ms {
            self.accum_ms -= self.unit_ms;
            if engine.tick() {
                ticks += 1;
            }
        }
        ticks
    }
}

impl Default for ClockDriver {
    fn default() -> Self {
        Self::new(CLOCK_UNIT_MS)
    }
}
