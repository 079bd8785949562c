use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::types::{CardId, Difficulty};

/// Coarse lifecycle position of a round, derived from its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    /// No round dealt yet
    Idle,
    Running,
    Paused,
    /// Every pair is matched; the win flag is pending
    Finishing,
    Won,
}

/// Read-only copy of the current round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub generation: u64,
    pub revision: u64,
    pub difficulty: Difficulty,
    pub cards: Vec<Card>,
    pub selection: ArrayVec<CardId, 2>,
    pub move_count: u32,
    pub match_count: u32,
    pub pair_count: u32,
    pub elapsed_seconds: u32,
    pub is_running: bool,
    pub is_paused: bool,
    pub is_won: bool,
}

impl RoundSnapshot {
    pub fn clear(&mut self) {
        self.generation = 0;
        self.revision = 0;
        self.difficulty = Difficulty::default();
        self.cards.clear();
        self.selection.clear();
        self.move_count = 0;
        self.match_count = 0;
        self.pair_count = 0;
        self.elapsed_seconds = 0;
        self.is_running = false;
        self.is_paused = false;
        self.is_won = false;
    }

    pub fn phase(&self) -> RoundPhase {
        if self.is_won {
            RoundPhase::Won
        } else if self.is_running && self.is_paused {
            RoundPhase::Paused
        } else if self.is_running {
            RoundPhase::Running
        } else if self.pair_count > 0 && self.match_count == self.pair_count {
            RoundPhase::Finishing
        } else {
            RoundPhase::Idle
        }
    }

    /// Whether a select intent could currently take effect.
    pub fn accepts_selection(&self) -> bool {
        self.is_running && !self.is_paused && self.selection.len() < 2
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id)
    }
}

impl Default for RoundSnapshot {
    fn default() -> Self {
        Self {
            generation: 0,
            revision: 0,
            difficulty: Difficulty::default(),
            cards: Vec::new(),
            selection: ArrayVec::new(),
            move_count: 0,
            match_count: 0,
            pair_count: 0,
            elapsed_seconds: 0,
            is_running: false,
            is_paused: false,
            is_won: false,
        }
    }
}
