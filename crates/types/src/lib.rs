//! Core types module - shared data structures and constants
//!
//! This module defines the vocabulary shared by the game core, the terminal
//! front end and the headless harness. Everything here is plain data.
//!
//! # Difficulty
//!
//! | Difficulty | Pairs | Cards |
//! |------------|-------|-------|
//! | Easy       | 6     | 12    |
//! | Medium     | 8     | 16    |
//! | Hard       | 12    | 24    |
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MATCH_DELAY_MS` | 500 | Revealed pair stays up before a match is applied |
//! | `MISMATCH_DELAY_MS` | 1000 | Revealed pair stays up before flipping back |
//! | `WIN_DELAY_MS` | 500 | Last match to win flag |
//! | `CLOCK_UNIT_MS` | 1000 | One elapsed-time unit (one second) |
//! | `FRAME_MS` | 16 | Front-end frame interval (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use memory_match_types::{Difficulty, Intent, Symbol};
//!
//! let d = Difficulty::from_str("Hard").unwrap();
//! assert_eq!(d.pair_count(), 12);
//! assert_eq!(d.card_count(), 24);
//!
//! assert_eq!(Symbol::new(0).unwrap().glyph(), 'A');
//! assert_eq!(Intent::from_str("reset"), Some(Intent::Reset));
//! ```

use serde::{Deserialize, Serialize};

/// Delay before a matching pair is marked matched (500ms).
pub const MATCH_DELAY_MS: u32 = 500;

/// Delay before a mismatched pair is hidden again (1000ms).
pub const MISMATCH_DELAY_MS: u32 = 1000;

/// Delay between the final match and the win flag (500ms).
pub const WIN_DELAY_MS: u32 = 500;

/// One elapsed-time unit as seen by the clock driver.
pub const CLOCK_UNIT_MS: u32 = 1000;

/// Front-end frame interval (16ms ≈ 60 FPS).
pub const FRAME_MS: u32 = 16;

/// Number of distinct symbols available to a deck.
pub const ALPHABET_LEN: usize = 16;

const EMOJI: [&str; ALPHABET_LEN] = [
    "🎮", "🎯", "🎪", "🎨", "🎭", "🎸", "🎺", "🎻",
    "🎲", "🎰", "🚀", "🛸", "🌟", "⭐", "💎", "🔮",
];

/// Stable per-round card identifier (the card's index in the dealt deck).
pub type CardId = usize;

/// One entry of the symbol alphabet.
///
/// Symbols are opaque tokens; two cards match when their symbols are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(u8);

impl Symbol {
    /// Build a symbol from its alphabet index.
    pub fn new(index: usize) -> Option<Self> {
        if index < ALPHABET_LEN {
            Some(Symbol(index as u8))
        } else {
            None
        }
    }

    /// The first `n` symbols of the alphabet (clamped to the alphabet size).
    pub fn first(n: usize) -> impl Iterator<Item = Symbol> {
        (0..n.min(ALPHABET_LEN)).map(|i| Symbol(i as u8))
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Emoji face, as shown by graphical front ends.
    pub fn emoji(&self) -> &'static str {
        EMOJI[self.index()]
    }

    /// Single-column face for terminals (`A`..`P`).
    pub fn glyph(&self) -> char {
        (b'A' + self.0) as char
    }
}

/// Round difficulty
///
/// Each variant fixes the number of pairs dealt. How the cards are laid out on
/// screen is up to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Number of symbol pairs dealt for this difficulty.
    pub fn pair_count(&self) -> usize {
        match self {
            Difficulty::Easy => 6,
            Difficulty::Medium => 8,
            Difficulty::Hard => 12,
        }
    }

    pub fn card_count(&self) -> usize {
        self.pair_count() * 2
    }

    /// Parse difficulty from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use memory_match_types::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_str("easy"), Some(Difficulty::Easy));
    /// assert_eq!(Difficulty::from_str("M"), Some(Difficulty::Medium));
    /// assert_eq!(Difficulty::from_str("insane"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "e" => Some(Difficulty::Easy),
            "medium" | "m" => Some(Difficulty::Medium),
            "hard" | "h" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Player intents forwarded into the engine.
///
/// These are produced by the terminal key map, the headless harness and any
/// other front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    /// Reveal the card with this id
    Select { id: CardId },
    /// Pause or resume the running round
    TogglePause,
    /// Discard the current round and deal a new one
    StartRound { difficulty: Difficulty },
    /// Deal a new round at the current difficulty
    Reset,
}

impl Intent {
    /// Parse the argument-free intents from their short names.
    ///
    /// `select` and `start` carry data and are not parsed here.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pause" | "resume" | "toggle_pause" => Some(Intent::TogglePause),
            "reset" | "restart" => Some(Intent::Reset),
            _ => None,
        }
    }
}

/// Informational notifications emitted by the engine.
///
/// Front ends may ignore any of these; the snapshot alone is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    RoundStarted {
        difficulty: Difficulty,
        pair_count: usize,
    },
    MatchFound {
        symbol: Symbol,
    },
    GamePaused,
    GameResumed,
    GameWon {
        moves: u32,
        elapsed_seconds: u32,
    },
}

/// Deferred-transition timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    pub match_delay_ms: u32,
    pub mismatch_delay_ms: u32,
    pub win_delay_ms: u32,
    pub clock_unit_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            match_delay_ms: MATCH_DELAY_MS,
            mismatch_delay_ms: MISMATCH_DELAY_MS,
            win_delay_ms: WIN_DELAY_MS,
            clock_unit_ms: CLOCK_UNIT_MS,
        }
    }
}

impl Timings {
    /// Zero delays (useful for scripted play and benchmarks).
    pub fn immediate() -> Self {
        Self {
            match_delay_ms: 0,
            mismatch_delay_ms: 0,
            win_delay_ms: 0,
            clock_unit_ms: CLOCK_UNIT_MS,
        }
    }

    /// Enforce `mismatch_delay_ms >= match_delay_ms` and a non-zero clock unit.
    pub fn normalized(self) -> Self {
        Self {
            mismatch_delay_ms: self.mismatch_delay_ms.max(self.match_delay_ms),
            clock_unit_ms: self.clock_unit_ms.max(1),
            ..self
        }
    }
}
