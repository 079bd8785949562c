//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the memory-game rules and round state. It has **no
//! dependencies** on terminals, async runtimes or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical deals
//! - **Testable**: Deferred transitions run on virtual time
//! - **Portable**: Any front end (terminal, GUI, headless) drives it the same way
//!
//! # Module Structure
//!
//! - [`card`]: A single card and its reveal/match flags
//! - [`deck`]: Dealing paired symbols in uniformly random order
//! - [`rng`]: Seeded ChaCha RNG with a Fisher-Yates shuffle
//! - [`scheduler`]: Generation-tagged deferred tasks on virtual time
//! - [`engine`]: The round state machine and every player intent
//! - [`clock`]: Fixed-interval driver for the elapsed-time counter
//! - [`snapshot`]: Read-only copies of the round for renderers
//! - [`observer`]: Change-driven snapshot/event publishing
//!
//! # Round Lifecycle
//!
//! `Idle → Running → (Paused ⇄ Running) → Finishing → Won`
//!
//! - Revealing the second card of a pair queues its resolution: 500ms for a
//!   match, 1000ms for a mismatch
//! - The final match stops the round; the win flag follows 500ms later
//! - Dealing a new round cancels every queued task, and tasks tagged with an
//!   older generation are dropped if they ever come due
//!
//! # Example
//!
//! ```
//! use memory_match_core::{ClockDriver, GameEngine};
//! use memory_match_types::{Difficulty, Intent, Timings};
//!
//! let mut game = GameEngine::new(12345, Timings::default());
//! game.start_round(Difficulty::Easy);
//!
//! game.apply(Intent::Select { id: 0 });
//! assert_eq!(game.move_count(), 1);
//!
//! // Frame time drives both deferred transitions and the clock.
//! let mut clock = ClockDriver::for_engine(&game);
//! game.advance(1000);
//! clock.advance(&mut game, 1000);
//! assert_eq!(game.elapsed_seconds(), 1);
//! ```

pub mod card;
pub mod clock;
pub mod deck;
pub mod engine;
pub mod observer;
pub mod rng;
pub mod scheduler;
pub mod snapshot;

pub use memory_match_types as types;

// Re-export commonly used types for convenience
pub use card::Card;
pub use clock::ClockDriver;
pub use deck::{build_deck, build_deck_into};
pub use engine::GameEngine;
pub use observer::{Publisher, RoundObserver};
pub use rng::DeckRng;
pub use scheduler::{Deferred, Scheduler};
pub use snapshot::{RoundPhase, RoundSnapshot};
