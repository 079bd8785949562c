//! Terminal input module.
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`map::Command`]s and tracks the keyboard
//! cursor on the card grid.

pub mod cursor;
pub mod map;

pub use memory_match_types as types;

pub use cursor::GridCursor;
pub use map::{handle_key_event, should_quit, Command, Direction};
