//! Key mapping from terminal events to front-end commands.

use crate::types::{Difficulty, Intent};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Cursor movement on the card grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// What a key press asks the front end to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the grid cursor
    Move(Direction),
    /// Flip the card under the cursor
    Flip,
    /// Forward an intent that does not depend on the cursor
    Intent(Intent),
}

/// Map keyboard input to commands.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => {
            Some(Command::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => {
            Some(Command::Move(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Some(Command::Move(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => {
            Some(Command::Move(Direction::Down))
        }

        // Actions
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Flip),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Intent(Intent::TogglePause)),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Intent(Intent::Reset)),

        // Difficulty
        KeyCode::Char('1') => Some(start(Difficulty::Easy)),
        KeyCode::Char('2') => Some(start(Difficulty::Medium)),
        KeyCode::Char('3') => Some(start(Difficulty::Hard)),

        _ => None,
    }
}

fn start(difficulty: Difficulty) -> Command {
    Command::Intent(Intent::StartRound { difficulty })
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
