//! Short-lived status messages ("toasts") derived from game events.

use crate::types::GameEvent;

/// How long a notice stays on screen.
pub const NOTICE_TTL_MS: u32 = 2000;

#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    text: String,
    remaining_ms: u32,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current notice with the message for `event`.
    pub fn push(&mut self, event: &GameEvent) {
        self.text = message_for(event);
        self.remaining_ms = NOTICE_TTL_MS;
    }

    pub fn advance(&mut self, elapsed_ms: u32) {
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
    }

    pub fn text(&self) -> Option<&str> {
        (self.remaining_ms > 0).then_some(self.text.as_str())
    }
}

pub fn message_for(event: &GameEvent) -> String {
    match event {
        GameEvent::RoundStarted { pair_count, .. } => {
            format!("Game started! Find {} pairs!", pair_count)
        }
        GameEvent::MatchFound { symbol } => format!("Match found! {}", symbol.glyph()),
        GameEvent::GamePaused => "Game paused!".to_string(),
        GameEvent::GameResumed => "Game resumed!".to_string(),
        GameEvent::GameWon { moves, .. } => format!("You won in {} moves!", moves),
    }
}
