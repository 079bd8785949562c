use serde::{Deserialize, Serialize};

use crate::types::{CardId, Symbol};

/// A single card on the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub symbol: Symbol,
    pub is_revealed: bool,
    pub is_matched: bool,
}

impl Card {
    /// Create a face-down card
    pub fn new(id: CardId, symbol: Symbol) -> Self {
        Self {
            id,
            symbol,
            is_revealed: false,
            is_matched: false,
        }
    }

    /// Face-down and not yet matched.
    pub fn is_selectable(&self) -> bool {
        !self.is_revealed && !self.is_matched
    }
}
