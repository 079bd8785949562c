//! Grid cursor for keyboard card selection.

use crate::map::Direction;
use crate::types::CardId;

/// Position of the highlighted card in a row-major grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridCursor {
    index: usize,
}

impl GridCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Card under the cursor.
    pub fn card(&self) -> CardId {
        self.index
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Move one cell in `dir`, clamped to a grid of `cols` columns holding
    /// `len` cards.
    pub fn step(&mut self, dir: Direction, cols: usize, len: usize) {
        if cols == 0 || len == 0 {
            self.index = 0;
            return;
        }
        let idx = self.index.min(len - 1);
        let (row, col) = (idx / cols, idx % cols);

        self.index = match dir {
            Direction::Left if col > 0 => idx - 1,
            Direction::Right if col + 1 < cols && idx + 1 < len => idx + 1,
            Direction::Up if row > 0 => idx - cols,
            Direction::Down if idx + cols < len => idx + cols,
            _ => idx,
        };
    }
}
