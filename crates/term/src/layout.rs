use crate::types::Difficulty;

/// Card grid shape for a difficulty (columns x rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    pub cols: u16,
    pub rows: u16,
}

impl GridShape {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self { cols: 4, rows: 3 },
            Difficulty::Medium => Self { cols: 4, rows: 4 },
            Difficulty::Hard => Self { cols: 6, rows: 4 },
        }
    }

    /// Shape that fits `count` cards, for decks without a known difficulty.
    pub fn for_count(count: usize) -> Self {
        let cols: u16 = if count > 16 { 6 } else { 4 };
        let rows = (count as u16).div_ceil(cols).max(1);
        Self { cols, rows }
    }

    pub fn cells(&self) -> usize {
        self.cols as usize * self.rows as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_hold_every_card() {
        for d in Difficulty::ALL {
            assert_eq!(GridShape::for_difficulty(d).cells(), d.card_count());
        }
    }

    #[test]
    fn for_count_rounds_up() {
        assert_eq!(GridShape::for_count(10), GridShape { cols: 4, rows: 3 });
        assert_eq!(GridShape::for_count(24), GridShape { cols: 6, rows: 4 });
        assert_eq!(GridShape::for_count(0), GridShape { cols: 4, rows: 1 });
    }
}
