//! GameView: maps a round snapshot into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Card, RoundPhase, RoundSnapshot};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::layout::GridShape;
use crate::types::CardId;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Front-end state drawn on top of the snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewState<'a> {
    /// Highlighted card, if the cursor should be shown.
    pub cursor: Option<CardId>,
    /// Toast line.
    pub notice: Option<&'a str>,
}

const CARD_W: u16 = 7;
const CARD_H: u16 = 3;
const GAP_X: u16 = 1;
/// Title + stats + blank line above the grid.
const HEADER_H: u16 = 3;
/// Blank + notice + help below the grid.
const FOOTER_H: u16 = 3;

const HELP: &str = "arrows move  enter flip  p pause  r reset  1/2/3 difficulty  q quit";

const BG: Rgb = Rgb::new(0, 0, 0);
const TEXT: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), BG);
const MUTED: CellStyle = CellStyle::new(Rgb::new(120, 120, 130), BG);
const TITLE: CellStyle = CellStyle::new(Rgb::new(200, 120, 220), BG).bold();
const CARD_BACK: CellStyle = CellStyle::new(Rgb::new(80, 120, 220), Rgb::new(20, 20, 40));
const CARD_FACE: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(40, 40, 60)).bold();
const CURSOR: CellStyle = CellStyle::new(Rgb::new(240, 220, 80), BG).bold();
const OVERLAY: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(30, 30, 40)).bold();

/// A lightweight terminal renderer for the card table.
#[derive(Debug, Clone, Default)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Render into an existing framebuffer (reused across frames).
    pub fn render_into(
        &self,
        snap: &RoundSnapshot,
        view: &ViewState<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let shape = grid_shape(snap);
        let grid_w = shape.cols * CARD_W + shape.cols.saturating_sub(1) * GAP_X;
        let grid_h = shape.rows * CARD_H;
        let content_h = HEADER_H + grid_h + FOOTER_H;

        let top = viewport.height.saturating_sub(content_h) / 2;
        let left = viewport.width.saturating_sub(grid_w) / 2;

        put_centered(fb, viewport.width, top, "MEMORY MASTER", TITLE);
        if snap.phase() == RoundPhase::Idle && snap.cards.is_empty() {
            put_centered(fb, viewport.width, top + 2, "press 1, 2 or 3 to start", TEXT);
            return;
        }
        put_centered(fb, viewport.width, top + 1, &stats_line(snap), TEXT);

        let grid_top = top + HEADER_H;
        for card in &snap.cards {
            let (x, y) = card_origin(shape, card.id);
            let highlighted = view.cursor == Some(card.id) && snap.phase() != RoundPhase::Won;
            draw_card(fb, left + x, grid_top + y, card, highlighted);
        }

        let footer = grid_top + grid_h + 1;
        if let Some(text) = view.notice {
            put_centered(fb, viewport.width, footer, text, TEXT);
        }
        put_centered(fb, viewport.width, footer + 1, HELP, MUTED);

        match snap.phase() {
            RoundPhase::Paused => {
                draw_modal(fb, viewport, &["PAUSED", "", "press p to resume"]);
            }
            RoundPhase::Won => {
                let moves = format!("Moves  {}", snap.move_count);
                let time = format!("Time  {}", format_clock(snap.elapsed_seconds));
                draw_modal(
                    fb,
                    viewport,
                    &["YOU WON!", "", &moves, &time, "", "press r to play again"],
                );
            }
            _ => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &RoundSnapshot,
        view: &ViewState<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, view, viewport, &mut fb);
        fb
    }
}

/// Grid shape used to lay out `snap`'s cards.
pub fn grid_shape(snap: &RoundSnapshot) -> GridShape {
    let shape = GridShape::for_difficulty(snap.difficulty);
    if shape.cells() == snap.cards.len() {
        shape
    } else {
        GridShape::for_count(snap.cards.len())
    }
}

/// Format seconds as `m:ss`.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

fn stats_line(snap: &RoundSnapshot) -> String {
    format!(
        "TIME {}   MOVES {}   PAIRS {}/{}   {}",
        format_clock(snap.elapsed_seconds),
        snap.move_count,
        snap.match_count,
        snap.pair_count,
        snap.difficulty.as_str().to_uppercase()
    )
}

fn card_origin(shape: GridShape, id: CardId) -> (u16, u16) {
    let cols = shape.cols.max(1) as usize;
    let (row, col) = ((id / cols) as u16, (id % cols) as u16);
    (col * (CARD_W + GAP_X), row * CARD_H)
}

fn draw_card(fb: &mut FrameBuffer, x: u16, y: u16, card: &Card, highlighted: bool) {
    let mid_x = x + CARD_W / 2;
    if card.is_matched {
        fb.put_char(mid_x, y + 1, '·', MUTED.dim());
        if highlighted {
            fb.draw_box(x, y, CARD_W, CARD_H, CURSOR);
        }
        return;
    }

    let body = if card.is_revealed { CARD_FACE } else { CARD_BACK };
    let face = if card.is_revealed { card.symbol.glyph() } else { '?' };
    fb.fill_rect(x + 1, y + 1, CARD_W - 2, CARD_H - 2, ' ', body);
    fb.put_char(mid_x, y + 1, face, body);
    let border = if highlighted {
        CURSOR
    } else {
        CellStyle { bg: BG, ..body }
    };
    fb.draw_box(x, y, CARD_W, CARD_H, border);
}

fn put_centered(fb: &mut FrameBuffer, width: u16, y: u16, text: &str, style: CellStyle) {
    let w = text.chars().count() as u16;
    fb.put_str(width.saturating_sub(w) / 2, y, text, style);
}

fn draw_modal(fb: &mut FrameBuffer, viewport: Viewport, lines: &[&str]) {
    let inner_w = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
    let w = inner_w + 6;
    let h = lines.len() as u16 + 4;
    let x = viewport.width.saturating_sub(w) / 2;
    let y = viewport.height.saturating_sub(h) / 2;

    fb.fill_rect(x, y, w, h, ' ', OVERLAY);
    fb.draw_box(x, y, w, h, OVERLAY);
    for (i, line) in lines.iter().enumerate() {
        let lw = line.chars().count() as u16;
        fb.put_str(x + (w - lw) / 2, y + 2 + i as u16, line, OVERLAY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_format_pads_seconds() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(600), "10:00");
    }

    #[test]
    fn card_origins_step_by_card_size() {
        let shape = GridShape { cols: 4, rows: 3 };
        assert_eq!(card_origin(shape, 0), (0, 0));
        assert_eq!(card_origin(shape, 1), (CARD_W + GAP_X, 0));
        assert_eq!(card_origin(shape, 4), (0, CARD_H));
    }
}
