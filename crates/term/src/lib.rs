//! Terminal front end for the memory-match table.
//!
//! Rendering goes snapshot -> [`FrameBuffer`] -> diffed crossterm output.
//! Everything except [`TerminalRenderer`] is pure and testable without a tty.

pub mod fb;
pub mod game_view;
pub mod layout;
pub mod notice;
pub mod renderer;

pub use memory_match_core as core;
pub use memory_match_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{format_clock, grid_shape, GameView, ViewState, Viewport};
pub use layout::GridShape;
pub use notice::{NoticeBoard, NOTICE_TTL_MS};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, TerminalRenderer};
