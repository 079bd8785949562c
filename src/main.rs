//! Memory Match runner (default binary).
//!
//! Plays in the terminal by default: crossterm input, a framebuffer renderer
//! and an async [`Session`] owning the round. `memory-match headless` runs the
//! JSON-lines harness on stdin/stdout instead.

use std::fs::File;
use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::broadcast::error::TryRecvError;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use memory_match::cli::{Args, Mode, USAGE};
use memory_match::core::DeckRng;
use memory_match::headless::Harness;
use memory_match::input::{handle_key_event, should_quit, Command, GridCursor};
use memory_match::session::{Session, SessionConfig};
use memory_match::term::{
    grid_shape, FrameBuffer, GameView, NoticeBoard, TerminalRenderer, ViewState, Viewport,
};
use memory_match::types::Intent;

fn main() -> Result<()> {
    let args = Args::parse(std::env::args().skip(1))?;
    let mut config = SessionConfig::from_env();
    args.apply(&mut config);

    match args.mode {
        Mode::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Mode::Headless => run_headless(config),
        Mode::Play => run_terminal(config),
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn run_headless(config: SessionConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .init();

    let seed = config.seed.unwrap_or_else(DeckRng::entropy_seed);
    let stdout = io::stdout();
    let mut harness = Harness::new(seed, config.timings, config.difficulty, stdout.lock())?;
    harness.run(io::stdin().lock())
}

fn run_terminal(config: SessionConfig) -> Result<()> {
    // The terminal owns stdout, so logs only go to a file.
    if let Some(path) = &config.log_path {
        let file = File::create(path).with_context(|| format!("creating log file {path}"))?;
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    }

    let rt = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    let session = {
        let _guard = rt.enter();
        Session::spawn(config.clone())?
    };

    let mut term = TerminalRenderer::new();
    let result = term.enter().and_then(|()| play(&mut term, session, &config, &rt));

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn play(
    term: &mut TerminalRenderer,
    mut session: Session,
    config: &SessionConfig,
    rt: &tokio::runtime::Runtime,
) -> Result<()> {
    let mut events = session.subscribe_events();
    let mut snapshots = session.snapshots();
    let mut snap = snapshots.borrow_and_update().clone();

    let view = GameView::new();
    let mut cursor = GridCursor::new();
    let mut notices = NoticeBoard::new();
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(w, h);

    let frame = Duration::from_millis(u64::from(config.frame_ms));
    let mut last_frame = Instant::now();

    loop {
        loop {
            match events.try_recv() {
                Ok(event) => notices.push(&event),
                Err(TryRecvError::Lagged(skipped)) => debug!(skipped, "event receiver lagged"),
                Err(_) => break,
            }
        }

        if snapshots.has_changed().context("session stopped")? {
            let next = snapshots.borrow_and_update().clone();
            if next.generation != snap.generation {
                cursor.reset();
            }
            snap = next;
        }

        let now = Instant::now();
        let elapsed = now.duration_since(last_frame).as_millis();
        notices.advance(u32::try_from(elapsed).unwrap_or(u32::MAX));
        last_frame = now;

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let state = ViewState {
            cursor: Some(cursor.card()),
            notice: notices.text(),
        };
        view.render_into(&snap, &state, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next frame.
        if !event::poll(frame)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    break;
                }
                let intent = match handle_key_event(key) {
                    Some(Command::Move(dir)) => {
                        let shape = grid_shape(&snap);
                        cursor.step(dir, shape.cols as usize, snap.cards.len());
                        None
                    }
                    Some(Command::Flip) => Some(Intent::Select { id: cursor.card() }),
                    Some(Command::Intent(intent)) => Some(intent),
                    None => None,
                };
                if let Some(intent) = intent {
                    if let Err(e) = session.try_send(intent) {
                        warn!(error = %e, ?intent, "intent dropped");
                    }
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }

    rt.block_on(session.shutdown())
}
