//! Terminal gridfall runner (default binary).
//!
//! Single-threaded frame loop: render, wait for input until the next tick
//! boundary, then advance the game one tick. Held keys re-issue their
//! commands every frame; the engine's cooldowns decide when they land.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use gridfall::core::{Game, GameEvent};
use gridfall::input::{handle_key_event, should_quit, HeldKeys};
use gridfall::store::{now_stamp, JsonScoreStore};
use gridfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use gridfall::types::{Command, GameConfig, TICK_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1);
    let mut game = Game::new(GameConfig::default(), seed);

    let store = JsonScoreStore::default_path();
    // A missing or unreadable score file means a fresh start, not a crash.
    let mut scores = store.load().unwrap_or_default();

    let view = GameView::default();
    let mut held = HeldKeys::new();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&game.snapshot(), &scores, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        held.press(key.code);
                        if let Some(cmd) = handle_key_event(key) {
                            if game.apply(cmd) && cmd == Command::Restart {
                                held.reset();
                            }
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Terminal auto-repeat only refreshes the held state;
                        // the engine cooldowns own the repeat rate.
                        held.press(key.code);
                    }
                    KeyEventKind::Release => {
                        held.release(key.code);
                    }
                },
                Event::Resize(_, _) => {
                    term.invalidate();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            held.poll();
            if held.left() {
                game.apply(Command::MoveLeft);
            }
            if held.right() {
                game.apply(Command::MoveRight);
            }
            if held.rotate() {
                game.apply(Command::RotateCw);
            }

            game.tick(TICK_MS, held.soft_drop());

            if let Some(GameEvent::GameOver { final_score }) = game.take_last_event() {
                scores.record(final_score, now_stamp());
                // Losing the score file is not worth interrupting play.
                let _ = store.save(&scores);
            }
        }
    }
}
