//! Animates extracted games as a grid of chess boards in the terminal.
//!
//! Every board advances to its next snapshot in lockstep on a fixed timer.
//! When the current batch of games runs out of moves, an intermission
//! screen is shown and the next batch starts, wrapping around at the end.

mod layout;
mod loader;
mod screen;

use std::env;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use tracing::info;

use layout::{GridLayout, BATCH_SIZE, GRID_COLS};
use loader::LoadedGame;
use screen::Screen;

/// Wall-clock interval between move advances.
const MOVE_INTERVAL: Duration = Duration::from_millis(100);
/// How long the intermission banner stays up between batches.
const INTERMISSION: Duration = Duration::from_secs(5);
/// Poll granularity for quit events.
const POLL_TIMEOUT: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let frames_dir = args.get(1).map(String::as_str).unwrap_or("output_moves");

    let games = loader::load_all_games(Path::new(frames_dir))?;
    if games.is_empty() {
        bail!("no frame files found in {}", frames_dir);
    }
    info!("loaded {} game(s) from {}", games.len(), frames_dir);

    let mut screen = Screen::new();
    screen.enter()?;

    let result = run(&mut screen, &games);

    // Always try to restore the terminal.
    let _ = screen.exit();
    result
}

fn run(screen: &mut Screen, games: &[LoadedGame]) -> Result<()> {
    let (term_w, term_h) = terminal::size().unwrap_or((80, 24));
    let layout = GridLayout::new(term_w, term_h);

    let mut batch_start = 0usize;
    let mut move_index = 0usize;
    let mut last_advance = Instant::now();

    screen.clear()?;
    loop {
        draw_batch(screen, &layout, games, batch_start, move_index)?;
        screen.flush()?;

        if poll_quit(POLL_TIMEOUT)? {
            return Ok(());
        }

        if last_advance.elapsed() >= MOVE_INTERVAL {
            move_index += 1;
            let max_plies = current_batch(games, batch_start)
                .iter()
                .map(|game| game.frames.len())
                .max()
                .unwrap_or(0);

            if move_index >= max_plies {
                if intermission(screen, term_w, term_h)? {
                    return Ok(());
                }
                move_index = 0;
                batch_start += BATCH_SIZE;
                if batch_start >= games.len() {
                    batch_start = 0;
                }
                screen.clear()?;
            }
            last_advance = Instant::now();
        }
    }
}

fn current_batch(games: &[LoadedGame], batch_start: usize) -> &[LoadedGame] {
    let end = (batch_start + BATCH_SIZE).min(games.len());
    &games[batch_start..end]
}

fn draw_batch(
    screen: &mut Screen,
    layout: &GridLayout,
    games: &[LoadedGame],
    batch_start: usize,
    move_index: usize,
) -> Result<()> {
    for (slot, game) in current_batch(games, batch_start).iter().enumerate() {
        if game.frames.is_empty() {
            continue;
        }
        let (x, y) = layout.board_origin(slot / GRID_COLS, slot % GRID_COLS);

        // Boards that ran out of moves hold their final position.
        let frame = &game.frames[move_index.min(game.frames.len() - 1)];
        screen.draw_board(x, y, layout, frame)?;
    }
    Ok(())
}

/// Shows the intermission banner; returns true if the user quit during it.
fn intermission(screen: &mut Screen, term_w: u16, term_h: u16) -> Result<bool> {
    screen.draw_intermission(term_w, term_h, "Finished")?;
    screen.flush()?;

    let deadline = Instant::now() + INTERMISSION;
    while Instant::now() < deadline {
        if poll_quit(POLL_TIMEOUT)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn poll_quit(timeout: Duration) -> Result<bool> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(false);
            }
            let ctrl_c = key.code == KeyCode::Char('c')
                && key.modifiers.contains(KeyModifiers::CONTROL);
            if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}
