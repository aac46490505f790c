//! Rectangle Run entry point
//!
//! Sets up logging, tuning and the terminal, then runs the frame loop until
//! the player quits.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use rectangle_run::Tuning;
use rectangle_run::driver::{FrameDriver, SystemClock, TimeSource};
use rectangle_run::renderer::Canvas;
use rectangle_run::sim::GameState;
use rectangle_run::term::{Keyboard, TerminalPresenter};

/// Environment variable fixing the platform layout seed
const SEED_ENV: &str = "RECTANGLE_RUN_SEED";

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Rectangle Run starting...");

    let tuning = Tuning::load();
    let seed = run_seed();

    let mut term = TerminalPresenter::new();
    if let Err(e) = term.enter() {
        let _ = term.exit();
        return Err(e).context("terminal initialization failed");
    }

    let result = run(&mut term, tuning, seed);

    // Always try to restore terminal state.
    let restored = term.exit();
    result.and(restored)
}

fn run_seed() -> u64 {
    if let Some(seed) = std::env::var(SEED_ENV).ok().and_then(|s| s.parse().ok()) {
        return seed;
    }
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn run(term: &mut TerminalPresenter, tuning: Tuning, seed: u64) -> Result<()> {
    let clock = SystemClock::new();
    let mut state = GameState::with_tuning(seed, tuning);
    let mut driver = FrameDriver::new(state.tuning.max_dt);
    let mut canvas = Canvas::new(state.tuning.field_width, state.tuning.field_height);
    let mut keyboard = Keyboard::new(term.key_release_events());
    let frame_sleep = Duration::from_millis(state.tuning.frame_sleep_ms);

    log::info!("Session seed: {seed}");

    loop {
        // Drain everything that arrived since the last frame.
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => keyboard.handle_key(key, clock.now_ms()),
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if keyboard.quit_requested() {
            log::info!("Quit requested");
            return Ok(());
        }

        let now = clock.now_ms();
        let input = keyboard.snapshot(now);
        driver.frame(&mut state, &input, now, &mut canvas);

        term.present(&mut canvas)?;
        std::thread::sleep(frame_sleep);
    }
}
