//! Game state and session lifecycle
//!
//! Everything a run needs lives in one `GameState` owned by the frame driver.

use super::platform::PlatformField;
use super::player::Player;
use super::rng::FieldRng;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Idle screen; platforms scroll, player holds the rest pose
    #[default]
    Title,
    /// A run is in progress
    Playing,
}

/// Phase transitions reported by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Title -> Playing
    RunStarted,
    /// Fell into the hazard
    Died { survived_ms: u64 },
    /// Manual reset during a run
    Reset { survived_ms: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    pub platforms: PlatformField,
    /// Current platform scroll speed (px/s)
    pub scroll_speed: f32,
    /// Timestamp (ms) at which the current run started
    pub run_started_ms: Option<u64>,
    /// Ticks simulated since the current run (or session) started
    pub time_ticks: u64,
    rng: FieldRng,
}

impl GameState {
    /// Create a session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = FieldRng::new(seed);
        let platforms = PlatformField::new(&tuning, &mut rng);
        let player = Player::new(&tuning);

        let mut state = Self {
            scroll_speed: tuning.base_scroll_speed,
            tuning,
            phase: GamePhase::Title,
            player,
            platforms,
            run_started_ms: None,
            time_ticks: 0,
            rng,
        };
        state.reset_run();
        state
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Milliseconds survived so far; zero outside of a run
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        match (self.phase, self.run_started_ms) {
            (GamePhase::Playing, Some(start)) => now_ms.saturating_sub(start),
            _ => 0,
        }
    }

    /// Re-center the player, restore base scroll speed, reshuffle platforms
    pub fn reset_run(&mut self) {
        self.player.center(&self.tuning);
        self.scroll_speed = self.tuning.base_scroll_speed;
        self.platforms.reshuffle(&self.tuning, &mut self.rng);
    }

    /// Title -> Playing
    pub fn start_run(&mut self, now_ms: u64) {
        self.phase = GamePhase::Playing;
        self.run_started_ms = Some(now_ms);
        self.time_ticks = 0;
    }

    /// Playing -> Title. Returns how long the run lasted.
    pub fn end_run(&mut self, now_ms: u64) -> u64 {
        let survived_ms = self.elapsed_ms(now_ms);
        self.reset_run();
        self.phase = GamePhase::Title;
        self.run_started_ms = None;
        survived_ms
    }

    /// Advance the platform field, ramping scroll speed while a run is active
    pub(crate) fn scroll_platforms(&mut self, dt: f32) -> usize {
        if self.phase == GamePhase::Playing {
            self.scroll_speed += self.tuning.scroll_accel * dt;
        }
        self.platforms
            .advance(dt, self.scroll_speed, &self.tuning, &mut self.rng)
    }
}
