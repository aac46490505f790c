//! Per-frame simulation step
//!
//! Applies the frame's edge-triggered inputs, scrolls the platform field (in
//! every phase), then runs player kinematics while a run is active.

use super::player::{Contact, MoveInput};
use super::state::{GameEvent, GamePhase, GameState};
use crate::format_run_time;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held: move left
    pub left: bool,
    /// Held: move right
    pub right: bool,
    /// Edge: start a run from the title screen
    pub start: bool,
    /// Edge: jump
    pub jump: bool,
    /// Edge: abandon the run and return to the title screen
    pub reset: bool,
}

impl TickInput {
    fn movement(&self) -> MoveInput {
        MoveInput {
            left: self.left,
            right: self.right,
        }
    }
}

/// Advance the game state by one frame of `dt` seconds.
///
/// `now_ms` is the time source reading for this frame; it only feeds the run
/// clock. Returns the phase transition that happened this tick, if any.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, now_ms: u64) -> Option<GameEvent> {
    let mut event = None;

    match state.phase {
        GamePhase::Title => {
            if input.start {
                state.start_run(now_ms);
                log::info!("Run started (seed {})", state.seed());
                event = Some(GameEvent::RunStarted);
            }
        }
        GamePhase::Playing => {
            if input.jump && state.player.jump(state.tuning.jump_velocity) {
                log::trace!("Jump from y={:.1}", state.player.pos.y);
            }
            if input.reset {
                let ticks = state.time_ticks;
                let survived_ms = state.end_run(now_ms);
                log::info!("Run reset after {} ({ticks} ticks)", format_run_time(survived_ms));
                event = Some(GameEvent::Reset { survived_ms });
            }
        }
    }

    state.time_ticks += 1;
    state.scroll_platforms(dt);

    match state.phase {
        GamePhase::Playing => {
            let contact = state
                .player
                .step(input.movement(), dt, &state.platforms, &state.tuning);
            if contact == Contact::Died {
                let ticks = state.time_ticks;
                let survived_ms = state.end_run(now_ms);
                log::info!("Hit the spikes after {} ({ticks} ticks)", format_run_time(survived_ms));
                event = Some(GameEvent::Died { survived_ms });
            }
        }
        GamePhase::Title => {
            state.player.center(&state.tuning);
        }
    }

    event
}
