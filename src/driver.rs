//! Frame driver
//!
//! Turns wall-clock readings into clamped time steps and sequences one frame:
//! tick the simulation, compose the picture, refresh the window title.

use std::time::Instant;

use crate::renderer::{RenderSink, TitleClock, draw_frame};
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// Monotonic millisecond clock
pub trait TimeSource {
    fn now_ms(&self) -> u64;
}

/// `Instant`-backed clock counting from its creation
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Converts successive timestamps into a time step, clamped to `max_dt`.
///
/// The clamp keeps a stall (breakpoint, suspended terminal) from turning into
/// one enormous physics step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<u64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Seconds since the previous call (zero on the first call)
    pub fn step(&mut self, now_ms: u64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => now_ms.saturating_sub(last) as f32 * 0.001,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt.min(self.max_dt)
    }
}

/// Owns the per-frame bookkeeping that is not part of the game state
#[derive(Debug, Clone)]
pub struct FrameDriver {
    clock: FrameClock,
    title: TitleClock,
}

impl FrameDriver {
    pub fn new(max_dt: f32) -> Self {
        Self {
            clock: FrameClock::new(max_dt),
            title: TitleClock::new(),
        }
    }

    /// Run one frame: step, tick, render
    pub fn frame<S: RenderSink + ?Sized>(
        &mut self,
        state: &mut GameState,
        input: &TickInput,
        now_ms: u64,
        sink: &mut S,
    ) -> Option<GameEvent> {
        let dt = self.clock.step(now_ms);
        let event = tick(state, input, dt, now_ms);

        draw_frame(sink, state, now_ms);
        if let Some(title) = self.title.update(state.elapsed_ms(now_ms)) {
            sink.set_title(&title);
        }

        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Canvas;
    use crate::sim::GamePhase;
    use std::cell::Cell;

    /// Hand-advanced clock
    struct ManualClock(Cell<u64>);

    impl ManualClock {
        fn advance(&self, ms: u64) {
            self.0.set(self.0.get() + ms);
        }
    }

    impl TimeSource for ManualClock {
        fn now_ms(&self) -> u64 {
            self.0.get()
        }
    }

    #[test]
    fn test_frame_clock_first_step_is_zero() {
        let mut clock = FrameClock::new(0.033);
        assert_eq!(clock.step(1_000), 0.0);
        assert!((clock.step(1_016) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_frame_clock_clamps_stalls() {
        let mut clock = FrameClock::new(0.033);
        clock.step(0);
        assert_eq!(clock.step(5_000), 0.033);
        // Time going backwards is treated as no time
        assert_eq!(clock.step(4_000), 0.0);
    }

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }

    #[test]
    fn test_driver_runs_a_session() {
        let clock = ManualClock(Cell::new(0));
        let mut state = GameState::new(21);
        let mut driver = FrameDriver::new(state.tuning.max_dt);
        let mut canvas = Canvas::new(state.tuning.field_width, state.tuning.field_height);

        driver.frame(&mut state, &TickInput::default(), clock.now_ms(), &mut canvas);
        assert_eq!(
            canvas.take_title().as_deref(),
            Some("Rectangle Run - Time: 0:00")
        );

        clock.advance(16);
        let start = TickInput {
            start: true,
            ..Default::default()
        };
        let event = driver.frame(&mut state, &start, clock.now_ms(), &mut canvas);
        assert_eq!(event, Some(GameEvent::RunStarted));
        assert_eq!(state.phase, GamePhase::Playing);

        for _ in 0..70 {
            clock.advance(16);
            driver.frame(&mut state, &TickInput::default(), clock.now_ms(), &mut canvas);
        }
        assert_eq!(state.elapsed_ms(clock.now_ms()), 70 * 16);
        assert_eq!(
            canvas.take_title().as_deref(),
            Some("Rectangle Run - Time: 0:01")
        );
    }
}
