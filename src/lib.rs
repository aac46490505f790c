//! Rectangle Run - a falling-platform survival arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (platform scroll, player physics, game phases)
//! - `renderer`: Render sink abstraction, frame composition, HUD digits
//! - `driver`: Frame clock and per-frame update/render sequencing
//! - `term`: Terminal frontend (canvas presenter, keyboard state)
//! - `tuning`: Data-driven game balance

pub mod driver;
pub mod renderer;
pub mod sim;
pub mod term;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (pixels)
    pub const FIELD_WIDTH: i32 = 300;
    pub const FIELD_HEIGHT: i32 = 300;

    /// Height of the hazard strip along the bottom edge
    pub const SPIKE_H: i32 = 12;

    /// Player rectangle size
    pub const PLAYER_WIDTH: i32 = 22;
    pub const PLAYER_HEIGHT: i32 = 22;

    /// Horizontal speed while a direction is held (px/s)
    pub const MOVE_SPEED: f32 = 120.0;
    /// Downward acceleration (px/s²)
    pub const GRAVITY: f32 = 600.0;
    /// Launch velocity (negative = up)
    pub const JUMP_VELOCITY: f32 = -260.0;

    /// Platform scroll speed at the start of a run (px/s, downward)
    pub const BASE_SCROLL_SPEED: f32 = 80.0;
    /// Scroll speed ramp while playing (px/s²)
    pub const SCROLL_ACCEL: f32 = 3.0;

    /// Platform defaults
    pub const PLATFORM_COUNT: usize = 24;
    pub const PLATFORM_HEIGHT: i32 = 10;
    pub const PLATFORM_MIN_WIDTH: i32 = 30;
    pub const PLATFORM_MAX_WIDTH: i32 = 65;
    /// Respawn band above the field for recycled platforms
    pub const RESPAWN_Y_MIN: i32 = -80;
    pub const RESPAWN_Y_MAX: i32 = -10;

    /// Max vertical gap (px) between feet and ridden platform before detaching
    pub const RIDE_TOLERANCE: i32 = 2;

    /// Largest time step a single frame may simulate (seconds)
    pub const MAX_DT: f32 = 0.033;
    /// Fixed pacing sleep between frames
    pub const FRAME_SLEEP_MS: u64 = 16;
}

/// Split whole seconds into (minutes, seconds)
#[inline]
pub fn minutes_seconds(total_seconds: u64) -> (u64, u64) {
    (total_seconds / 60, total_seconds % 60)
}

/// Format a run duration as `M:SS`
pub fn format_run_time(elapsed_ms: u64) -> String {
    let (mm, ss) = minutes_seconds(elapsed_ms / 1000);
    format!("{mm}:{ss:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_run_time() {
        assert_eq!(format_run_time(0), "0:00");
        assert_eq!(format_run_time(9_999), "0:09");
        assert_eq!(format_run_time(61_000), "1:01");
        assert_eq!(format_run_time(3_600_000), "60:00");
    }
}
