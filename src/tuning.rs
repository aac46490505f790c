//! Game balance and field geometry
//!
//! Loaded once at startup. Every field falls back to the value in
//! [`crate::consts`], so an override file only needs the keys it changes.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Environment variable naming a JSON tuning override file
pub const TUNING_ENV: &str = "RECTANGLE_RUN_TUNING";

/// All tunable gameplay parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: i32,
    pub field_height: i32,
    pub spike_height: i32,

    pub player_width: i32,
    pub player_height: i32,
    pub move_speed: f32,
    pub gravity: f32,
    pub jump_velocity: f32,

    pub base_scroll_speed: f32,
    pub scroll_accel: f32,

    pub platform_count: usize,
    pub platform_min_width: i32,
    pub platform_max_width: i32,
    pub respawn_y_min: i32,
    pub respawn_y_max: i32,
    pub ride_tolerance: i32,

    pub max_dt: f32,
    pub frame_sleep_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            spike_height: SPIKE_H,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            move_speed: MOVE_SPEED,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,

            base_scroll_speed: BASE_SCROLL_SPEED,
            scroll_accel: SCROLL_ACCEL,

            platform_count: PLATFORM_COUNT,
            platform_min_width: PLATFORM_MIN_WIDTH,
            platform_max_width: PLATFORM_MAX_WIDTH,
            respawn_y_min: RESPAWN_Y_MIN,
            respawn_y_max: RESPAWN_Y_MAX,
            ride_tolerance: RIDE_TOLERANCE,

            max_dt: MAX_DT,
            frame_sleep_ms: FRAME_SLEEP_MS,
        }
    }
}

impl Tuning {
    /// Y coordinate of the hazard strip's top edge (the death line)
    #[inline]
    pub fn hazard_top(&self) -> i32 {
        self.field_height - self.spike_height
    }

    /// Player size as a vector
    #[inline]
    pub fn player_size(&self) -> Vec2 {
        Vec2::new(self.player_width as f32, self.player_height as f32)
    }

    /// Idle pose: horizontally centered, feet on the hazard top
    pub fn rest_position(&self) -> Vec2 {
        Vec2::new(
            (self.field_width / 2 - self.player_width / 2) as f32,
            (self.hazard_top() - self.player_height) as f32,
        )
    }

    /// Parse a tuning override from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Load tuning from the file named by `RECTANGLE_RUN_TUNING`, if any
    pub fn load() -> Self {
        match std::env::var_os(TUNING_ENV) {
            Some(path) => Self::load_from(Path::new(&path)),
            None => {
                log::info!("Using default tuning");
                Self::default()
            }
        }
    }

    /// Load tuning from a JSON file, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read tuning file {}: {e}", path.display());
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Pull out-of-range values back to something the simulation can run with
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if self.field_width <= 0 || self.field_height <= 0 {
            log::warn!("Non-positive field size, using {FIELD_WIDTH}x{FIELD_HEIGHT}");
            self.field_width = defaults.field_width;
            self.field_height = defaults.field_height;
        }
        if self.spike_height < 0 || self.spike_height >= self.field_height {
            log::warn!("Spike height {} out of range", self.spike_height);
            self.spike_height = defaults.spike_height.min(self.field_height / 2);
        }
        if self.player_width <= 0 || self.player_width > self.field_width {
            self.player_width = defaults.player_width.min(self.field_width);
        }
        if self.player_height <= 0 || self.player_height > self.hazard_top() {
            self.player_height = defaults.player_height.min(self.hazard_top());
        }
        if self.platform_count == 0 {
            log::warn!("Platform count must be positive");
            self.platform_count = defaults.platform_count;
        }
        self.platform_max_width = self.platform_max_width.min(self.field_width);
        if self.platform_min_width <= 0 || self.platform_min_width >= self.platform_max_width {
            log::warn!(
                "Platform width range [{}, {}) is empty",
                self.platform_min_width,
                self.platform_max_width
            );
            self.platform_min_width = 1;
            self.platform_max_width = self.platform_max_width.max(2);
        }
        if self.respawn_y_min >= self.respawn_y_max {
            self.respawn_y_min = defaults.respawn_y_min;
            self.respawn_y_max = defaults.respawn_y_max;
        }
        if !(self.max_dt > 0.0) {
            self.max_dt = defaults.max_dt;
        }
        self.max_dt = self.max_dt.min(1.0);

        self.move_speed = clamp_rate("move_speed", self.move_speed, 0.0, MAX_RATE, defaults.move_speed);
        self.gravity = clamp_rate("gravity", self.gravity, 0.0, MAX_RATE, defaults.gravity);
        self.jump_velocity =
            clamp_rate("jump_velocity", self.jump_velocity, -MAX_RATE, 0.0, defaults.jump_velocity);
        self.base_scroll_speed = clamp_rate(
            "base_scroll_speed",
            self.base_scroll_speed,
            0.0,
            MAX_RATE,
            defaults.base_scroll_speed,
        );
        self.scroll_accel =
            clamp_rate("scroll_accel", self.scroll_accel, 0.0, MAX_RATE, defaults.scroll_accel);

        if !(0..=MAX_RIDE_TOLERANCE).contains(&self.ride_tolerance) {
            log::warn!("Ride tolerance {} out of range", self.ride_tolerance);
            self.ride_tolerance = self.ride_tolerance.clamp(0, MAX_RIDE_TOLERANCE);
        }

        self
    }
}

/// Upper bound for speeds and accelerations (px/s, px/s²)
const MAX_RATE: f32 = 10_000.0;
const MAX_RIDE_TOLERANCE: i32 = 32;

/// Clamp a rate into `[lo, hi]`; non-finite values take the default
fn clamp_rate(name: &str, value: f32, lo: f32, hi: f32, default: f32) -> f32 {
    if !value.is_finite() {
        log::warn!("Tuning {name} is not finite, using {default}");
        return default;
    }
    if value < lo || value > hi {
        let clamped = value.clamp(lo, hi);
        log::warn!("Tuning {name} = {value} out of range, using {clamped}");
        return clamped;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let t = Tuning::default();
        assert_eq!(t.hazard_top(), FIELD_HEIGHT - SPIKE_H);
        assert_eq!(t.rest_position(), Vec2::new(139.0, 266.0));
    }

    #[test]
    fn test_partial_override() {
        let t = Tuning::from_json(r#"{ "gravity": 900.0, "platform_count": 8 }"#).unwrap();
        assert_eq!(t.gravity, 900.0);
        assert_eq!(t.platform_count, 8);
        assert_eq!(t.move_speed, MOVE_SPEED);
    }

    #[test]
    fn test_sanitize_bad_widths() {
        let t = Tuning::from_json(r#"{ "platform_min_width": 80, "platform_max_width": 40 }"#)
            .unwrap();
        assert!(t.platform_min_width < t.platform_max_width);
        assert!(t.platform_max_width <= t.field_width);
    }

    #[test]
    fn test_sanitize_clamps_rates() {
        let t = Tuning::from_json(
            r#"{ "base_scroll_speed": 1e12, "scroll_accel": -5.0, "gravity": 1e30,
                 "move_speed": -1.0, "jump_velocity": 400.0, "ride_tolerance": -3 }"#,
        )
        .unwrap();
        assert_eq!(t.base_scroll_speed, MAX_RATE);
        assert_eq!(t.scroll_accel, 0.0);
        assert_eq!(t.gravity, MAX_RATE);
        assert_eq!(t.move_speed, 0.0);
        assert_eq!(t.jump_velocity, 0.0);
        assert_eq!(t.ride_tolerance, 0);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let t = Tuning::load_from(Path::new("/definitely/not/here.json"));
        assert_eq!(t, Tuning::default());
    }
}
