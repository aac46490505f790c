//! Player kinematics
//!
//! One call to [`Player::step`] integrates a Playing tick: horizontal input,
//! gravity, wall clamp, hazard crossing, hazard floor clamp, riding and
//! landing. Order matters: the hazard crossing must be tested before the floor
//! clamp pulls the player back onto the hazard top.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::platform::{PlatformField, PlatformHandle};
use super::rect::PixelRect;
use super::sweep::{crossed_hazard, crossed_platform_top, near_surface, overlaps_horizontally};
use crate::tuning::Tuning;

/// Held horizontal inputs for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub left: bool,
    pub right: bool,
}

/// What the player is standing on after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Fell into the hazard; no further physics ran this tick
    Died,
    /// Clamped onto the hazard top without crossing it
    Floor,
    /// Standing on a platform
    Riding(PlatformHandle),
    /// In the air
    Airborne,
}

/// The player-controlled rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner (sub-pixel)
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Touching a standing surface (platform or hazard floor)
    pub grounded: bool,
    /// Platform the player is riding; implies `grounded`
    pub riding: Option<PlatformHandle>,
}

impl Player {
    /// A player in the idle pose
    pub fn new(tuning: &Tuning) -> Self {
        let mut player = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: tuning.player_size(),
            grounded: true,
            riding: None,
        };
        player.center(tuning);
        player
    }

    /// Reset to the idle pose: centered, feet on the hazard top, at rest
    pub fn center(&mut self, tuning: &Tuning) {
        self.pos = tuning.rest_position();
        self.vel = Vec2::ZERO;
        self.grounded = true;
        self.riding = None;
    }

    /// Y of the bottom edge
    #[inline]
    pub fn feet(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Whole-pixel rectangle used for overlap tests and drawing
    pub fn rect(&self) -> PixelRect {
        PixelRect::new(
            self.pos.x as i32,
            self.pos.y as i32,
            self.size.x as i32,
            self.size.y as i32,
        )
    }

    pub fn can_jump(&self) -> bool {
        self.grounded || self.riding.is_some()
    }

    /// Launch upward if standing on something. Returns whether the jump happened.
    pub fn jump(&mut self, jump_velocity: f32) -> bool {
        if !self.can_jump() {
            return false;
        }
        self.vel.y = jump_velocity;
        self.grounded = false;
        self.riding = None;
        true
    }

    /// Advance one Playing tick against the current platform layout
    pub fn step(
        &mut self,
        input: MoveInput,
        dt: f32,
        field: &PlatformField,
        tuning: &Tuning,
    ) -> Contact {
        // Right is applied after left, so holding both cancels out
        self.vel.x = 0.0;
        if input.left {
            self.vel.x -= tuning.move_speed;
        }
        if input.right {
            self.vel.x += tuning.move_speed;
        }

        let prev_feet = self.feet();

        // No gravity while riding: the platform carries us
        if self.riding.is_none() {
            self.vel.y += tuning.gravity * dt;
        }
        self.pos += self.vel * dt;

        // Walls clamp position only
        let max_x = (tuning.field_width as f32 - self.size.x).max(0.0);
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
        }
        if self.pos.x > max_x {
            self.pos.x = max_x;
        }

        let hazard_top = tuning.hazard_top() as f32;
        if crossed_hazard(prev_feet, self.feet(), self.vel.y, hazard_top) {
            return Contact::Died;
        }

        self.grounded = false;

        // Catch-all for anything below the hazard top that did not cross it this tick
        if self.feet() >= hazard_top {
            self.pos.y = hazard_top - self.size.y;
            self.vel.y = 0.0;
            self.grounded = true;
            if let Some(handle) = self.riding.take() {
                log::debug!("Carried onto the hazard floor by platform {}", handle.index());
            }
        }

        if let Some(handle) = self.riding {
            self.ride(handle, field, tuning);
        }

        if self.riding.is_none() && !self.grounded {
            self.try_land(prev_feet, field);
        }

        self.contact()
    }

    /// Stay flush on the ridden platform, or let go of it
    fn ride(&mut self, handle: PlatformHandle, field: &PlatformField, tuning: &Tuning) {
        let Some(platform) = field.get(handle) else {
            self.riding = None;
            return;
        };

        self.pos.y = platform.top() as f32 - self.size.y;
        self.vel.y = 0.0;
        self.grounded = true;

        let rect = self.rect();
        let over = overlaps_horizontally(rect.left(), rect.right(), platform.left(), platform.right());
        let near = near_surface(rect.bottom(), platform.top(), tuning.ride_tolerance);
        if !over || !near {
            log::debug!("Left platform {}", handle.index());
            self.riding = None;
            self.grounded = false;
        }
    }

    /// Land on the first platform (storage order) whose top the feet crossed
    fn try_land(&mut self, prev_feet: f32, field: &PlatformField) {
        let cur_feet = self.feet();
        let rect = self.rect();

        let hit = field.iter().find(|(_, p)| {
            overlaps_horizontally(rect.left(), rect.right(), p.left(), p.right())
                && crossed_platform_top(prev_feet, cur_feet, self.vel.y, p.top() as f32)
        });

        if let Some((handle, platform)) = hit {
            self.pos.y = platform.top() as f32 - self.size.y;
            self.vel.y = 0.0;
            self.grounded = true;
            self.riding = Some(handle);
            log::debug!(
                "Landed on platform {} at ({}, {})",
                handle.index(),
                platform.x,
                platform.y
            );
        }
    }

    fn contact(&self) -> Contact {
        match self.riding {
            Some(handle) => Contact::Riding(handle),
            None if self.grounded => Contact::Floor,
            None => Contact::Airborne,
        }
    }
}
