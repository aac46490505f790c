//! Scrolling platform field
//!
//! The field owns a fixed number of platforms for the whole session. Platforms
//! that scroll off the bottom are respawned in place, so a [`PlatformHandle`]
//! taken while riding stays valid for as long as the player rides it.

use serde::{Deserialize, Serialize};

use super::rect::PixelRect;
use super::rng::FieldRng;
use crate::consts::PLATFORM_HEIGHT;
use crate::tuning::Tuning;

/// Stable index of a platform inside a [`PlatformField`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformHandle(usize);

impl PlatformHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// An axis-aligned platform (integer pixels, top-left origin)
pub type Platform = PixelRect;

/// Roll a new width and x that fit inside the field
fn reroll_span(p: &mut Platform, tuning: &Tuning, rng: &mut FieldRng) {
    p.w = rng.range(tuning.platform_min_width, tuning.platform_max_width);
    p.x = rng.range(0, tuning.field_width - p.w);
}

/// Fixed set of scrolling platforms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformField {
    // Boxed slice: length is fixed at construction, elements only mutate in place.
    platforms: Box<[Platform]>,
    field_height: i32,
}

impl PlatformField {
    /// Create the startup layout, spread over `[-field_height, field_height)`
    pub fn new(tuning: &Tuning, rng: &mut FieldRng) -> Self {
        let platforms = (0..tuning.platform_count)
            .map(|_| {
                let mut p = Platform::new(0, 0, 0, PLATFORM_HEIGHT);
                reroll_span(&mut p, tuning, rng);
                p.y = rng.range(-tuning.field_height, tuning.field_height);
                p
            })
            .collect();

        Self {
            platforms,
            field_height: tuning.field_height,
        }
    }

    /// Build a field from explicit platforms (scripted layouts, tests)
    pub fn from_platforms(platforms: Vec<Platform>, tuning: &Tuning) -> Self {
        Self {
            platforms: platforms.into_boxed_slice(),
            field_height: tuning.field_height,
        }
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn get(&self, handle: PlatformHandle) -> Option<&Platform> {
        self.platforms.get(handle.0)
    }

    /// Iterate platforms with their handles, in storage order
    pub fn iter(&self) -> impl Iterator<Item = (PlatformHandle, &Platform)> {
        self.platforms
            .iter()
            .enumerate()
            .map(|(i, p)| (PlatformHandle(i), p))
    }

    /// Scroll every platform down and respawn the ones past the bottom edge.
    ///
    /// The per-tick step is truncated to whole pixels. Returns the number of
    /// platforms that were respawned.
    pub fn advance(&mut self, dt: f32, scroll_speed: f32, tuning: &Tuning, rng: &mut FieldRng) -> usize {
        let step = (scroll_speed * dt) as i32;
        let mut recycled = 0;

        for (i, p) in self.platforms.iter_mut().enumerate() {
            p.y = p.y.saturating_add(step);
            if p.y > self.field_height {
                p.y = rng.range(tuning.respawn_y_min, tuning.respawn_y_max);
                reroll_span(p, tuning, rng);
                recycled += 1;
                log::trace!("Platform {i} respawned at ({}, {}) w={}", p.x, p.y, p.w);
            }
        }

        recycled
    }

    /// Re-randomize the whole layout for a fresh run
    pub fn reshuffle(&mut self, tuning: &Tuning, rng: &mut FieldRng) {
        for p in self.platforms.iter_mut() {
            p.y = rng.range(-self.field_height, self.field_height);
            reroll_span(p, tuning, rng);
        }
    }
}
