//! Swept edge tests
//!
//! A rectangle that falls far enough in one tick can skip clean over a thin
//! platform or the hazard line if collisions are checked as static overlaps.
//! These tests compare the feet position before and after the tick against the
//! target edge instead, so a crossing is caught no matter how large the step.

/// Did the feet cross onto a platform top this tick?
///
/// Inclusive on both sides: feet that started exactly on the edge still land.
#[inline]
pub fn crossed_platform_top(prev_feet: f32, cur_feet: f32, vy: f32, top: f32) -> bool {
    vy > 0.0 && prev_feet <= top && cur_feet >= top
}

/// Did the feet cross down into the hazard line this tick?
///
/// Strict on the previous side: a player resting exactly on the hazard top
/// does not re-trigger.
#[inline]
pub fn crossed_hazard(prev_feet: f32, cur_feet: f32, vy: f32, hazard_top: f32) -> bool {
    vy > 0.0 && prev_feet < hazard_top && hazard_top <= cur_feet
}

/// Open-interval horizontal overlap of `[a_left, a_right)` and `[b_left, b_right)`
#[inline]
pub fn overlaps_horizontally(a_left: i32, a_right: i32, b_left: i32, b_right: i32) -> bool {
    a_right > b_left && a_left < b_right
}

/// Are the feet within `tolerance` pixels of a surface?
#[inline]
pub fn near_surface(feet: i32, top: i32, tolerance: i32) -> bool {
    (feet - top).abs() <= tolerance
}
