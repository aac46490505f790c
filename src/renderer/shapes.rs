//! Shape generation for 2D primitives

use super::vertex::{Color, Vertex};

/// Width of one spike tooth in pixels
pub const SPIKE_TOOTH_WIDTH: i32 = 6;

/// Generate the serrated hazard strip: one triangle per tooth, apex up.
///
/// Teeth start at x = 0 and repeat every `tooth` pixels across `width`; the
/// apex of each sits on `top`, the base on `bottom`.
pub fn spike_strip(width: i32, top: i32, bottom: i32, tooth: i32, color: Color) -> Vec<Vertex> {
    if tooth <= 0 || width <= 0 {
        return Vec::new();
    }

    let teeth = ((width + tooth - 1) / tooth) as usize;
    let mut vertices = Vec::with_capacity(teeth * 3);
    let half = tooth as f32 / 2.0;

    for x in (0..width).step_by(tooth as usize) {
        let x = x as f32;
        vertices.push(Vertex::new(x + half, top as f32, color));
        vertices.push(Vertex::new(x, bottom as f32, color));
        vertices.push(Vertex::new(x + tooth as f32, bottom as f32, color));
    }

    vertices
}
