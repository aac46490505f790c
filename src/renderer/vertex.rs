//! Vertex and color types for 2D rendering

/// Flat RGBA color
pub type Color = [u8; 4];

/// Simple 2D vertex with position and color
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = [10, 10, 14, 255];
    pub const PLATFORM: Color = [220, 220, 220, 255];
    pub const PLAYER: Color = [80, 180, 255, 255];
    pub const SPIKES: Color = [255, 90, 90, 255];
    pub const HUD: Color = [255, 255, 255, 255];
}
