//! Software RGBA canvas
//!
//! Rasterizes the render-sink primitives into a pixel buffer that a frontend
//! can present however it likes.

use super::RenderSink;
use super::vertex::{Color, Vertex};
use crate::sim::PixelRect;

/// In-memory RGBA framebuffer
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
    title: Option<String>,
}

impl Canvas {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 255]; (width * height) as usize],
            title: None,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.idx(x, y).map(|i| self.pixels[i])
    }

    /// Title set since the last call, if any
    pub fn take_title(&mut self) -> Option<String> {
        self.title.take()
    }

    #[inline]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    #[inline]
    fn plot(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.idx(x, y) {
            self.pixels[i] = blend(self.pixels[i], color);
        }
    }

    fn fill_span(&mut self, y: i32, x0: i32, x1: i32, color: Color) {
        if y < 0 || y >= self.height {
            return;
        }
        for x in x0.max(0)..x1.min(self.width) {
            self.plot(x, y, color);
        }
    }

    fn fill_triangle(&mut self, a: [f32; 2], b: [f32; 2], c: [f32; 2], color: Color) {
        let area = edge(a, b, c);
        if area == 0.0 {
            return;
        }

        let min_x = a[0].min(b[0]).min(c[0]).floor().max(0.0) as i32;
        let max_x = a[0].max(b[0]).max(c[0]).ceil().min(self.width as f32) as i32;
        let min_y = a[1].min(b[1]).min(c[1]).floor().max(0.0) as i32;
        let max_y = a[1].max(b[1]).max(c[1]).ceil().min(self.height as f32) as i32;

        for y in min_y..max_y {
            for x in min_x..max_x {
                // Sample at the pixel center
                let p = [x as f32 + 0.5, y as f32 + 0.5];
                let w0 = edge(b, c, p);
                let w1 = edge(c, a, p);
                let w2 = edge(a, b, p);
                let inside = if area > 0.0 {
                    w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                } else {
                    w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
                };
                if inside {
                    self.plot(x, y, color);
                }
            }
        }
    }
}

/// Twice the signed area of triangle (a, b, p)
#[inline]
fn edge(a: [f32; 2], b: [f32; 2], p: [f32; 2]) -> f32 {
    (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0])
}

/// Source-over blend of `src` onto an opaque `dst`
#[inline]
fn blend(dst: Color, src: Color) -> Color {
    match src[3] {
        255 => src,
        0 => dst,
        a => {
            let a = a as u32;
            let mix = |d: u8, s: u8| ((s as u32 * a + d as u32 * (255 - a)) / 255) as u8;
            [mix(dst[0], src[0]), mix(dst[1], src[1]), mix(dst[2], src[2]), 255]
        }
    }
}

impl RenderSink for Canvas {
    fn clear(&mut self, color: Color) {
        self.pixels.fill([color[0], color[1], color[2], 255]);
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        for y in rect.top()..rect.bottom() {
            self.fill_span(y, rect.left(), rect.right(), color);
        }
    }

    fn draw_rect(&mut self, rect: PixelRect, color: Color) {
        if rect.w <= 0 || rect.h <= 0 {
            return;
        }
        let (l, r, t, b) = (rect.left(), rect.right() - 1, rect.top(), rect.bottom() - 1);
        self.fill_span(t, l, r + 1, color);
        if b != t {
            self.fill_span(b, l, r + 1, color);
        }
        for y in (t + 1)..b {
            self.plot(l, y, color);
            if r != l {
                self.plot(r, y, color);
            }
        }
    }

    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Color) {
        // Bresenham, both endpoints inclusive
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y, color);
            if (x, y) == to {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_triangles(&mut self, vertices: &[Vertex]) {
        for tri in vertices.chunks_exact(3) {
            self.fill_triangle(tri[0].position, tri[1].position, tri[2].position, tri[0].color);
        }
    }

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_owned());
    }
}
