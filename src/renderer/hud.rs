//! Seven-segment HUD digits and the window title clock
//!
//! No fonts: every glyph is a handful of filled rectangles.

use super::RenderSink;
use super::vertex::{Color, colors};
use crate::minutes_seconds;
use crate::sim::PixelRect;

/// Segment order: A top, B upper right, C lower right, D bottom, E lower left,
/// F upper left, G middle
const DIGIT_SEGMENTS: [[bool; 7]; 10] = [
    [true, true, true, true, true, true, false],     // 0
    [false, true, true, false, false, false, false], // 1
    [true, true, false, true, true, false, true],    // 2
    [true, true, true, true, false, false, true],    // 3
    [false, true, true, false, false, true, true],   // 4
    [true, false, true, true, false, true, true],    // 5
    [true, false, true, true, true, true, true],     // 6
    [true, true, true, false, false, false, false],  // 7
    [true, true, true, true, true, true, true],      // 8
    [true, true, true, true, false, true, true],     // 9
];

/// Horizontal advance of one digit at scale 1
pub const DIGIT_ADVANCE: i32 = 10;
/// Horizontal advance of the colon at scale 1
pub const COLON_ADVANCE: i32 = 5;

/// Rectangle covered by segment `seg` of a digit at (x, y), scale `s`
fn segment_rect(x: i32, y: i32, s: i32, seg: usize) -> PixelRect {
    let t = 2 * s;
    let l = 6 * s;
    let gap = s;
    match seg {
        0 => PixelRect::new(x + gap, y, l, t),
        1 => PixelRect::new(x + gap + l, y + gap, t, l),
        2 => PixelRect::new(x + gap + l, y + gap + l + t, t, l),
        3 => PixelRect::new(x + gap, y + 2 * gap + 2 * l + t, l, t),
        4 => PixelRect::new(x, y + gap + l + t, t, l),
        5 => PixelRect::new(x, y + gap, t, l),
        6 => PixelRect::new(x + gap, y + gap + l, l, t),
        _ => PixelRect::new(x, y, t, t),
    }
}

/// Draw a single 0-9 digit. Values outside 0-9 draw their last decimal digit.
pub fn draw_digit<S: RenderSink + ?Sized>(sink: &mut S, x: i32, y: i32, scale: i32, digit: u64) {
    let segments = &DIGIT_SEGMENTS[(digit % 10) as usize];
    for (seg, _) in segments.iter().enumerate().filter(|(_, on)| **on) {
        sink.fill_rect(segment_rect(x, y, scale, seg), colors::HUD);
    }
}

/// Draw the ':' separator
pub fn draw_colon<S: RenderSink + ?Sized>(sink: &mut S, x: i32, y: i32, scale: i32) {
    let dot = 2 * scale;
    sink.fill_rect(PixelRect::new(x, y + 4 * scale, dot, dot), colors::HUD);
    sink.fill_rect(PixelRect::new(x, y + 9 * scale, dot, dot), colors::HUD);
}

/// Draw `MM:SS` for a duration in whole seconds
pub fn draw_mmss<S: RenderSink + ?Sized>(sink: &mut S, x: i32, y: i32, scale: i32, total_seconds: u64) {
    let (mm, ss) = minutes_seconds(total_seconds);

    let mut dx = x;
    draw_digit(sink, dx, y, scale, (mm / 10) % 10);
    dx += DIGIT_ADVANCE * scale;
    draw_digit(sink, dx, y, scale, mm % 10);
    dx += DIGIT_ADVANCE * scale;
    draw_colon(sink, dx, y, scale);
    dx += COLON_ADVANCE * scale;
    draw_digit(sink, dx, y, scale, ss / 10);
    dx += DIGIT_ADVANCE * scale;
    draw_digit(sink, dx, y, scale, ss % 10);
}

/// Title-screen prompt: an outlined box with an "enter" arrow and a zeroed clock
pub fn draw_start_prompt<S: RenderSink + ?Sized>(sink: &mut S, field_width: i32) {
    let cx = field_width / 2;
    let color: Color = colors::HUD;

    sink.draw_rect(PixelRect::new(cx - 60, 40, 120, 18), color);
    sink.draw_line((cx - 48, 49), (cx - 38, 49), color);
    sink.draw_line((cx - 38, 49), (cx - 43, 44), color);
    sink.draw_line((cx - 38, 49), (cx - 43, 54), color);
    draw_mmss(sink, cx - 18, 42, 1, 0);
}

/// Base window title
pub const WINDOW_TITLE: &str = "Rectangle Run";

/// Rewrites the window title with the run clock, four times a second at most
#[derive(Debug, Clone, Default)]
pub struct TitleClock {
    last_bucket: Option<u64>,
}

impl TitleClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// New title text when the quarter-second bucket changed, else `None`
    pub fn update(&mut self, elapsed_ms: u64) -> Option<String> {
        let bucket = elapsed_ms / 250;
        if self.last_bucket == Some(bucket) {
            return None;
        }
        self.last_bucket = Some(bucket);
        Some(format!(
            "{WINDOW_TITLE} - Time: {}",
            crate::format_run_time(elapsed_ms)
        ))
    }
}
