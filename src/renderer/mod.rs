//! Rendering module
//!
//! The simulation never draws. Each frame, `draw_frame` turns a `GameState`
//! snapshot into calls on a `RenderSink`: filled and outlined rectangles,
//! lines and one triangle mesh for the spikes.

pub mod canvas;
pub mod hud;
pub mod shapes;
pub mod vertex;

pub use canvas::Canvas;
pub use hud::{TitleClock, WINDOW_TITLE};
pub use vertex::{Color, Vertex, colors};

use crate::sim::{GamePhase, GameState, PixelRect};

/// Drawing surface the frame is composed onto
pub trait RenderSink {
    /// Fill the whole surface
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: PixelRect, color: Color);
    /// One-pixel outline just inside `rect`
    fn draw_rect(&mut self, rect: PixelRect, color: Color);
    /// Line with both endpoints included
    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Color);
    /// Triangle list, three vertices per triangle
    fn draw_triangles(&mut self, vertices: &[Vertex]);
    fn set_title(&mut self, title: &str);
}

/// Compose one frame from the current state
pub fn draw_frame<S: RenderSink + ?Sized>(sink: &mut S, state: &GameState, now_ms: u64) {
    let tuning = &state.tuning;

    sink.clear(colors::BACKGROUND);

    for platform in state.platforms.platforms() {
        sink.fill_rect(*platform, colors::PLATFORM);
    }

    sink.fill_rect(state.player.rect(), colors::PLAYER);

    let spikes = shapes::spike_strip(
        tuning.field_width,
        tuning.hazard_top(),
        tuning.field_height,
        shapes::SPIKE_TOOTH_WIDTH,
        colors::SPIKES,
    );
    sink.draw_triangles(&spikes);

    match state.phase {
        GamePhase::Playing => {
            hud::draw_mmss(sink, 6, 6, 2, state.elapsed_ms(now_ms) / 1000);
        }
        GamePhase::Title => {
            hud::draw_start_prompt(sink, tuning.field_width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{TickInput, tick};

    #[test]
    fn test_frame_draws_player_and_spikes() {
        let mut state = GameState::new(5);
        state.platforms = crate::sim::PlatformField::from_platforms(Vec::new(), &state.tuning);
        let mut canvas = Canvas::new(state.tuning.field_width, state.tuning.field_height);
        draw_frame(&mut canvas, &state, 0);

        let player = state.player.rect();
        assert_eq!(
            canvas.pixel(player.left() + 1, player.bottom() - 1),
            Some(colors::PLAYER)
        );
        // Inside the first tooth, and in the gap beside its apex
        assert_eq!(canvas.pixel(3, state.tuning.field_height - 1), Some(colors::SPIKES));
        assert_eq!(
            canvas.pixel(0, state.tuning.hazard_top()),
            Some(colors::BACKGROUND)
        );
    }

    #[test]
    fn test_title_prompt_only_on_title() {
        let mut state = GameState::new(5);
        let mut canvas = Canvas::new(300, 300);
        draw_frame(&mut canvas, &state, 0);
        // Prompt box outline at (W/2 - 60, 40)
        assert_eq!(canvas.pixel(90, 40), Some(colors::HUD));

        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start, 0.0, 0);
        // Freeze platforms out of the way so they cannot cover the HUD area
        state.platforms = crate::sim::PlatformField::from_platforms(Vec::new(), &state.tuning);
        draw_frame(&mut canvas, &state, 0);
        assert_eq!(canvas.pixel(90, 40), Some(colors::BACKGROUND));
        // First digit of 00:00 at scale 2: segment A starts at (6 + 2, 6)
        assert_eq!(canvas.pixel(8, 6), Some(colors::HUD));
    }
}
