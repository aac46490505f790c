//! TerminalPresenter: puts a canvas on a real terminal.
//!
//! Diffs against the previously shown frame and only rewrites changed runs.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    QueueableCommand, cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use super::frame::{Cell, CellFrame, HALF_BLOCK, for_each_changed_run};
use crate::renderer::Canvas;

pub struct TerminalPresenter {
    stdout: io::Stdout,
    last: Option<CellFrame>,
    key_release_events: bool,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            key_release_events: false,
        }
    }

    /// Switch the terminal into game mode (raw, alternate screen, no cursor)
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;

        // Release events make held-key movement exact; not every terminal has them.
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            self.stdout.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
            self.key_release_events = true;
        }

        self.stdout.flush()?;
        log::info!(
            "Terminal ready (key release events: {})",
            self.key_release_events
        );
        Ok(())
    }

    /// Restore the terminal
    pub fn exit(&mut self) -> Result<()> {
        if self.key_release_events {
            self.stdout.queue(PopKeyboardEnhancementFlags)?;
        }
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Does the terminal report key releases?
    pub fn key_release_events(&self) -> bool {
        self.key_release_events
    }

    /// Force the next present to be a full redraw (terminal resize)
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Scale the canvas to the terminal and draw what changed
    pub fn present(&mut self, canvas: &mut Canvas) -> Result<()> {
        if let Some(title) = canvas.take_title() {
            self.stdout.queue(terminal::SetTitle(title))?;
        }

        let (cols, rows) = terminal::size().unwrap_or((80, 24));
        let next = CellFrame::from_canvas(canvas, cols, rows);

        match self.last.take() {
            Some(prev) if prev.width() == next.width() && prev.height() == next.height() => {
                self.diff_redraw(&next, &prev)?;
            }
            _ => self.full_redraw(&next)?,
        }

        self.last = Some(next);
        Ok(())
    }

    fn full_redraw(&mut self, frame: &CellFrame) -> Result<()> {
        self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;
        let blank = CellFrame::new(0, 0);
        self.diff_redraw(frame, &blank)
    }

    fn diff_redraw(&mut self, next: &CellFrame, prev: &CellFrame) -> Result<()> {
        let mut current: Option<Cell> = None;
        let stdout = &mut self.stdout;

        for_each_changed_run(prev, next, |x, y, len| -> Result<()> {
            stdout.queue(cursor::MoveTo(x, y))?;
            for dx in 0..len {
                let cell = next.get(x + dx, y).unwrap_or_default();
                if current != Some(cell) {
                    stdout.queue(SetForegroundColor(rgb(cell.top)))?;
                    stdout.queue(SetBackgroundColor(rgb(cell.bottom)))?;
                    current = Some(cell);
                }
                stdout.queue(Print(HALF_BLOCK))?;
            }
            Ok(())
        })?;

        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

fn rgb(c: [u8; 3]) -> Color {
    Color::Rgb {
        r: c[0],
        g: c[1],
        b: c[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_conversion() {
        assert_eq!(rgb([1, 2, 3]), Color::Rgb { r: 1, g: 2, b: 3 });
    }
}
