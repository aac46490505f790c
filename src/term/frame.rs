//! Half-block cell frames.
//!
//! Each terminal cell shows two vertically stacked pixels using `▀`: the
//! foreground paints the upper half, the background the lower half. The canvas
//! is box-filtered down (or nearest-scaled up) to fit the terminal, keeping its
//! aspect ratio and centering it.

use crate::renderer::{Canvas, Color};

/// Glyph drawn in every cell
pub const HALF_BLOCK: char = '▀';

/// Fill for cells outside the scaled canvas
pub const LETTERBOX: [u8; 3] = [0, 0, 0];

/// Two stacked pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub top: [u8; 3],
    pub bottom: [u8; 3],
}

/// Grid of half-block cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellFrame {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl CellFrame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y as usize * self.width as usize + x as usize])
    }

    /// Scale `canvas` into a `cols` x `rows` cell grid
    pub fn from_canvas(canvas: &Canvas, cols: u16, rows: u16) -> Self {
        let mut frame = Self::new(cols, rows);
        let (cw, ch) = (canvas.width(), canvas.height());
        if cols == 0 || rows == 0 || cw <= 0 || ch <= 0 {
            return frame;
        }

        // Target grid in pixels: one column wide, two pixels per row
        let tw = cols as i32;
        let th = rows as i32 * 2;
        let scale = (tw as f32 / cw as f32).min(th as f32 / ch as f32);
        let vw = ((cw as f32 * scale) as i32).clamp(1, tw);
        let vh = ((ch as f32 * scale) as i32).clamp(1, th);
        let ox = (tw - vw) / 2;
        let oy = (th - vh) / 2;

        let sample = |tx: i32, ty: i32| -> [u8; 3] {
            let vx = tx - ox;
            let vy = ty - oy;
            if vx < 0 || vy < 0 || vx >= vw || vy >= vh {
                return LETTERBOX;
            }
            let x0 = vx * cw / vw;
            let x1 = ((vx + 1) * cw / vw).max(x0 + 1);
            let y0 = vy * ch / vh;
            let y1 = ((vy + 1) * ch / vh).max(y0 + 1);
            average(canvas, x0, x1, y0, y1)
        };

        for row in 0..rows {
            for col in 0..cols {
                let tx = col as i32;
                let ty = row as i32 * 2;
                frame.cells[row as usize * cols as usize + col as usize] = Cell {
                    top: sample(tx, ty),
                    bottom: sample(tx, ty + 1),
                };
            }
        }

        frame
    }
}

/// Mean color of the canvas box `[x0, x1) x [y0, y1)`
fn average(canvas: &Canvas, x0: i32, x1: i32, y0: i32, y1: i32) -> [u8; 3] {
    let mut sum = [0u32; 3];
    let mut n = 0u32;
    for y in y0..y1 {
        for x in x0..x1 {
            if let Some(px) = canvas.pixel(x, y) {
                add(&mut sum, px);
                n += 1;
            }
        }
    }
    if n == 0 {
        return LETTERBOX;
    }
    [(sum[0] / n) as u8, (sum[1] / n) as u8, (sum[2] / n) as u8]
}

#[inline]
fn add(sum: &mut [u32; 3], px: Color) {
    sum[0] += px[0] as u32;
    sum[1] += px[1] as u32;
    sum[2] += px[2] as u32;
}

/// Call `f(x, y, len)` for each horizontal run of cells that differ
pub fn for_each_changed_run<E>(
    prev: &CellFrame,
    next: &CellFrame,
    mut f: impl FnMut(u16, u16, u16) -> Result<(), E>,
) -> Result<(), E> {
    if prev.width() != next.width() || prev.height() != next.height() {
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    let w = next.width();
    for y in 0..next.height() {
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            x += 1;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RenderSink;
    use crate::sim::PixelRect;

    #[test]
    fn test_downscale_averages() {
        let mut canvas = Canvas::new(4, 4);
        canvas.clear([0, 0, 0, 255]);
        canvas.fill_rect(PixelRect::new(0, 0, 2, 4), [200, 100, 0, 255]);

        // 4x4 canvas into a 2x1 grid: each pixel covers a 2x2 box
        let frame = CellFrame::from_canvas(&canvas, 2, 1);
        assert_eq!(
            frame.get(0, 0),
            Some(Cell {
                top: [200, 100, 0],
                bottom: [200, 100, 0]
            })
        );
        assert_eq!(frame.get(1, 0), Some(Cell::default()));
    }

    #[test]
    fn test_letterbox_keeps_aspect() {
        let mut canvas = Canvas::new(10, 10);
        canvas.clear([255, 255, 255, 255]);

        // 20 columns x 5 rows = 20x10 pixels; square canvas fills the middle 10 columns
        let frame = CellFrame::from_canvas(&canvas, 20, 5);
        assert_eq!(frame.get(0, 2).map(|c| c.top), Some(LETTERBOX));
        assert_eq!(frame.get(19, 2).map(|c| c.top), Some(LETTERBOX));
        assert_eq!(frame.get(5, 0).map(|c| c.top), Some([255, 255, 255]));
        assert_eq!(frame.get(14, 4).map(|c| c.bottom), Some([255, 255, 255]));
        assert_eq!(frame.get(15, 4).map(|c| c.bottom), Some(LETTERBOX));
    }

    #[test]
    fn test_empty_grid() {
        let canvas = Canvas::new(10, 10);
        let frame = CellFrame::from_canvas(&canvas, 0, 0);
        assert_eq!(frame.width(), 0);
        assert_eq!(frame.get(0, 0), None);
    }

    #[test]
    fn test_changed_runs_coalesce() {
        let mut canvas = Canvas::new(5, 2);
        let a = CellFrame::from_canvas(&canvas, 5, 1);
        canvas.fill_rect(PixelRect::new(1, 0, 3, 1), [9, 9, 9, 255]);
        let b = CellFrame::from_canvas(&canvas, 5, 1);

        let mut runs = Vec::new();
        for_each_changed_run::<()>(&a, &b, |x, y, len| {
            runs.push((x, y, len));
            Ok(())
        })
        .unwrap();
        assert_eq!(runs, vec![(1, 0, 3)]);
    }

    #[test]
    fn test_resize_redraws_everything() {
        let canvas = Canvas::new(4, 4);
        let a = CellFrame::from_canvas(&canvas, 2, 2);
        let b = CellFrame::from_canvas(&canvas, 3, 2);
        let mut runs = Vec::new();
        for_each_changed_run::<()>(&a, &b, |x, y, len| {
            runs.push((x, y, len));
            Ok(())
        })
        .unwrap();
        assert_eq!(runs, vec![(0, 0, 3), (0, 1, 3)]);
    }
}
