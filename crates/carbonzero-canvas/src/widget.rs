//! Terminal blitting of a [`RasterCanvas`].

use carbonzero_core::Rgba;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::RasterCanvas;

/// Upper half block: foreground paints the top sub-pixel, background the bottom.
const HALF_BLOCK: char = '▀';

/// Draws a raster canvas into terminal cells.
///
/// Each cell holds two vertically stacked sub-pixels. The backing store is
/// area-averaged down (or point-sampled up) to fit the widget area while
/// keeping its aspect ratio, centered, and composited over `background`.
/// Fully transparent sub-pixels leave the underlying cells untouched.
#[derive(Debug, Clone, Copy)]
pub struct CanvasView<'a> {
    canvas: &'a RasterCanvas,
    background: Rgba,
}

impl<'a> CanvasView<'a> {
    pub fn new(canvas: &'a RasterCanvas, background: Rgba) -> Self {
        Self { canvas, background }
    }

    /// Sub-pixel grid size the canvas occupies inside `area`.
    pub fn fitted_size(&self, area: Rect) -> (usize, usize) {
        let (bw, bh) = self.canvas.backing_size();
        if bw == 0 || bh == 0 || area.is_empty() {
            return (0, 0);
        }
        let (aw, ah) = (area.width as f64, area.height as f64 * 2.0);
        let scale = (aw / bw as f64).min(ah / bh as f64);
        (
            ((bw as f64 * scale).floor() as usize).max(1),
            ((bh as f64 * scale).floor() as usize).max(1),
        )
    }

    /// Average premultiplied color of the backing pixels under sub-pixel `(sx, sy)`.
    fn average(&self, sx: usize, sy: usize, fitted: (usize, usize)) -> [f32; 4] {
        let (bw, bh) = self.canvas.backing_size();
        let step_x = bw as f64 / fitted.0 as f64;
        let step_y = bh as f64 / fitted.1 as f64;

        let x0 = (sx as f64 * step_x).floor() as usize;
        let y0 = (sy as f64 * step_y).floor() as usize;
        let x1 = (((sx + 1) as f64 * step_x).ceil() as usize).clamp(x0 + 1, bw);
        let y1 = (((sy + 1) as f64 * step_y).ceil() as usize).clamp(y0 + 1, bh);

        let mut sum = [0.0f32; 4];
        let mut count = 0.0f32;
        for y in y0..y1 {
            for x in x0..x1 {
                if let Some(px) = self.canvas.premultiplied(x, y) {
                    for (acc, v) in sum.iter_mut().zip(px) {
                        *acc += v;
                    }
                    count += 1.0;
                }
            }
        }
        if count == 0.0 {
            return [0.0; 4];
        }
        sum.map(|v| v / count)
    }

    fn composite(&self, premultiplied: [f32; 4]) -> Option<Rgba> {
        if premultiplied[3] <= 1.0 / 512.0 {
            return None;
        }
        Some(Rgba::from_premultiplied(premultiplied).over(self.background))
    }
}

impl Widget for CanvasView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let fitted = self.fitted_size(area);
        if fitted.0 == 0 || fitted.1 == 0 {
            return;
        }

        let cols = fitted.0 as u16;
        let rows = fitted.1.div_ceil(2) as u16;
        let left = area.x + (area.width.saturating_sub(cols)) / 2;
        let top = area.y + (area.height.saturating_sub(rows)) / 2;

        for row in 0..rows {
            for col in 0..cols {
                let sx = col as usize;
                let upper_y = row as usize * 2;
                let lower_y = upper_y + 1;

                let upper = self.composite(self.average(sx, upper_y, fitted));
                let lower = if lower_y < fitted.1 {
                    self.composite(self.average(sx, lower_y, fitted))
                } else {
                    None
                };
                if upper.is_none() && lower.is_none() {
                    continue;
                }

                let upper = upper.unwrap_or(self.background);
                let lower = lower.unwrap_or(self.background);
                if let Some(cell) = buf.cell_mut((left + col, top + row)) {
                    cell.set_char(HALF_BLOCK)
                        .set_fg(upper.to_color())
                        .set_bg(lower.to_color());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use carbonzero_core::{Point, Size};

    use super::*;
    use crate::Surface;

    #[test]
    fn test_fitted_size_keeps_aspect() {
        let canvas = RasterCanvas::new(Size::new(320.0, 320.0), 1.0);
        let view = CanvasView::new(&canvas, Rgba::rgb(0, 0, 0));
        // 40 columns x 10 rows = 40 x 20 sub-pixels; height limits.
        assert_eq!(view.fitted_size(Rect::new(0, 0, 40, 10)), (20, 20));
        assert_eq!(view.fitted_size(Rect::new(0, 0, 0, 10)), (0, 0));
    }

    #[test]
    fn test_blit_paints_half_blocks_over_background() {
        let mut canvas = RasterCanvas::new(Size::new(4.0, 4.0), 1.0);
        canvas.fill_rect(
            Point::default(),
            Size::new(4.0, 2.0),
            &Rgba::rgb(255, 0, 0).into(),
        );
        let background = Rgba::rgb(0, 0, 255);
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        CanvasView::new(&canvas, background).render(area, &mut buf);

        let top = &buf[(1, 0)];
        assert_eq!(top.symbol(), "▀");
        assert_eq!(top.fg, Rgba::rgb(255, 0, 0).to_color());
        assert_eq!(top.bg, Rgba::rgb(255, 0, 0).to_color());

        // Transparent bottom half is left untouched.
        assert_eq!(buf[(1, 1)].symbol(), " ");
    }
}
