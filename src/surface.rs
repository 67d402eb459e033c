//! Output surfaces the renderer draws into.

use std::ops::Range;

/// Addressable 2D pixel target.
///
/// Only `width`, `height` and `set_pixel` are required. The drawing
/// primitives clip against the surface, so callers may pass rows, line
/// endpoints and polygon vertices that fall outside it.
pub trait Surface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn set_pixel(&mut self, x: usize, y: usize, color: u32);

    /// Writes a pixel given in signed coordinates, dropping it if off-surface.
    #[inline]
    fn plot(&mut self, x: i64, y: i64, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height() {
            self.set_pixel(x as usize, y as usize, color);
        }
    }

    /// Writes a 1-pixel-wide vertical run at column `x`. `texel` is asked for
    /// the color of each visible row in `rows`.
    fn draw_column(&mut self, x: usize, rows: Range<i64>, texel: &mut dyn FnMut(i64) -> u32) {
        if x >= self.width() {
            return;
        }
        let y0 = rows.start.max(0);
        let y1 = rows.end.min(self.height() as i64);
        for y in y0..y1 {
            let c = texel(y);
            self.set_pixel(x, y as usize, c);
        }
    }

    /// Bresenham line, both endpoints inclusive.
    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: u32) {
        let (mut x, mut y) = (from.0 as i64, from.1 as i64);
        let (x1, y1) = (to.0 as i64, to.1 as i64);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y, color);
            if x == x1 && y == y1 {
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

    /// Even-odd scanline fill, sampling at pixel centres.
    fn fill_polygon(&mut self, points: &[(i32, i32)], color: u32) {
        if points.len() < 3 {
            return;
        }
        let (w, h) = (self.width() as i64, self.height() as i64);
        let y_min = points.iter().map(|p| p.1).min().unwrap_or(0) as i64;
        let y_max = points.iter().map(|p| p.1).max().unwrap_or(0) as i64;

        let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
        for y in y_min.max(0)..=y_max.min(h - 1) {
            let yc = y as f32 + 0.5;
            crossings.clear();
            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                let (ay, by) = (a.1 as f32, b.1 as f32);
                if (ay <= yc) != (by <= yc) {
                    let t = (yc - ay) / (by - ay);
                    crossings.push(a.0 as f32 + t * (b.0 - a.0) as f32);
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));

            for span in crossings.chunks_exact(2) {
                let xs = ((span[0] - 0.5).ceil() as i64).max(0);
                let xe = ((span[1] - 0.5).ceil() as i64).min(w);
                for x in xs..xe {
                    self.set_pixel(x as usize, y as usize, color);
                }
            }
        }
    }
}

/// Row-major software framebuffer.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    /// Reallocates only if the size changed. Contents are unspecified afterwards.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixels = vec![0; width * height];
        }
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }
}

impl Surface for FrameBuffer {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        self.pixels[y * self.width + x] = color;
    }

    fn draw_column(&mut self, x: usize, rows: Range<i64>, texel: &mut dyn FnMut(i64) -> u32) {
        if x >= self.width {
            return;
        }
        let y0 = rows.start.max(0);
        let y1 = rows.end.min(self.height as i64);
        if y0 >= y1 {
            return;
        }

        // Vertical draw
        let mut idx = (y0 as usize) * self.width + x;
        for y in y0..y1 {
            self.pixels[idx] = texel(y);
            idx += self.width;
        }
    }
}
