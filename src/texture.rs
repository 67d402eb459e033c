//! Texture provider used for wall sampling.
//!
//! The renderer only needs width, height and per-texel reads. Decoding
//! image files is left to the host; [`PixelTexture`] holds pixels that are
//! already resident, and has a couple of procedural generators.

use tracing::debug;

use crate::color::pack_rgb;

/// Read-only 2D texel grid. Width and height are at least 1.
pub trait Texture: Send + Sync {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Packed `0x00RRGGBB` texel. `x < width()`, `y < height()`.
    fn rgb(&self, x: usize, y: usize) -> u32;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    #[error("texture dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions { width: usize, height: usize },
    #[error("pixel buffer holds {actual} texels, expected {expected} for {width}x{height}")]
    SizeMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}

/// Row-major owned texel buffer.
#[derive(Debug, Clone)]
pub struct PixelTexture {
    width: usize,
    height: usize,
    texels: Vec<u32>,
}

impl PixelTexture {
    pub fn from_pixels(
        width: usize,
        height: usize,
        texels: Vec<u32>,
    ) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::EmptyDimensions { width, height });
        }
        let expected = width * height;
        if texels.len() != expected {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                expected,
                actual: texels.len(),
            });
        }
        debug!(width, height, "texture created");
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    pub fn from_fn(
        width: usize,
        height: usize,
        f: impl Fn(usize, usize) -> u32,
    ) -> Result<Self, TextureError> {
        let mut texels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                texels.push(f(x, y));
            }
        }
        Self::from_pixels(width, height, texels)
    }

    /// Alternating `a`/`b` squares of `cell` texels.
    pub fn checkerboard(
        width: usize,
        height: usize,
        cell: usize,
        a: u32,
        b: u32,
    ) -> Result<Self, TextureError> {
        let cell = cell.max(1);
        Self::from_fn(width, height, |x, y| {
            if ((x / cell) + (y / cell)) % 2 == 0 {
                a
            } else {
                b
            }
        })
    }

    /// Running-bond brick pattern with one-texel mortar lines.
    pub fn bricks(
        width: usize,
        height: usize,
        brick_w: usize,
        brick_h: usize,
        mortar: u32,
        brick: u32,
    ) -> Result<Self, TextureError> {
        let brick_w = brick_w.max(2);
        let brick_h = brick_h.max(2);
        Self::from_fn(width, height, |x, y| {
            let row = y / brick_h;
            // Odd rows shifted by half a brick
            let shifted = x + (row % 2) * (brick_w / 2);
            if y % brick_h == 0 || shifted % brick_w == 0 {
                mortar
            } else {
                brick
            }
        })
    }

    /// Horizontal then vertical gradient, handy for seeing which column got sampled.
    pub fn gradient(width: usize, height: usize) -> Result<Self, TextureError> {
        Self::from_fn(width, height, |x, y| {
            let r = (x * 255 / (width - 1).max(1)) as u8;
            let g = (y * 255 / (height - 1).max(1)) as u8;
            pack_rgb(r, g, 128)
        })
    }
}

impl Texture for PixelTexture {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn rgb(&self, x: usize, y: usize) -> u32 {
        self.texels[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, WHITE};

    #[test]
    fn rejects_empty() {
        assert_eq!(
            PixelTexture::from_pixels(0, 4, vec![]).unwrap_err(),
            TextureError::EmptyDimensions {
                width: 0,
                height: 4
            }
        );
    }

    #[test]
    fn rejects_wrong_length() {
        let err = PixelTexture::from_pixels(2, 2, vec![0; 3]).unwrap_err();
        assert_eq!(
            err,
            TextureError::SizeMismatch {
                width: 2,
                height: 2,
                expected: 4,
                actual: 3
            }
        );
        assert!(err.to_string().contains("expected 4"));
    }

    #[test]
    fn row_major_access() {
        let tex = PixelTexture::from_pixels(3, 2, vec![0, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(tex.width(), 3);
        assert_eq!(tex.height(), 2);
        assert_eq!(tex.rgb(2, 0), 2);
        assert_eq!(tex.rgb(0, 1), 3);
    }

    #[test]
    fn checkerboard_cells() {
        let tex = PixelTexture::checkerboard(4, 4, 2, WHITE, BLACK).unwrap();
        assert_eq!(tex.rgb(0, 0), WHITE);
        assert_eq!(tex.rgb(1, 1), WHITE);
        assert_eq!(tex.rgb(2, 0), BLACK);
        assert_eq!(tex.rgb(2, 2), WHITE);
    }

    #[test]
    fn bricks_have_mortar_rows() {
        let tex = PixelTexture::bricks(16, 16, 8, 4, BLACK, WHITE).unwrap();
        for x in 0..16 {
            assert_eq!(tex.rgb(x, 0), BLACK);
            assert_eq!(tex.rgb(x, 4), BLACK);
        }
        assert_eq!(tex.rgb(1, 1), WHITE);
    }

    #[test]
    fn gradient_spans_columns() {
        let tex = PixelTexture::gradient(5, 5).unwrap();
        assert_eq!(crate::color::unpack_rgb(tex.rgb(0, 0)).0, 0);
        assert_eq!(crate::color::unpack_rgb(tex.rgb(4, 0)).0, 255);
    }
}
