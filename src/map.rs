//! Top-down debug view.
//!
//! Puts the world origin at the centre of the viewport and flips y so
//! +y points up on screen.

use crate::surface::Surface;
use crate::vector2::Vector2;

pub const PIXELS_PER_METER: f32 = 5.0;

/// How far a ray is drawn when it hits nothing, in metres.
pub const MISS_RAY_LENGTH: f32 = 100.0;

/// Camera marker size, in pixels.
pub const ARROW_SIZE: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    center: Vector2,
    pixels_per_meter: f32,
}

impl MapView {
    pub fn new(viewport_width: usize, viewport_height: usize, pixels_per_meter: f32) -> Self {
        Self {
            center: Vector2::new((viewport_width / 2) as f32, (viewport_height / 2) as f32),
            pixels_per_meter,
        }
    }

    pub fn for_surface<S: Surface + ?Sized>(surface: &S) -> Self {
        Self::new(surface.width(), surface.height(), PIXELS_PER_METER)
    }

    /// World point to integer screen pixel.
    #[inline]
    pub fn to_screen(&self, p: Vector2) -> (i32, i32) {
        let s = self.to_screen_f(p);
        (s.x as i32, s.y as i32)
    }

    #[inline]
    fn to_screen_f(&self, p: Vector2) -> Vector2 {
        Vector2::new(
            self.center.x + p.x * self.pixels_per_meter,
            self.center.y - p.y * self.pixels_per_meter,
        )
    }

    /// Filled dove-tailed arrowhead at `pos` pointing along `heading`.
    /// `size` is in screen pixels, independent of the map scale.
    pub fn draw_arrow_head<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        pos: Vector2,
        heading: f32,
        size: f32,
        color: u32,
    ) {
        let p = self.to_screen_f(pos);
        // Screen y is flipped, so the forward vector is too
        let u = Vector2::new(heading.cos(), -heading.sin()) * size;
        let v = u.perpendicular();

        let corners = [p + u, p - u + v, p, p - u - v];
        let points = corners.map(|c| (c.x as i32, c.y as i32));
        surface.fill_polygon(&points, color);
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::color::{BLACK, RED};
    use crate::surface::FrameBuffer;

    #[test]
    fn origin_maps_to_center_and_y_is_flipped() {
        let view = MapView::new(100, 60, 5.0);
        assert_eq!(view.to_screen(Vector2::ZERO), (50, 30));
        assert_eq!(view.to_screen(Vector2::new(2.0, 0.0)), (60, 30));
        assert_eq!(view.to_screen(Vector2::new(0.0, 2.0)), (50, 20));
    }

    #[test]
    fn arrow_points_along_heading() {
        let mut fb = FrameBuffer::new(40, 40);
        let view = MapView::new(40, 40, 1.0);
        // Facing +y, which is up on screen
        view.draw_arrow_head(&mut fb, Vector2::ZERO, FRAC_PI_2, 8.0, RED);

        let lit_above = (0..20).any(|y| fb.pixel(20, y) == RED);
        let lit_far_below = (26..40).any(|y| fb.pixel(20, y) == RED);
        assert!(lit_above);
        assert!(!lit_far_below);
        assert_eq!(fb.pixel(0, 0), BLACK);
    }
}
