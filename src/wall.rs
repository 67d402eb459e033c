use std::fmt;
use std::sync::Arc;

use crate::intersection::Intersection;
use crate::map::MapView;
use crate::ray::Ray;
use crate::surface::Surface;
use crate::texture::Texture;
use crate::vector2::Vector2;

/// Acceptable roundoff when testing for parallel rays
const EPSILON: f32 = 1e-5;

/// One-sided textured rectangle standing on the floor along `v0`-`v1`.
pub struct Wall {
    v0: Vector2,
    v1: Vector2,
    /// (v1 - v0) / |v1 - v0|^2, so a dot product gives the parametric position directly
    direction: Vector2,
    /// Unit vector out of the visible side
    normal: Vector2,
    height: f32,
    texture: Arc<dyn Texture>,
}

impl fmt::Debug for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wall")
            .field("v0", &self.v0)
            .field("v1", &self.v1)
            .field("height", &self.height)
            .field(
                "texture",
                &format_args!("{}x{}", self.texture.width(), self.texture.height()),
            )
            .finish()
    }
}

impl Wall {
    /// Panics if `v0 == v1`.
    pub fn new(v0: Vector2, v1: Vector2, height: f32, texture: Arc<dyn Texture>) -> Self {
        assert!(v0 != v1, "degenerate wall: both endpoints at {v0}");

        let edge = v1 - v0;
        let direction = edge / edge.squared_length();
        let mut normal = direction.perpendicular();
        normal.unitize();

        Self {
            v0,
            v1,
            direction,
            normal,
            height,
            texture,
        }
    }

    #[inline]
    pub fn v0(&self) -> Vector2 {
        self.v0
    }

    #[inline]
    pub fn v1(&self) -> Vector2 {
        self.v1
    }

    #[inline]
    pub fn normal(&self) -> Vector2 {
        self.normal
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn texture(&self) -> &Arc<dyn Texture> {
        &self.texture
    }

    /// Point at parametric position `u` along the wall.
    #[inline]
    pub fn point_at(&self, u: f32) -> Vector2 {
        self.v0 + (self.v1 - self.v0) * u
    }

    /// Replaces `intersection` with this wall's hit if the ray reaches the
    /// wall strictly before the hit already recorded. Never loosens it.
    pub fn get_first_intersection<'w>(&'w self, ray: &Ray, intersection: &mut Intersection<'w>) {
        // Rate at which the ray approaches the wall line
        let rate = -ray.direction.dot(self.normal);
        if rate.abs() <= EPSILON {
            return; // parallel
        }

        // Signed perpendicular separation of the origin from the wall line
        let sep = (ray.origin - self.v0).dot(self.normal);

        let distance = sep / rate;
        if distance < 0.0 || distance >= intersection.distance {
            return;
        }

        let u = (ray.point_at(distance) - self.v0).dot(self.direction);
        if !(0.0..=1.0).contains(&u) {
            return; // misses the segment
        }

        intersection.distance = distance;
        intersection.u = u;
        intersection.wall = Some(self);
    }

    /// Draws column `x` of the wall, vertically centred in a viewport
    /// `viewport_height` rows tall. `scale` is the inverse depth of the hit.
    pub fn draw_strip<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        x: usize,
        viewport_height: usize,
        u: f32,
        scale: f32,
    ) {
        let h = viewport_height as i64;
        // float -> int casts saturate; keep the sums below from overflowing
        let strip_height = (scale * viewport_height as f32 * self.height) as i64;
        let strip_height = strip_height.min(i32::MAX as i64);
        if strip_height <= 0 {
            return;
        }

        let dy0 = (h - strip_height) / 2;
        let dy1 = (h + strip_height) / 2;
        let span = dy1 - dy0;
        if span <= 0 {
            return;
        }

        let tex_w = self.texture.width();
        let tex_h = self.texture.height();
        let sx = ((u * tex_w as f32) as usize).min(tex_w - 1);

        let texture = &self.texture;
        surface.draw_column(x, dy0..dy1, &mut |y| {
            let sy = (((y - dy0) * tex_h as i64) / span) as usize;
            texture.rgb(sx, sy.min(tex_h - 1))
        });
    }

    /// Draws the wall as a segment on the minimap.
    pub fn render_map<S: Surface + ?Sized>(&self, surface: &mut S, view: &MapView, color: u32) {
        surface.draw_line(view.to_screen(self.v0), view.to_screen(self.v1), color);
    }
}
