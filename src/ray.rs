use crate::vector2::Vector2;

/// Half-line from `origin` along `direction`.
///
/// `direction` is unit length when produced by [`crate::Camera::compute_ray`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ray {
    pub origin: Vector2,
    pub direction: Vector2,
}

impl Ray {
    #[inline]
    pub fn new(origin: Vector2, direction: Vector2) -> Self {
        Self { origin, direction }
    }

    #[inline]
    pub fn point_at(&self, distance: f32) -> Vector2 {
        self.origin + self.direction * distance
    }
}
