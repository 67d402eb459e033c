use crate::ray::Ray;
use crate::wall::Wall;

/// Closest hit found so far along one ray.
///
/// Starts out as "no hit" and only ever tightens: see
/// [`Wall::get_first_intersection`].
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'w> {
    /// Distance along the ray, `+inf` while nothing was hit
    pub distance: f32,
    /// Fraction of the way from `v0` to `v1` of the hit wall
    pub u: f32,
    pub wall: Option<&'w Wall>,
}

impl Default for Intersection<'_> {
    fn default() -> Self {
        Self {
            distance: f32::INFINITY,
            u: 0.0,
            wall: None,
        }
    }
}

impl<'w> Intersection<'w> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.wall.is_some()
    }
}

/// One cast column kept for the minimap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayTrace {
    pub ray: Ray,
    /// `None` when the ray escaped the world
    pub distance: Option<f32>,
}

impl RayTrace {
    pub fn new(ray: Ray, hit: &Intersection<'_>) -> Self {
        Self {
            ray,
            distance: hit.is_valid().then_some(hit.distance),
        }
    }
}
