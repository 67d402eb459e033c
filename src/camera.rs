use std::f32::consts::PI;

use crate::ray::Ray;
use crate::vector2::Vector2;

pub const DEFAULT_FIELD_OF_VIEW: f32 = 60.0 * PI / 180.0;

#[derive(Debug, Clone)]
pub struct Camera {
    position: Vector2, // (x, y) position in world space
    heading: f32, // radians, counterclockwise from +x, never wrapped
    pitch: f32, // radians, carried for the host; the 2.5D projection ignores it
    field_of_view: f32, // horizontal, radians, fixed at construction
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vector2::ZERO, PI / 2.0)
    }
}

impl Camera {
    pub fn new(position: Vector2, heading: f32) -> Self {
        Self::with_field_of_view(position, heading, DEFAULT_FIELD_OF_VIEW)
    }

    pub fn with_field_of_view(position: Vector2, heading: f32, field_of_view: f32) -> Self {
        assert!(
            field_of_view > 0.0 && field_of_view < PI,
            "field of view must be in (0, pi), got {field_of_view}"
        );
        Self {
            position,
            heading,
            pitch: 0.0,
            field_of_view,
        }
    }

    #[inline]
    pub fn position(&self) -> Vector2 {
        self.position
    }

    #[inline]
    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn set_heading(&mut self, heading: f32) {
        self.heading = heading;
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    #[inline]
    pub fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    /// Unit vector along the heading.
    #[inline]
    pub fn view_vector(&self) -> Vector2 {
        Vector2::from_angle(self.heading)
    }

    /// Moves `distance` along the heading.
    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.view_vector() * distance;
    }

    /// Moves `distance` perpendicular to the heading, positive is to the left.
    pub fn strafe(&mut self, distance: f32) {
        // perpendicular() points right of the view
        self.position -= self.view_vector().perpendicular() * distance;
    }

    /// Turns by `angle` radians, positive is counterclockwise (left).
    pub fn turn(&mut self, angle: f32) {
        self.heading += angle;
    }

    /// Ray through column `x` of a viewport `viewport_width` columns wide.
    ///
    /// Column 0 looks `fov/2` left of the heading and the last column `fov/2`
    /// right of it. Also returns `cos(offset)`, the factor that turns a
    /// distance along the ray into depth along the view axis.
    pub fn compute_ray(&self, x: usize, viewport_width: usize) -> (Ray, f32) {
        assert!(
            viewport_width >= 2,
            "viewport must be at least 2 columns wide, got {viewport_width}"
        );

        // Leftmost column has the largest angular offset
        let offset = self.field_of_view * (0.5 - x as f32 / (viewport_width - 1) as f32);
        let angle = self.heading + offset;

        (
            Ray::new(self.position, Vector2::from_angle(angle)),
            offset.cos(),
        )
    }
}
