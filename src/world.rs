use rayon::prelude::*;
use tracing::{debug, trace};

use crate::camera::Camera;
use crate::color::{RED, WHITE, YELLOW};
use crate::debug::DebugOptions;
use crate::intersection::{Intersection, RayTrace};
use crate::map::{ARROW_SIZE, MISS_RAY_LENGTH, MapView};
use crate::ray::Ray;
use crate::surface::Surface;
use crate::wall::Wall;

pub struct World {
    walls: Vec<Wall>,
    /// Per-column rays of the last render, only filled while rays are recorded
    traces: Vec<Option<RayTrace>>,
}

/// Nearest wall along `ray`, contesting every wall once.
fn nearest_hit<'w>(walls: &'w [Wall], ray: &Ray) -> Intersection<'w> {
    walls.iter().fold(Intersection::new(), |mut best, wall| {
        wall.get_first_intersection(ray, &mut best);
        best
    })
}

impl World {
    pub fn new(walls: Vec<Wall>) -> Self {
        debug!(walls = walls.len(), "world built");
        Self {
            walls,
            traces: Vec::new(),
        }
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Rays recorded by the last [`World::render_walls`], indexed by column.
    /// Empty unless that render recorded rays.
    pub fn ray_traces(&self) -> &[Option<RayTrace>] {
        &self.traces
    }

    /// First wall hit by `ray`, or an invalid intersection if none is.
    pub fn get_first_intersection(&self, ray: &Ray) -> Intersection<'_> {
        nearest_hit(&self.walls, ray)
    }

    /// Draws the first-person view of the walls into `surface`, one strip per column.
    ///
    /// Columns are cast in parallel and drawn in order afterwards. Panics if
    /// the surface is narrower than 2 columns.
    pub fn render_walls<S: Surface + ?Sized>(
        &mut self,
        camera: &Camera,
        surface: &mut S,
        options: &DebugOptions,
    ) {
        let width = surface.width();
        let height = surface.height();
        let columns = options.column_range(width);
        let record = options.record_rays();

        let walls = &self.walls;
        let casts: Vec<(usize, Ray, f32, Intersection<'_>)> = columns
            .into_par_iter()
            .map(|x| {
                let (ray, s) = camera.compute_ray(x, width);
                (x, ray, s, nearest_hit(walls, &ray))
            })
            .collect();

        self.traces.clear();
        if record {
            self.traces.resize(width, None);
        }

        let mut hits = 0usize;
        for (x, ray, s, hit) in &casts {
            if let Some(wall) = hit.wall {
                // 1/distance is the perspective, dividing by s undoes the fisheye
                let scale = 1.0 / (hit.distance * s);
                wall.draw_strip(surface, *x, height, hit.u, scale);
                hits += 1;
            }
            if record {
                self.traces[*x] = Some(RayTrace::new(*ray, hit));
            }
        }

        trace!(columns = casts.len(), hits, record, "walls rendered");
    }

    /// Draws a top-down view: recorded rays, walls and the camera.
    pub fn render_map<S: Surface + ?Sized>(&self, camera: &Camera, surface: &mut S) {
        let view = MapView::for_surface(&*surface);

        if self.traces.len() == surface.width() {
            let from = view.to_screen(camera.position());
            for trace in self.traces.iter().flatten() {
                let distance = trace.distance.unwrap_or(MISS_RAY_LENGTH);
                let to = view.to_screen(trace.ray.point_at(distance));
                surface.draw_line(from, to, YELLOW);
            }
        }

        for wall in &self.walls {
            wall.render_map(surface, &view, WHITE);
        }

        view.draw_arrow_head(
            surface,
            camera.position(),
            camera.heading(),
            ARROW_SIZE,
            RED,
        );
    }
}
