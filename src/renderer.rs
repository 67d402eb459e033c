use crate::camera::Camera;
use crate::color::BLACK;
use crate::debug::DebugOptions;
use crate::surface::FrameBuffer;
use crate::world::World;

/// Draws one complete frame: background, walls, then the map overlay if enabled.
pub fn render_frame(
    frame: &mut FrameBuffer,
    world: &mut World,
    camera: &Camera,
    options: &DebugOptions,
) {
    frame.clear(BLACK);

    world.render_walls(camera, frame, options);

    if options.show_map {
        world.render_map(camera, frame);
    }
}
