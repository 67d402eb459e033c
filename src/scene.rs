//! The demo level: a front wall, an angled wall, and a long corridor of
//! parallel walls to the left that gives the renderer something to chew on.

use std::sync::Arc;

use crate::color::pack_rgb;
use crate::texture::{PixelTexture, Texture, TextureError};
use crate::vector2::Vector2;
use crate::wall::Wall;
use crate::world::World;

pub const WALL_HEIGHT: f32 = 4.0;
pub const CORRIDOR_WALLS: usize = 100;

pub fn brick_texture() -> Result<PixelTexture, TextureError> {
    PixelTexture::bricks(
        64,
        64,
        16,
        8,
        pack_rgb(170, 170, 160),
        pack_rgb(150, 60, 40),
    )
}

pub fn demo_world() -> Result<World, TextureError> {
    let tex: Arc<dyn Texture> = Arc::new(brick_texture()?);
    Ok(World::new(demo_walls(&tex)))
}

pub fn demo_walls(tex: &Arc<dyn Texture>) -> Vec<Wall> {
    let mut walls = vec![
        Wall::new(
            Vector2::new(-2.0, 4.0),
            Vector2::new(2.0, 4.0),
            WALL_HEIGHT,
            tex.clone(),
        ),
        Wall::new(
            Vector2::new(2.0, 4.0),
            Vector2::new(5.0, 3.0),
            WALL_HEIGHT,
            tex.clone(),
        ),
    ];

    for i in 0..CORRIDOR_WALLS {
        let y = 4.0 + i as f32;
        walls.push(Wall::new(
            Vector2::new(-6.0, y),
            Vector2::new(-2.0, y),
            WALL_HEIGHT,
            tex.clone(),
        ));
    }

    walls
}
