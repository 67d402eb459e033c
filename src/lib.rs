//! Column ray caster for a 2.5D world of one-sided textured walls.
//!
//! Every frame casts one ray per screen column from the [`Camera`], finds
//! the nearest [`Wall`] it crosses and draws that wall's texture as a
//! vertical strip, scaled by inverse perpendicular depth.

pub mod camera;
pub mod color;
pub mod debug;
pub mod intersection;
pub mod map;
pub mod ray;
pub mod renderer;
pub mod scaler;
pub mod scene;
pub mod surface;
pub mod texture;
pub mod vector2;
pub mod wall;
pub mod world;

pub use camera::Camera;
pub use debug::DebugOptions;
pub use intersection::{Intersection, RayTrace};
pub use ray::Ray;
pub use surface::{FrameBuffer, Surface};
pub use texture::{PixelTexture, Texture, TextureError};
pub use vector2::Vector2;
pub use wall::Wall;
pub use world::World;
