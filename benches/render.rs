use std::hint::black_box;
use std::sync::Arc;
use std::time::Instant;

use raycast_engine::renderer::render_frame;
use raycast_engine::scene::{brick_texture, demo_world};
use raycast_engine::{Camera, DebugOptions, FrameBuffer, Texture, Vector2, Wall, World};

fn make_world(wall_count: usize) -> World {
    let tex: Arc<dyn Texture> = Arc::new(brick_texture().expect("brick texture"));
    let walls = (0..wall_count)
        .map(|i| {
            let y = 4.0 + i as f32;
            Wall::new(
                Vector2::new(-6.0, y),
                Vector2::new(6.0, y),
                4.0,
                tex.clone(),
            )
        })
        .collect();
    World::new(walls)
}

fn bench_frame(world: &mut World, width: usize, height: usize, iterations: usize) -> f64 {
    let camera = Camera::default();
    let options = DebugOptions {
        show_map: false,
        ..DebugOptions::default()
    };
    let mut frame = FrameBuffer::new(width, height);

    let start = Instant::now();
    for _ in 0..iterations {
        render_frame(black_box(&mut frame), world, black_box(&camera), &options);
    }
    let elapsed = start.elapsed();
    elapsed.as_secs_f64() / iterations as f64
}

fn bench_widths(iterations: usize) {
    let mut world = make_world(100);
    for width in [160, 320, 640, 1280] {
        let per_frame = bench_frame(&mut world, width, width * 19 / 30, iterations);
        println!(
            "  width {width:>5} (100 walls, {iterations} iters): {:.3} ms/frame",
            per_frame * 1e3
        );
    }
}

fn bench_wall_counts(iterations: usize) {
    for walls in [10, 100, 1_000, 10_000] {
        let mut world = make_world(walls);
        let per_frame = bench_frame(&mut world, 320, 200, iterations);
        println!(
            "  walls {walls:>5} (320 columns, {iterations} iters): {:.3} ms/frame",
            per_frame * 1e3
        );
    }
}

fn bench_demo_scene(iterations: usize) {
    let mut world = demo_world().expect("demo world");
    let per_frame = bench_frame(&mut world, 300, 190, iterations);
    println!(
        "  demo scene (300x190, {iterations} iters): {:.3} ms/frame",
        per_frame * 1e3
    );
}

fn main() {
    println!("=== render benchmarks ===");
    println!("column count:");
    bench_widths(50);
    println!("wall count:");
    bench_wall_counts(20);
    println!("demo:");
    bench_demo_scene(100);
}
