use std::collections::HashSet;
use std::f32::consts::FRAC_PI_2;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow, ensure};
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use raycast_engine::renderer::render_frame;
use raycast_engine::scaler::{ScaleLut, blit_stretch, build_scale_lut};
use raycast_engine::{Camera, DebugOptions, FrameBuffer, Surface, Vector2, World, scene};

/// Metres per simulation tick
const WALK_SPEED: f32 = 0.3;
/// Radians per simulation tick
const TURN_SPEED: f32 = 3.5 * std::f32::consts::PI / 180.0;
/// Longest wall-clock gap fed to the simulation after a stall
const MAX_FRAME_TIME: Duration = Duration::from_millis(100);
/// Frames averaged per FPS sample
const TIMING_FRAMES: u32 = 10;

#[derive(Parser)]
#[command(name = "raycast_engine", about = "Column ray-casting renderer")]
struct Cli {
    /// Internal framebuffer width in pixels
    #[arg(long, default_value_t = 300)]
    width: usize,

    /// Internal framebuffer height in pixels
    #[arg(long, default_value_t = 190)]
    height: usize,

    /// Window pixels per framebuffer pixel
    #[arg(long, default_value_t = 2.0)]
    scale: f64,

    /// Simulation ticks per second
    #[arg(long, default_value_t = 30.0)]
    fps: f32,

    /// Horizontal field of view in degrees
    #[arg(long, default_value_t = 60.0)]
    fov: f32,

    /// Start with the map overlay hidden
    #[arg(long)]
    hide_map: bool,

    /// Start with cast rays drawn on the map
    #[arg(long)]
    show_rays: bool,

    /// Start casting only the centre column
    #[arg(long)]
    one_ray: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn validate(&self) -> Result<()> {
        ensure!(
            self.width >= 2,
            "--width must be at least 2, got {}",
            self.width
        );
        ensure!(self.height >= 1, "--height must be at least 1");
        ensure!(
            self.scale > 0.0,
            "--scale must be positive, got {}",
            self.scale
        );
        ensure!(self.fps > 0.0, "--fps must be positive, got {}", self.fps);
        ensure!(
            self.fov > 0.0 && self.fov < 180.0,
            "--fov must be between 0 and 180 degrees, got {}",
            self.fov
        );
        Ok(())
    }

    fn debug_options(&self) -> DebugOptions {
        DebugOptions {
            show_rays: self.show_rays,
            show_map: !self.hide_map,
            one_ray: self.one_ray,
        }
    }
}

/// Averages frame rate over several frames.
struct FpsCounter {
    frames: u32,
    start: Instant,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            frames: 0,
            start: Instant::now(),
        }
    }

    /// Returns a fresh sample every `TIMING_FRAMES` frames.
    fn tick(&mut self) -> Option<f32> {
        self.frames += 1;
        if self.frames < TIMING_FRAMES {
            return None;
        }
        let now = Instant::now();
        let fps = self.frames as f32 / now.duration_since(self.start).as_secs_f32();
        self.frames = 0;
        self.start = now;
        Some(fps)
    }
}

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    world: World,
    camera: Camera,
    options: DebugOptions,

    // Internal low-resolution frame, stretched to the window
    frame: FrameBuffer,
    window_scale: f64,
    scale_lut: ScaleLut,

    // Input and fixed-rate simulation
    keys_down: HashSet<KeyCode>,
    last_tick: Instant,
    tick_accumulator: Duration,
    tick_length: Duration,
    simulation_enabled: bool,
    rendering_enabled: bool,

    fps: FpsCounter,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(cli: &Cli) -> Result<Self> {
        let world = scene::demo_world().context("failed to build demo scene")?;
        let camera = Camera::with_field_of_view(Vector2::ZERO, FRAC_PI_2, cli.fov.to_radians());

        Ok(Self {
            window: None,
            surface: None,
            world,
            camera,
            options: cli.debug_options(),

            frame: FrameBuffer::new(cli.width, cli.height),
            window_scale: cli.scale,
            scale_lut: ScaleLut::empty(),

            keys_down: HashSet::new(),
            last_tick: Instant::now(),
            tick_accumulator: Duration::ZERO,
            tick_length: Duration::from_secs_f32(1.0 / cli.fps),
            simulation_enabled: true,
            rendering_enabled: true,

            fps: FpsCounter::new(),
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!("{err:#}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title("Ray Caster")
            .with_inner_size(LogicalSize::new(
                self.frame.width() as f64 * self.window_scale,
                self.frame.height() as f64 * self.window_scale,
            ));

        let window = Rc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| anyhow!("failed to create window: {e}"))?,
        );

        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| anyhow!("failed to create softbuffer context: {e}"))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| anyhow!("failed to create softbuffer surface: {e}"))?;

        let size = window.inner_size();
        self.rebuild_scale_lut(size.width as usize, size.height as usize);

        info!(
            width = self.frame.width(),
            height = self.frame.height(),
            walls = self.world.walls().len(),
            "window ready"
        );

        window.request_redraw();
        self.surface = Some(surface);
        self.window = Some(window);
        self.last_tick = Instant::now();
        Ok(())
    }

    fn rebuild_scale_lut(&mut self, dst_w: usize, dst_h: usize) {
        self.scale_lut = build_scale_lut(dst_w, dst_h, self.frame.width(), self.frame.height());
    }

    fn handle_key(
        &mut self,
        event_loop: &ActiveEventLoop,
        code: KeyCode,
        state: ElementState,
        repeat: bool,
    ) {
        match state {
            ElementState::Pressed => {
                self.keys_down.insert(code);
            }
            ElementState::Released => {
                self.keys_down.remove(&code);
                return;
            }
        }
        if repeat {
            return;
        }

        if code == KeyCode::Escape {
            event_loop.exit();
        } else {
            self.handle_toggle(code);
        }
    }

    /// Debug and simulation switches bound to single key presses.
    fn handle_toggle(&mut self, code: KeyCode) {
        match code {
            KeyCode::KeyM => {
                self.options.show_map = !self.options.show_map;
                info!(show_map = self.options.show_map, "toggled map");
            }
            KeyCode::KeyR => {
                self.options.show_rays = !self.options.show_rays;
                info!(show_rays = self.options.show_rays, "toggled rays");
            }
            KeyCode::KeyO => {
                self.options.one_ray = !self.options.one_ray;
                info!(one_ray = self.options.one_ray, "toggled one ray");
            }
            KeyCode::KeyP => {
                self.simulation_enabled = !self.simulation_enabled;
                info!(running = self.simulation_enabled, "toggled simulation");
            }
            KeyCode::KeyN => {
                self.simulation_enabled = false;
                self.step();
                debug!("single step");
            }
            KeyCode::KeyG => {
                self.rendering_enabled = !self.rendering_enabled;
                self.fps = FpsCounter::new();
                info!(rendering = self.rendering_enabled, "toggled rendering");
            }
            _ => {}
        }
    }

    fn held(&self, code: KeyCode) -> bool {
        self.keys_down.contains(&code)
    }

    /// Runs as many fixed simulation ticks as wall-clock time allows.
    fn advance_simulation(&mut self) {
        let now = Instant::now();
        // Cap to avoid huge jumps if the app was paused
        let dt = now.duration_since(self.last_tick).min(MAX_FRAME_TIME);
        self.last_tick = now;

        if !self.simulation_enabled {
            self.tick_accumulator = Duration::ZERO;
            return;
        }

        self.tick_accumulator += dt;
        while self.tick_accumulator >= self.tick_length {
            self.tick_accumulator -= self.tick_length;
            self.step();
        }
    }

    /// One simulation tick of camera control.
    fn step(&mut self) {
        if self.held(KeyCode::KeyW) {
            self.camera.move_forward(WALK_SPEED);
        } else if self.held(KeyCode::KeyS) {
            self.camera.move_forward(-WALK_SPEED / 2.0);
        }

        let shift = self.held(KeyCode::ShiftLeft) || self.held(KeyCode::ShiftRight);
        if self.held(KeyCode::KeyA) {
            if shift {
                self.camera.strafe(WALK_SPEED);
            } else {
                self.camera.turn(TURN_SPEED);
            }
        }
        if self.held(KeyCode::KeyD) {
            if shift {
                self.camera.strafe(-WALK_SPEED);
            } else {
                self.camera.turn(-TURN_SPEED);
            }
        }
    }

    fn redraw(&mut self, id: WindowId) -> Result<()> {
        self.advance_simulation();

        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return Ok(()),
        };

        let size = window.inner_size();
        let width = NonZeroU32::new(size.width);
        let height = NonZeroU32::new(size.height);
        let (Some(nw), Some(nh)) = (width, height) else {
            return Ok(()); // Minimized window, skip drawing
        };
        let (dw, dh) = (size.width as usize, size.height as usize);

        surface
            .resize(nw, nh)
            .map_err(|e| anyhow!("failed to resize surface: {e}"))?;
        if self.scale_lut.dst_width() != dw || self.scale_lut.dst_height() != dh {
            self.scale_lut = build_scale_lut(dw, dh, self.frame.width(), self.frame.height());
        }

        // With rendering off the previous frame is presented again
        if self.rendering_enabled {
            render_frame(&mut self.frame, &mut self.world, &self.camera, &self.options);
        }

        let mut buf = surface
            .buffer_mut()
            .map_err(|e| anyhow!("failed to map surface buffer: {e}"))?;
        blit_stretch(
            &mut buf,
            dw,
            self.frame.pixels(),
            self.frame.width(),
            &self.scale_lut,
        );
        buf.present()
            .map_err(|e| anyhow!("failed to present frame: {e}"))?;

        let sample = if self.rendering_enabled {
            self.fps.tick()
        } else {
            None
        };
        if let Some(fps) = sample {
            debug!(fps, "frame rate");
        }

        window.request_redraw();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("close requested; stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => self.handle_key(event_loop, code, state, repeat),

            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw(id) {
                    self.fail(event_loop, err);
                }
            }

            WindowEvent::Resized(new_size) => {
                self.rebuild_scale_lut(new_size.width as usize, new_size.height as usize);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    cli.validate()?;
    let mut app = App::new(&cli)?;

    let event_loop = EventLoop::new().map_err(|e| anyhow!("failed to create event loop: {e}"))?;
    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow!("event loop failed: {e}"))?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("raycast_engine").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_original_window() {
        let cli = parse(&[]);
        assert_eq!((cli.width, cli.height), (300, 190));
        assert_eq!(cli.scale, 2.0);
        assert_eq!(cli.fps, 30.0);
        assert!(cli.validate().is_ok());
        assert_eq!(cli.debug_options(), DebugOptions::default());
    }

    #[test]
    fn debug_flags() {
        let cli = parse(&["--hide-map", "--show-rays", "--one-ray"]);
        let options = cli.debug_options();
        assert!(!options.show_map);
        assert!(options.show_rays);
        assert!(options.one_ray);
    }

    #[test]
    fn rejects_bad_viewport() {
        assert!(parse(&["--width", "1"]).validate().is_err());
        assert!(parse(&["--fov", "180"]).validate().is_err());
        assert!(parse(&["--fps", "0"]).validate().is_err());
    }

    #[test]
    fn turning_keys_drive_the_camera() {
        let mut app = App::new(&parse(&[])).unwrap();
        let start = app.camera.heading();

        app.keys_down.insert(KeyCode::KeyA);
        app.step();
        assert!((app.camera.heading() - start - TURN_SPEED).abs() < 1e-6);

        app.keys_down.insert(KeyCode::ShiftLeft);
        app.step();
        // Facing +y, strafing left moves towards -x
        assert!(app.camera.position().x < 0.0);
    }

    #[test]
    fn paused_simulation_drops_ticks() {
        let mut app = App::new(&parse(&[])).unwrap();
        app.keys_down.insert(KeyCode::KeyW);

        app.handle_toggle(KeyCode::KeyP);
        assert!(!app.simulation_enabled);
        app.tick_accumulator = app.tick_length * 3;
        app.advance_simulation();
        assert_eq!(app.camera.position(), Vector2::ZERO);
        assert_eq!(app.tick_accumulator, Duration::ZERO);

        // Resumed, queued time turns into forward ticks again
        app.handle_toggle(KeyCode::KeyP);
        app.tick_accumulator = app.tick_length * 2;
        app.advance_simulation();
        assert!(app.camera.position().y >= 2.0 * WALK_SPEED - 1e-5);
    }

    #[test]
    fn single_step_pauses_and_runs_one_tick() {
        let mut app = App::new(&parse(&[])).unwrap();
        app.keys_down.insert(KeyCode::KeyW);

        app.handle_toggle(KeyCode::KeyN);
        assert!(!app.simulation_enabled);
        assert!((app.camera.position().y - WALK_SPEED).abs() < 1e-5);

        app.handle_toggle(KeyCode::KeyN);
        assert!((app.camera.position().y - 2.0 * WALK_SPEED).abs() < 1e-5);
    }

    #[test]
    fn toggles_flip_render_switches() {
        let mut app = App::new(&parse(&[])).unwrap();
        app.handle_toggle(KeyCode::KeyG);
        assert!(!app.rendering_enabled);
        app.handle_toggle(KeyCode::KeyM);
        assert!(!app.options.show_map);
        app.handle_toggle(KeyCode::KeyG);
        assert!(app.rendering_enabled);
    }
}
