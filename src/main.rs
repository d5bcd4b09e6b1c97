//! Waveplane - interactive wave-particle water simulation
//!
//! Random impacts send rings of wave particles across a square pond; their
//! summed displacement is resampled into a height-field mesh every tick.

use std::sync::Arc;
use std::time::Instant;

use anyhow::anyhow;
use clap::Parser;
use log::{error, info};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use waveplane::camera::CameraSystem;
use waveplane::cli::Args;
use waveplane::params::*;
use waveplane::rendering::{ParticleInstance, RenderSystem, Uniforms};
use waveplane::water::{ManualClock, WallClock, WaterSystem};

/// Roughness change per key press
const ROUGHNESS_STEP: f32 = 1.0;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation systems
    water: WaterSystem,
    camera: CameraSystem,

    // Configuration
    render_config: RenderConfig,
    colors: SurfaceColors,

    // Time tracking
    start_time: Instant,
}

impl App {
    fn new(water: WaterSystem, render_config: RenderConfig) -> Self {
        Self {
            window: None,
            render_system: None,
            water,
            camera: CameraSystem::new(CameraOrbit::default()),
            render_config,
            colors: SurfaceColors::default(),
            start_time: Instant::now(),
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Space => {
                let playing = self.water.toggle_playing();
                println!("Playing: {}", if playing { "on" } else { "off" });
            }
            KeyCode::KeyG => self.water.spawn_random_wave(),
            KeyCode::ArrowUp | KeyCode::ArrowDown => {
                let delta = if key == KeyCode::ArrowUp {
                    ROUGHNESS_STEP
                } else {
                    -ROUGHNESS_STEP
                };
                self.water.set_roughness(self.water.roughness() + delta);
                println!("Roughness: {:.2}", self.water.roughness());
            }
            KeyCode::KeyV => {
                self.render_config.show_particles = !self.render_config.show_particles;
            }
            KeyCode::KeyC => {
                self.camera.toggle_paused();
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &winit::event_loop::ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        // Create window
        let window_attributes = Window::default_attributes()
            .with_title("Waveplane - Wave Particle Water")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        // Initialize rendering system
        let render_system = match pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            self.water.surface(),
            &self.colors,
        )) {
            Ok(render_system) => render_system,
            Err(e) => {
                error!("Failed to initialize renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        println!("\nWaveplane is running!");
        println!("  Space - Toggle automatic waves");
        println!("  G     - Generate a wave");
        println!("  Up/Dn - Adjust roughness");
        println!("  V     - Toggle particle markers");
        println!("  C     - Pause/resume camera orbit");
        println!("  ESC   - Quit\n");

        self.window = Some(window);
        self.render_system = Some(render_system);
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                self.render_config.window_width = size.width.max(1);
                self.render_config.window_height = size.height.max(1);
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(key),
                        ..
                    },
                ..
            } => {
                if key == KeyCode::Escape {
                    event_loop.exit();
                } else {
                    self.handle_key(key);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }
}

impl App {
    /// Advance the simulation if due, then render a single frame
    fn render_frame(&mut self) {
        let Some(render_system) = self.render_system.as_mut() else {
            return;
        };

        let time_s = self.start_time.elapsed().as_secs_f32();

        // Upload the surface only when a tick rebuilt it
        let report = self.water.simulate();
        if report.ticked {
            render_system.update_vertices(&self.water.surface().vertices);

            if self.render_config.show_particles {
                let base_height = self.water.params().base_height;
                let instances: Vec<ParticleInstance> = self
                    .water
                    .active_particles()
                    .map(|p| ParticleInstance::from_particle(p, base_height))
                    .collect();
                render_system.update_particles(&instances);
            }
        }

        let (view_proj, camera_pos) = self
            .camera
            .create_view_proj_matrix(time_s, &self.render_config);
        let uniforms = Uniforms::new(
            view_proj,
            camera_pos,
            &self.colors,
            self.render_config.particle_marker_size,
            time_s,
        );
        render_system.update_uniforms(&uniforms);

        match render_system.render(self.render_config.show_particles) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_system.resize(
                    self.render_config.window_width,
                    self.render_config.window_height,
                );
            }
            Err(e) => error!("Render error: {:?}", e),
        }
    }
}

/// Run the simulation for `ticks` ticks on a stepped clock and report the result
fn run_headless(args: &Args, ticks: u64) -> anyhow::Result<()> {
    let params = args.water_params();
    let tick_rate = params.tick_rate_s as f64;
    let clock = ManualClock::new();
    let mut water = WaterSystem::new(params, clock.clone(), args.rng()).map_err(|e| anyhow!(e))?;

    if !water.is_playing() {
        water.spawn_random_wave();
    }

    let mut spawned = 0;
    while water.tick_count() < ticks {
        // Slightly longer than one tick interval so every step is due
        clock.advance(tick_rate * 1.01);
        if water.simulate().spawned {
            spawned += 1;
        }
    }

    let (lo, hi) = water.height_field().min_max();
    println!(
        "{} ticks: {} wavefronts spawned, {} fronts / {} particles live, heights {:.3}..{:.3}",
        water.tick_count(),
        spawned,
        water.wavefronts().len(),
        water.wavefronts().particle_count(),
        lo,
        hi
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(ticks) = args.headless {
        return run_headless(&args, ticks);
    }

    println!("Waveplane - wave particle water simulation");
    println!("Initializing systems...\n");

    let water = WaterSystem::new(args.water_params(), WallClock::new(), args.rng())
        .map_err(|e| anyhow!(e))?;
    info!("Roughness {:.2}, playing: {}", water.roughness(), water.is_playing());

    let mut app = App::new(water, args.render_config());
    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
