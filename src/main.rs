//! Truelayer fluid field viewer
//!
//! Opens a window showing the pointer-reactive noise background, or records
//! it headlessly to PNG frames with `--record`.

use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use glam::DVec2;
use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use truelayer_fluid::background::FluidBackground;
use truelayer_fluid::cli::Args;
use truelayer_fluid::error::FluidError;
use truelayer_fluid::field::FluidField;
use truelayer_fluid::motion::{CursorFollower, CursorVariant};
use truelayer_fluid::noise::NoiseKind;
use truelayer_fluid::params::{CursorParams, FieldParams, Palette, RenderConfig};
use truelayer_fluid::recording;
use truelayer_fluid::rendering::WindowSurface;

/// Main application state
struct App {
    // Configuration
    field_params: FieldParams,
    noise_kind: NoiseKind,
    render_config: RenderConfig,

    // Window and rendering
    surface: Option<WindowSurface>,
    background: Option<FluidBackground>,
    cursor: CursorFollower,

    // Time tracking
    last_frame: Instant,

    error: Option<FluidError>,
}

impl App {
    fn new(field_params: FieldParams, noise_kind: NoiseKind, render_config: RenderConfig) -> Self {
        Self {
            field_params,
            noise_kind,
            render_config,
            surface: None,
            background: None,
            cursor: CursorFollower::new(CursorParams::default()),
            last_frame: Instant::now(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), FluidError> {
        let window_attributes = Window::default_attributes()
            .with_title(self.render_config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(event_loop.create_window(window_attributes)?);
        let mut surface = pollster::block_on(WindowSurface::new(
            Arc::clone(&window),
            self.render_config.max_pixel_ratio,
        ))?;

        let field = FluidField::with_kind(
            self.noise_kind,
            self.field_params.clone(),
            Palette::default(),
        );
        self.background = FluidBackground::mount(&mut surface, field);
        if self.background.is_none() {
            warn!("Fluid background could not be mounted");
        }

        info!("Truelayer fluid field is running, press ESC to quit");

        self.surface = Some(surface);
        self.last_frame = Instant::now();
        Ok(())
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(background) = self.background.take() {
            background.unmount();
        }
        event_loop.exit();
    }

    /// Render a single frame
    fn render_frame(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let Some(background) = self.background.as_mut() else {
            return;
        };

        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f64();
        self.last_frame = now;

        if !background.frame(surface) {
            return;
        }

        // Cursor ring on top of the field
        let scale = surface.window().scale_factor();
        self.cursor.step(dt);
        self.cursor.paint(surface.canvas_mut(), scale);

        surface.present();
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        let running = self
            .background
            .as_ref()
            .is_some_and(|background| background.is_running());
        if let (true, Some(surface)) = (running, &self.surface) {
            surface.window().request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.init(event_loop) {
            error!("Initialization failed: {}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.shutdown(event_loop),
            WindowEvent::Resized(size) => {
                if let Some(surface) = self.surface.as_mut() {
                    surface.resize(size);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(surface) = self.surface.as_ref() {
                    surface.pointer_moved(position);
                    let scale = surface.window().scale_factor();
                    self.cursor
                        .set_target(DVec2::new(position.x, position.y) / scale);
                }
            }
            WindowEvent::MouseInput { state, .. } => {
                let variant = match state {
                    ElementState::Pressed => CursorVariant::Link,
                    ElementState::Released => CursorVariant::Default,
                };
                self.cursor.set_variant(variant);
            }
            WindowEvent::RedrawRequested => self.render_frame(),
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let field_params = args.field_params();
    field_params.validate()?;
    let noise_kind = args.parse_noise_kind();

    if let Some(config) = args.recording_config() {
        let field = FluidField::with_kind(noise_kind, field_params, Palette::default());
        let frames = recording::record(&config, field)?;
        info!("Wrote {} frames to {}", frames, config.frames_dir().display());
        return Ok(());
    }

    info!("Truelayer fluid field (seed {})", field_params.noise_seed);

    let mut app = App::new(field_params, noise_kind, args.render_config());
    let event_loop = EventLoop::new().map_err(FluidError::from)?;
    event_loop.run_app(&mut app).map_err(FluidError::from)?;

    match app.error.take() {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
