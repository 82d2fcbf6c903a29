use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use earth_viewer::cli::Cli;
use earth_viewer::frame::FpsCounter;
use earth_viewer::renderer::ui::FrameStats;
use earth_viewer::renderer::SceneRenderer;
use earth_viewer::{ControlPanel, Lifecycle, SceneComposer, TextureLoader, ViewerConfig, Viewport};

const RETRY_INTERVAL: Duration = Duration::from_secs(1);
const PIXELS_PER_WHEEL_STEP: f32 = 50.0;

struct App {
    config: ViewerConfig,
    panel: ControlPanel,
    window: Option<Arc<Window>>,
    renderer: Option<SceneRenderer>,
    composer: Option<SceneComposer>,
    fps: FpsCounter,
    cursor: (f32, f32),
    suspended: bool,
}

impl App {
    fn new(config: ViewerConfig) -> Self {
        Self {
            panel: ControlPanel::new(config.show_ui),
            config,
            window: None,
            renderer: None,
            composer: None,
            fps: FpsCounter::default(),
            cursor: (0.0, 0.0),
            suspended: false,
        }
    }

    fn viewport_for(window: &Window, size: PhysicalSize<u32>) -> Viewport {
        Viewport::from_physical(size.width, size.height, window.scale_factor())
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>> {
        let attributes = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = event_loop
            .create_window(attributes)
            .context("Failed to create window")?;
        Ok(Arc::new(window))
    }

    /// First resume: window, renderer and composer
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = self.create_window(event_loop)?;
        let viewport = Self::viewport_for(&window, window.inner_size());
        let renderer = pollster::block_on(SceneRenderer::new(window.clone(), viewport))
            .context("Failed to initialize renderer")?;

        let loader = TextureLoader::new(self.config.textures_dir.clone());
        let mut composer = SceneComposer::initialize(viewport, self.config.variant, &loader);

        for (name, value) in &self.config.params {
            match self.panel.submit(&mut composer, name, *value) {
                Ok(applied) => info!("Config sets {} = {:?}", name, applied),
                Err(e) => warn!("Ignoring config parameter: {:#}", e),
            }
        }

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.composer = Some(composer);
        Ok(())
    }

    /// Recreate GPU state after a lost context. Returns true on success.
    fn rebuild_renderer(&mut self) -> bool {
        let (Some(window), Some(composer)) = (&self.window, &mut self.composer) else {
            return false;
        };
        let viewport = Self::viewport_for(window, window.inner_size());

        match pollster::block_on(SceneRenderer::new(window.clone(), viewport)) {
            Ok(renderer) => {
                composer.on_viewport_resize(viewport);
                composer.on_context_restored();
                self.renderer = Some(renderer);
                true
            }
            Err(e) => {
                warn!("Renderer rebuild failed, retrying: {:#}", e);
                false
            }
        }
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        let Some(window) = &self.window else {
            return;
        };
        let viewport = Self::viewport_for(window, size);
        if let Some(composer) = &mut self.composer {
            composer.on_viewport_resize(viewport);
        }
        if let Some(renderer) = &mut self.renderer {
            renderer.resize(viewport);
        }
    }

    fn redraw(&mut self) {
        let (Some(composer), Some(renderer), Some(window)) =
            (&mut self.composer, &mut self.renderer, &self.window)
        else {
            return;
        };
        let Some(frame) = composer.begin_frame() else {
            return;
        };
        self.fps.record(frame.delta);

        let stats = FrameStats {
            fps: self.fps.fps(),
            frame: frame.number,
            lifecycle: composer.lifecycle(),
            resolution: renderer.size(),
        };

        match renderer.render(composer, &self.panel, window, &stats) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                composer.on_context_lost();
                renderer.reconfigure();
                composer.on_context_restored();
                // Present the already ticked frame on the fresh surface
                if let Err(e) = renderer.render(composer, &self.panel, window, &stats) {
                    warn!("Render retry after reconfigure failed: {}", e);
                }
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("Out of GPU memory; rendering suspended");
                composer.on_context_lost();
                self.renderer = None;
            }
            Err(e) => warn!("Render error: {}", e),
        }
    }

    fn on_pointer(&mut self, event: &WindowEvent) {
        let (Some(composer), Some(window)) = (&mut self.composer, &self.window) else {
            return;
        };
        let height = composer.viewport().height as f32;
        let controls = composer.controls_mut();

        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(window.scale_factor());
                self.cursor = (logical.x, logical.y);
                controls.pointer_move(logical.x, logical.y, height);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => controls.pointer_down(self.cursor.0, self.cursor.1),
                ElementState::Released => controls.pointer_up(),
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_WHEEL_STEP,
                };
                controls.zoom(steps);
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.suspended = false;

        if self.window.is_none() {
            if let Err(e) = self.start(event_loop) {
                error!("{:#}", e);
                event_loop.exit();
            }
        } else if self.renderer.is_none() {
            self.rebuild_renderer();
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.suspended = true;
        if let Some(composer) = &mut self.composer {
            composer.on_context_lost();
        }
        self.renderer = None;
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                if let Some(composer) = &mut self.composer {
                    composer.dispose();
                }
                self.renderer = None;
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.resize(size),
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    self.resize(size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            WindowEvent::CursorMoved { .. }
            | WindowEvent::MouseInput { .. }
            | WindowEvent::MouseWheel { .. } => self.on_pointer(&event),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(reason) = self.renderer.as_ref().and_then(|r| r.take_device_lost()) {
            warn!("Graphics device lost: {}", reason);
            if let Some(composer) = &mut self.composer {
                composer.on_context_lost();
            }
            self.renderer = None;
        }

        let Some(composer) = &self.composer else {
            return;
        };

        match composer.lifecycle() {
            Lifecycle::Disposed => {
                event_loop.exit();
                return;
            }
            Lifecycle::ContextLost if self.renderer.is_none() && !self.suspended => {
                if !self.rebuild_renderer() {
                    event_loop
                        .set_control_flow(ControlFlow::WaitUntil(Instant::now() + RETRY_INTERVAL));
                    return;
                }
            }
            _ => {}
        }

        event_loop.set_control_flow(ControlFlow::Poll);
        let reschedule = self
            .composer
            .as_ref()
            .is_some_and(|c| c.frame_loop().should_reschedule());
        if let (true, Some(window)) = (reschedule, &self.window) {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = ViewerConfig::resolve(&cli)?;
    info!(
        "Starting {:?} viewer, textures from {:?}",
        config.variant, config.textures_dir
    );

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);

    info!("Controls: drag to orbit, scroll to zoom, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
