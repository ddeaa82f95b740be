use std::sync::Arc;

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::config::AppConfig;
use crate::gfx::{
    camera::{input, ViewManager},
    rendering::Renderer,
    scene::SceneManager,
    shader::ShaderManager,
};
use crate::time::FrameClock;

/// Records one frame: camera first, then the scene, into `shader`.
pub fn record_frame(
    view: &mut ViewManager,
    scene: &SceneManager,
    shader: &mut ShaderManager,
    delta_time: f32,
) {
    shader.begin_frame();
    view.prepare_scene_view(shader, delta_time);
    scene.render_scene(shader);
}

pub struct StillLifeApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    config: AppConfig,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    view: ViewManager,
    scene: SceneManager,
    shader: ShaderManager,
    clock: FrameClock,
    fatal: Option<anyhow::Error>,
}

impl StillLifeApp {
    /// Creates the event loop and prepares the scene on the CPU.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;

        let mut shader = ShaderManager::new();
        let mut scene = SceneManager::new();
        scene.prepare_scene(&mut shader, &config.asset_dir);

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                view: ViewManager::new(&config),
                config,
                window: None,
                renderer: None,
                scene,
                shader,
                clock: FrameClock::new(),
                fatal: None,
            },
        })
    }

    /// Runs the event loop until the window is closed.
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .context("event loop already consumed")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .context("event loop terminated abnormally")?;

        match self.app_state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_config = &self.config.window;
        let window = event_loop
            .create_window(
                WindowAttributes::default()
                    .with_title(window_config.title.clone())
                    .with_inner_size(LogicalSize::new(window_config.width, window_config.height)),
            )
            .context("failed to create window")?;
        let window = Arc::new(window);

        let PhysicalSize { width, height } = window.inner_size();
        let mut renderer = pollster::block_on(Renderer::new(window.clone(), width, height))
            .context("failed to initialise the renderer")?;
        renderer.upload_meshes(self.scene.meshes());
        renderer.bind_scene_textures(self.scene.textures());

        self.view.resize(width, height);
        self.clock.reset();
        self.window = Some(window);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{:#}", err);
        self.fatal = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init_graphics(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if input::apply_window_event(&mut self.view, &event) {
            return;
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            }
            | WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.view.resize(width, height);
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(width, height);
                }
            }
            WindowEvent::RedrawRequested => {
                let frame = self.clock.tick();
                record_frame(&mut self.view, &self.scene, &mut self.shader, frame.dt);
                if frame.frame_index == 0 {
                    log::info!("First frame: {} draw calls", self.shader.draw_calls().len());
                }

                let Some(renderer) = self.renderer.as_mut() else {
                    return;
                };
                if let Err(err) = renderer.render_frame(&self.shader) {
                    self.fail(event_loop, anyhow::Error::new(err).context("failed to render frame"));
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
