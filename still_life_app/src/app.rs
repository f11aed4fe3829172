//! The viewer: window, GL backends, scene and camera wired into one loop

use std::rc::Rc;

use glow::HasContext;
use thiserror::Error;

use still_life_engine::config::StillLifeConfig;
use still_life_engine::input::FrameControl;
use still_life_engine::render::{still_life, RenderError, SceneRenderer, ShaderStateBinder, ViewManager};

use crate::gl::{GlError, GlShaderProgram, GlShapeMeshes, GlTextureBackend};
use crate::window::{GlfwWindow, InputEvent, WindowError};

/// Fatal application errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Window or context creation failed
    #[error(transparent)]
    Window(#[from] WindowError),

    /// Shader or GL object creation failed
    #[error(transparent)]
    Gl(#[from] GlError),

    /// Scene preparation or drawing failed
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Still-life viewer application
///
/// GL resources are declared before the window so they are released while
/// the context still exists.
pub struct StillLifeApp {
    renderer: SceneRenderer<GlShapeMeshes, GlTextureBackend>,
    shader: GlShaderProgram,
    view: ViewManager,
    gl: Rc<glow::Context>,
    window: GlfwWindow,
}

impl StillLifeApp {
    /// Open the window, compile shaders and prepare the scene
    pub fn new(config: &StillLifeConfig) -> Result<Self, AppError> {
        log::info!("Creating window...");
        let mut window = GlfwWindow::new(&config.window)?;
        let gl = Rc::new(window.load_gl());

        unsafe {
            gl.enable(glow::DEPTH_TEST);
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
        }

        let mut shader = GlShaderProgram::scene(Rc::clone(&gl))?;
        shader.use_program();

        let mut renderer = SceneRenderer::new(
            GlShapeMeshes::new(Rc::clone(&gl)),
            GlTextureBackend::new(Rc::clone(&gl)),
            still_life::scene(&config.assets.texture_dir),
            config.assets.max_texture_units,
        );

        let mut view = ViewManager::new(config);
        let (width, height) = window.framebuffer_size();
        view.set_aspect_ratio(width, height);

        let summary = renderer.prepare(&mut ShaderStateBinder::new(&mut shader))?;
        for failure in &summary.texture_failures {
            log::warn!("Texture '{}' unavailable: {}", failure.tag, failure.reason);
        }

        Ok(Self {
            renderer,
            shader,
            view,
            gl,
            window,
        })
    }

    /// Run until the window closes
    pub fn run(mut self) -> Result<(), AppError> {
        log::info!("Entering render loop");
        self.view.restart_clock();

        while !self.window.should_close() {
            self.window.poll_events();
            for event in self.window.drain_events() {
                self.handle_event(event);
            }

            unsafe { self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT) };
            self.shader.use_program();

            let mut binder = ShaderStateBinder::new(&mut self.shader);
            let control = self.view.prepare_scene_view(&self.window, &mut binder);
            self.renderer.render_frame(&mut binder)?;

            if control == FrameControl::Exit {
                self.window.set_should_close(true);
            }
            self.window.swap_buffers();
        }

        log::info!(
            "Rendered {} frames, {:.1} fps average",
            self.view.timer().frame_count(),
            self.view.timer().average_fps()
        );
        self.renderer.release();
        Ok(())
    }

    fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::CursorMoved(x, y) => self.view.handle_cursor(x, y),
            InputEvent::Scrolled(y_offset) => self.view.handle_scroll(y_offset),
            InputEvent::FocusGained => self.view.reactivate_mouse(),
            InputEvent::Resized(width, height) => {
                let (w, h) = (i32::try_from(width).unwrap_or(i32::MAX), i32::try_from(height).unwrap_or(i32::MAX));
                unsafe { self.gl.viewport(0, 0, w, h) };
                self.view.set_aspect_ratio(width, height);
            }
        }
    }
}
