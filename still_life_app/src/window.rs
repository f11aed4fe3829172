//! GLFW window with an OpenGL 3.3 core context
//!
//! Owns the GLFW instance, the window and its event receiver. Window events
//! the viewer cares about are translated into [`InputEvent`]s; held keys are
//! exposed through the engine's [`KeyState`] trait.

use glfw::{Action, Context, Key, WindowEvent};
use thiserror::Error;

use still_life_engine::config::WindowConfig;
use still_life_engine::input::{CameraAction, KeyState};

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW could not be initialized
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// The window or its GL context could not be created
    #[error("Window creation failed")]
    CreationFailed,
}

/// Window events that drive the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to an absolute position
    CursorMoved(f64, f64),
    /// Vertical scroll offset
    Scrolled(f64),
    /// The window regained focus
    FocusGained,
    /// Framebuffer size changed
    Resized(u32, u32),
}

impl InputEvent {
    /// Translate a GLFW event, dropping the ones the viewer ignores
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match *event {
            WindowEvent::CursorPos(x, y) => Some(Self::CursorMoved(x, y)),
            WindowEvent::Scroll(_, y) => Some(Self::Scrolled(y)),
            WindowEvent::Focus(true) => Some(Self::FocusGained),
            WindowEvent::FramebufferSize(width, height) => {
                Some(Self::Resized(width.max(0) as u32, height.max(0) as u32))
            }
            _ => None,
        }
    }
}

/// Physical key bound to a camera action
pub const fn key_for(action: CameraAction) -> Key {
    match action {
        CameraAction::Exit => Key::Escape,
        CameraAction::Forward => Key::W,
        CameraAction::Backward => Key::S,
        CameraAction::Left => Key::A,
        CameraAction::Right => Key::D,
        CameraAction::Up => Key::Q,
        CameraAction::Down => Key::E,
        CameraAction::Perspective => Key::P,
        CameraAction::Orthographic => Key::O,
    }
}

/// GLFW window wrapper with proper resource management
pub struct GlfwWindow {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
}

impl GlfwWindow {
    /// Create a window with a current OpenGL 3.3 core context
    pub fn new(config: &WindowConfig) -> Result<Self, WindowError> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| WindowError::InitializationFailed(format!("{e:?}")))?;

        glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(glfw::WindowHint::Resizable(true));

        let (mut window, events) = glfw
            .create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed)?;

        window.make_current();
        glfw.set_swap_interval(glfw::SwapInterval::Sync(1));

        // Mouse look needs an unbounded, hidden cursor
        window.set_cursor_mode(glfw::CursorMode::Disabled);
        window.set_cursor_pos_polling(true);
        window.set_scroll_polling(true);
        window.set_focus_polling(true);
        window.set_framebuffer_size_polling(true);

        log::info!("Created {}x{} window '{}'", config.width, config.height, config.title);

        Ok(Self { glfw, window, events })
    }

    /// Create a glow context from the window's GL function loader
    pub fn load_gl(&mut self) -> glow::Context {
        // SAFETY: the window's context was made current in `new` and outlives the returned context's use
        unsafe { glow::Context::from_loader_function(|name| self.window.get_proc_address(name) as *const _) }
    }

    /// Whether a close was requested
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Request or cancel a close
    pub fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    /// Process pending window system events
    pub fn poll_events(&mut self) {
        self.glfw.poll_events();
    }

    /// Take every event received since the last call
    pub fn drain_events(&self) -> Vec<InputEvent> {
        glfw::flush_messages(&self.events)
            .filter_map(|(_, event)| InputEvent::from_window_event(&event))
            .collect()
    }

    /// Present the back buffer
    pub fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    /// Current framebuffer size in pixels
    pub fn framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width.max(0) as u32, height.max(0) as u32)
    }
}

impl KeyState for GlfwWindow {
    fn is_pressed(&self, action: CameraAction) -> bool {
        self.window.get_key(key_for(action)) == Action::Press
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_translation() {
        assert_eq!(
            InputEvent::from_window_event(&WindowEvent::CursorPos(10.0, 20.0)),
            Some(InputEvent::CursorMoved(10.0, 20.0))
        );
        assert_eq!(
            InputEvent::from_window_event(&WindowEvent::Scroll(0.0, -1.0)),
            Some(InputEvent::Scrolled(-1.0))
        );
        assert_eq!(
            InputEvent::from_window_event(&WindowEvent::Focus(true)),
            Some(InputEvent::FocusGained)
        );
        assert_eq!(InputEvent::from_window_event(&WindowEvent::Focus(false)), None);
        assert_eq!(
            InputEvent::from_window_event(&WindowEvent::FramebufferSize(1280, 720)),
            Some(InputEvent::Resized(1280, 720))
        );
        assert_eq!(InputEvent::from_window_event(&WindowEvent::Close), None);
    }

    #[test]
    fn test_every_action_has_a_distinct_key() {
        let mut keys: Vec<_> = CameraAction::ALL.iter().map(|action| key_for(*action) as i32).collect();
        keys.sort_unstable();
        keys.dedup();

        assert_eq!(keys.len(), CameraAction::ALL.len());
        assert_eq!(key_for(CameraAction::Up), Key::Q);
        assert_eq!(key_for(CameraAction::Orthographic), Key::O);
    }
}
