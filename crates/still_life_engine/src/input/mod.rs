//! Input management system
//!
//! The engine reasons about named actions, not physical keys. The window
//! layer maps its key codes onto [`CameraAction`]s through [`KeyState`].

pub mod controller;

pub use controller::{CameraController, FrameControl, KeyboardOutcome};

/// Actions the camera controls respond to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraAction {
    /// Close the window
    Exit,
    /// Move forward
    Forward,
    /// Move backward
    Backward,
    /// Strafe left
    Left,
    /// Strafe right
    Right,
    /// Move up
    Up,
    /// Move down
    Down,
    /// Switch to perspective projection
    Perspective,
    /// Switch to orthographic projection
    Orthographic,
}

impl CameraAction {
    /// Every action
    pub const ALL: [Self; 9] = [
        Self::Exit,
        Self::Forward,
        Self::Backward,
        Self::Left,
        Self::Right,
        Self::Up,
        Self::Down,
        Self::Perspective,
        Self::Orthographic,
    ];
}

/// Current pressed state of the camera actions
pub trait KeyState {
    /// Whether the key bound to `action` is held down
    fn is_pressed(&self, action: CameraAction) -> bool;
}

/// Key state backed by a list of held actions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PressedActions(pub Vec<CameraAction>);

impl PressedActions {
    /// No key held
    pub const fn none() -> Self {
        Self(Vec::new())
    }

    /// The given keys held
    pub fn of(actions: &[CameraAction]) -> Self {
        Self(actions.to_vec())
    }
}

impl KeyState for PressedActions {
    fn is_pressed(&self, action: CameraAction) -> bool {
        self.0.contains(&action)
    }
}
