//! Camera input controller
//!
//! Turns held keys, cursor positions and scroll offsets into camera motion.
//! The controller owns only the mouse-seeding state and the scroll tuning;
//! the camera it drives is passed in on every call.

use crate::config::ControlConfig;
use crate::input::{CameraAction, KeyState};
use crate::render::camera::{Camera, CameraMovement, ProjectionMode};

/// Whether the render loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    /// Keep rendering
    Continue,
    /// Close the window
    Exit,
}

/// Result of processing one frame of keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardOutcome {
    /// Whether the loop should continue
    pub control: FrameControl,
    /// Projection requested this frame, if any
    pub projection: Option<ProjectionMode>,
}

const MOVEMENT_BINDINGS: [(CameraAction, CameraMovement); 6] = [
    (CameraAction::Forward, CameraMovement::Forward),
    (CameraAction::Backward, CameraMovement::Backward),
    (CameraAction::Left, CameraMovement::Left),
    (CameraAction::Right, CameraMovement::Right),
    (CameraAction::Up, CameraMovement::Up),
    (CameraAction::Down, CameraMovement::Down),
];

/// Keyboard, mouse and scroll handling for a fly-through camera
#[derive(Debug, Clone, PartialEq)]
pub struct CameraController {
    first_mouse: bool,
    last_x: f64,
    last_y: f64,
    speed_step: f32,
    min_speed: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(&ControlConfig::default())
    }
}

impl CameraController {
    /// Create a controller that waits for its first cursor event
    pub fn new(config: &ControlConfig) -> Self {
        Self {
            first_mouse: true,
            last_x: 0.0,
            last_y: 0.0,
            speed_step: config.speed_step,
            min_speed: config.min_speed,
        }
    }

    /// Apply held movement keys and report exit and projection requests
    ///
    /// Movement distance is `delta_time * movement_speed` per held key. When
    /// both projection keys are held, orthographic wins.
    pub fn process_keyboard(&self, camera: &mut Camera, keys: &dyn KeyState, delta_time: f32) -> KeyboardOutcome {
        if keys.is_pressed(CameraAction::Exit) {
            return KeyboardOutcome {
                control: FrameControl::Exit,
                projection: None,
            };
        }

        let distance = camera.movement_speed * delta_time;
        for (action, movement) in MOVEMENT_BINDINGS {
            if keys.is_pressed(action) {
                camera.translate(movement, distance);
            }
        }

        let projection = if keys.is_pressed(CameraAction::Orthographic) {
            Some(ProjectionMode::Orthographic)
        } else if keys.is_pressed(CameraAction::Perspective) {
            Some(ProjectionMode::Perspective)
        } else {
            None
        };

        KeyboardOutcome {
            control: FrameControl::Continue,
            projection,
        }
    }

    /// Turn the camera from an absolute cursor position
    ///
    /// The first event after creation or [`reactivate`](Self::reactivate)
    /// only records the position.
    pub fn process_mouse_move(&mut self, camera: &mut Camera, x: f64, y: f64) {
        if self.first_mouse {
            self.last_x = x;
            self.last_y = y;
            self.first_mouse = false;
            return;
        }

        // Screen y grows downward
        let x_offset = (x - self.last_x) as f32;
        let y_offset = (self.last_y - y) as f32;
        self.last_x = x;
        self.last_y = y;

        camera.rotate(x_offset * camera.mouse_sensitivity, y_offset * camera.mouse_sensitivity);
    }

    /// Adjust movement speed from a vertical scroll offset
    pub fn process_scroll(&self, camera: &mut Camera, y_offset: f64) {
        let previous = camera.movement_speed;
        if y_offset > 0.0 {
            camera.movement_speed += self.speed_step;
        } else if y_offset < 0.0 {
            camera.movement_speed = (camera.movement_speed - self.speed_step).max(self.min_speed);
        }

        if (camera.movement_speed - previous).abs() > f32::EPSILON {
            log::debug!("Camera speed {:.1} -> {:.1}", previous, camera.movement_speed);
        }
    }

    /// Make the next cursor event re-seed the last position
    pub fn reactivate(&mut self) {
        self.first_mouse = true;
    }

    /// Whether the next cursor event only seeds the position
    pub const fn awaiting_first_mouse(&self) -> bool {
        self.first_mouse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::input::PressedActions;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_mouse_event_only_seeds() {
        let mut controller = CameraController::default();
        let mut camera = Camera::default();
        let before = camera.clone();

        controller.process_mouse_move(&mut camera, 640.0, 400.0);
        assert_eq!(camera, before);
        assert!(!controller.awaiting_first_mouse());

        controller.process_mouse_move(&mut camera, 650.0, 380.0);
        assert_relative_eq!(camera.yaw, before.yaw + 10.0 * 0.1, epsilon = 1e-4);
        assert_relative_eq!(camera.pitch, before.pitch + 20.0 * 0.1, epsilon = 1e-4);
    }

    #[test]
    fn test_reactivate_reseeds() {
        let mut controller = CameraController::default();
        let mut camera = Camera::default();
        controller.process_mouse_move(&mut camera, 0.0, 0.0);
        controller.reactivate();

        let before = camera.clone();
        controller.process_mouse_move(&mut camera, 500.0, 500.0);
        assert_eq!(camera, before);
    }

    #[test]
    fn test_mouse_offsets_are_proportional() {
        let mut controller = CameraController::default();
        let mut camera = Camera::default();
        controller.process_mouse_move(&mut camera, 100.0, 100.0);

        let start_yaw = camera.yaw;
        controller.process_mouse_move(&mut camera, 110.0, 100.0);
        let single = camera.yaw - start_yaw;
        controller.process_mouse_move(&mut camera, 130.0, 100.0);
        let double = camera.yaw - start_yaw - single;

        assert_relative_eq!(double, 2.0 * single, epsilon = 1e-4);
    }

    #[test]
    fn test_scroll_down_is_floored() {
        let controller = CameraController::default();
        let mut camera = Camera::default();
        assert_relative_eq!(camera.movement_speed, 5.0);

        for _ in 0..100 {
            controller.process_scroll(&mut camera, -1.0);
        }
        assert_eq!(camera.movement_speed, 1.0);

        controller.process_scroll(&mut camera, 1.0);
        assert_relative_eq!(camera.movement_speed, 3.0);

        controller.process_scroll(&mut camera, 0.0);
        assert_relative_eq!(camera.movement_speed, 3.0);
    }

    #[test]
    fn test_keyboard_moves_by_speed_times_delta() {
        let controller = CameraController::default();
        let mut camera = Camera::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0), Vec3::y(), 45.0);
        camera.movement_speed = 4.0;

        let keys = PressedActions::of(&[CameraAction::Forward, CameraAction::Up]);
        let outcome = controller.process_keyboard(&mut camera, &keys, 0.5);

        assert_eq!(outcome.control, FrameControl::Continue);
        assert_eq!(outcome.projection, None);
        assert_relative_eq!(camera.position, Vec3::new(0.0, 2.0, -2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let controller = CameraController::default();
        let mut camera = Camera::default();
        let start = camera.position;

        let keys = PressedActions::of(&[CameraAction::Left, CameraAction::Right]);
        controller.process_keyboard(&mut camera, &keys, 1.0);

        assert_relative_eq!(camera.position, start, epsilon = 1e-5);
    }

    #[test]
    fn test_projection_and_exit_requests() {
        let controller = CameraController::default();
        let mut camera = Camera::default();

        let outcome = controller.process_keyboard(&mut camera, &PressedActions::of(&[CameraAction::Orthographic]), 0.1);
        assert_eq!(outcome.projection, Some(ProjectionMode::Orthographic));

        let outcome = controller.process_keyboard(&mut camera, &PressedActions::of(&[CameraAction::Perspective]), 0.1);
        assert_eq!(outcome.projection, Some(ProjectionMode::Perspective));

        let start = camera.position;
        let keys = PressedActions::of(&[CameraAction::Exit, CameraAction::Forward]);
        let outcome = controller.process_keyboard(&mut camera, &keys, 1.0);
        assert_eq!(outcome.control, FrameControl::Exit);
        assert_eq!(camera.position, start);
    }
}
