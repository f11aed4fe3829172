//! # Fly-Through Camera
//!
//! Camera state for a free-flying first-person view. Orientation is stored as
//! yaw and pitch angles; the orthonormal `front`/`right`/`up` basis is derived
//! from them whenever they change.
//!
//! ## Design Principles
//! - **Library-agnostic**: No graphics API types in camera math
//! - **Explicit mutation**: Only the input controller moves or turns the camera
//! - **Right-handed, Y-up**: Matches the OpenGL conventions of the shaders

use crate::config::CameraConfig;
use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// Pitch limit in degrees; keeps the view from flipping over the poles
pub const PITCH_LIMIT_DEGREES: f32 = 89.0;

/// Projection used when composing the frame's matrices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    /// Perspective projection using the camera's field of view
    #[default]
    Perspective,
    /// Symmetric orthographic projection
    Orthographic,
}

/// Directions the camera can be moved in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    /// Along `front`
    Forward,
    /// Against `front`
    Backward,
    /// Against `right`
    Left,
    /// Along `right`
    Right,
    /// Along `up`
    Up,
    /// Against `up`
    Down,
}

/// First-person camera
///
/// # Coordinate System
/// Standard right-handed Y-up world space. A yaw of -90 degrees with zero
/// pitch looks down -Z.
///
/// # Angle Derivation
/// Yaw and pitch are derived from the initial front vector, so the first
/// mouse movement continues from the configured view direction instead of
/// snapping to a default orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Unit view direction
    pub front: Vec3,

    /// Unit camera up vector, orthogonal to `front`
    pub up: Vec3,

    /// Unit camera right vector
    pub right: Vec3,

    /// World up vector used to rebuild the basis
    pub world_up: Vec3,

    /// Heading in degrees
    pub yaw: f32,

    /// Elevation in degrees, clamped to ±[`PITCH_LIMIT_DEGREES`]
    pub pitch: f32,

    /// Vertical field of view in degrees
    pub fov_degrees: f32,

    /// Movement speed in units per second
    pub movement_speed: f32,

    /// Degrees of rotation per unit of cursor travel
    pub mouse_sensitivity: f32,
}

impl Camera {
    /// Create a camera looking along `front`
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `front` - Initial view direction, need not be normalized
    /// * `world_up` - World up vector
    /// * `fov_degrees` - Vertical field of view in degrees
    pub fn new(position: Vec3, front: Vec3, world_up: Vec3, fov_degrees: f32) -> Self {
        let direction = front.normalize();
        let yaw = utils::rad_to_deg(direction.z.atan2(direction.x));
        let pitch = utils::rad_to_deg(direction.y.clamp(-1.0, 1.0).asin())
            .clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);

        let mut camera = Self {
            position,
            front: direction,
            up: world_up.normalize(),
            right: Vec3::x(),
            world_up: world_up.normalize(),
            yaw,
            pitch,
            fov_degrees,
            movement_speed: 5.0,
            mouse_sensitivity: 0.1,
        };
        camera.update_vectors();
        camera
    }

    /// Create a camera from configuration
    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self::new(config.position(), config.front(), config.up(), config.fov_degrees);
        camera.movement_speed = config.movement_speed;
        camera.mouse_sensitivity = config.mouse_sensitivity;
        camera
    }

    /// Generate the world-to-camera matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.position + self.front, self.up)
    }

    /// Move the camera `distance` units in `direction`
    pub fn translate(&mut self, direction: CameraMovement, distance: f32) {
        let axis = match direction {
            CameraMovement::Forward => self.front,
            CameraMovement::Backward => -self.front,
            CameraMovement::Left => -self.right,
            CameraMovement::Right => self.right,
            CameraMovement::Up => self.up,
            CameraMovement::Down => -self.up,
        };
        self.position += axis * distance;
    }

    /// Turn the camera by the given angle deltas in degrees
    ///
    /// Pitch is clamped so the camera never looks straight up or down.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
        self.update_vectors();
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (utils::deg_to_rad(self.yaw), utils::deg_to_rad(self.pitch));
        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize();
        self.right = self.front.cross(&self.world_up).normalize();
        self.up = self.right.cross(&self.front).normalize();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_angles_follow_initial_front() {
        let camera = Camera::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -3.0), Vec3::y(), 45.0);

        assert_relative_eq!(camera.yaw, -90.0, epsilon = 1e-4);
        assert_relative_eq!(camera.pitch, 0.0, epsilon = 1e-4);
        assert_relative_eq!(camera.front, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
        assert_relative_eq!(camera.right, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_default_front_is_preserved() {
        let camera = Camera::default();
        assert_relative_eq!(camera.front, Vec3::new(0.0, -0.5, -2.0).normalize(), epsilon = 1e-5);
        assert_relative_eq!(camera.position, Vec3::new(0.0, 5.0, 12.0));
    }

    #[test]
    fn test_basis_stays_orthonormal() {
        let mut camera = Camera::default();
        camera.rotate(37.0, 20.0);

        assert_relative_eq!(camera.front.norm(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(camera.front.dot(&camera.right), 0.0, epsilon = 1e-5);
        assert_relative_eq!(camera.front.dot(&camera.up), 0.0, epsilon = 1e-5);
        assert_relative_eq!(camera.right.dot(&camera.world_up), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = Camera::default();
        camera.rotate(0.0, 500.0);
        assert_relative_eq!(camera.pitch, PITCH_LIMIT_DEGREES);

        camera.rotate(0.0, -1000.0);
        assert_relative_eq!(camera.pitch, -PITCH_LIMIT_DEGREES);
    }

    #[test]
    fn test_translate_along_basis() {
        let mut camera = Camera::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0), Vec3::y(), 45.0);
        camera.translate(CameraMovement::Forward, 2.0);
        camera.translate(CameraMovement::Right, 1.0);
        camera.translate(CameraMovement::Down, 0.5);

        assert_relative_eq!(camera.position, Vec3::new(1.0, -0.5, -2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_view_matrix_moves_eye_to_origin() {
        let camera = Camera::default();
        let eye = camera.view_matrix().transform_point(&camera.position.into());
        assert_relative_eq!(eye.coords, Vec3::zeros(), epsilon = 1e-4);
    }
}
