//! Math utilities and types
//!
//! Provides the nalgebra aliases used across the engine plus the Euler-angle
//! transform that every draw directive composes into a model matrix.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix4,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Scale, Euler rotation (degrees) and translation for a single draw
///
/// Rotations are applied X first, then Y, then Z, all in object space. The
/// composed matrix is `Translation * RotZ * RotY * RotX * Scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Non-uniform scale factors
    pub scale: Vec3,

    /// Rotation around X, Y and Z in degrees
    pub rotation_degrees: Vec3,

    /// World-space translation
    pub translation: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: Vec3::new(1.0, 1.0, 1.0),
            rotation_degrees: Vec3::zeros(),
            translation: Vec3::zeros(),
        }
    }
}

impl Transform {
    /// Create a transform from its three components
    pub const fn new(scale: Vec3, rotation_degrees: Vec3, translation: Vec3) -> Self {
        Self {
            scale,
            rotation_degrees,
            translation,
        }
    }

    /// Create a transform with scale and translation only
    pub fn scaled_at(scale: Vec3, translation: Vec3) -> Self {
        Self {
            scale,
            translation,
            ..Default::default()
        }
    }

    /// Compose the model matrix
    pub fn to_matrix(&self) -> Mat4 {
        let rotation_x = Mat4::rotation_x(utils::deg_to_rad(self.rotation_degrees.x));
        let rotation_y = Mat4::rotation_y(utils::deg_to_rad(self.rotation_degrees.y));
        let rotation_z = Mat4::rotation_z(utils::deg_to_rad(self.rotation_degrees.z));

        Mat4::new_translation(&self.translation)
            * rotation_z
            * rotation_y
            * rotation_x
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        self.to_matrix().transform_point(&point)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }
}

/// Extension trait for Mat4 with additional convenience methods
///
/// All projections follow the OpenGL clip-space convention (right-handed view
/// space, depth mapped to [-1, 1]).
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis
    fn rotation_z(angle: f32) -> Mat4;

    /// Create a perspective projection matrix
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a symmetric orthographic projection of half-extent `extent`
    fn orthographic(extent: f32, near: f32, far: f32) -> Mat4;

    /// Create a look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_perspective(aspect, fov_y, near, far)
    }

    fn orthographic(extent: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_orthographic(-extent, extent, -extent, extent, near, far)
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
    }
}
