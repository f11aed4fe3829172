//! # Still-Life Configuration
//!
//! All tunables of the viewer in one serde structure. Every section has
//! defaults matching the hand-authored scene, so a missing config file or a
//! partially filled one still yields a working setup.
//!
//! ```toml
//! [window]
//! width = 1280
//! height = 720
//!
//! [controls]
//! speed_step = 1.0
//! ```

use serde::{Serialize, Deserialize};
use std::path::PathBuf;

use super::{Config, ConfigError};
use crate::foundation::math::Vec3;

/// Top-level configuration for the viewer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StillLifeConfig {
    /// Window creation parameters
    pub window: WindowConfig,
    /// Initial camera state
    pub camera: CameraConfig,
    /// Input tuning
    pub controls: ControlConfig,
    /// Clip planes and orthographic extent
    pub projection: ProjectionConfig,
    /// Asset locations and limits
    pub assets: AssetConfig,
}

impl Config for StillLifeConfig {}

impl StillLifeConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window.validate()?;
        self.camera.validate()?;
        self.controls.validate()?;
        self.projection.validate()?;
        self.assets.validate()
    }

    /// Aspect ratio of the configured window
    pub fn aspect_ratio(&self) -> f32 {
        self.window.width as f32 / self.window.height as f32
    }
}

/// Window creation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Window title
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 800,
            title: "Still Life".to_string(),
        }
    }
}

impl WindowConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.title.is_empty() {
            return Err(ConfigError::Invalid("window title cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Initial camera state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera position in world space
    pub position: [f32; 3],
    /// Initial look direction (need not be normalized)
    pub front: [f32; 3],
    /// World up vector
    pub up: [f32; 3],
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Initial movement speed in units per second
    pub movement_speed: f32,
    /// Degrees of rotation per pixel of cursor travel
    pub mouse_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 5.0, 12.0],
            front: [0.0, -0.5, -2.0],
            up: [0.0, 1.0, 0.0],
            fov_degrees: 80.0,
            movement_speed: 5.0,
            mouse_sensitivity: 0.1,
        }
    }
}

const UP_AXIS_TOLERANCE: f32 = 1e-3;

impl CameraConfig {
    /// Position as a vector
    pub fn position(&self) -> Vec3 {
        Vec3::from(self.position)
    }

    /// Front direction as a vector
    pub fn front(&self) -> Vec3 {
        Vec3::from(self.front)
    }

    /// World up as a vector
    pub fn up(&self) -> Vec3 {
        Vec3::from(self.up)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.front().norm() <= f32::EPSILON || self.up().norm() <= f32::EPSILON {
            return Err(ConfigError::Invalid("camera front and up must be non-zero".to_string()));
        }
        // Yaw and pitch are measured in a Y-up world
        if (self.up().normalize() - Vec3::y()).norm() > UP_AXIS_TOLERANCE {
            return Err(ConfigError::Invalid(format!("camera up must point along +Y, got {:?}", self.up)));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "field of view must be in (0, 180) degrees, got {}",
                self.fov_degrees
            )));
        }
        if self.movement_speed <= 0.0 || self.mouse_sensitivity <= 0.0 {
            return Err(ConfigError::Invalid(
                "movement speed and mouse sensitivity must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Input tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Movement speed change per scroll notch
    pub speed_step: f32,
    /// Lowest movement speed scrolling can reach
    pub min_speed: f32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            speed_step: 2.0,
            min_speed: 1.0,
        }
    }
}

impl ControlConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_speed <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "minimum speed must be positive, got {}",
                self.min_speed
            )));
        }
        if self.speed_step < 0.0 {
            return Err(ConfigError::Invalid("speed step cannot be negative".to_string()));
        }
        Ok(())
    }
}

/// Clip planes and orthographic extent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Near clip plane distance
    pub near: f32,
    /// Far clip plane distance
    pub far: f32,
    /// Half-size of the orthographic view box
    pub ortho_extent: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            near: 0.1,
            far: 100.0,
            ortho_extent: 10.0,
        }
    }
}

impl ProjectionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.near <= 0.0 || self.far <= self.near {
            return Err(ConfigError::Invalid(format!(
                "clip planes must satisfy 0 < near < far, got near={} far={}",
                self.near, self.far
            )));
        }
        if self.ortho_extent <= 0.0 {
            return Err(ConfigError::Invalid("orthographic extent must be positive".to_string()));
        }
        Ok(())
    }
}

/// Asset locations and limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory holding the scene's texture images
    pub texture_dir: PathBuf,
    /// Upper bound on simultaneously bound texture units
    pub max_texture_units: usize,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            texture_dir: PathBuf::from("textures"),
            max_texture_units: 16,
        }
    }
}

impl AssetConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_texture_units == 0 {
            return Err(ConfigError::Invalid("at least one texture unit is required".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = StillLifeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window.width, 1000);
        assert_eq!(config.window.height, 800);
        assert_eq!(config.camera.fov_degrees, 80.0);
        assert_eq!(config.controls.min_speed, 1.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: StillLifeConfig = toml::from_str(
            r#"
            [controls]
            speed_step = 0.5

            [projection]
            ortho_extent = 4.0
            "#,
        )
        .unwrap();

        assert_eq!(config.controls.speed_step, 0.5);
        assert_eq!(config.controls.min_speed, 1.0);
        assert_eq!(config.projection.ortho_extent, 4.0);
        assert_eq!(config.projection.far, 100.0);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_ron_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("still_life_config_{}.ron", std::process::id()));
        let mut config = StillLifeConfig::default();
        config.window.title = "Round Trip".to_string();

        config.save_to_file(&path).unwrap();
        let loaded = StillLifeConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let result = StillLifeConfig::load_or_default("definitely_missing.yaml");
        assert!(result.is_ok(), "missing files fall back to defaults");

        let err = StillLifeConfig::default().save_to_file("config.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut config = StillLifeConfig::default();
        config.controls.min_speed = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = StillLifeConfig::default();
        config.projection.near = 200.0;
        assert!(config.validate().is_err());

        let mut config = StillLifeConfig::default();
        config.camera.front = [0.0, 0.0, 0.0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_up_must_be_world_y() {
        let mut config = StillLifeConfig::default();
        config.camera.front = [1.0, 0.0, 0.0];
        config.camera.up = [1.0, 0.0, 0.0];
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.camera.up = [0.0, -1.0, 0.0];
        assert!(config.validate().is_err());

        config.camera.up = [0.0, 3.0, 0.0];
        assert!(config.validate().is_ok());
        let view = crate::render::Camera::from_config(&config.camera).view_matrix();
        assert!(view.iter().all(|v| v.is_finite()));
    }
}
