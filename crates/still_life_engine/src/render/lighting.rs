//! Lighting system
//!
//! One directional light plus a small fixed number of point lights, matching
//! the uniform arrays the fragment shader declares.

use crate::foundation::math::Vec3;

/// Number of point light slots in the shader
pub const MAX_POINT_LIGHTS: usize = 4;

/// Light types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightType {
    /// Directional light (like sunlight)
    Directional,
    /// Point light (like a lightbulb)
    Point,
}

/// Light source
///
/// Directional lights use `direction`, point lights use `position`.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Light type
    pub light_type: LightType,
    /// Light position (for point lights)
    pub position: Vec3,
    /// Light direction (for directional lights)
    pub direction: Vec3,
    /// Ambient contribution
    pub ambient: Vec3,
    /// Diffuse contribution
    pub diffuse: Vec3,
    /// Specular contribution
    pub specular: Vec3,
}

impl Light {
    /// Create a directional light
    pub fn directional(direction: Vec3, ambient: Vec3, diffuse: Vec3, specular: Vec3) -> Self {
        Self {
            light_type: LightType::Directional,
            position: Vec3::zeros(),
            direction: direction.normalize(),
            ambient,
            diffuse,
            specular,
        }
    }

    /// Create a point light
    pub fn point(position: Vec3, ambient: Vec3, diffuse: Vec3, specular: Vec3) -> Self {
        Self {
            light_type: LightType::Point,
            position,
            direction: Vec3::zeros(),
            ambient,
            diffuse,
            specular,
        }
    }
}

/// Lights active in the scene
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightingEnvironment {
    /// The directional light, if any
    pub directional: Option<Light>,
    /// Point lights, at most [`MAX_POINT_LIGHTS`]
    pub point_lights: Vec<Light>,
}

impl LightingEnvironment {
    /// Create an environment with no lights
    pub const fn new() -> Self {
        Self {
            directional: None,
            point_lights: Vec::new(),
        }
    }

    /// Add a light to the environment
    ///
    /// A second directional light replaces the first. Point lights beyond the
    /// shader's slot count are dropped with a warning.
    pub fn add_light(mut self, light: Light) -> Self {
        match light.light_type {
            LightType::Directional => {
                if self.directional.is_some() {
                    log::warn!("Replacing existing directional light");
                }
                self.directional = Some(light);
            }
            LightType::Point => {
                if self.point_lights.len() < MAX_POINT_LIGHTS {
                    self.point_lights.push(light);
                } else {
                    log::warn!("Ignoring point light at {:?}: all {} slots are used", light.position, MAX_POINT_LIGHTS);
                }
            }
        }
        self
    }

    /// Whether any light is active
    pub fn has_lights(&self) -> bool {
        self.directional.is_some() || !self.point_lights.is_empty()
    }
}
