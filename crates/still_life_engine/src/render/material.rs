//! Material system for rendering
//!
//! Materials are Phong reflectance triples addressed by tag. The registry is
//! filled once while the scene is prepared and only read afterwards.

use crate::foundation::math::Vec3;

/// Phong reflectance properties
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Lookup tag
    pub tag: String,

    /// Diffuse reflectance (RGB)
    pub diffuse: Vec3,

    /// Specular reflectance (RGB)
    pub specular: Vec3,

    /// Specular exponent
    pub shininess: f32,
}

impl Material {
    /// Create a new material
    pub fn new(tag: impl Into<String>, diffuse: Vec3, specular: Vec3, shininess: f32) -> Self {
        Self {
            tag: tag.into(),
            diffuse,
            specular,
            shininess,
        }
    }
}

/// Ordered, tag-addressed material table
#[derive(Debug, Clone, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
}

impl MaterialRegistry {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self { materials: Vec::new() }
    }

    /// Append a material
    ///
    /// Tags are not required to be unique; lookups return the earliest entry.
    pub fn define_material(&mut self, tag: impl Into<String>, diffuse: Vec3, specular: Vec3, shininess: f32) {
        let material = Material::new(tag, diffuse, specular, shininess);
        if self.find_material(&material.tag).is_some() {
            log::warn!("Material '{}' is already defined, the first definition wins", material.tag);
        }
        self.materials.push(material);
    }

    /// First material tagged `tag`
    pub fn find_material(&self, tag: &str) -> Option<&Material> {
        self.materials.iter().find(|material| material.tag == tag)
    }

    /// Number of defined materials
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether no material is defined
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Iterate over materials in definition order
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }
}

impl Extend<Material> for MaterialRegistry {
    fn extend<I: IntoIterator<Item = Material>>(&mut self, iter: I) {
        for material in iter {
            self.define_material(material.tag, material.diffuse, material.specular, material.shininess);
        }
    }
}
