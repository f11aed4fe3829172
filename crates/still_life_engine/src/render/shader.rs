//! Shader state binding
//!
//! [`ShaderStateBinder`] is the only path from scene logic to the active
//! shader program. It knows the uniform names the still-life shaders declare
//! and translates matrices, colors, texture slots, materials and lights into
//! typed uniform writes on a [`ShaderUniforms`] implementation.
//!
//! A binder may be detached (no shader program available). Every push on a
//! detached binder is silently skipped, which lets the scene logic run
//! headless in tests.

use crate::foundation::math::{Mat4, Vec2, Vec3, Vec4};
use crate::render::lighting::{Light, LightingEnvironment, MAX_POINT_LIGHTS};
use crate::render::material::{Material, MaterialRegistry};
use crate::render::texture::TextureRegistry;

/// RGBA color with components in [0, 1]
pub type Rgba = Vec4;

/// Uniform names declared by the still-life shaders
pub mod uniforms {
    /// Model matrix
    pub const MODEL: &str = "model";
    /// View matrix
    pub const VIEW: &str = "view";
    /// Projection matrix
    pub const PROJECTION: &str = "projection";
    /// Camera position in world space
    pub const VIEW_POSITION: &str = "viewPosition";
    /// Flat object color
    pub const OBJECT_COLOR: &str = "objectColor";
    /// Object texture sampler
    pub const OBJECT_TEXTURE: &str = "objectTexture";
    /// Texture enable flag
    pub const USE_TEXTURE: &str = "bUseTexture";
    /// Lighting enable flag
    pub const USE_LIGHTING: &str = "bUseLighting";
    /// Texture coordinate scale
    pub const UV_SCALE: &str = "UVscale";
    /// Material diffuse color
    pub const MATERIAL_DIFFUSE: &str = "material.diffuseColor";
    /// Material specular color
    pub const MATERIAL_SPECULAR: &str = "material.specularColor";
    /// Material specular exponent
    pub const MATERIAL_SHININESS: &str = "material.shininess";
    /// Directional light struct
    pub const DIRECTIONAL_LIGHT: &str = "directionalLight";
    /// Point light array
    pub const POINT_LIGHTS: &str = "pointLights";
}

/// Typed uniform writes on the active shader program
///
/// Writes to names the program does not declare are ignored by
/// implementations.
pub trait ShaderUniforms {
    /// Set a boolean uniform
    fn set_bool(&mut self, name: &str, value: bool);

    /// Set an integer uniform
    fn set_int(&mut self, name: &str, value: i32);

    /// Set a float uniform
    fn set_float(&mut self, name: &str, value: f32);

    /// Set a vec2 uniform
    fn set_vec2(&mut self, name: &str, value: &Vec2);

    /// Set a vec3 uniform
    fn set_vec3(&mut self, name: &str, value: &Vec3);

    /// Set a vec4 uniform
    fn set_vec4(&mut self, name: &str, value: &Vec4);

    /// Set a mat4 uniform
    fn set_mat4(&mut self, name: &str, value: &Mat4);

    /// Point a sampler2D uniform at a texture unit
    fn set_sampler(&mut self, name: &str, unit: u32);
}

/// How a single draw is shaded
#[derive(Debug, Clone, PartialEq)]
pub enum Shading {
    /// Flat color, no lighting material
    FlatColor(Rgba),
    /// Flat color lit with a material
    ColoredMaterial {
        /// Object color, alpha included
        color: Rgba,
        /// Material tag
        material: String,
    },
    /// Texture, no lighting material
    Textured {
        /// Texture tag
        texture: String,
        /// Texture coordinate scale
        uv_scale: Vec2,
    },
    /// Texture lit with a material
    TexturedMaterial {
        /// Texture tag
        texture: String,
        /// Texture coordinate scale
        uv_scale: Vec2,
        /// Material tag
        material: String,
    },
}

impl Shading {
    /// Flat color
    pub fn color(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::FlatColor(Rgba::new(r, g, b, a))
    }

    /// Flat color with a material
    pub fn colored(r: f32, g: f32, b: f32, a: f32, material: &str) -> Self {
        Self::ColoredMaterial {
            color: Rgba::new(r, g, b, a),
            material: material.to_string(),
        }
    }

    /// Texture with a UV scale
    pub fn textured(texture: &str, u: f32, v: f32) -> Self {
        Self::Textured {
            texture: texture.to_string(),
            uv_scale: Vec2::new(u, v),
        }
    }

    /// Texture with a UV scale and a material
    pub fn textured_material(texture: &str, u: f32, v: f32, material: &str) -> Self {
        Self::TexturedMaterial {
            texture: texture.to_string(),
            uv_scale: Vec2::new(u, v),
            material: material.to_string(),
        }
    }

    /// Texture tag, if the shading samples a texture
    pub fn texture_tag(&self) -> Option<&str> {
        match self {
            Self::Textured { texture, .. } | Self::TexturedMaterial { texture, .. } => Some(texture),
            Self::FlatColor(_) | Self::ColoredMaterial { .. } => None,
        }
    }

    /// Material tag, if the shading uses a material
    pub fn material_tag(&self) -> Option<&str> {
        match self {
            Self::ColoredMaterial { material, .. } | Self::TexturedMaterial { material, .. } => Some(material),
            Self::FlatColor(_) | Self::Textured { .. } => None,
        }
    }
}

/// Pushes scene state into the active shader
pub struct ShaderStateBinder<'a> {
    uniforms: Option<&'a mut dyn ShaderUniforms>,
}

impl<'a> ShaderStateBinder<'a> {
    /// Bind to a shader program
    pub fn new(uniforms: &'a mut dyn ShaderUniforms) -> Self {
        Self { uniforms: Some(uniforms) }
    }

    /// A binder with no shader program; every push is skipped
    pub const fn detached() -> Self {
        Self { uniforms: None }
    }

    /// Whether pushes reach a shader program
    pub const fn is_attached(&self) -> bool {
        self.uniforms.is_some()
    }

    fn push(&mut self, write: impl FnOnce(&mut dyn ShaderUniforms)) {
        if let Some(uniforms) = self.uniforms.as_deref_mut() {
            write(uniforms);
        }
    }

    /// Push the model matrix
    pub fn set_model(&mut self, model: &Mat4) {
        self.push(|u| u.set_mat4(uniforms::MODEL, model));
    }

    /// Push view and projection matrices together with the eye position
    pub fn set_view(&mut self, view: &Mat4, projection: &Mat4, eye: &Vec3) {
        self.push(|u| {
            u.set_mat4(uniforms::VIEW, view);
            u.set_mat4(uniforms::PROJECTION, projection);
            u.set_vec3(uniforms::VIEW_POSITION, eye);
        });
    }

    /// Shade with a flat color; disables texturing
    pub fn set_color(&mut self, color: &Rgba) {
        self.push(|u| {
            u.set_bool(uniforms::USE_TEXTURE, false);
            u.set_vec4(uniforms::OBJECT_COLOR, color);
        });
    }

    /// Shade with the texture bound to `unit`; enables texturing
    pub fn set_texture(&mut self, unit: u32) {
        self.push(|u| {
            u.set_bool(uniforms::USE_TEXTURE, true);
            u.set_sampler(uniforms::OBJECT_TEXTURE, unit);
        });
    }

    /// Push the texture coordinate scale
    pub fn set_uv_scale(&mut self, uv_scale: &Vec2) {
        self.push(|u| u.set_vec2(uniforms::UV_SCALE, uv_scale));
    }

    /// Push material reflectance
    pub fn set_material(&mut self, material: &Material) {
        self.push(|u| {
            u.set_vec3(uniforms::MATERIAL_DIFFUSE, &material.diffuse);
            u.set_vec3(uniforms::MATERIAL_SPECULAR, &material.specular);
            u.set_float(uniforms::MATERIAL_SHININESS, material.shininess);
        });
    }

    /// Push every light of the environment
    ///
    /// Unused point light slots are explicitly deactivated.
    pub fn set_lighting(&mut self, environment: &LightingEnvironment) {
        self.push(|u| {
            u.set_bool(uniforms::USE_LIGHTING, environment.has_lights());

            let prefix = uniforms::DIRECTIONAL_LIGHT;
            match &environment.directional {
                Some(light) => {
                    u.set_vec3(&format!("{prefix}.direction"), &light.direction);
                    push_light_colors(u, prefix, light);
                    u.set_bool(&format!("{prefix}.bActive"), true);
                }
                None => u.set_bool(&format!("{prefix}.bActive"), false),
            }

            for index in 0..MAX_POINT_LIGHTS {
                let prefix = format!("{}[{index}]", uniforms::POINT_LIGHTS);
                match environment.point_lights.get(index) {
                    Some(light) => {
                        u.set_vec3(&format!("{prefix}.position"), &light.position);
                        push_light_colors(u, &prefix, light);
                        u.set_bool(&format!("{prefix}.bActive"), true);
                    }
                    None => u.set_bool(&format!("{prefix}.bActive"), false),
                }
            }
        });
    }

    /// Push one shading mode for the next draw
    ///
    /// Unknown texture or material tags leave the corresponding shader state
    /// untouched.
    pub fn apply_shading(&mut self, shading: &Shading, textures: &TextureRegistry, materials: &MaterialRegistry) {
        match shading {
            Shading::FlatColor(color) => self.set_color(color),
            Shading::ColoredMaterial { color, material } => {
                self.set_color(color);
                self.apply_material(material, materials);
            }
            Shading::Textured { texture, uv_scale } => {
                self.apply_texture(texture, uv_scale, textures);
            }
            Shading::TexturedMaterial { texture, uv_scale, material } => {
                self.apply_texture(texture, uv_scale, textures);
                self.apply_material(material, materials);
            }
        }
    }

    fn apply_texture(&mut self, tag: &str, uv_scale: &Vec2, textures: &TextureRegistry) {
        match textures.find_slot(tag) {
            Some(unit) => {
                self.set_texture(unit);
                self.set_uv_scale(uv_scale);
            }
            None => log::trace!("Texture '{}' is not loaded, keeping previous shading", tag),
        }
    }

    fn apply_material(&mut self, tag: &str, materials: &MaterialRegistry) {
        match materials.find_material(tag) {
            Some(material) => self.set_material(material),
            None => log::trace!("Material '{}' is not defined, keeping previous material", tag),
        }
    }
}

fn push_light_colors(uniforms: &mut dyn ShaderUniforms, prefix: &str, light: &Light) {
    uniforms.set_vec3(&format!("{prefix}.ambient"), &light.ambient);
    uniforms.set_vec3(&format!("{prefix}.diffuse"), &light.diffuse);
    uniforms.set_vec3(&format!("{prefix}.specular"), &light.specular);
}
