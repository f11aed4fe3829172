//! # Rendering System
//!
//! Backend-agnostic scene rendering for the still-life viewer.
//!
//! ## Architecture
//!
//! - **Textures**: [`texture::TextureRegistry`] tracks tagged GPU textures and their units
//! - **Materials**: [`material::MaterialRegistry`] maps tags to Phong reflectance
//! - **Shader state**: [`shader::ShaderStateBinder`] is the single path into shader uniforms
//! - **Scene**: [`scene::SceneRenderer`] prepares resources and replays draw directives
//! - **View**: [`view::ViewManager`] turns camera state into view and projection matrices
//!
//! Graphics API work happens behind the [`texture::TextureBackend`],
//! [`mesh::MeshLibrary`] and [`shader::ShaderUniforms`] traits, implemented by
//! the application.

pub mod camera;
pub mod lighting;
pub mod material;
pub mod mesh;
pub mod scene;
pub mod shader;
pub mod still_life;
pub mod texture;
pub mod view;


pub use camera::{Camera, CameraMovement, ProjectionMode};
pub use lighting::{Light, LightType, LightingEnvironment, MAX_POINT_LIGHTS};
pub use material::{Material, MaterialRegistry};
pub use mesh::{MeshKind, MeshLibrary};
pub use scene::{DrawDirective, PrepareSummary, SceneDescription, SceneRenderer, TextureFailure, TextureSource};
pub use shader::{Rgba, ShaderStateBinder, ShaderUniforms, Shading};
pub use texture::{TextureBackend, TextureError, TextureHandle, TextureRegistry};
pub use view::ViewManager;

use thiserror::Error;

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// A mesh could not be built or uploaded
    #[error("Mesh error: {0}")]
    Mesh(String),

    /// A texture could not be loaded
    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    /// A frame was requested before the scene was prepared
    #[error("Scene has not been prepared")]
    NotPrepared,
}
