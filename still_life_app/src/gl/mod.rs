//! OpenGL backends for the engine's rendering traits

pub mod meshes;
pub mod shader;
pub mod shapes;
pub mod texture;

pub use meshes::GlShapeMeshes;
pub use shader::GlShaderProgram;
pub use texture::GlTextureBackend;

use thiserror::Error;

/// OpenGL errors
#[derive(Error, Debug)]
pub enum GlError {
    /// A shader stage failed to compile
    #[error("Shader compilation failed: {0}")]
    Compile(String),

    /// The program failed to link
    #[error("Program linking failed: {0}")]
    Link(String),

    /// A GL object could not be created
    #[error("Failed to create GL object: {0}")]
    Resource(String),
}
