//! # Still Life Engine
//!
//! Scene preparation and fly-through camera core for a textured still-life
//! renderer.
//!
//! ## Features
//!
//! - **Texture registry**: Tagged GPU textures with explicit unit assignment
//! - **Material registry**: Phong reflectance looked up by tag
//! - **Scene renderer**: Ordered draw directives replayed every frame
//! - **Fly-through camera**: Keyboard movement, mouse look, scroll speed
//! - **Backend-agnostic**: Graphics work goes through traits the application implements
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use still_life_engine::prelude::*;
//!
//! fn frame<M: MeshLibrary, T: TextureBackend>(
//!     renderer: &mut SceneRenderer<M, T>,
//!     view: &mut ViewManager,
//!     keys: &dyn KeyState,
//!     uniforms: &mut dyn ShaderUniforms,
//! ) -> Result<FrameControl, RenderError> {
//!     let mut binder = ShaderStateBinder::new(uniforms);
//!     let control = view.prepare_scene_view(keys, &mut binder);
//!     renderer.render_frame(&mut binder)?;
//!     Ok(control)
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod assets;
pub mod render;
pub mod input;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, ImageData},
        config::{Config, ConfigError, StillLifeConfig},
        foundation::{
            math::{Mat4, Transform, Vec2, Vec3, Vec4},
            time::FrameTimer,
        },
        input::{CameraAction, FrameControl, KeyState},
        render::{
            Camera, DrawDirective, MeshKind, MeshLibrary, ProjectionMode, RenderError, SceneDescription,
            SceneRenderer, ShaderStateBinder, ShaderUniforms, Shading, TextureBackend, TextureError,
            TextureHandle, ViewManager,
        },
    };
}
