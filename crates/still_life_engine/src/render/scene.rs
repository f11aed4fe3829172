//! Scene preparation and per-frame drawing
//!
//! A [`SceneDescription`] lists everything the scene needs: texture files,
//! materials, lights and the ordered draw directives. [`SceneRenderer`] turns
//! it into GPU state once in [`prepare`](SceneRenderer::prepare) and replays
//! the directives every frame in [`render_frame`](SceneRenderer::render_frame).
//!
//! Directives are drawn in the order they are listed. Nothing is sorted by
//! depth, so translucent objects must be listed after what they cover.

use std::path::PathBuf;

use crate::foundation::math::Transform;
use crate::render::lighting::LightingEnvironment;
use crate::render::material::{Material, MaterialRegistry};
use crate::render::mesh::{MeshKind, MeshLibrary};
use crate::render::shader::{ShaderStateBinder, Shading};
use crate::render::texture::{TextureBackend, TextureRegistry};
use crate::render::RenderError;

/// One draw of the scene
#[derive(Debug, Clone, PartialEq)]
pub struct DrawDirective {
    /// Placement of the mesh
    pub transform: Transform,
    /// Shading for this draw
    pub shading: Shading,
    /// Mesh to draw
    pub mesh: MeshKind,
}

impl DrawDirective {
    /// Create a new directive
    pub const fn new(transform: Transform, shading: Shading, mesh: MeshKind) -> Self {
        Self { transform, shading, mesh }
    }
}

/// Image file registered under a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureSource {
    /// Image file path
    pub path: PathBuf,
    /// Registry tag
    pub tag: String,
}

impl TextureSource {
    /// Create a new texture source
    pub fn new(path: impl Into<PathBuf>, tag: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            tag: tag.into(),
        }
    }
}

/// Everything needed to prepare and draw a scene
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneDescription {
    /// Textures in load order
    pub textures: Vec<TextureSource>,
    /// Materials in definition order
    pub materials: Vec<Material>,
    /// Scene lights
    pub lighting: LightingEnvironment,
    /// Draws in submission order
    pub directives: Vec<DrawDirective>,
}

/// A texture that could not be loaded during preparation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureFailure {
    /// Tag the texture would have been registered under
    pub tag: String,
    /// Why loading failed
    pub reason: String,
}

/// What [`SceneRenderer::prepare`] did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrepareSummary {
    /// Meshes loaded, in request order
    pub meshes_loaded: Vec<MeshKind>,
    /// Mesh requests skipped because the mesh was already loaded
    pub duplicate_mesh_requests: usize,
    /// Number of textures registered
    pub textures_loaded: usize,
    /// Textures that failed to load
    pub texture_failures: Vec<TextureFailure>,
    /// Number of materials defined
    pub materials_defined: usize,
}

/// Owns the scene's GPU collaborators and replays its directives
pub struct SceneRenderer<M: MeshLibrary, T: TextureBackend> {
    meshes: M,
    backend: T,
    scene: SceneDescription,
    textures: TextureRegistry,
    materials: MaterialRegistry,
    summary: Option<PrepareSummary>,
}

impl<M: MeshLibrary, T: TextureBackend> SceneRenderer<M, T> {
    /// Create a renderer for `scene`
    ///
    /// The texture registry holds at most `max_texture_units` textures, or
    /// fewer if the backend exposes fewer units.
    pub fn new(meshes: M, backend: T, scene: SceneDescription, max_texture_units: usize) -> Self {
        let capacity = backend.max_texture_units().min(max_texture_units);
        Self {
            meshes,
            backend,
            scene,
            textures: TextureRegistry::new(capacity),
            materials: MaterialRegistry::new(),
            summary: None,
        }
    }

    /// Load meshes, textures, materials and lights
    ///
    /// Only mesh failures are fatal. Texture failures are logged, reported in
    /// the summary, and leave the affected draws with the previous shading.
    /// Calling this again returns the first summary without doing any work.
    pub fn prepare(&mut self, binder: &mut ShaderStateBinder<'_>) -> Result<PrepareSummary, RenderError> {
        if let Some(summary) = &self.summary {
            log::debug!("Scene already prepared, skipping");
            return Ok(summary.clone());
        }

        let mut summary = PrepareSummary::default();

        self.materials = MaterialRegistry::new();
        self.materials.extend(self.scene.materials.iter().cloned());
        summary.materials_defined = self.materials.len();

        binder.set_lighting(&self.scene.lighting);

        for directive in &self.scene.directives {
            if summary.meshes_loaded.contains(&directive.mesh) {
                log::debug!("Mesh {} already loaded", directive.mesh);
                summary.duplicate_mesh_requests += 1;
                continue;
            }
            self.meshes.load(directive.mesh)?;
            summary.meshes_loaded.push(directive.mesh);
        }

        for source in &self.scene.textures {
            match self.textures.load_texture(&mut self.backend, &source.path, &source.tag) {
                Ok(_) => summary.textures_loaded += 1,
                Err(e) => summary.texture_failures.push(TextureFailure {
                    tag: source.tag.clone(),
                    reason: e.to_string(),
                }),
            }
        }
        self.textures.bind_all(&mut self.backend);

        log::info!(
            "Scene prepared: {} mesh(es), {} texture(s), {} failure(s), {} material(s)",
            summary.meshes_loaded.len(),
            summary.textures_loaded,
            summary.texture_failures.len(),
            summary.materials_defined
        );

        self.summary = Some(summary.clone());
        Ok(summary)
    }

    /// Draw every directive in order
    pub fn render_frame(&mut self, binder: &mut ShaderStateBinder<'_>) -> Result<(), RenderError> {
        if self.summary.is_none() {
            return Err(RenderError::NotPrepared);
        }

        for directive in &self.scene.directives {
            binder.set_model(&directive.transform.to_matrix());
            binder.apply_shading(&directive.shading, &self.textures, &self.materials);
            self.meshes.draw(directive.mesh);
        }
        Ok(())
    }

    /// Delete every texture and mesh; the scene must be prepared again
    pub fn release(&mut self) {
        self.textures.release_all(&mut self.backend);
        self.meshes.release();
        self.materials = MaterialRegistry::new();
        self.summary = None;
    }

    /// Whether [`prepare`](Self::prepare) has completed
    pub const fn is_prepared(&self) -> bool {
        self.summary.is_some()
    }

    /// Loaded textures
    pub const fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    /// Defined materials
    pub const fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    /// The scene being drawn
    pub const fn scene(&self) -> &SceneDescription {
        &self.scene
    }

    /// The mesh library
    pub const fn meshes(&self) -> &M {
        &self.meshes
    }

    /// The texture backend
    pub const fn backend(&self) -> &T {
        &self.backend
    }
}
