//! Primitive meshes used by the scene
//!
//! The engine only names shapes; tessellation and GPU buffers belong to the
//! [`MeshLibrary`] implementation supplied by the application.

use std::fmt;

use crate::render::RenderError;

/// Unit primitives the scene is assembled from
///
/// All shapes are centered on the XZ origin. Plane, box and sphere are
/// centered at the origin; cylinder, tapered cylinder and cone stand on
/// `y = 0` and are one unit tall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    /// Flat 2x2 square in the XZ plane facing +Y
    Plane,
    /// Unit cube
    Box,
    /// Capped cylinder of radius 1
    Cylinder,
    /// Capped cylinder narrowing from radius 1 to radius 0.5
    TaperedCylinder,
    /// Cone of base radius 1
    Cone,
    /// Sphere of radius 1
    Sphere,
}

impl MeshKind {
    /// Every kind, in declaration order
    pub const ALL: [Self; 6] = [
        Self::Plane,
        Self::Box,
        Self::Cylinder,
        Self::TaperedCylinder,
        Self::Cone,
        Self::Sphere,
    ];

    /// Human-readable name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plane => "plane",
            Self::Box => "box",
            Self::Cylinder => "cylinder",
            Self::TaperedCylinder => "tapered cylinder",
            Self::Cone => "cone",
            Self::Sphere => "sphere",
        }
    }
}

impl fmt::Display for MeshKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Loads and draws primitive meshes
pub trait MeshLibrary {
    /// Make `kind` drawable; called once per kind before the first draw
    fn load(&mut self, kind: MeshKind) -> Result<(), RenderError>;

    /// Draw `kind` with the shader state currently bound
    fn draw(&mut self, kind: MeshKind);

    /// Release every loaded mesh
    fn release(&mut self) {}
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;

    /// Records loads and draws
    #[derive(Debug, Default)]
    pub struct RecordingMeshes {
        pub loaded: Vec<MeshKind>,
        pub drawn: Vec<MeshKind>,
        pub fail_on: Option<MeshKind>,
    }

    impl MeshLibrary for RecordingMeshes {
        fn load(&mut self, kind: MeshKind) -> Result<(), RenderError> {
            if self.fail_on == Some(kind) {
                return Err(RenderError::Mesh(format!("cannot build {kind}")));
            }
            self.loaded.push(kind);
            Ok(())
        }

        fn draw(&mut self, kind: MeshKind) {
            self.drawn.push(kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_distinct() {
        let mut names: Vec<_> = MeshKind::ALL.iter().map(|kind| kind.to_string()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), MeshKind::ALL.len());
        assert_eq!(MeshKind::TaperedCylinder.to_string(), "tapered cylinder");
    }
}
