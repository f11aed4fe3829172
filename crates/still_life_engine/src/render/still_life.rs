//! The still-life scene
//!
//! A can, a stemmed glass, a closed book and an apple on a counter in front
//! of a wall. All placement, materials and lights are fixed here.

use std::path::Path;

use crate::foundation::math::{Transform, Vec3};
use crate::render::lighting::{Light, LightingEnvironment};
use crate::render::material::Material;
use crate::render::mesh::MeshKind;
use crate::render::scene::{DrawDirective, SceneDescription, TextureSource};
use crate::render::shader::Shading;

/// Texture files and their tags, in load order
pub const TEXTURES: [(&str, &str); 10] = [
    ("bookcover.jpg", "bookcover_texture"),
    ("bookside.jpg", "bookside_texture"),
    ("counter.jpg", "counter_texture"),
    ("pages.jpg", "pages_texture"),
    ("wall.jpg", "wall_texture"),
    ("can.jpg", "can_texture"),
    ("canlid.jpg", "canlid_texture"),
    ("apple.jpg", "apple_texture"),
    ("carbonated.jpg", "carbonated_texture"),
    ("foam.jpg", "foam_texture"),
];

/// Morning sunlight strength
const LIGHT_INTENSITY: f32 = 0.8;

/// Build the scene, resolving texture files inside `texture_dir`
pub fn scene(texture_dir: &Path) -> SceneDescription {
    SceneDescription {
        textures: TEXTURES
            .iter()
            .map(|(file, tag)| TextureSource::new(texture_dir.join(file), *tag))
            .collect(),
        materials: materials(),
        lighting: lighting(),
        directives: directives(),
    }
}

/// Surface materials
pub fn materials() -> Vec<Material> {
    vec![
        Material::new("metal", Vec3::new(40.4, 0.4, 0.0), Vec3::new(50.7, 50.7, 40.6), 90.0),
        Material::new("paper", Vec3::new(0.2, 0.2, 0.3), Vec3::zeros(), 0.1),
        Material::new("glass", Vec3::new(0.2, 0.2, 0.2), Vec3::new(21.0, 16.0, 11.0), 95.0),
        Material::new("plate", Vec3::new(0.4, 0.4, 0.4), Vec3::new(0.2, 0.2, 0.2), 30.0),
        Material::new("backdrop", Vec3::new(0.8, 0.8, 0.9), Vec3::zeros(), 2.0),
        Material::new("apple", Vec3::new(0.4, 0.2, 0.4), Vec3::new(0.1, 0.05, 0.1), 0.55),
    ]
}

/// Low warm sunlight plus two soft indoor fill lights
pub fn lighting() -> LightingEnvironment {
    let sun = Light::directional(
        Vec3::new(-1.0, -1.0, -0.3),
        Vec3::new(0.4, 0.4, 0.35) * LIGHT_INTENSITY,
        Vec3::new(1.0, 0.85, 0.65) * LIGHT_INTENSITY,
        Vec3::new(0.9, 0.8, 0.6) * LIGHT_INTENSITY,
    );
    // Ceiling bounce
    let bounce = Light::point(
        Vec3::new(-4.0, 5.0, 2.0),
        Vec3::new(0.15, 0.15, 0.15),
        Vec3::new(0.25, 0.25, 0.3),
        Vec3::new(0.1, 0.1, 0.1),
    );
    // Near the window
    let window = Light::point(
        Vec3::new(2.0, 6.0, -3.0),
        Vec3::new(0.2, 0.18, 0.15),
        Vec3::new(0.45, 0.4, 0.35),
        Vec3::new(0.5, 0.4, 0.3),
    );

    LightingEnvironment::new().add_light(sun).add_light(bounce).add_light(window)
}

fn placed(scale: [f32; 3], rotation_degrees: [f32; 3], translation: [f32; 3]) -> Transform {
    Transform::new(Vec3::from(scale), Vec3::from(rotation_degrees), Vec3::from(translation))
}

fn glass(alpha: f32) -> Shading {
    Shading::colored(1.0, 1.0, 1.0, alpha, "glass")
}

/// Draws in submission order
///
/// The order is the hand-authored one and is not depth sorted. The glass is
/// listed before the book, wall and apple, so those can be hidden behind it
/// instead of showing through.
pub fn directives() -> Vec<DrawDirective> {
    const NO_ROTATION: [f32; 3] = [0.0, 0.0, 0.0];

    vec![
        // Counter top, tiled
        DrawDirective::new(
            placed([50.0, 1.0, 20.0], NO_ROTATION, [0.0, -0.6, 0.0]),
            Shading::textured_material("counter_texture", 2.0, 2.0, "plate"),
            MeshKind::Plane,
        ),
        // Can body and lid
        DrawDirective::new(
            placed([1.5, 8.0, 1.5], NO_ROTATION, [-3.0, 2.0, 0.0]),
            Shading::textured_material("can_texture", 1.0, 1.0, "metal"),
            MeshKind::Cylinder,
        ),
        DrawDirective::new(
            placed([1.45, 0.001, 1.45], [0.0, 75.0, 0.0], [-3.0, 10.0, 0.0]),
            Shading::textured_material("canlid_texture", 1.0, 1.0, "metal"),
            MeshKind::Cylinder,
        ),
        // Glass: stem, foot, bowl
        DrawDirective::new(
            placed([0.25, 1.0, 0.25], NO_ROTATION, [-6.0, 3.4, 3.0]),
            glass(0.3),
            MeshKind::Cylinder,
        ),
        DrawDirective::new(
            placed([1.3, 1.0, 1.3], NO_ROTATION, [-6.0, 2.0, 3.0]),
            glass(0.4),
            MeshKind::Cylinder,
        ),
        DrawDirective::new(
            placed([1.4, 1.5, 1.4], NO_ROTATION, [-6.0, 6.3, 3.0]),
            glass(0.7),
            MeshKind::TaperedCylinder,
        ),
        DrawDirective::new(
            placed([1.4, 0.5, 1.4], NO_ROTATION, [-6.0, 5.8, 3.0]),
            glass(0.7),
            MeshKind::Cylinder,
        ),
        DrawDirective::new(
            placed([1.4, 1.5, 1.4], NO_ROTATION, [-6.0, 5.9, 3.0]),
            glass(0.7),
            MeshKind::Sphere,
        ),
        DrawDirective::new(
            placed([1.3, 0.5, 1.3], NO_ROTATION, [-6.0, 3.0, 3.0]),
            glass(0.3),
            MeshKind::Cone,
        ),
        // Inverted cone joining stem and bowl
        DrawDirective::new(
            placed([1.0, -1.0, 1.0], NO_ROTATION, [-6.0, 5.0, 3.0]),
            glass(0.3),
            MeshKind::Cone,
        ),
        // Book: pages, covers, spine
        DrawDirective::new(
            placed([15.0, 2.0, 10.0], NO_ROTATION, [-2.0, 1.0, 2.5]),
            Shading::textured_material("pages_texture", 1.0, 1.0, "paper"),
            MeshKind::Box,
        ),
        DrawDirective::new(
            placed([10.5, 0.25, 15.5], [0.0, 90.0, 0.0], [-2.0, 2.0, 2.5]),
            Shading::textured_material("bookcover_texture", 1.0, 1.0, "paper"),
            MeshKind::Box,
        ),
        DrawDirective::new(
            placed([10.5, 0.25, 15.5], [0.0, 90.0, 0.0], [-2.0, -0.25, 2.5]),
            Shading::textured_material("bookcover_texture", 1.0, 1.0, "paper"),
            MeshKind::Box,
        ),
        DrawDirective::new(
            placed([15.5, 0.25, 2.5], [90.0, 0.0, 0.0], [-2.0, 0.9, 7.75]),
            Shading::textured_material("bookside_texture", 1.0, 1.0, "paper"),
            MeshKind::Box,
        ),
        // Back wall
        DrawDirective::new(
            placed([50.0, 0.25, 30.0], [90.0, 0.0, 0.0], [0.0, 20.0, -4.0]),
            Shading::textured_material("wall_texture", 1.0, 1.0, "backdrop"),
            MeshKind::Plane,
        ),
        // Apple, slightly squashed and tilted
        DrawDirective::new(
            placed([3.0, 1.6, 3.0], [-1.0, 90.0, -10.0], [1.7, 3.4, 3.0]),
            Shading::textured_material("apple_texture", 1.0, 1.0, "apple"),
            MeshKind::Sphere,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::lighting::MAX_POINT_LIGHTS;
    use std::collections::HashSet;

    #[test]
    fn test_every_tag_resolves() {
        let scene = scene(Path::new("textures"));
        let texture_tags: HashSet<_> = scene.textures.iter().map(|t| t.tag.as_str()).collect();
        let material_tags: HashSet<_> = scene.materials.iter().map(|m| m.tag.as_str()).collect();

        for directive in &scene.directives {
            if let Some(tag) = directive.shading.texture_tag() {
                assert!(texture_tags.contains(tag), "unknown texture {tag}");
            }
            if let Some(tag) = directive.shading.material_tag() {
                assert!(material_tags.contains(tag), "unknown material {tag}");
            }
        }
    }

    #[test]
    fn test_texture_paths_and_tags_are_unique() {
        let scene = scene(Path::new("assets/textures"));
        let tags: HashSet<_> = scene.textures.iter().map(|t| &t.tag).collect();

        assert_eq!(tags.len(), TEXTURES.len());
        assert_eq!(scene.textures[0].path, Path::new("assets/textures/bookcover.jpg"));
    }

    #[test]
    fn test_scene_shape() {
        let scene = scene(Path::new("textures"));
        assert_eq!(scene.directives.len(), 16);
        assert!(scene.lighting.directional.is_some());
        assert!(scene.lighting.point_lights.len() <= MAX_POINT_LIGHTS);

        let meshes: HashSet<_> = scene.directives.iter().map(|d| d.mesh).collect();
        assert_eq!(meshes.len(), MeshKind::ALL.len());
    }

    #[test]
    fn test_order_is_not_depth_sorted() {
        let directives = directives();
        let last_glass = directives
            .iter()
            .rposition(|d| d.shading.material_tag() == Some("glass"))
            .unwrap();
        let first_pages = directives
            .iter()
            .position(|d| d.shading.texture_tag() == Some("pages_texture"))
            .unwrap();

        assert!(last_glass < first_pages);
    }
}
