//! Tessellation of the unit primitives
//!
//! Pure CPU geometry; [`super::meshes`] uploads the result. Cylinders, the
//! tapered cylinder and the cone are all surfaces of revolution around +Y
//! built by [`lathe`].

use bytemuck::{Pod, Zeroable};
use std::f32::consts::{PI, TAU};

use still_life_engine::render::MeshKind;

/// Segments around the Y axis for round shapes
pub const RADIAL_SEGMENTS: u32 = 36;

/// Latitude bands of the sphere
pub const SPHERE_RINGS: u32 = 24;

/// Interleaved vertex as laid out in the vertex buffer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Object-space position
    pub position: [f32; 3],
    /// Unit normal
    pub normal: [f32; 3],
    /// Texture coordinate
    pub uv: [f32; 2],
}

impl Vertex {
    const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, normal, uv }
    }
}

/// Indexed triangle list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex buffer contents
    pub vertices: Vec<Vertex>,
    /// Triangle indices, counter-clockwise when seen from outside
    pub indices: Vec<u32>,
}

impl MeshData {
    fn push_quad(&mut self, corners: [Vertex; 4]) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&corners);
        self.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// Tessellate a primitive
pub fn build(kind: MeshKind) -> MeshData {
    match kind {
        MeshKind::Plane => plane(),
        MeshKind::Box => unit_box(),
        MeshKind::Cylinder => lathe(1.0, 1.0, RADIAL_SEGMENTS),
        MeshKind::TaperedCylinder => lathe(1.0, 0.5, RADIAL_SEGMENTS),
        MeshKind::Cone => lathe(1.0, 0.0, RADIAL_SEGMENTS),
        MeshKind::Sphere => sphere(RADIAL_SEGMENTS, SPHERE_RINGS),
    }
}

/// 2x2 square in the XZ plane facing +Y
pub fn plane() -> MeshData {
    let up = [0.0, 1.0, 0.0];
    let mut mesh = MeshData::default();
    mesh.push_quad([
        Vertex::new([-1.0, 0.0, 1.0], up, [0.0, 0.0]),
        Vertex::new([1.0, 0.0, 1.0], up, [1.0, 0.0]),
        Vertex::new([1.0, 0.0, -1.0], up, [1.0, 1.0]),
        Vertex::new([-1.0, 0.0, -1.0], up, [0.0, 1.0]),
    ]);
    mesh
}

/// Unit cube centered at the origin, one quad per face
pub fn unit_box() -> MeshData {
    // Each face: normal, then the in-plane u and v axes (u x v = normal)
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];

    let mut mesh = MeshData::default();
    for (normal, u, v) in FACES {
        let corner = |su: f32, sv: f32| {
            let position = [
                0.5 * (normal[0] + su * u[0] + sv * v[0]),
                0.5 * (normal[1] + su * u[1] + sv * v[1]),
                0.5 * (normal[2] + su * u[2] + sv * v[2]),
            ];
            Vertex::new(position, normal, [(su + 1.0) / 2.0, (sv + 1.0) / 2.0])
        };
        mesh.push_quad([corner(-1.0, -1.0), corner(1.0, -1.0), corner(1.0, 1.0), corner(-1.0, 1.0)]);
    }
    mesh
}

/// Surface of revolution from `y = 0` to `y = 1`
///
/// The bottom is capped; the top is capped unless `top_radius` is zero.
pub fn lathe(bottom_radius: f32, top_radius: f32, segments: u32) -> MeshData {
    let mut mesh = MeshData::default();

    // Side normals lean outward by the slope of the profile
    let slope = bottom_radius - top_radius;
    let normal_scale = 1.0 / (1.0 + slope * slope).sqrt();

    for i in 0..=segments {
        let u = i as f32 / segments as f32;
        let (sin, cos) = (u * TAU).sin_cos();
        let normal = [cos * normal_scale, slope * normal_scale, sin * normal_scale];
        mesh.vertices.push(Vertex::new([bottom_radius * cos, 0.0, bottom_radius * sin], normal, [u, 0.0]));
        mesh.vertices.push(Vertex::new([top_radius * cos, 1.0, top_radius * sin], normal, [u, 1.0]));
    }
    for i in 0..segments {
        let (b0, t0, b1, t1) = (2 * i, 2 * i + 1, 2 * i + 2, 2 * i + 3);
        mesh.indices.extend_from_slice(&[b0, t0, t1, b0, t1, b1]);
    }

    push_cap(&mut mesh, bottom_radius, 0.0, -1.0, segments);
    if top_radius > 0.0 {
        push_cap(&mut mesh, top_radius, 1.0, 1.0, segments);
    }
    mesh
}

fn push_cap(mesh: &mut MeshData, radius: f32, y: f32, facing: f32, segments: u32) {
    let normal = [0.0, facing, 0.0];
    let center = mesh.vertices.len() as u32;
    mesh.vertices.push(Vertex::new([0.0, y, 0.0], normal, [0.5, 0.5]));

    for i in 0..=segments {
        let (sin, cos) = (i as f32 / segments as f32 * TAU).sin_cos();
        mesh.vertices.push(Vertex::new(
            [radius * cos, y, radius * sin],
            normal,
            [0.5 + 0.5 * cos, 0.5 + 0.5 * sin],
        ));
    }
    for i in 0..segments {
        let (a, b) = (center + 1 + i, center + 2 + i);
        if facing > 0.0 {
            mesh.indices.extend_from_slice(&[center, b, a]);
        } else {
            mesh.indices.extend_from_slice(&[center, a, b]);
        }
    }
}

/// Radius 1 sphere centered at the origin
pub fn sphere(segments: u32, rings: u32) -> MeshData {
    let mut mesh = MeshData::default();

    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        let (ring_sin, ring_cos) = (v * PI).sin_cos();
        for i in 0..=segments {
            let u = i as f32 / segments as f32;
            let (sin, cos) = (u * TAU).sin_cos();
            let point = [ring_sin * cos, -ring_cos, ring_sin * sin];
            mesh.vertices.push(Vertex::new(point, point, [u, v]));
        }
    }

    let stride = segments + 1;
    for ring in 0..rings {
        for i in 0..segments {
            let lower = ring * stride + i;
            let upper = lower + stride;
            mesh.indices.extend_from_slice(&[lower, upper, upper + 1, lower, upper + 1, lower + 1]);
        }
    }
    mesh
}
