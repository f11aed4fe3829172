//! GPU-resident primitive meshes

use std::collections::HashMap;
use std::rc::Rc;

use glow::HasContext;

use still_life_engine::render::{MeshKind, MeshLibrary, RenderError};

use super::shapes::{self, MeshData, Vertex};

/// Vertex attribute locations shared with the vertex shader
pub mod attributes {
    /// Object-space position
    pub const POSITION: u32 = 0;
    /// Normal
    pub const NORMAL: u32 = 1;
    /// Texture coordinate
    pub const UV: u32 = 2;
}

struct GpuMesh {
    vertex_array: glow::VertexArray,
    vertex_buffer: glow::Buffer,
    index_buffer: glow::Buffer,
    index_count: i32,
}

/// Shape meshes uploaded through glow
pub struct GlShapeMeshes {
    gl: Rc<glow::Context>,
    meshes: HashMap<MeshKind, GpuMesh>,
}

impl GlShapeMeshes {
    /// Create an empty library
    pub fn new(gl: Rc<glow::Context>) -> Self {
        Self {
            gl,
            meshes: HashMap::new(),
        }
    }

    unsafe fn upload(&self, data: &MeshData) -> Result<GpuMesh, String> {
        let gl = &self.gl;
        let index_count = i32::try_from(data.indices.len()).map_err(|e| e.to_string())?;

        let vertex_array = gl.create_vertex_array()?;
        gl.bind_vertex_array(Some(vertex_array));

        let vertex_buffer = gl.create_buffer()?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertex_buffer));
        gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, bytemuck::cast_slice(&data.vertices), glow::STATIC_DRAW);

        let index_buffer = gl.create_buffer()?;
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(index_buffer));
        gl.buffer_data_u8_slice(glow::ELEMENT_ARRAY_BUFFER, bytemuck::cast_slice(&data.indices), glow::STATIC_DRAW);

        let stride = std::mem::size_of::<Vertex>() as i32;
        let float = std::mem::size_of::<f32>() as i32;
        for (location, components, offset) in [
            (attributes::POSITION, 3, 0),
            (attributes::NORMAL, 3, 3 * float),
            (attributes::UV, 2, 6 * float),
        ] {
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_f32(location, components, glow::FLOAT, false, stride, offset);
        }

        gl.bind_vertex_array(None);
        Ok(GpuMesh {
            vertex_array,
            vertex_buffer,
            index_buffer,
            index_count,
        })
    }

    unsafe fn destroy(gl: &glow::Context, mesh: GpuMesh) {
        gl.delete_vertex_array(mesh.vertex_array);
        gl.delete_buffer(mesh.vertex_buffer);
        gl.delete_buffer(mesh.index_buffer);
    }
}

impl MeshLibrary for GlShapeMeshes {
    fn load(&mut self, kind: MeshKind) -> Result<(), RenderError> {
        if self.meshes.contains_key(&kind) {
            return Ok(());
        }

        let data = shapes::build(kind);
        let mesh = unsafe { self.upload(&data) }
            .map_err(|e| RenderError::Mesh(format!("failed to upload {kind}: {e}")))?;
        log::debug!("Uploaded {} mesh: {} vertices, {} indices", kind, data.vertices.len(), data.indices.len());

        self.meshes.insert(kind, mesh);
        Ok(())
    }

    fn draw(&mut self, kind: MeshKind) {
        let Some(mesh) = self.meshes.get(&kind) else {
            log::warn!("Drawing {} before it was loaded", kind);
            return;
        };
        unsafe {
            self.gl.bind_vertex_array(Some(mesh.vertex_array));
            self.gl.draw_elements(glow::TRIANGLES, mesh.index_count, glow::UNSIGNED_INT, 0);
            self.gl.bind_vertex_array(None);
        }
    }

    fn release(&mut self) {
        for (_, mesh) in self.meshes.drain() {
            unsafe { Self::destroy(&self.gl, mesh) }
        }
    }
}

impl Drop for GlShapeMeshes {
    fn drop(&mut self) {
        self.release();
    }
}
