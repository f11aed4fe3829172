//! GLSL program and uniform upload

use std::collections::HashMap;
use std::rc::Rc;

use glow::HasContext;

use still_life_engine::foundation::math::{Mat4, Vec2, Vec3, Vec4};
use still_life_engine::render::ShaderUniforms;

use super::GlError;

/// Vertex stage of the scene shader
pub const VERTEX_SHADER: &str = include_str!("../../shaders/scene.vert");

/// Fragment stage of the scene shader
pub const FRAGMENT_SHADER: &str = include_str!("../../shaders/scene.frag");

/// Linked GLSL program with a uniform location cache
pub struct GlShaderProgram {
    gl: Rc<glow::Context>,
    program: glow::Program,
    locations: HashMap<String, Option<glow::UniformLocation>>,
}

impl GlShaderProgram {
    /// Compile and link the scene shader
    pub fn scene(gl: Rc<glow::Context>) -> Result<Self, GlError> {
        Self::new(gl, VERTEX_SHADER, FRAGMENT_SHADER)
    }

    /// Compile and link a program from vertex and fragment sources
    pub fn new(gl: Rc<glow::Context>, vertex_source: &str, fragment_source: &str) -> Result<Self, GlError> {
        unsafe {
            let program = gl.create_program().map_err(GlError::Resource)?;

            let stages = [
                (glow::VERTEX_SHADER, vertex_source),
                (glow::FRAGMENT_SHADER, fragment_source),
            ];
            let mut shaders = Vec::with_capacity(stages.len());
            for (stage, source) in stages {
                let shader = gl.create_shader(stage).map_err(GlError::Resource)?;
                gl.shader_source(shader, source);
                gl.compile_shader(shader);
                if !gl.get_shader_compile_status(shader) {
                    let log = gl.get_shader_info_log(shader);
                    gl.delete_shader(shader);
                    gl.delete_program(program);
                    return Err(GlError::Compile(log));
                }
                gl.attach_shader(program, shader);
                shaders.push(shader);
            }

            gl.link_program(program);
            let linked = gl.get_program_link_status(program);
            for shader in shaders {
                gl.detach_shader(program, shader);
                gl.delete_shader(shader);
            }
            if !linked {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(GlError::Link(log));
            }

            log::debug!("Linked shader program {:?}", program);
            Ok(Self {
                gl,
                program,
                locations: HashMap::new(),
            })
        }
    }

    /// Make this the active program
    pub fn use_program(&self) {
        unsafe { self.gl.use_program(Some(self.program)) }
    }

    fn location(&mut self, name: &str) -> Option<glow::UniformLocation> {
        if let Some(location) = self.locations.get(name) {
            return location.clone();
        }

        let location = unsafe { self.gl.get_uniform_location(self.program, name) };
        if location.is_none() {
            log::trace!("Uniform '{}' is not active in the program", name);
        }
        self.locations.insert(name.to_string(), location.clone());
        location
    }
}

impl ShaderUniforms for GlShaderProgram {
    fn set_bool(&mut self, name: &str, value: bool) {
        self.set_int(name, i32::from(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        let location = self.location(name);
        unsafe { self.gl.uniform_1_i32(location.as_ref(), value) }
    }

    fn set_float(&mut self, name: &str, value: f32) {
        let location = self.location(name);
        unsafe { self.gl.uniform_1_f32(location.as_ref(), value) }
    }

    fn set_vec2(&mut self, name: &str, value: &Vec2) {
        let location = self.location(name);
        unsafe { self.gl.uniform_2_f32(location.as_ref(), value.x, value.y) }
    }

    fn set_vec3(&mut self, name: &str, value: &Vec3) {
        let location = self.location(name);
        unsafe { self.gl.uniform_3_f32(location.as_ref(), value.x, value.y, value.z) }
    }

    fn set_vec4(&mut self, name: &str, value: &Vec4) {
        let location = self.location(name);
        unsafe { self.gl.uniform_4_f32(location.as_ref(), value.x, value.y, value.z, value.w) }
    }

    fn set_mat4(&mut self, name: &str, value: &Mat4) {
        let location = self.location(name);
        // nalgebra storage is column-major, as GL expects
        unsafe { self.gl.uniform_matrix_4_f32_slice(location.as_ref(), false, value.as_slice()) }
    }

    fn set_sampler(&mut self, name: &str, unit: u32) {
        let unit = i32::try_from(unit).unwrap_or(i32::MAX);
        self.set_int(name, unit);
    }
}

impl Drop for GlShaderProgram {
    fn drop(&mut self) {
        unsafe { self.gl.delete_program(self.program) }
    }
}
