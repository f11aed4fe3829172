//! OpenGL texture uploads

use std::collections::HashMap;
use std::rc::Rc;

use glow::HasContext;

use still_life_engine::assets::ImageData;
use still_life_engine::render::{TextureBackend, TextureError, TextureHandle};

/// Texture backend over a shared GL context
pub struct GlTextureBackend {
    gl: Rc<glow::Context>,
    textures: HashMap<TextureHandle, glow::Texture>,
    next_id: u32,
    max_units: usize,
}

impl GlTextureBackend {
    /// Create a backend and query the unit limit
    pub fn new(gl: Rc<glow::Context>) -> Self {
        let max_units = unsafe { gl.get_parameter_i32(glow::MAX_COMBINED_TEXTURE_IMAGE_UNITS) };
        let max_units = usize::try_from(max_units).unwrap_or(0);
        log::info!("GL exposes {} texture units", max_units);

        Self {
            gl,
            textures: HashMap::new(),
            next_id: 1,
            max_units,
        }
    }
}

/// Repeat wrapping, plain linear minification and magnification
const SAMPLER_PARAMETERS: [(u32, u32); 4] = [
    (glow::TEXTURE_WRAP_S, glow::REPEAT),
    (glow::TEXTURE_WRAP_T, glow::REPEAT),
    (glow::TEXTURE_MIN_FILTER, glow::LINEAR),
    (glow::TEXTURE_MAG_FILTER, glow::LINEAR),
];

const fn pixel_formats(image: &ImageData) -> (u32, u32) {
    if image.has_alpha() {
        (glow::RGBA8, glow::RGBA)
    } else {
        (glow::RGB8, glow::RGB)
    }
}

impl TextureBackend for GlTextureBackend {
    fn create_texture(&mut self, image: &ImageData) -> Result<TextureHandle, TextureError> {
        if image.channels != 3 && image.channels != 4 {
            return Err(TextureError::Backend(format!("cannot upload {}-channel image", image.channels)));
        }
        let (internal_format, format) = pixel_formats(image);
        let width = i32::try_from(image.width).map_err(|e| TextureError::Backend(e.to_string()))?;
        let height = i32::try_from(image.height).map_err(|e| TextureError::Backend(e.to_string()))?;

        let texture = unsafe {
            let texture = self.gl.create_texture().map_err(TextureError::Backend)?;
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));

            for (parameter, value) in SAMPLER_PARAMETERS {
                self.gl.tex_parameter_i32(glow::TEXTURE_2D, parameter, value as i32);
            }

            // RGB rows are not 4-byte aligned in general
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                internal_format as i32,
                width,
                height,
                0,
                format,
                glow::UNSIGNED_BYTE,
                Some(image.data.as_slice()),
            );
            self.gl.generate_mipmap(glow::TEXTURE_2D);
            self.gl.bind_texture(glow::TEXTURE_2D, None);
            texture
        };

        let handle = TextureHandle(self.next_id);
        self.next_id += 1;
        self.textures.insert(handle, texture);
        Ok(handle)
    }

    fn bind_texture(&mut self, unit: u32, handle: TextureHandle) {
        let Some(texture) = self.textures.get(&handle) else {
            log::warn!("Cannot bind unknown texture {:?}", handle);
            return;
        };
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(*texture));
        }
    }

    fn delete_texture(&mut self, handle: TextureHandle) {
        if let Some(texture) = self.textures.remove(&handle) {
            unsafe { self.gl.delete_texture(texture) }
        }
    }

    fn max_texture_units(&self) -> usize {
        self.max_units
    }
}

impl Drop for GlTextureBackend {
    fn drop(&mut self) {
        for (_, texture) in self.textures.drain() {
            unsafe { self.gl.delete_texture(texture) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameter(name: u32) -> Option<u32> {
        SAMPLER_PARAMETERS.iter().find(|(p, _)| *p == name).map(|(_, v)| *v)
    }

    #[test]
    fn test_sampling_is_repeat_and_plain_linear() {
        assert_eq!(parameter(glow::TEXTURE_WRAP_S), Some(glow::REPEAT));
        assert_eq!(parameter(glow::TEXTURE_WRAP_T), Some(glow::REPEAT));
        assert_eq!(parameter(glow::TEXTURE_MIN_FILTER), Some(glow::LINEAR));
        assert_eq!(parameter(glow::TEXTURE_MAG_FILTER), Some(glow::LINEAR));
    }

    #[test]
    fn test_pixel_formats_follow_alpha() {
        let rgba = ImageData::solid_color(1, 1, [0, 0, 0, 255]);
        let rgb = ImageData {
            data: vec![0; 3],
            width: 1,
            height: 1,
            channels: 3,
        };

        assert_eq!(pixel_formats(&rgba), (glow::RGBA8, glow::RGBA));
        assert_eq!(pixel_formats(&rgb), (glow::RGB8, glow::RGB));
    }
}
