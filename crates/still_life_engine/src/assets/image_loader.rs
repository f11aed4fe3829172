//! Image loading utilities for texture data
//!
//! Decodes PNG/JPEG files into tightly packed 8-bit pixel buffers ready for
//! GPU upload. Images are flipped vertically on load so that row 0 is the
//! bottom scanline, matching the texture-coordinate convention of the
//! shaders. Only RGB and RGBA layouts are accepted.

use std::path::Path;
use image::DynamicImage;
use crate::assets::AssetError;

/// Loaded image data ready for GPU upload
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw pixel data, `channels` bytes per pixel, bottom row first
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of color channels (3 for RGB, 4 for RGBA)
    pub channels: u8,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();

        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref)
            .map_err(|e| AssetError::LoadFailed(format!("Could not load image {}: {}", path_ref.display(), e)))?;

        Self::from_dynamic(img)
    }

    /// Flip and repack a decoded image, keeping its native channel count
    pub fn from_dynamic(img: DynamicImage) -> Result<Self, AssetError> {
        let channels = img.color().channel_count();
        let img = img.flipv();
        let (width, height) = (img.width(), img.height());

        let data = match channels {
            3 => img.into_rgb8().into_raw(),
            4 => img.into_rgba8().into_raw(),
            other => return Err(AssetError::UnsupportedChannels { channels: other }),
        };

        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Create a solid color image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let data = color.iter().copied().cycle().take(pixel_count * 4).collect();

        Self {
            data,
            width,
            height,
            channels: 4,
        }
    }

    /// Whether the image carries an alpha channel
    pub const fn has_alpha(&self) -> bool {
        self.channels == 4
    }
}
