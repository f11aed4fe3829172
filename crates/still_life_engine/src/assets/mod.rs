//! Asset loading

pub mod image_loader;

pub use image_loader::ImageData;

use thiserror::Error;

/// Asset system errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// The file could not be read or decoded
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// The decoded image has a channel layout the renderer does not handle
    #[error("Unsupported image with {channels} channel(s)")]
    UnsupportedChannels {
        /// Channel count reported by the decoder
        channels: u8,
    },
}
