//! Texture registry
//!
//! Tracks the GPU textures of the scene by tag and the texture unit each one
//! is bound to. The registry never talks to a graphics API directly; all GPU
//! work goes through a [`TextureBackend`].
//!
//! Units are assigned at registration time in load order (first texture on
//! unit 0, second on unit 1, ...). Each entry records its unit explicitly, so
//! [`TextureRegistry::bind_all`] does not depend on iteration order.

use std::path::Path;
use thiserror::Error;

use crate::assets::{AssetError, ImageData};

/// Handle for a GPU texture resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Texture loading and binding errors
#[derive(Error, Debug)]
pub enum TextureError {
    /// Decoding failed or the channel layout is unsupported
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// A texture with this tag is already registered
    #[error("Texture tag '{0}' is already registered")]
    DuplicateTag(String),

    /// Every texture unit is taken
    #[error("Cannot register '{tag}': all {capacity} texture units are in use")]
    CapacityExceeded {
        /// Tag that was rejected
        tag: String,
        /// Number of available units
        capacity: usize,
    },

    /// The GPU backend refused the upload
    #[error("Texture backend error: {0}")]
    Backend(String),
}

/// GPU-side texture operations
pub trait TextureBackend {
    /// Upload pixel data into a new texture resource
    ///
    /// Textures repeat in both directions, sample with linear filtering and
    /// carry a generated mipmap chain.
    fn create_texture(&mut self, image: &ImageData) -> Result<TextureHandle, TextureError>;

    /// Bind a texture to a hardware texture unit
    fn bind_texture(&mut self, unit: u32, handle: TextureHandle);

    /// Delete a texture resource
    fn delete_texture(&mut self, handle: TextureHandle);

    /// Number of texture units that can be bound simultaneously
    fn max_texture_units(&self) -> usize;
}

/// A registered texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureEntry {
    /// Lookup tag
    pub tag: String,
    /// GPU resource
    pub handle: TextureHandle,
    /// Texture unit the texture is bound to
    pub unit: u32,
}

/// Tag-addressed collection of loaded textures
#[derive(Debug, Clone)]
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
    capacity: usize,
}

impl TextureRegistry {
    /// Create an empty registry limited to `capacity` texture units
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Decode an image file and register it under `tag`
    pub fn load_texture(
        &mut self,
        backend: &mut dyn TextureBackend,
        path: impl AsRef<Path>,
        tag: &str,
    ) -> Result<TextureHandle, TextureError> {
        let path = path.as_ref();
        self.check_can_register(tag).inspect_err(|e| log::error!("{}", e))?;

        let image = ImageData::from_file(path).map_err(|e| {
            log::error!("Could not load texture '{}': {}", tag, e);
            TextureError::from(e)
        })?;
        log::info!(
            "Loaded image {}, width:{}, height:{}, channels:{}",
            path.display(),
            image.width,
            image.height,
            image.channels
        );

        self.load_texture_from_image(backend, &image, tag)
    }

    /// Register already decoded pixel data under `tag`
    pub fn load_texture_from_image(
        &mut self,
        backend: &mut dyn TextureBackend,
        image: &ImageData,
        tag: &str,
    ) -> Result<TextureHandle, TextureError> {
        self.check_can_register(tag).inspect_err(|e| log::error!("{}", e))?;

        if image.channels != 3 && image.channels != 4 {
            let err = TextureError::from(AssetError::UnsupportedChannels { channels: image.channels });
            log::error!("Could not load texture '{}': {}", tag, err);
            return Err(err);
        }

        let handle = backend.create_texture(image)?;
        let unit = self.next_free_unit();
        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            handle,
            unit,
        });

        log::debug!("Registered texture '{}' as {:?} on unit {}", tag, handle, unit);
        Ok(handle)
    }

    /// Bind every registered texture to its unit
    pub fn bind_all(&self, backend: &mut dyn TextureBackend) {
        for entry in &self.entries {
            backend.bind_texture(entry.unit, entry.handle);
        }
        log::debug!("Bound {} texture(s)", self.entries.len());
    }

    /// Texture unit of the first entry tagged `tag`
    pub fn find_slot(&self, tag: &str) -> Option<u32> {
        self.find(tag).map(|entry| entry.unit)
    }

    /// GPU handle of the first entry tagged `tag`
    pub fn find_handle(&self, tag: &str) -> Option<TextureHandle> {
        self.find(tag).map(|entry| entry.handle)
    }

    /// Delete every texture and empty the registry
    pub fn release_all(&mut self, backend: &mut dyn TextureBackend) {
        for entry in self.entries.drain(..) {
            backend.delete_texture(entry.handle);
        }
    }

    /// Number of registered textures
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no texture is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of textures the registry accepts
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Registered textures in load order
    pub fn entries(&self) -> &[TextureEntry] {
        &self.entries
    }

    fn find(&self, tag: &str) -> Option<&TextureEntry> {
        self.entries.iter().find(|entry| entry.tag == tag)
    }

    fn check_can_register(&self, tag: &str) -> Result<(), TextureError> {
        if self.find(tag).is_some() {
            return Err(TextureError::DuplicateTag(tag.to_string()));
        }
        if self.entries.len() >= self.capacity {
            return Err(TextureError::CapacityExceeded {
                tag: tag.to_string(),
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    fn next_free_unit(&self) -> u32 {
        (0..)
            .find(|unit| self.entries.iter().all(|entry| entry.unit != *unit))
            .unwrap_or_default()
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;

    /// In-memory backend recording every call
    #[derive(Debug, Default)]
    pub struct MockTextureBackend {
        pub next_id: u32,
        pub live: Vec<TextureHandle>,
        pub bound: Vec<(u32, TextureHandle)>,
        pub deleted: Vec<TextureHandle>,
        pub uploads: Vec<(u32, u32, u8)>,
        pub units: usize,
    }

    impl MockTextureBackend {
        pub fn with_units(units: usize) -> Self {
            Self {
                next_id: 1,
                units,
                ..Default::default()
            }
        }
    }

    impl TextureBackend for MockTextureBackend {
        fn create_texture(&mut self, image: &ImageData) -> Result<TextureHandle, TextureError> {
            let handle = TextureHandle(self.next_id);
            self.next_id += 1;
            self.live.push(handle);
            self.uploads.push((image.width, image.height, image.channels));
            Ok(handle)
        }

        fn bind_texture(&mut self, unit: u32, handle: TextureHandle) {
            self.bound.push((unit, handle));
        }

        fn delete_texture(&mut self, handle: TextureHandle) {
            self.live.retain(|live| *live != handle);
            self.deleted.push(handle);
        }

        fn max_texture_units(&self) -> usize {
            self.units
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockTextureBackend;
    use super::*;

    fn rgb(width: u32, height: u32) -> ImageData {
        ImageData {
            data: vec![0; (width * height * 3) as usize],
            width,
            height,
            channels: 3,
        }
    }

    #[test]
    fn test_load_then_find_returns_fresh_slot_and_handle() {
        let mut backend = MockTextureBackend::with_units(16);
        let mut registry = TextureRegistry::new(16);

        let wall = registry.load_texture_from_image(&mut backend, &rgb(2, 2), "wall").unwrap();
        let can = registry
            .load_texture_from_image(&mut backend, &ImageData::solid_color(2, 2, [0, 0, 0, 255]), "can")
            .unwrap();

        assert_ne!(wall, can);
        assert_eq!(registry.find_handle("wall"), Some(wall));
        assert_eq!(registry.find_handle("can"), Some(can));
        assert_eq!(registry.find_slot("wall"), Some(0));
        assert_eq!(registry.find_slot("can"), Some(1));
        assert_eq!(backend.uploads, vec![(2, 2, 3), (2, 2, 4)]);
    }

    #[test]
    fn test_unsupported_channels_register_nothing() {
        let mut backend = MockTextureBackend::with_units(16);
        let mut registry = TextureRegistry::new(16);
        registry.load_texture_from_image(&mut backend, &rgb(1, 1), "first").unwrap();

        for channels in [1u8, 2] {
            let image = ImageData {
                data: vec![0; channels as usize],
                width: 1,
                height: 1,
                channels,
            };
            let err = registry.load_texture_from_image(&mut backend, &image, "gray").unwrap_err();
            assert!(matches!(err, TextureError::Asset(AssetError::UnsupportedChannels { .. })));
        }

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find_slot("gray"), None);
        assert_eq!(backend.live.len(), 1);
    }

    #[test]
    fn test_undecodable_file_registers_nothing() {
        let mut backend = MockTextureBackend::with_units(16);
        let mut registry = TextureRegistry::new(16);

        let err = registry.load_texture(&mut backend, "missing/bookcover.jpg", "bookcover").unwrap_err();

        assert!(matches!(err, TextureError::Asset(AssetError::LoadFailed(_))));
        assert!(registry.is_empty());
        assert!(backend.uploads.is_empty());
    }

    #[test]
    fn test_duplicate_tag_is_rejected() {
        let mut backend = MockTextureBackend::with_units(16);
        let mut registry = TextureRegistry::new(16);
        let original = registry.load_texture_from_image(&mut backend, &rgb(1, 1), "pages").unwrap();

        let err = registry.load_texture_from_image(&mut backend, &rgb(4, 4), "pages").unwrap_err();

        assert!(matches!(err, TextureError::DuplicateTag(tag) if tag == "pages"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find_handle("pages"), Some(original));
    }

    #[test]
    fn test_capacity_exhaustion_is_reported() {
        let mut backend = MockTextureBackend::with_units(2);
        let mut registry = TextureRegistry::new(2);
        registry.load_texture_from_image(&mut backend, &rgb(1, 1), "a").unwrap();
        registry.load_texture_from_image(&mut backend, &rgb(1, 1), "b").unwrap();

        let err = registry.load_texture_from_image(&mut backend, &rgb(1, 1), "c").unwrap_err();

        assert!(matches!(err, TextureError::CapacityExceeded { capacity: 2, .. }));
        assert_eq!(registry.len(), 2);
        assert_eq!(backend.uploads.len(), 2);
    }

    #[test]
    fn test_bind_all_uses_registration_order() {
        let mut backend = MockTextureBackend::with_units(16);
        let mut registry = TextureRegistry::new(16);
        let handles: Vec<_> = ["counter", "wall", "apple", "foam"]
            .iter()
            .map(|tag| registry.load_texture_from_image(&mut backend, &rgb(1, 1), tag).unwrap())
            .collect();

        registry.bind_all(&mut backend);

        let expected: Vec<_> = handles.iter().enumerate().map(|(i, h)| (i as u32, *h)).collect();
        assert_eq!(backend.bound, expected);
    }

    #[test]
    fn test_lookups_on_empty_or_unknown_tags() {
        let mut backend = MockTextureBackend::with_units(16);
        let mut registry = TextureRegistry::new(16);
        assert_eq!(registry.find_slot("wall"), None);
        assert_eq!(registry.find_handle("wall"), None);

        registry.load_texture_from_image(&mut backend, &rgb(1, 1), "wall").unwrap();
        assert_eq!(registry.find_slot("Wall"), None);
        assert_eq!(registry.find_handle("floor"), None);
    }

    #[test]
    fn test_release_all_deletes_every_handle() {
        let mut backend = MockTextureBackend::with_units(16);
        let mut registry = TextureRegistry::new(16);
        let a = registry.load_texture_from_image(&mut backend, &rgb(1, 1), "a").unwrap();
        let b = registry.load_texture_from_image(&mut backend, &rgb(1, 1), "b").unwrap();

        registry.release_all(&mut backend);

        assert!(registry.is_empty());
        assert!(backend.live.is_empty());
        assert_eq!(backend.deleted, vec![a, b]);
        assert_eq!(registry.find_slot("a"), None);
    }
}
