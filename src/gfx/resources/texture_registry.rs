//! Tagged texture slots
//!
//! Scene textures are decoded on the CPU, flipped so that texture coordinate
//! (0, 0) addresses the bottom-left of the image, and registered under a tag in
//! the next free slot. The slot index doubles as the texture unit the renderer
//! binds the image to.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Number of texture slots available to a scene.
pub const MAX_TEXTURE_SLOTS: usize = 16;

/// Largest width or height the renderer requests from the device.
pub const MAX_TEXTURE_DIMENSION: u32 = 4096;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("could not load image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error(
        "image {} has {channels} channels; only RGB and RGBA images are supported",
        .path.display()
    )]
    UnsupportedChannels { path: PathBuf, channels: u8 },
    #[error(
        "image {} is {width}x{height}; textures are limited to {max}x{max}",
        .path.display()
    )]
    TooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max: u32,
    },
    #[error("all texture slots are in use; cannot register '{tag}'")]
    SlotsExhausted { tag: String },
    #[error("a texture is already registered under '{tag}'")]
    DuplicateTag { tag: String },
}

/// Decoded image ready for upload as an RGBA8 texture.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub label: String,
    pub pixels: image::RgbaImage,
    /// Channel count of the source file before expansion to RGBA.
    pub source_channels: u8,
}

impl LoadedImage {
    /// Reads and decodes an image file, flipping it vertically.
    pub fn from_path(path: &Path) -> Result<Self, TextureError> {
        let decoded = image::open(path).map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_dynamic(path, decoded)
    }

    /// Validates the channel layout of an already decoded image and flips it.
    pub fn from_dynamic(path: &Path, decoded: image::DynamicImage) -> Result<Self, TextureError> {
        let channels = decoded.color().channel_count();
        if channels != 3 && channels != 4 {
            return Err(TextureError::UnsupportedChannels {
                path: path.to_path_buf(),
                channels,
            });
        }
        let (width, height) = (decoded.width(), decoded.height());
        if width > MAX_TEXTURE_DIMENSION || height > MAX_TEXTURE_DIMENSION {
            return Err(TextureError::TooLarge {
                path: path.to_path_buf(),
                width,
                height,
                max: MAX_TEXTURE_DIMENSION,
            });
        }

        let pixels = decoded.flipv().to_rgba8();
        log::info!(
            "Loaded image {}: {}x{}, {} channels",
            path.display(),
            pixels.width(),
            pixels.height(),
            channels
        );

        Ok(Self {
            label: path.display().to_string(),
            pixels,
            source_channels: channels,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Builds the full mip chain, level 0 first, halving down to 1x1.
    pub fn mip_chain(&self) -> Vec<image::RgbaImage> {
        let mut levels = vec![self.pixels.clone()];
        let (mut width, mut height) = self.pixels.dimensions();

        while width > 1 || height > 1 {
            width = (width / 2).max(1);
            height = (height / 2).max(1);
            let next = image::imageops::resize(
                &self.pixels,
                width,
                height,
                image::imageops::FilterType::Triangle,
            );
            levels.push(next);
        }

        levels
    }
}

/// One occupied texture slot.
#[derive(Debug)]
pub struct TextureSlot<T> {
    pub tag: String,
    pub texture: T,
}

/// Fixed-capacity list of tagged textures in load order.
///
/// Generic over the stored texture so the same bookkeeping serves decoded
/// images on the CPU and uploaded textures on the GPU.
#[derive(Debug)]
pub struct TextureRegistry<T> {
    slots: Vec<TextureSlot<T>>,
}

impl<T> Default for TextureRegistry<T> {
    fn default() -> Self {
        Self {
            slots: Vec::with_capacity(MAX_TEXTURE_SLOTS),
        }
    }
}

impl<T> TextureRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `texture` under `tag` and returns its slot index.
    pub fn register(&mut self, tag: &str, texture: T) -> Result<usize, TextureError> {
        if self.find_slot(tag).is_some() {
            return Err(TextureError::DuplicateTag {
                tag: tag.to_string(),
            });
        }
        if self.slots.len() >= MAX_TEXTURE_SLOTS {
            return Err(TextureError::SlotsExhausted {
                tag: tag.to_string(),
            });
        }

        self.slots.push(TextureSlot {
            tag: tag.to_string(),
            texture,
        });
        Ok(self.slots.len() - 1)
    }

    /// Slot index of the texture registered under `tag`.
    pub fn find_slot(&self, tag: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.tag == tag)
    }

    /// The texture registered under `tag`.
    pub fn find(&self, tag: &str) -> Option<&T> {
        self.slots
            .iter()
            .find(|slot| slot.tag == tag)
            .map(|slot| &slot.texture)
    }

    pub fn get(&self, slot: usize) -> Option<&TextureSlot<T>> {
        self.slots.get(slot)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextureSlot<T>> {
        self.slots.iter()
    }

    /// Maps every slot to a new texture type, keeping tags and slot order.
    pub fn map<U>(&self, mut f: impl FnMut(&TextureSlot<T>) -> U) -> TextureRegistry<U> {
        TextureRegistry {
            slots: self
                .slots
                .iter()
                .map(|slot| TextureSlot {
                    tag: slot.tag.clone(),
                    texture: f(slot),
                })
                .collect(),
        }
    }
}
