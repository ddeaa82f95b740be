//! Scene resources
//!
//! Materials, lights and textures, both their CPU descriptions and the GPU
//! objects built from them.

pub mod lights;
pub mod material;
pub mod texture_registry;
pub mod texture_resource;

// Re-export main types
pub use lights::{LightSource, MAX_LIGHTS};
pub use material::{MaterialLibrary, ObjectMaterial};
pub use texture_registry::{
    LoadedImage, TextureError, TextureRegistry, TextureSlot, MAX_TEXTURE_DIMENSION,
    MAX_TEXTURE_SLOTS,
};
pub use texture_resource::TextureResource;
