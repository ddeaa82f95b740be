//! # Scene Management Module
//!
//! The scene is a fixed still life assembled from primitive meshes.
//!
//! ## Key Components
//!
//! - [`SceneManager`] - Owns textures, materials, lights and meshes and
//!   replays the composition into a shader each frame
//! - [`still_life`] - The composition itself, as data
//! - [`Vertex3D`] - Vertex format with position, normal and texture coordinates
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use still_life::gfx::scene::SceneManager;
//! use still_life::gfx::shader::ShaderManager;
//!
//! let mut shader = ShaderManager::new();
//! let mut scene = SceneManager::new();
//! scene.prepare_scene(&mut shader, Path::new("textures"));
//! scene.render_scene(&mut shader);
//! ```

pub mod scene_manager;
pub mod still_life;
pub mod vertex;

// Re-export main types
pub use scene_manager::{model_matrix, SceneManager};
pub use still_life::{SceneObject, STILL_LIFE};
pub use vertex::Vertex3D;
