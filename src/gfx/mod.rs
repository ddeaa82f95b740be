//! # Graphics Module
//!
//! Everything needed to draw the still life.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - Fly camera and the view manager feeding it input
//! - **Geometry** ([`geometry`]) - Procedural primitive meshes
//! - **Scene Management** ([`scene`]) - Textures, materials, lights and the composition
//! - **Shader State** ([`shader`]) - Uniform values and the per-frame draw list
//! - **Rendering Pipeline** ([`rendering`]) - wgpu backend drawing a recorded frame
//! - **Resource Management** ([`resources`]) - Materials, lights and textures
//!
//! ## Usage
//!
//! ```no_run
//! use still_life::config::AppConfig;
//! use still_life::gfx::{SceneManager, ShaderManager, ViewManager};
//!
//! let config = AppConfig::default();
//! let mut shader = ShaderManager::new();
//! let mut view = ViewManager::new(&config);
//! let mut scene = SceneManager::new();
//! scene.prepare_scene(&mut shader, &config.asset_dir);
//!
//! view.prepare_scene_view(&mut shader, 1.0 / 60.0);
//! scene.render_scene(&mut shader);
//! ```

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;
pub mod shader;

// Re-export commonly used types
pub use camera::ViewManager;
pub use rendering::Renderer;
pub use scene::SceneManager;
pub use shader::ShaderManager;
