//! Application configuration
//!
//! Plain configuration structs whose `Default` values reproduce the look of
//! the still life: window size, camera start pose, projection volume and the
//! directory textures are read from.

use std::path::PathBuf;

use cgmath::Vector3;

/// Top-level configuration passed to [`crate::app::StillLifeApp`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub projection: ProjectionConfig,
    /// Directory containing the scene's texture images.
    pub asset_dir: PathBuf,
    /// Start in orthographic projection instead of perspective.
    pub start_orthographic: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            projection: ProjectionConfig::default(),
            asset_dir: PathBuf::from("textures"),
            start_orthographic: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Still Life".to_string(),
            width: 1000,
            height: 800,
        }
    }
}

/// Initial camera pose and input sensitivity.
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    pub position: Vector3<f32>,
    /// Initial look direction; normalised by the camera.
    pub front: Vector3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in degrees.
    pub zoom: f32,
    /// World units travelled per second while a movement key is held.
    pub movement_speed: f32,
    /// Degrees of rotation per pixel of mouse travel, also the scroll step.
    pub mouse_sensitivity: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 5.0, 20.0),
            front: Vector3::new(0.0, -0.5, -2.0),
            up: Vector3::unit_y(),
            zoom: 80.0,
            movement_speed: 10.0,
            mouse_sensitivity: 0.1,
            yaw: -90.0,
            pitch: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProjectionConfig {
    pub znear: f32,
    pub zfar: f32,
    /// Half of the visible height in orthographic mode.
    pub ortho_half_height: f32,
    pub min_fov: f32,
    pub max_fov: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            znear: 0.1,
            zfar: 100.0,
            ortho_half_height: 10.0,
            min_fov: 1.0,
            max_fov: 90.0,
        }
    }
}
