pub mod camera_utils;
pub mod fly_camera;
pub mod input;
pub mod view_manager;

// Re-export main types
pub use camera_utils::{build_projection_matrix, ProjectionMode};
pub use fly_camera::{CameraMovement, FlyCamera};
pub use view_manager::{CameraKey, ViewManager};
