//! Camera view management
//!
//! [`ViewManager`] turns mouse and keyboard input into camera motion and
//! uploads the resulting view and projection to the shader once per frame.

use std::collections::HashSet;

use cgmath::Deg;

use super::camera_utils::{build_projection_matrix, ProjectionMode};
use super::fly_camera::{front_from_angles, CameraMovement, FlyCamera};
use crate::config::{AppConfig, ProjectionConfig};
use crate::gfx::shader::ShaderManager;

/// Keys the view manager responds to, independent of the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraKey {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    Perspective,
    Orthographic,
}

impl CameraKey {
    fn movement(self) -> Option<CameraMovement> {
        match self {
            CameraKey::Forward => Some(CameraMovement::Forward),
            CameraKey::Backward => Some(CameraMovement::Backward),
            CameraKey::Left => Some(CameraMovement::Left),
            CameraKey::Right => Some(CameraMovement::Right),
            CameraKey::Up => Some(CameraMovement::Up),
            CameraKey::Down => Some(CameraMovement::Down),
            CameraKey::Perspective | CameraKey::Orthographic => None,
        }
    }
}

pub struct ViewManager {
    camera: FlyCamera,
    projection: ProjectionConfig,
    projection_mode: ProjectionMode,
    last_x: f32,
    last_y: f32,
    first_mouse: bool,
    mouse_sensitivity: f32,
    yaw: f32,
    pitch: f32,
    held: HashSet<CameraMovement>,
    width: u32,
    height: u32,
}

impl ViewManager {
    pub fn new(config: &AppConfig) -> Self {
        let window = &config.window;
        let projection_mode = if config.start_orthographic {
            ProjectionMode::Orthographic
        } else {
            ProjectionMode::Perspective
        };

        Self {
            camera: FlyCamera::new(&config.camera),
            projection: config.projection,
            projection_mode,
            last_x: window.width as f32 / 2.0,
            last_y: window.height as f32 / 2.0,
            first_mouse: true,
            mouse_sensitivity: config.camera.mouse_sensitivity,
            yaw: config.camera.yaw,
            pitch: config.camera.pitch,
            held: HashSet::new(),
            width: window.width.max(1),
            height: window.height.max(1),
        }
    }

    /// Rotates the camera from a new cursor position in window pixels.
    ///
    /// The first event only records the position so the camera does not jump
    /// to wherever the cursor entered the window.
    pub fn mouse_position_callback(&mut self, x: f32, y: f32) {
        if self.first_mouse {
            self.last_x = x;
            self.last_y = y;
            self.first_mouse = false;
        }

        // Screen y grows downward
        let x_offset = (x - self.last_x) * self.mouse_sensitivity;
        let y_offset = (self.last_y - y) * self.mouse_sensitivity;
        self.last_x = x;
        self.last_y = y;

        self.yaw += x_offset;
        self.pitch = (self.pitch + y_offset).clamp(-89.0, 89.0);
        self.camera.set_front(front_from_angles(self.yaw, self.pitch));
    }

    /// Zooms by adjusting the field of view.
    pub fn mouse_scroll_callback(&mut self, _x_offset: f32, y_offset: f32) {
        self.camera.zoom = (self.camera.zoom + y_offset * self.mouse_sensitivity)
            .clamp(self.projection.min_fov, self.projection.max_fov);
    }

    pub fn press_key(&mut self, key: CameraKey, pressed: bool) {
        if let Some(movement) = key.movement() {
            if pressed {
                self.held.insert(movement);
            } else {
                self.held.remove(&movement);
            }
            return;
        }

        if !pressed {
            return;
        }
        let mode = match key {
            CameraKey::Orthographic => ProjectionMode::Orthographic,
            _ => ProjectionMode::Perspective,
        };
        if mode != self.projection_mode {
            log::info!("Switched to {:?} projection", mode);
            self.projection_mode = mode;
        }
    }

    /// Forgets every held movement key.
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Moves the camera for every movement key currently held.
    pub fn process_keyboard_events(&mut self, delta_time: f32) {
        for movement in [
            CameraMovement::Forward,
            CameraMovement::Backward,
            CameraMovement::Left,
            CameraMovement::Right,
            CameraMovement::Up,
            CameraMovement::Down,
        ] {
            if self.held.contains(&movement) {
                self.camera.process_keyboard(movement, delta_time);
            }
        }
    }

    /// Applies held keys and uploads view, projection and eye position.
    pub fn prepare_scene_view(&mut self, shader: &mut ShaderManager, delta_time: f32) {
        self.process_keyboard_events(delta_time);

        shader.set_view(self.camera.view_matrix());
        shader.set_projection(build_projection_matrix(
            self.projection_mode,
            Deg(self.camera.zoom),
            self.aspect(),
            &self.projection,
        ));
        shader.set_view_position(self.camera.position);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    pub fn projection_mode(&self) -> ProjectionMode {
        self.projection_mode
    }

    /// Current field of view in degrees.
    pub fn fov(&self) -> f32 {
        self.camera.zoom
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Matrix4, Vector3};

    fn manager() -> ViewManager {
        ViewManager::new(&AppConfig::default())
    }

    #[test]
    fn test_initial_state() {
        let view = manager();
        assert_eq!(view.fov(), 80.0);
        assert_eq!((view.yaw(), view.pitch()), (-90.0, 0.0));
        assert_eq!(view.projection_mode(), ProjectionMode::Perspective);
        assert_eq!(view.aspect(), 1.25);
        assert_eq!(view.camera().position, Vector3::new(0.0, 5.0, 20.0));
    }

    #[test]
    fn test_first_mouse_event_does_not_rotate() {
        let mut view = manager();
        let front = view.camera().front;
        view.mouse_position_callback(700.0, 100.0);
        assert_eq!((view.yaw(), view.pitch()), (-90.0, 0.0));
        // The first event re-derives front from yaw and pitch.
        assert!((view.camera().front - Vector3::new(0.0, 0.0, -1.0)).magnitude() < 1e-5);
        assert_ne!(view.camera().front, front);
    }

    #[test]
    fn test_mouse_motion_turns_camera() {
        let mut view = manager();
        view.mouse_position_callback(500.0, 400.0);
        view.mouse_position_callback(600.0, 350.0);

        assert!((view.yaw() - -80.0).abs() < 1e-4);
        assert!((view.pitch() - 5.0).abs() < 1e-4);
        assert!((view.camera().front.magnitude() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut view = manager();
        view.mouse_position_callback(0.0, 0.0);
        view.mouse_position_callback(0.0, -5000.0);
        assert_eq!(view.pitch(), 89.0);

        view.mouse_position_callback(0.0, 10000.0);
        assert_eq!(view.pitch(), -89.0);
    }

    #[test]
    fn test_scroll_clamps_field_of_view() {
        let mut view = manager();
        view.mouse_scroll_callback(0.0, 20.0);
        assert!((view.fov() - 82.0).abs() < 1e-4);

        view.mouse_scroll_callback(0.0, 1000.0);
        assert_eq!(view.fov(), 90.0);

        view.mouse_scroll_callback(0.0, -5000.0);
        assert_eq!(view.fov(), 1.0);
    }

    #[test]
    fn test_held_keys_move_until_released() {
        let mut view = manager();
        let start = view.camera().position;
        let front = view.camera().front;

        view.press_key(CameraKey::Forward, true);
        view.process_keyboard_events(0.1);
        assert!((view.camera().position - (start + front)).magnitude() < 1e-5);

        view.press_key(CameraKey::Forward, false);
        view.process_keyboard_events(0.1);
        assert!((view.camera().position - (start + front)).magnitude() < 1e-5);
    }

    #[test]
    fn test_release_all_stops_movement() {
        let mut view = manager();
        view.press_key(CameraKey::Forward, true);
        view.press_key(CameraKey::Up, true);
        view.release_all();

        let start = view.camera().position;
        view.process_keyboard_events(0.5);
        assert_eq!(view.camera().position, start);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut view = manager();
        let start = view.camera().position;
        view.press_key(CameraKey::Left, true);
        view.press_key(CameraKey::Right, true);
        view.press_key(CameraKey::Up, true);
        view.press_key(CameraKey::Down, true);
        view.process_keyboard_events(0.5);
        assert!((view.camera().position - start).magnitude() < 1e-5);
    }

    #[test]
    fn test_projection_toggle_on_press_only() {
        let mut view = manager();
        view.press_key(CameraKey::Orthographic, false);
        assert_eq!(view.projection_mode(), ProjectionMode::Perspective);

        view.press_key(CameraKey::Orthographic, true);
        assert_eq!(view.projection_mode(), ProjectionMode::Orthographic);

        view.press_key(CameraKey::Perspective, true);
        assert_eq!(view.projection_mode(), ProjectionMode::Perspective);
    }

    #[test]
    fn test_prepare_scene_view_uploads_camera() {
        let mut view = manager();
        let mut shader = ShaderManager::new();
        view.prepare_scene_view(&mut shader, 0.016);

        let globals = shader.globals();
        assert_eq!(globals.view_position, [0.0, 5.0, 20.0]);
        let expected_view: [[f32; 4]; 4] = view.camera().view_matrix().into();
        assert_eq!(globals.view, expected_view);

        view.press_key(CameraKey::Orthographic, true);
        view.prepare_scene_view(&mut shader, 0.016);
        let ortho: Matrix4<f32> = shader.globals().projection.into();
        // Orthographic projection keeps w at 1.
        assert_eq!(ortho.w.w, 1.0);
    }

    #[test]
    fn test_resize_ignores_zero() {
        let mut view = manager();
        view.resize(0, 600);
        assert_eq!(view.aspect(), 1.25);
        view.resize(800, 800);
        assert_eq!(view.aspect(), 1.0);
    }
}
