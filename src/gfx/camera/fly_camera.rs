use cgmath::*;

use crate::config::CameraConfig;

/// Directions the camera can be moved in with the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Free-flying first-person camera.
///
/// The camera looks along `front` from `position`. Orientation is owned by
/// whoever drives `front` (see [`super::ViewManager`]); the camera itself only
/// translates.
#[derive(Debug, Clone, Copy)]
pub struct FlyCamera {
    pub position: Vector3<f32>,
    pub front: Vector3<f32>,
    pub up: Vector3<f32>,
    pub world_up: Vector3<f32>,
    /// Vertical field of view in degrees.
    pub zoom: f32,
    pub movement_speed: f32,
}

impl FlyCamera {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            position: config.position,
            front: config.front.normalize(),
            up: config.up,
            world_up: config.up,
            zoom: config.zoom,
            movement_speed: config.movement_speed,
        }
    }

    /// Unit vector pointing to the camera's right.
    pub fn right(&self) -> Vector3<f32> {
        self.front.cross(self.world_up).normalize()
    }

    /// Moves the camera for `delta_time` seconds in the given direction.
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        let offset = match direction {
            CameraMovement::Forward => self.front * velocity,
            CameraMovement::Backward => -self.front * velocity,
            CameraMovement::Right => self.right() * velocity,
            CameraMovement::Left => -self.right() * velocity,
            CameraMovement::Up => self.up * velocity,
            CameraMovement::Down => -self.up * velocity,
        };
        self.position += offset;
    }

    /// Points the camera along `front`, normalising it.
    pub fn set_front(&mut self, front: Vector3<f32>) {
        self.front = front.normalize();
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        Matrix4::look_at_rh(eye, eye + self.front, self.up)
    }
}

/// Unit look direction for the given yaw and pitch, both in degrees.
///
/// Yaw of -90 looks down the negative Z axis.
pub fn front_from_angles(yaw: f32, pitch: f32) -> Vector3<f32> {
    let (yaw, pitch) = (Deg(yaw), Deg(pitch));
    Vector3::new(
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos(),
    )
    .normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_close(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < 1e-5, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_new_normalizes_front() {
        let camera = FlyCamera::new(&CameraConfig::default());
        assert!((camera.front.magnitude() - 1.0).abs() < 1e-6);
        assert_vec_close(camera.front, Vector3::new(0.0, -0.5, -2.0).normalize());
    }

    #[test]
    fn test_forward_moves_along_front() {
        let mut camera = FlyCamera::new(&CameraConfig::default());
        let start = camera.position;
        camera.process_keyboard(CameraMovement::Forward, 0.5);
        assert_vec_close(camera.position, start + camera.front * 5.0);

        camera.process_keyboard(CameraMovement::Backward, 0.5);
        assert_vec_close(camera.position, start);
    }

    #[test]
    fn test_strafe_and_vertical_moves() {
        let config = CameraConfig {
            front: Vector3::new(0.0, 0.0, -1.0),
            ..CameraConfig::default()
        };
        let mut camera = FlyCamera::new(&config);
        let start = camera.position;

        camera.process_keyboard(CameraMovement::Right, 1.0);
        assert_vec_close(camera.position, start + Vector3::new(10.0, 0.0, 0.0));

        camera.process_keyboard(CameraMovement::Left, 1.0);
        camera.process_keyboard(CameraMovement::Up, 0.1);
        assert_vec_close(camera.position, start + Vector3::new(0.0, 1.0, 0.0));

        camera.process_keyboard(CameraMovement::Down, 0.1);
        assert_vec_close(camera.position, start);
    }

    #[test]
    fn test_view_matrix_puts_camera_at_origin() {
        let camera = FlyCamera::new(&CameraConfig::default());
        let eye = camera.view_matrix() * camera.position.extend(1.0);
        assert!(eye.truncate().magnitude() < 1e-4);

        // A point straight ahead ends up on the negative view Z axis.
        let ahead = camera.view_matrix() * (camera.position + camera.front).extend(1.0);
        assert!((ahead.z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_front_from_default_angles_looks_down_negative_z() {
        assert_vec_close(front_from_angles(-90.0, 0.0), Vector3::new(0.0, 0.0, -1.0));
        assert_vec_close(front_from_angles(0.0, 89.0).normalize(), front_from_angles(0.0, 89.0));
    }
}
