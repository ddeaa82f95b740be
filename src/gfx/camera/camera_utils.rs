use cgmath::{Deg, Matrix4};

use crate::config::ProjectionConfig;

/// Remaps OpenGL clip space (z in [-1, 1]) to wgpu clip space (z in [0, 1]).
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// How the scene is projected onto the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    #[default]
    Perspective,
    Orthographic,
}

/// Builds the projection matrix for the given mode, already in wgpu clip space.
///
/// `fov` is only used in perspective mode. The orthographic volume keeps a
/// fixed half height and widens with the aspect ratio.
pub fn build_projection_matrix(
    mode: ProjectionMode,
    fov: Deg<f32>,
    aspect: f32,
    projection: &ProjectionConfig,
) -> Matrix4<f32> {
    let proj = match mode {
        ProjectionMode::Perspective => {
            cgmath::perspective(fov, aspect, projection.znear, projection.zfar)
        }
        ProjectionMode::Orthographic => {
            let half_height = projection.ortho_half_height;
            let half_width = aspect * half_height;
            cgmath::ortho(
                -half_width,
                half_width,
                -half_height,
                half_height,
                projection.znear,
                projection.zfar,
            )
        }
    };
    OPENGL_TO_WGPU_MATRIX * proj
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    fn project(m: Matrix4<f32>, p: [f32; 3]) -> Vector4<f32> {
        let clip = m * Vector4::new(p[0], p[1], p[2], 1.0);
        clip / clip.w
    }

    #[test]
    fn test_perspective_depth_range_is_zero_to_one() {
        let config = ProjectionConfig::default();
        let m = build_projection_matrix(ProjectionMode::Perspective, Deg(80.0), 1.25, &config);

        let near = project(m, [0.0, 0.0, -config.znear]);
        let far = project(m, [0.0, 0.0, -config.zfar]);
        assert!(near.z.abs() < 1e-4, "near plane maps to {}", near.z);
        assert!((far.z - 1.0).abs() < 1e-4, "far plane maps to {}", far.z);
    }

    #[test]
    fn test_orthographic_extent_follows_aspect() {
        let config = ProjectionConfig::default();
        let aspect = 1000.0 / 800.0;
        let m = build_projection_matrix(ProjectionMode::Orthographic, Deg(45.0), aspect, &config);

        let corner = project(m, [aspect * 10.0, 10.0, -50.0]);
        assert!((corner.x - 1.0).abs() < 1e-5);
        assert!((corner.y - 1.0).abs() < 1e-5);
        assert!(corner.z > 0.0 && corner.z < 1.0);
    }

    #[test]
    fn test_orthographic_ignores_field_of_view() {
        let config = ProjectionConfig::default();
        let a = build_projection_matrix(ProjectionMode::Orthographic, Deg(10.0), 1.0, &config);
        let b = build_projection_matrix(ProjectionMode::Orthographic, Deg(90.0), 1.0, &config);
        assert_eq!(a, b);
    }
}
