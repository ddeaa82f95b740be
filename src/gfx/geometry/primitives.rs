//! # Primitive Shape Generation
//!
//! This module contains functions to generate the basic 3D shapes the scene is
//! assembled from. All shapes are Y-up, wound counter-clockwise when seen from
//! outside, and carry normals and texture coordinates.

use super::GeometryData;
use cgmath::{InnerSpace, Vector3};
use std::f32::consts::PI;

/// Appends one flat-shaded triangle; the normal follows the winding.
fn push_flat_triangle(data: &mut GeometryData, positions: [[f32; 3]; 3], uvs: [[f32; 2]; 3]) {
    let [a, b, c] = positions.map(Vector3::from);
    let normal = (b - a).cross(c - a).normalize();
    let base = data.vertices.len() as u32;

    for (position, uv) in positions.iter().zip(uvs.iter()) {
        data.vertices.push(*position);
        data.normals.push(normal.into());
        data.tex_coords.push(*uv);
    }
    data.indices.extend_from_slice(&[base, base + 1, base + 2]);
}

/// Appends a flat quad as the triangles (p0, p1, p2) and (p0, p2, p3).
fn push_flat_quad(data: &mut GeometryData, positions: [[f32; 3]; 4]) {
    let [p0, p1, p2, p3] = positions;
    push_flat_triangle(data, [p0, p1, p2], [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]);
    push_flat_triangle(data, [p0, p2, p3], [[0.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
}

/// Generate a unit cube centered at the origin
///
/// Returns a cube with vertices from -0.5 to 0.5 on all axes.
/// Each face has proper normals pointing outward and UV coordinates from 0 to 1.
pub fn generate_cube() -> GeometryData {
    let mut data = GeometryData::new();

    #[rustfmt::skip]
    let positions = [
        // Front face
        [-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5],
        // Back face
        [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5, -0.5, -0.5],
        // Left face
        [-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5],
        // Right face
        [ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5],
        // Top face
        [-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5],
        // Bottom face
        [-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5],
    ];

    #[rustfmt::skip]
    let tex_coords = [
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
    ];

    let face_normals = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];

    data.vertices = positions.to_vec();
    data.tex_coords = tex_coords.to_vec();
    data.normals = face_normals.iter().flat_map(|n| [*n; 4]).collect();

    for face in 0..6u32 {
        let i = face * 4;
        data.indices
            .extend_from_slice(&[i, i + 1, i + 2, i + 2, i + 3, i]);
    }

    data
}

/// Generate a UV sphere with specified resolution
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
///
/// Returns a sphere of radius 1.0 centered at the origin.
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 (top) to PI (bottom)
        let (sin_theta, cos_theta) = theta.sin_cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let x = sin_theta * cos_phi;
            let y = cos_theta;
            let z = sin_theta * sin_phi;

            data.vertices.push([x, y, z]);
            data.normals.push([x, y, z]); // Normal is same as position for unit sphere
            data.tex_coords
                .push([long as f32 / long_segs as f32, 1.0 - lat as f32 / lat_segs as f32]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.extend_from_slice(&[first, first + 1, second]);
            data.indices
                .extend_from_slice(&[second, first + 1, second + 1]);
        }
    }

    data
}

/// Generate a plane in the XZ plane facing up
///
/// # Arguments
/// * `width` - Width of the plane (X direction)
/// * `depth` - Depth of the plane (Z direction)
/// * `width_segments` - Number of subdivisions along width
/// * `depth_segments` - Number of subdivisions along depth
///
/// Returns a plane centered at the origin with normal pointing up (positive Y).
pub fn generate_plane(width: f32, depth: f32, width_segments: u32, depth_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let d_segs = depth_segments.max(1);

    for z in 0..=d_segs {
        let v = z as f32 / d_segs as f32;
        let pos_z = (v - 0.5) * depth;

        for x in 0..=w_segs {
            let u = x as f32 / w_segs as f32;
            let pos_x = (u - 0.5) * width;

            data.vertices.push([pos_x, 0.0, pos_z]);
            data.normals.push([0.0, 1.0, 0.0]);
            data.tex_coords.push([u, 1.0 - v]);
        }
    }

    // Counter-clockwise winding when viewed from above
    for z in 0..d_segs {
        for x in 0..w_segs {
            let i = z * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;

            data.indices.extend_from_slice(&[i, next_row, i + 1]);
            data.indices
                .extend_from_slice(&[next_row, next_row + 1, i + 1]);
        }
    }

    data
}

/// Generate a frustum standing on the XZ plane
///
/// The bottom ring has `bottom_radius` at y = 0 and the top ring has
/// `top_radius` at y = 1. A top radius of zero produces a cone. Caps are
/// added for every ring with a non-zero radius.
pub fn generate_frustum(bottom_radius: f32, top_radius: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let slope = bottom_radius - top_radius;

    // Side vertices, one (bottom, top) pair per ring step
    for i in 0..=segs {
        let u = i as f32 / segs as f32;
        let (sin_a, cos_a) = (u * 2.0 * PI).sin_cos();
        let normal = Vector3::new(cos_a, slope, sin_a).normalize();

        data.vertices
            .push([bottom_radius * cos_a, 0.0, bottom_radius * sin_a]);
        data.normals.push(normal.into());
        data.tex_coords.push([u, 0.0]);

        data.vertices.push([top_radius * cos_a, 1.0, top_radius * sin_a]);
        data.normals.push(normal.into());
        data.tex_coords.push([u, 1.0]);
    }

    for i in 0..segs {
        let bottom_current = i * 2;
        let top_current = bottom_current + 1;
        let bottom_next = bottom_current + 2;
        let top_next = bottom_next + 1;

        data.indices
            .extend_from_slice(&[bottom_current, top_current, bottom_next]);
        if top_radius > 0.0 {
            data.indices
                .extend_from_slice(&[top_current, top_next, bottom_next]);
        }
    }

    if bottom_radius > 0.0 {
        push_cap(&mut data, bottom_radius, 0.0, -1.0, segs);
    }
    if top_radius > 0.0 {
        push_cap(&mut data, top_radius, 1.0, 1.0, segs);
    }

    data
}

/// Appends a disc cap at height `y` facing `facing` (+1 up, -1 down).
fn push_cap(data: &mut GeometryData, radius: f32, y: f32, facing: f32, segs: u32) {
    let normal = [0.0, facing, 0.0];
    let center = data.vertices.len() as u32;
    data.vertices.push([0.0, y, 0.0]);
    data.normals.push(normal);
    data.tex_coords.push([0.5, 0.5]);

    for i in 0..=segs {
        let (sin_a, cos_a) = (i as f32 * 2.0 * PI / segs as f32).sin_cos();
        data.vertices.push([radius * cos_a, y, radius * sin_a]);
        data.normals.push(normal);
        data.tex_coords
            .push([0.5 + 0.5 * cos_a, 0.5 + 0.5 * sin_a]);
    }

    for i in 0..segs {
        let current = center + 1 + i;
        let next = current + 1;
        if facing < 0.0 {
            data.indices.extend_from_slice(&[center, current, next]);
        } else {
            data.indices.extend_from_slice(&[center, next, current]);
        }
    }
}

/// Generate a capped cylinder of radius 1 from y = 0 to y = 1
pub fn generate_cylinder(segments: u32) -> GeometryData {
    generate_frustum(1.0, 1.0, segments)
}

/// Generate a cylinder narrowing from radius 1 at the base to 0.5 at the top
pub fn generate_tapered_cylinder(segments: u32) -> GeometryData {
    generate_frustum(1.0, 0.5, segments)
}

/// Generate a cone with a base of radius 1 at y = 0 and its apex at y = 1
pub fn generate_cone(segments: u32) -> GeometryData {
    generate_frustum(1.0, 0.0, segments)
}

/// Generate a torus lying in the XY plane around the Z axis
///
/// # Arguments
/// * `main_radius` - Distance from the center to the middle of the tube
/// * `tube_radius` - Radius of the tube
/// * `main_segments` - Steps around the ring
/// * `tube_segments` - Steps around the tube
pub fn generate_torus(
    main_radius: f32,
    tube_radius: f32,
    main_segments: u32,
    tube_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let main_segs = main_segments.max(3);
    let tube_segs = tube_segments.max(3);

    for i in 0..=main_segs {
        let u = i as f32 / main_segs as f32;
        let (sin_phi, cos_phi) = (u * 2.0 * PI).sin_cos();

        for j in 0..=tube_segs {
            let v = j as f32 / tube_segs as f32;
            let (sin_theta, cos_theta) = (v * 2.0 * PI).sin_cos();

            let normal = [cos_theta * cos_phi, cos_theta * sin_phi, sin_theta];
            data.vertices.push([
                main_radius * cos_phi + tube_radius * normal[0],
                main_radius * sin_phi + tube_radius * normal[1],
                tube_radius * normal[2],
            ]);
            data.normals.push(normal);
            data.tex_coords.push([u, v]);
        }
    }

    let stride = tube_segs + 1;
    for i in 0..main_segs {
        for j in 0..tube_segs {
            let a = i * stride + j;
            let b = a + stride;

            data.indices.extend_from_slice(&[a, b, a + 1]);
            data.indices.extend_from_slice(&[b, b + 1, a + 1]);
        }
    }

    data
}

/// Generate a three-sided pyramid with its base at y = -0.5 and apex at y = 0.5
pub fn generate_pyramid3() -> GeometryData {
    let mut data = GeometryData::new();

    let front_left = [-0.5, -0.5, 0.5];
    let front_right = [0.5, -0.5, 0.5];
    let back = [0.0, -0.5, -0.5];
    let apex = [0.0, 0.5, 0.0];
    let side_uvs = [[0.0, 0.0], [1.0, 0.0], [0.5, 1.0]];

    push_flat_triangle(&mut data, [front_left, front_right, apex], side_uvs);
    push_flat_triangle(&mut data, [front_right, back, apex], side_uvs);
    push_flat_triangle(&mut data, [back, front_left, apex], side_uvs);
    push_flat_triangle(
        &mut data,
        [front_left, back, front_right],
        [[0.0, 1.0], [0.5, 0.0], [1.0, 1.0]],
    );

    data
}

/// Generate a triangular prism
///
/// The triangular cross-section lies in the XY plane (base edge at y = -0.5,
/// ridge at y = 0.5) and is extruded from z = -0.5 to z = 0.5.
pub fn generate_prism() -> GeometryData {
    let mut data = GeometryData::new();

    let tri = [[-0.5, -0.5], [0.5, -0.5], [0.0, 0.5]];
    let front = tri.map(|[x, y]| [x, y, 0.5]);
    let back = tri.map(|[x, y]| [x, y, -0.5]);
    let cap_uvs = [[0.0, 0.0], [1.0, 0.0], [0.5, 1.0]];

    push_flat_triangle(&mut data, [front[0], front[1], front[2]], cap_uvs);
    push_flat_triangle(&mut data, [back[0], back[2], back[1]], [cap_uvs[1], cap_uvs[2], cap_uvs[0]]);

    // Rectangular sides, one per triangle edge
    for (a, b) in [(0, 1), (1, 2), (2, 0)] {
        push_flat_quad(&mut data, [back[a], back[b], front[b], front[a]]);
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every non-degenerate triangle must face the way its vertex normals point.
    fn assert_outward_winding(data: &GeometryData) {
        for tri in data.indices.chunks(3) {
            let p: Vec<Vector3<f32>> = tri.iter().map(|&i| data.vertices[i as usize].into()).collect();
            let face = (p[1] - p[0]).cross(p[2] - p[0]);
            if face.magnitude() < 1e-6 {
                continue;
            }
            let avg: Vector3<f32> = tri
                .iter()
                .map(|&i| Vector3::from(data.normals[i as usize]))
                .fold(Vector3::new(0.0, 0.0, 0.0), |acc, n| acc + n);
            assert!(
                face.dot(avg) > 0.0,
                "triangle {:?} winds against its normals",
                tri
            );
        }
    }

    fn assert_consistent(data: &GeometryData) {
        assert!(!data.indices.is_empty());
        assert_eq!(data.indices.len() % 3, 0);
        assert_eq!(data.vertices.len(), data.normals.len());
        assert_eq!(data.vertices.len(), data.tex_coords.len());
        assert!(data.indices.iter().all(|&i| (i as usize) < data.vertices.len()));
    }

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube();
        assert_eq!(cube.vertices.len(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.triangle_count(), 12);
        assert_outward_winding(&cube);
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(8, 6);
        assert_consistent(&sphere);
        assert_eq!(sphere.vertex_count(), 9 * 7);
        assert_outward_winding(&sphere);
        for v in &sphere.vertices {
            let r = Vector3::from(*v).magnitude();
            assert!((r - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertices.len(), 9); // 3x3 grid
        assert_eq!(plane.indices.len(), 24); // 4 quads * 2 triangles * 3 indices
        assert!(plane.vertices.iter().all(|v| v[1] == 0.0));
        assert_outward_winding(&plane);
    }

    #[test]
    fn test_cylinder_spans_unit_height() {
        let cylinder = generate_cylinder(16);
        assert_consistent(&cylinder);
        assert_outward_winding(&cylinder);

        let min_y = cylinder.vertices.iter().map(|v| v[1]).fold(f32::MAX, f32::min);
        let max_y = cylinder.vertices.iter().map(|v| v[1]).fold(f32::MIN, f32::max);
        assert_eq!((min_y, max_y), (0.0, 1.0));
    }

    #[test]
    fn test_tapered_cylinder_top_is_half_radius() {
        let tapered = generate_tapered_cylinder(12);
        assert_consistent(&tapered);
        assert_outward_winding(&tapered);

        for v in tapered.vertices.iter().filter(|v| v[1] == 1.0) {
            let r = (v[0] * v[0] + v[2] * v[2]).sqrt();
            assert!(r < 0.5 + 1e-5);
        }
    }

    #[test]
    fn test_cone_has_no_top_cap() {
        let cone = generate_cone(10);
        assert_consistent(&cone);
        assert_outward_winding(&cone);
        assert!(cone.normals.iter().all(|n| *n != [0.0, 1.0, 0.0]));
    }

    #[test]
    fn test_torus_generation() {
        let torus = generate_torus(1.0, 0.2, 24, 8);
        assert_consistent(&torus);
        assert_eq!(torus.triangle_count(), 24 * 8 * 2);
        assert_outward_winding(&torus);
        assert!(torus.vertices.iter().all(|v| v[2].abs() <= 0.2 + 1e-5));
    }

    #[test]
    fn test_pyramid_and_prism_generation() {
        let pyramid = generate_pyramid3();
        assert_eq!(pyramid.triangle_count(), 4);
        assert_outward_winding(&pyramid);

        let prism = generate_prism();
        assert_eq!(prism.triangle_count(), 8);
        assert_outward_winding(&prism);
    }
}
