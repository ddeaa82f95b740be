//! # Procedural Geometry Generation
//!
//! Every object in the scene is built from a small set of procedurally
//! generated primitives; no model files are loaded.
//!
//! ## Supported Primitives
//!
//! - **Plane**: 2x2 quad in the XZ plane
//! - **Box**: Unit cube centered at the origin
//! - **Cylinder / Tapered Cylinder / Cone**: Frustums standing on y = 0
//! - **Sphere**: UV sphere of radius 1
//! - **Torus**: Ring in the XY plane
//! - **Pyramid3 / Prism**: Flat-shaded triangular solids
//!
//! ## Usage
//!
//! ```rust
//! use still_life::gfx::geometry::{generate_cube, generate_sphere, ShapeKind};
//!
//! let cube_data = generate_cube();
//! let sphere_data = generate_sphere(32, 16);
//! let torus_data = ShapeKind::Torus.generate();
//! ```

pub mod primitives;
pub mod shapes;

pub use primitives::*;
pub use shapes::{ShapeKind, ShapeMeshes};

use crate::gfx::scene::vertex::Vertex3D;

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves positions, normals and texture coordinates into vertices
    /// the render pipeline consumes.
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                tex_coords: self.tex_coords.get(i).copied().unwrap_or([0.0, 0.0]),
            })
            .collect()
    }
}
