//! Primitive mesh set shared by every object in the scene

use std::collections::HashMap;

use super::{primitives, GeometryData};
use crate::gfx::shader::ShaderManager;

/// The primitive meshes objects are composed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    Plane,
    Box,
    Cylinder,
    TaperedCylinder,
    Cone,
    Sphere,
    Torus,
    Pyramid3,
    Prism,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 9] = [
        ShapeKind::Plane,
        ShapeKind::Box,
        ShapeKind::Cylinder,
        ShapeKind::TaperedCylinder,
        ShapeKind::Cone,
        ShapeKind::Sphere,
        ShapeKind::Torus,
        ShapeKind::Pyramid3,
        ShapeKind::Prism,
    ];

    /// Generates the mesh for this shape at the resolution the scene uses.
    pub fn generate(self) -> GeometryData {
        match self {
            ShapeKind::Plane => primitives::generate_plane(2.0, 2.0, 1, 1),
            ShapeKind::Box => primitives::generate_cube(),
            ShapeKind::Cylinder => primitives::generate_cylinder(36),
            ShapeKind::TaperedCylinder => primitives::generate_tapered_cylinder(36),
            ShapeKind::Cone => primitives::generate_cone(36),
            ShapeKind::Sphere => primitives::generate_sphere(36, 18),
            ShapeKind::Torus => primitives::generate_torus(1.0, 0.2, 48, 16),
            ShapeKind::Pyramid3 => primitives::generate_pyramid3(),
            ShapeKind::Prism => primitives::generate_prism(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Plane => "plane",
            ShapeKind::Box => "box",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::TaperedCylinder => "tapered cylinder",
            ShapeKind::Cone => "cone",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Torus => "torus",
            ShapeKind::Pyramid3 => "pyramid3",
            ShapeKind::Prism => "prism",
        }
    }
}

/// Loaded primitive meshes, one per kind however often it is drawn.
#[derive(Debug, Default)]
pub struct ShapeMeshes {
    meshes: HashMap<ShapeKind, GeometryData>,
}

impl ShapeMeshes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates the mesh for `kind`; loading twice keeps the first mesh.
    pub fn load(&mut self, kind: ShapeKind) {
        self.meshes.entry(kind).or_insert_with(|| kind.generate());
    }

    pub fn load_all(&mut self) {
        for kind in ShapeKind::ALL {
            self.load(kind);
        }
    }

    pub fn is_loaded(&self, kind: ShapeKind) -> bool {
        self.meshes.contains_key(&kind)
    }

    pub fn get(&self, kind: ShapeKind) -> Option<&GeometryData> {
        self.meshes.get(&kind)
    }

    /// Loaded meshes in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (ShapeKind, &GeometryData)> {
        ShapeKind::ALL
            .into_iter()
            .filter_map(|kind| self.meshes.get(&kind).map(|mesh| (kind, mesh)))
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Records a draw of `kind` with the shader's current object state.
    pub fn draw(&self, shader: &mut ShaderManager, kind: ShapeKind) {
        if !self.is_loaded(kind) {
            log::warn!("skipping draw of {}: mesh was never loaded", kind.name());
            return;
        }
        shader.draw(kind);
    }
}
