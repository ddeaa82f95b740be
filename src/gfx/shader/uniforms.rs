//! GPU uniform layouts
//!
//! These structs MUST match the uniform structs in `phong.wgsl` exactly,
//! including the explicit padding fields.

use crate::gfx::resources::{LightSource, ObjectMaterial, MAX_LIGHTS};

const IDENTITY: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// One light slot of [`GlobalUniform`].
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    pub focal_strength: f32,
    pub ambient_color: [f32; 3],
    pub specular_intensity: f32,
    pub diffuse_color: [f32; 3],
    _padding0: f32,
    pub specular_color: [f32; 3],
    _padding1: f32,
}
// Total: 4 * 16 = 64 bytes

impl From<&LightSource> for LightUniform {
    fn from(light: &LightSource) -> Self {
        Self {
            position: light.position,
            focal_strength: light.focal_strength,
            ambient_color: light.ambient_color,
            specular_intensity: light.specular_intensity,
            diffuse_color: light.diffuse_color,
            _padding0: 0.0,
            specular_color: light.specular_color,
            _padding1: 0.0,
        }
    }
}

/// Per-frame data shared by every draw (bind group 0).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub view_position: [f32; 3],
    /// Number of populated entries in `lights`.
    pub light_count: u32,
    pub use_lighting: u32,
    _padding: [u32; 3],
    pub lights: [LightUniform; MAX_LIGHTS],
}
// Total: 64 + 64 + 16 + 16 + 4 * 64 = 416 bytes

impl Default for GlobalUniform {
    fn default() -> Self {
        Self {
            view: IDENTITY,
            projection: IDENTITY,
            view_position: [0.0; 3],
            light_count: 0,
            use_lighting: 0,
            _padding: [0; 3],
            lights: [LightUniform::default(); MAX_LIGHTS],
        }
    }
}

/// Per-draw object state (bind group 1).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of `model`, applied to normals.
    pub normal_matrix: [[f32; 4]; 4],
    pub object_color: [f32; 4],
    pub uv_scale: [f32; 2],
    pub use_texture: u32,
    pub has_material: u32,
    pub diffuse_color: [f32; 3],
    pub shininess: f32,
    pub specular_color: [f32; 3],
    pub ambient_strength: f32,
    pub ambient_color: [f32; 3],
    _padding: f32,
}
// Total: 64 + 64 + 16 + 16 + 3 * 16 = 208 bytes

impl Default for ObjectUniform {
    fn default() -> Self {
        Self {
            model: IDENTITY,
            normal_matrix: IDENTITY,
            object_color: [1.0, 1.0, 1.0, 1.0],
            uv_scale: [1.0, 1.0],
            use_texture: 0,
            has_material: 0,
            diffuse_color: [0.0; 3],
            shininess: 0.0,
            specular_color: [0.0; 3],
            ambient_strength: 0.0,
            ambient_color: [0.0; 3],
            _padding: 0.0,
        }
    }
}

impl ObjectUniform {
    pub fn apply_material(&mut self, material: &ObjectMaterial) {
        self.has_material = 1;
        self.diffuse_color = material.diffuse_color;
        self.shininess = material.shininess;
        self.specular_color = material.specular_color;
        self.ambient_strength = material.ambient_strength;
        self.ambient_color = material.ambient_color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};

    #[test]
    fn test_light_layout() {
        assert_eq!(size_of::<LightUniform>(), 64);
        assert_eq!(offset_of!(LightUniform, ambient_color), 16);
        assert_eq!(offset_of!(LightUniform, diffuse_color), 32);
        assert_eq!(offset_of!(LightUniform, specular_color), 48);
    }

    #[test]
    fn test_global_layout() {
        assert_eq!(size_of::<GlobalUniform>(), 416);
        assert_eq!(offset_of!(GlobalUniform, view_position), 128);
        assert_eq!(offset_of!(GlobalUniform, light_count), 140);
        assert_eq!(offset_of!(GlobalUniform, use_lighting), 144);
        assert_eq!(offset_of!(GlobalUniform, lights), 160);
    }

    #[test]
    fn test_object_layout() {
        assert_eq!(size_of::<ObjectUniform>(), 208);
        assert_eq!(offset_of!(ObjectUniform, normal_matrix), 64);
        assert_eq!(offset_of!(ObjectUniform, object_color), 128);
        assert_eq!(offset_of!(ObjectUniform, uv_scale), 144);
        assert_eq!(offset_of!(ObjectUniform, use_texture), 152);
        assert_eq!(offset_of!(ObjectUniform, diffuse_color), 160);
        assert_eq!(offset_of!(ObjectUniform, specular_color), 176);
        assert_eq!(offset_of!(ObjectUniform, ambient_color), 192);
    }

    #[test]
    fn test_material_is_copied_into_object() {
        let material = ObjectMaterial::new("wood")
            .with_ambient([0.2, 0.2, 0.1], 0.4)
            .with_diffuse([0.3, 0.3, 0.2])
            .with_specular([0.6, 0.5, 0.4], 22.0);
        let mut object = ObjectUniform::default();
        object.apply_material(&material);

        assert_eq!(object.has_material, 1);
        assert_eq!(object.shininess, 22.0);
        assert_eq!(object.ambient_strength, 0.4);
        assert_eq!(object.diffuse_color, [0.3, 0.3, 0.2]);
    }
}
