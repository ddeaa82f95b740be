//! CPU-side shader program state
//!
//! [`ShaderManager`] holds the uniform values a frame is drawn with and
//! records a [`DrawCall`] each time a mesh is drawn. Uniform values persist
//! until overwritten, across draws and across frames. The renderer uploads
//! the recorded frame in one go.

pub mod uniforms;

pub use uniforms::{GlobalUniform, LightUniform, ObjectUniform};

use cgmath::{Matrix, Matrix4, SquareMatrix, Vector3};

use crate::gfx::geometry::ShapeKind;
use crate::gfx::resources::{LightSource, ObjectMaterial, MAX_LIGHTS};

/// Snapshot of the object state at the time a shape was drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub shape: ShapeKind,
    pub object: ObjectUniform,
    /// Texture slot sampled when `object.use_texture` is set.
    pub texture_slot: Option<usize>,
}

#[derive(Debug, Default)]
pub struct ShaderManager {
    globals: GlobalUniform,
    object: ObjectUniform,
    texture_slot: Option<usize>,
    draw_calls: Vec<DrawCall>,
}

impl ShaderManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the recorded draws; uniform values are kept.
    pub fn begin_frame(&mut self) {
        self.draw_calls.clear();
    }

    pub fn set_view(&mut self, view: Matrix4<f32>) {
        self.globals.view = view.into();
    }

    pub fn set_projection(&mut self, projection: Matrix4<f32>) {
        self.globals.projection = projection.into();
    }

    pub fn set_view_position(&mut self, position: Vector3<f32>) {
        self.globals.view_position = position.into();
    }

    pub fn set_lighting_enabled(&mut self, enabled: bool) {
        self.globals.use_lighting = enabled as u32;
    }

    /// Writes `light` into slot `index`. Returns false for slots past
    /// [`MAX_LIGHTS`].
    pub fn set_light(&mut self, index: usize, light: &LightSource) -> bool {
        let Some(slot) = self.globals.lights.get_mut(index) else {
            log::warn!("light index {} exceeds the {} supported lights", index, MAX_LIGHTS);
            return false;
        };
        *slot = LightUniform::from(light);
        self.globals.light_count = self.globals.light_count.max(index as u32 + 1);
        true
    }

    /// Sets the model matrix and derives the normal matrix from it.
    ///
    /// A singular model (an object scaled to zero along an axis) keeps the
    /// model matrix for normals.
    pub fn set_model(&mut self, model: Matrix4<f32>) {
        let normal_matrix = model
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or(model);
        self.object.model = model.into();
        self.object.normal_matrix = normal_matrix.into();
    }

    pub fn set_object_color(&mut self, color: [f32; 4]) {
        self.object.object_color = color;
    }

    /// Samples from `slot` when `Some`, otherwise uses the object colour.
    pub fn set_texture(&mut self, slot: Option<usize>) {
        self.texture_slot = slot;
        self.object.use_texture = slot.is_some() as u32;
    }

    pub fn set_uv_scale(&mut self, u: f32, v: f32) {
        self.object.uv_scale = [u, v];
    }

    pub fn set_material(&mut self, material: &ObjectMaterial) {
        self.object.apply_material(material);
    }

    /// Records a draw of `shape` with the current object state.
    pub fn draw(&mut self, shape: ShapeKind) {
        self.draw_calls.push(DrawCall {
            shape,
            object: self.object,
            texture_slot: self.texture_slot,
        });
    }

    pub fn globals(&self) -> &GlobalUniform {
        &self.globals
    }

    pub fn object(&self) -> &ObjectUniform {
        &self.object
    }

    pub fn texture_slot(&self) -> Option<usize> {
        self.texture_slot
    }

    pub fn draw_calls(&self) -> &[DrawCall] {
        &self.draw_calls
    }
}
