//! Point light configuration
//!
//! The shader supports a fixed number of light sources; each is described by
//! a [`LightSource`] and uploaded into its slot of the global uniforms.

/// Maximum number of light sources the shader evaluates.
pub const MAX_LIGHTS: usize = 4;

/// A point light with Phong color terms.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightSource {
    pub position: [f32; 3],
    pub ambient_color: [f32; 3],
    pub diffuse_color: [f32; 3],
    pub specular_color: [f32; 3],
    /// Sharpness of the highlight; 32 leaves the material's shininess unchanged.
    pub focal_strength: f32,
    pub specular_intensity: f32,
}

impl Default for LightSource {
    fn default() -> Self {
        Self {
            position: [5.0, 10.0, 5.0],
            ambient_color: [0.1, 0.1, 0.1],
            diffuse_color: [1.0, 1.0, 1.0],
            specular_color: [1.0, 1.0, 1.0],
            focal_strength: 32.0,
            specular_intensity: 1.0,
        }
    }
}

impl LightSource {
    pub fn at(position: [f32; 3]) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_colors(mut self, ambient: [f32; 3], diffuse: [f32; 3], specular: [f32; 3]) -> Self {
        self.ambient_color = ambient;
        self.diffuse_color = diffuse;
        self.specular_color = specular;
        self
    }

    pub fn with_focus(mut self, focal_strength: f32, specular_intensity: f32) -> Self {
        self.focal_strength = focal_strength;
        self.specular_intensity = specular_intensity;
        self
    }
}
