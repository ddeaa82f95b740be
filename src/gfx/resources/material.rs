//! Material definitions for Phong shading
//!
//! Materials are stored in definition order in a [`MaterialLibrary`] and
//! looked up by tag when an object is drawn.

/// Surface response to the scene lights.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMaterial {
    pub tag: String,
    pub ambient_color: [f32; 3],
    pub ambient_strength: f32,
    pub diffuse_color: [f32; 3],
    pub specular_color: [f32; 3],
    /// Phong exponent applied to the specular highlight.
    pub shininess: f32,
}

impl Default for ObjectMaterial {
    fn default() -> Self {
        Self {
            tag: "default".to_string(),
            ambient_color: [0.2, 0.2, 0.2],
            ambient_strength: 0.3,
            diffuse_color: [0.8, 0.8, 0.8],
            specular_color: [0.5, 0.5, 0.5],
            shininess: 32.0,
        }
    }
}

impl ObjectMaterial {
    /// Creates a material with the default response under the given tag.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    /// Builder pattern: Set ambient color and strength
    pub fn with_ambient(mut self, color: [f32; 3], strength: f32) -> Self {
        self.ambient_color = color;
        self.ambient_strength = strength.max(0.0);
        self
    }

    /// Builder pattern: Set diffuse color
    pub fn with_diffuse(mut self, color: [f32; 3]) -> Self {
        self.diffuse_color = color;
        self
    }

    /// Builder pattern: Set specular color and shininess
    pub fn with_specular(mut self, color: [f32; 3], shininess: f32) -> Self {
        self.specular_color = color;
        self.shininess = shininess.max(0.0);
        self
    }
}

/// Ordered collection of materials.
///
/// Lookups return the first material with a matching tag, so redefining a tag
/// does not shadow the earlier definition.
#[derive(Debug, Default)]
pub struct MaterialLibrary {
    materials: Vec<ObjectMaterial>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_material(&mut self, material: ObjectMaterial) {
        if self.find(&material.tag).is_some() {
            log::warn!(
                "material '{}' is already defined; lookups keep the first definition",
                material.tag
            );
        }
        self.materials.push(material);
    }

    /// Finds the material registered under `tag`.
    pub fn find(&self, tag: &str) -> Option<&ObjectMaterial> {
        self.materials.iter().find(|m| m.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Lists all material tags in definition order
    pub fn list_materials(&self) -> Vec<&str> {
        self.materials.iter().map(|m| m.tag.as_str()).collect()
    }

    pub fn clear(&mut self) {
        self.materials.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_returns_first_match() {
        let mut library = MaterialLibrary::new();
        library.add_material(ObjectMaterial::new("wood").with_specular([0.6, 0.5, 0.4], 22.0));
        library.add_material(ObjectMaterial::new("glass"));
        library.add_material(ObjectMaterial::new("wood").with_specular([1.0, 1.0, 1.0], 1.0));

        let wood = library.find("wood").unwrap();
        assert_eq!(wood.shininess, 22.0);
        assert_eq!(library.len(), 3);
        assert_eq!(library.list_materials(), vec!["wood", "glass", "wood"]);
    }

    #[test]
    fn test_missing_tag_and_empty_library() {
        let mut library = MaterialLibrary::new();
        assert!(library.is_empty());
        assert!(library.find("wood").is_none());

        library.add_material(ObjectMaterial::new("plastic"));
        assert!(library.find("").is_none());
        assert!(library.find("Plastic").is_none());

        library.clear();
        assert!(library.find("plastic").is_none());
    }

    #[test]
    fn test_builders_reject_negative_terms() {
        let m = ObjectMaterial::new("odd")
            .with_ambient([0.1, 0.1, 0.1], -1.0)
            .with_specular([0.0, 0.0, 0.0], -5.0);
        assert_eq!(m.ambient_strength, 0.0);
        assert_eq!(m.shininess, 0.0);
    }
}
