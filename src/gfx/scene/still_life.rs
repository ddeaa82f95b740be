//! The still-life composition
//!
//! Table, wine bottle, pear, cheese wedge and wine glass, described as data:
//! the textures they sample, the materials they reflect light with, the
//! lights above them and the ordered list of primitives they are built from.

use crate::gfx::geometry::ShapeKind;
use crate::gfx::resources::{LightSource, ObjectMaterial};

/// Image files loaded by the scene, with the tag each is registered under.
pub const SCENE_TEXTURES: [(&str, &str); 5] = [
    ("black_back.jpg", "glass"),
    ("Gold_Metal.jpg", "top"),
    ("Wood_Table.jpg", "table"),
    ("swiss_cheese.jpg", "cheese"),
    ("pear.jpg", "pear"),
];

/// One primitive placed in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    pub name: &'static str,
    pub shape: ShapeKind,
    pub scale: [f32; 3],
    /// Rotation about X, Y and Z in degrees.
    pub rotation: [f32; 3],
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub texture: Option<&'static str>,
    pub material: &'static str,
}

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

#[allow(clippy::too_many_arguments)]
const fn object(
    name: &'static str,
    shape: ShapeKind,
    scale: [f32; 3],
    rotation: [f32; 3],
    position: [f32; 3],
    color: [f32; 4],
    texture: Option<&'static str>,
    material: &'static str,
) -> SceneObject {
    SceneObject {
        name,
        shape,
        scale,
        rotation,
        position,
        color,
        texture,
        material,
    }
}

/// Draw order of the composition. Translucent glass comes last.
#[rustfmt::skip]
pub const STILL_LIFE: [SceneObject; 14] = [
    object("table", ShapeKind::Plane,
        [45.0, 5.0, 20.0], [0.0, 0.0, 0.0], [0.0, -15.0, 0.0],
        WHITE, Some("table"), "wood"),

    // Wine bottle
    object("bottle body", ShapeKind::Cylinder,
        [2.5, 12.25, 2.0], [-10.0, 0.0, 0.0], [0.0, -8.0, 0.0],
        WHITE, Some("glass"), "glass"),
    object("bottle shoulder", ShapeKind::Sphere,
        [2.1, 1.5, 0.0], [0.0, 0.0, 0.0], [0.0, 4.5, 0.0],
        RED, Some("glass"), "glass"),
    object("neck base", ShapeKind::TaperedCylinder,
        [1.25, 3.25, 0.0], [0.0, 0.0, 0.0], [0.0, 4.8, 0.0],
        RED, Some("glass"), "glass"),
    object("neck", ShapeKind::Cylinder,
        [0.67, 2.5, 0.0], [-10.0, 0.0, 0.0], [0.0, 8.0, 0.0],
        [2.0, 2.0, 0.0, 2.0], Some("top"), "glass"),
    object("ridge", ShapeKind::Cylinder,
        [0.75, 0.6, 0.0], [0.0, 0.0, 0.0], [0.0, 9.0, 0.0],
        [2.0, 1.0, 1.0, 2.0], Some("top"), "gold"),
    object("mouth piece", ShapeKind::Cylinder,
        [0.74, 0.75, 0.0], [90.0, 0.0, 0.0], [0.0, 9.93, 0.0],
        RED, Some("top"), "glass"),

    // Pear
    object("pear base", ShapeKind::Sphere,
        [1.75, 2.0, 2.0], [0.0, 0.0, 0.0], [-3.5, -4.2, 2.5],
        GREEN, Some("pear"), "plastic"),
    object("pear middle", ShapeKind::TaperedCylinder,
        [1.72, 4.0, 2.0], [0.0, 0.0, -30.0], [-3.6, -4.2, 2.5],
        GREEN, Some("pear"), "plastic"),
    object("pear stem", ShapeKind::Cylinder,
        [-0.1, 1.75, 0.0], [0.0, 1.0, -30.0], [-1.75, -1.0, 2.0],
        [0.36, 0.25, 0.2, 1.0], None, "wood"),

    object("cheese wedge", ShapeKind::Prism,
        [4.5, 3.75, 3.0], [45.0, 15.0, -75.0], [4.6, -5.75, 0.9],
        YELLOW, Some("cheese"), "plastic"),

    // Wine glass
    object("glass base", ShapeKind::Sphere,
        [0.25, 2.65, 1.0], [65.0, 60.0, 0.0], [3.0, -7.75, 3.0],
        [0.8, 0.8, 0.9, 0.5], None, "glass"),
    object("glass stem", ShapeKind::TaperedCylinder,
        [-0.3, 6.45, 0.0], [0.0, 0.0, 3.5], [3.3, -8.0, 3.0],
        [0.8, 0.8, 0.9, 0.5], None, "glass"),
    object("glass bowl", ShapeKind::Torus,
        [1.95, 1.75, 8.6], [90.0, 0.0, 0.0], [2.75, 0.75, 3.0],
        [0.8, 0.8, 0.9, 0.25], None, "glass"),
];

/// Materials referenced by [`STILL_LIFE`].
pub fn still_life_materials() -> Vec<ObjectMaterial> {
    vec![
        ObjectMaterial::new("wood")
            .with_ambient([0.2, 0.2, 0.1], 0.4)
            .with_diffuse([0.3, 0.3, 0.2])
            .with_specular([0.6, 0.5, 0.4], 22.0),
        ObjectMaterial::new("glass")
            .with_ambient([0.4, 0.3, 0.1], 0.2)
            .with_diffuse([0.3, 0.2, 0.1])
            .with_specular([0.1, 0.1, 0.1], 0.3),
        ObjectMaterial::new("plastic")
            .with_ambient([0.4, 0.4, 0.4], 0.3)
            .with_diffuse([0.3, 0.3, 0.3])
            .with_specular([0.6, 0.6, 0.6], 85.0),
        ObjectMaterial::new("gold")
            .with_ambient([0.3, 0.25, 0.1], 0.3)
            .with_diffuse([0.75, 0.6, 0.2])
            .with_specular([0.8, 0.7, 0.4], 51.0),
    ]
}

/// Three co-located lights that layer a bright key over softer fills.
pub fn still_life_lights() -> [LightSource; 3] {
    let light = |ambient: f32, specular_intensity: f32| {
        LightSource::at([3.0, 14.0, 0.0])
            .with_colors([ambient; 3], [0.8; 3], [0.5; 3])
            .with_focus(32.0, specular_intensity)
    };
    [light(0.3, 1.0), light(0.03, 1.1), light(0.03, 1.6)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_reference_resolves() {
        let materials = still_life_materials();
        for object in STILL_LIFE.iter() {
            assert!(
                materials.iter().any(|m| m.tag == object.material),
                "{} uses undefined material {}",
                object.name,
                object.material
            );
            if let Some(texture) = object.texture {
                assert!(
                    SCENE_TEXTURES.iter().any(|(_, tag)| *tag == texture),
                    "{} uses unknown texture {}",
                    object.name,
                    texture
                );
            }
        }
    }

    #[test]
    fn test_translucent_objects_draw_last() {
        let first_translucent = STILL_LIFE
            .iter()
            .position(|o| o.color[3] < 1.0)
            .unwrap();
        assert!(STILL_LIFE[first_translucent..].iter().all(|o| o.color[3] < 1.0));
    }

    #[test]
    fn test_lights_share_position() {
        let lights = still_life_lights();
        assert!(lights.iter().all(|l| l.position == [3.0, 14.0, 0.0]));
        assert_eq!(lights[0].ambient_color, [0.3; 3]);
        assert_eq!(lights[2].specular_intensity, 1.6);
    }
}
