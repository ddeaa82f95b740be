use std::path::Path;

use cgmath::{Deg, Matrix4, Vector3};

use super::still_life::{still_life_lights, still_life_materials, SCENE_TEXTURES, STILL_LIFE};
use crate::gfx::geometry::{ShapeKind, ShapeMeshes};
use crate::gfx::resources::{
    LightSource, LoadedImage, MaterialLibrary, ObjectMaterial, TextureError, TextureRegistry,
    MAX_TEXTURE_SLOTS,
};
use crate::gfx::shader::ShaderManager;

/// Builds `T * Rz * Ry * Rx * S`.
pub fn model_matrix(
    scale: Vector3<f32>,
    rotation_degrees: [f32; 3],
    position: Vector3<f32>,
) -> Matrix4<f32> {
    let [x, y, z] = rotation_degrees;
    Matrix4::from_translation(position)
        * Matrix4::from_angle_z(Deg(z))
        * Matrix4::from_angle_y(Deg(y))
        * Matrix4::from_angle_x(Deg(x))
        * Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z)
}

/// Owns everything the scene is drawn with and replays the composition
/// into a [`ShaderManager`] each frame.
#[derive(Debug, Default)]
pub struct SceneManager {
    textures: TextureRegistry<LoadedImage>,
    materials: MaterialLibrary,
    lights: Vec<LightSource>,
    meshes: ShapeMeshes,
}

impl SceneManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads an image file and registers it under `tag` in the next free slot.
    pub fn create_texture(&mut self, path: &Path, tag: &str) -> Result<usize, TextureError> {
        // Checked again by the registry; here it skips decoding.
        if self.textures.find_slot(tag).is_some() {
            return Err(TextureError::DuplicateTag {
                tag: tag.to_string(),
            });
        }
        if self.textures.len() >= MAX_TEXTURE_SLOTS {
            return Err(TextureError::SlotsExhausted {
                tag: tag.to_string(),
            });
        }
        let image = LoadedImage::from_path(path)?;
        self.add_texture(tag, image)
    }

    /// Registers an already decoded image under `tag`.
    pub fn add_texture(&mut self, tag: &str, image: LoadedImage) -> Result<usize, TextureError> {
        let slot = self.textures.register(tag, image)?;
        log::debug!("Texture '{}' bound to slot {}", tag, slot);
        Ok(slot)
    }

    /// The texture registered under `tag`.
    pub fn find_texture_id(&self, tag: &str) -> Option<&LoadedImage> {
        self.textures.find(tag)
    }

    /// Slot index of the texture registered under `tag`.
    pub fn find_texture_slot(&self, tag: &str) -> Option<usize> {
        self.textures.find_slot(tag)
    }

    pub fn find_material(&self, tag: &str) -> Option<&ObjectMaterial> {
        self.materials.find(tag)
    }

    pub fn set_transformations(
        &self,
        shader: &mut ShaderManager,
        scale: Vector3<f32>,
        x_rotation_degrees: f32,
        y_rotation_degrees: f32,
        z_rotation_degrees: f32,
        position: Vector3<f32>,
    ) {
        shader.set_model(model_matrix(
            scale,
            [x_rotation_degrees, y_rotation_degrees, z_rotation_degrees],
            position,
        ));
    }

    /// Sets a flat object colour and turns texturing off.
    pub fn set_shader_color(&self, shader: &mut ShaderManager, r: f32, g: f32, b: f32, a: f32) {
        shader.set_texture(None);
        shader.set_object_color([r, g, b, a]);
    }

    /// Turns texturing on with the texture registered under `tag`.
    pub fn set_shader_texture(&self, shader: &mut ShaderManager, tag: &str) {
        let slot = self.textures.find_slot(tag);
        if slot.is_none() {
            log::warn!("texture '{}' is not loaded; drawing untextured", tag);
        }
        shader.set_texture(slot);
    }

    pub fn set_texture_uv_scale(&self, shader: &mut ShaderManager, u: f32, v: f32) {
        shader.set_uv_scale(u, v);
    }

    /// Uploads the material registered under `tag`. An unknown tag keeps the
    /// previously uploaded material.
    pub fn set_shader_material(&self, shader: &mut ShaderManager, tag: &str) {
        if self.materials.is_empty() {
            return;
        }
        match self.materials.find(tag) {
            Some(material) => shader.set_material(material),
            None => log::warn!("material '{}' is not defined; keeping the previous one", tag),
        }
    }

    /// Loads every scene texture from `asset_dir`. A texture that fails to
    /// load is logged and skipped. Returns the number loaded.
    pub fn load_scene_textures(&mut self, asset_dir: &Path) -> usize {
        let mut loaded = 0;
        for (file, tag) in SCENE_TEXTURES {
            match self.create_texture(&asset_dir.join(file), tag) {
                Ok(_) => loaded += 1,
                Err(err) => log::error!("Skipping texture '{}': {}", tag, err),
            }
        }
        log::info!("Loaded {}/{} scene textures", loaded, SCENE_TEXTURES.len());
        loaded
    }

    pub fn define_object_materials(&mut self) {
        for material in still_life_materials() {
            self.materials.add_material(material);
        }
    }

    /// Uploads the scene lights and turns lighting on.
    pub fn setup_scene_lights(&mut self, shader: &mut ShaderManager) {
        self.lights = still_life_lights().to_vec();
        for (index, light) in self.lights.iter().enumerate() {
            shader.set_light(index, light);
        }
        shader.set_lighting_enabled(true);
    }

    /// Loads textures, materials, lights and the primitive meshes.
    pub fn prepare_scene(&mut self, shader: &mut ShaderManager, asset_dir: &Path) {
        self.load_scene_textures(asset_dir);
        self.define_object_materials();
        self.setup_scene_lights(shader);
        self.meshes.load_all();
    }

    /// Records the whole composition into `shader`, in draw order.
    pub fn render_scene(&self, shader: &mut ShaderManager) {
        for object in STILL_LIFE.iter() {
            let [rx, ry, rz] = object.rotation;
            self.set_transformations(
                shader,
                object.scale.into(),
                rx,
                ry,
                rz,
                object.position.into(),
            );

            let [r, g, b, a] = object.color;
            self.set_shader_color(shader, r, g, b, a);
            if let Some(texture) = object.texture {
                self.set_shader_texture(shader, texture);
            }
            self.set_shader_material(shader, object.material);

            self.meshes.draw(shader, object.shape);
        }
    }

    pub fn textures(&self) -> &TextureRegistry<LoadedImage> {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialLibrary {
        &self.materials
    }

    pub fn lights(&self) -> &[LightSource] {
        &self.lights
    }

    pub fn meshes(&self) -> &ShapeMeshes {
        &self.meshes
    }

    /// Loads a single primitive mesh outside of [`Self::prepare_scene`].
    pub fn load_mesh(&mut self, kind: ShapeKind) {
        self.meshes.load(kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use cgmath::{InnerSpace, Vector4};

    fn solid_image(label: &str) -> LoadedImage {
        let pixels = image::RgbImage::from_pixel(4, 4, image::Rgb([10, 20, 30]));
        LoadedImage::from_dynamic(Path::new(label), image::DynamicImage::ImageRgb8(pixels))
            .unwrap()
    }

    /// Writes a 2x2 image with a red top row and a blue bottom row.
    fn write_image(dir: &Path, file: &str) -> PathBuf {
        let pixels = image::RgbImage::from_fn(2, 2, |_, y| {
            if y == 0 {
                image::Rgb([255, 0, 0])
            } else {
                image::Rgb([0, 0, 255])
            }
        });
        let path = dir.join(file);
        pixels.save(&path).unwrap();
        path
    }

    fn prepared_scene(shader: &mut ShaderManager) -> SceneManager {
        let mut scene = SceneManager::new();
        for (file, tag) in SCENE_TEXTURES {
            scene.add_texture(tag, solid_image(file)).unwrap();
        }
        scene.define_object_materials();
        scene.setup_scene_lights(shader);
        ShapeKind::ALL.iter().for_each(|k| scene.load_mesh(*k));
        scene
    }

    #[test]
    fn test_model_matrix_order() {
        let m = model_matrix(
            Vector3::new(2.0, 1.0, 1.0),
            [0.0, 0.0, 90.0],
            Vector3::new(0.0, 0.0, 5.0),
        );
        // Scale x by 2, rotate +X onto +Y, then translate.
        let p = m * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!((p.truncate() - Vector3::new(0.0, 2.0, 5.0)).magnitude() < 1e-5);
    }

    #[test]
    fn test_rotation_applies_x_before_y() {
        let m = model_matrix(Vector3::new(1.0, 1.0, 1.0), [90.0, 90.0, 0.0], Vector3::new(0.0, 0.0, 0.0));
        // Rx takes +Y to +Z, Ry then takes +Z to +X.
        let p = m * Vector4::new(0.0, 1.0, 0.0, 1.0);
        assert!((p.truncate() - Vector3::new(1.0, 0.0, 0.0)).magnitude() < 1e-5);
    }

    #[test]
    fn test_color_disables_texture_and_texture_enables_it() {
        let mut shader = ShaderManager::new();
        let scene = prepared_scene(&mut shader);

        scene.set_shader_texture(&mut shader, "cheese");
        assert_eq!(shader.texture_slot(), Some(3));
        assert_eq!(shader.object().use_texture, 1);

        scene.set_shader_color(&mut shader, 0.1, 0.2, 0.3, 1.0);
        assert_eq!(shader.texture_slot(), None);
        assert_eq!(shader.object().object_color, [0.1, 0.2, 0.3, 1.0]);
    }

    #[test]
    fn test_unknown_texture_draws_untextured() {
        let mut shader = ShaderManager::new();
        let scene = prepared_scene(&mut shader);
        scene.set_shader_texture(&mut shader, "marble");
        assert_eq!(shader.object().use_texture, 0);
        assert_eq!(shader.texture_slot(), None);
    }

    #[test]
    fn test_unknown_material_keeps_previous() {
        let mut shader = ShaderManager::new();
        let scene = prepared_scene(&mut shader);

        scene.set_shader_material(&mut shader, "plastic");
        scene.set_shader_material(&mut shader, "");
        assert_eq!(shader.object().shininess, 85.0);
        assert_eq!(scene.find_material("gold").map(|m| m.shininess), Some(51.0));
    }

    #[test]
    fn test_texture_lookup() {
        let mut shader = ShaderManager::new();
        let mut scene = prepared_scene(&mut shader);

        assert_eq!(scene.find_texture_slot("glass"), Some(0));
        assert_eq!(scene.find_texture_slot("pear"), Some(4));
        assert!(scene.find_texture_id("table").is_some());
        assert!(scene.find_texture_id("gold").is_none());

        let err = scene.add_texture("pear", solid_image("again.png")).unwrap_err();
        assert!(matches!(err, TextureError::DuplicateTag { .. }));
    }

    #[test]
    fn test_create_texture_decodes_into_next_slot() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_image(dir.path(), "pear.png");
        let mut scene = SceneManager::new();
        scene.add_texture("glass", solid_image("glass.png")).unwrap();

        assert_eq!(scene.create_texture(&path, "pear").unwrap(), 1);
        assert_eq!(scene.find_texture_slot("pear"), Some(1));

        let image = scene.find_texture_id("pear").unwrap();
        assert_eq!(image.source_channels, 3);
        assert_eq!((image.width(), image.height()), (2, 2));
        // Rows are flipped so the red top row ends up last.
        assert_eq!(image.pixels.get_pixel(0, 1).0, [255, 0, 0, 255]);
        assert_eq!(image.pixels.get_pixel(1, 0).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_create_texture_checks_tag_and_capacity_before_reading() {
        let missing = Path::new("no/such/texture.png");
        let mut scene = SceneManager::new();
        scene.add_texture("pear", solid_image("pear.png")).unwrap();

        let err = scene.create_texture(missing, "cheese").unwrap_err();
        assert!(matches!(err, TextureError::Decode { .. }));

        let err = scene.create_texture(missing, "pear").unwrap_err();
        assert!(matches!(err, TextureError::DuplicateTag { .. }));

        for i in 1..MAX_TEXTURE_SLOTS {
            scene.add_texture(&format!("tex{}", i), solid_image("tex.png")).unwrap();
        }
        let err = scene.create_texture(missing, "one_too_many").unwrap_err();
        assert!(matches!(err, TextureError::SlotsExhausted { .. }));
        assert_eq!(scene.textures().len(), MAX_TEXTURE_SLOTS);
    }

    #[test]
    fn test_load_scene_textures_keeps_going_past_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "Wood_Table.jpg");
        write_image(dir.path(), "pear.jpg");

        let mut scene = SceneManager::new();
        assert_eq!(scene.load_scene_textures(dir.path()), 2);
        assert_eq!(scene.find_texture_slot("table"), Some(0));
        assert_eq!(scene.find_texture_slot("pear"), Some(1));
        assert_eq!(scene.find_texture_slot("glass"), None);
    }

    #[test]
    fn test_uv_scale_is_forwarded() {
        let mut shader = ShaderManager::new();
        let scene = SceneManager::new();
        scene.set_texture_uv_scale(&mut shader, 4.0, 2.0);
        assert_eq!(shader.object().uv_scale, [4.0, 2.0]);
    }

    #[test]
    fn test_missing_asset_dir_loads_nothing() {
        let mut scene = SceneManager::new();
        assert_eq!(scene.load_scene_textures(Path::new("no/such/dir")), 0);
        assert!(scene.textures().is_empty());
    }

    #[test]
    fn test_lights_are_uploaded() {
        let mut shader = ShaderManager::new();
        let scene = prepared_scene(&mut shader);
        assert_eq!(scene.lights().len(), 3);
        assert_eq!(shader.globals().light_count, 3);
        assert_eq!(shader.globals().use_lighting, 1);
    }

    #[test]
    fn test_render_scene_follows_script() {
        let mut shader = ShaderManager::new();
        let scene = prepared_scene(&mut shader);
        scene.render_scene(&mut shader);

        let calls = shader.draw_calls();
        assert_eq!(calls.len(), STILL_LIFE.len());
        for (call, object) in calls.iter().zip(STILL_LIFE.iter()) {
            assert_eq!(call.shape, object.shape, "{}", object.name);
            assert_eq!(call.object.object_color, object.color, "{}", object.name);
            assert_eq!(
                call.texture_slot,
                object.texture.and_then(|t| scene.find_texture_slot(t)),
                "{}",
                object.name
            );
        }

        // Table: wood, textured from slot 2.
        assert_eq!(calls[0].texture_slot, Some(2));
        assert_eq!(calls[0].object.shininess, 22.0);
        // Ridge: gold.
        assert_eq!(calls[5].object.shininess, 51.0);
        // Pear stem: flat colour.
        assert_eq!(calls[9].object.use_texture, 0);
    }

    #[test]
    fn test_render_without_meshes_records_nothing() {
        let mut shader = ShaderManager::new();
        let mut scene = SceneManager::new();
        scene.define_object_materials();
        scene.render_scene(&mut shader);
        assert!(shader.draw_calls().is_empty());
    }
}
