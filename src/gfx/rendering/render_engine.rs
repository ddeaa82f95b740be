//! WGPU-based renderer for the still-life scene
//!
//! Uploads the frame recorded by a [`ShaderManager`] and draws it in a single
//! pass: one global uniform buffer, one uniform buffer per draw and one
//! texture bind group per scene texture slot.

use std::collections::HashMap;
use std::sync::Arc;

use wgpu::util::DeviceExt;

use super::pipeline_manager::{PipelineConfig, PipelineManager};
use super::RenderError;
use crate::gfx::geometry::{GeometryData, ShapeKind, ShapeMeshes};
use crate::gfx::resources::{
    LoadedImage, TextureRegistry, TextureResource, MAX_TEXTURE_DIMENSION,
};
use crate::gfx::shader::{GlobalUniform, ObjectUniform, ShaderManager};
use crate::wgpu_utils::{
    binding_types, BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc,
    UniformBuffer,
};

const PHONG_PIPELINE: &str = "Phong";

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.2,
    b: 0.3,
    a: 1.0,
};

/// Vertex and index buffers of one primitive.
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn new(device: &wgpu::Device, kind: ShapeKind, geometry: &GeometryData) -> Self {
        let vertices = geometry.to_vertices();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", kind.name())),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", kind.name())),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: geometry.indices.len() as u32,
        }
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Uniform buffer and bind group for one draw of the frame.
struct ObjectSlot {
    ubo: UniformBuffer<ObjectUniform>,
    bind_group: wgpu::BindGroup,
}

/// A sampled texture with its bind group.
struct TextureBinding {
    _resource: TextureResource,
    bind_group: wgpu::BindGroup,
}

pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    pipeline_manager: PipelineManager,
    global_ubo: UniformBuffer<GlobalUniform>,
    global_bind_group: wgpu::BindGroup,
    object_layout: BindGroupLayoutWithDesc,
    object_slots: Vec<ObjectSlot>,
    texture_layout: BindGroupLayoutWithDesc,
    fallback_texture: TextureBinding,
    scene_textures: TextureRegistry<TextureBinding>,
    meshes: HashMap<ShapeKind, GpuMesh>,
}

impl Renderer {
    /// Creates a renderer drawing into `window`.
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<Renderer, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: MAX_TEXTURE_DIMENSION,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(RenderError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(&device, "Globals Bind Group Layout");
        let object_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(&device, "Object Bind Group Layout");
        let texture_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::texture_2d())
            .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Filtering))
            .create(&device, "Texture Bind Group Layout");

        let global_ubo = UniformBuffer::<GlobalUniform>::new(&device);
        let global_bind_group = BindGroupBuilder::new(&global_layout)
            .resource(global_ubo.binding_resource())
            .create(&device, "Globals Bind Group");

        let fallback_texture = Self::create_texture_binding(
            &device,
            &texture_layout,
            TextureResource::create_white(&device, &queue),
        );

        let device: Arc<wgpu::Device> = device.into();
        let queue: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device.clone());
        pipeline_manager.load_shader("phong", include_str!("phong.wgsl"));
        pipeline_manager.register_pipeline(
            PHONG_PIPELINE,
            PipelineConfig::default()
                .with_label("PHONG")
                .with_shader("phong")
                .with_depth_stencil(TextureResource::DEPTH_FORMAT)
                // Mirrored and flattened objects make winding unreliable.
                .with_cull_mode(None)
                .with_bind_group_layouts(vec![
                    global_layout.layout.clone(),
                    object_layout.layout.clone(),
                    texture_layout.layout.clone(),
                ])
                .with_color_targets(vec![Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })]),
        );
        pipeline_manager.create_all_pipelines()?;

        Ok(Renderer {
            surface,
            device,
            queue,
            config,
            depth_texture,
            pipeline_manager,
            global_ubo,
            global_bind_group,
            object_layout,
            object_slots: Vec::new(),
            texture_layout,
            fallback_texture,
            scene_textures: TextureRegistry::new(),
            meshes: HashMap::new(),
        })
    }

    fn create_texture_binding(
        device: &wgpu::Device,
        layout: &BindGroupLayoutWithDesc,
        resource: TextureResource,
    ) -> TextureBinding {
        let bind_group = BindGroupBuilder::new(layout)
            .texture(&resource.view)
            .sampler(&resource.sampler)
            .create(device, "Texture Bind Group");
        TextureBinding {
            _resource: resource,
            bind_group,
        }
    }

    /// Uploads vertex and index buffers for every loaded primitive.
    pub fn upload_meshes(&mut self, meshes: &ShapeMeshes) {
        for (kind, geometry) in meshes.iter() {
            self.meshes
                .insert(kind, GpuMesh::new(&self.device, kind, geometry));
        }
        log::info!("Uploaded {} primitive meshes", self.meshes.len());
    }

    /// Creates one GPU texture per occupied slot, keeping slot indices.
    pub fn bind_scene_textures(&mut self, textures: &TextureRegistry<LoadedImage>) {
        let bindings = textures.map(|slot| {
            Self::create_texture_binding(
                &self.device,
                &self.texture_layout,
                TextureResource::create_from_image(&self.device, &self.queue, &slot.texture),
            )
        });
        self.scene_textures = bindings;
        log::info!("Bound {} scene textures", self.scene_textures.len());
    }

    /// Grows the per-draw uniform pool to at least `count` entries.
    fn ensure_object_slots(&mut self, count: usize) {
        while self.object_slots.len() < count {
            let ubo = UniformBuffer::<ObjectUniform>::new(&self.device);
            let bind_group = BindGroupBuilder::new(&self.object_layout)
                .resource(ubo.binding_resource())
                .create(&self.device, "Object Bind Group");
            self.object_slots.push(ObjectSlot { ubo, bind_group });
        }
    }

    /// Draws the frame recorded in `shader` and presents it.
    pub fn render_frame(&mut self, shader: &ShaderManager) -> Result<(), RenderError> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated; reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timed out acquiring the next frame");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let draws = shader.draw_calls();
        self.global_ubo.update_content(&self.queue, *shader.globals());
        self.ensure_object_slots(draws.len());
        for (slot, draw) in self.object_slots.iter_mut().zip(draws) {
            slot.ubo.update_content(&self.queue, draw.object);
        }

        let pipeline = self
            .pipeline_manager
            .get_pipeline(PHONG_PIPELINE)
            .ok_or_else(|| RenderError::MissingPipeline(PHONG_PIPELINE.to_string()))?;

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(0, &self.global_bind_group, &[]);

            for (slot, draw) in self.object_slots.iter().zip(draws) {
                let Some(mesh) = self.meshes.get(&draw.shape) else {
                    log::debug!("No GPU mesh for {}; skipping draw", draw.shape.name());
                    continue;
                };
                let texture = draw
                    .texture_slot
                    .and_then(|index| self.scene_textures.get(index))
                    .map(|bound| &bound.texture)
                    .unwrap_or(&self.fallback_texture);

                render_pass.set_bind_group(1, &slot.bind_group, &[]);
                render_pass.set_bind_group(2, &texture.bind_group, &[]);
                mesh.draw(&mut render_pass);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }
}
