pub mod mesh;
pub mod ui;

use anyhow::{Context, Result};
use log::{info, warn};
use std::collections::HashMap;
use std::sync::mpsc;
use std::sync::Arc;
use winit::window::Window;

use crate::composer::SceneComposer;
use crate::params::{ControlPanel, ParamValue};
use crate::scene::{NodeId, Side};
use crate::types::{GlobalsUniform, Vertex};
use crate::viewport::Viewport;

use self::mesh::{FallbackTextures, GpuMesh, MaterialBinding};
use self::ui::FrameStats;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Render state that depends on material flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    pub transparent: bool,
    pub depth_write: bool,
    pub side: Side,
}

/// wgpu renderer for a composed scene plus the egui control panel
pub struct SceneRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    material_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    shader: wgpu::ShaderModule,
    sampler: wgpu::Sampler,
    fallback: FallbackTextures,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    meshes: HashMap<NodeId, GpuMesh>,
    egui_renderer: egui_wgpu::Renderer,
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,
    pixel_ratio: f32,
    device_lost: mpsc::Receiver<String>,
}

impl SceneRenderer {
    pub async fn new(window: Arc<Window>, viewport: Viewport) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create surface")?;
        let adapter = Self::request_adapter(&instance, &surface).await?;
        let (device, queue) = Self::request_device(&adapter).await?;

        let (sender, device_lost) = mpsc::channel();
        device.set_device_lost_callback(move |reason, message| {
            sender.send(format!("{:?}: {}", reason, message)).ok();
        });

        let config = Self::create_surface_config(&surface, &adapter, viewport);
        surface.configure(&device, &config);
        let depth_view = Self::create_depth_view(&device, &config);

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("globals_bind_group_layout"),
        });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Globals Buffer"),
            size: std::mem::size_of::<GlobalsUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
            label: Some("globals_bind_group"),
        });

        let material_layout = Self::create_material_layout(&device);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Pipeline Layout"),
            bind_group_layouts: &[&globals_layout, &material_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("mesh.wgsl").into()),
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let fallback = FallbackTextures::new(&device, &queue);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        egui_ctx.options_mut(|options| options.zoom_with_keyboard = false);
        egui_ctx.set_zoom_factor(viewport.ui_zoom_factor());
        let egui_renderer = egui_wgpu::Renderer::new(
            &device,
            config.format,
            egui_wgpu::RendererOptions::default(),
        );

        info!(
            "Renderer initialized: {}x{} {:?} on {}",
            config.width,
            config.height,
            config.format,
            adapter.get_info().name
        );

        Ok(Self {
            device,
            queue,
            surface,
            config,
            depth_view,
            globals_buffer,
            globals_bind_group,
            material_layout,
            pipeline_layout,
            shader,
            sampler,
            fallback,
            pipelines: HashMap::new(),
            meshes: HashMap::new(),
            egui_renderer,
            egui_state,
            egui_ctx,
            pixel_ratio: viewport.pixel_ratio,
            device_lost,
        })
    }

    async fn request_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'_>,
    ) -> Result<wgpu::Adapter> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .context("Failed to find appropriate adapter")
    }

    async fn request_device(adapter: &wgpu::Adapter) -> Result<(wgpu::Device, wgpu::Queue)> {
        adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Scene Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("Failed to create device")
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        viewport: Viewport,
    ) -> wgpu::SurfaceConfiguration {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
        let (width, height) = viewport.drawing_buffer_size();

        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    fn create_depth_view(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_material_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };

        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                texture_entry(1),
                texture_entry(2),
                texture_entry(3),
                wgpu::BindGroupLayoutEntry {
                    binding: 4,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
            label: Some("material_bind_group_layout"),
        })
    }

    fn create_pipeline(&self, key: PipelineKey) -> wgpu::RenderPipeline {
        let blend = if key.transparent {
            wgpu::BlendState::ALPHA_BLENDING
        } else {
            wgpu::BlendState::REPLACE
        };
        let cull_mode = match key.side {
            Side::Front => Some(wgpu::Face::Back),
            Side::Back => Some(wgpu::Face::Front),
            Side::Double => None,
        };

        self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Mesh Pipeline"),
            layout: Some(&self.pipeline_layout),
            vertex: wgpu::VertexState {
                module: &self.shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &self.shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.config.format,
                    blend: Some(blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: key.depth_write,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    /// Current surface size in device pixels
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Resize the output surface. No-op if unchanged or empty.
    pub fn resize(&mut self, viewport: Viewport) {
        let zoom = viewport.ui_zoom_factor();
        if viewport.pixel_ratio != self.pixel_ratio || self.egui_ctx.zoom_factor() != zoom {
            self.pixel_ratio = viewport.pixel_ratio;
            self.egui_ctx.set_zoom_factor(zoom);
        }
        let (width, height) = viewport.drawing_buffer_size();
        if width == 0 || height == 0 || (width, height) == self.size() {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
    }

    /// Reapply the surface configuration after a lost or outdated surface
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        self.depth_view = Self::create_depth_view(&self.device, &self.config);
    }

    /// Non-blocking check of the device lost callback
    pub fn take_device_lost(&self) -> Option<String> {
        self.device_lost.try_recv().ok()
    }

    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.egui_state.on_window_event(window, event).consumed
    }

    /// Bring GPU meshes in line with the scene graph
    fn sync_scene(&mut self, composer: &SceneComposer) {
        let binding = MaterialBinding {
            device: &self.device,
            queue: &self.queue,
            layout: &self.material_layout,
            sampler: &self.sampler,
            fallback: &self.fallback,
        };
        let scene = composer.scene();

        self.meshes.retain(|id, _| scene.node(*id).is_some());

        for (id, node, mesh) in scene.meshes() {
            let gpu_mesh = self
                .meshes
                .entry(id)
                .or_insert_with(|| GpuMesh::new(&binding, &node.name, mesh));
            gpu_mesh.sync_textures(&binding, mesh);
            gpu_mesh.write_uniform(&self.queue, node, mesh);
        }

        let camera = composer.camera();
        let (sun_direction, sun_color) = scene.sun().unwrap_or_default();
        let globals = GlobalsUniform {
            view_proj: camera.view_projection().to_cols_array_2d(),
            camera_position: camera.position.to_array(),
            _pad0: 0.0,
            ambient: scene.ambient().to_array(),
            _pad1: 0.0,
            sun_direction: sun_direction.to_array(),
            _pad2: 0.0,
            sun_color: sun_color.to_array(),
            _pad3: 0.0,
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::cast_slice(&[globals]));
    }

    /// Opaque meshes first, then transparent ones in scene order
    fn draw_list(composer: &SceneComposer) -> Vec<(NodeId, PipelineKey)> {
        let mut list: Vec<_> = composer
            .scene()
            .meshes()
            .filter(|(_, node, _)| node.visible)
            .map(|(id, _, mesh)| {
                let key = PipelineKey {
                    transparent: mesh.material.transparent,
                    depth_write: mesh.material.depth_write,
                    side: mesh.material.side,
                };
                (id, key)
            })
            .collect();
        list.sort_by_key(|(_, key)| key.transparent);
        list
    }

    /// Draw one frame. Parameter edits made in the panel are applied after
    /// the frame is presented and show up in the next one.
    pub fn render(
        &mut self,
        composer: &mut SceneComposer,
        panel: &ControlPanel,
        window: &Window,
        stats: &FrameStats,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        self.sync_scene(composer);

        let draw_list = Self::draw_list(composer);
        for (_, key) in &draw_list {
            if !self.pipelines.contains_key(key) {
                let pipeline = self.create_pipeline(*key);
                self.pipelines.insert(*key, pipeline);
            }
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Encoder"),
            });

        let [r, g, b] = composer.scene().background;
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, &self.globals_bind_group, &[]);
            for (id, key) in &draw_list {
                if let (Some(pipeline), Some(gpu_mesh)) =
                    (self.pipelines.get(key), self.meshes.get(id))
                {
                    render_pass.set_pipeline(pipeline);
                    gpu_mesh.draw(&mut render_pass);
                }
            }
        }

        let raw_input = self.egui_state.take_egui_input(window);
        let mut changes: Vec<(&'static str, ParamValue)> = Vec::new();
        let params = composer.params();

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if panel.visible {
                ui::draw_stats(ctx, stats);
                ui::draw_controls(ctx, &panel.title, params, &mut changes);
            }
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: self.pixel_ratio,
        };

        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            self.egui_renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        window.pre_present_notify();
        output.present();

        for (name, value) in changes {
            if let Err(e) = panel.submit(composer, name, value) {
                warn!("Control change rejected: {:#}", e);
            }
        }

        Ok(())
    }
}
