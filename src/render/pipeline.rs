//! WebGPU rendering pipeline for the vessel scene.
//!
//! Sets up wgpu device, surface, and render pipelines for drawing the lit
//! vessel tubes, the flow particle sprites and the HUD on top.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use winit::{dpi::PhysicalSize, window::Window};

use super::buffers::{GpuGeometryBackend, ParticleBuffer, ParticleInstance};
use super::camera::Camera;
use super::hud::HudOverlay;
use crate::config::ViewParameters;
use crate::geometry::TubeVertex;
use crate::state::{FlowScene, FrameMetrics};

/// Scene the renderer draws
pub type GpuFlowScene = FlowScene<GpuGeometryBackend>;

/// Scene lighting and model uniform
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct SceneSettings {
    /// Vessel group transform
    model: [[f32; 4]; 4],
    ambient: [f32; 4],
    emissive: [f32; 4],
    light_pos: [[f32; 4]; 4],
    /// RGB color, intensity in w
    light_color: [[f32; 4]; 4],
    /// x: particle size, y: shininess, z: specular strength
    params: [f32; 4],
}

impl SceneSettings {
    fn new(view: &ViewParameters) -> Self {
        // Ambient 0.35, emissive #2a2a4a at 0.4, four point lights
        Self {
            model: glam::Mat4::IDENTITY.to_cols_array_2d(),
            ambient: [0.35, 0.35, 0.35, 1.0],
            emissive: [
                0x2a as f32 / 255.0 * 0.4,
                0x2a as f32 / 255.0 * 0.4,
                0x4a as f32 / 255.0 * 0.4,
                1.0,
            ],
            light_pos: [
                [12.0, 12.0, 12.0, 1.0],
                [-12.0, -10.0, 8.0, 1.0],
                [0.0, 0.0, 18.0, 1.0],
                [8.0, -8.0, -10.0, 1.0],
            ],
            light_color: [
                [1.0, 1.0, 1.0, 2.2 * 0.5],
                [0.055, 0.647, 0.914, 1.5 * 0.5],
                [0.655, 0.545, 0.98, 1.0 * 0.5],
                [0.925, 0.282, 0.6, 0.8 * 0.5],
            ],
            params: [view.particle_size, 48.0, 0.4, 0.0],
        }
    }
}

/// Main render state managing all GPU resources
pub struct RenderState {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,

    // Pipelines
    tube_pipeline: wgpu::RenderPipeline,
    particle_pipeline: wgpu::RenderPipeline,

    // Buffers
    particle_buffer: ParticleBuffer,

    // Uniforms
    camera_buffer: wgpu::Buffer,
    settings: SceneSettings,
    settings_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    // Depth buffer
    depth_texture: wgpu::TextureView,

    // State
    pub camera: Camera,
    pub hud: HudOverlay,
    background: wgpu::Color,
    last_frame_time: Instant,
}

impl RenderState {
    /// Create new render state for `window`
    pub async fn new(window: Arc<Window>, view: &ViewParameters) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // The Arc<Window> stored in RenderState outlives the surface
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        log::info!("Using adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Flow Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;
        let device = Arc::new(device);

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no supported formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Flow Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../../shaders/flow.wgsl").into()),
        });

        let camera = Camera::new(view, config.width as f32 / config.height as f32);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera.to_uniform()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let settings = SceneSettings::new(view);
        let settings_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Settings Buffer"),
            contents: bytemuck::cast_slice(&[settings]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Uniform Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: settings_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let depth_stencil = wgpu::DepthStencilState {
            format: wgpu::TextureFormat::Depth32Float,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        };

        // Tubes are open at both ends, so both faces are drawn
        let tube_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Tube Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_tube",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<TubeVertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                        2 => Float32x3,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_tube",
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                ..Default::default()
            },
            depth_stencil: Some(depth_stencil.clone()),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        // One camera-facing quad (6 vertices) per particle instance
        let particle_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Particle Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_particle",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<ParticleInstance>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_particle",
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(depth_stencil),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let depth_texture = Self::create_depth_texture(&device, &config);
        let hud = HudOverlay::new(&window, &device, config.format);

        let [r, g, b] = view.background;

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            size,
            tube_pipeline,
            particle_pipeline,
            particle_buffer: ParticleBuffer::new(),
            camera_buffer,
            settings,
            settings_buffer,
            bind_group,
            depth_texture,
            camera,
            hud,
            background: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
            last_frame_time: Instant::now(),
        })
    }

    /// Backend that allocates tube buffers on this device
    pub fn geometry_backend(&self) -> GpuGeometryBackend {
        GpuGeometryBackend::new(self.device.clone())
    }

    fn create_depth_texture(
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
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Resize the render surface
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = Self::create_depth_texture(&self.device, &self.config);
            self.camera.set_aspect(new_size.width as f32 / new_size.height as f32);
        }
    }

    /// Update uniforms and particle instances (called each frame before render)
    ///
    /// Returns the frame duration in seconds.
    pub fn update(&mut self, scene: &mut GpuFlowScene) -> f32 {
        let now = Instant::now();
        let delta_time = (now - self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        self.camera.update(delta_time);
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera.to_uniform()]),
        );

        self.settings.model = scene.model_matrix().to_cols_array_2d();
        self.queue
            .write_buffer(&self.settings_buffer, 0, bytemuck::cast_slice(&[self.settings]));

        self.particle_buffer
            .sync(&self.device, &self.queue, scene.particles_mut());

        delta_time
    }

    /// Render a frame
    pub fn render(
        &mut self,
        scene: &GpuFlowScene,
        metrics: &FrameMetrics,
    ) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.background),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.bind_group, &[]);

            render_pass.set_pipeline(&self.tube_pipeline);
            for tube in scene.geometry().handles() {
                render_pass.set_vertex_buffer(0, tube.vertex_buffer.slice(..));
                render_pass.set_index_buffer(tube.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..tube.index_count, 0, 0..1);
            }

            if scene.show_particles() {
                if let Some((buffer, count)) = self.particle_buffer.drawable() {
                    render_pass.set_pipeline(&self.particle_pipeline);
                    render_pass.set_vertex_buffer(0, buffer.slice(..));
                    render_pass.draw(0..6, 0..count);
                }
            }
        }

        let (paint_jobs, textures_delta) = self.hud.render(&self.window, metrics);
        let screen_descriptor = self.hud.screen_descriptor(&self.window);
        self.hud.paint(
            &self.device,
            &self.queue,
            &mut encoder,
            &view,
            screen_descriptor,
            paint_jobs,
            textures_delta,
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
