use crate::constants::{
    CAMERA_FOV_DEG, CAMERA_Z_FAR, CAMERA_Z_NEAR, CLEAR_COLOR, STAR_OPACITY,
};
use crate::core::{ParticleField, RigFrame, StarField, SCENE_WGSL};
use glam::{EulerRot, Mat4, Vec3};
use web_sys as web;
use wgpu::util::DeviceExt;

// The camera points here every frame; a single fixed target, never
// reallocated.
const LOOK_AT_TARGET: Vec3 = Vec3::ZERO;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct FieldUniforms {
    proj: [[f32; 4]; 4],
    view_model: [[f32; 4]; 4],
    point_size: f32,
    opacity: f32,
    _pad: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct GalaxyInstance {
    pos: [f32; 3],
    color: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct StarInstance {
    pos: [f32; 3],
}

// ===================== WebGPU state =====================

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    galaxy_pipeline: wgpu::RenderPipeline,
    star_pipeline: wgpu::RenderPipeline,
    galaxy_uniforms: wgpu::Buffer,
    star_uniforms: wgpu::Buffer,
    galaxy_bind_group: wgpu::BindGroup,
    star_bind_group: wgpu::BindGroup,

    quad_vb: wgpu::Buffer,
    galaxy_instances: wgpu::Buffer,
    star_instances: wgpu::Buffer,
    galaxy_count: u32,
    star_count: u32,
    galaxy_point_size: f32,
    star_point_size: f32,

    width: u32,
    height: u32,
}

impl GpuState {
    /// Build the full GPU side: surface, pipelines, and the immutable
    /// instance buffers for both point fields. All geometry is uploaded once
    /// here; per-frame work is two uniform writes and one submission.
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        galaxy: &ParticleField,
        stars: &StarField,
        galaxy_point_size: f32,
        star_point_size: f32,
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });

        // Quad vertex buffer (two triangles spanning ±0.5)
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let galaxy_data: Vec<GalaxyInstance> = galaxy
            .positions
            .iter()
            .zip(galaxy.colors.iter())
            .map(|(p, c)| GalaxyInstance {
                pos: p.to_array(),
                color: *c,
            })
            .collect();
        let galaxy_instances = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("galaxy_instances"),
            contents: bytemuck::cast_slice(&galaxy_data),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let star_data: Vec<StarInstance> = stars
            .positions
            .iter()
            .map(|p| StarInstance { pos: p.to_array() })
            .collect();
        let star_instances = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("star_instances"),
            contents: bytemuck::cast_slice(&star_data),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let galaxy_uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("galaxy_uniforms"),
            size: std::mem::size_of::<FieldUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let star_uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("star_uniforms"),
            size: std::mem::size_of::<FieldUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("field_bgl"),
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
        });
        let galaxy_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("galaxy_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: galaxy_uniforms.as_entire_binding(),
            }],
        });
        let star_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("star_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: star_uniforms.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("field_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let quad_layout = wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 2) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 0,
                shader_location: 0,
            }],
        };
        let galaxy_instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GalaxyInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 1,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 2,
                },
            ],
        };
        let star_instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<StarInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 1,
            }],
        };

        // Additive accumulation for the dense galaxy arms
        let additive = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        };

        let make_pipeline = |label: &str,
                             vs_entry: &str,
                             fs_entry: &str,
                             instance_layout: &wgpu::VertexBufferLayout,
                             blend: wgpu::BlendState| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some(vs_entry),
                    buffers: &[quad_layout.clone(), instance_layout.clone()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(fs_entry),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(blend),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                cache: None,
                multiview: None,
            })
        };

        let galaxy_pipeline = make_pipeline(
            "galaxy_pipeline",
            "vs_galaxy",
            "fs_galaxy",
            &galaxy_instance_layout,
            additive,
        );
        let star_pipeline = make_pipeline(
            "star_pipeline",
            "vs_star",
            "fs_star",
            &star_instance_layout,
            wgpu::BlendState::ALPHA_BLENDING,
        );

        log::info!(
            "[gpu] ready: {} particles, {} stars, {}x{}",
            galaxy_data.len(),
            star_data.len(),
            width,
            height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            galaxy_pipeline,
            star_pipeline,
            galaxy_uniforms,
            star_uniforms,
            galaxy_bind_group,
            star_bind_group,
            quad_vb,
            galaxy_instances,
            star_instances,
            galaxy_count: galaxy_data.len() as u32,
            star_count: star_data.len() as u32,
            galaxy_point_size,
            star_point_size,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn projection(&self) -> Mat4 {
        let aspect = self.width as f32 / (self.height as f32).max(1.0);
        Mat4::perspective_rh(
            CAMERA_FOV_DEG.to_radians(),
            aspect,
            CAMERA_Z_NEAR,
            CAMERA_Z_FAR,
        )
    }

    /// Draw both fields for the given camera pose: stars first, then the
    /// galaxy additively over them, in a single pass and submission.
    pub fn render(&mut self, pose: &RigFrame) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let proj = self.projection().to_cols_array_2d();
        let eye = Vec3::new(0.0, pose.eye_height, pose.eye_distance);
        let view_mat = Mat4::look_at_rh(eye, LOOK_AT_TARGET, Vec3::Y);
        let galaxy_model =
            Mat4::from_euler(EulerRot::XYZ, pose.tilt_x, pose.galaxy_yaw, pose.tilt_z);
        let star_model = Mat4::from_rotation_y(pose.star_yaw);

        self.queue.write_buffer(
            &self.galaxy_uniforms,
            0,
            bytemuck::bytes_of(&FieldUniforms {
                proj,
                view_model: (view_mat * galaxy_model).to_cols_array_2d(),
                point_size: self.galaxy_point_size,
                opacity: 1.0,
                _pad: [0.0; 2],
            }),
        );
        self.queue.write_buffer(
            &self.star_uniforms,
            0,
            bytemuck::bytes_of(&FieldUniforms {
                proj,
                view_model: (view_mat * star_model).to_cols_array_2d(),
                point_size: self.star_point_size,
                opacity: STAR_OPACITY,
                _pad: [0.0; 2],
            }),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: CLEAR_COLOR[0],
                            g: CLEAR_COLOR[1],
                            b: CLEAR_COLOR[2],
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_pipeline(&self.star_pipeline);
            rpass.set_bind_group(0, &self.star_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.star_instances.slice(..));
            rpass.draw(0..6, 0..self.star_count);

            rpass.set_pipeline(&self.galaxy_pipeline);
            rpass.set_bind_group(0, &self.galaxy_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.galaxy_instances.slice(..));
            rpass.draw(0..6, 0..self.galaxy_count);
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
