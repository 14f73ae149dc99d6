//! Render pipeline and bind group layout creation.

use std::num::NonZeroU64;

use crate::mesh_render::MeshVertex;

/// Depth buffer format shared by every pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const CAMERA_UNIFORMS_SIZE: u64 = 96;
const ACTOR_UNIFORMS_SIZE: u64 = 32;

/// Pipelines and layouts for the three geometry kinds.
pub(crate) struct Pipelines {
    pub mesh_layout: wgpu::BindGroupLayout,
    pub line_layout: wgpu::BindGroupLayout,
    pub point_layout: wgpu::BindGroupLayout,
    /// Meshes without face culling.
    pub mesh: wgpu::RenderPipeline,
    /// Meshes with back faces culled.
    pub mesh_culled: wgpu::RenderPipeline,
    /// Opaque lines, writing depth.
    pub line: wgpu::RenderPipeline,
    /// Translucent lines, depth-tested only.
    pub line_translucent: wgpu::RenderPipeline,
    pub point: wgpu::RenderPipeline,
}

struct PipelineDesc<'a> {
    label: &'a str,
    shader: &'a wgpu::ShaderModule,
    layout: &'a wgpu::BindGroupLayout,
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    cull_mode: Option<wgpu::Face>,
    depth_write: bool,
}

impl Pipelines {
    pub fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> Self {
        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/mesh.wgsl").into()),
        });
        let line_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("line shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/line.wgsl").into()),
        });
        let point_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("point shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/point.wgsl").into()),
        });

        let mesh_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mesh bind group layout"),
            entries: &[
                uniform_entry(0, CAMERA_UNIFORMS_SIZE),
                uniform_entry(1, ACTOR_UNIFORMS_SIZE),
                // Color texture
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                // Sampler
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let line_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("line bind group layout"),
            entries: &[
                uniform_entry(0, CAMERA_UNIFORMS_SIZE),
                uniform_entry(1, ACTOR_UNIFORMS_SIZE),
                storage_entry(2),
            ],
        });

        let point_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("point bind group layout"),
            entries: &[
                uniform_entry(0, CAMERA_UNIFORMS_SIZE),
                uniform_entry(1, ACTOR_UNIFORMS_SIZE),
                storage_entry(2),
                storage_entry(3),
            ],
        });

        let mesh_buffers = [MeshVertex::layout()];
        let mesh_desc = |label, cull_mode| PipelineDesc {
            label,
            shader: &mesh_shader,
            layout: &mesh_layout,
            buffers: &mesh_buffers,
            cull_mode,
            depth_write: true,
        };
        let mesh = create_pipeline(device, color_format, &mesh_desc("mesh pipeline", None));
        let mesh_culled = create_pipeline(
            device,
            color_format,
            &mesh_desc("mesh pipeline (culled)", Some(wgpu::Face::Back)),
        );

        let line_desc = |label, depth_write| PipelineDesc {
            label,
            shader: &line_shader,
            layout: &line_layout,
            buffers: &[],
            cull_mode: None,
            depth_write,
        };
        let line = create_pipeline(device, color_format, &line_desc("line pipeline", true));
        let line_translucent = create_pipeline(
            device,
            color_format,
            &line_desc("line pipeline (translucent)", false),
        );

        // Points are always blended without writing depth
        let point = create_pipeline(
            device,
            color_format,
            &PipelineDesc {
                label: "point pipeline",
                shader: &point_shader,
                layout: &point_layout,
                buffers: &[],
                cull_mode: None,
                depth_write: false,
            },
        );

        Self {
            mesh_layout,
            line_layout,
            point_layout,
            mesh,
            mesh_culled,
            line,
            line_translucent,
            point,
        }
    }
}

fn uniform_entry(binding: u32, size: u64) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(size),
        },
        count: None,
    }
}

fn storage_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only: true },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    desc: &PipelineDesc<'_>,
) -> wgpu::RenderPipeline {
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(desc.label),
        bind_group_layouts: &[desc.layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: desc.shader,
            entry_point: Some("vs_main"),
            buffers: desc.buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: desc.shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: desc.cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: desc.depth_write,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
