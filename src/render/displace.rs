use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::RenderCtx;
use super::quad::{QuadMesh, QuadVertex};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct DisplaceUniform {
    matrix: [[f32; 4]; 4],
    range: [f32; 2],
    _pad: [f32; 2],
}

/// Composite pass: draws the source image onto the surface, offsetting
/// every sample by the displacement decoded from the back field target.
///
/// Both sampled views can change between frames (field swap, image load),
/// so the bind group is rebuilt per pass.
#[derive(Default)]
pub struct DisplaceRenderer {
    pipeline: Option<wgpu::RenderPipeline>,
    pipeline_format: Option<wgpu::TextureFormat>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    uniform: Option<wgpu::Buffer>,
    image_sampler: Option<wgpu::Sampler>,
    field_sampler: Option<wgpu::Sampler>,
}

impl DisplaceRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the composite pass onto `dst_view` (the surface).
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        encoder: &mut wgpu::CommandEncoder,
        dst_view: &wgpu::TextureView,
        image_view: &wgpu::TextureView,
        field_view: &wgpu::TextureView,
        matrix: Mat4,
        range: [f32; 2],
        quad: &QuadMesh,
    ) {
        self.ensure_pipeline(ctx);

        let (Some(pipeline), Some(bgl), Some(uniform), Some(image_sampler), Some(field_sampler)) = (
            self.pipeline.as_ref(),
            self.bind_group_layout.as_ref(),
            self.uniform.as_ref(),
            self.image_sampler.as_ref(),
            self.field_sampler.as_ref(),
        ) else {
            return;
        };

        ctx.queue.write_buffer(
            uniform,
            0,
            bytemuck::bytes_of(&DisplaceUniform {
                matrix: matrix.to_cols_array_2d(),
                range,
                _pad: [0.0; 2],
            }),
        );

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("smudge displace bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(image_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(image_sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(field_view),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: wgpu::BindingResource::Sampler(field_sampler),
                },
            ],
        });

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("smudge composite pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: dst_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    // Surface was cleared by the frame's clear pass.
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &bind_group, &[]);
        quad.bind(&mut rpass);
        rpass.draw_indexed(0..QuadMesh::INDEX_COUNT, 0, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline.is_some() && self.pipeline_format == Some(ctx.surface_format) {
            return;
        }

        let shader = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("smudge displace shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shaders/displace.wgsl").into()),
            });

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
        let sampler_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        };

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("smudge displace bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                            ty: wgpu::BindingType::Buffer {
                                ty: wgpu::BufferBindingType::Uniform,
                                has_dynamic_offset: false,
                                min_binding_size: std::num::NonZeroU64::new(
                                    std::mem::size_of::<DisplaceUniform>() as u64,
                                ),
                            },
                            count: None,
                        },
                        texture_entry(1),
                        sampler_entry(2),
                        texture_entry(3),
                        sampler_entry(4),
                    ],
                });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("smudge displace pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("smudge displace pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[QuadVertex::layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });

        let image_sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("smudge image sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let field_sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("smudge field sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let uniform = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("smudge displace ubo"),
            size: std::mem::size_of::<DisplaceUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        self.pipeline = Some(pipeline);
        self.pipeline_format = Some(ctx.surface_format);
        self.bind_group_layout = Some(bind_group_layout);
        self.uniform = Some(uniform);
        self.image_sampler = Some(image_sampler);
        self.field_sampler = Some(field_sampler);
    }
}
