use bytemuck::{Pod, Zeroable};
use winit::dpi::PhysicalSize;

use crate::field::FIELD_FORMAT;
use crate::input::BrushStroke;

use super::quad::{QuadMesh, QuadVertex};
use super::{RenderCtx, transform};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct BrushUniform {
    matrix: [[f32; 4]; 4],
    color: [f32; 4],
}

/// Brush pass: stamps one rotated, scaled, solid-color quad into the back
/// field target without clearing it, so stamps accumulate on top of the
/// freshly faded field.
#[derive(Default)]
pub struct BrushRenderer {
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: Option<wgpu::BindGroup>,
    uniform: Option<wgpu::Buffer>,
}

impl BrushRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the stamp for `stroke` into `dst_view`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        encoder: &mut wgpu::CommandEncoder,
        dst_view: &wgpu::TextureView,
        surface: PhysicalSize<u32>,
        stroke: &BrushStroke,
        quad: &QuadMesh,
    ) {
        self.ensure_pipeline(ctx);

        let (Some(pipeline), Some(bind_group), Some(uniform)) = (
            self.pipeline.as_ref(),
            self.bind_group.as_ref(),
            self.uniform.as_ref(),
        ) else {
            return;
        };

        let matrix = transform::brush_matrix(surface, stroke);
        ctx.queue.write_buffer(
            uniform,
            0,
            bytemuck::bytes_of(&BrushUniform {
                matrix: matrix.to_cols_array_2d(),
                color: stroke.color,
            }),
        );

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("smudge brush pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: dst_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    // No clear: the stamp lands on the faded field.
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
        rpass.set_bind_group(0, bind_group, &[]);
        quad.bind(&mut rpass);
        rpass.draw_indexed(0..QuadMesh::INDEX_COUNT, 0, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline.is_some() {
            return;
        }

        let shader = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("smudge brush shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shaders/brush.wgsl").into()),
            });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("smudge brush bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: std::num::NonZeroU64::new(
                                std::mem::size_of::<BrushUniform>() as u64,
                            ),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("smudge brush pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("smudge brush pipeline"),
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
                        format: FIELD_FORMAT,
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

        let uniform = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("smudge brush ubo"),
            size: std::mem::size_of::<BrushUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("smudge brush bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform.as_entire_binding(),
            }],
        });

        self.pipeline = Some(pipeline);
        self.bind_group = Some(bind_group);
        self.uniform = Some(uniform);
    }
}
