//! The shared unit-quad mesh reused by every draw call.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    /// Quad-local position, -1..1 per axis.
    pub pos: [f32; 2],
    /// Texture coordinate, `pos * 0.5 + 0.5`. Shaders that need the
    /// opposite row order flip `v` themselves.
    pub uv: [f32; 2],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [-1.0, -1.0], uv: [0.0, 0.0] },
    QuadVertex { pos: [1.0, -1.0], uv: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0], uv: [1.0, 1.0] },
    QuadVertex { pos: [-1.0, 1.0], uv: [0.0, 1.0] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// GPU buffers for the -1..1 unit quad; created once and shared by the
/// brush, fade, and composite passes.
pub struct QuadMesh {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
}

impl QuadMesh {
    pub fn new(device: &wgpu::Device) -> Self {
        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("smudge quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("smudge quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self { vbo, ibo }
    }

    pub(super) fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_vertex_buffer(0, self.vbo.slice(..));
        rpass.set_index_buffer(self.ibo.slice(..), wgpu::IndexFormat::Uint16);
    }

    pub(super) const INDEX_COUNT: u32 = QUAD_INDICES.len() as u32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uv_matches_biased_position() {
        for v in QUAD_VERTICES {
            assert_eq!(v.uv[0], v.pos[0] * 0.5 + 0.5);
            assert_eq!(v.uv[1], v.pos[1] * 0.5 + 0.5);
        }
    }

    #[test]
    fn indices_cover_two_ccw_triangles() {
        assert_eq!(QUAD_INDICES.len(), 6);
        for &i in &QUAD_INDICES {
            assert!((i as usize) < QUAD_VERTICES.len());
        }
    }
}
