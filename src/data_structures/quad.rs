//! Vertex/index buffers for batches of textured quads.
//!
//! Static geometry (floor, walls) is uploaded once. Dynamic batches
//! (billboards, the avatar, HUD bars) are rewritten in place every frame and
//! only reallocated when they outgrow their buffers.

use bytemuck::Zeroable;
use wgpu::util::DeviceExt;

use crate::{
    context::Context,
    game::geometry::Quad,
    render::Flat,
};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl QuadVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Flatten quads into vertices and a triangle index list (two triangles each).
pub fn tessellate(quads: &[Quad]) -> (Vec<QuadVertex>, Vec<u32>) {
    let vertices = quads
        .iter()
        .flat_map(|quad| {
            quad.positions
                .iter()
                .zip(quad.tex_coords.iter())
                .map(|(&position, &tex_coords)| QuadVertex {
                    position,
                    tex_coords,
                })
        })
        .collect();
    let indices = (0..quads.len() as u32)
        .flat_map(|i| {
            let base = i * 4;
            [base, base + 1, base + 2, base, base + 2, base + 3]
        })
        .collect();
    (vertices, indices)
}

/// GPU buffers for up to `capacity` quads, `len` of which are drawn.
#[derive(Debug)]
pub struct QuadMesh {
    label: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    capacity: usize,
    len: usize,
}

impl QuadMesh {
    pub fn new(device: &wgpu::Device, label: &str, quads: &[Quad]) -> Self {
        let (vertices, indices) = tessellate(quads);
        Self::from_parts(device, label, &vertices, &indices, quads.len())
    }

    /// Room for `capacity` quads, none drawn yet.
    pub fn with_capacity(device: &wgpu::Device, label: &str, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let vertices = vec![QuadVertex::zeroed(); capacity * 4];
        let indices = vec![0u32; capacity * 6];
        let mut mesh = Self::from_parts(device, label, &vertices, &indices, capacity);
        mesh.len = 0;
        mesh
    }

    fn from_parts(
        device: &wgpu::Device,
        label: &str,
        vertices: &[QuadVertex],
        indices: &[u32],
        quads: usize,
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        });
        Self {
            label: label.to_string(),
            vertex_buffer,
            index_buffer,
            capacity: quads,
            len: quads,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn num_indices(&self) -> u32 {
        (self.len * 6) as u32
    }

    /// Replace the drawn quads, growing the buffers when needed.
    pub fn write_quads(&mut self, ctx: &Context, quads: &[Quad]) {
        if quads.len() > self.capacity {
            let grown = quads.len().next_power_of_two();
            log::debug!("growing {} to {} quads", self.label, grown);
            *self = Self::with_capacity(&ctx.device, &self.label, grown);
        }
        self.len = quads.len();
        if quads.is_empty() {
            return;
        }
        let (vertices, indices) = tessellate(quads);
        ctx.queue
            .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        ctx.queue
            .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&indices));
    }

    /// Draw data for this mesh with `group` bound as its texture.
    pub fn flat<'a>(&'a self, group: &'a wgpu::BindGroup) -> Flat<'a> {
        Flat {
            vertex: &self.vertex_buffer,
            index: &self.index_buffer,
            group,
            amount: self.num_indices() as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::geometry;

    #[test]
    fn two_triangles_per_quad() {
        let quads = geometry::skybox();
        let (vertices, indices) = tessellate(&quads);
        assert_eq!(vertices.len(), 16);
        assert_eq!(indices.len(), 24);
        assert_eq!(&indices[6..12], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn vertices_keep_their_uvs() {
        let (vertices, _) = tessellate(&[geometry::floor()]);
        assert_eq!(vertices[2].position, [1000.0, 0.0, 1000.0]);
        assert_eq!(vertices[2].tex_coords, [100.0, 100.0]);
    }

    #[test]
    fn large_batches_keep_distinct_indices() {
        let quads = vec![geometry::floor(); 20_000];
        let (vertices, indices) = tessellate(&quads);
        assert_eq!(vertices.len(), 80_000);
        assert_eq!(indices.last(), Some(&79_999));
    }
}
