//! Triangle mesh GPU rendering resources.

use geoglobe_core::{Appearance, TextureData, TriangleMesh};

use crate::buffer;
use crate::texture::Texture;

/// Interleaved mesh vertex. Layout must match `mesh.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl MeshVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    /// Vertex buffer layout for the mesh pipeline.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Uniforms for mesh rendering (32 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[allow(clippy::pub_underscore_fields)]
pub struct MeshUniforms {
    /// Base color (rgb) and opacity (a).
    pub color: [f32; 4],
    /// 1 to modulate the color by the texture.
    pub use_texture: u32,
    pub _padding: [u32; 3],
}

impl Default for MeshUniforms {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            use_texture: 0,
            _padding: [0; 3],
        }
    }
}

impl MeshUniforms {
    pub fn from_appearance(appearance: &Appearance, textured: bool) -> Self {
        Self {
            color: appearance.color.extend(appearance.opacity).to_array(),
            use_texture: u32::from(textured),
            ..Self::default()
        }
    }
}

/// GPU resources for one mesh actor.
pub struct MeshRenderData {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub uniform_buffer: wgpu::Buffer,
    pub texture: Texture,
    pub bind_group: wgpu::BindGroup,
    pub num_indices: u32,
    pub textured: bool,
}

impl MeshRenderData {
    /// Uploads a mesh and its optional texture.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
        mesh: &TriangleMesh,
        texture: Option<&TextureData>,
    ) -> Self {
        let vertices: Vec<MeshVertex> = mesh
            .positions
            .iter()
            .enumerate()
            .map(|(i, p)| MeshVertex {
                position: p.to_array(),
                normal: mesh.normals.get(i).map_or([0.0, 0.0, 1.0], |n| n.to_array()),
                tex_coord: mesh.tex_coords.get(i).map_or([0.0, 0.0], |t| t.to_array()),
            })
            .collect();
        let indices: Vec<u32> = mesh.triangles.iter().flatten().copied().collect();

        let vertex_buffer = buffer::create_vertex_buffer(device, &vertices, Some("mesh vertices"));
        let index_buffer = buffer::create_index_buffer(device, &indices, Some("mesh indices"));
        let uniform_buffer =
            buffer::create_uniform_buffer(device, &MeshUniforms::default(), Some("mesh uniforms"));

        let textured = texture.is_some();
        let texture = match texture {
            Some(data) => Texture::from_data(device, queue, data, "mesh texture"),
            None => Texture::white(device, queue),
        };

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mesh bind group"),
            layout: bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        });

        Self {
            vertex_buffer,
            index_buffer,
            uniform_buffer,
            texture,
            bind_group,
            num_indices: indices.len() as u32,
            textured,
        }
    }

    /// Updates uniforms.
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &MeshUniforms) {
        buffer::update_buffer(queue, &self.uniform_buffer, &[*uniforms]);
    }

    /// Records the draw call.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.num_indices, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoglobe_core::Vec3;

    #[test]
    fn test_mesh_uniforms_size() {
        assert_eq!(std::mem::size_of::<MeshUniforms>(), 32);
        assert_eq!(std::mem::size_of::<MeshVertex>(), 32);
    }

    #[test]
    fn test_uniforms_from_appearance() {
        let appearance = Appearance {
            color: Vec3::splat(0.6),
            ..Appearance::default()
        };
        let uniforms = MeshUniforms::from_appearance(&appearance, true);
        assert_eq!(uniforms.color, [0.6, 0.6, 0.6, 1.0]);
        assert_eq!(uniforms.use_texture, 1);
    }
}
