//! Screen-space point GPU rendering resources.

use geoglobe_core::{Appearance, PointStyle, Vec3, Vec4};

use crate::buffer;

/// Uniforms for point rendering (32 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[allow(clippy::pub_underscore_fields)]
pub struct PointUniforms {
    /// Base color (rgb) and opacity (a).
    pub color: [f32; 4],
    /// Diameter in pixels.
    pub point_size: f32,
    /// 0 = smoothed disk, 1 = shaded sphere.
    pub style: u32,
    /// 1 to use per-point colors instead of `color.rgb`.
    pub use_point_color: u32,
    pub _padding: f32,
}

impl Default for PointUniforms {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            point_size: 4.0,
            style: 0,
            use_point_color: 0,
            _padding: 0.0,
        }
    }
}

impl PointUniforms {
    pub fn from_appearance(appearance: &Appearance, use_point_color: bool) -> Self {
        Self {
            color: appearance.color.extend(appearance.opacity).to_array(),
            point_size: appearance.point_size.max(1.0),
            style: match appearance.point_style {
                PointStyle::Sprite => 0,
                PointStyle::Sphere => 1,
            },
            use_point_color: u32::from(use_point_color),
            _padding: 0.0,
        }
    }
}

/// GPU resources for one point actor.
pub struct PointRenderData {
    pub position_buffer: wgpu::Buffer,
    pub color_buffer: wgpu::Buffer,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub num_points: u32,
}

impl PointRenderData {
    /// Creates render data from point positions and optional per-point colors.
    pub fn new(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
        positions: &[Vec3],
        colors: Option<&[Vec4]>,
    ) -> Self {
        let position_data = buffer::pack_positions(positions);
        let position_buffer = buffer::create_storage_buffer(device, &position_data, Some("point positions"));

        // White when no per-point colors are given
        let color_data = match colors {
            Some(colors) if colors.len() == positions.len() => buffer::pack_colors(colors),
            _ => vec![[1.0; 4]; positions.len()],
        };
        let color_buffer = buffer::create_storage_buffer(device, &color_data, Some("point colors"));

        let uniform_buffer =
            buffer::create_uniform_buffer(device, &PointUniforms::default(), Some("point uniforms"));

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("point bind group"),
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
                    resource: position_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: color_buffer.as_entire_binding(),
                },
            ],
        });

        Self {
            position_buffer,
            color_buffer,
            uniform_buffer,
            bind_group,
            num_points: positions.len() as u32,
        }
    }

    /// Updates the color buffer.
    pub fn update_colors(&self, queue: &wgpu::Queue, colors: &[Vec4]) {
        if colors.len() == self.num_points as usize {
            buffer::update_buffer(queue, &self.color_buffer, &buffer::pack_colors(colors));
        }
    }

    /// Updates uniforms.
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &PointUniforms) {
        buffer::update_buffer(queue, &self.uniform_buffer, &[*uniforms]);
    }

    /// Records the draw call: one billboard per point.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.num_points == 0 {
            return;
        }
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.draw(0..6, 0..self.num_points);
    }
}
