//! Wide line GPU rendering resources.
//!
//! Each segment is expanded into a screen-aligned quad in the vertex shader,
//! so line width is in pixels regardless of the backend's line support.

use geoglobe_core::{Appearance, PolylineSet, Vec4};

use crate::buffer;

/// One segment as stored on the GPU. Layout must match `line.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuSegment {
    pub start: [f32; 4],
    pub end: [f32; 4],
    pub color: [f32; 4],
}

/// Uniforms for line rendering (32 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineUniforms {
    /// Base color (rgb) and opacity (a).
    pub color: [f32; 4],
    /// Width in pixels.
    pub width: f32,
    /// Clip-space depth offset toward the camera.
    pub z_shift: f32,
    /// 1 to drop segments facing away from the camera.
    pub cull_backfacing: u32,
    /// 1 to use per-segment colors instead of `color.rgb`.
    pub use_segment_color: u32,
}

impl Default for LineUniforms {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            width: 1.0,
            z_shift: 0.0,
            cull_backfacing: 0,
            use_segment_color: 0,
        }
    }
}

impl LineUniforms {
    pub fn from_appearance(appearance: &Appearance, use_segment_color: bool) -> Self {
        Self {
            color: appearance.color.extend(appearance.opacity).to_array(),
            width: appearance.line_width.max(1.0),
            z_shift: appearance.z_shift,
            cull_backfacing: u32::from(appearance.backface_culling),
            use_segment_color: u32::from(use_segment_color),
        }
    }
}

/// Flattens polylines into GPU segments.
///
/// `polyline_colors` holds one color per polyline; missing colors are white.
pub fn build_segments(lines: &PolylineSet, polyline_colors: Option<&[Vec4]>) -> Vec<GpuSegment> {
    lines
        .segments()
        .filter_map(|(line, a, b)| {
            let start = lines.points.get(a as usize)?;
            let end = lines.points.get(b as usize)?;
            let color = polyline_colors
                .and_then(|colors| colors.get(line))
                .copied()
                .unwrap_or(Vec4::ONE);
            Some(GpuSegment {
                start: start.extend(1.0).to_array(),
                end: end.extend(1.0).to_array(),
                color: color.to_array(),
            })
        })
        .collect()
}

/// GPU resources for one polyline actor.
pub struct LineRenderData {
    pub segment_buffer: wgpu::Buffer,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub num_segments: u32,
}

impl LineRenderData {
    pub fn new(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
        segments: &[GpuSegment],
    ) -> Self {
        let segment_buffer = buffer::create_storage_buffer(device, segments, Some("line segments"));
        let uniform_buffer =
            buffer::create_uniform_buffer(device, &LineUniforms::default(), Some("line uniforms"));

        // Bindings:
        // 0: camera uniforms
        // 1: line uniforms
        // 2: segments (storage)
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("line bind group"),
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
                    resource: segment_buffer.as_entire_binding(),
                },
            ],
        });

        Self {
            segment_buffer,
            uniform_buffer,
            bind_group,
            num_segments: segments.len() as u32,
        }
    }

    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &LineUniforms) {
        buffer::update_buffer(queue, &self.uniform_buffer, &[*uniforms]);
    }

    /// Records the draw call: one quad per segment.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.num_segments == 0 {
            return;
        }
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.draw(0..6, 0..self.num_segments);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoglobe_core::Vec3;

    #[test]
    fn test_line_uniforms_size() {
        assert_eq!(std::mem::size_of::<LineUniforms>(), 32);
        assert_eq!(std::mem::size_of::<GpuSegment>(), 48);
    }

    #[test]
    fn test_build_segments_colors_per_polyline() {
        let mut lines = PolylineSet::new();
        lines.push_polyline([Vec3::ZERO, Vec3::X, Vec3::Y]);
        lines.push_polyline([Vec3::Z, Vec3::ONE]);
        let red = Vec4::new(1.0, 0.0, 0.0, 1.0);
        let blue = Vec4::new(0.0, 0.0, 1.0, 1.0);

        let segments = build_segments(&lines, Some(&[red, blue]));
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].start, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(segments[1].color, red.to_array());
        assert_eq!(segments[2].color, blue.to_array());

        let plain = build_segments(&lines, None);
        assert!(plain.iter().all(|s| s.color == [1.0; 4]));
    }

    #[test]
    fn test_uniforms_from_appearance() {
        let appearance = Appearance {
            line_width: 2.0,
            backface_culling: true,
            z_shift: 0.001,
            ..Appearance::default()
        };
        let uniforms = LineUniforms::from_appearance(&appearance, false);
        assert_eq!(uniforms.width, 2.0);
        assert_eq!(uniforms.cull_backfacing, 1);
        assert_eq!(uniforms.use_segment_color, 0);
    }
}
