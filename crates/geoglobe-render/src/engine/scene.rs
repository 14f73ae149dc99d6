//! Uploading and drawing scene actors.

use geoglobe_core::{Actor, Geometry, Scene};

use super::RenderEngine;
use crate::error::{RenderError, RenderResult};
use crate::line_render::{LineRenderData, LineUniforms, build_segments};
use crate::mesh_render::{MeshRenderData, MeshUniforms};
use crate::point_render::{PointRenderData, PointUniforms};

/// GPU resources for one actor.
pub(crate) enum ActorRenderData {
    Mesh(MeshRenderData),
    Lines(LineRenderData),
    Points(PointRenderData),
}

impl ActorRenderData {
    fn new(engine: &RenderEngine, actor: &Actor) -> Self {
        let colors = actor.element_colors();
        match &actor.geometry {
            Geometry::Mesh(mesh) => Self::Mesh(MeshRenderData::new(
                &engine.device,
                &engine.queue,
                &engine.pipelines.mesh_layout,
                &engine.camera_buffer,
                mesh,
                actor.texture.as_ref(),
            )),
            Geometry::Polylines(lines) => {
                let segments = build_segments(lines, colors.as_deref());
                Self::Lines(LineRenderData::new(
                    &engine.device,
                    &engine.pipelines.line_layout,
                    &engine.camera_buffer,
                    &segments,
                ))
            }
            Geometry::Points(points) => Self::Points(PointRenderData::new(
                &engine.device,
                &engine.pipelines.point_layout,
                &engine.camera_buffer,
                &points.points,
                colors.as_deref(),
            )),
        }
    }

    fn update_uniforms(&self, queue: &wgpu::Queue, actor: &Actor) {
        let colored = actor.scalar_visibility && actor.lookup_table.is_some();
        match self {
            Self::Mesh(data) => {
                data.update_uniforms(queue, &MeshUniforms::from_appearance(&actor.appearance, data.textured));
            }
            Self::Lines(data) => {
                data.update_uniforms(queue, &LineUniforms::from_appearance(&actor.appearance, colored));
            }
            Self::Points(data) => {
                data.update_uniforms(queue, &PointUniforms::from_appearance(&actor.appearance, colored));
            }
        }
    }
}

impl RenderEngine {
    /// Uploads new actors, drops data of removed ones and refreshes uniforms.
    pub fn prepare_scene(&mut self, scene: &Scene) {
        self.actor_data.retain(|name, _| scene.contains(name));

        for actor in scene.iter() {
            if !self.actor_data.contains_key(actor.name()) {
                log::debug!("uploading {} actor '{}'", actor.geometry.kind(), actor.name());
                let data = ActorRenderData::new(self, actor);
                self.actor_data.insert(actor.name().to_string(), data);
            }
            if let Some(data) = self.actor_data.get(actor.name()) {
                data.update_uniforms(&self.queue, actor);
            }
        }

        self.update_camera_uniforms();
    }

    /// Drops the GPU data of an actor so it is re-uploaded on the next frame.
    pub fn invalidate(&mut self, name: &str) {
        self.actor_data.remove(name);
    }

    /// Number of actors with GPU data.
    pub fn num_uploaded(&self) -> usize {
        self.actor_data.len()
    }

    /// Records the scene pass into `view`.
    ///
    /// Enabled opaque actors are drawn first in registration order, then
    /// translucent ones.
    pub fn encode_scene(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView, scene: &Scene) {
        let bg = scene.background;
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: f64::from(bg.x),
                        g: f64::from(bg.y),
                        b: f64::from(bg.z),
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        for translucent in [false, true] {
            for actor in scene.iter() {
                if !actor.enabled || actor.appearance.is_translucent() != translucent {
                    continue;
                }
                let Some(data) = self.actor_data.get(actor.name()) else {
                    continue;
                };
                match data {
                    ActorRenderData::Mesh(mesh) => {
                        let pipeline = if actor.appearance.backface_culling {
                            &self.pipelines.mesh_culled
                        } else {
                            &self.pipelines.mesh
                        };
                        render_pass.set_pipeline(pipeline);
                        mesh.draw(&mut render_pass);
                    }
                    ActorRenderData::Lines(lines) => {
                        let pipeline = if translucent {
                            &self.pipelines.line_translucent
                        } else {
                            &self.pipelines.line
                        };
                        render_pass.set_pipeline(pipeline);
                        lines.draw(&mut render_pass);
                    }
                    ActorRenderData::Points(points) => {
                        render_pass.set_pipeline(&self.pipelines.point);
                        points.draw(&mut render_pass);
                    }
                }
            }
        }
    }

    /// Renders one frame to the window surface.
    ///
    /// `overlay` records extra passes (the UI) after the scene, loading the
    /// scene's color output.
    pub fn render_frame<F>(&mut self, scene: &Scene, overlay: F) -> RenderResult<()>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        self.prepare_scene(scene);

        let Some(surface) = self.surface.as_ref() else {
            return Err(RenderError::NoSurface);
        };

        let output = match surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.resize(self.width, self.height);
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of memory");
                return Err(RenderError::OutOfMemory);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timeout");
                return Ok(());
            }
            Err(wgpu::SurfaceError::Other) => {
                log::warn!("surface error: other");
                return Ok(());
            }
        };

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame encoder"),
        });

        self.encode_scene(&mut encoder, &view, scene);
        overlay(&self.device, &self.queue, &mut encoder, &view);

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
