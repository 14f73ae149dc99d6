//! Rendering backend for geoglobe.
//!
//! This crate provides the wgpu-based rendering engine, including:
//! - GPU resource management (buffers, textures, pipelines)
//! - WGSL shaders for lit meshes, wide lines and screen-space points
//! - Camera and view management
//! - Frame capture for screenshots and headless rendering

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
// GPU code converts between index, pixel and float types constantly
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]

pub mod buffer;
pub mod camera;
pub mod engine;
pub mod error;
pub mod line_render;
pub mod mesh_render;
pub mod point_render;
pub mod screenshot;
pub mod texture;

pub use camera::Camera;
pub use engine::{CameraUniforms, RenderEngine};
pub use error::{RenderError, RenderResult};
pub use line_render::{LineRenderData, LineUniforms};
pub use mesh_render::{MeshRenderData, MeshUniforms};
pub use point_render::{PointRenderData, PointUniforms};
pub use screenshot::{save_image, save_to_buffer, ScreenshotError};
