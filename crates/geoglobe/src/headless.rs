//! Headless rendering.
//!
//! Renders a scene to an image buffer or file without opening a window,
//! for batch screenshots and integration tests.

use std::path::Path;

use pollster::FutureExt;

use geoglobe_core::{GlobeError, Options, Result, Scene, EARTH_RADIUS_METERS};
use geoglobe_render::RenderEngine;

use crate::callbacks::{scene_bounds_or_globe, Observers, ViewerEvent};

/// Renders one frame of `scene` from the home view.
///
/// Returns `width * height * 4` bytes of RGBA, row by row from the top left.
pub fn render_to_image(scene: &Scene, options: &Options, width: u32, height: u32) -> Result<Vec<u8>> {
    let mut engine = RenderEngine::new_headless(width, height)
        .block_on()
        .map_err(|e| GlobeError::Render(format!("failed to create headless engine: {e}")))?;
    engine.camera.set_fov_degrees(options.camera.fov_degrees);

    let bounds = scene_bounds_or_globe(scene);
    let mut observers = Observers::with_globe_reset(EARTH_RADIUS_METERS as f32, options.camera.distance_factor);
    observers.invoke(ViewerEvent::ResetCamera, &mut engine.camera, &bounds);

    engine
        .capture_frame(scene)
        .map_err(|e| GlobeError::Render(e.to_string()))
}

/// Renders one frame and encodes it as PNG in memory.
pub fn render_to_png(scene: &Scene, options: &Options, width: u32, height: u32) -> Result<Vec<u8>> {
    let pixels = render_to_image(scene, options, width, height)?;
    geoglobe_render::save_to_buffer(&pixels, width, height)
        .map_err(|e| GlobeError::Render(format!("failed to encode PNG: {e}")))
}

/// Renders one frame and saves it as PNG or JPEG, by extension.
pub fn render_to_file(
    scene: &Scene,
    options: &Options,
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
) -> Result<()> {
    let path = path.as_ref();
    let pixels = render_to_image(scene, options, width, height)?;
    geoglobe_render::save_image(path, &pixels, width, height)
        .map_err(|e| GlobeError::Render(format!("failed to save {}: {e}", path.display())))
}
