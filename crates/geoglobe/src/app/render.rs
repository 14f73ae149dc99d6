use geoglobe_render::{save_image, RenderError};
use geoglobe_ui::{build_layer_panel, build_legend, screen_descriptor, PanelResponse};

use super::App;
use crate::callbacks::ViewerEvent;

impl App {
    /// Renders a single frame: scene, then the UI on top.
    pub(super) fn render(&mut self) {
        self.take_screenshot();

        let (Some(engine), Some(egui), Some(window)) = (&mut self.engine, &mut self.egui, &self.window) else {
            return;
        };

        let scene = &mut self.scene;
        let show_legend = &mut self.show_legend;
        let mut response = PanelResponse::default();
        let output = egui.run(window, |ctx| {
            response = build_layer_panel(ctx, scene, show_legend);
            if *show_legend {
                if let Some(legend) = &scene.legend {
                    build_legend(ctx, legend);
                }
            }
        });

        let screen = screen_descriptor(window, engine.width, engine.height);
        let result = engine.render_frame(&self.scene, |device, queue, encoder, view| {
            egui.paint(device, queue, encoder, view, &screen, output);
        });
        match result {
            Ok(()) => {}
            Err(RenderError::OutOfMemory) => self.close_requested = true,
            Err(e) => log::warn!("frame skipped: {e}"),
        }

        if response.reset_camera {
            self.fire(ViewerEvent::ResetCamera);
        }
        if !response.toggled.is_empty() {
            log::debug!("toggled layers: {}", response.toggled.join(", "));
            self.fire(ViewerEvent::LayerToggled);
            self.reset_clipping_range();
        }
    }

    /// Captures and saves a pending screenshot.
    fn take_screenshot(&mut self) {
        let Some(path) = self.screenshot_pending.take() else {
            return;
        };
        let Some(engine) = &mut self.engine else {
            return;
        };
        let (width, height) = engine.dimensions();
        let saved = engine
            .capture_frame(&self.scene)
            .and_then(|pixels| save_image(&path, &pixels, width, height).map_err(RenderError::from));
        if let Err(e) = saved {
            log::error!("failed to save screenshot {}: {e}", path.display());
        }
    }
}
