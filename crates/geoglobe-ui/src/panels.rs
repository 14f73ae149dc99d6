//! UI panel builders.

use egui::{Align2, CollapsingHeader, Color32, Context, Sense, SidePanel, Slider, Ui, Window};
use geoglobe_core::{Legend, Scene, Vec4};

/// What the user asked for in the layer panel this frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelResponse {
    /// The reset-camera button was clicked.
    pub reset_camera: bool,
    /// Names of actors whose visibility changed.
    pub toggled: Vec<String>,
}

/// Converts a color in `[0, 1]` to an egui color.
pub fn to_color32(color: Vec4) -> Color32 {
    let c = (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round();
    Color32::from_rgba_unmultiplied(c.x as u8, c.y as u8, c.z as u8, c.w as u8)
}

/// Builds the left layer panel: per-actor visibility and opacity.
pub fn build_layer_panel(ctx: &Context, scene: &mut Scene, show_legend: &mut bool) -> PanelResponse {
    let mut response = PanelResponse::default();

    SidePanel::left("geoglobe_layer_panel")
        .default_width(240.0)
        .resizable(true)
        .show(ctx, |ui| {
            ui.heading("geoglobe");
            ui.separator();

            if ui.button("Reset camera").clicked() {
                response.reset_camera = true;
            }
            ui.checkbox(show_legend, "Show legend");
            ui.separator();

            build_layers_section(ui, scene, &mut response);
        });

    response
}

fn build_layers_section(ui: &mut Ui, scene: &mut Scene, response: &mut PanelResponse) {
    CollapsingHeader::new("Layers")
        .default_open(true)
        .show(ui, |ui| {
            if scene.is_empty() {
                ui.label("No layers loaded");
                return;
            }

            for actor in scene.iter_mut() {
                let name = actor.name().to_string();
                ui.horizontal(|ui| {
                    if ui.checkbox(&mut actor.enabled, "").changed() {
                        response.toggled.push(name.clone());
                    }
                    ui.label(name.as_str());
                    ui.weak(actor.geometry.kind());
                });
                // Opacity reaches the GPU with the next frame's uniforms
                ui.add_enabled_ui(actor.enabled, |ui| {
                    ui.add(Slider::new(&mut actor.appearance.opacity, 0.0..=1.0).text("opacity"));
                });
            }
        });
}

/// Draws the legend box in the lower right corner.
pub fn build_legend(ctx: &Context, legend: &Legend) {
    if legend.is_empty() {
        return;
    }

    Window::new(legend.title.as_str())
        .id(egui::Id::new("geoglobe_legend"))
        .anchor(Align2::RIGHT_BOTTOM, [-10.0, -10.0])
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            for entry in &legend.entries {
                ui.horizontal(|ui| {
                    let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), Sense::hover());
                    ui.painter()
                        .rect_filled(rect, 2.0, to_color32(entry.color.truncate().extend(1.0)));
                    ui.label(entry.label.as_str());
                });
            }
        });
}
