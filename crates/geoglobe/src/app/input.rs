use std::sync::Arc;

use pollster::FutureExt;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{Key, KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use geoglobe_core::GlobeError;
use geoglobe_render::RenderEngine;
use geoglobe_ui::EguiIntegration;

use super::{App, DOLLY_BASE, ROTATE_DEGREES_PER_WINDOW, WHEEL_DOLLY_STEPS};
use crate::callbacks::ViewerEvent;

impl App {
    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), GlobeError> {
        let window_attributes = Window::default_attributes()
            .with_title(self.options.window.title.as_str())
            .with_inner_size(LogicalSize::new(self.options.window.width, self.options.window.height));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .map_err(|e| GlobeError::Render(format!("failed to create window: {e}")))?,
        );

        let mut engine = RenderEngine::new_windowed(window.clone())
            .block_on()
            .map_err(|e| GlobeError::Render(format!("failed to create render engine: {e}")))?;
        engine.camera.set_fov_degrees(self.options.camera.fov_degrees);

        let egui = EguiIntegration::new(&engine.device, engine.color_format(), &window);

        self.window = Some(window);
        self.engine = Some(engine);
        self.egui = Some(egui);

        // Home view on startup
        self.fire(ViewerEvent::ResetCamera);
        Ok(())
    }

    fn handle_key(&mut self, key: &Key, code: Option<KeyCode>) {
        if code == Some(KeyCode::F12) {
            self.request_auto_screenshot();
            log::info!("screenshot requested (F12)");
            return;
        }
        if code == Some(KeyCode::Escape) {
            self.close_requested = true;
            return;
        }

        let Key::Character(c) = key else {
            return;
        };
        match c.as_str() {
            "r" | "R" => self.fire(ViewerEvent::ResetCamera),
            "l" | "L" => {
                self.show_legend = !self.show_legend;
                log::debug!("legend {}", if self.show_legend { "shown" } else { "hidden" });
            }
            "q" | "Q" => self.close_requested = true,
            _ => {}
        }
    }

    fn handle_drag(&mut self, delta_x: f64, delta_y: f64) {
        let Some(engine) = &mut self.engine else {
            return;
        };
        let (width, height) = engine.dimensions();
        let (width, height) = (f64::from(width.max(1)), f64::from(height.max(1)));

        let pan = self.middle_mouse_down || (self.left_mouse_down && self.shift_down);
        if pan {
            // World units per pixel at the focal point
            let scale = 2.0 * engine.camera.distance() * (engine.camera.fov * 0.5).tan() / height as f32;
            engine
                .camera
                .pan(-delta_x as f32 * scale, delta_y as f32 * scale);
        } else if self.left_mouse_down {
            let azimuth = -delta_x * ROTATE_DEGREES_PER_WINDOW / width;
            let elevation = delta_y * ROTATE_DEGREES_PER_WINDOW / height;
            engine.camera.rotate(azimuth as f32, elevation as f32);
        } else if self.right_mouse_down {
            let steps = (-delta_y * 20.0 / height) as f32;
            engine.camera.dolly(DOLLY_BASE.powf(steps));
        } else {
            return;
        }
        self.reset_clipping_range();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_window(event_loop) {
            log::error!("{e}");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = *state == ElementState::Pressed;
                match button {
                    MouseButton::Left => self.left_mouse_down = pressed,
                    MouseButton::Right => self.right_mouse_down = pressed,
                    MouseButton::Middle => self.middle_mouse_down = pressed,
                    _ => {}
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift_down = modifiers.state().shift_key();
            }
            _ => {}
        }

        let egui_consumed = match (&mut self.egui, &self.window) {
            (Some(egui), Some(window)) => egui.handle_event(window, &event),
            _ => false,
        };
        let egui_wants_pointer = self.egui.as_ref().is_some_and(EguiIntegration::wants_pointer);
        let egui_wants_keyboard = self.egui.as_ref().is_some_and(EguiIntegration::wants_keyboard);

        match event {
            WindowEvent::CloseRequested => {
                self.close_requested = true;
            }
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let delta_x = position.x - self.mouse_pos.0;
                let delta_y = position.y - self.mouse_pos.1;
                self.mouse_pos = (position.x, position.y);
                if !egui_wants_pointer {
                    self.handle_drag(delta_x, delta_y);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if egui_consumed || egui_wants_pointer {
                    return;
                }
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.02,
                };
                if let Some(engine) = &mut self.engine {
                    engine.camera.dolly(DOLLY_BASE.powf(notches * WHEEL_DOLLY_STEPS));
                }
                self.reset_clipping_range();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || egui_wants_keyboard {
                    return;
                }
                let code = match event.physical_key {
                    PhysicalKey::Code(code) => Some(code),
                    PhysicalKey::Unidentified(_) => None,
                };
                self.handle_key(&event.logical_key, code);
            }
            _ => {}
        }

        if self.finish_close_request() {
            event_loop.exit();
        }
    }
}
