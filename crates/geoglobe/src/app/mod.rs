//! Application window and event loop management.

mod input;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use winit::event_loop::EventLoop;
use winit::window::Window;

use geoglobe_core::{GlobeError, Options, Result, Scene, EARTH_RADIUS_METERS};
use geoglobe_render::{Camera, RenderEngine};
use geoglobe_ui::EguiIntegration;

use crate::callbacks::{scene_bounds_or_globe, Observers, ViewerEvent};

/// Degrees of rotation for a drag across the whole window.
const ROTATE_DEGREES_PER_WINDOW: f64 = 200.0;
/// Dolly factor base; the exponent grows with drag distance.
const DOLLY_BASE: f32 = 1.1;
/// Dolly exponent for one wheel notch.
const WHEEL_DOLLY_STEPS: f32 = 2.0;

/// The interactive viewer state.
pub struct App {
    pub(super) options: Options,
    pub(super) scene: Scene,
    pub(super) observers: Observers,
    pub(super) window: Option<Arc<Window>>,
    pub(super) engine: Option<RenderEngine>,
    pub(super) egui: Option<EguiIntegration>,
    pub(super) show_legend: bool,
    pub(super) close_requested: bool,
    /// `Exit` observers have run.
    pub(super) exit_fired: bool,
    /// Set when window or GPU setup fails; returned from [`run`].
    pub(super) error: Option<GlobeError>,
    // Physical button state, tracked even when egui takes the event
    pub(super) mouse_pos: (f64, f64),
    pub(super) left_mouse_down: bool,
    pub(super) right_mouse_down: bool,
    pub(super) middle_mouse_down: bool,
    pub(super) shift_down: bool,
    pub(super) screenshot_pending: Option<PathBuf>,
    pub(super) screenshot_counter: u32,
}

impl App {
    /// Creates the viewer for a built scene.
    pub fn new(scene: Scene, options: Options) -> Self {
        let observers =
            Observers::with_globe_reset(EARTH_RADIUS_METERS as f32, options.camera.distance_factor);
        Self {
            show_legend: options.show_legend,
            options,
            scene,
            observers,
            window: None,
            engine: None,
            egui: None,
            close_requested: false,
            exit_fired: false,
            error: None,
            mouse_pos: (0.0, 0.0),
            left_mouse_down: false,
            right_mouse_down: false,
            middle_mouse_down: false,
            shift_down: false,
            screenshot_pending: None,
            screenshot_counter: 0,
        }
    }

    /// Observers attached to viewer events.
    pub fn observers_mut(&mut self) -> &mut Observers {
        &mut self.observers
    }

    /// Requests a screenshot with an auto-generated filename.
    pub fn request_auto_screenshot(&mut self) {
        let filename = format!("screenshot_{:04}.png", self.screenshot_counter);
        self.screenshot_counter += 1;
        self.screenshot_pending = Some(PathBuf::from(filename));
    }

    /// Runs the observers of `event` against the render camera.
    ///
    /// Before the window exists they get a detached camera.
    pub(super) fn fire(&mut self, event: ViewerEvent) {
        let bounds = scene_bounds_or_globe(&self.scene);
        match &mut self.engine {
            Some(engine) => self.observers.invoke(event, &mut engine.camera, &bounds),
            None => self.observers.invoke(event, &mut Camera::default(), &bounds),
        };
    }

    /// Fires [`ViewerEvent::Exit`] once a close has been requested.
    ///
    /// Events can still arrive before the loop stops, so the observers run
    /// only the first time. Returns whether the loop should exit.
    pub(super) fn finish_close_request(&mut self) -> bool {
        if !self.close_requested {
            return false;
        }
        if !self.exit_fired {
            self.exit_fired = true;
            self.fire(ViewerEvent::Exit);
        }
        true
    }

    /// Refits the clipping planes after the camera or scene changed.
    pub(super) fn reset_clipping_range(&mut self) {
        let bounds = scene_bounds_or_globe(&self.scene);
        if let Some(engine) = &mut self.engine {
            engine.camera.reset_clipping_range(&bounds);
        }
    }
}

/// Opens the viewer window and runs until it is closed.
///
/// Window and GPU setup failures are returned instead of panicking.
pub fn run(scene: Scene, options: Options) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|e| GlobeError::Render(format!("failed to create event loop: {e}")))?;
    let mut app = App::new(scene, options);

    event_loop
        .run_app(&mut app)
        .map_err(|e| GlobeError::Render(format!("event loop error: {e}")))?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_exit_fires_once() {
        let exits = Rc::new(Cell::new(0));
        let mut app = App::new(Scene::new(), Options::default());
        let counter = exits.clone();
        app.observers_mut()
            .add_observer(ViewerEvent::Exit, move |_, _| counter.set(counter.get() + 1));

        assert!(!app.finish_close_request());
        assert_eq!(exits.get(), 0);

        app.close_requested = true;
        assert!(app.finish_close_request());
        // Later events keep asking the loop to stop without refiring
        assert!(app.finish_close_request());
        assert!(app.finish_close_request());
        assert_eq!(exits.get(), 1);
    }

    #[test]
    fn test_auto_screenshot_names() {
        let mut app = App::new(Scene::new(), Options::default());
        app.request_auto_screenshot();
        assert_eq!(app.screenshot_pending, Some(PathBuf::from("screenshot_0000.png")));
        app.request_auto_screenshot();
        assert_eq!(app.screenshot_pending, Some(PathBuf::from("screenshot_0001.png")));
    }
}
