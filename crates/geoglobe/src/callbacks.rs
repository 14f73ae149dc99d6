//! Viewer events and the observers attached to them.

use geoglobe_core::{Bounds, Scene, Vec3, EARTH_RADIUS_METERS};
use geoglobe_render::Camera;

/// Events the viewer reports to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerEvent {
    /// The camera was asked to return to its home view.
    ResetCamera,
    /// A layer was shown or hidden.
    LayerToggled,
    /// The viewer is about to close.
    Exit,
}

/// Handle returned by [`Observers::add_observer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

type Callback = Box<dyn FnMut(&mut Camera, &Bounds)>;

/// Callbacks keyed by event, run in the order they were added.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    entries: Vec<(ObserverId, ViewerEvent, Callback)>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observers with the globe reset attached to [`ViewerEvent::ResetCamera`].
    pub fn with_globe_reset(radius: f32, distance_factor: f32) -> Self {
        let mut observers = Self::new();
        observers.add_observer(ViewerEvent::ResetCamera, move |camera, bounds| {
            reset_camera_to_globe(camera, radius, distance_factor);
            camera.reset_clipping_range(bounds);
        });
        observers
    }

    pub fn add_observer(
        &mut self,
        event: ViewerEvent,
        callback: impl FnMut(&mut Camera, &Bounds) + 'static,
    ) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, event, Box::new(callback)));
        id
    }

    /// Removes an observer. Returns false if the id is unknown.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Runs every observer of `event`. Returns how many ran.
    pub fn invoke(&mut self, event: ViewerEvent, camera: &mut Camera, bounds: &Bounds) -> usize {
        let mut count = 0;
        for (_, entry_event, callback) in &mut self.entries {
            if *entry_event == event {
                callback(camera, bounds);
                count += 1;
            }
        }
        log::debug!("{event:?} ran {count} observers");
        count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Looks at the globe from above the equator at longitude 0.
///
/// Focal point at the origin, camera on +Y at `radius * distance_factor`,
/// view up +Z.
pub fn reset_camera_to_globe(camera: &mut Camera, radius: f32, distance_factor: f32) {
    camera.set_view(Vec3::new(0.0, radius * distance_factor, 0.0), Vec3::ZERO, Vec3::Z);
}

/// Bounds of the enabled actors, or the bare globe when nothing is shown.
pub fn scene_bounds_or_globe(scene: &Scene) -> Bounds {
    scene.bounds().unwrap_or_else(|| {
        let r = EARTH_RADIUS_METERS as f32;
        Bounds::new(Vec3::splat(-r), Vec3::splat(r))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn globe_bounds(radius: f32) -> Bounds {
        Bounds::new(Vec3::splat(-radius), Vec3::splat(radius))
    }

    #[test]
    fn test_reset_camera_to_globe() {
        let mut camera = Camera::default();
        camera.rotate(40.0, 20.0);
        reset_camera_to_globe(&mut camera, 2.0, 8.0);
        assert_eq!(camera.position, Vec3::new(0.0, 16.0, 0.0));
        assert_eq!(camera.target, Vec3::ZERO);
        assert!((camera.up - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_globe_reset_observer_sets_clipping() {
        let mut observers = Observers::with_globe_reset(1.0, 8.0);
        let mut camera = Camera::default();
        let ran = observers.invoke(ViewerEvent::ResetCamera, &mut camera, &globe_bounds(1.0));
        assert_eq!(ran, 1);
        assert_eq!(camera.position, Vec3::new(0.0, 8.0, 0.0));
        assert!(camera.near > 0.0 && camera.near < 7.0);
        assert!(camera.far > 9.0);
    }

    #[test]
    fn test_observers_filter_by_event_and_remove() {
        let calls = Rc::new(Cell::new(0));
        let mut observers = Observers::new();
        let counter = calls.clone();
        let id = observers.add_observer(ViewerEvent::LayerToggled, move |_, _| {
            counter.set(counter.get() + 1);
        });

        let mut camera = Camera::default();
        let bounds = globe_bounds(1.0);
        assert_eq!(observers.invoke(ViewerEvent::ResetCamera, &mut camera, &bounds), 0);
        assert_eq!(observers.invoke(ViewerEvent::LayerToggled, &mut camera, &bounds), 1);
        assert_eq!(calls.get(), 1);

        assert!(observers.remove_observer(id));
        assert!(!observers.remove_observer(id));
        assert!(observers.is_empty());
        assert_eq!(observers.invoke(ViewerEvent::LayerToggled, &mut camera, &bounds), 0);
    }

    #[test]
    fn test_empty_scene_bounds_cover_globe() {
        let bounds = scene_bounds_or_globe(&Scene::new());
        assert!((bounds.radius() - EARTH_RADIUS_METERS as f32 * 3f32.sqrt()).abs() < 16.0);
    }
}
