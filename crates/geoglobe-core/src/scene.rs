//! Scene registry.

use glam::Vec3;

use crate::actor::Actor;
use crate::error::{GlobeError, Result};
use crate::geometry::Bounds;
use crate::legend::Legend;

/// Ordered collection of named actors.
///
/// Registration order is draw order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    actors: Vec<Actor>,
    /// Legend drawn over the scene, if any.
    pub legend: Option<Legend>,
    /// Clear color.
    pub background: Vec3,
}

impl Scene {
    /// Creates an empty scene with a black background.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an actor.
    ///
    /// Returns an error if an actor with the same name already exists.
    pub fn register(&mut self, actor: Actor) -> Result<()> {
        if self.contains(actor.name()) {
            return Err(GlobeError::ActorExists(actor.name().to_string()));
        }
        log::debug!("registered {} actor '{}'", actor.geometry.kind(), actor.name());
        self.actors.push(actor);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Actor> {
        self.actors.iter().find(|a| a.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|a| a.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Removes an actor by name, keeping the order of the others.
    pub fn remove(&mut self, name: &str) -> Option<Actor> {
        let index = self.actors.iter().position(|a| a.name() == name)?;
        Some(self.actors.remove(index))
    }

    /// Flips the enabled flag of an actor and returns the new state.
    pub fn toggle(&mut self, name: &str) -> Result<bool> {
        let actor = self
            .get_mut(name)
            .ok_or_else(|| GlobeError::ActorNotFound(name.to_string()))?;
        actor.enabled = !actor.enabled;
        Ok(actor.enabled)
    }

    pub fn clear(&mut self) {
        self.actors.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Bounds of all enabled actors, or `None` if nothing is visible.
    pub fn bounds(&self) -> Option<Bounds> {
        self.actors
            .iter()
            .filter(|a| a.enabled)
            .filter_map(Actor::bounds)
            .reduce(|a, b| a.union(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Geometry;
    use crate::geometry::PointSet;

    fn points(name: &str, p: Vec3) -> Actor {
        Actor::new(name, Geometry::Points(PointSet::new(vec![p])))
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut scene = Scene::new();
        scene.register(points("a", Vec3::ZERO)).unwrap();
        let err = scene.register(points("a", Vec3::X)).unwrap_err();
        assert!(matches!(err, GlobeError::ActorExists(name) if name == "a"));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_order_is_registration_order() {
        let mut scene = Scene::new();
        for name in ["globe", "borders", "loans", "lenders"] {
            scene.register(points(name, Vec3::ZERO)).unwrap();
        }
        scene.remove("borders").unwrap();
        let names: Vec<_> = scene.iter().map(Actor::name).collect();
        assert_eq!(names, ["globe", "loans", "lenders"]);
        assert!(scene.remove("borders").is_none());
    }

    #[test]
    fn test_bounds_skip_disabled() {
        let mut scene = Scene::new();
        assert!(scene.bounds().is_none());
        scene.register(points("a", Vec3::ZERO)).unwrap();
        scene.register(points("b", Vec3::splat(10.0))).unwrap();
        assert_eq!(scene.bounds().unwrap().max, Vec3::splat(10.0));

        assert!(!scene.toggle("b").unwrap());
        assert_eq!(scene.bounds().unwrap().max, Vec3::ZERO);
        assert!(matches!(scene.toggle("zzz"), Err(GlobeError::ActorNotFound(_))));
    }

    #[test]
    fn test_clear() {
        let mut scene = Scene::new();
        scene.register(points("a", Vec3::ZERO)).unwrap();
        scene.get_mut("a").unwrap().appearance.opacity = 0.5;
        assert_eq!(scene.get("a").unwrap().appearance.opacity, 0.5);
        scene.clear();
        assert!(scene.is_empty());
        assert_eq!(scene.background, Vec3::ZERO);
    }
}
