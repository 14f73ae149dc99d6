//! Camera and view management.

use geoglobe_core::Bounds;
use glam::{Mat4, Quat, Vec3};

/// Fraction of the far distance the near plane may shrink to.
const NEAR_CLIPPING_TOLERANCE: f32 = 0.001;

/// A perspective camera orbiting a focal point.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Focal point the camera is looking at.
    pub target: Vec3,
    /// View-up vector.
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect_ratio: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl Camera {
    /// Creates a camera with a 30 degree view angle.
    #[must_use]
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: 30f32.to_radians(),
            aspect_ratio,
            near: 0.01,
            far: 1000.0,
        }
    }

    /// Sets the aspect ratio.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Sets the field of view from degrees.
    pub fn set_fov_degrees(&mut self, degrees: f32) {
        self.fov = degrees.clamp(1.0, 179.0).to_radians();
    }

    /// Places the camera and re-orthogonalizes the view-up vector.
    pub fn set_view(&mut self, position: Vec3, target: Vec3, up: Vec3) {
        self.position = position;
        self.target = target;
        self.up = up;
        self.orthogonalize_view_up();
    }

    /// Returns the view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Returns the projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }

    /// Returns the combined view-projection matrix.
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Distance from the position to the focal point.
    #[must_use]
    pub fn distance(&self) -> f32 {
        (self.target - self.position).length()
    }

    /// Returns the camera's forward direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Returns the camera's right direction.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize_or_zero()
    }

    /// Makes `up` perpendicular to the view direction.
    pub fn orthogonalize_view_up(&mut self) {
        let forward = self.forward();
        let right = forward.cross(self.up);
        if right.length_squared() > f32::EPSILON {
            self.up = right.cross(forward).normalize();
        }
    }

    /// Orbits the position around the focal point.
    ///
    /// `azimuth` turns about the view-up vector and `elevation` about the
    /// right vector, both in degrees.
    pub fn rotate(&mut self, azimuth: f32, elevation: f32) {
        let offset = self.position - self.target;
        let yaw = Quat::from_axis_angle(self.up.normalize_or_zero(), azimuth.to_radians());
        let offset = yaw * offset;

        let right = offset.cross(self.up).normalize_or_zero();
        let pitch = if right == Vec3::ZERO {
            Quat::IDENTITY
        } else {
            Quat::from_axis_angle(right, elevation.to_radians())
        };

        self.up = pitch * self.up;
        self.position = self.target + pitch * offset;
        self.orthogonalize_view_up();
    }

    /// Translates position and focal point in the view plane, in world units.
    pub fn pan(&mut self, delta_right: f32, delta_up: f32) {
        let offset = self.right() * delta_right + self.up * delta_up;
        self.position += offset;
        self.target += offset;
    }

    /// Moves toward the focal point by `factor`; values above 1 move closer.
    pub fn dolly(&mut self, factor: f32) {
        if factor <= 0.0 {
            return;
        }
        let distance = self.distance() / factor;
        self.position = self.target - self.forward() * distance;
    }

    /// Fits the near and far planes around `bounds`.
    pub fn reset_clipping_range(&mut self, bounds: &Bounds) {
        let forward = self.forward();
        let corners = [
            Vec3::new(bounds.min.x, bounds.min.y, bounds.min.z),
            Vec3::new(bounds.max.x, bounds.min.y, bounds.min.z),
            Vec3::new(bounds.min.x, bounds.max.y, bounds.min.z),
            Vec3::new(bounds.max.x, bounds.max.y, bounds.min.z),
            Vec3::new(bounds.min.x, bounds.min.y, bounds.max.z),
            Vec3::new(bounds.max.x, bounds.min.y, bounds.max.z),
            Vec3::new(bounds.min.x, bounds.max.y, bounds.max.z),
            Vec3::new(bounds.max.x, bounds.max.y, bounds.max.z),
        ];
        let (near, far) = corners.iter().fold((f32::MAX, f32::MIN), |(lo, hi), c| {
            let depth = (*c - self.position).dot(forward);
            (lo.min(depth), hi.max(depth))
        });

        // Pad the range so geometry on the bounds is not clipped.
        let far = (far * 1.01).max(f32::EPSILON);
        let near = (near * 0.99).max(far * NEAR_CLIPPING_TOLERANCE);
        self.near = near;
        self.far = far.max(near * 1.01);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(4.0 / 3.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{a} != {b}");
    }

    fn globe_camera() -> Camera {
        let mut camera = Camera::new(1.0);
        camera.set_view(Vec3::new(0.0, 8.0, 0.0), Vec3::ZERO, Vec3::Z);
        camera
    }

    #[test]
    fn test_default_view_angle() {
        let camera = Camera::default();
        assert!((camera.fov.to_degrees() - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_azimuth_orbits_about_up() {
        let mut camera = globe_camera();
        camera.rotate(90.0, 0.0);
        assert!((camera.distance() - 8.0).abs() < 1e-4);
        assert!(camera.position.z.abs() < 1e-4);
        assert_close(camera.up, Vec3::Z);
    }

    #[test]
    fn test_elevation_tilts_up_vector() {
        let mut camera = globe_camera();
        camera.rotate(0.0, 45.0);
        assert!((camera.distance() - 8.0).abs() < 1e-4);
        assert!(camera.position.z > 0.0);
        assert!(camera.up.dot(camera.forward()).abs() < 1e-4);
    }

    #[test]
    fn test_dolly() {
        let mut camera = globe_camera();
        camera.dolly(2.0);
        assert!((camera.distance() - 4.0).abs() < 1e-4);
        camera.dolly(0.0);
        assert!((camera.distance() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_pan_moves_focal_point() {
        let mut camera = globe_camera();
        camera.pan(1.0, 0.0);
        assert_close(camera.target - camera.position, Vec3::new(0.0, -8.0, 0.0));
        assert!(camera.target.length() > 0.9);
    }

    #[test]
    fn test_reset_clipping_range() {
        let mut camera = globe_camera();
        camera.reset_clipping_range(&Bounds::new(Vec3::splat(-1.0), Vec3::splat(1.0)));
        assert!(camera.near > 0.0 && camera.near <= 7.0);
        assert!(camera.far >= 9.0);
        assert!(camera.near < camera.far);
    }

    #[test]
    fn test_clipping_range_when_inside_bounds() {
        let mut camera = Camera::new(1.0);
        camera.set_view(Vec3::ZERO, Vec3::Z, Vec3::Y);
        camera.reset_clipping_range(&Bounds::new(Vec3::splat(-1.0), Vec3::splat(1.0)));
        assert!(camera.near > 0.0);
        assert!(camera.near < camera.far);
    }
}
