//! Spherical-earth transform between geographic and world coordinates.
//!
//! World space is earth-centered with meters as the unit. Longitude 0 and
//! latitude 0 lie on the `+Y` axis and the north pole on `+Z`.

use glam::{DVec3, Vec3};

/// Mean earth radius used by the globe, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_356_750.0;

/// Converts longitude/latitude in degrees and altitude in meters to a
/// world-space position on a sphere of radius [`EARTH_RADIUS_METERS`].
pub fn long_lat_alt_to_rect(lon_deg: f64, lat_deg: f64, alt: f64) -> DVec3 {
    long_lat_alt_to_rect_with_radius(lon_deg, lat_deg, alt, EARTH_RADIUS_METERS)
}

fn long_lat_alt_to_rect_with_radius(lon_deg: f64, lat_deg: f64, alt: f64, radius: f64) -> DVec3 {
    let theta = lon_deg.to_radians();
    let phi = lat_deg.to_radians();
    let cos_phi = phi.cos();
    let r = radius + alt;
    DVec3::new(
        -theta.sin() * cos_phi * r,
        theta.cos() * cos_phi * r,
        phi.sin() * r,
    )
}

/// Inverse of [`long_lat_alt_to_rect`].
///
/// Returns `(lon_deg, lat_deg, alt)`. The origin has no direction and maps
/// to `(0, 0, -EARTH_RADIUS_METERS)`.
pub fn rect_to_long_lat_alt(p: DVec3) -> (f64, f64, f64) {
    rect_to_long_lat_alt_with_radius(p, EARTH_RADIUS_METERS)
}

fn rect_to_long_lat_alt_with_radius(p: DVec3, radius: f64) -> (f64, f64, f64) {
    let r = p.length();
    if r == 0.0 {
        return (0.0, 0.0, -radius);
    }
    let lat = (p.z / r).clamp(-1.0, 1.0).asin().to_degrees();
    let lon = (-p.x).atan2(p.y).to_degrees();
    (lon, lat, r - radius)
}

/// Batch transform from `(lon, lat, alt)` triples to world positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoSphereTransform {
    /// Sphere radius in meters.
    pub radius: f64,
    /// Altitude added to every input point.
    pub base_altitude: f64,
}

impl Default for GeoSphereTransform {
    fn default() -> Self {
        Self {
            radius: EARTH_RADIUS_METERS,
            base_altitude: 0.0,
        }
    }
}

impl GeoSphereTransform {
    /// Creates a transform for a sphere of the given radius.
    pub fn with_radius(radius: f64) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    /// Transforms a single `(lon, lat, alt)` triple.
    pub fn transform_point(&self, lla: DVec3) -> DVec3 {
        long_lat_alt_to_rect_with_radius(lla.x, lla.y, lla.z + self.base_altitude, self.radius)
    }

    /// Maps a world position back to `(lon, lat, alt)`.
    pub fn inverse_transform_point(&self, p: DVec3) -> DVec3 {
        let (lon, lat, alt) = rect_to_long_lat_alt_with_radius(p, self.radius);
        DVec3::new(lon, lat, alt - self.base_altitude)
    }

    /// Transforms many triples into single-precision world positions.
    pub fn transform_points(&self, llas: &[DVec3]) -> Vec<Vec3> {
        llas.iter()
            .map(|lla| self.transform_point(*lla).as_vec3())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_close(a: DVec3, b: DVec3) {
        assert!((a - b).length() < 1e-6 * EARTH_RADIUS_METERS, "{a} != {b}");
    }

    #[test]
    fn test_prime_meridian_equator_is_plus_y() {
        let p = long_lat_alt_to_rect(0.0, 0.0, 0.0);
        assert_close(p, DVec3::new(0.0, EARTH_RADIUS_METERS, 0.0));
    }

    #[test]
    fn test_north_pole_is_plus_z() {
        let p = long_lat_alt_to_rect(42.0, 90.0, 0.0);
        assert_close(p, DVec3::new(0.0, 0.0, EARTH_RADIUS_METERS));
    }

    #[test]
    fn test_east_longitude_is_minus_x() {
        let p = long_lat_alt_to_rect(90.0, 0.0, 0.0);
        assert_close(p, DVec3::new(-EARTH_RADIUS_METERS, 0.0, 0.0));
    }

    #[test]
    fn test_altitude_extends_radius() {
        let p = long_lat_alt_to_rect(10.0, 20.0, 1000.0);
        assert!((p.length() - (EARTH_RADIUS_METERS + 1000.0)).abs() < 1e-3);
    }

    #[test]
    fn test_origin_inverse() {
        let (lon, lat, alt) = rect_to_long_lat_alt(DVec3::ZERO);
        assert_eq!((lon, lat), (0.0, 0.0));
        assert_eq!(alt, -EARTH_RADIUS_METERS);
    }

    #[test]
    fn test_base_altitude_applies() {
        let t = GeoSphereTransform {
            base_altitude: 500.0,
            ..GeoSphereTransform::default()
        };
        let p = t.transform_point(DVec3::new(0.0, 0.0, 0.0));
        assert!((p.y - (EARTH_RADIUS_METERS + 500.0)).abs() < 1e-6);
        let back = t.inverse_transform_point(p);
        assert!(back.z.abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_round_trip(
            lon in -179.9f64..180.0,
            lat in -89.9f64..89.9,
            alt in -1.0e5f64..1.0e7,
        ) {
            let (lon2, lat2, alt2) = rect_to_long_lat_alt(long_lat_alt_to_rect(lon, lat, alt));
            prop_assert!((lon - lon2).abs() < 1e-7);
            prop_assert!((lat - lat2).abs() < 1e-7);
            prop_assert!((alt - alt2).abs() < 1e-4);
        }
    }
}
