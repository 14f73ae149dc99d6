//! Geometry containers: triangle meshes, polylines and point sets.

use glam::{DVec3, Vec2, Vec3};

use crate::error::{GlobeError, Result};
use crate::geo::GeoSphereTransform;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Computes the bounds of a point list, or `None` if it is empty.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        Some(points.iter().fold(Self::new(first, first), |b, p| Self {
            min: b.min.min(*p),
            max: b.max.max(*p),
        }))
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Radius of the sphere circumscribing the box.
    pub fn radius(&self) -> f32 {
        (self.max - self.min).length() * 0.5
    }
}

/// An indexed triangle mesh with per-vertex normals and texture coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tex_coords: Vec<Vec2>,
    pub triangles: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Builds a latitude/longitude sphere centered at the origin.
    ///
    /// Vertex `(i, j)` sits at longitude `-180 + 360 i / theta` and latitude
    /// `90 - 180 j / phi`, so texture coordinates `(i / theta, j / phi)` line
    /// up with an equirectangular image whose top row is the north pole.
    /// Triangles wind counter-clockwise seen from outside.
    pub fn textured_sphere(radius: f64, theta_resolution: u32, phi_resolution: u32) -> Self {
        let theta = theta_resolution.max(3);
        let phi = phi_resolution.max(3);
        let transform = GeoSphereTransform::with_radius(radius);

        let num_vertices = ((theta + 1) * (phi + 1)) as usize;
        let mut positions = Vec::with_capacity(num_vertices);
        let mut normals = Vec::with_capacity(num_vertices);
        let mut tex_coords = Vec::with_capacity(num_vertices);

        for i in 0..=theta {
            let u = f64::from(i) / f64::from(theta);
            let lon = -180.0 + 360.0 * u;
            for j in 0..=phi {
                let v = f64::from(j) / f64::from(phi);
                let lat = 90.0 - 180.0 * v;
                let p = transform.transform_point(DVec3::new(lon, lat, 0.0));
                positions.push(p.as_vec3());
                normals.push(p.normalize_or_zero().as_vec3());
                tex_coords.push(Vec2::new(u as f32, v as f32));
            }
        }

        let stride = phi + 1;
        let index = |i: u32, j: u32| i * stride + j;
        let mut triangles = Vec::with_capacity((2 * theta * phi) as usize);
        for i in 0..theta {
            for j in 0..phi {
                triangles.push([index(i, j), index(i, j + 1), index(i + 1, j + 1)]);
                triangles.push([index(i, j), index(i + 1, j + 1), index(i + 1, j)]);
            }
        }

        Self {
            positions,
            normals,
            tex_coords,
            triangles,
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.positions)
    }
}

/// Polylines sharing one point list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolylineSet {
    pub points: Vec<Vec3>,
    /// Each polyline is a list of indices into `points`.
    pub polylines: Vec<Vec<u32>>,
    /// Optional scalar per polyline.
    pub scalars: Option<Vec<f64>>,
}

impl PolylineSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a polyline made of new points.
    pub fn push_polyline(&mut self, points: impl IntoIterator<Item = Vec3>) {
        let start = self.points.len() as u32;
        self.points.extend(points);
        let end = self.points.len() as u32;
        self.polylines.push((start..end).collect());
    }

    /// Sets the per-polyline scalars.
    pub fn set_scalars(&mut self, scalars: Vec<f64>) -> Result<()> {
        if scalars.len() != self.polylines.len() {
            return Err(GlobeError::SizeMismatch {
                expected: self.polylines.len(),
                actual: scalars.len(),
            });
        }
        self.scalars = Some(scalars);
        Ok(())
    }

    pub fn num_polylines(&self) -> usize {
        self.polylines.len()
    }

    /// Yields every segment as `(polyline index, start point, end point)`.
    pub fn segments(&self) -> impl Iterator<Item = (usize, u32, u32)> + '_ {
        self.polylines
            .iter()
            .enumerate()
            .flat_map(|(line, indices)| indices.windows(2).map(move |w| (line, w[0], w[1])))
    }

    pub fn num_segments(&self) -> usize {
        self.polylines
            .iter()
            .map(|p| p.len().saturating_sub(1))
            .sum()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.points)
    }
}

/// A named array of scalars, one per point.
#[derive(Debug, Clone, PartialEq)]
pub struct DataArray {
    pub name: String,
    pub values: Vec<f64>,
}

/// Points with attached data arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    pub points: Vec<Vec3>,
    arrays: Vec<DataArray>,
    active_scalars: Option<String>,
}

impl PointSet {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Attaches an array. An array with the same name is replaced.
    pub fn add_array(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        if values.len() != self.points.len() {
            return Err(GlobeError::SizeMismatch {
                expected: self.points.len(),
                actual: values.len(),
            });
        }
        let name = name.into();
        self.arrays.retain(|a| a.name != name);
        self.arrays.push(DataArray { name, values });
        Ok(())
    }

    pub fn array(&self, name: &str) -> Option<&DataArray> {
        self.arrays.iter().find(|a| a.name == name)
    }

    pub fn arrays(&self) -> &[DataArray] {
        &self.arrays
    }

    /// Marks an existing array as the active scalars.
    pub fn set_active_scalars(&mut self, name: &str) -> Result<()> {
        if self.array(name).is_none() {
            return Err(GlobeError::MissingColumn {
                table: String::from("point data"),
                column: name.to_string(),
            });
        }
        self.active_scalars = Some(name.to_string());
        Ok(())
    }

    pub fn active_scalars(&self) -> Option<&DataArray> {
        self.active_scalars.as_deref().and_then(|n| self.array(n))
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.points)
    }
}
