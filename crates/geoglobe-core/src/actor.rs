//! Renderable scene objects.

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::{GlobeError, Result};
use crate::geometry::{Bounds, PointSet, PolylineSet, TriangleMesh};
use crate::lookup_table::LookupTable;

/// How points are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PointStyle {
    /// Flat screen-aligned disks with smoothed edges.
    #[default]
    Sprite,
    /// Shaded sphere impostors with constant screen size.
    Sphere,
}

/// Material and display properties of an actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub color: Vec3,
    pub opacity: f32,
    /// Point diameter in pixels.
    pub point_size: f32,
    /// Line width in pixels.
    pub line_width: f32,
    pub point_style: PointStyle,
    /// Skip faces (and line segments) that face away from the camera.
    pub backface_culling: bool,
    /// Depth offset toward the camera, in normalized device units.
    pub z_shift: f32,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            opacity: 1.0,
            point_size: 4.0,
            line_width: 1.0,
            point_style: PointStyle::Sprite,
            backface_culling: false,
            z_shift: 0.0,
        }
    }
}

impl Appearance {
    /// Returns true if the actor needs blending.
    pub fn is_translucent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// Decoded RGBA8 image applied to a mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureData {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(GlobeError::SizeMismatch {
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self { width, height, rgba })
    }
}

/// Geometry held by an actor.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Mesh(TriangleMesh),
    Polylines(PolylineSet),
    Points(PointSet),
}

impl Geometry {
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Self::Mesh(mesh) => mesh.bounds(),
            Self::Polylines(lines) => lines.bounds(),
            Self::Points(points) => points.bounds(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Mesh(_) => "mesh",
            Self::Polylines(_) => "polylines",
            Self::Points(_) => "points",
        }
    }
}

/// A named piece of geometry with its appearance.
#[derive(Debug, Clone)]
pub struct Actor {
    name: String,
    pub geometry: Geometry,
    pub appearance: Appearance,
    pub lookup_table: Option<LookupTable>,
    /// Color by scalars through the lookup table instead of the flat color.
    pub scalar_visibility: bool,
    pub texture: Option<TextureData>,
    pub enabled: bool,
}

impl Actor {
    pub fn new(name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            name: name.into(),
            geometry,
            appearance: Appearance::default(),
            lookup_table: None,
            scalar_visibility: false,
            texture: None,
            enabled: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the lookup table and turns on scalar coloring.
    pub fn set_lookup_table(&mut self, lut: LookupTable) {
        self.lookup_table = Some(lut);
        self.scalar_visibility = true;
    }

    /// Per-element colors from scalars, if scalar coloring applies.
    ///
    /// Point sets yield one color per point, polyline sets one per polyline.
    pub fn element_colors(&self) -> Option<Vec<Vec4>> {
        if !self.scalar_visibility {
            return None;
        }
        let lut = self.lookup_table.as_ref()?;
        match &self.geometry {
            Geometry::Points(points) => Some(lut.map_values(&points.active_scalars()?.values)),
            Geometry::Polylines(lines) => Some(lut.map_values(lines.scalars.as_ref()?)),
            Geometry::Mesh(_) => None,
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.geometry.bounds()
    }
}
