//! Core data model for geoglobe.
//!
//! This crate provides the types the viewer builds its scene from:
//! - [`geo`] spherical-earth transform between long/lat/alt and world space
//! - [`Table`] and [`Categories`] for delimited text input
//! - [`ColorSeries`] and [`LookupTable`] for mapping scalars to colors
//! - [`Actor`] and [`Scene`], the renderable scene graph
//! - [`Options`], the serializable configuration

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
// Geometry code converts between index and float types constantly
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]

pub mod actor;
pub mod category;
pub mod error;
pub mod geo;
pub mod geometry;
pub mod legend;
pub mod lookup_table;
pub mod options;
pub mod scene;
pub mod shapes;
pub mod table;

pub use actor::{Actor, Appearance, Geometry, PointStyle, TextureData};
pub use category::Categories;
pub use error::{GlobeError, Result};
pub use geo::{GeoSphereTransform, EARTH_RADIUS_METERS};
pub use geometry::{Bounds, DataArray, PointSet, PolylineSet, TriangleMesh};
pub use legend::{Legend, LegendEntry};
pub use lookup_table::{ColorSeries, LookupTable};
pub use options::Options;
pub use scene::Scene;
pub use shapes::BorderFeature;
pub use table::Table;

// Re-export glam types for convenience
pub use glam::{DVec2, DVec3, Vec2, Vec3, Vec4};
