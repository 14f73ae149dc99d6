//! geoglobe: a globe viewer for loan and lender locations.
//!
//! The viewer wraps an earth sphere with country borders read from a
//! shapefile and shows loan and lender locations read from CSV files as
//! points floating above the surface, their height scaled by value.
//!
//! # Quick Start
//!
//! ```no_run
//! use geoglobe::*;
//!
//! fn main() -> Result<()> {
//!     let mut options = Options::default();
//!     options.data_dir = "data".into();
//!
//!     let scene = build_scene(&options)?;
//!     show(scene, options)
//! }
//! ```
//!
//! # Layers
//!
//! - [`create_globe`] - textured earth sphere
//! - [`load_country_borders`] - shapefile outlines as polylines
//! - [`load_loans`] - loan points colored by sector, with a legend
//! - [`load_lenders`] - lender points
//!
//! Every layer is an [`Actor`] registered into a [`Scene`]; registration
//! order is draw order.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

mod app;
pub mod callbacks;
pub mod cli;
pub mod headless;
pub mod layers;

// Re-export core types
pub use geoglobe_core::{
    Actor, Appearance, Bounds, Categories, ColorSeries, Geometry, GlobeError, Legend, LegendEntry, LookupTable,
    Options, PointSet, PointStyle, PolylineSet, Result, Scene, Table, TriangleMesh, Vec3, Vec4,
    EARTH_RADIUS_METERS,
};

// Re-export render types
pub use geoglobe_render::{Camera, RenderEngine};

pub use app::App;
pub use callbacks::{reset_camera_to_globe, ObserverId, Observers, ViewerEvent};
pub use headless::{render_to_file, render_to_image, render_to_png};
pub use layers::{build_scene, create_globe, load_country_borders, load_lenders, load_loans};

/// Initializes logging with an `info` default filter.
///
/// Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();
}

/// Shows the viewer window for `scene`.
///
/// Blocks until the window is closed.
pub fn show(scene: Scene, options: Options) -> Result<()> {
    init_logging();
    app::run(scene, options)
}
