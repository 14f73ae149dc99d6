//! Building the globe scene from input files.

use std::path::Path;

use geoglobe_core::shapes::read_border_features;
use geoglobe_core::table::Table;
use geoglobe_core::{
    Actor, Categories, ColorSeries, DVec3, GeoSphereTransform, Geometry, GlobeError, Legend,
    Options, PointSet, PolylineSet, Result, Scene, TextureData, TriangleMesh, EARTH_RADIUS_METERS,
};

/// Actor names, in draw order.
pub const GLOBE: &str = "globe";
pub const BORDERS: &str = "borders";
pub const LOANS: &str = "loans";
pub const LENDERS: &str = "lenders";

/// Title of the loan sector legend.
pub const LOAN_LEGEND_TITLE: &str = "Loan sectors";

/// Builds the textured earth sphere.
pub fn create_globe(options: &Options) -> Result<Actor> {
    let globe = &options.globe;
    let mesh = TriangleMesh::textured_sphere(EARTH_RADIUS_METERS, globe.theta_resolution, globe.phi_resolution);

    let mut actor = Actor::new(GLOBE, Geometry::Mesh(mesh));
    actor.appearance.color = globe.color;
    actor.appearance.backface_culling = true;

    if let Some(texture) = &globe.texture {
        actor.texture = Some(load_texture(&options.resolve(texture))?);
    }

    Ok(actor)
}

/// Decodes an image file into RGBA8 texture data.
pub fn load_texture(path: &Path) -> Result<TextureData> {
    if !path.exists() {
        return Err(GlobeError::MissingInput(path.to_path_buf()));
    }
    let image = image::open(path)
        .map_err(|e| GlobeError::Image(format!("{}: {e}", path.display())))?
        .to_rgba8();
    log::info!("loaded {}x{} globe texture from {}", image.width(), image.height(), path.display());
    TextureData::new(image.width(), image.height(), image.into_raw())
}

/// Reads country outlines and lifts them onto the globe surface.
///
/// Every polygon ring and polyline part becomes one polyline.
pub fn load_country_borders(options: &Options) -> Result<Actor> {
    let borders = &options.borders;
    let path = options.resolve(&borders.file);
    let features = read_border_features(&path, borders.color_field.as_deref())?;

    let transform = GeoSphereTransform::default();
    let mut lines = PolylineSet::new();
    let mut scalars = Vec::new();
    for feature in &features {
        for part in &feature.parts {
            let lla: Vec<DVec3> = part.iter().map(|p| p.extend(0.0)).collect();
            lines.push_polyline(transform.transform_points(&lla));
            scalars.push(feature.attribute.unwrap_or(f64::NAN));
        }
    }
    log::info!(
        "loaded {} border polylines ({} segments) from {}",
        lines.num_polylines(),
        lines.num_segments(),
        path.display()
    );

    let colored = borders.color_field.is_some();
    if colored {
        lines.set_scalars(scalars)?;
    }

    let mut actor = Actor::new(BORDERS, Geometry::Polylines(lines));
    actor.appearance.color = borders.color;
    actor.appearance.line_width = borders.line_width;
    actor.appearance.backface_culling = borders.backface_culling;
    actor.appearance.z_shift = borders.z_shift;
    if colored {
        actor.set_lookup_table(borders.color_ramp.build_lookup_table());
    }

    Ok(actor)
}

/// Rows of a headerless point file with parsed coordinates and value.
struct PointRows {
    points: Vec<DVec3>,
    values: Vec<f64>,
    /// Indices of the kept rows in the table.
    rows: Vec<usize>,
}

/// Reads `lat, lon, value` rows; rows that do not parse are dropped.
fn read_point_rows(table: &Table, altitude_scale: f64) -> Result<PointRows> {
    if table.num_rows() == 0 {
        log::warn!("{} has no rows", table.name());
        return Ok(PointRows {
            points: Vec::new(),
            values: Vec::new(),
            rows: Vec::new(),
        });
    }

    let lat = table.numeric_column(0)?;
    let lon = table.numeric_column(1)?;
    let value = table.numeric_column(2)?;

    let mut kept = PointRows {
        points: Vec::with_capacity(table.num_rows()),
        values: Vec::with_capacity(table.num_rows()),
        rows: Vec::with_capacity(table.num_rows()),
    };
    for row in 0..table.num_rows() {
        if let (Some(lat), Some(lon), Some(v)) = (lat[row], lon[row], value[row]) {
            kept.points.push(DVec3::new(lon, lat, v * altitude_scale));
            kept.values.push(v);
            kept.rows.push(row);
        }
    }

    let skipped = table.num_rows() - kept.rows.len();
    if skipped > 0 {
        log::warn!("skipped {skipped} unparseable rows in {}", table.name());
    }
    Ok(kept)
}

/// Reads loan locations colored by sector.
///
/// Columns: latitude, longitude, amount, sector. Returns the actor and a
/// legend with one entry per sector.
pub fn load_loans(options: &Options) -> Result<(Actor, Legend)> {
    let layer = &options.loans;
    let path = options.resolve(&layer.file);
    let table = Table::read_csv(&path, false)?;
    let rows = read_point_rows(&table, layer.altitude_scale)?;

    // An empty file has no columns at all
    let sectors: Vec<&str> = if rows.rows.is_empty() {
        Vec::new()
    } else {
        let sector_column = table.require_column(3)?;
        rows.rows.iter().map(|&r| sector_column[r].as_str()).collect()
    };
    let categories = Categories::from_values(&sectors);

    let mut points = PointSet::new(GeoSphereTransform::default().transform_points(&rows.points));
    points.add_array("LoanAmounts", rows.values)?;
    points.add_array("LoanCategory", categories.codes_as_scalars())?;
    points.set_active_scalars("LoanCategory")?;
    log::info!(
        "loaded {} loans in {} sectors from {}",
        points.num_points(),
        categories.num_categories(),
        path.display()
    );

    let scheme = layer.color_scheme.as_deref().unwrap_or("Brewer Qualitative Set3");
    let mut lut = ColorSeries::by_name(scheme)?.build_lookup_table();
    for (code, label) in categories.labels().iter().enumerate() {
        lut.set_annotation(code as f64, label.as_str());
    }
    let legend = Legend::from_lookup_table(LOAN_LEGEND_TITLE, &lut);

    let mut actor = Actor::new(LOANS, Geometry::Points(points));
    apply_point_layer(&mut actor, layer);
    actor.set_lookup_table(lut);

    Ok((actor, legend))
}

/// Reads lender locations.
///
/// Columns: latitude, longitude, value.
pub fn load_lenders(options: &Options) -> Result<Actor> {
    let layer = &options.lenders;
    let path = options.resolve(&layer.file);
    let table = Table::read_csv(&path, false)?;
    let rows = read_point_rows(&table, layer.altitude_scale)?;

    let mut points = PointSet::new(GeoSphereTransform::default().transform_points(&rows.points));
    points.add_array("LenderValues", rows.values)?;
    log::info!("loaded {} lenders from {}", points.num_points(), path.display());

    let mut actor = Actor::new(LENDERS, Geometry::Points(points));
    apply_point_layer(&mut actor, layer);

    Ok(actor)
}

fn apply_point_layer(actor: &mut Actor, layer: &geoglobe_core::options::PointLayerOptions) {
    actor.appearance.color = layer.color;
    actor.appearance.opacity = layer.opacity;
    actor.appearance.point_size = layer.point_size;
    actor.appearance.point_style = layer.point_style;
}

/// Turns a missing input into `None` when missing layers may be skipped.
fn skippable<T>(result: Result<T>, layer: &str, options: &Options) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(GlobeError::MissingInput(path)) if options.skip_missing_layers => {
            log::warn!("skipping {layer} layer: {} not found", path.display());
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Builds the whole scene: globe, borders, loans, lenders.
pub fn build_scene(options: &Options) -> Result<Scene> {
    let mut scene = Scene::new();
    scene.background = options.background;

    scene.register(create_globe(options)?)?;

    if options.borders.enabled {
        if let Some(borders) = skippable(load_country_borders(options), BORDERS, options)? {
            scene.register(borders)?;
        }
    }

    if options.loans.enabled {
        if let Some((loans, legend)) = skippable(load_loans(options), LOANS, options)? {
            scene.register(loans)?;
            scene.legend = Some(legend);
        }
    }

    if options.lenders.enabled {
        if let Some(lenders) = skippable(load_lenders(options), LENDERS, options)? {
            scene.register(lenders)?;
        }
    }

    log::info!("scene ready with {} actors", scene.len());
    Ok(scene)
}
