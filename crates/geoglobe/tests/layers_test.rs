//! Scene construction from CSV fixtures and a shapefile written at test time.

use std::path::PathBuf;

use geoglobe::*;
use shapefile::dbase::{FieldName, FieldValue, Record, TableWriterBuilder};
use shapefile::{Point, Polygon, PolygonRing};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data")
}

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("geoglobe-layers-{}-{tag}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Writes two country outlines with a `mapcolor8` attribute.
fn write_countries(tag: &str) -> PathBuf {
    let path = temp_dir(tag).join("countries.shp");
    let builder =
        TableWriterBuilder::new().add_numeric_field(FieldName::try_from("mapcolor8").unwrap(), 10, 0);
    let mut writer = shapefile::Writer::from_path(&path, builder).unwrap();

    let square = Polygon::new(PolygonRing::Outer(vec![
        Point::new(0.0, 0.0),
        Point::new(0.0, 1.0),
        Point::new(1.0, 1.0),
        Point::new(1.0, 0.0),
        Point::new(0.0, 0.0),
    ]));
    let triangle = Polygon::new(PolygonRing::Outer(vec![
        Point::new(10.0, 10.0),
        Point::new(10.0, 20.0),
        Point::new(20.0, 10.0),
        Point::new(10.0, 10.0),
    ]));
    for (shape, color) in [(square, 3.0), (triangle, 5.0)] {
        let mut record = Record::default();
        record.insert(String::from("mapcolor8"), FieldValue::Numeric(Some(color)));
        writer.write_shape_and_record(&shape, &record).unwrap();
    }

    path
}

fn fixture_options(tag: &str) -> Options {
    let mut options = Options::default();
    options.data_dir = fixture_dir();
    options.borders.file = write_countries(tag);
    options.globe.theta_resolution = 12;
    options.globe.phi_resolution = 8;
    options
}

fn points(actor: &Actor) -> &PointSet {
    match &actor.geometry {
        Geometry::Points(points) => points,
        other => panic!("expected points, got {}", other.kind()),
    }
}

fn assert_altitude(p: Vec3, altitude: f32) {
    let expected = EARTH_RADIUS_METERS as f32 + altitude;
    assert!((p.length() - expected).abs() < 4.0, "|{p}| != {expected}");
}

#[test]
fn test_build_scene_layers_in_order() {
    let options = fixture_options("scene");
    let scene = build_scene(&options).unwrap();

    let names: Vec<&str> = scene.iter().map(Actor::name).collect();
    assert_eq!(names, vec!["globe", "borders", "loans", "lenders"]);
    assert_eq!(scene.background, Vec3::ZERO);

    let legend = scene.legend.as_ref().unwrap();
    assert_eq!(legend.title, "Loan sectors");
    let labels: Vec<&str> = legend.entries.iter().map(|e| e.label.as_str()).collect();
    // Sectors are numbered in the order they first appear in loans.csv
    assert_eq!(labels, vec!["Agriculture", "Retail", "Education", "Food"]);
}

#[test]
fn test_globe_sphere() {
    let options = fixture_options("globe");
    let globe = create_globe(&options).unwrap();

    let Geometry::Mesh(mesh) = &globe.geometry else {
        panic!("globe should be a mesh");
    };
    assert_eq!(mesh.num_vertices(), 13 * 9);
    assert_eq!(mesh.num_triangles(), 2 * 12 * 8);
    assert_eq!(globe.appearance.color, Vec3::splat(0.6));
    assert!(globe.texture.is_none());
    for p in &mesh.positions {
        assert_altitude(*p, 0.0);
    }
}

#[test]
fn test_globe_texture() {
    let dir = temp_dir("texture");
    let path = dir.join("earth.png");
    image::RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255]))
        .save(&path)
        .unwrap();

    let mut options = fixture_options("texture");
    options.globe.texture = Some(path);
    let globe = create_globe(&options).unwrap();

    let texture = globe.texture.as_ref().unwrap();
    assert_eq!((texture.width, texture.height), (4, 2));
    assert_eq!(&texture.rgba[..4], &[10, 20, 30, 255]);
}

#[test]
fn test_loans() {
    let options = fixture_options("loans");
    let (loans, legend) = load_loans(&options).unwrap();
    let set = points(&loans);

    // One of the six rows has an unparseable latitude
    assert_eq!(set.num_points(), 5);
    assert_eq!(set.array("LoanAmounts").unwrap().values, vec![1.25, 0.75, 2.0, 0.5, 1.5]);
    let active = set.active_scalars().unwrap();
    assert_eq!(active.name, "LoanCategory");
    assert_eq!(active.values, vec![0.0, 1.0, 2.0, 0.0, 3.0]);

    assert_altitude(set.points[0], 1250.0);
    assert_altitude(set.points[2], 2000.0);

    assert_eq!(loans.appearance.opacity, 0.02);
    assert_eq!(loans.appearance.point_size, 10.0);
    assert_eq!(loans.appearance.point_style, PointStyle::Sprite);
    assert!(loans.scalar_visibility);

    let lut = loans.lookup_table.as_ref().unwrap();
    assert!(lut.is_indexed());
    assert_eq!(legend.entries.len(), 4);
    assert_eq!(legend.entries[3].color, lut.map_value(3.0));

    // Same category, same color
    let colors = loans.element_colors().unwrap();
    assert_eq!(colors[0], colors[3]);
    assert_ne!(colors[0], colors[1]);
}

#[test]
fn test_lenders() {
    let options = fixture_options("lenders");
    let lenders = load_lenders(&options).unwrap();
    let set = points(&lenders);

    // The Paris row has no value
    assert_eq!(set.num_points(), 3);
    assert_eq!(set.array("LenderValues").unwrap().values, vec![3.0, 1.0, 2.0]);
    assert_altitude(set.points[0], 15_000.0);
    assert_eq!(lenders.appearance.color, Vec3::new(0.9, 0.4, 0.4));
    assert!(lenders.element_colors().is_none());

    // San Francisco is in the western and northern hemispheres
    let sf = set.points[0];
    assert!(sf.x > 0.0 && sf.z > 0.0);
}

#[test]
fn test_country_borders() {
    let options = fixture_options("borders");
    let borders = load_country_borders(&options).unwrap();

    let Geometry::Polylines(lines) = &borders.geometry else {
        panic!("borders should be polylines");
    };
    assert_eq!(lines.num_polylines(), 2);
    assert_eq!(lines.num_segments(), 4 + 3);
    assert!(lines.scalars.is_none());
    for p in &lines.points {
        assert_altitude(*p, 0.0);
    }

    assert_eq!(borders.appearance.line_width, 2.0);
    assert_eq!(borders.appearance.color, Vec3::splat(0.8));
    assert!(borders.appearance.backface_culling);
    assert_eq!(borders.appearance.z_shift, 0.001);
    assert!(!borders.scalar_visibility);
}

#[test]
fn test_country_borders_colored_by_attribute() {
    let mut options = fixture_options("borders-colored");
    options.borders.color_field = Some(String::from("mapcolor8"));
    let borders = load_country_borders(&options).unwrap();

    let Geometry::Polylines(lines) = &borders.geometry else {
        panic!("borders should be polylines");
    };
    assert_eq!(lines.scalars, Some(vec![3.0, 5.0]));

    let lut = borders.lookup_table.as_ref().unwrap();
    assert_eq!(lut.range(), (1.0, 8.0));
    assert_eq!(lut.num_colors(), 8);
    let colors = borders.element_colors().unwrap();
    assert_eq!(colors.len(), 2);
    assert_ne!(colors[0], colors[1]);
}

#[test]
fn test_country_borders_custom_ramp() {
    let mut options = fixture_options("borders-ramp");
    options.borders.color_field = Some(String::from("mapcolor8"));
    options.borders.color_ramp.range = (0.0, 10.0);
    options.borders.color_ramp.number_of_colors = 4;
    let borders = load_country_borders(&options).unwrap();

    let lut = borders.lookup_table.as_ref().unwrap();
    assert_eq!(lut.range(), (0.0, 10.0));
    assert_eq!(lut.num_colors(), 4);
}

#[test]
fn test_empty_point_files() {
    let dir = temp_dir("empty");
    std::fs::write(dir.join("loans.csv"), "").unwrap();
    std::fs::write(dir.join("lenders.csv"), "").unwrap();
    let mut options = fixture_options("empty");
    options.data_dir = dir;

    let (loans, legend) = load_loans(&options).unwrap();
    assert_eq!(points(&loans).num_points(), 0);
    assert!(legend.entries.is_empty());
    assert_eq!(points(&load_lenders(&options).unwrap()).num_points(), 0);

    let scene = build_scene(&options).unwrap();
    let names: Vec<&str> = scene.iter().map(Actor::name).collect();
    assert_eq!(names, vec!["globe", "borders", "loans", "lenders"]);
    assert!(scene.legend.as_ref().unwrap().entries.is_empty());
}

#[test]
fn test_missing_layer_is_an_error() {
    let mut options = fixture_options("missing");
    options.loans.file = PathBuf::from("no-such-loans.csv");

    let err = build_scene(&options).unwrap_err();
    assert!(matches!(err, GlobeError::MissingInput(_)));
}

#[test]
fn test_missing_layer_skipped() {
    let mut options = fixture_options("skipped");
    options.loans.file = PathBuf::from("no-such-loans.csv");
    options.skip_missing_layers = true;

    let scene = build_scene(&options).unwrap();
    let names: Vec<&str> = scene.iter().map(Actor::name).collect();
    assert_eq!(names, vec!["globe", "borders", "lenders"]);
    assert!(scene.legend.is_none());
}

#[test]
fn test_disabled_layers() {
    let mut options = fixture_options("disabled");
    options.borders.enabled = false;
    options.lenders.enabled = false;

    let scene = build_scene(&options).unwrap();
    assert_eq!(scene.len(), 2);
    assert!(scene.contains("loans"));
}
