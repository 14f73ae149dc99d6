//! Reading border outlines from shapefiles.

use std::path::Path;

use glam::DVec2;
use shapefile::dbase::{FieldValue, Record};
use shapefile::Shape;

use crate::error::{GlobeError, Result};

/// One shapefile record as lon/lat outlines.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderFeature {
    /// Polygon rings and polyline parts, in degrees (`x` = lon, `y` = lat).
    pub parts: Vec<Vec<DVec2>>,
    /// Value of the requested numeric attribute, if any.
    pub attribute: Option<f64>,
}

/// Reads every polygon and polyline of a shapefile.
///
/// When `attribute` is given the companion `.dbf` is read as well and the
/// named numeric field is attached to each feature. Point shapes are ignored.
pub fn read_border_features(path: impl AsRef<Path>, attribute: Option<&str>) -> Result<Vec<BorderFeature>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(GlobeError::MissingInput(path.to_path_buf()));
    }

    let features: Vec<BorderFeature> = match attribute {
        None => shapefile::read_shapes(path)?
            .iter()
            .filter_map(|shape| shape_parts(shape).map(|parts| BorderFeature { parts, attribute: None }))
            .collect(),
        Some(field) => shapefile::read(path)?
            .iter()
            .filter_map(|(shape, record)| {
                shape_parts(shape).map(|parts| BorderFeature {
                    parts,
                    attribute: numeric_field(record, field),
                })
            })
            .collect(),
    };

    log::debug!("read {} border features from {}", features.len(), path.display());
    Ok(features)
}

fn shape_parts(shape: &Shape) -> Option<Vec<Vec<DVec2>>> {
    let parts = match shape {
        Shape::Polygon(polygon) => polygon
            .rings()
            .iter()
            .map(|ring| ring.points().iter().map(|p| DVec2::new(p.x, p.y)).collect())
            .collect(),
        Shape::PolygonM(polygon) => polygon
            .rings()
            .iter()
            .map(|ring| ring.points().iter().map(|p| DVec2::new(p.x, p.y)).collect())
            .collect(),
        Shape::PolygonZ(polygon) => polygon
            .rings()
            .iter()
            .map(|ring| ring.points().iter().map(|p| DVec2::new(p.x, p.y)).collect())
            .collect(),
        Shape::Polyline(line) => line
            .parts()
            .iter()
            .map(|part| part.iter().map(|p| DVec2::new(p.x, p.y)).collect())
            .collect(),
        Shape::PolylineM(line) => line
            .parts()
            .iter()
            .map(|part| part.iter().map(|p| DVec2::new(p.x, p.y)).collect())
            .collect(),
        Shape::PolylineZ(line) => line
            .parts()
            .iter()
            .map(|part| part.iter().map(|p| DVec2::new(p.x, p.y)).collect())
            .collect(),
        _ => return None,
    };
    Some(parts)
}

fn numeric_field(record: &Record, name: &str) -> Option<f64> {
    match record.get(name)? {
        FieldValue::Numeric(value) => *value,
        FieldValue::Float(value) => value.map(f64::from),
        FieldValue::Double(value) | FieldValue::Currency(value) => Some(*value),
        FieldValue::Integer(value) => Some(f64::from(*value)),
        FieldValue::Character(Some(text)) => text.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapefile::dbase::{FieldName, TableWriterBuilder};
    use shapefile::{Point, Polygon, PolygonRing, Polyline};

    fn temp_path(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("geoglobe-shapes-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_read_polylines() {
        let path = temp_path("lines.shp");
        let lines = vec![
            Polyline::new(vec![Point::new(0.0, 0.0), Point::new(10.0, 5.0)]),
            Polyline::with_parts(vec![
                vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)],
                vec![Point::new(3.0, 3.0), Point::new(4.0, 4.0), Point::new(5.0, 5.0)],
            ]),
        ];
        let writer = shapefile::ShapeWriter::from_path(&path).unwrap();
        writer.write_shapes(&lines).unwrap();

        let features = read_border_features(&path, None).unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].parts, vec![vec![DVec2::ZERO, DVec2::new(10.0, 5.0)]]);
        assert_eq!(features[1].parts.len(), 2);
        assert_eq!(features[1].parts[1].len(), 3);
        assert!(features.iter().all(|f| f.attribute.is_none()));
    }

    #[test]
    fn test_read_polygons_with_attribute() {
        let path = temp_path("countries.shp");
        let builder = TableWriterBuilder::new()
            .add_numeric_field(FieldName::try_from("mapcolor8").unwrap(), 10, 0);
        let mut writer = shapefile::Writer::from_path(&path, builder).unwrap();
        let square = Polygon::new(PolygonRing::Outer(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 0.0),
        ]));
        let mut record = Record::default();
        record.insert(String::from("mapcolor8"), FieldValue::Numeric(Some(3.0)));
        writer.write_shape_and_record(&square, &record).unwrap();
        drop(writer);

        let features = read_border_features(&path, Some("mapcolor8")).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].attribute, Some(3.0));
        assert_eq!(features[0].parts[0].len(), 5);

        let features = read_border_features(&path, Some("no_such_field")).unwrap();
        assert_eq!(features[0].attribute, None);
    }

    #[test]
    fn test_missing_shapefile() {
        let err = read_border_features("/nonexistent/countries.shp", None).unwrap_err();
        assert!(matches!(err, GlobeError::MissingInput(_)));
    }
}
