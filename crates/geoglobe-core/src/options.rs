//! Configuration options for geoglobe.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::actor::PointStyle;
use crate::error::Result;
use crate::lookup_table::LookupTable;

/// Viewer configuration.
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Directory that relative input file names are resolved against.
    pub data_dir: PathBuf,

    /// Skip a layer with a warning when its input file is missing.
    pub skip_missing_layers: bool,

    /// Clear color.
    pub background: Vec3,

    /// Whether the legend box starts visible.
    pub show_legend: bool,

    pub window: WindowOptions,
    pub camera: CameraOptions,
    pub globe: GlobeOptions,
    pub borders: BorderOptions,
    pub loans: PointLayerOptions,
    pub lenders: PointLayerOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            skip_missing_layers: false,
            background: Vec3::ZERO,
            show_legend: true,
            window: WindowOptions::default(),
            camera: CameraOptions::default(),
            globe: GlobeOptions::default(),
            borders: BorderOptions::default(),
            loans: PointLayerOptions::loans(),
            lenders: PointLayerOptions::lenders(),
        }
    }
}

impl Options {
    /// Parses options from JSON, filling unset values from the defaults.
    ///
    /// Nested objects are merged key by key, so `{"lenders": {"opacity": 0.5}}`
    /// keeps every other lender default.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut merged = serde_json::to_value(Self::default())?;
        let overrides: Value = serde_json::from_str(json)?;
        merge_json(&mut merged, overrides);
        Ok(serde_json::from_value(merged)?)
    }

    /// Reads options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let options = Self::from_json_str(&text)?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Serializes the options as pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolves a file name against [`Options::data_dir`].
    pub fn resolve(&self, file: impl AsRef<Path>) -> PathBuf {
        let file = file.as_ref();
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.data_dir.join(file)
        }
    }
}

fn merge_json(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: String::from("geoglobe"),
            width: 1280,
            height: 960,
        }
    }
}

/// Camera placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOptions {
    /// Camera distance on reset, in globe radii.
    pub distance_factor: f32,
    /// Vertical view angle in degrees.
    pub fov_degrees: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            distance_factor: 8.0,
            fov_degrees: 30.0,
        }
    }
}

/// The globe sphere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeOptions {
    pub theta_resolution: u32,
    pub phi_resolution: u32,
    pub color: Vec3,
    /// Equirectangular image wrapped around the globe.
    pub texture: Option<PathBuf>,
}

impl Default for GlobeOptions {
    fn default() -> Self {
        Self {
            theta_resolution: 100,
            phi_resolution: 100,
            color: Vec3::splat(0.6),
            texture: None,
        }
    }
}

/// The country border layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderOptions {
    pub enabled: bool,
    pub file: PathBuf,
    pub color: Vec3,
    pub line_width: f32,
    pub backface_culling: bool,
    pub z_shift: f32,
    /// Numeric attribute to color borders by, such as `mapcolor8`.
    pub color_field: Option<String>,
    /// Colors used when `color_field` is set.
    pub color_ramp: HsvRampOptions,
}

impl Default for BorderOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            file: PathBuf::from("countries.shp"),
            color: Vec3::splat(0.8),
            line_width: 2.0,
            backface_culling: true,
            z_shift: 0.001,
            color_field: None,
            color_ramp: HsvRampOptions::default(),
        }
    }
}

/// Parameters of an HSV lookup table ramp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HsvRampOptions {
    pub range: (f64, f64),
    pub hue: (f32, f32),
    pub saturation: (f32, f32),
    pub value: (f32, f32),
    pub number_of_colors: usize,
}

impl Default for HsvRampOptions {
    fn default() -> Self {
        Self {
            range: (1.0, 8.0),
            hue: (0.9, 0.9),
            saturation: (0.0, 0.7),
            value: (0.8, 1.0),
            number_of_colors: 8,
        }
    }
}

impl HsvRampOptions {
    pub fn build_lookup_table(&self) -> LookupTable {
        LookupTable::hsv_ramp(self.range, self.hue, self.saturation, self.value, self.number_of_colors)
    }
}

/// A point layer read from a headerless CSV file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointLayerOptions {
    pub enabled: bool,
    pub file: PathBuf,
    pub color: Vec3,
    pub opacity: f32,
    pub point_size: f32,
    pub point_style: PointStyle,
    /// Altitude in meters per unit of the value column.
    pub altitude_scale: f64,
    /// Color scheme for the category column, if the layer has one.
    pub color_scheme: Option<String>,
}

impl Default for PointLayerOptions {
    fn default() -> Self {
        Self::loans()
    }
}

impl PointLayerOptions {
    /// Defaults for the loan layer.
    pub fn loans() -> Self {
        Self {
            enabled: true,
            file: PathBuf::from("loans.csv"),
            color: Vec3::ONE,
            opacity: 0.02,
            point_size: 10.0,
            point_style: PointStyle::Sprite,
            altitude_scale: 1000.0,
            color_scheme: Some(String::from("Brewer Qualitative Set3")),
        }
    }

    /// Defaults for the lender layer.
    pub fn lenders() -> Self {
        Self {
            file: PathBuf::from("lenders.csv"),
            color: Vec3::new(0.9, 0.4, 0.4),
            altitude_scale: 5000.0,
            color_scheme: None,
            ..Self::loans()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.globe.theta_resolution, 100);
        assert_eq!(options.camera.distance_factor, 8.0);
        assert_eq!(options.borders.line_width, 2.0);
        assert_eq!(options.loans.altitude_scale, 1000.0);
        assert_eq!(options.lenders.altitude_scale, 5000.0);
        assert_eq!(options.background, Vec3::ZERO);
    }

    #[test]
    fn test_partial_json_keeps_layer_defaults() {
        let options = Options::from_json_str(
            r#"{ "data_dir": "/data", "lenders": { "opacity": 0.5 }, "window": { "width": 640 } }"#,
        )
        .unwrap();
        assert_eq!(options.data_dir, PathBuf::from("/data"));
        assert_eq!(options.lenders.opacity, 0.5);
        assert_eq!(options.lenders.altitude_scale, 5000.0);
        assert_eq!(options.lenders.file, PathBuf::from("lenders.csv"));
        assert_eq!(options.window.width, 640);
        assert_eq!(options.window.height, 960);
    }

    #[test]
    fn test_json_round_trip() {
        let mut options = Options::default();
        options.borders.color_field = Some(String::from("mapcolor8"));
        options.loans.point_style = PointStyle::Sphere;
        let json = options.to_json_string().unwrap();
        assert_eq!(Options::from_json_str(&json).unwrap(), options);
    }

    #[test]
    fn test_border_ramp_from_json() {
        let defaults = BorderOptions::default().color_ramp.build_lookup_table();
        assert_eq!(defaults.range(), (1.0, 8.0));
        assert_eq!(defaults.num_colors(), 8);

        let options = Options::from_json_str(
            r#"{ "borders": { "color_ramp": { "range": [0.0, 12.0], "number_of_colors": 12 } } }"#,
        )
        .unwrap();
        let ramp = &options.borders.color_ramp;
        assert_eq!(ramp.hue, (0.9, 0.9));
        let lut = ramp.build_lookup_table();
        assert_eq!(lut.range(), (0.0, 12.0));
        assert_eq!(lut.num_colors(), 12);
    }

    #[test]
    fn test_invalid_json() {
        assert!(Options::from_json_str("{ nope").is_err());
        assert!(Options::from_json_str(r#"{ "window": { "width": "wide" } }"#).is_err());
    }

    #[test]
    fn test_resolve() {
        let options = Options {
            data_dir: PathBuf::from("data"),
            ..Options::default()
        };
        assert_eq!(options.resolve("loans.csv"), PathBuf::from("data/loans.csv"));
        let absolute = std::env::temp_dir().join("x.csv");
        assert_eq!(options.resolve(&absolute), absolute);
    }
}
