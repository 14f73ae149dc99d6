//! Color series and lookup tables.

use glam::{Vec3, Vec4};

use crate::error::{GlobeError, Result};

/// A named, ordered list of colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSeries {
    /// Scheme name.
    pub name: String,
    /// Colors in series order.
    pub colors: Vec<Vec3>,
}

/// Built-in qualitative schemes as (name, hex colors).
const BUILTIN_SCHEMES: &[(&str, &[u32])] = &[
    (
        "Brewer Qualitative Set3",
        &[
            0x8dd3c7, 0xffffb3, 0xbebada, 0xfb8072, 0x80b1d3, 0xfdb462, 0xb3de69, 0xfccde5,
            0xd9d9d9, 0xbc80bd, 0xccebc5, 0xffed6f,
        ],
    ),
    (
        "Brewer Qualitative Set1",
        &[
            0xe41a1c, 0x377eb8, 0x4daf4a, 0x984ea3, 0xff7f00, 0xffff33, 0xa65628, 0xf781bf,
            0x999999,
        ],
    ),
    (
        "Brewer Qualitative Set2",
        &[
            0x66c2a5, 0xfc8d62, 0x8da0cb, 0xe78ac3, 0xa6d854, 0xffd92f, 0xe5c494, 0xb3b3b3,
        ],
    ),
    (
        "Brewer Qualitative Pastel1",
        &[
            0xfbb4ae, 0xb3cde3, 0xccebc5, 0xdecbe4, 0xfed9a6, 0xffffcc, 0xe5d8bd, 0xfddaec,
            0xf2f2f2,
        ],
    ),
    (
        "Brewer Qualitative Pastel2",
        &[
            0xb3e2cd, 0xfdcdac, 0xcbd5e8, 0xf4cae4, 0xe6f5c9, 0xfff2ae, 0xf1e2cc, 0xcccccc,
        ],
    ),
    (
        "Brewer Qualitative Dark2",
        &[
            0x1b9e77, 0xd95f02, 0x7570b3, 0xe7298a, 0x66a61e, 0xe6ab02, 0xa6761d, 0x666666,
        ],
    ),
    (
        "Brewer Qualitative Accent",
        &[
            0x7fc97f, 0xbeaed4, 0xfdc086, 0xffff99, 0x386cb0, 0xf0027f, 0xbf5b17, 0x666666,
        ],
    ),
    (
        "Brewer Qualitative Paired",
        &[
            0xa6cee3, 0x1f78b4, 0xb2df8a, 0x33a02c, 0xfb9a99, 0xe31a1c, 0xfdbf6f, 0xff7f00,
            0xcab2d6, 0x6a3d9a, 0xffff99, 0xb15928,
        ],
    ),
];

fn hex_to_rgb(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

impl ColorSeries {
    /// Creates a series from explicit colors.
    pub fn new(name: impl Into<String>, colors: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            colors,
        }
    }

    /// Looks up a built-in scheme by name.
    pub fn by_name(name: &str) -> Result<Self> {
        BUILTIN_SCHEMES
            .iter()
            .find(|(scheme, _)| *scheme == name)
            .map(|(scheme, hexes)| Self::new(*scheme, hexes.iter().copied().map(hex_to_rgb).collect()))
            .ok_or_else(|| GlobeError::UnknownColorScheme(name.to_string()))
    }

    /// Returns the names of all built-in schemes.
    pub fn scheme_names() -> impl Iterator<Item = &'static str> {
        BUILTIN_SCHEMES.iter().map(|(name, _)| *name)
    }

    /// Returns the number of colors in the series.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if the series has no colors.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Builds an indexed lookup table whose entry `i` is color `i` of the series.
    pub fn build_lookup_table(&self) -> LookupTable {
        let colors: Vec<Vec4> = self.colors.iter().map(|c| c.extend(1.0)).collect();
        let max = self.colors.len().saturating_sub(1) as f64;
        LookupTable {
            colors,
            range: (0.0, max),
            indexed: true,
            annotations: Vec::new(),
            nan_color: Vec4::new(0.5, 0.0, 0.0, 1.0),
        }
    }
}

/// Maps scalar values to RGBA colors.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable {
    colors: Vec<Vec4>,
    range: (f64, f64),
    indexed: bool,
    annotations: Vec<(f64, String)>,
    nan_color: Vec4,
}

impl LookupTable {
    /// Builds a linear table by interpolating in HSV space.
    ///
    /// `hue`, `saturation` and `value` are `(start, end)` pairs in `[0, 1]`.
    pub fn hsv_ramp(
        range: (f64, f64),
        hue: (f32, f32),
        saturation: (f32, f32),
        value: (f32, f32),
        number_of_colors: usize,
    ) -> Self {
        let n = number_of_colors.max(1);
        let denom = (n.max(2) - 1) as f32;
        let colors = (0..n)
            .map(|i| {
                let t = i as f32 / denom;
                let h = hue.0 + t * (hue.1 - hue.0);
                let s = saturation.0 + t * (saturation.1 - saturation.0);
                let v = value.0 + t * (value.1 - value.0);
                hsv_to_rgb(h, s, v).extend(1.0)
            })
            .collect();
        Self {
            colors,
            range,
            indexed: false,
            annotations: Vec::new(),
            nan_color: Vec4::new(0.5, 0.0, 0.0, 1.0),
        }
    }

    /// Returns the table colors.
    pub fn colors(&self) -> &[Vec4] {
        &self.colors
    }

    /// Returns the number of colors.
    pub fn num_colors(&self) -> usize {
        self.colors.len()
    }

    /// Returns the scalar range covered by the table.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Sets the scalar range covered by a linear table.
    pub fn set_range(&mut self, min: f64, max: f64) {
        self.range = (min, max);
    }

    /// Returns whether values are looked up by index rather than by range.
    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// Sets the color used for NaN values.
    pub fn set_nan_color(&mut self, color: Vec4) {
        self.nan_color = color;
    }

    /// Labels a scalar value. An existing label for the same value is replaced.
    pub fn set_annotation(&mut self, value: f64, label: impl Into<String>) {
        let label = label.into();
        if let Some(entry) = self.annotations.iter_mut().find(|(v, _)| *v == value) {
            entry.1 = label;
        } else {
            self.annotations.push((value, label));
        }
    }

    /// Returns annotations in insertion order.
    pub fn annotations(&self) -> &[(f64, String)] {
        &self.annotations
    }

    /// Returns the table color at `index`, wrapping around.
    pub fn color(&self, index: usize) -> Vec4 {
        if self.colors.is_empty() {
            return self.nan_color;
        }
        self.colors[index % self.colors.len()]
    }

    /// Maps a scalar value to a color.
    pub fn map_value(&self, value: f64) -> Vec4 {
        if value.is_nan() || self.colors.is_empty() {
            return self.nan_color;
        }

        let n = self.colors.len();
        if self.indexed {
            let index = (value.round() as i64).rem_euclid(n as i64) as usize;
            return self.colors[index];
        }

        let (min, max) = self.range;
        if max <= min {
            return if value < min { self.colors[0] } else { self.colors[n - 1] };
        }
        let t = ((value - min) / (max - min)).clamp(0.0, 1.0);
        let index = ((t * n as f64).floor() as usize).min(n - 1);
        self.colors[index]
    }

    /// Maps many values at once.
    pub fn map_values(&self, values: &[f64]) -> Vec<Vec4> {
        values.iter().map(|&v| self.map_value(v)).collect()
    }
}

/// Converts HSV in `[0, 1]` to RGB.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Vec3 {
    let h = h.rem_euclid(1.0) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector as u32 {
        0 => Vec3::new(v, t, p),
        1 => Vec3::new(q, v, p),
        2 => Vec3::new(p, v, t),
        3 => Vec3::new(p, q, v),
        4 => Vec3::new(t, p, v),
        _ => Vec3::new(v, p, q),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set3_has_twelve_colors() {
        let series = ColorSeries::by_name("Brewer Qualitative Set3").unwrap();
        assert_eq!(series.len(), 12);
        let first = series.colors[0];
        assert!((first - Vec3::new(141.0, 211.0, 199.0) / 255.0).length() < 1e-6);
    }

    #[test]
    fn test_unknown_scheme() {
        assert!(matches!(
            ColorSeries::by_name("Nope"),
            Err(GlobeError::UnknownColorScheme(_))
        ));
        assert!(ColorSeries::scheme_names().any(|n| n == "Brewer Qualitative Paired"));
    }

    #[test]
    fn test_indexed_lookup_wraps() {
        let lut = ColorSeries::by_name("Brewer Qualitative Dark2")
            .unwrap()
            .build_lookup_table();
        assert!(lut.is_indexed());
        assert_eq!(lut.map_value(0.0), lut.color(0));
        assert_eq!(lut.map_value(8.0), lut.color(0));
        assert_eq!(lut.map_value(2.4), lut.color(2));
        assert_eq!(lut.map_value(-1.0), lut.color(7));
    }

    #[test]
    fn test_linear_lookup_buckets() {
        let lut = LookupTable::hsv_ramp((1.0, 8.0), (0.9, 0.9), (0.0, 0.7), (0.8, 1.0), 8);
        assert_eq!(lut.num_colors(), 8);
        assert_eq!(lut.map_value(1.0), lut.color(0));
        assert_eq!(lut.map_value(8.0), lut.color(7));
        assert_eq!(lut.map_value(100.0), lut.color(7));
        assert_eq!(lut.map_value(-3.0), lut.color(0));
        // First entry has zero saturation, so it is a gray at value 0.8.
        let c = lut.color(0);
        assert!((c.x - 0.8).abs() < 1e-6 && (c.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_nan_color() {
        let mut lut = ColorSeries::by_name("Brewer Qualitative Set1")
            .unwrap()
            .build_lookup_table();
        lut.set_nan_color(Vec4::ZERO);
        assert_eq!(lut.map_value(f64::NAN), Vec4::ZERO);
    }

    #[test]
    fn test_annotations_replace() {
        let mut lut = ColorSeries::by_name("Brewer Qualitative Set3")
            .unwrap()
            .build_lookup_table();
        lut.set_annotation(0.0, "Food");
        lut.set_annotation(1.0, "Retail");
        lut.set_annotation(0.0, "Agriculture");
        assert_eq!(lut.annotations().len(), 2);
        assert_eq!(lut.annotations()[0].1, "Agriculture");
    }

    #[test]
    fn test_hsv_primaries() {
        assert!((hsv_to_rgb(0.0, 1.0, 1.0) - Vec3::X).length() < 1e-6);
        assert!((hsv_to_rgb(1.0 / 3.0, 1.0, 1.0) - Vec3::Y).length() < 1e-5);
        assert!((hsv_to_rgb(0.5, 0.0, 0.25) - Vec3::splat(0.25)).length() < 1e-6);
    }
}
