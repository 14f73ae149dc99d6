//! Legend box contents.

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::lookup_table::LookupTable;

/// One labeled color swatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Vec4,
}

/// A titled list of swatches shown over the scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub title: String,
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    /// Creates an empty legend.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    /// Builds one entry per annotation of `lut`, in annotation order.
    pub fn from_lookup_table(title: impl Into<String>, lut: &LookupTable) -> Self {
        let entries = lut
            .annotations()
            .iter()
            .map(|(value, label)| LegendEntry {
                label: label.clone(),
                color: lut.map_value(*value),
            })
            .collect();
        Self {
            title: title.into(),
            entries,
        }
    }

    /// Appends an entry.
    pub fn push(&mut self, label: impl Into<String>, color: Vec4) {
        self.entries.push(LegendEntry {
            label: label.into(),
            color,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup_table::ColorSeries;

    #[test]
    fn test_entries_follow_annotations() {
        let mut lut = ColorSeries::by_name("Brewer Qualitative Set3")
            .unwrap()
            .build_lookup_table();
        lut.set_annotation(1.0, "Food");
        lut.set_annotation(0.0, "Agriculture");

        let legend = Legend::from_lookup_table("Sector", &lut);
        assert_eq!(legend.title, "Sector");
        assert_eq!(legend.entries.len(), 2);
        assert_eq!(legend.entries[0].label, "Food");
        assert_eq!(legend.entries[0].color, lut.color(1));
        assert_eq!(legend.entries[1].color, lut.color(0));
    }

    #[test]
    fn test_empty_legend() {
        let mut legend = Legend::new("Empty");
        assert!(legend.is_empty());
        legend.push("Lenders", Vec4::new(0.9, 0.4, 0.4, 1.0));
        assert!(!legend.is_empty());
    }
}
