//! Conversion of string columns into integer categories.

use std::collections::HashMap;

/// Integer codes for the distinct values of a string column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categories {
    codes: Vec<u32>,
    labels: Vec<String>,
}

impl Categories {
    /// Assigns a code to every distinct value.
    ///
    /// Codes count up in the order values are first seen, so the first row's
    /// value is always category 0.
    pub fn from_values<S: AsRef<str>>(values: &[S]) -> Self {
        let mut index: HashMap<&str, u32> = HashMap::new();
        let mut labels = Vec::new();
        let codes = values
            .iter()
            .map(|v| {
                let v = v.as_ref();
                *index.entry(v).or_insert_with(|| {
                    labels.push(v.to_string());
                    (labels.len() - 1) as u32
                })
            })
            .collect();

        Self { codes, labels }
    }

    /// Per-row category codes.
    pub fn codes(&self) -> &[u32] {
        &self.codes
    }

    /// Distinct labels ordered by code.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the label for a code.
    pub fn label(&self, code: u32) -> Option<&str> {
        self.labels.get(code as usize).map(String::as_str)
    }

    /// Returns the number of distinct categories.
    pub fn num_categories(&self) -> usize {
        self.labels.len()
    }

    /// Returns the codes as floating point scalars.
    pub fn codes_as_scalars(&self) -> Vec<f64> {
        self.codes.iter().map(|&c| f64::from(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_codes_follow_first_appearance() {
        let cats = Categories::from_values(&["Retail", "Agriculture", "Retail", "Food"]);
        assert_eq!(cats.labels(), ["Retail", "Agriculture", "Food"]);
        assert_eq!(cats.codes(), [0, 1, 0, 2]);
        assert_eq!(cats.label(1), Some("Agriculture"));
        assert_eq!(cats.label(3), None);
    }

    #[test]
    fn test_empty_values() {
        let cats = Categories::from_values::<&str>(&[]);
        assert_eq!(cats.num_categories(), 0);
        assert!(cats.codes().is_empty());
    }

    #[test]
    fn test_empty_string_is_a_category() {
        let cats = Categories::from_values(&["", "Food"]);
        assert_eq!(cats.labels(), ["", "Food"]);
        assert_eq!(cats.codes_as_scalars(), vec![0.0, 1.0]);
    }

    proptest! {
        #[test]
        fn prop_codes_index_labels(values in prop::collection::vec("[a-d]{0,2}", 0..40)) {
            let cats = Categories::from_values(&values);
            prop_assert_eq!(cats.codes().len(), values.len());
            for (value, &code) in values.iter().zip(cats.codes()) {
                prop_assert_eq!(cats.label(code), Some(value.as_str()));
            }
            // A new code is never more than one past the highest seen so far
            let mut next = 0;
            for &code in cats.codes() {
                prop_assert!(code <= next);
                if code == next {
                    next += 1;
                }
            }
            prop_assert_eq!(next as usize, cats.num_categories());
        }
    }
}
