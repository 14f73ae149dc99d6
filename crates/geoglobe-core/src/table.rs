//! Column-oriented table read from delimited text.

use std::io;
use std::path::Path;

use crate::error::{GlobeError, Result};

/// A table of string cells stored column by column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    name: String,
    column_names: Vec<String>,
    columns: Vec<Vec<String>>,
    num_rows: usize,
}

impl Table {
    /// Reads a CSV file.
    ///
    /// Without headers the columns are named `Field 0`, `Field 1`, ...
    pub fn read_csv(path: impl AsRef<Path>, has_headers: bool) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GlobeError::MissingInput(path.to_path_buf()));
        }
        let file = std::fs::File::open(path)?;
        let mut table = Self::from_reader(file, has_headers)?;
        table.name = path.display().to_string();
        log::debug!(
            "read {} rows x {} columns from {}",
            table.num_rows,
            table.num_columns(),
            path.display()
        );
        Ok(table)
    }

    /// Reads CSV data from any reader.
    pub fn from_reader<R: io::Read>(reader: R, has_headers: bool) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(has_headers)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut column_names: Vec<String> = if has_headers {
            csv_reader.headers()?.iter().map(str::to_string).collect()
        } else {
            Vec::new()
        };

        let mut columns: Vec<Vec<String>> = vec![Vec::new(); column_names.len()];
        let mut num_rows = 0;

        for record in csv_reader.records() {
            let record = record?;
            // Ragged input: grow the table and pad the earlier rows.
            while columns.len() < record.len() {
                columns.push(vec![String::new(); num_rows]);
            }
            for (i, column) in columns.iter_mut().enumerate() {
                column.push(record.get(i).unwrap_or_default().to_string());
            }
            num_rows += 1;
        }

        for i in column_names.len()..columns.len() {
            column_names.push(format!("Field {i}"));
        }

        Ok(Self {
            name: String::from("<reader>"),
            column_names,
            columns,
            num_rows,
        })
    }

    /// Returns the source name of this table.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of rows.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns the name of the column at `index`.
    pub fn column_name(&self, index: usize) -> Option<&str> {
        self.column_names.get(index).map(String::as_str)
    }

    /// Returns the index of the column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_names.iter().position(|n| n == name)
    }

    /// Returns the cells of the column at `index`.
    pub fn column(&self, index: usize) -> Option<&[String]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// Returns the cells of the column called `name`.
    pub fn column_by_name(&self, name: &str) -> Option<&[String]> {
        self.column_index(name).and_then(|i| self.column(i))
    }

    /// Returns the column at `index`, failing with a descriptive error.
    pub fn require_column(&self, index: usize) -> Result<&[String]> {
        self.column(index).ok_or_else(|| GlobeError::MissingColumn {
            table: self.name.clone(),
            column: format!("Field {index}"),
        })
    }

    /// Parses the column at `index` as numbers. Unparseable cells are `None`.
    pub fn numeric_column(&self, index: usize) -> Result<Vec<Option<f64>>> {
        Ok(self
            .require_column(index)?
            .iter()
            .map(|cell| parse_number(cell))
            .collect())
    }
}

/// Parses a cell as a finite number.
pub fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headerless_column_names() {
        let table = Table::from_reader("1,2,a\n3,4,b\n".as_bytes(), false).unwrap();
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.num_columns(), 3);
        assert_eq!(table.column_name(2), Some("Field 2"));
        assert_eq!(table.column_by_name("Field 2").unwrap(), ["a", "b"]);
    }

    #[test]
    fn test_header_names() {
        let table = Table::from_reader("lat,lon\n1,2\n".as_bytes(), true).unwrap();
        assert_eq!(table.column_index("lon"), Some(1));
        assert_eq!(table.num_rows(), 1);
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let table = Table::from_reader("1,2\n3,4,extra\n5\n".as_bytes(), false).unwrap();
        assert_eq!(table.num_columns(), 3);
        assert_eq!(table.column(2).unwrap(), ["", "extra", ""]);
        assert_eq!(table.column(1).unwrap(), ["2", "4", ""]);
    }

    #[test]
    fn test_numeric_column() {
        let table = Table::from_reader(" 1.5 ,x\nabc,y\n".as_bytes(), false).unwrap();
        assert_eq!(table.numeric_column(0).unwrap(), vec![Some(1.5), None]);
        assert!(matches!(
            table.numeric_column(7),
            Err(GlobeError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_quoted_cells_keep_commas() {
        let table = Table::from_reader("1,2,\"Food, Retail\"\n".as_bytes(), false).unwrap();
        assert_eq!(table.column(2).unwrap(), ["Food, Retail"]);
    }

    #[test]
    fn test_missing_file() {
        let err = Table::read_csv("/nonexistent/loans.csv", false).unwrap_err();
        assert!(matches!(err, GlobeError::MissingInput(_)));
    }

    #[test]
    fn test_parse_number_rejects_nan() {
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("-2e3"), Some(-2000.0));
    }
}
