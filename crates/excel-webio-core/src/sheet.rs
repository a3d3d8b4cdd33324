//! Sheet type - a single two-dimensional table

use crate::cell::CellValue;
use crate::error::{Error, Result};
use crate::map::{ColumnDict, Record};

/// Default name given to sheets built from in-memory data
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// A named, rectangular table of cells
///
/// Rows shorter than the widest row are padded with [`CellValue::Empty`], so
/// every row has [`Sheet::number_of_columns`] cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create an empty sheet
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: Vec::new(),
        }
    }

    /// Create a sheet from an array of rows
    pub fn from_array<R, C>(name: &str, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<CellValue>,
    {
        let mut sheet = Self::new(name);
        for row in rows {
            sheet.push_row(row);
        }
        sheet
    }

    /// Create a sheet from a column dictionary
    ///
    /// The first row holds the keys; shorter columns are padded.
    pub fn from_dict(name: &str, dict: &ColumnDict) -> Self {
        if dict.is_empty() {
            return Self::new(name);
        }

        let height = dict.values().map(Vec::len).max().unwrap_or(0);
        let mut rows = Vec::with_capacity(height + 1);
        rows.push(dict.keys().map(CellValue::string).collect::<Vec<_>>());
        for i in 0..height {
            rows.push(
                dict.values()
                    .map(|column| column.get(i).cloned().unwrap_or_default())
                    .collect(),
            );
        }
        Self::from_array(name, rows)
    }

    /// Create a sheet from a list of records
    ///
    /// Column order follows the keys of the first record; keys first seen in
    /// later records are appended.
    pub fn from_records(name: &str, records: &[Record]) -> Self {
        let mut header: Vec<&str> = Vec::new();
        for record in records {
            for key in record.keys() {
                if !header.contains(&key) {
                    header.push(key);
                }
            }
        }
        if header.is_empty() {
            return Self::new(name);
        }

        let mut sheet = Self::new(name);
        sheet.push_row(header.iter().map(|k| CellValue::string(*k)));
        for record in records {
            sheet.push_row(
                header
                    .iter()
                    .map(|k| record.get(k).cloned().unwrap_or_default()),
            );
        }
        sheet
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the sheet
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Append a row, widening the sheet if needed
    pub fn push_row<C>(&mut self, row: C)
    where
        C: IntoIterator,
        C::Item: Into<CellValue>,
    {
        let mut row: Vec<CellValue> = row.into_iter().map(Into::into).collect();
        let width = self.number_of_columns();

        if row.len() > width {
            for existing in &mut self.rows {
                existing.resize(row.len(), CellValue::Empty);
            }
        } else {
            row.resize(width, CellValue::Empty);
        }
        self.rows.push(row);
    }

    /// Number of rows
    pub fn number_of_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn number_of_columns(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Check if the sheet has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a row by index
    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Get a cell by row and column index (0-based)
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// All rows
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Iterate over the rows one at a time
    ///
    /// The iterator is finite; call again to start over.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Consume the sheet, returning its rows
    pub fn into_rows(self) -> Vec<Vec<CellValue>> {
        self.rows
    }

    /// Rows as an array of arrays
    pub fn to_array(&self) -> Vec<Vec<CellValue>> {
        self.rows.clone()
    }

    /// Column names taken from the given header row
    ///
    /// A repeated name gets a numeric suffix (`X`, `X-1`, `X-2`) so every
    /// column keeps its own entry in dicts and records.
    pub fn colnames(&self, header_row: usize) -> Result<Vec<String>> {
        let header = self
            .rows
            .get(header_row)
            .ok_or(Error::HeaderRowOutOfBounds(header_row, self.rows.len()))?;

        let mut names: Vec<String> = Vec::with_capacity(header.len());
        for cell in header {
            let name = cell.to_string();
            let mut unique = name.clone();
            let mut suffix = 0;
            while names.contains(&unique) {
                suffix += 1;
                unique = format!("{name}-{suffix}");
            }
            names.push(unique);
        }
        Ok(names)
    }

    /// Map each column name in `header_row` to the cells below (and above) it
    pub fn to_dict(&self, header_row: usize) -> Result<ColumnDict> {
        if self.is_empty() {
            return Ok(ColumnDict::new());
        }

        let names = self.colnames(header_row)?;
        let mut dict = ColumnDict::new();
        for (col, name) in names.into_iter().enumerate() {
            let column = self
                .data_rows(header_row)
                .map(|row| row[col].clone())
                .collect();
            dict.insert(name, column);
        }
        Ok(dict)
    }

    /// One record per data row, keyed by the names in `header_row`
    pub fn to_records(&self, header_row: usize) -> Result<Vec<Record>> {
        if self.is_empty() {
            return Ok(Vec::new());
        }

        let names = self.colnames(header_row)?;
        Ok(self
            .data_rows(header_row)
            .map(|row| {
                names
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect::<Record>()
            })
            .collect())
    }

    fn data_rows(&self, header_row: usize) -> impl Iterator<Item = &Vec<CellValue>> {
        self.rows
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != header_row)
            .map(|(_, row)| row)
    }
}
