//! Book type - an ordered collection of named sheets

use crate::error::{Error, Result};
use crate::map::BookDict;
use crate::sheet::Sheet;

/// A book (multi-sheet document)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Book {
    sheets: Vec<Sheet>,
}

impl Book {
    /// Create a book with no sheets
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a book from sheets, rejecting duplicate names
    pub fn from_sheets<I: IntoIterator<Item = Sheet>>(sheets: I) -> Result<Self> {
        let mut book = Self::new();
        for sheet in sheets {
            book.add_sheet(sheet)?;
        }
        Ok(book)
    }

    /// Create a book from a dictionary of two-dimensional arrays
    pub fn from_dict(dict: &BookDict) -> Result<Self> {
        Self::from_sheets(
            dict.iter()
                .map(|(name, rows)| Sheet::from_array(name, rows.iter().cloned())),
        )
    }

    /// Get the number of sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the book has no sheets
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Add a sheet at the end
    pub fn add_sheet(&mut self, sheet: Sheet) -> Result<usize> {
        if self.sheet_index(sheet.name()).is_some() {
            return Err(Error::DuplicateSheetName(sheet.name().to_string()));
        }
        self.sheets.push(sheet);
        Ok(self.sheets.len() - 1)
    }

    /// Get a sheet by index
    pub fn sheet(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    /// Get a sheet by name
    pub fn sheet_by_name(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    /// Get the index of a sheet by name
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.sheets.iter().position(|s| s.name() == name)
    }

    /// Sheet names in order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(Sheet::name).collect()
    }

    /// Iterate over all sheets
    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.iter()
    }

    /// Take a sheet out by name
    pub fn take_sheet_by_name(&mut self, name: &str) -> Result<Sheet> {
        let index = self
            .sheet_index(name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))?;
        Ok(self.sheets.remove(index))
    }

    /// Take a sheet out by index
    pub fn take_sheet(&mut self, index: usize) -> Result<Sheet> {
        if index >= self.sheets.len() {
            return Err(Error::SheetOutOfBounds(index, self.sheets.len()));
        }
        Ok(self.sheets.remove(index))
    }

    /// Sheet name to rows
    pub fn to_dict(&self) -> BookDict {
        self.sheets
            .iter()
            .map(|s| (s.name().to_string(), s.to_array()))
            .collect()
    }
}

impl From<Sheet> for Book {
    fn from(sheet: Sheet) -> Self {
        Self {
            sheets: vec![sheet],
        }
    }
}
