//! The excel input contract
//!
//! A web framework exposes an uploaded (or stored) spreadsheet by implementing
//! [`ExcelInput::load_single_sheet`] and [`ExcelInput::load_book`]. Every
//! projection and storage helper is then provided on top of those two.
//!
//! Loading returns `Ok(None)` when there is nothing to load, e.g. a request
//! without a body. The projections pass that through as `Ok(None)`.

use excel_webio_core::{Book, BookDict, CellValue, ColumnDict, Record, Sheet};
use excel_webio_io::database::{import_book, import_sheet, Session, TableBinding};
use excel_webio_io::LoadOptions;

use crate::error::{WebioError, WebioResult};

/// Options for reading from an input
#[derive(Debug, Clone, Default)]
pub struct InputOptions {
    /// Upload field to read, for inputs keyed by field name
    pub field_name: Option<String>,
    /// Row holding the column names (default: 0)
    pub name_columns_by_row: Option<usize>,
    /// Passed through to the spreadsheet library
    pub load: LoadOptions,
}

impl InputOptions {
    /// Options reading the named upload field
    pub fn for_field(field_name: &str) -> Self {
        Self {
            field_name: Some(field_name.to_string()),
            ..Self::default()
        }
    }

    /// Select a sheet by name
    pub fn with_sheet_name(mut self, sheet_name: &str) -> Self {
        self.load.sheet_name = Some(sheet_name.to_string());
        self
    }

    /// Use a different header row
    pub fn with_header_row(mut self, row: usize) -> Self {
        self.name_columns_by_row = Some(row);
        self
    }

    /// Decode csv-like uploads with the given encoding label
    pub fn with_encoding(mut self, encoding: &str) -> Self {
        self.load.encoding = Some(encoding.to_string());
        self
    }

    /// The header row, defaulting to the first
    pub fn header_row(&self) -> usize {
        self.name_columns_by_row.unwrap_or(0)
    }
}

/// A generic interface for a spreadsheet input
///
/// The source could be anywhere: memory, the file system or a request body.
pub trait ExcelInput {
    /// Load one sheet
    ///
    /// `options.load.sheet_name` picks among the sheets of a book; csv and
    /// tsv sources have just one.
    fn load_single_sheet(&mut self, options: &InputOptions) -> WebioResult<Option<Sheet>> {
        let _ = options;
        Err(WebioError::NotImplemented("load_single_sheet"))
    }

    /// Load every sheet
    fn load_book(&mut self, options: &InputOptions) -> WebioResult<Option<Book>> {
        let _ = options;
        Err(WebioError::NotImplemented("load_book"))
    }

    /// Get a [`Sheet`]
    fn get_sheet(&mut self, options: &InputOptions) -> WebioResult<Option<Sheet>> {
        self.load_single_sheet(options)
    }

    /// Get the rows of a sheet
    fn get_array(&mut self, options: &InputOptions) -> WebioResult<Option<Vec<Vec<CellValue>>>> {
        Ok(self.get_sheet(options)?.map(Sheet::into_rows))
    }

    /// Get the columns of a sheet keyed by the header row
    fn get_dict(&mut self, options: &InputOptions) -> WebioResult<Option<ColumnDict>> {
        match self.get_sheet(options)? {
            Some(sheet) => Ok(Some(sheet.to_dict(options.header_row())?)),
            None => Ok(None),
        }
    }

    /// Get one record per data row keyed by the header row
    fn get_records(&mut self, options: &InputOptions) -> WebioResult<Option<Vec<Record>>> {
        match self.get_sheet(options)? {
            Some(sheet) => Ok(Some(sheet.to_records(options.header_row())?)),
            None => Ok(None),
        }
    }

    /// Store the data rows of a sheet into a table
    ///
    /// Returns the number of rows stored, or `None` when there was no input.
    fn save_to_database(
        &mut self,
        session: &mut dyn Session,
        binding: &TableBinding<'_>,
        auto_commit: bool,
        options: &InputOptions,
    ) -> WebioResult<Option<usize>> {
        let Some(sheet) = self.get_sheet(options)? else {
            return Ok(None);
        };
        let added = import_sheet(session, &sheet, binding, options.header_row(), auto_commit)?;
        Ok(Some(added))
    }

    /// Get a [`Book`]
    fn get_book(&mut self, options: &InputOptions) -> WebioResult<Option<Book>> {
        self.load_book(options)
    }

    /// Get every sheet as rows, keyed by sheet name
    fn get_book_dict(&mut self, options: &InputOptions) -> WebioResult<Option<BookDict>> {
        Ok(self.get_book(options)?.map(|book| book.to_dict()))
    }

    /// Store sheet `i` of the book into `bindings[i]`
    fn save_book_to_database(
        &mut self,
        session: &mut dyn Session,
        bindings: &[TableBinding<'_>],
        auto_commit: bool,
        options: &InputOptions,
    ) -> WebioResult<Option<usize>> {
        let Some(book) = self.get_book(options)? else {
            return Ok(None);
        };
        let added = import_book(session, &book, bindings, auto_commit)?;
        Ok(Some(added))
    }
}
