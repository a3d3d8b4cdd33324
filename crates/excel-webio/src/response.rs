//! Turning tabular data into framework responses
//!
//! [`ExcelResponder`] serializes a sheet or book with the spreadsheet library
//! and hands the bytes to a [`ResponseFactory`] supplied by the embedding
//! framework. A plain closure works as a factory:
//!
//! ```rust
//! use excel_webio::{ExcelPayload, ExcelResponder, ResponseOptions};
//!
//! let responder = ExcelResponder::new(|payload: ExcelPayload| {
//!     (payload.status, payload.content_type, payload.content)
//! });
//! let (status, content_type, body) = responder
//!     .make_response_from_array(vec![vec!["X", "Y"]], "csv", &ResponseOptions::default())
//!     .unwrap();
//!
//! assert_eq!(status, 200);
//! assert_eq!(content_type, "text/csv");
//! assert_eq!(body, b"X,Y\r\n");
//! ```

use std::io::{Read, Seek, SeekFrom};

use excel_webio_core::{
    mime_type_for, Book, BookDict, CellValue, ColumnDict, Error, FileType, Record, Sheet,
};
use excel_webio_io::database::{export_table, export_tables, from_query_sets, QueryRow, Session};
use excel_webio_io::{IoError, SaveOptions, SaveToMemory};

use crate::error::WebioResult;

/// Everything a framework needs to build a download response
#[derive(Debug, Clone, PartialEq)]
pub struct ExcelPayload {
    /// The serialized file
    pub content: Vec<u8>,
    /// MIME type of the file type
    pub content_type: &'static str,
    /// HTTP status code
    pub status: u16,
    /// Download name, always ending in the file type's extension
    pub file_name: Option<String>,
}

/// Builds a framework response from an [`ExcelPayload`]
pub trait ResponseFactory {
    /// The framework's response type
    type Response;

    /// Build the response
    fn build(&self, payload: ExcelPayload) -> Self::Response;
}

impl<F, R> ResponseFactory for F
where
    F: Fn(ExcelPayload) -> R,
{
    type Response = R;

    fn build(&self, payload: ExcelPayload) -> R {
        self(payload)
    }
}

/// Placeholder factory that discards the payload
///
/// Replace it with the framework's factory before serving requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResponse;

impl ResponseFactory for NullResponse {
    type Response = Option<()>;

    fn build(&self, _payload: ExcelPayload) -> Option<()> {
        None
    }
}

/// Options for building a response
#[derive(Debug, Clone)]
pub struct ResponseOptions {
    /// HTTP status code (default: 200)
    pub status: u16,
    /// Download name; the file type's extension is appended when missing
    pub file_name: Option<String>,
    /// Passed through to the spreadsheet library
    pub save: SaveOptions,
}

impl Default for ResponseOptions {
    fn default() -> Self {
        Self {
            status: 200,
            file_name: None,
            save: SaveOptions::default(),
        }
    }
}

impl ResponseOptions {
    /// Use a different status code
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Offer the content as a download with this name
    pub fn with_file_name(mut self, file_name: &str) -> Self {
        self.file_name = Some(file_name.to_string());
        self
    }

    /// Name the sheet built from in-memory data
    pub fn with_sheet_name(mut self, sheet_name: &str) -> Self {
        self.save.sheet_name = Some(sheet_name.to_string());
        self
    }
}

/// Serializes tabular data and builds responses through a [`ResponseFactory`]
#[derive(Debug, Clone, Default)]
pub struct ExcelResponder<F = NullResponse> {
    factory: F,
}

impl<F: ResponseFactory> ExcelResponder<F> {
    /// A responder building responses with `factory`
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    /// The response factory
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Make a response from a [`Sheet`] or [`Book`]
    ///
    /// `file_type` is a tag such as `"csv"` or `"xlsx"`; a tag missing from
    /// the MIME table fails before anything is serialized.
    pub fn make_response<T: SaveToMemory>(
        &self,
        instance: &T,
        file_type: &str,
        options: &ResponseOptions,
    ) -> WebioResult<F::Response> {
        let content_type =
            mime_type_for(file_type).ok_or_else(|| Error::UnknownFileType(file_type.to_string()))?;
        let parsed: FileType = file_type.parse()?;

        let mut stream = instance.save_to_memory(parsed, &options.save)?;
        stream.seek(SeekFrom::Start(0)).map_err(IoError::from)?;
        let mut content = Vec::new();
        stream.read_to_end(&mut content).map_err(IoError::from)?;

        let file_name = options
            .file_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(|name| with_extension(name, file_type));

        log::debug!(
            "response: {} bytes of {} (status {}, file {:?})",
            content.len(),
            content_type,
            options.status,
            file_name
        );

        Ok(self.factory.build(ExcelPayload {
            content,
            content_type,
            status: options.status,
            file_name,
        }))
    }

    /// Make a response from rows of cells
    pub fn make_response_from_array<R, C>(
        &self,
        array: R,
        file_type: &str,
        options: &ResponseOptions,
    ) -> WebioResult<F::Response>
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<CellValue>,
    {
        let sheet = Sheet::from_array(options.save.sheet_name_or_default(), array);
        self.make_response(&sheet, file_type, options)
    }

    /// Make a response from columns keyed by name
    pub fn make_response_from_dict(
        &self,
        dict: &ColumnDict,
        file_type: &str,
        options: &ResponseOptions,
    ) -> WebioResult<F::Response> {
        let sheet = Sheet::from_dict(options.save.sheet_name_or_default(), dict);
        self.make_response(&sheet, file_type, options)
    }

    /// Make a response from a list of records
    pub fn make_response_from_records(
        &self,
        records: &[Record],
        file_type: &str,
        options: &ResponseOptions,
    ) -> WebioResult<F::Response> {
        let sheet = Sheet::from_records(options.save.sheet_name_or_default(), records);
        self.make_response(&sheet, file_type, options)
    }

    /// Make a response from sheets of rows keyed by sheet name
    pub fn make_response_from_book_dict(
        &self,
        book_dict: &BookDict,
        file_type: &str,
        options: &ResponseOptions,
    ) -> WebioResult<F::Response> {
        let book = Book::from_dict(book_dict)?;
        self.make_response(&book, file_type, options)
    }

    /// Make a response from query results projected onto `column_names`
    ///
    /// No column names means no data.
    pub fn make_response_from_query_sets<Q: QueryRow>(
        &self,
        query_sets: &[Q],
        column_names: &[&str],
        file_type: &str,
        options: &ResponseOptions,
    ) -> WebioResult<F::Response> {
        let mut sheet = from_query_sets(query_sets, column_names);
        sheet.set_name(options.save.sheet_name_or_default());
        self.make_response(&sheet, file_type, options)
    }

    /// Make a response from every row of one table
    pub fn make_response_from_a_table(
        &self,
        session: &dyn Session,
        table: &str,
        file_type: &str,
        options: &ResponseOptions,
    ) -> WebioResult<F::Response> {
        let sheet = export_table(session, table)?;
        self.make_response(&sheet, file_type, options)
    }

    /// Make a response with one sheet per table
    pub fn make_response_from_tables(
        &self,
        session: &dyn Session,
        tables: &[&str],
        file_type: &str,
        options: &ResponseOptions,
    ) -> WebioResult<F::Response> {
        let book = export_tables(session, tables)?;
        self.make_response(&book, file_type, options)
    }
}

fn with_extension(file_name: &str, file_type: &str) -> String {
    let extension = format!(".{file_type}");
    if file_name.ends_with(&extension) {
        file_name.to_string()
    } else {
        format!("{file_name}{extension}")
    }
}
