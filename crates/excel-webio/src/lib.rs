//! # excel-webio
//!
//! A generic request and response interface for spreadsheet uploads and
//! downloads. Web framework integrations build on two pieces:
//!
//! - **Input**: implement [`ExcelInput`] (or the keyed-field variant
//!   [`ExcelInputInMultiDict`]) on the framework's request type to get sheets,
//!   arrays, dicts, records and books out of an upload, or store it into a
//!   table.
//! - **Response**: create an [`ExcelResponder`] with the framework's
//!   [`ResponseFactory`] to turn sheets, books, arrays, dicts, records, query
//!   results and tables into download responses.
//!
//! Reading and writing the file formats is left to `excel-webio-io`.
//!
//! ## Example
//!
//! ```rust
//! use excel_webio::prelude::*;
//! use std::io::Cursor;
//!
//! struct Upload(Vec<u8>);
//!
//! impl ExcelInputInMultiDict for Upload {
//!     fn get_file_tuple(&mut self, _field_name: Option<&str>) -> WebioResult<FileTuple<'_>> {
//!         Ok(FileTuple::new("csv", Cursor::new(&self.0)))
//!     }
//! }
//!
//! let mut upload = Upload(b"X,Y\n1,2\n".to_vec());
//! let records = upload.get_records(&InputOptions::for_field("file")).unwrap().unwrap();
//! assert_eq!(records[0].get("Y"), Some(&CellValue::from(2)));
//!
//! let responder = ExcelResponder::new(|payload: ExcelPayload| payload.file_name);
//! let options = ResponseOptions::default().with_file_name("records");
//! let file_name = responder.make_response_from_records(&records, "xlsx", &options).unwrap();
//! assert_eq!(file_name.as_deref(), Some("records.xlsx"));
//! ```

pub mod error;
pub mod file_input;
pub mod input;
pub mod multidict;
pub mod prelude;
pub mod response;

pub use error::{WebioError, WebioResult};
pub use file_input::FileInput;
pub use input::{ExcelInput, InputOptions};
pub use multidict::{ExcelInputInMultiDict, FileTuple};
pub use response::{ExcelPayload, ExcelResponder, NullResponse, ResponseFactory, ResponseOptions};

// Re-export the data model and the pieces of the spreadsheet library that
// appear in this crate's signatures
pub use excel_webio_core::{
    mime_type_for, Book, BookDict, CellValue, ColumnDict, FileType, Record, Sheet,
    FILE_TYPE_MIME_TABLE,
};
pub use excel_webio_io::{
    ColumnMapping, FileDescriptor, Initializer, LoadOptions, MemorySession, QueryRow, SaveOptions,
    SaveToMemory, Session, TableBinding,
};
