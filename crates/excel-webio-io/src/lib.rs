//! # excel-webio-io
//!
//! The spreadsheet library behind excel-webio: format readers and writers,
//! loading from paths/bytes/streams, in-memory serialization and storage
//! bindings.
//!
//! | tag | read | write |
//! |---|---|---|
//! | csv, tsv, csvz, tsvz | yes | yes |
//! | xls, xlsx, xlsm, ods | yes | yes |
//! | json | yes | yes |
//! | plain, simple, grid, pipe, orgtbl, rst, mediawiki, latex, latex_booktabs | no | yes |
//!
//! ## Example
//!
//! ```rust
//! use excel_webio_io::{load_sheet, FileDescriptor, FileType, LoadOptions, SaveOptions, SaveToMemory};
//!
//! let upload = FileDescriptor::from_content(FileType::Csv, b"X,Y\n1,2\n".to_vec());
//! let sheet = load_sheet(upload, &LoadOptions::default()).unwrap();
//!
//! let xlsx = sheet.save_to_memory(FileType::Xlsx, &SaveOptions::default()).unwrap();
//! assert!(!xlsx.get_ref().is_empty());
//! ```

pub mod database;
pub mod error;
pub mod formats;
pub mod load;
pub mod options;
pub mod save;
pub mod source;

pub use database::{
    export_table, export_tables, from_query_sets, import_book, import_sheet, ColumnMapping,
    DatabaseResult, Initializer, MemorySession, QueryRow, Session, TableBinding,
};
pub use error::{DatabaseError, IoError, IoResult};
pub use load::{load_book, load_sheet};
pub use options::{LineTerminator, LoadOptions, SaveOptions};
pub use save::{new_buffer, SaveToMemory};
pub use source::{FileDescriptor, Source};

// Re-export the data model
pub use excel_webio_core::{
    BookDict, Book, CellValue, ColumnDict, FileType, Record, Sheet, FILE_TYPE_MIME_TABLE,
};
