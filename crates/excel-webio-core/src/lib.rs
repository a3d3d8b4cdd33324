//! # excel-webio-core
//!
//! Core data structures for excel-webio.
//!
//! This crate provides the tabular model shared by the I/O library and the
//! web adapter:
//! - [`CellValue`] - a single cell (empty, boolean, number, string)
//! - [`Sheet`] and [`Book`] - one table, and a named collection of tables
//! - [`OrderedMap`] - the ordered dictionary/record projections
//! - [`FileType`] and [`FILE_TYPE_MIME_TABLE`] - format tags and MIME types
//!
//! ## Example
//!
//! ```rust
//! use excel_webio_core::{CellValue, Sheet};
//!
//! let sheet = Sheet::from_array("Sheet1", vec![
//!     vec![CellValue::from("X"), CellValue::from("Y")],
//!     vec![CellValue::from(1), CellValue::from(2)],
//! ]);
//!
//! let records = sheet.to_records(0).unwrap();
//! assert_eq!(records[0].get("Y"), Some(&CellValue::from(2)));
//! ```

pub mod book;
pub mod cell;
pub mod error;
pub mod file_type;
pub mod map;
pub mod sheet;

// Re-exports for convenience
pub use book::Book;
pub use cell::CellValue;
pub use error::{Error, Result};
pub use file_type::{mime_type_for, FileType, FILE_TYPE_MIME_TABLE};
pub use map::{BookDict, ColumnDict, OrderedMap, Record};
pub use sheet::{Sheet, DEFAULT_SHEET_NAME};
