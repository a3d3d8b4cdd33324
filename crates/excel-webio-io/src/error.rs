//! I/O error types

use excel_webio_core::FileType;
use thiserror::Error;

/// Result type for I/O operations
pub type IoResult<T> = std::result::Result<T, IoError>;

/// Errors that can occur while loading or saving spreadsheets
#[derive(Debug, Error)]
pub enum IoError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV library error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Error from the XLS/XLSX/ODS reader
    #[error("Spreadsheet error: {0}")]
    Calamine(#[from] calamine::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Options the loader or writer does not understand
    #[error("Unknown parameters: {}", .0.join(", "))]
    UnknownParameters(Vec<String>),

    /// No reader or writer for this format
    #[error("Cannot {operation} {file_type} files")]
    UnsupportedFormat {
        file_type: FileType,
        operation: &'static str,
    },

    /// Content the format cannot represent
    #[error("Cannot write {file_type}: {reason}")]
    Unwritable { file_type: FileType, reason: String },

    /// No file type given and none could be inferred
    #[error("Cannot determine the file type of {0}")]
    UndeterminedFileType(String),

    /// Text encoding label not recognized
    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    /// Malformed source data
    #[error("Parse error: {0}")]
    Parse(String),

    /// Storage error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] excel_webio_core::Error),
}

/// Errors raised by storage sessions
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Table not known to the session
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// Column not present on the table
    #[error("Unknown column {column} on table {table}")]
    UnknownColumn { table: String, column: String },

    /// A book's sheets and the tables meant to receive them differ in number
    #[error("{sheets} sheet(s) cannot be stored into {tables} table(s)")]
    TableCountMismatch { sheets: usize, tables: usize },

    /// Backend-specific failure
    #[error("{0}")]
    Backend(String),
}
