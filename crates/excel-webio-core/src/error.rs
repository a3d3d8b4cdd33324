//! Error types for excel-webio-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in excel-webio-core
#[derive(Debug, Error)]
pub enum Error {
    /// File type tag missing from the MIME table
    #[error("Unknown file type: {0}")]
    UnknownFileType(String),

    /// Sheet not found by name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Sheet index out of bounds
    #[error("Sheet index {0} out of bounds (count: {1})")]
    SheetOutOfBounds(usize, usize),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// Header row index past the last row
    #[error("Header row {0} out of bounds (rows: {1})")]
    HeaderRowOutOfBounds(usize, usize),
}
