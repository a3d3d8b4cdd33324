//! Error types for excel-webio

use excel_webio_io::IoError;
use thiserror::Error;

/// Result type alias using [`WebioError`]
pub type WebioResult<T> = std::result::Result<T, WebioError>;

/// Errors raised by the input adapters and the response builder
#[derive(Debug, Error)]
pub enum WebioError {
    /// A contract method the adapter does not provide
    #[error("Please implement this function: {0}")]
    NotImplemented(&'static str),

    /// An upload field that yielded no usable file
    #[error("{0}")]
    InvalidInput(String),

    /// Loading or saving failed in the spreadsheet library
    #[error(transparent)]
    Io(#[from] IoError),

    /// Data model error, e.g. an unknown file type tag
    #[error(transparent)]
    Core(#[from] excel_webio_core::Error),
}

impl WebioError {
    /// True for the "not implemented" contract signal
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, WebioError::NotImplemented(_))
    }
}
