//! Load and save options

use std::collections::BTreeMap;

use crate::error::{IoError, IoResult};

/// Options for loading a sheet or book
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Sheet to pick from a multi-sheet source (ignored for csv/tsv)
    pub sheet_name: Option<String>,
    /// Sheet to pick by position when no name is given
    pub sheet_index: Option<usize>,
    /// Field delimiter for csv-like sources (default: per format)
    pub delimiter: Option<u8>,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Text encoding label for csv-like sources, e.g. "latin1" (default: UTF-8)
    pub encoding: Option<String>,
    /// Automatic type detection for csv-like sources
    pub auto_detect_types: bool,
    /// Anything else; loading fails with [`IoError::UnknownParameters`] if set
    pub extra: BTreeMap<String, String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            sheet_name: None,
            sheet_index: None,
            delimiter: None,
            quote: b'"',
            encoding: None,
            auto_detect_types: true,
            extra: BTreeMap::new(),
        }
    }
}

impl LoadOptions {
    /// Options selecting a sheet by name
    pub fn for_sheet(name: &str) -> Self {
        Self {
            sheet_name: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn check_known(&self) -> IoResult<()> {
        reject_extra(&self.extra)
    }
}

/// Options for writing a sheet or book
#[derive(Debug, Clone)]
pub struct SaveOptions {
    /// Name for sheets built from arrays, dicts and records
    pub sheet_name: Option<String>,
    /// Field delimiter for csv-like outputs (default: per format)
    pub delimiter: Option<u8>,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Line terminator for csv-like outputs
    pub line_terminator: LineTerminator,
    /// Anything else; saving fails with [`IoError::UnknownParameters`] if set
    pub extra: BTreeMap<String, String>,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            sheet_name: None,
            delimiter: None,
            quote: b'"',
            line_terminator: LineTerminator::CRLF,
            extra: BTreeMap::new(),
        }
    }
}

impl SaveOptions {
    /// The sheet name to use for in-memory data
    pub fn sheet_name_or_default(&self) -> &str {
        self.sheet_name
            .as_deref()
            .unwrap_or(excel_webio_core::DEFAULT_SHEET_NAME)
    }

    pub(crate) fn check_known(&self) -> IoResult<()> {
        reject_extra(&self.extra)
    }
}

/// Line terminator type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminator {
    /// Unix-style (LF)
    LF,
    /// Windows-style (CRLF)
    CRLF,
}

impl LineTerminator {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            LineTerminator::LF => "\n",
            LineTerminator::CRLF => "\r\n",
        }
    }
}

fn reject_extra(extra: &BTreeMap<String, String>) -> IoResult<()> {
    if extra.is_empty() {
        Ok(())
    } else {
        Err(IoError::UnknownParameters(extra.keys().cloned().collect()))
    }
}
