//! File type tags and their MIME types

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::Error;

/// Tag to MIME type, for every recognized output format
pub static FILE_TYPE_MIME_TABLE: &[(&str, &str)] = &[
    ("csv", "text/csv"),
    ("tsv", "text/tab-separated-values"),
    ("csvz", "application/zip"),
    ("tsvz", "application/zip"),
    ("ods", "application/vnd.oasis.opendocument.spreadsheet"),
    ("xls", "application/vnd.ms-excel"),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    ("xlsm", "application/vnd.ms-excel.sheet.macroenabled.12"),
    ("json", "application/json"),
    ("plain", "text/plain"),
    ("simple", "text/plain"),
    ("grid", "text/plain"),
    ("pipe", "text/plain"),
    ("orgtbl", "text/plain"),
    ("rst", "text/plain"),
    ("mediawiki", "text/plain"),
    ("latex", "application/x-latex"),
    ("latex_booktabs", "application/x-latex"),
];

/// Look up the MIME type of a file type tag
pub fn mime_type_for(tag: &str) -> Option<&'static str> {
    FILE_TYPE_MIME_TABLE
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, mime)| *mime)
}

/// A spreadsheet serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Csv,
    Tsv,
    Csvz,
    Tsvz,
    Ods,
    Xls,
    Xlsx,
    Xlsm,
    Json,
    Plain,
    Simple,
    Grid,
    Pipe,
    Orgtbl,
    Rst,
    Mediawiki,
    Latex,
    LatexBooktabs,
}

impl FileType {
    /// Every file type, in MIME table order
    pub const ALL: [FileType; 18] = [
        FileType::Csv,
        FileType::Tsv,
        FileType::Csvz,
        FileType::Tsvz,
        FileType::Ods,
        FileType::Xls,
        FileType::Xlsx,
        FileType::Xlsm,
        FileType::Json,
        FileType::Plain,
        FileType::Simple,
        FileType::Grid,
        FileType::Pipe,
        FileType::Orgtbl,
        FileType::Rst,
        FileType::Mediawiki,
        FileType::Latex,
        FileType::LatexBooktabs,
    ];

    /// The short tag, which doubles as the file extension
    pub fn tag(self) -> &'static str {
        match self {
            FileType::Csv => "csv",
            FileType::Tsv => "tsv",
            FileType::Csvz => "csvz",
            FileType::Tsvz => "tsvz",
            FileType::Ods => "ods",
            FileType::Xls => "xls",
            FileType::Xlsx => "xlsx",
            FileType::Xlsm => "xlsm",
            FileType::Json => "json",
            FileType::Plain => "plain",
            FileType::Simple => "simple",
            FileType::Grid => "grid",
            FileType::Pipe => "pipe",
            FileType::Orgtbl => "orgtbl",
            FileType::Rst => "rst",
            FileType::Mediawiki => "mediawiki",
            FileType::Latex => "latex",
            FileType::LatexBooktabs => "latex_booktabs",
        }
    }

    /// The MIME type sent with a response of this type
    pub fn mime_type(self) -> &'static str {
        // Every tag is in the table; see `test_every_type_has_a_mime_type`.
        mime_type_for(self.tag()).unwrap_or("application/octet-stream")
    }

    /// Guess the file type from a path's extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(|e| e.to_lowercase().parse().ok())
    }

    /// Plain-text table formats (write only)
    pub fn is_text_table(self) -> bool {
        matches!(
            self,
            FileType::Plain
                | FileType::Simple
                | FileType::Grid
                | FileType::Pipe
                | FileType::Orgtbl
                | FileType::Rst
                | FileType::Mediawiki
                | FileType::Latex
                | FileType::LatexBooktabs
        )
    }
}

impl FromStr for FileType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileType::ALL
            .into_iter()
            .find(|t| t.tag() == s)
            .ok_or_else(|| Error::UnknownFileType(s.to_string()))
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
