//! Where spreadsheet bytes come from

use std::fmt;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

use excel_webio_core::FileType;

use crate::error::{IoError, IoResult};

/// A source of spreadsheet bytes
pub enum Source<'a> {
    /// A file on disk
    Path(PathBuf),
    /// Bytes already in memory
    Content(Vec<u8>),
    /// An open reader, borrowed for one full read and never closed here
    Stream(Box<dyn Read + 'a>),
}

impl fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Source::Content(bytes) => write!(f, "Content({} bytes)", bytes.len()),
            Source::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// A file type tag paired with a byte source
#[derive(Debug)]
pub struct FileDescriptor<'a> {
    /// The format; inferred from the path extension when absent
    pub file_type: Option<FileType>,
    /// The bytes
    pub source: Source<'a>,
}

impl<'a> FileDescriptor<'a> {
    /// A file on disk, typed by its extension
    pub fn from_path<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        Self {
            file_type: FileType::from_path(&path),
            source: Source::Path(path),
        }
    }

    /// Bytes already in memory
    pub fn from_content(file_type: FileType, content: Vec<u8>) -> Self {
        Self {
            file_type: Some(file_type),
            source: Source::Content(content),
        }
    }

    /// An open reader
    pub fn from_reader<R: Read + 'a>(file_type: FileType, reader: R) -> Self {
        Self {
            file_type: Some(file_type),
            source: Source::Stream(Box::new(reader)),
        }
    }

    /// Resolve the file type and read every byte
    pub(crate) fn into_parts(self) -> IoResult<(FileType, Vec<u8>)> {
        let file_type = match self.file_type {
            Some(file_type) => file_type,
            None => return Err(IoError::UndeterminedFileType(self.describe())),
        };

        let content = match self.source {
            Source::Path(path) => fs::read(path)?,
            Source::Content(content) => content,
            Source::Stream(mut reader) => {
                let mut content = Vec::new();
                reader.read_to_end(&mut content)?;
                content
            }
        };
        Ok((file_type, content))
    }

    fn describe(&self) -> String {
        match &self.source {
            Source::Path(path) => path.display().to_string(),
            Source::Content(_) => "in-memory content".to_string(),
            Source::Stream(_) => "stream".to_string(),
        }
    }
}
