//! A ready-made input over a stored file, request body or open reader

use std::io::Read;
use std::path::PathBuf;

use excel_webio_core::{Book, FileType, Sheet};
use excel_webio_io::{load_book, load_sheet, FileDescriptor, IoError, Source};

use crate::error::WebioResult;
use crate::input::{ExcelInput, InputOptions};

/// An [`ExcelInput`] over an optional [`FileDescriptor`]
///
/// Without a descriptor every load reports "no input present". A stream is
/// read once, on the first load, and kept in memory so later loads see the
/// same bytes.
#[derive(Debug, Default)]
pub struct FileInput<'a> {
    descriptor: Option<FileDescriptor<'a>>,
}

impl<'a> FileInput<'a> {
    /// An input over the given descriptor
    pub fn new(descriptor: FileDescriptor<'a>) -> Self {
        Self {
            descriptor: Some(descriptor),
        }
    }

    /// An input with nothing in it
    pub fn empty() -> Self {
        Self::default()
    }

    /// A file on disk, typed by its extension
    pub fn from_path<P: Into<PathBuf>>(path: P) -> Self {
        Self::new(FileDescriptor::from_path(path))
    }

    /// Bytes already in memory
    pub fn from_content(file_type: FileType, content: Vec<u8>) -> Self {
        Self::new(FileDescriptor::from_content(file_type, content))
    }

    /// An open reader
    pub fn from_reader<R: Read + 'a>(file_type: FileType, reader: R) -> Self {
        Self::new(FileDescriptor::from_reader(file_type, reader))
    }

    /// True when there is nothing to load
    pub fn is_empty(&self) -> bool {
        self.descriptor.is_none()
    }

    fn descriptor(&mut self) -> WebioResult<Option<FileDescriptor<'static>>> {
        let Some(descriptor) = self.descriptor.as_mut() else {
            return Ok(None);
        };

        let source = match &mut descriptor.source {
            Source::Path(path) => Source::Path(path.clone()),
            Source::Content(content) => Source::Content(content.clone()),
            Source::Stream(reader) => {
                let mut content = Vec::new();
                reader.read_to_end(&mut content).map_err(IoError::from)?;
                descriptor.source = Source::Content(content.clone());
                Source::Content(content)
            }
        };

        Ok(Some(FileDescriptor {
            file_type: descriptor.file_type,
            source,
        }))
    }
}

impl ExcelInput for FileInput<'_> {
    fn load_single_sheet(&mut self, options: &InputOptions) -> WebioResult<Option<Sheet>> {
        match self.descriptor()? {
            Some(descriptor) => Ok(Some(load_sheet(descriptor, &options.load)?)),
            None => Ok(None),
        }
    }

    fn load_book(&mut self, options: &InputOptions) -> WebioResult<Option<Book>> {
        match self.descriptor()? {
            Some(descriptor) => Ok(Some(load_book(descriptor, &options.load)?)),
            None => Ok(None),
        }
    }
}
