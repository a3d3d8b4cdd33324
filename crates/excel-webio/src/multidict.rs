//! Inputs whose uploads sit in a keyed collection, e.g. multipart form fields

use std::fmt;
use std::io::Read;

use excel_webio_core::{Book, FileType, Sheet};
use excel_webio_io::{load_book, load_sheet, FileDescriptor, IoError};

use crate::error::{WebioError, WebioResult};
use crate::input::{ExcelInput, InputOptions};

const INVALID_PARAMETERS: &str = "Invalid parameters";

/// A file type tag and an open stream for one upload field
///
/// Either half may be missing, e.g. when the field was not submitted.
#[derive(Default)]
pub struct FileTuple<'a> {
    /// File type tag such as `"csv"` or `"xlsx"`
    pub file_type: Option<String>,
    /// The uploaded bytes
    pub stream: Option<Box<dyn Read + 'a>>,
}

impl<'a> FileTuple<'a> {
    /// A complete tuple
    pub fn new<R: Read + 'a>(file_type: &str, stream: R) -> Self {
        Self {
            file_type: Some(file_type.to_string()),
            stream: Some(Box::new(stream)),
        }
    }

    /// A tuple for a field that is not there
    pub fn missing() -> Self {
        Self::default()
    }
}

impl fmt::Debug for FileTuple<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileTuple")
            .field("file_type", &self.file_type)
            .field("stream", &self.stream.as_ref().map(|_| ".."))
            .finish()
    }
}

/// A generic interface for an upload appearing in a keyed collection
///
/// Implementors only look up the field; loading and projection come from the
/// blanket [`ExcelInput`] impl, which reads the whole stream into memory.
pub trait ExcelInputInMultiDict {
    /// Look up the file type and stream of an upload field
    fn get_file_tuple(&mut self, field_name: Option<&str>) -> WebioResult<FileTuple<'_>> {
        let _ = field_name;
        Err(WebioError::NotImplemented("get_file_tuple"))
    }
}

impl<T: ExcelInputInMultiDict + ?Sized> ExcelInput for T {
    fn load_single_sheet(&mut self, options: &InputOptions) -> WebioResult<Option<Sheet>> {
        let descriptor = read_field(self, options)?;
        Ok(Some(load_sheet(descriptor, &options.load)?))
    }

    fn load_book(&mut self, options: &InputOptions) -> WebioResult<Option<Book>> {
        let descriptor = read_field(self, options)?;
        Ok(Some(load_book(descriptor, &options.load)?))
    }
}

fn read_field<T: ExcelInputInMultiDict + ?Sized>(
    input: &mut T,
    options: &InputOptions,
) -> WebioResult<FileDescriptor<'static>> {
    let tuple = input.get_file_tuple(options.field_name.as_deref())?;
    let (Some(tag), Some(mut stream)) = (tuple.file_type, tuple.stream) else {
        return Err(WebioError::InvalidInput(INVALID_PARAMETERS.to_string()));
    };

    let file_type: FileType = tag.parse()?;
    let mut content = Vec::new();
    stream.read_to_end(&mut content).map_err(IoError::from)?;
    log::debug!(
        "read {} bytes of {} from field {:?}",
        content.len(),
        file_type,
        options.field_name
    );
    Ok(FileDescriptor::from_content(file_type, content))
}
