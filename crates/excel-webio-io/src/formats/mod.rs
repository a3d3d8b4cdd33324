//! Format readers and writers, dispatched by [`FileType`]

pub mod binary;
pub mod csv;
pub mod json;
pub mod ods;
pub mod text;
pub mod xls;
pub mod xlsx;
pub mod zipped;

use std::io::{Seek, Write};

use excel_webio_core::{Book, FileType, Sheet, DEFAULT_SHEET_NAME};

use crate::error::{IoError, IoResult};
use crate::options::{LoadOptions, SaveOptions};

use self::csv::{CsvReader, CsvWriter};
use self::ods::OdsWriter;
use self::xls::XlsWriter;
use self::xlsx::XlsxWriter;

/// Default field delimiter of a csv-like format
pub(crate) fn delimiter_for(file_type: FileType) -> u8 {
    match file_type {
        FileType::Tsv | FileType::Tsvz => b'\t',
        _ => b',',
    }
}

/// Parse content of the given type into a book
pub fn read_book(file_type: FileType, content: Vec<u8>, options: &LoadOptions) -> IoResult<Book> {
    match file_type {
        FileType::Csv | FileType::Tsv => {
            let name = options.sheet_name.as_deref().unwrap_or(DEFAULT_SHEET_NAME);
            let sheet = CsvReader::read(&content, name, delimiter_for(file_type), options)?;
            Ok(Book::from(sheet))
        }
        FileType::Csvz => zipped::read(&content, FileType::Csv, options),
        FileType::Tsvz => zipped::read(&content, FileType::Tsv, options),
        FileType::Xls | FileType::Xlsx | FileType::Xlsm | FileType::Ods => {
            binary::read(content, file_type)
        }
        FileType::Json => json::read(&content),
        other => Err(IoError::UnsupportedFormat {
            file_type: other,
            operation: "read",
        }),
    }
}

/// Serialize a sheet
pub fn write_sheet<W: Write + Seek>(
    sheet: &Sheet,
    file_type: FileType,
    writer: W,
    options: &SaveOptions,
) -> IoResult<()> {
    match file_type {
        FileType::Csv | FileType::Tsv => {
            CsvWriter::write_sheet(sheet, writer, delimiter_for(file_type), options)
        }
        FileType::Json => json::write_sheet(sheet, writer),
        t if t.is_text_table() => text::write_sheet(sheet, writer, t),
        _ => write_book(&Book::from(sheet.clone()), file_type, writer, options),
    }
}

/// Serialize a book
pub fn write_book<W: Write + Seek>(
    book: &Book,
    file_type: FileType,
    writer: W,
    options: &SaveOptions,
) -> IoResult<()> {
    match file_type {
        FileType::Csv | FileType::Tsv => {
            CsvWriter::write_book(book, writer, delimiter_for(file_type), options)
        }
        FileType::Csvz => zipped::write(book, writer, FileType::Csv, options),
        FileType::Tsvz => zipped::write(book, writer, FileType::Tsv, options),
        FileType::Xls => XlsWriter::write(book, writer),
        FileType::Xlsx => XlsxWriter::write(book, writer, false),
        FileType::Xlsm => XlsxWriter::write(book, writer, true),
        FileType::Ods => OdsWriter::write(book, writer),
        FileType::Json => json::write_book(book, writer),
        t if t.is_text_table() => text::write_book(book, writer, t),
        other => Err(IoError::UnsupportedFormat {
            file_type: other,
            operation: "write",
        }),
    }
}
