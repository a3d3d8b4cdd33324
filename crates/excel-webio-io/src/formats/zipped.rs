//! CSVZ and TSVZ: a zip archive holding one csv/tsv file per sheet

use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;

use excel_webio_core::{Book, FileType};

use crate::error::IoResult;
use crate::formats::csv::{CsvReader, CsvWriter};
use crate::options::{LoadOptions, SaveOptions};

/// Read every archive member as a sheet named after the member's stem
pub fn read(content: &[u8], inner: FileType, options: &LoadOptions) -> IoResult<Book> {
    let mut archive = zip::ZipArchive::new(Cursor::new(content))?;
    let delimiter = super::delimiter_for(inner);
    let mut book = Book::new();

    for index in 0..archive.len() {
        let mut member = archive.by_index(index)?;
        if member.is_dir() {
            continue;
        }

        let name = Path::new(member.name())
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Sheet")
            .to_string();

        let mut bytes = Vec::new();
        member.read_to_end(&mut bytes)?;
        book.add_sheet(CsvReader::read(&bytes, &name, delimiter, options)?)?;
    }

    Ok(book)
}

/// Write each sheet as `<sheet name>.<csv|tsv>`
pub fn write<W: Write + Seek>(
    book: &Book,
    writer: W,
    inner: FileType,
    options: &SaveOptions,
) -> IoResult<()> {
    let mut zip = zip::ZipWriter::new(writer);
    let file_options = zip::write::SimpleFileOptions::default();
    let delimiter = super::delimiter_for(inner);

    for sheet in book.sheets() {
        zip.start_file(format!("{}.{}", sheet.name(), inner.tag()), file_options)?;
        CsvWriter::write_sheet(sheet, &mut zip, delimiter, options)?;
    }

    zip.finish()?;
    Ok(())
}
