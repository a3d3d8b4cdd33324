//! Saving sheets and books to memory or disk

use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;

use excel_webio_core::{Book, FileType, Sheet};

use crate::error::{IoError, IoResult};
use crate::formats;
use crate::options::SaveOptions;

/// A fresh in-memory buffer for content of the given type
///
/// Every format shares the one buffer type, a seekable `Cursor` (the zip and
/// compound-file writers need the `Seek`); the tag only labels the trace line.
pub fn new_buffer(file_type: FileType) -> Cursor<Vec<u8>> {
    log::trace!("new {} buffer", file_type);
    Cursor::new(Vec::new())
}

/// Anything that can serialize itself to a spreadsheet format
pub trait SaveToMemory {
    /// Write into a caller-supplied stream
    fn save_to_stream<W: Write + Seek>(
        &self,
        file_type: FileType,
        stream: W,
        options: &SaveOptions,
    ) -> IoResult<()>;

    /// Write into a fresh in-memory buffer
    ///
    /// The returned cursor is positioned at the end of the written data.
    fn save_to_memory(
        &self,
        file_type: FileType,
        options: &SaveOptions,
    ) -> IoResult<Cursor<Vec<u8>>> {
        let mut stream = new_buffer(file_type);
        self.save_to_stream(file_type, &mut stream, options)?;
        log::debug!("saved {} bytes as {}", stream.get_ref().len(), file_type);
        Ok(stream)
    }

    /// Write to a file, typed by its extension
    fn save_as<P: AsRef<Path>>(&self, path: P, options: &SaveOptions) -> IoResult<()> {
        let path = path.as_ref();
        let file_type = FileType::from_path(path)
            .ok_or_else(|| IoError::UndeterminedFileType(path.display().to_string()))?;

        let mut writer = BufWriter::new(File::create(path)?);
        self.save_to_stream(file_type, &mut writer, options)?;
        writer.flush()?;
        Ok(())
    }
}

impl SaveToMemory for Sheet {
    fn save_to_stream<W: Write + Seek>(
        &self,
        file_type: FileType,
        stream: W,
        options: &SaveOptions,
    ) -> IoResult<()> {
        options.check_known()?;
        formats::write_sheet(self, file_type, stream, options)
    }
}

impl SaveToMemory for Book {
    fn save_to_stream<W: Write + Seek>(
        &self,
        file_type: FileType,
        stream: W,
        options: &SaveOptions,
    ) -> IoResult<()> {
        options.check_known()?;
        formats::write_book(self, file_type, stream, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::{load_book, load_sheet};
    use crate::options::LoadOptions;
    use crate::source::FileDescriptor;
    use excel_webio_core::CellValue;
    use pretty_assertions::assert_eq;

    fn sheet() -> Sheet {
        Sheet::from_array(
            "Sheet1",
            vec![
                vec![CellValue::from("X"), "Y".into(), "Z".into()],
                vec![1.into(), 2.into(), 3.into()],
                vec![4.into(), 5.into(), 6.into()],
            ],
        )
    }

    #[test]
    fn test_round_trip_through_memory() {
        for file_type in [
            FileType::Csv,
            FileType::Tsv,
            FileType::Csvz,
            FileType::Tsvz,
            FileType::Xls,
            FileType::Xlsx,
            FileType::Xlsm,
            FileType::Ods,
            FileType::Json,
        ] {
            let buffer = sheet()
                .save_to_memory(file_type, &SaveOptions::default())
                .unwrap();
            let back = load_sheet(
                FileDescriptor::from_content(file_type, buffer.into_inner()),
                &LoadOptions::default(),
            )
            .unwrap();
            assert_eq!(back.to_array(), sheet().to_array(), "{file_type}");
        }
    }

    #[test]
    fn test_save_as_xls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signatures.xls");
        sheet().save_as(&path, &SaveOptions::default()).unwrap();

        let back = load_sheet(FileDescriptor::from_path(&path), &LoadOptions::default()).unwrap();
        assert_eq!(back.to_array(), sheet().to_array());
    }

    #[test]
    fn test_new_buffer_is_empty_for_every_type() {
        for file_type in [FileType::Csv, FileType::Xls, FileType::Latex] {
            let buffer = new_buffer(file_type);
            assert!(buffer.get_ref().is_empty());
            assert_eq!(buffer.position(), 0);
        }
    }

    #[test]
    fn test_save_as_and_reload_book() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.xlsx");
        let mut second = sheet();
        second.set_name("Sheet2");
        let book = Book::from_sheets([sheet(), second]).unwrap();

        book.save_as(&path, &SaveOptions::default()).unwrap();
        let back = load_book(FileDescriptor::from_path(&path), &LoadOptions::default()).unwrap();
        assert_eq!(back.to_dict(), book.to_dict());
    }

    #[test]
    fn test_unknown_save_parameters() {
        let mut options = SaveOptions::default();
        options.extra.insert("colour".into(), "red".into());
        let err = sheet().save_to_memory(FileType::Csv, &options).unwrap_err();
        assert!(matches!(err, IoError::UnknownParameters(_)));
    }
}
