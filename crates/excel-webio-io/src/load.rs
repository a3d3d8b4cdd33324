//! Loading sheets and books from a [`FileDescriptor`]

use excel_webio_core::{Book, Sheet};

use crate::error::IoResult;
use crate::formats;
use crate::options::LoadOptions;
use crate::source::FileDescriptor;

/// Load every sheet of the source
pub fn load_book(descriptor: FileDescriptor<'_>, options: &LoadOptions) -> IoResult<Book> {
    options.check_known()?;

    let (file_type, content) = descriptor.into_parts()?;
    log::debug!("loading {} bytes as {}", content.len(), file_type);

    let book = formats::read_book(file_type, content, options)?;
    log::debug!("loaded {} sheet(s): {:?}", book.sheet_count(), book.sheet_names());
    Ok(book)
}

/// Load one sheet of the source
///
/// Picks `options.sheet_name`, else `options.sheet_index`, else the first
/// sheet. csv/tsv sources have a single sheet, named after `sheet_name` when
/// one is given.
pub fn load_sheet(descriptor: FileDescriptor<'_>, options: &LoadOptions) -> IoResult<Sheet> {
    let mut book = load_book(descriptor, options)?;
    let sheet = match &options.sheet_name {
        Some(name) => book.take_sheet_by_name(name)?,
        None => book.take_sheet(options.sheet_index.unwrap_or(0))?,
    };
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IoError;
    use excel_webio_core::{CellValue, FileType};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_load_sheet_from_path() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "X,Y\n1,2\n").unwrap();

        let sheet = load_sheet(FileDescriptor::from_path(file.path()), &LoadOptions::default())
            .unwrap();
        assert_eq!(
            sheet.to_array(),
            vec![
                vec![CellValue::from("X"), "Y".into()],
                vec![1.into(), 2.into()],
            ]
        );
    }

    #[test]
    fn test_sheet_name_ignored_for_csv() {
        let descriptor = FileDescriptor::from_content(FileType::Csv, b"a\n".to_vec());
        let sheet = load_sheet(descriptor, &LoadOptions::for_sheet("Upload")).unwrap();
        assert_eq!(sheet.name(), "Upload");
    }

    #[test]
    fn test_pick_sheet_by_index_and_name() {
        let content = br#"{"a": [[1]], "b": [[2]]}"#.to_vec();

        let options = LoadOptions {
            sheet_index: Some(1),
            ..LoadOptions::default()
        };
        let sheet = load_sheet(FileDescriptor::from_content(FileType::Json, content.clone()), &options)
            .unwrap();
        assert_eq!(sheet.name(), "b");

        let err = load_sheet(
            FileDescriptor::from_content(FileType::Json, content),
            &LoadOptions::for_sheet("c"),
        )
        .unwrap_err();
        assert!(matches!(err, IoError::Core(excel_webio_core::Error::SheetNotFound(_))));
    }

    #[test]
    fn test_unknown_parameters() {
        let mut options = LoadOptions::default();
        options.extra.insert("unrelated".into(), "foo bar".into());

        let err = load_book(
            FileDescriptor::from_content(FileType::Csv, b"a".to_vec()),
            &options,
        )
        .unwrap_err();
        assert!(matches!(err, IoError::UnknownParameters(keys) if keys == ["unrelated"]));
    }

    #[test]
    fn test_text_formats_cannot_be_read() {
        let err = load_book(
            FileDescriptor::from_content(FileType::Grid, b"+--+".to_vec()),
            &LoadOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat { operation: "read", .. }));
    }
}
