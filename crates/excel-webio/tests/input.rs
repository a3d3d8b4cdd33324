//! End-to-end tests for the input adapters (file -> adapter -> projections)

use excel_webio::prelude::*;
use pretty_assertions::assert_eq;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

/// Reads whatever file the test names through `field_name`
struct PathInput;

impl ExcelInput for PathInput {
    fn load_single_sheet(&mut self, options: &InputOptions) -> WebioResult<Option<Sheet>> {
        FileInput::from_path(field_path(options)).load_single_sheet(options)
    }

    fn load_book(&mut self, options: &InputOptions) -> WebioResult<Option<Book>> {
        FileInput::from_path(field_path(options)).load_book(options)
    }
}

fn field_path(options: &InputOptions) -> PathBuf {
    PathBuf::from(options.field_name.clone().unwrap_or_default())
}

/// An upload form with a single field
struct UploadForm {
    file_type: Option<&'static str>,
    content: Option<Vec<u8>>,
}

impl ExcelInputInMultiDict for UploadForm {
    fn get_file_tuple(&mut self, _field_name: Option<&str>) -> WebioResult<FileTuple<'_>> {
        Ok(FileTuple {
            file_type: self.file_type.map(str::to_string),
            stream: self
                .content
                .as_ref()
                .map(|content| Box::new(Cursor::new(content.as_slice())) as Box<dyn Read + '_>),
        })
    }
}

fn data() -> Vec<Vec<CellValue>> {
    vec![
        vec!["X".into(), "Y".into(), "Z".into()],
        vec![1.into(), 2.into(), 3.into()],
        vec![4.into(), 5.into(), 6.into()],
    ]
}

fn save(path: &Path, book: &Book) {
    book.save_as(path, &SaveOptions::default()).unwrap();
}

fn sheet_file(dir: &Path, file_name: &str) -> InputOptions {
    let path = dir.join(file_name);
    save(&path, &Book::from(Sheet::from_array("Sheet1", data())));
    InputOptions::for_field(path.to_str().unwrap())
}

/// Every projection on the base contract signals "not implemented"
#[test]
fn test_base_contract_not_implemented() {
    struct Bare;
    impl ExcelInput for Bare {}

    let options = InputOptions::default();
    assert!(matches!(Bare.get_sheet(&options), Err(WebioError::NotImplemented(_))));
    assert!(matches!(Bare.get_array(&options), Err(WebioError::NotImplemented(_))));
    assert!(matches!(Bare.get_dict(&options), Err(WebioError::NotImplemented(_))));
    assert!(matches!(Bare.get_records(&options), Err(WebioError::NotImplemented(_))));
    assert!(matches!(Bare.get_book(&options), Err(WebioError::NotImplemented(_))));
    assert!(matches!(Bare.get_book_dict(&options), Err(WebioError::NotImplemented(_))));
}

#[test]
fn test_no_input_present() {
    let mut input = FileInput::empty();
    let options = InputOptions::default();

    assert_eq!(input.get_sheet(&options).unwrap(), None);
    assert_eq!(input.get_array(&options).unwrap(), None);
    assert_eq!(input.get_dict(&options).unwrap(), None);
    assert_eq!(input.get_records(&options).unwrap(), None);
    assert_eq!(input.get_book(&options).unwrap().map(|b| b.sheet_count()), None);
    assert_eq!(input.get_book_dict(&options).unwrap(), None);
}

#[test]
fn test_get_sheet_and_array() {
    let dir = tempfile::tempdir().unwrap();
    for file_name in ["testfile.xlsx", "testfile.ods", "testfile.csv"] {
        let options = sheet_file(dir.path(), file_name);

        let sheet = PathInput.get_sheet(&options).unwrap().unwrap();
        assert_eq!(sheet.to_array(), data(), "{file_name}");

        let array = PathInput.get_array(&options).unwrap().unwrap();
        assert_eq!(array, data(), "{file_name}");
    }
}

#[test]
fn test_get_dict() {
    let dir = tempfile::tempdir().unwrap();
    let options = sheet_file(dir.path(), "testfile.xlsx");

    let result = PathInput.get_dict(&options).unwrap().unwrap();
    let expected: ColumnDict = [
        ("X", vec![CellValue::from(1), 4.into()]),
        ("Y", vec![2.into(), 5.into()]),
        ("Z", vec![3.into(), 6.into()]),
    ]
    .into_iter()
    .collect();
    assert_eq!(result, expected);
}

#[test]
fn test_get_records() {
    let dir = tempfile::tempdir().unwrap();
    let options = sheet_file(dir.path(), "testfile.xlsx");

    let result = PathInput.get_records(&options).unwrap().unwrap();
    let expected: Vec<Record> = vec![
        [("X", CellValue::from(1)), ("Y", 2.into()), ("Z", 3.into())]
            .into_iter()
            .collect(),
        [("X", CellValue::from(4)), ("Y", 5.into()), ("Z", 6.into())]
            .into_iter()
            .collect(),
    ];
    assert_eq!(result, expected);
}

#[test]
fn test_get_book_and_book_dict() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("testfile.xlsx");
    let data1: Vec<Vec<CellValue>> = vec![
        vec!["A".into(), "B".into(), "C".into()],
        vec![1.into(), 2.into(), 3.into()],
        vec![4.into(), 5.into(), 6.into()],
    ];
    let book = Book::from_sheets([
        Sheet::from_array("sheet1", data()),
        Sheet::from_array("sheet2", data1.clone()),
    ])
    .unwrap();
    save(&path, &book);
    let options = InputOptions::for_field(path.to_str().unwrap());

    let result = PathInput.get_book(&options).unwrap().unwrap();
    assert_eq!(result.sheet_names(), vec!["sheet1", "sheet2"]);
    assert_eq!(result.sheet_by_name("sheet1").unwrap().to_array(), data());
    assert_eq!(result.sheet_by_name("sheet2").unwrap().to_array(), data1);

    let result = PathInput.get_book_dict(&options).unwrap().unwrap();
    assert_eq!(result.get("sheet1"), Some(&data()));
    assert_eq!(result.get("sheet2"), Some(&data1));
}

#[test]
fn test_sheet_name_selects_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("testfile.ods");
    let book = Book::from_sheets([
        Sheet::from_array("first", vec![vec![1]]),
        Sheet::from_array("second", vec![vec![2]]),
    ])
    .unwrap();
    save(&path, &book);

    let options = InputOptions::for_field(path.to_str().unwrap()).with_sheet_name("second");
    let array = PathInput.get_array(&options).unwrap().unwrap();
    assert_eq!(array, vec![vec![CellValue::from(2)]]);
}

#[test]
fn test_unknown_parameters_propagate() {
    let mut input = FileInput::from_content(FileType::Csv, b"X,Y\n1,2\n".to_vec());
    let mut options = InputOptions::default();
    options.load.extra.insert("unrelated".into(), "foo bar".into());

    let err = input.get_sheet(&options).unwrap_err();
    assert!(matches!(
        err,
        WebioError::Io(excel_webio_io::IoError::UnknownParameters(keys)) if keys == ["unrelated"]
    ));
}

#[test]
fn test_upload_form() {
    let mut form = UploadForm {
        file_type: Some("csv"),
        content: Some(b"X,Y,Z\n1,2,3\n4,5,6\n".to_vec()),
    };
    let array = form.get_array(&InputOptions::for_field("file")).unwrap().unwrap();
    assert_eq!(array, data());
}

/// A field with a type but no stream must fail, not load an empty sheet
#[test]
fn test_upload_form_without_stream() {
    let mut form = UploadForm {
        file_type: Some("csv"),
        content: None,
    };
    let err = form.get_array(&InputOptions::for_field("file")).unwrap_err();
    assert!(matches!(err, WebioError::InvalidInput(_)));

    let mut form = UploadForm {
        file_type: None,
        content: Some(b"X\n".to_vec()),
    };
    let err = form.get_book(&InputOptions::for_field("file")).unwrap_err();
    assert!(matches!(err, WebioError::InvalidInput(_)));
}

/// Latin-1 upload with a non-ASCII character
#[test]
fn test_issue_4_latin1_upload() {
    let mut content = b"Last Name,First Name,Company,Email,Job Title\n".to_vec();
    content.extend_from_slice(b"Test,Th\xefs,Cool Co,test.this@example.com,Founder\n");
    let mut form = UploadForm {
        file_type: Some("csv"),
        content: Some(content),
    };

    let options = InputOptions::for_field("file").with_encoding("latin1");
    let array = form.get_array(&options).unwrap().unwrap();
    assert_eq!(
        array,
        vec![
            vec![
                CellValue::from("Last Name"),
                "First Name".into(),
                "Company".into(),
                "Email".into(),
                "Job Title".into(),
            ],
            vec![
                CellValue::from("Test"),
                "Th\u{ef}s".into(),
                "Cool Co".into(),
                "test.this@example.com".into(),
                "Founder".into(),
            ],
        ]
    );
}

#[test]
fn test_malformed_upload_propagates() {
    let mut form = UploadForm {
        file_type: Some("xlsx"),
        content: Some(b"definitely not a zip archive".to_vec()),
    };
    let err = form.get_sheet(&InputOptions::for_field("file")).unwrap_err();
    assert!(matches!(err, WebioError::Io(_)));
}
