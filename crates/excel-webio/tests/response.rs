//! End-to-end tests for responses (data -> responder -> payload -> read back)

use excel_webio::prelude::*;
use excel_webio::FILE_TYPE_MIME_TABLE;
use excel_webio_io::{load_book, load_sheet, IoError};
use pretty_assertions::assert_eq;

/// Hands the payload straight back
fn identity(payload: ExcelPayload) -> ExcelPayload {
    payload
}

fn responder() -> ExcelResponder<fn(ExcelPayload) -> ExcelPayload> {
    ExcelResponder::new(identity as fn(ExcelPayload) -> ExcelPayload)
}

fn data() -> Vec<Vec<CellValue>> {
    vec![
        vec!["X".into(), "Y".into(), "Z".into()],
        vec![1.into(), 2.into(), 3.into()],
        vec![4.into(), 5.into(), 6.into()],
    ]
}

fn book_content() -> BookDict {
    [
        (
            "Sheet1",
            vec![vec![CellValue::from(1); 4], vec![2.into(); 4], vec![3.into(); 4]],
        ),
        (
            "Sheet2",
            vec![vec![CellValue::from(4); 4], vec![5.into(); 4], vec![6.into(); 4]],
        ),
        (
            "Sheet3",
            vec![
                vec!["X".into(), "Y".into(), "Z".into()],
                vec![1.into(), 4.into(), 7.into()],
                vec![2.into(), 5.into(), 8.into()],
                vec![3.into(), 6.into(), 9.into()],
            ],
        ),
    ]
    .into_iter()
    .collect()
}

fn read_sheet(payload: ExcelPayload, file_type: FileType) -> Vec<Vec<CellValue>> {
    let descriptor = FileDescriptor::from_content(file_type, payload.content);
    load_sheet(descriptor, &LoadOptions::default())
        .unwrap()
        .to_array()
}

fn read_book(payload: ExcelPayload, file_type: FileType) -> BookDict {
    let descriptor = FileDescriptor::from_content(file_type, payload.content);
    load_book(descriptor, &LoadOptions::default())
        .unwrap()
        .to_dict()
}

fn records() -> Vec<Record> {
    vec![
        [("X", CellValue::from(1)), ("Y", 2.into()), ("Z", 3.into())]
            .into_iter()
            .collect(),
        [("X", CellValue::from(4)), ("Y", 5.into()), ("Z", 6.into())]
            .into_iter()
            .collect(),
    ]
}

#[test]
fn test_make_response_from_sheet() {
    let sheet = Sheet::from_array("Sheet1", data());
    let payload = responder()
        .make_response(&sheet, "xlsx", &ResponseOptions::default())
        .unwrap();

    assert_eq!(payload.status, 200);
    assert_eq!(
        payload.content_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(payload.file_name, None);
    assert_eq!(read_sheet(payload, FileType::Xlsx), data());
}

/// Serialize and reload through every writable spreadsheet format
#[test]
fn test_round_trip() {
    for file_type in [FileType::Xls, FileType::Xlsx, FileType::Ods, FileType::Csv] {
        let payload = responder()
            .make_response_from_array(data(), file_type.tag(), &ResponseOptions::default())
            .unwrap();
        assert_eq!(read_sheet(payload, file_type), data(), "{file_type}");
    }
}

#[test]
fn test_make_response_from_records() {
    let payload = responder()
        .make_response_from_records(&records(), "ods", &ResponseOptions::default())
        .unwrap();
    assert_eq!(read_sheet(payload, FileType::Ods), data());
}

#[test]
fn test_make_response_from_dict() {
    let adict: ColumnDict = [
        ("X", vec![CellValue::from(1), 4.into()]),
        ("Y", vec![2.into(), 5.into()]),
        ("Z", vec![3.into(), 6.into()]),
    ]
    .into_iter()
    .collect();

    let payload = responder()
        .make_response_from_dict(&adict, "xlsx", &ResponseOptions::default())
        .unwrap();
    assert_eq!(read_sheet(payload, FileType::Xlsx), data());
}

#[test]
fn test_make_response_from_book() {
    let book = Book::from_dict(&book_content()).unwrap();
    let payload = responder()
        .make_response(&book, "xlsx", &ResponseOptions::default())
        .unwrap();
    assert_eq!(read_book(payload, FileType::Xlsx), book_content());
}

#[test]
fn test_make_response_from_book_dict() {
    let payload = responder()
        .make_response_from_book_dict(&book_content(), "ods", &ResponseOptions::default())
        .unwrap();
    assert_eq!(read_book(payload, FileType::Ods), book_content());
}

#[test]
fn test_make_response_from_book_dict_as_csv() {
    let payload = responder()
        .make_response_from_book_dict(&book_content(), "csv", &ResponseOptions::default())
        .unwrap();
    let text = String::from_utf8(payload.content).unwrap();
    assert!(text.starts_with("---pyexcel:Sheet1---\r\n1,1,1,1\r\n"));
    assert!(text.contains("---pyexcel:Sheet3---\r\nX,Y,Z\r\n"));
    assert!(text.ends_with("---pyexcel---\r\n"));
}

#[test]
fn test_make_response_from_query_sets() {
    let payload = responder()
        .make_response_from_query_sets(&records(), &["Z", "X"], "csv", &ResponseOptions::default())
        .unwrap();
    assert_eq!(payload.content, b"Z,X\r\n3,1\r\n6,4\r\n");
}

/// No column names, no data
#[test]
fn test_make_response_from_query_sets_without_column_names() {
    let payload = responder()
        .make_response_from_query_sets(&records(), &[], "csv", &ResponseOptions::default())
        .unwrap();
    assert!(payload.content.is_empty());
}

#[test]
fn test_make_response_from_tables() {
    let mut session = MemorySession::new();
    session.create_table("signature", &["X", "Y", "Z"]);
    session.create_table("signature2", &["A", "B", "C"]);
    for record in records() {
        session.add("signature", record).unwrap();
    }
    session
        .add(
            "signature2",
            [("A", CellValue::from(7)), ("B", 8.into()), ("C", 9.into())]
                .into_iter()
                .collect(),
        )
        .unwrap();
    session.commit().unwrap();

    let payload = responder()
        .make_response_from_a_table(&session, "signature", "xlsx", &ResponseOptions::default())
        .unwrap();
    assert_eq!(read_sheet(payload, FileType::Xlsx), data());

    let payload = responder()
        .make_response_from_tables(
            &session,
            &["signature", "signature2"],
            "xlsx",
            &ResponseOptions::default(),
        )
        .unwrap();
    let book = read_book(payload, FileType::Xlsx);
    assert_eq!(book.keys().collect::<Vec<_>>(), vec!["signature", "signature2"]);
    assert_eq!(book.get("signature"), Some(&data()));
    assert_eq!(
        book.get("signature2"),
        Some(&vec![
            vec![CellValue::from("A"), "B".into(), "C".into()],
            vec![7.into(), 8.into(), 9.into()],
        ])
    );
}

/// Every tag of the MIME table resolves and can be written
#[test]
fn test_every_file_type_has_a_mime_type() {
    for (tag, mime) in FILE_TYPE_MIME_TABLE {
        let payload = responder()
            .make_response_from_array(data(), tag, &ResponseOptions::default())
            .unwrap();
        assert_eq!(payload.content_type, *mime, "{tag}");
        assert!(!payload.content.is_empty(), "{tag}");
    }
}

#[test]
fn test_make_response_from_book_dict_as_xls() {
    let payload = responder()
        .make_response_from_book_dict(&book_content(), "xls", &ResponseOptions::default())
        .unwrap();
    assert_eq!(payload.content_type, "application/vnd.ms-excel");
    assert_eq!(read_book(payload, FileType::Xls), book_content());
}

#[test]
fn test_unknown_file_type() {
    let err = responder()
        .make_response_from_array(data(), "bla", &ResponseOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        WebioError::Core(excel_webio_core::Error::UnknownFileType(tag)) if tag == "bla"
    ));
}

#[test]
fn test_status_and_file_name() {
    let options = ResponseOptions::default()
        .with_status(201)
        .with_file_name("signatures");
    let payload = responder()
        .make_response_from_array(data(), "tsv", &options)
        .unwrap();
    assert_eq!(payload.status, 201);
    assert_eq!(payload.content_type, "text/tab-separated-values");
    assert_eq!(payload.file_name.as_deref(), Some("signatures.tsv"));
    assert_eq!(payload.content, b"X\tY\tZ\r\n1\t2\t3\r\n4\t5\t6\r\n");

    let options = ResponseOptions::default().with_file_name("signatures.csvz");
    let payload = responder()
        .make_response_from_array(data(), "csvz", &options)
        .unwrap();
    assert_eq!(payload.file_name.as_deref(), Some("signatures.csvz"));
}

#[test]
fn test_sheet_name_option() {
    let options = ResponseOptions::default().with_sheet_name("signatures");
    let payload = responder()
        .make_response_from_array(data(), "json", &options)
        .unwrap();
    let book = read_book(payload, FileType::Json);
    assert_eq!(book.keys().collect::<Vec<_>>(), vec!["Sheet1"]);
    assert_eq!(book.get("Sheet1"), Some(&data()));

    let payload = responder()
        .make_response_from_array(data(), "ods", &options)
        .unwrap();
    let book = read_book(payload, FileType::Ods);
    assert_eq!(book.keys().collect::<Vec<_>>(), vec!["signatures"]);
}

#[test]
fn test_unknown_save_parameters() {
    let mut options = ResponseOptions::default();
    options.save.extra.insert("colour".into(), "red".into());
    let err = responder()
        .make_response_from_array(data(), "csv", &options)
        .unwrap_err();
    assert!(matches!(err, WebioError::Io(IoError::UnknownParameters(_))));
}

#[test]
fn test_default_factory_returns_nothing() {
    let responder: ExcelResponder = ExcelResponder::default();
    let response = responder
        .make_response_from_array(data(), "xlsx", &ResponseOptions::default())
        .unwrap();
    assert_eq!(response, None);
}
