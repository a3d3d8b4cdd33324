//! JSON reader/writer
//!
//! A single sheet is an array of rows; a book is an object of sheet name to
//! rows.

use std::io::Write;

use excel_webio_core::{Book, CellValue, Sheet, DEFAULT_SHEET_NAME};
use serde_json::Value;

use crate::error::{IoError, IoResult};

/// Write one sheet as an array of rows
pub fn write_sheet<W: Write>(sheet: &Sheet, writer: W) -> IoResult<()> {
    serde_json::to_writer(writer, sheet.rows())?;
    Ok(())
}

/// Write a book; a book of one sheet is written as that sheet
pub fn write_book<W: Write>(book: &Book, writer: W) -> IoResult<()> {
    match book.sheet(0) {
        Some(sheet) if book.sheet_count() == 1 => write_sheet(sheet, writer),
        _ => {
            serde_json::to_writer(writer, &book.to_dict())?;
            Ok(())
        }
    }
}

/// Read either layout back into a book
pub fn read(content: &[u8]) -> IoResult<Book> {
    match serde_json::from_slice::<Value>(content)? {
        Value::Array(rows) => Ok(Book::from(to_sheet(DEFAULT_SHEET_NAME, rows)?)),
        Value::Object(sheets) => {
            let mut book = Book::new();
            for (name, rows) in sheets {
                let Value::Array(rows) = rows else {
                    return Err(IoError::Parse(format!("sheet {name:?} is not an array")));
                };
                book.add_sheet(to_sheet(&name, rows)?)?;
            }
            Ok(book)
        }
        _ => Err(IoError::Parse(
            "expected an array of rows or an object of sheets".into(),
        )),
    }
}

fn to_sheet(name: &str, rows: Vec<Value>) -> IoResult<Sheet> {
    let mut sheet = Sheet::new(name);
    for row in rows {
        let Value::Array(cells) = row else {
            return Err(IoError::Parse(format!("row in {name:?} is not an array")));
        };
        sheet.push_row(cells.into_iter().map(to_cell_value).collect::<IoResult<Vec<_>>>()?);
    }
    Ok(sheet)
}

fn to_cell_value(value: Value) -> IoResult<CellValue> {
    Ok(match value {
        Value::Null => CellValue::Empty,
        Value::Bool(b) => CellValue::Boolean(b),
        Value::Number(n) => match n.as_f64() {
            Some(f) => CellValue::Number(f),
            None => return Err(IoError::Parse(format!("number out of range: {n}"))),
        },
        Value::String(s) if s.is_empty() => CellValue::Empty,
        Value::String(s) => CellValue::String(s),
        other => return Err(IoError::Parse(format!("not a cell value: {other}"))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sheet_layout() {
        let sheet = Sheet::from_array(
            "s",
            vec![vec![CellValue::from("X"), 1.5.into()], vec![2.into(), CellValue::Empty]],
        );
        let mut out = Vec::new();
        write_sheet(&sheet, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), r#"[["X",1.5],[2,""]]"#);
    }

    #[test]
    fn test_book_layout_keeps_sheet_order() {
        let book = Book::from_sheets([
            Sheet::from_array("b", vec![vec![1]]),
            Sheet::from_array("a", vec![vec![2]]),
        ])
        .unwrap();
        let mut out = Vec::new();
        write_book(&book, &mut out).unwrap();
        assert_eq!(String::from_utf8(out.clone()).unwrap(), r#"{"b":[[1]],"a":[[2]]}"#);

        let back = read(&out).unwrap();
        assert_eq!(back.to_dict(), book.to_dict());
    }

    #[test]
    fn test_rejects_nested_objects() {
        assert!(matches!(read(br#"[[{"a":1}]]"#), Err(IoError::Parse(_))));
        assert!(matches!(read(b"42"), Err(IoError::Parse(_))));
    }
}
