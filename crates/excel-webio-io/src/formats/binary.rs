//! XLS, XLSX, XLSM and ODS reading through calamine

use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, Ods, Range, Reader, Xls, Xlsx};
use excel_webio_core::{Book, CellValue, FileType, Sheet};

use crate::error::{IoError, IoResult};

/// Read a workbook of the given type from memory
pub fn read(content: Vec<u8>, file_type: FileType) -> IoResult<Book> {
    let cursor = Cursor::new(content);
    match file_type {
        FileType::Xls => {
            let workbook: Xls<_> = open_workbook_from_rs(cursor).map_err(calamine::Error::from)?;
            collect(workbook)
        }
        FileType::Xlsx | FileType::Xlsm => {
            let workbook: Xlsx<_> =
                open_workbook_from_rs(cursor).map_err(calamine::Error::from)?;
            collect(workbook)
        }
        FileType::Ods => {
            let workbook: Ods<_> = open_workbook_from_rs(cursor).map_err(calamine::Error::from)?;
            collect(workbook)
        }
        other => Err(IoError::UnsupportedFormat {
            file_type: other,
            operation: "read",
        }),
    }
}

fn collect<R>(mut workbook: R) -> IoResult<Book>
where
    R: Reader<Cursor<Vec<u8>>>,
    calamine::Error: From<R::Error>,
{
    let mut book = Book::new();
    for name in workbook.sheet_names() {
        let range = match workbook.worksheet_range(&name) {
            Ok(range) => range,
            Err(e) => {
                let e = calamine::Error::from(e);
                log::warn!("failed to read sheet {name:?}: {e}");
                return Err(e.into());
            }
        };
        book.add_sheet(to_sheet(&name, &range))?;
    }
    Ok(book)
}

fn to_sheet(name: &str, range: &Range<Data>) -> Sheet {
    let mut sheet = Sheet::new(name);
    let Some((start_row, start_col)) = range.start() else {
        return sheet;
    };

    // Range coordinates are relative to its first used cell; keep the blank
    // rows and columns above and left of it.
    for _ in 0..start_row {
        sheet.push_row(Vec::<CellValue>::new());
    }
    let lead = start_col as usize;
    for row in range.rows() {
        sheet.push_row(
            std::iter::repeat(CellValue::Empty)
                .take(lead)
                .chain(row.iter().map(to_cell_value)),
        );
    }
    sheet
}

fn to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::string(s.as_str()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Boolean(*b),
        other => CellValue::string(other.to_string()),
    }
}
