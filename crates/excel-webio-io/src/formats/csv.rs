//! CSV and TSV reader/writer

use std::io::Write;

use encoding_rs::Encoding;
use excel_webio_core::{Book, CellValue, Sheet};

use crate::error::{IoError, IoResult};
use crate::options::{LineTerminator, LoadOptions, SaveOptions};

/// Marker lines framing each sheet when a multi-sheet book is written as csv
const SHEET_START: &str = "---pyexcel:";
const SHEET_END: &str = "---pyexcel---";

/// CSV reader
pub struct CsvReader;

impl CsvReader {
    /// Read csv bytes into a sheet
    pub fn read(
        content: &[u8],
        name: &str,
        default_delimiter: u8,
        options: &LoadOptions,
    ) -> IoResult<Sheet> {
        let text = Self::decode(content, options.encoding.as_deref())?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter.unwrap_or(default_delimiter))
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut sheet = Sheet::new(name);
        for result in csv_reader.records() {
            let record = result?;
            sheet.push_row(record.iter().map(|field| {
                if options.auto_detect_types {
                    Self::detect_type(field)
                } else {
                    CellValue::string(field)
                }
            }));
        }

        Ok(sheet)
    }

    /// Decode to UTF-8, honouring a byte order mark
    fn decode(content: &[u8], label: Option<&str>) -> IoResult<String> {
        let encoding = match label {
            Some(label) => Encoding::for_label(label.as_bytes())
                .ok_or_else(|| IoError::UnknownEncoding(label.to_string()))?,
            None => encoding_rs::UTF_8,
        };

        let (text, used, had_errors) = encoding.decode(content);
        if had_errors {
            return Err(IoError::Parse(format!(
                "content is not valid {}",
                used.name()
            )));
        }
        Ok(text.into_owned())
    }

    /// Detect the type of a field value
    fn detect_type(field: &str) -> CellValue {
        let trimmed = field.trim();

        if trimmed.is_empty() {
            return CellValue::Empty;
        }

        if trimmed.eq_ignore_ascii_case("true") {
            return CellValue::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return CellValue::Boolean(false);
        }

        if has_leading_zero(trimmed) {
            return CellValue::string(field);
        }

        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::string(field),
        }
    }
}

/// Zip codes, phone numbers and other zero-padded codes, e.g. `02134`
fn has_leading_zero(field: &str) -> bool {
    let digits = field.strip_prefix(['-', '+']).unwrap_or(field);
    let mut chars = digits.chars();
    chars.next() == Some('0') && chars.next().is_some_and(|c| c.is_ascii_digit())
}

/// CSV writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write one sheet
    pub fn write_sheet<W: Write>(
        sheet: &Sheet,
        writer: W,
        default_delimiter: u8,
        options: &SaveOptions,
    ) -> IoResult<()> {
        let mut csv_writer = Self::builder(default_delimiter, options).from_writer(writer);

        for row in sheet.iter_rows() {
            csv_writer.write_record(row.iter().map(ToString::to_string))?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Write a book; several sheets are framed by marker lines
    pub fn write_book<W: Write>(
        book: &Book,
        mut writer: W,
        default_delimiter: u8,
        options: &SaveOptions,
    ) -> IoResult<()> {
        if book.sheet_count() == 1 {
            if let Some(sheet) = book.sheet(0) {
                return Self::write_sheet(sheet, writer, default_delimiter, options);
            }
        }

        let eol = options.line_terminator.as_str();
        for sheet in book.sheets() {
            write!(writer, "{SHEET_START}{}---{eol}", sheet.name())?;
            Self::write_sheet(sheet, &mut writer, default_delimiter, options)?;
            write!(writer, "{SHEET_END}{eol}")?;
        }
        Ok(())
    }

    fn builder(default_delimiter: u8, options: &SaveOptions) -> csv::WriterBuilder {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut builder = csv::WriterBuilder::new();
        builder
            .delimiter(options.delimiter.unwrap_or(default_delimiter))
            .quote(options.quote)
            .terminator(terminator)
            .flexible(true);
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_detect_types() {
        assert_eq!(CsvReader::detect_type("1"), CellValue::Number(1.0));
        assert_eq!(CsvReader::detect_type(" 2.5 "), CellValue::Number(2.5));
        assert_eq!(CsvReader::detect_type("TRUE"), CellValue::Boolean(true));
        assert_eq!(CsvReader::detect_type(""), CellValue::Empty);
        assert_eq!(CsvReader::detect_type("inf"), CellValue::string("inf"));
        assert_eq!(CsvReader::detect_type("X"), CellValue::string("X"));
    }

    #[test]
    fn test_zero_padded_codes_stay_text() {
        assert_eq!(CsvReader::detect_type("02134"), CellValue::string("02134"));
        assert_eq!(CsvReader::detect_type("-007"), CellValue::string("-007"));
        assert_eq!(CsvReader::detect_type("0"), CellValue::Number(0.0));
        assert_eq!(CsvReader::detect_type("0.5"), CellValue::Number(0.5));
        assert_eq!(CsvReader::detect_type("-0.25"), CellValue::Number(-0.25));

        let sheet = CsvReader::read(b"zip,n\n02134,10\n", "s", b',', &LoadOptions::default())
            .unwrap();
        assert_eq!(sheet.row(1), Some(&[CellValue::string("02134"), 10.into()][..]));
    }

    #[test]
    fn test_read_latin1() {
        // "Thïs" encoded as ISO-8859-1
        let content = b"Last Name,First Name\nTest,Th\xefs\n";
        let options = LoadOptions {
            encoding: Some("latin1".to_string()),
            ..LoadOptions::default()
        };
        let sheet = CsvReader::read(content, "s", b',', &options).unwrap();
        assert_eq!(sheet.cell(1, 1), Some(&CellValue::string("Th\u{ef}s")));
    }

    #[test]
    fn test_invalid_utf8_without_encoding() {
        let err = CsvReader::read(b"Th\xefs\n", "s", b',', &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, IoError::Parse(_)));
    }

    #[test]
    fn test_unknown_encoding() {
        let options = LoadOptions {
            encoding: Some("klingon".to_string()),
            ..LoadOptions::default()
        };
        let err = CsvReader::read(b"a", "s", b',', &options).unwrap_err();
        assert!(matches!(err, IoError::UnknownEncoding(_)));
    }

    #[test]
    fn test_write_quotes_when_needed() {
        let sheet = Sheet::from_array("s", vec![vec!["a,b", "c"], vec!["1", "2"]]);
        let mut out = Vec::new();
        let options = SaveOptions {
            line_terminator: LineTerminator::LF,
            ..SaveOptions::default()
        };
        CsvWriter::write_sheet(&sheet, &mut out, b',', &options).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\"a,b\",c\n1,2\n");
    }

    #[test]
    fn test_write_book_frames_sheets() {
        let book = Book::from_sheets([
            Sheet::from_array("one", vec![vec![1]]),
            Sheet::from_array("two", vec![vec![2]]),
        ])
        .unwrap();
        let mut out = Vec::new();
        let options = SaveOptions {
            line_terminator: LineTerminator::LF,
            ..SaveOptions::default()
        };
        CsvWriter::write_book(&book, &mut out, b',', &options).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "---pyexcel:one---\n1\n---pyexcel---\n---pyexcel:two---\n2\n---pyexcel---\n"
        );
    }
}
