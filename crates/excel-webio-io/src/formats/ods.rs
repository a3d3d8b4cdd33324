//! ODS writer (OpenDocument spreadsheet, values only)

use std::io::{Seek, Write};

use excel_webio_core::{Book, CellValue, Sheet};
use quick_xml::escape::escape;

use crate::error::IoResult;

const MIMETYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";

/// ODS file writer
pub struct OdsWriter;

impl OdsWriter {
    /// Write a book to a writer
    pub fn write<W: Write + Seek>(book: &Book, writer: W) -> IoResult<()> {
        let mut zip = zip::ZipWriter::new(writer);
        let options = zip::write::SimpleFileOptions::default();

        // The mimetype entry must come first and be stored uncompressed.
        zip.start_file(
            "mimetype",
            options.compression_method(zip::CompressionMethod::Stored),
        )?;
        zip.write_all(MIMETYPE.as_bytes())?;

        zip.start_file("META-INF/manifest.xml", options)?;
        zip.write_all(
            format!(
                r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0" manifest:version="1.2">
    <manifest:file-entry manifest:full-path="/" manifest:media-type="{MIMETYPE}"/>
    <manifest:file-entry manifest:full-path="content.xml" manifest:media-type="text/xml"/>
</manifest:manifest>"#
            )
            .as_bytes(),
        )?;

        zip.start_file("content.xml", options)?;
        zip.write_all(Self::content_xml(book).as_bytes())?;

        zip.finish()?;
        Ok(())
    }

    fn content_xml(book: &Book) -> String {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" office:version="1.2">
    <office:body>
        <office:spreadsheet>"#,
        );

        for sheet in book.sheets() {
            Self::push_table(&mut content, sheet);
        }

        content.push_str(
            r#"
        </office:spreadsheet>
    </office:body>
</office:document-content>"#,
        );
        content
    }

    fn push_table(content: &mut String, sheet: &Sheet) {
        content.push_str(&format!(
            "\n            <table:table table:name=\"{}\">",
            escape(sheet.name())
        ));

        for row in sheet.iter_rows() {
            content.push_str("\n                <table:table-row>");
            for value in row {
                match value {
                    CellValue::Empty => content.push_str("<table:table-cell/>"),
                    CellValue::Number(n) => content.push_str(&format!(
                        "<table:table-cell office:value-type=\"float\" office:value=\"{n}\"><text:p>{n}</text:p></table:table-cell>"
                    )),
                    CellValue::Boolean(b) => content.push_str(&format!(
                        "<table:table-cell office:value-type=\"boolean\" office:boolean-value=\"{b}\"><text:p>{b}</text:p></table:table-cell>"
                    )),
                    CellValue::String(s) => content.push_str(&format!(
                        "<table:table-cell office:value-type=\"string\"><text:p>{}</text:p></table:table-cell>",
                        escape(s.as_str())
                    )),
                }
            }
            content.push_str("</table:table-row>");
        }

        content.push_str("\n            </table:table>");
    }
}
