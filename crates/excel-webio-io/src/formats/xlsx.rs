//! XLSX/XLSM writer
//!
//! Writes cell values only: no styles beyond the default, no shared strings.
//! Reading goes through [`super::calamine`].

use std::io::{Seek, Write};

use excel_webio_core::{Book, CellValue, Sheet};
use quick_xml::escape::escape;

use crate::error::IoResult;

const WORKBOOK_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
const MACRO_WORKBOOK_CONTENT_TYPE: &str = "application/vnd.ms-excel.sheet.macroEnabled.main+xml";

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a book to a writer
    ///
    /// `macro_enabled` only changes the declared workbook content type (xlsm).
    pub fn write<W: Write + Seek>(book: &Book, writer: W, macro_enabled: bool) -> IoResult<()> {
        let mut zip = zip::ZipWriter::new(writer);
        let options = zip::write::SimpleFileOptions::default();

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(Self::content_types(book, macro_enabled).as_bytes())?;

        zip.start_file("_rels/.rels", options)?;
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#,
        )?;

        zip.start_file("xl/workbook.xml", options)?;
        zip.write_all(Self::workbook_xml(book).as_bytes())?;

        zip.start_file("xl/_rels/workbook.xml.rels", options)?;
        zip.write_all(Self::workbook_rels(book).as_bytes())?;

        zip.start_file("xl/styles.xml", options)?;
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>
    <fills count="1"><fill><patternFill patternType="none"/></fill></fills>
    <borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>
    <cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
    <cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>
</styleSheet>"#,
        )?;

        for (i, sheet) in book.sheets().enumerate() {
            zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options)?;
            zip.write_all(Self::worksheet_xml(sheet).as_bytes())?;
        }

        zip.finish()?;
        Ok(())
    }

    fn content_types(book: &Book, macro_enabled: bool) -> String {
        let main = if macro_enabled {
            MACRO_WORKBOOK_CONTENT_TYPE
        } else {
            WORKBOOK_CONTENT_TYPE
        };

        let mut content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="{main}"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#
        );

        for i in 0..book.sheet_count() {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            ));
        }

        content.push_str("\n</Types>");
        content
    }

    fn workbook_xml(book: &Book) -> String {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>"#,
        );

        for (i, sheet) in book.sheets().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape(sheet.name()),
                i + 1,
                i + 1
            ));
        }

        content.push_str(
            r#"
    </sheets>
</workbook>"#,
        );
        content
    }

    fn workbook_rels(book: &Book) -> String {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for i in 0..book.sheet_count() {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }

        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#,
            book.sheet_count() + 1
        ));
        content
    }

    fn worksheet_xml(sheet: &Sheet) -> String {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <sheetData>"#,
        );

        for (row, cells) in sheet.iter_rows().enumerate() {
            content.push_str(&format!("\n        <row r=\"{}\">", row + 1));

            for (col, value) in cells.iter().enumerate() {
                let cell_ref = format!("{}{}", column_letters(col), row + 1);
                match value {
                    CellValue::Empty => {}
                    CellValue::Number(n) => {
                        content.push_str(&format!("<c r=\"{cell_ref}\"><v>{n}</v></c>"));
                    }
                    CellValue::Boolean(b) => {
                        content.push_str(&format!(
                            "<c r=\"{cell_ref}\" t=\"b\"><v>{}</v></c>",
                            u8::from(*b)
                        ));
                    }
                    CellValue::String(s) => {
                        content.push_str(&format!(
                            "<c r=\"{cell_ref}\" t=\"inlineStr\"><is><t xml:space=\"preserve\">{}</t></is></c>",
                            escape(s.as_str())
                        ));
                    }
                }
            }

            content.push_str("</row>");
        }

        content.push_str(
            r#"
    </sheetData>
</worksheet>"#,
        );
        content
    }
}

/// Zero-based column index to letters: 0 -> A, 25 -> Z, 26 -> AA
fn column_letters(mut col: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (col % 26) as u8);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}
