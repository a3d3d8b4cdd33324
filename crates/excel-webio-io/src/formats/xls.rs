//! XLS (BIFF8) writer
//!
//! A BIFF8 workbook stream is a globals substream followed by one substream
//! per worksheet, all stored as the `Workbook` stream of a compound file.
//! Each record is a 2-byte type, a 2-byte body length and the body.
//!
//! Cell values only: strings go inline as LABEL records, so there is no shared
//! string table, and every cell uses the one default cell format.
//! Reading goes through [`super::binary`].

use std::io::{Cursor, Seek, Write};

use excel_webio_core::{Book, CellValue, FileType, Sheet};

use crate::error::{IoError, IoResult};

// ── Record types ([MS-XLS] 2.3) ─────────────────────────────────────────
const BOF: u16 = 0x0809;
const EOF: u16 = 0x000A;
const CODEPAGE: u16 = 0x0042;
const WINDOW1: u16 = 0x003D;
const FONT: u16 = 0x0031;
const XF: u16 = 0x00E0;
const BOUNDSHEET: u16 = 0x0085;
const DIMENSION: u16 = 0x0200;
const NUMBER: u16 = 0x0203;
const LABEL: u16 = 0x0204;
const BOOLERR: u16 = 0x0205;
const WINDOW2: u16 = 0x023E;

// ── BOF subtypes ────────────────────────────────────────────────────────
const BOF_WORKBOOK_GLOBALS: u16 = 0x0005;
const BOF_WORKSHEET: u16 = 0x0010;
const BIFF8_VERSION: u16 = 0x0600;

/// UTF-16LE
const CODEPAGE_UTF16: u16 = 1200;

/// Longest record body; anything longer needs CONTINUE records
const MAX_RECORD_BODY: usize = 8224;

const MAX_ROWS: usize = 65_536;
const MAX_COLUMNS: usize = 256;

/// Style XFs 0..=14 are the built-in Normal style, 15 is the cell format
const STYLE_XF_COUNT: u16 = 15;
const CELL_XF: u16 = STYLE_XF_COUNT;

/// XLS file writer
pub struct XlsWriter;

impl XlsWriter {
    /// Write a book as a compound file with a single `Workbook` stream
    pub fn write<W: Write + Seek>(book: &Book, mut writer: W) -> IoResult<()> {
        let workbook = Self::workbook_stream(book)?;

        let mut compound =
            cfb::CompoundFile::create_with_version(cfb::Version::V3, Cursor::new(Vec::new()))?;
        {
            let mut stream = compound.create_stream("/Workbook")?;
            stream.write_all(&workbook)?;
            stream.flush()?;
        }
        compound.flush()?;

        writer.write_all(compound.into_inner().get_ref())?;
        log::debug!(
            "wrote xls workbook stream of {} bytes, {} sheets",
            workbook.len(),
            book.sheet_count()
        );
        Ok(())
    }

    /// The BIFF8 `Workbook` stream
    pub(crate) fn workbook_stream(book: &Book) -> IoResult<Vec<u8>> {
        let sheets = book
            .sheets()
            .map(Self::sheet_substream)
            .collect::<IoResult<Vec<_>>>()?;

        let mut globals = RecordWriter::default();
        globals.bof(BOF_WORKBOOK_GLOBALS)?;
        globals.record(CODEPAGE, &CODEPAGE_UTF16.to_le_bytes())?;
        globals.record(WINDOW1, &window1())?;
        globals.record(FONT, &font("Arial"))?;
        for _ in 0..STYLE_XF_COUNT {
            globals.record(XF, &xf(true))?;
        }
        globals.record(XF, &xf(false))?;

        // Sheet offsets are absolute stream positions, known once the
        // globals substream is complete; patched in below.
        let mut offset_slots = Vec::with_capacity(sheets.len());
        for sheet in book.sheets() {
            let mut body = vec![0u8; 4];
            body.push(0x00); // visible
            body.push(0x00); // worksheet
            body.extend(short_string(sheet.name())?);
            offset_slots.push(globals.len() + 4);
            globals.record(BOUNDSHEET, &body)?;
        }
        globals.record(EOF, &[])?;

        let mut stream = globals.into_inner();
        let mut position = stream.len();
        for (slot, substream) in offset_slots.into_iter().zip(&sheets) {
            let offset = u32::try_from(position).map_err(|_| unwritable("workbook too large"))?;
            stream[slot..slot + 4].copy_from_slice(&offset.to_le_bytes());
            position += substream.len();
        }
        for substream in sheets {
            stream.extend(substream);
        }
        Ok(stream)
    }

    fn sheet_substream(sheet: &Sheet) -> IoResult<Vec<u8>> {
        let rows = sheet.number_of_rows();
        let columns = sheet.number_of_columns();
        if rows > MAX_ROWS || columns > MAX_COLUMNS {
            return Err(unwritable(format!(
                "sheet {:?} has {rows} rows and {columns} columns, more than {MAX_ROWS}x{MAX_COLUMNS}",
                sheet.name()
            )));
        }

        let mut out = RecordWriter::default();
        out.bof(BOF_WORKSHEET)?;

        // rwMic, rwMac (one past the last row), colMic, colMac, reserved
        let mut dimension: Vec<u8> = Vec::with_capacity(14);
        dimension.extend(0u32.to_le_bytes());
        dimension.extend((rows as u32).to_le_bytes());
        dimension.extend(0u16.to_le_bytes());
        dimension.extend((columns as u16).to_le_bytes());
        dimension.extend(0u16.to_le_bytes());
        out.record(DIMENSION, &dimension)?;

        for (r, row) in sheet.iter_rows().enumerate() {
            for (c, value) in row.iter().enumerate() {
                let mut body: Vec<u8> = Vec::with_capacity(16);
                body.extend((r as u16).to_le_bytes());
                body.extend((c as u16).to_le_bytes());
                body.extend(CELL_XF.to_le_bytes());
                match value {
                    CellValue::Empty => continue,
                    // A LABEL needs at least one character
                    CellValue::String(s) if s.is_empty() => continue,
                    CellValue::Number(n) => {
                        body.extend(n.to_le_bytes());
                        out.record(NUMBER, &body)?;
                    }
                    CellValue::Boolean(b) => {
                        body.push(u8::from(*b));
                        body.push(0x00); // fError: boolean
                        out.record(BOOLERR, &body)?;
                    }
                    CellValue::String(s) => {
                        body.extend(unicode_string(s)?);
                        out.record(LABEL, &body)?;
                    }
                }
            }
        }

        out.record(WINDOW2, &window2())?;
        out.record(EOF, &[])?;
        Ok(out.into_inner())
    }
}

/// Appends framed records to a substream
#[derive(Default)]
struct RecordWriter {
    buf: Vec<u8>,
}

impl RecordWriter {
    fn record(&mut self, record_type: u16, body: &[u8]) -> IoResult<()> {
        if body.len() > MAX_RECORD_BODY {
            return Err(unwritable(format!(
                "record 0x{record_type:04X} body of {} bytes exceeds {MAX_RECORD_BODY}",
                body.len()
            )));
        }
        self.buf.extend(record_type.to_le_bytes());
        self.buf.extend((body.len() as u16).to_le_bytes());
        self.buf.extend_from_slice(body);
        Ok(())
    }

    fn bof(&mut self, substream_type: u16) -> IoResult<()> {
        let mut body: Vec<u8> = Vec::with_capacity(16);
        body.extend(BIFF8_VERSION.to_le_bytes());
        body.extend(substream_type.to_le_bytes());
        body.extend(0x0DBBu16.to_le_bytes()); // rupBuild
        body.extend(0x07CCu16.to_le_bytes()); // rupYear
        body.extend(0u32.to_le_bytes()); // file history flags
        body.extend(0x0006u32.to_le_bytes()); // lowest BIFF version
        self.record(BOF, &body)
    }

    fn len(&self) -> usize {
        self.buf.len()
    }

    fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

fn unwritable(reason: impl Into<String>) -> IoError {
    IoError::Unwritable {
        file_type: FileType::Xls,
        reason: reason.into(),
    }
}

/// Character data with its `fHighByte` flag: Latin-1 when every character
/// fits in a byte, UTF-16LE otherwise
fn encode_chars(s: &str) -> (u8, Vec<u8>, usize) {
    if s.chars().all(|c| (c as u32) < 0x100) {
        let bytes: Vec<u8> = s.chars().map(|c| c as u8).collect();
        let count = bytes.len();
        (0x00, bytes, count)
    } else {
        let units: Vec<u16> = s.encode_utf16().collect();
        let count = units.len();
        (0x01, units.into_iter().flat_map(u16::to_le_bytes).collect(), count)
    }
}

/// ShortXLUnicodeString: 1-byte length, flags, characters
fn short_string(s: &str) -> IoResult<Vec<u8>> {
    let (flags, chars, count) = encode_chars(s);
    let count = u8::try_from(count)
        .map_err(|_| unwritable(format!("sheet name {s:?} is longer than 255 characters")))?;
    let mut out: Vec<u8> = Vec::with_capacity(chars.len() + 2);
    out.push(count);
    out.push(flags);
    out.extend(chars);
    Ok(out)
}

/// XLUnicodeString: 2-byte length, flags, characters
fn unicode_string(s: &str) -> IoResult<Vec<u8>> {
    let (flags, chars, count) = encode_chars(s);
    let count = u16::try_from(count)
        .map_err(|_| unwritable("cell text longer than 65535 characters"))?;
    let mut out: Vec<u8> = Vec::with_capacity(chars.len() + 3);
    out.extend(count.to_le_bytes());
    out.push(flags);
    out.extend(chars);
    Ok(out)
}

fn window1() -> Vec<u8> {
    let mut body: Vec<u8> = Vec::with_capacity(18);
    for value in [0u16, 0, 0x3000, 0x2000, 0x0038, 0, 0, 1, 0x0258] {
        body.extend(value.to_le_bytes());
    }
    body
}

fn window2() -> Vec<u8> {
    let mut body: Vec<u8> = Vec::with_capacity(18);
    // gridlines, headers, zeros, auto grid colour, outline symbols; first
    // sheet selected and displayed
    for value in [0x06B6u16, 0, 0, 0x0040, 0, 0, 0, 0, 0] {
        body.extend(value.to_le_bytes());
    }
    body
}

fn font(name: &str) -> Vec<u8> {
    let mut body: Vec<u8> = Vec::with_capacity(16 + name.len());
    body.extend(200u16.to_le_bytes()); // 10pt in twips
    body.extend(0u16.to_le_bytes()); // grbit
    body.extend(0x7FFFu16.to_le_bytes()); // automatic colour
    body.extend(400u16.to_le_bytes()); // normal weight
    body.extend(0u16.to_le_bytes()); // no super/subscript
    body.extend([0u8, 0, 0, 0]); // underline, family, charset, reserved
    body.push(name.len() as u8);
    body.push(0x00);
    body.extend(name.bytes());
    body
}

fn xf(style: bool) -> [u8; 20] {
    let mut body = [0u8; 20];
    // ifnt 0, ifmt 0 (General)
    let flags: u16 = if style { 0xFFF5 } else { 0x0001 };
    body[4..6].copy_from_slice(&flags.to_le_bytes());
    body[6] = 0x20; // bottom aligned
    body[9] = if style { 0x00 } else { 0xF8 };
    body[18..20].copy_from_slice(&0x20C0u16.to_le_bytes());
    body
}
