//! Plain-text table renderers (write only)
//!
//! Every sheet is rendered under a `<sheet name>:` heading. Columns holding
//! only numbers are right-aligned.

use std::io::Write;

use excel_webio_core::{Book, CellValue, FileType, Sheet};

use crate::error::{IoError, IoResult};

/// Write one sheet in a text table format
pub fn write_sheet<W: Write>(sheet: &Sheet, mut writer: W, file_type: FileType) -> IoResult<()> {
    let table = render(sheet, file_type)?;
    write!(writer, "{}:\n{}", sheet.name(), table)?;
    Ok(())
}

/// Write every sheet, separated by a blank line
pub fn write_book<W: Write>(book: &Book, mut writer: W, file_type: FileType) -> IoResult<()> {
    for (i, sheet) in book.sheets().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        write_sheet(sheet, &mut writer, file_type)?;
    }
    Ok(())
}

/// Render a sheet's rows as a table, one line per row plus decorations
pub fn render(sheet: &Sheet, file_type: FileType) -> IoResult<String> {
    let grid = Grid::new(sheet);
    let lines = match file_type {
        FileType::Plain => grid.rows("", "  ", ""),
        FileType::Simple => grid.ruled('-'),
        FileType::Rst => grid.ruled('='),
        FileType::Grid => grid.boxed(),
        FileType::Pipe => {
            let mut lines = vec![grid.pipe_alignment()];
            lines.extend(grid.rows("| ", " | ", " |"));
            lines
        }
        FileType::Orgtbl => grid.rows("| ", " | ", " |"),
        FileType::Mediawiki => grid.mediawiki(),
        FileType::Latex => grid.latex("\\hline", "\\hline"),
        FileType::LatexBooktabs => grid.latex("\\toprule", "\\bottomrule"),
        other => {
            return Err(IoError::UnsupportedFormat {
                file_type: other,
                operation: "render",
            })
        }
    };

    let mut out = String::new();
    for line in lines {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    Ok(out)
}

struct Grid {
    cells: Vec<Vec<String>>,
    widths: Vec<usize>,
    numeric: Vec<bool>,
}

impl Grid {
    fn new(sheet: &Sheet) -> Self {
        let columns = sheet.number_of_columns();
        let mut widths = vec![0; columns];
        let mut numeric = vec![true; columns];
        let mut cells = Vec::with_capacity(sheet.number_of_rows());

        for row in sheet.iter_rows() {
            let mut text = Vec::with_capacity(columns);
            for (col, value) in row.iter().enumerate() {
                let s = value.to_string();
                widths[col] = widths[col].max(s.chars().count());
                if !matches!(value, CellValue::Number(_) | CellValue::Empty) {
                    numeric[col] = false;
                }
                text.push(s);
            }
            cells.push(text);
        }

        Self {
            cells,
            widths,
            numeric,
        }
    }

    fn pad(&self, col: usize, text: &str) -> String {
        let width = self.widths[col];
        if self.numeric[col] {
            format!("{text:>width$}")
        } else {
            format!("{text:<width$}")
        }
    }

    fn rows(&self, open: &str, sep: &str, close: &str) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| {
                let padded: Vec<String> = row
                    .iter()
                    .enumerate()
                    .map(|(col, text)| self.pad(col, text))
                    .collect();
                format!("{open}{}{close}", padded.join(sep))
            })
            .collect()
    }

    fn ruled(&self, ch: char) -> Vec<String> {
        if self.cells.is_empty() {
            return Vec::new();
        }
        let rule = self
            .widths
            .iter()
            .map(|w| ch.to_string().repeat((*w).max(1)))
            .collect::<Vec<_>>()
            .join("  ");

        let mut lines = vec![rule.clone()];
        lines.extend(self.rows("", "  ", ""));
        lines.push(rule);
        lines
    }

    fn boxed(&self) -> Vec<String> {
        if self.cells.is_empty() {
            return Vec::new();
        }
        let border = format!(
            "+{}+",
            self.widths
                .iter()
                .map(|w| "-".repeat(w + 2))
                .collect::<Vec<_>>()
                .join("+")
        );

        let mut lines = vec![border.clone()];
        for row in self.rows("| ", " | ", " |") {
            lines.push(row);
            lines.push(border.clone());
        }
        lines
    }

    fn pipe_alignment(&self) -> String {
        let marks: Vec<String> = self
            .widths
            .iter()
            .zip(&self.numeric)
            .map(|(w, numeric)| {
                let dashes = "-".repeat((*w).max(1) + 1);
                if *numeric {
                    format!("{dashes}:")
                } else {
                    format!(":{dashes}")
                }
            })
            .collect();
        format!("|{}|", marks.join("|"))
    }

    fn mediawiki(&self) -> Vec<String> {
        let mut lines = vec![
            "{| class=\"wikitable\" style=\"text-align: left;\"".to_string(),
            "|+ <!-- caption -->".to_string(),
        ];
        for row in &self.cells {
            lines.push("|-".to_string());
            lines.push(format!("| {}", row.join(" || ")));
        }
        lines.push("|}".to_string());
        lines
    }

    fn latex(&self, top: &str, bottom: &str) -> Vec<String> {
        let spec: String = self
            .numeric
            .iter()
            .map(|numeric| if *numeric { 'r' } else { 'l' })
            .collect();

        let mut lines = vec![format!("\\begin{{tabular}}{{{spec}}}"), top.to_string()];
        for row in &self.cells {
            let escaped: Vec<String> = row.iter().map(|text| latex_escape(text)).collect();
            lines.push(format!(" {} \\\\", escaped.join(" & ")));
        }
        lines.push(bottom.to_string());
        lines.push("\\end{tabular}".to_string());
        lines
    }
}

fn latex_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '\\' => out.push_str("\\textbackslash{}"),
            _ => out.push(c),
        }
    }
    out
}
