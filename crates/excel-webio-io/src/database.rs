//! Storage bindings: moving sheets in and out of table-shaped storage
//!
//! The storage itself sits behind the [`Session`] trait. [`MemorySession`] is
//! a small in-process implementation, handy for tests and prototypes.

use excel_webio_core::{Book, CellValue, Record, Sheet};

use crate::error::{DatabaseError, IoResult};

/// Result type for storage operations
pub type DatabaseResult<T> = std::result::Result<T, DatabaseError>;

/// Row customisation hook: return `None` to skip the row
pub type Initializer<'a> = dyn Fn(Record) -> Option<Record> + 'a;

/// A unit of work against table storage
pub trait Session {
    /// Column names of a table, in order
    fn column_names(&self, table: &str) -> DatabaseResult<Vec<String>>;

    /// Every committed row of a table
    fn fetch_all(&self, table: &str) -> DatabaseResult<Vec<Record>>;

    /// Stage a row for insertion
    fn add(&mut self, table: &str, row: Record) -> DatabaseResult<()>;

    /// Make staged rows visible
    fn commit(&mut self) -> DatabaseResult<()>;

    /// Discard staged rows
    fn rollback(&mut self) -> DatabaseResult<()>;
}

/// A row of a query result that can be projected onto named columns
pub trait QueryRow {
    /// Value of the named field, if the row has one
    fn field(&self, name: &str) -> Option<CellValue>;
}

impl QueryRow for Record {
    fn field(&self, name: &str) -> Option<CellValue> {
        self.get(name).cloned()
    }
}

/// How spreadsheet column names map onto table column names
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnMapping {
    /// Replace the header row positionally
    Names(Vec<String>),
    /// Rename selected columns, old name to new name
    Rename(Vec<(String, String)>),
}

impl ColumnMapping {
    fn apply(&self, names: Vec<String>) -> Vec<String> {
        match self {
            ColumnMapping::Names(replacement) => names
                .into_iter()
                .enumerate()
                .map(|(i, name)| replacement.get(i).cloned().unwrap_or(name))
                .collect(),
            ColumnMapping::Rename(pairs) => names
                .into_iter()
                .map(|name| {
                    pairs
                        .iter()
                        .find(|(old, _)| *old == name)
                        .map_or(name, |(_, new)| new.clone())
                })
                .collect(),
        }
    }
}

/// A destination table and how rows are shaped for it
pub struct TableBinding<'a> {
    /// Table name
    pub table: String,
    /// Optional per-row hook
    pub initializer: Option<&'a Initializer<'a>>,
    /// Optional column renaming
    pub mapdict: Option<ColumnMapping>,
}

impl<'a> TableBinding<'a> {
    /// Bind to a table with no customisation
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            initializer: None,
            mapdict: None,
        }
    }

    /// Set the per-row hook
    pub fn with_initializer(mut self, initializer: &'a Initializer<'a>) -> Self {
        self.initializer = Some(initializer);
        self
    }

    /// Set the column renaming
    pub fn with_mapdict(mut self, mapdict: ColumnMapping) -> Self {
        self.mapdict = Some(mapdict);
        self
    }
}

/// Store the sheet's data rows, with column names taken from `header_row`
///
/// Every row is checked against the table's columns before the first one is
/// staged, so a failed import leaves nothing pending. Returns the number of
/// rows added.
pub fn import_sheet(
    session: &mut dyn Session,
    sheet: &Sheet,
    binding: &TableBinding<'_>,
    header_row: usize,
    auto_commit: bool,
) -> IoResult<usize> {
    let batch = prepare_sheet(&*session, sheet, binding, header_row)?;
    let added = stage(session, vec![batch], auto_commit)?;
    log::debug!("stored {} row(s) into {}", added, binding.table);
    Ok(added)
}

/// Store sheet `i` of the book into `bindings[i]`
///
/// Sheets pair with bindings by position, not by name; each sheet's first row
/// is its header. Nothing is staged unless every sheet fits its table.
pub fn import_book(
    session: &mut dyn Session,
    book: &Book,
    bindings: &[TableBinding<'_>],
    auto_commit: bool,
) -> IoResult<usize> {
    if book.sheet_count() != bindings.len() {
        return Err(DatabaseError::TableCountMismatch {
            sheets: book.sheet_count(),
            tables: bindings.len(),
        }
        .into());
    }

    let batches = book
        .sheets()
        .zip(bindings)
        .map(|(sheet, binding)| prepare_sheet(&*session, sheet, binding, 0))
        .collect::<IoResult<Vec<_>>>()?;
    let added = stage(session, batches, auto_commit)?;
    log::debug!("stored {} row(s) into {} table(s)", added, bindings.len());
    Ok(added)
}

/// Rows bound for one table
struct Batch<'b> {
    table: &'b str,
    records: Vec<Record>,
}

/// Shape the sheet's data rows into records and check them against the table
fn prepare_sheet<'b>(
    session: &dyn Session,
    sheet: &Sheet,
    binding: &'b TableBinding<'_>,
    header_row: usize,
) -> IoResult<Batch<'b>> {
    let columns = session.column_names(&binding.table)?;
    let mut batch = Batch {
        table: &binding.table,
        records: Vec::new(),
    };
    if sheet.is_empty() {
        return Ok(batch);
    }

    let mut names = sheet.colnames(header_row)?;
    if let Some(mapdict) = &binding.mapdict {
        names = mapdict.apply(names);
    }

    for (i, row) in sheet.iter_rows().enumerate() {
        if i == header_row {
            continue;
        }
        let record: Record = names.iter().cloned().zip(row.iter().cloned()).collect();
        let record = match binding.initializer {
            Some(initializer) => match initializer(record) {
                Some(record) => record,
                None => continue,
            },
            None => record,
        };
        if let Some(column) = record.keys().find(|k| !columns.iter().any(|c| c == *k)) {
            return Err(DatabaseError::UnknownColumn {
                table: binding.table.clone(),
                column: column.to_string(),
            }
            .into());
        }
        batch.records.push(record);
    }
    Ok(batch)
}

/// Add every prepared row, rolling back if the session refuses one
fn stage(
    session: &mut dyn Session,
    batches: Vec<Batch<'_>>,
    auto_commit: bool,
) -> IoResult<usize> {
    let mut added = 0;
    for batch in batches {
        for record in batch.records {
            if let Err(e) = session.add(batch.table, record) {
                log::warn!("rolling back after a failed add to {}: {e}", batch.table);
                session.rollback()?;
                return Err(e.into());
            }
            added += 1;
        }
    }
    if auto_commit {
        session.commit()?;
    }
    Ok(added)
}

/// Build a sheet named after the table: header row, then every row
pub fn export_table(session: &dyn Session, table: &str) -> IoResult<Sheet> {
    let columns = session.column_names(table)?;
    let rows = session.fetch_all(table)?;
    let names: Vec<&str> = columns.iter().map(String::as_str).collect();

    let mut sheet = from_query_sets(&rows, &names);
    sheet.set_name(table);
    Ok(sheet)
}

/// Build a book with one sheet per table
pub fn export_tables(session: &dyn Session, tables: &[&str]) -> IoResult<Book> {
    let sheets = tables
        .iter()
        .map(|table| export_table(session, table))
        .collect::<IoResult<Vec<_>>>()?;
    Ok(Book::from_sheets(sheets)?)
}

/// Build a sheet from query results projected onto `column_names`
///
/// No column names means no data: the sheet comes back empty.
pub fn from_query_sets<Q: QueryRow>(query_sets: &[Q], column_names: &[&str]) -> Sheet {
    let mut sheet = Sheet::new(excel_webio_core::DEFAULT_SHEET_NAME);
    if column_names.is_empty() {
        return sheet;
    }

    sheet.push_row(column_names.iter().map(|name| CellValue::string(*name)));
    for row in query_sets {
        sheet.push_row(
            column_names
                .iter()
                .map(|name| row.field(name).unwrap_or_default()),
        );
    }
    sheet
}

/// An in-process [`Session`]
#[derive(Debug, Default)]
pub struct MemorySession {
    tables: Vec<MemoryTable>,
}

#[derive(Debug)]
struct MemoryTable {
    name: String,
    columns: Vec<String>,
    rows: Vec<Record>,
    pending: Vec<Record>,
}

impl MemorySession {
    /// Create a session with no tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a table and its columns
    pub fn create_table(&mut self, name: &str, columns: &[&str]) {
        self.tables.retain(|t| t.name != name);
        self.tables.push(MemoryTable {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
            pending: Vec::new(),
        });
    }

    /// Rows staged but not yet committed
    pub fn pending(&self, table: &str) -> DatabaseResult<usize> {
        Ok(self.table(table)?.pending.len())
    }

    fn table(&self, name: &str) -> DatabaseResult<&MemoryTable> {
        self.tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| DatabaseError::UnknownTable(name.to_string()))
    }

    fn table_mut(&mut self, name: &str) -> DatabaseResult<&mut MemoryTable> {
        self.tables
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| DatabaseError::UnknownTable(name.to_string()))
    }
}

impl Session for MemorySession {
    fn column_names(&self, table: &str) -> DatabaseResult<Vec<String>> {
        Ok(self.table(table)?.columns.clone())
    }

    fn fetch_all(&self, table: &str) -> DatabaseResult<Vec<Record>> {
        Ok(self.table(table)?.rows.clone())
    }

    fn add(&mut self, table: &str, row: Record) -> DatabaseResult<()> {
        let table = self.table_mut(table)?;
        if let Some(column) = row.keys().find(|k| !table.columns.iter().any(|c| c == *k)) {
            return Err(DatabaseError::UnknownColumn {
                table: table.name.clone(),
                column: column.to_string(),
            });
        }
        table.pending.push(row);
        Ok(())
    }

    fn commit(&mut self) -> DatabaseResult<()> {
        for table in &mut self.tables {
            let pending = std::mem::take(&mut table.pending);
            table.rows.extend(pending);
        }
        Ok(())
    }

    fn rollback(&mut self) -> DatabaseResult<()> {
        for table in &mut self.tables {
            table.pending.clear();
        }
        Ok(())
    }
}
