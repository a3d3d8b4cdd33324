//! Prelude module - common imports for excel-webio users
//!
//! ```rust
//! use excel_webio::prelude::*;
//! ```

pub use crate::{
    // Data model
    Book,
    BookDict,
    CellValue,
    ColumnDict,
    // Storage
    ColumnMapping,
    // Input
    ExcelInput,
    ExcelInputInMultiDict,
    // Response
    ExcelPayload,
    ExcelResponder,
    FileDescriptor,
    FileInput,
    FileTuple,
    FileType,
    InputOptions,
    LoadOptions,
    MemorySession,
    NullResponse,
    Record,
    ResponseFactory,
    ResponseOptions,
    SaveOptions,
    SaveToMemory,
    Session,
    Sheet,
    TableBinding,
    // Errors
    WebioError,
    WebioResult,
};
