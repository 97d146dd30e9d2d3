// ============================================================================
// JsonTableDB Library
// ============================================================================
//
// A whole database held as one JSON document: typed tables, a small
// query/mutation API, and wholesale persistence through a pluggable blob
// store.
//
// - core      - values, column types, collation, errors
// - json      - coercion and sanitization of raw JSON
// - storage   - document/table model, row codec, storage backends
// - executor  - table lifecycle, insert, find, order_by, update, delete
// - result    - selections returned by reads
// - facade    - JsonDatabase and its configuration
//
// ============================================================================

pub mod core;
pub mod executor;
pub mod facade;
pub mod json;
pub mod result;
pub mod storage;

// Re-export main types for convenience
pub use core::{Column, ColumnSpec, ColumnType, DbError, Result, Row, RowView, Value};
pub use executor::{OrderedQuery, Query, SortDirection, TableHandle, Tables};
pub use facade::{DatabaseConfig, JsonDatabase};
pub use result::Selection;
pub use storage::{
    CURRENT_VERSION, Document, DocumentStorage, FileStorage, LocationId, MemoryStorage, Table,
};
