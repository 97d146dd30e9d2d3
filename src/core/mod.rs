pub mod collation;
pub mod error;
pub mod types;
pub mod value;

pub use error::{DbError, Result};
pub use types::{Column, ColumnSpec, ColumnType, Row, RowView};
pub use value::Value;
