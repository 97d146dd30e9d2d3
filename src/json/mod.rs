//! JSON Document Pipeline
//!
//! Everything that turns loosely-typed JSON into the engine's typed model.
//!
//! # Architecture
//!
//! - `converter.rs` - Value coercion to declared column types
//! - `validator.rs` - Column declaration sanitizer
//! - `sanitizer.rs` - Whole-document sanitizer and row coercion

mod converter;
mod sanitizer;
mod validator;

pub use converter::{ValueConverter, parse_date};
pub use sanitizer::{coerce_rows, sanitize_document};
pub use validator::{sanitize_columns, sanitize_raw_columns};
