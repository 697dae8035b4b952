//! API types for machine-readable output.
//!
//! `schema` describes the columns a client can ask for; `export` emits rows
//! as unformatted raw values keyed by column, so no client ever has to parse
//! the fixed-width display text.

pub mod export;
pub mod schema;

pub use export::{ExportError, ExportRow, export_json, export_rows};
pub use schema::{ColumnSchema, DataType, TableSchema, space_schema};
