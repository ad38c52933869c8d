//! Data model for semantic template conversion.
//!
//! - [`cell`]: typed cell values and cell-level normalization
//! - [`table`]: rectangular tables and source tables from a reader
//! - [`category`]: the four record categories
//! - [`document`]: output records and the document
//! - [`options`]: conversion options

pub mod category;
pub mod cell;
pub mod document;
pub mod options;
pub mod table;

pub use category::Category;
pub use cell::{
    CellValue, TRUTHY_TOKENS, coerce_bool, collapse_multiline, normalize_cell,
    strip_wrapping_quotes,
};
pub use document::{Document, FieldValue, Record};
pub use options::ConvertOptions;
pub use table::{Row, SourceTable, Table};
