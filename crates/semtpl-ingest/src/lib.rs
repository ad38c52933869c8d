//! Tabular input for semantic templates.
//!
//! This crate turns files on disk into [`SourceTable`]s:
//!
//! - **Template folders**: `cubes.csv`, `joins.csv`, `dimensions.csv`,
//!   `measures.csv`, each pinned to its category
//! - **Workbooks**: every sheet of an xlsx/xls/ods file, with the sheet name
//!   as classification hint
//! - **CSV files**: delimiter sniffing, BOM handling, Windows-1252 fallback
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use semtpl_ingest::load_sources;
//!
//! let sources = load_sources(Path::new("model.xlsx"))?;
//! for source in &sources {
//!     println!("{} ({} rows)", source.name, source.table.height());
//! }
//! ```
//!
//! [`SourceTable`]: semtpl_model::SourceTable

mod csv;
mod discovery;
mod error;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use self::csv::{
    CANDIDATE_DELIMITERS, NA_TOKENS, decode_bytes, parse_csv_text, read_csv_table,
    sniff_delimiter,
};

// === Workbooks ===
pub use workbook::{
    WORKBOOK_EXTENSIONS, cell_from_data, is_workbook, read_workbook, table_from_range,
};

// === Discovery ===
pub use discovery::{list_csv_files, load_directory, load_sources};
