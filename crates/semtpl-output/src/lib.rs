//! Output writers for semantic template documents.
//!
//! Documents are written as YAML by default, or as JSON when requested or
//! when the output path ends in `.json`.

pub mod error;
pub mod format;
pub mod writer;

pub use error::{OutputError, Result};
pub use format::OutputFormat;
pub use writer::{ensure_parent_dir, render, write_document};
