//! Error types for conversion.

use thiserror::Error;

/// Errors raised by the conversion pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    /// Every input table was rejected, or there were no tables at all.
    #[error(
        "no recognizable data found in {tables} table(s); check the headers or run with -v to see detection details"
    )]
    NoRecognizableData { tables: usize },
}

/// Result type for conversion.
pub type Result<T> = std::result::Result<T, ConvertError>;
