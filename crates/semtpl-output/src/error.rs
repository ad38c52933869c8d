//! Error types for document output.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while rendering or writing a document.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Output directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
