//! Options controlling document assembly.

use serde::{Deserialize, Serialize};

/// Options for converting categorized tables into a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Keep only the cube with this exact name, and only joins whose primary
    /// table is that cube (by name or by its physical table).
    pub only_cube: Option<String>,

    /// Carry non-canonical columns through to the output records.
    ///
    /// Default: true.
    pub include_unknown: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            only_cube: None,
            include_unknown: true,
        }
    }
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_only_cube(mut self, cube: Option<String>) -> Self {
        self.only_cube = cube;
        self
    }

    #[must_use]
    pub fn with_include_unknown(mut self, enable: bool) -> Self {
        self.include_unknown = enable;
        self
    }
}
