//! Semantic categories a source table can be classified into.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of record kinds in the output document.
///
/// Declaration order is the evaluation order used for tie-breaking during
/// classification.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cube,
    Join,
    Dimension,
    Measure,
}

impl Category {
    /// All categories in evaluation order.
    pub const ALL: [Category; 4] = [Self::Cube, Self::Join, Self::Dimension, Self::Measure];

    /// Section key used in the output document (`cubes`, `joins`, ...).
    pub fn section(self) -> &'static str {
        match self {
            Self::Cube => "cubes",
            Self::Join => "joins",
            Self::Dimension => "dimensions",
            Self::Measure => "measures",
        }
    }

    /// File name that pins a table to this category in directory mode.
    pub fn fixed_file_name(self) -> &'static str {
        match self {
            Self::Cube => "cubes.csv",
            Self::Join => "joins.csv",
            Self::Dimension => "dimensions.csv",
            Self::Measure => "measures.csv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Cube => "Cube",
            Self::Join => "Join",
            Self::Dimension => "Dimension",
            Self::Measure => "Measure",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section())
    }
}
