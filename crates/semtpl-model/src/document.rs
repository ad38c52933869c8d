//! The output document: four ordered lists of records.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::cell::CellValue;

/// A leaf value in an output record. There is no null variant: absent
/// fields are omitted from the record instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Converts a cell, returning `None` for missing values.
    pub fn from_cell(cell: CellValue) -> Option<Self> {
        match cell {
            CellValue::Text(value) => Some(Self::Text(value)),
            CellValue::Int(value) => Some(Self::Int(value)),
            CellValue::Float(value) if value.is_nan() => None,
            CellValue::Float(value) => Some(Self::Float(value)),
            CellValue::Bool(value) => Some(Self::Bool(value)),
            CellValue::Missing => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// One output record. Key order is emission order.
pub type Record = IndexMap<String, FieldValue>;

/// The categorized output document.
///
/// Field declaration order fixes the top-level key order when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub cubes: Vec<Record>,
    pub joins: Vec<Record>,
    pub dimensions: Vec<Record>,
    pub measures: Vec<Record>,
}

impl Document {
    pub fn records(&self, category: Category) -> &[Record] {
        match category {
            Category::Cube => &self.cubes,
            Category::Join => &self.joins,
            Category::Dimension => &self.dimensions,
            Category::Measure => &self.measures,
        }
    }

    /// Total number of records across all categories.
    pub fn len(&self) -> usize {
        Category::ALL
            .into_iter()
            .map(|category| self.records(category).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
