#![deny(unsafe_code)]

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::cell::CellValue;

/// One row viewed as an ordered `column -> cell` mapping.
///
/// Only cells that carry a value are present; absent cells are simply not
/// keys of the map.
pub type Row = IndexMap<String, CellValue>;

/// A rectangular grid of cells with a header row.
///
/// Rows are stored row-major and every row is exactly `columns.len()` wide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding with `Missing` or truncating to the table width.
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Missing);
        self.rows.push(row);
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// A table with no columns or no rows holds no records.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Returns row `idx` as an ordered mapping, skipping missing cells.
    pub fn row(&self, idx: usize) -> Option<Row> {
        let cells = self.rows.get(idx)?;
        Some(
            self.columns
                .iter()
                .zip(cells)
                .filter(|(_, cell)| !cell.is_missing())
                .map(|(column, cell)| (column.clone(), cell.clone()))
                .collect(),
        )
    }

    /// Iterates over all rows as ordered mappings.
    pub fn records(&self) -> impl Iterator<Item = Row> + '_ {
        (0..self.rows.len()).filter_map(|idx| self.row(idx))
    }

    /// Stacks the rows of `other` below this table.
    ///
    /// Columns are unioned in first-seen order; rows from a table lacking a
    /// column get `Missing` there.
    pub fn append(&mut self, other: Table) {
        let mut positions = Vec::with_capacity(other.columns.len());
        for column in &other.columns {
            let idx = match self.column_index(column) {
                Some(idx) => idx,
                None => {
                    self.columns.push(column.clone());
                    for row in &mut self.rows {
                        row.push(CellValue::Missing);
                    }
                    self.columns.len() - 1
                }
            };
            positions.push(idx);
        }
        let width = self.columns.len();
        for cells in other.rows {
            let mut row = vec![CellValue::Missing; width];
            for (cell, &idx) in cells.into_iter().zip(&positions) {
                row[idx] = cell;
            }
            self.rows.push(row);
        }
    }
}

/// A table as delivered by the tabular reader, before classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceTable {
    /// Human-readable origin, e.g. `model.xlsx#Cubes` or `cubes.csv`.
    pub name: String,
    /// File stem or sheet name, used as a weak classification signal.
    pub hint: String,
    /// Category pinned by the source itself (directory mode); skips scoring.
    pub category: Option<Category>,
    pub table: Table,
}

impl SourceTable {
    pub fn new(name: impl Into<String>, hint: impl Into<String>, table: Table) -> Self {
        Self {
            name: name.into(),
            hint: hint.into(),
            category: None,
            table,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn push_row_pads_and_truncates() {
        let mut table = Table::new(cols(&["a", "b"]));
        table.push_row(vec![CellValue::text("1")]);
        table.push_row(vec!["x".into(), "y".into(), "z".into()]);
        assert_eq!(table.rows[0], vec![CellValue::text("1"), CellValue::Missing]);
        assert_eq!(table.rows[1].len(), 2);
    }

    #[test]
    fn row_skips_missing_cells() {
        let mut table = Table::new(cols(&["name", "title"]));
        table.push_row(vec!["orders".into(), CellValue::Missing]);
        let row = table.row(0).unwrap();
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("name"), Some(&CellValue::text("orders")));
    }

    #[test]
    fn append_unions_columns() {
        let mut first = Table::new(cols(&["name", "sql"]));
        first.push_row(vec!["a".into(), "x".into()]);
        let mut second = Table::new(cols(&["type", "name"]));
        second.push_row(vec!["sum".into(), "b".into()]);
        first.append(second);
        assert_eq!(first.columns, cols(&["name", "sql", "type"]));
        assert_eq!(
            first.rows,
            vec![
                vec!["a".into(), "x".into(), CellValue::Missing],
                vec!["b".into(), CellValue::Missing, "sum".into()],
            ]
        );
    }
}
