//! Routing source tables into per-category buckets.
//!
//! Every source table is cleaned (cells normalized, empty rows and columns
//! dropped, headers normalized), assigned a category, alias-resolved for
//! that category, and stacked onto the category's bucket. Tables that are
//! empty or score too low are rejected; a rejection is reported, never an
//! error.

use std::collections::BTreeMap;

use semtpl_map::{CategoryScorer, Classification, clean_table, resolve, suggest_canonical};
use semtpl_model::{Category, SourceTable, Table};
use serde::Serialize;
use tracing::{debug, info};

/// Why a source table was not routed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
    /// No data left after dropping empty rows and columns.
    Empty,
    /// The best category score was below the acceptance threshold.
    BelowThreshold { best: i32 },
}

/// A source table that was left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub source: String,
    pub hint: String,
    pub reason: RejectReason,
    /// Scores for every category; absent when the table was empty.
    pub classification: Option<Classification>,
}

/// A source table that was routed into a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Accepted {
    pub source: String,
    pub hint: String,
    pub category: Category,
    pub rows: usize,
    /// Normalized, alias-resolved column names.
    pub columns: Vec<String>,
    /// Scores for every category; absent when the category was pinned by the
    /// source.
    pub classification: Option<Classification>,
}

/// The outcome of routing all source tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutedTables {
    /// One stacked table per category that received data.
    pub buckets: BTreeMap<Category, Table>,
    /// Accepted sources, in processing order.
    pub accepted: Vec<Accepted>,
    /// Rejected sources, in processing order.
    pub rejected: Vec<Rejection>,
}

impl RoutedTables {
    pub fn bucket(&self, category: Category) -> Option<&Table> {
        self.buckets.get(&category)
    }

    /// Number of rows routed into a category.
    pub fn row_count(&self, category: Category) -> usize {
        self.bucket(category).map_or(0, Table::height)
    }

    /// True when no table was accepted.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of source tables seen.
    pub fn source_count(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }
}

/// Routes source tables using a [`CategoryScorer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRouter {
    scorer: CategoryScorer,
}

impl TableRouter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_scorer(mut self, scorer: CategoryScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Routes every source in order.
    ///
    /// Same-category tables are stacked in the order they are routed.
    pub fn route(&self, sources: Vec<SourceTable>) -> RoutedTables {
        let mut routed = RoutedTables::default();
        for source in sources {
            self.route_one(source, &mut routed);
        }
        routed
    }

    fn route_one(&self, source: SourceTable, routed: &mut RoutedTables) {
        let SourceTable {
            name,
            hint,
            category: pinned,
            table,
        } = source;

        let table = clean_table(table);
        if table.is_empty() {
            info!(source = %name, "Skipping empty table");
            routed.rejected.push(Rejection {
                source: name,
                hint,
                reason: RejectReason::Empty,
                classification: None,
            });
            return;
        }

        let (category, classification) = match pinned {
            Some(category) => (category, None),
            None => {
                let classification = self.scorer.classify(&table.columns, &hint);
                for score in &classification.scores {
                    debug!(
                        source = %name,
                        category = %score.category,
                        score = score.score,
                        explanation = %score.explain(),
                        "Category score"
                    );
                }
                match classification.category {
                    Some(category) => (category, Some(classification)),
                    None => {
                        let best = classification.best().map_or(0, |best| best.score);
                        info!(
                            source = %name,
                            best,
                            min_score = self.scorer.min_score(),
                            "Rejected table: no category scored high enough"
                        );
                        routed.rejected.push(Rejection {
                            source: name,
                            hint,
                            reason: RejectReason::BelowThreshold { best },
                            classification: Some(classification),
                        });
                        return;
                    }
                }
            }
        };

        let table = resolve(table, category);
        for column in &table.columns {
            if let Some(suggestion) = suggest_canonical(column, category) {
                debug!(
                    source = %name,
                    column = %suggestion.column,
                    suggestion = suggestion.canonical,
                    similarity = suggestion.similarity,
                    "Unrecognized column resembles a known field"
                );
            }
        }

        info!(
            source = %name,
            category = %category,
            rows = table.height(),
            pinned = pinned.is_some(),
            "Accepted table"
        );
        routed.accepted.push(Accepted {
            source: name,
            hint,
            category,
            rows: table.height(),
            columns: table.columns.clone(),
            classification,
        });
        routed.buckets.entry(category).or_default().append(table);
    }
}

/// Routes sources with the default scorer.
pub fn route(sources: Vec<SourceTable>) -> RoutedTables {
    TableRouter::new().route(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use semtpl_model::CellValue;

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        let mut table = Table::new(columns.iter().map(|c| (*c).to_string()).collect());
        for row in rows {
            table.push_row(row.iter().map(|cell| CellValue::text(*cell)).collect());
        }
        table
    }

    #[test]
    fn routes_by_score() {
        let sources = vec![SourceTable::new(
            "model.xlsx#Sheet1",
            "Sheet1",
            table(&["Primary Table", "Secondary Table"], &[&["orders", "customers"]]),
        )];
        let routed = route(sources);
        assert_eq!(routed.row_count(Category::Join), 1);
        assert_eq!(
            routed.bucket(Category::Join).unwrap().columns,
            vec!["primary_table", "secondary_table"]
        );
        assert_eq!(routed.accepted[0].category, Category::Join);
    }

    #[test]
    fn pinned_category_skips_scoring() {
        let sources = vec![
            SourceTable::new("cubes.csv", "cubes", table(&["owner"], &[&["ops"]]))
                .with_category(Category::Cube),
        ];
        let routed = route(sources);
        assert_eq!(routed.row_count(Category::Cube), 1);
        assert_eq!(routed.accepted[0].classification, None);
    }

    #[test]
    fn pinned_empty_table_is_rejected() {
        let sources = vec![
            SourceTable::new("measures.csv", "measures", table(&["name", "sql"], &[&[" ", ""]]))
                .with_category(Category::Measure),
            SourceTable::new("joins.csv", "joins", table(&["primary_table"], &[]))
                .with_category(Category::Join),
        ];
        let routed = route(sources);
        assert!(routed.is_empty());
        assert!(routed.bucket(Category::Measure).is_none());
        assert_eq!(routed.rejected.len(), 2);
        assert_eq!(routed.rejected[0].source, "measures.csv");
        assert_eq!(routed.rejected[0].reason, RejectReason::Empty);
        assert_eq!(routed.rejected[1].reason, RejectReason::Empty);
    }

    #[test]
    fn empty_and_unrecognized_tables_are_rejected() {
        let sources = vec![
            SourceTable::new("blank", "blank", table(&["name"], &[&["  "], &[""]])),
            SourceTable::new("notes", "notes", table(&["owner", "name"], &[&["a", "b"]])),
        ];
        let routed = route(sources);
        assert!(routed.is_empty());
        assert_eq!(routed.rejected.len(), 2);
        assert_eq!(routed.rejected[0].reason, RejectReason::Empty);
        assert_eq!(
            routed.rejected[1].reason,
            RejectReason::BelowThreshold { best: 1 }
        );
        assert_eq!(routed.source_count(), 2);
    }

    #[test]
    fn same_category_tables_stack() {
        let sources = vec![
            SourceTable::new("a", "dimensions", table(&["name", "sql"], &[&["id", "id"]])),
            SourceTable::new(
                "b",
                "dims",
                table(&["name", "type", "title"], &[&["status", "string", "Status"]]),
            ),
        ];
        let routed = route(sources);
        let bucket = routed.bucket(Category::Dimension).unwrap();
        assert_eq!(bucket.columns, vec!["name", "sql", "type", "title"]);
        assert_eq!(bucket.height(), 2);
        assert_eq!(bucket.rows[0][2], CellValue::Missing);
        assert_eq!(bucket.rows[1][0], CellValue::text("status"));
    }

    #[test]
    fn strict_scorer_rejects_more() {
        let router = TableRouter::new().with_scorer(CategoryScorer::new().with_min_score(5));
        let sources = vec![SourceTable::new(
            "sheet1",
            "sheet1",
            table(&["name", "sql", "type"], &[&["id", "id", "number"]]),
        )];
        let routed = router.route(sources);
        assert!(routed.is_empty());
    }
}
