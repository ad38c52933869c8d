//! Category scoring for source tables.
//!
//! A table's score for a category is the number of required columns it has
//! (after alias resolution for that category), plus a bonus when the file or
//! sheet name hints at the category. The best category wins if it reaches
//! the minimum score.

use std::collections::BTreeSet;

use semtpl_model::Category;
use serde::Serialize;

use crate::alias::resolve_columns;

/// Minimum winning score for a table to be accepted.
pub const MIN_CATEGORY_SCORE: i32 = 2;
/// Bonus added when the hint name contains a category keyword.
pub const HINT_BONUS: i32 = 2;

const CUBE_REQUIRED: &[&str] = &["table", "sql_table", "name"];
const JOIN_REQUIRED: &[&str] = &["primary_table", "secondary_table"];
const DIMENSION_REQUIRED: &[&str] = &["name", "sql", "type"];
const MEASURE_REQUIRED: &[&str] = &["name", "sql", "type"];

/// Columns that must be present to recognize a category.
pub fn required_columns(category: Category) -> &'static [&'static str] {
    match category {
        Category::Cube => CUBE_REQUIRED,
        Category::Join => JOIN_REQUIRED,
        Category::Dimension => DIMENSION_REQUIRED,
        Category::Measure => MEASURE_REQUIRED,
    }
}

/// Substrings of a hint name that suggest a category.
pub fn hint_keywords(category: Category) -> &'static [&'static str] {
    match category {
        Category::Cube => &["cube"],
        Category::Join => &["join", "relationship"],
        Category::Dimension => &["dimension", "dim"],
        Category::Measure => &["measure", "metric"],
    }
}

/// A component contributing to a category score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    /// Component name (e.g. "Required column").
    pub name: &'static str,
    pub value: i32,
    /// Human-readable description.
    pub description: String,
}

/// Score of one table for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryScore {
    pub category: Category,
    pub score: i32,
    /// Breakdown of score components for explainability.
    pub components: Vec<ScoreComponent>,
}

impl CategoryScore {
    /// Human-readable explanation of the score.
    pub fn explain(&self) -> String {
        if self.components.is_empty() {
            return "no matching columns".to_string();
        }
        self.components
            .iter()
            .map(|c| format!("{} (+{}): {}", c.name, c.value, c.description))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Outcome of classifying one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Scores for every category, in evaluation order.
    pub scores: Vec<CategoryScore>,
    /// The winning category, or `None` when the best score is too low.
    pub category: Option<Category>,
}

impl Classification {
    /// The highest score (first in evaluation order on ties).
    pub fn best(&self) -> Option<&CategoryScore> {
        self.scores.iter().fold(None, |best, candidate| match best {
            Some(current) if current.score >= candidate.score => Some(current),
            _ => Some(candidate),
        })
    }

    pub fn score_for(&self, category: Category) -> Option<i32> {
        self.scores
            .iter()
            .find(|score| score.category == category)
            .map(|score| score.score)
    }

    pub fn is_accepted(&self) -> bool {
        self.category.is_some()
    }
}

/// Scores tables against the four categories.
#[derive(Debug, Clone, Copy)]
pub struct CategoryScorer {
    min_score: i32,
}

impl Default for CategoryScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryScorer {
    pub fn new() -> Self {
        Self {
            min_score: MIN_CATEGORY_SCORE,
        }
    }

    #[must_use]
    pub fn with_min_score(mut self, min_score: i32) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn min_score(&self) -> i32 {
        self.min_score
    }

    /// Scores an already alias-resolved column set for one category.
    pub fn score(
        &self,
        columns: &BTreeSet<&str>,
        category: Category,
        hint_name: &str,
    ) -> CategoryScore {
        let mut components = Vec::new();
        let mut score = 0;

        for required in required_columns(category) {
            if columns.contains(required) {
                score += 1;
                components.push(ScoreComponent {
                    name: "Required column",
                    value: 1,
                    description: (*required).to_string(),
                });
            }
        }

        let hint = hint_name.to_lowercase();
        if let Some(keyword) = hint_keywords(category)
            .iter()
            .find(|keyword| hint.contains(*keyword))
        {
            score += HINT_BONUS;
            components.push(ScoreComponent {
                name: "Name hint",
                value: HINT_BONUS,
                description: format!("'{hint_name}' contains '{keyword}'"),
            });
        }

        CategoryScore {
            category,
            score,
            components,
        }
    }

    /// Classifies a table from its normalized column names and hint.
    ///
    /// Columns are alias-resolved independently for each category before
    /// scoring. The strictly highest score wins; ties go to the category that
    /// comes first in evaluation order.
    pub fn classify(&self, columns: &[String], hint_name: &str) -> Classification {
        let scores: Vec<CategoryScore> = Category::ALL
            .into_iter()
            .map(|category| {
                let resolved = resolve_columns(columns, category);
                let set: BTreeSet<&str> = resolved.iter().map(String::as_str).collect();
                self.score(&set, category, hint_name)
            })
            .collect();
        let mut classification = Classification {
            scores,
            category: None,
        };
        classification.category = classification
            .best()
            .filter(|best| best.score >= self.min_score)
            .map(|best| best.category);
        classification
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn join_beats_cube_with_hint() {
        let scorer = CategoryScorer::new();
        let result = scorer.classify(
            &cols(&["primary_table", "secondary_table", "sql_table"]),
            "joins",
        );
        assert_eq!(result.score_for(Category::Join), Some(4));
        assert_eq!(result.score_for(Category::Cube), Some(1));
        assert_eq!(result.category, Some(Category::Join));
    }

    #[test]
    fn ties_go_to_evaluation_order() {
        let scorer = CategoryScorer::new();
        let result = scorer.classify(&cols(&["name", "sql", "type"]), "sheet1");
        assert_eq!(result.score_for(Category::Dimension), Some(3));
        assert_eq!(result.score_for(Category::Measure), Some(3));
        assert_eq!(result.category, Some(Category::Dimension));
    }

    #[test]
    fn hint_breaks_dimension_measure_tie() {
        let scorer = CategoryScorer::new();
        let result = scorer.classify(&cols(&["name", "sql", "type"]), "Metrics");
        assert_eq!(result.category, Some(Category::Measure));
    }

    #[test]
    fn aliases_count_towards_required_columns() {
        let scorer = CategoryScorer::new();
        let result = scorer.classify(&cols(&["name", "sql", "aggregation"]), "data");
        assert_eq!(result.score_for(Category::Measure), Some(3));
        assert_eq!(result.score_for(Category::Dimension), Some(2));
        assert_eq!(result.category, Some(Category::Measure));
    }

    #[test]
    fn rejects_below_threshold() {
        let scorer = CategoryScorer::new();
        let result = scorer.classify(&cols(&["owner", "name"]), "notes");
        assert_eq!(result.best().map(|best| best.score), Some(1));
        assert!(!result.is_accepted());
    }

    #[test]
    fn hint_alone_is_enough() {
        let scorer = CategoryScorer::new();
        let result = scorer.classify(&cols(&["foo"]), "Cubes");
        assert_eq!(result.category, Some(Category::Cube));
    }

    #[test]
    fn custom_threshold() {
        let scorer = CategoryScorer::new().with_min_score(4);
        let result = scorer.classify(&cols(&["name", "sql", "type"]), "sheet1");
        assert!(!result.is_accepted());
    }

    #[test]
    fn explanation_lists_components() {
        let scorer = CategoryScorer::new();
        let set: BTreeSet<&str> = ["primary_table"].into_iter().collect();
        let score = scorer.score(&set, Category::Join, "Relationships");
        assert_eq!(score.score, 3);
        let explanation = score.explain();
        assert!(explanation.contains("Required column (+1): primary_table"));
        assert!(explanation.contains("Name hint (+2)"));
    }
}
