//! Header synonym tables and alias resolution.
//!
//! Each category has a fixed table of `alias -> canonical` header names.
//! Matching is case-insensitive and treats spaces and underscores as
//! interchangeable, so `Primary Key Column`, `primary_key_column` and
//! `primary key column` all resolve the same way.

use std::collections::BTreeSet;

use rapidfuzz::distance::jaro_winkler;
use semtpl_model::{Category, Table};
use serde::Serialize;

/// Minimum Jaro-Winkler similarity for an alias suggestion.
pub const SUGGESTION_MIN_SIMILARITY: f64 = 0.85;

const CUBE_ALIASES: &[(&str, &str)] = &[
    ("table_name", "table"),
    ("cube_table", "table"),
    ("sqltable", "sql_table"),
    ("sql table", "sql_table"),
    ("cube_name", "name"),
    ("cube", "name"),
    ("desc", "description"),
    ("data source", "data_source"),
    ("data_source", "data_source"),
];

const JOIN_ALIASES: &[(&str, &str)] = &[
    ("primary table", "primary_table"),
    ("secondary table", "secondary_table"),
    ("relation", "relationship"),
    ("relationship_type", "relationship"),
    ("primary_table_key", "primary_table_key_column"),
    ("primary key column", "primary_table_key_column"),
    ("primary_key_column", "primary_table_key_column"),
    ("secondary_table_key", "secondary_table_key_column"),
    ("secondary key column", "secondary_table_key_column"),
    ("secondary_key_column", "secondary_table_key_column"),
    ("join_sql", "sql"),
];

const DIMENSION_ALIASES: &[(&str, &str)] = &[
    ("primary key", "primarykey"),
    ("primary_key", "primarykey"),
    ("is_primary_key", "primarykey"),
    ("pk", "primarykey"),
    ("datatype", "type"),
    ("data_type", "type"),
];

const MEASURE_ALIASES: &[(&str, &str)] = &[
    ("aggregation", "type"),
    ("aggregate", "type"),
    ("agg", "type"),
];

const CUBE_FIELDS: &[&str] = &["name", "table", "sql_table", "title", "description"];
const JOIN_FIELDS: &[&str] = &[
    "primary_table",
    "secondary_table",
    "relationship",
    "primary_table_key_column",
    "secondary_table_key_column",
    "sql",
];
const DIMENSION_FIELDS: &[&str] = &["name", "title", "description", "sql", "type", "primarykey"];
const MEASURE_FIELDS: &[&str] = &["name", "title", "description", "sql", "type"];

/// The `alias -> canonical` table for a category.
pub fn alias_table(category: Category) -> &'static [(&'static str, &'static str)] {
    match category {
        Category::Cube => CUBE_ALIASES,
        Category::Join => JOIN_ALIASES,
        Category::Dimension => DIMENSION_ALIASES,
        Category::Measure => MEASURE_ALIASES,
    }
}

/// Source columns the assembler reads for a category.
pub fn known_fields(category: Category) -> &'static [&'static str] {
    match category {
        Category::Cube => CUBE_FIELDS,
        Category::Join => JOIN_FIELDS,
        Category::Dimension => DIMENSION_FIELDS,
        Category::Measure => MEASURE_FIELDS,
    }
}

/// Looks up the canonical name a header is an alias of.
pub fn canonical_for(header: &str, category: Category) -> Option<&'static str> {
    let key = header.trim().to_lowercase();
    let underscored = key.replace(' ', "_");
    let spaced = key.replace('_', " ");
    alias_table(category)
        .iter()
        .find(|(alias, _)| *alias == key || *alias == underscored || *alias == spaced)
        .map(|(_, canonical)| *canonical)
}

/// Resolves aliases in a list of (already normalized) column names.
///
/// Renaming never merges two columns. A canonical name is claimed first by
/// a column that already has that name, then by aliases left to right; an
/// alias whose target is already claimed keeps its own name.
pub fn resolve_columns(columns: &[String], category: Category) -> Vec<String> {
    let mut claimed: BTreeSet<&str> = columns.iter().map(String::as_str).collect();
    let mut resolved = Vec::with_capacity(columns.len());
    for column in columns {
        let renamed = canonical_for(column, category)
            .filter(|canonical| *canonical != column.as_str())
            .filter(|canonical| claimed.insert(*canonical));
        resolved.push(renamed.map_or_else(|| column.clone(), str::to_string));
    }
    resolved
}

/// Renames a table's columns per the category's alias table.
pub fn resolve(mut table: Table, category: Category) -> Table {
    table.columns = resolve_columns(&table.columns, category);
    table
}

/// A "did you mean" hint for a column that is neither canonical nor an alias.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AliasSuggestion {
    pub column: String,
    pub canonical: &'static str,
    pub similarity: f64,
}

/// Suggests the closest known field for an unrecognized column.
///
/// Returns `None` for columns that are already known or aliased, and when no
/// field reaches [`SUGGESTION_MIN_SIMILARITY`]. Suggestions are diagnostic
/// only; they never rename anything.
pub fn suggest_canonical(column: &str, category: Category) -> Option<AliasSuggestion> {
    let fields = known_fields(category);
    if fields.contains(&column) || canonical_for(column, category).is_some() {
        return None;
    }
    let normalized = column.replace('_', " ");
    fields
        .iter()
        .map(|field| {
            let target = field.replace('_', " ");
            let similarity = jaro_winkler::similarity(normalized.chars(), target.chars());
            (*field, similarity)
        })
        .filter(|(_, similarity)| *similarity >= SUGGESTION_MIN_SIMILARITY)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(canonical, similarity)| AliasSuggestion {
            column: column.to_string(),
            canonical,
            similarity,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn matches_spaces_and_underscores() {
        assert_eq!(canonical_for("primary_table", Category::Join), Some("primary_table"));
        assert_eq!(
            canonical_for("Primary Key Column", Category::Join),
            Some("primary_table_key_column")
        );
        assert_eq!(canonical_for("sql_table", Category::Cube), Some("sql_table"));
        assert_eq!(canonical_for("DATA_SOURCE", Category::Cube), Some("data_source"));
        assert_eq!(canonical_for("aggregation", Category::Dimension), None);
    }

    #[test]
    fn resolves_per_category() {
        let columns = cols(&["cube_name", "table_name", "desc", "extra"]);
        assert_eq!(
            resolve_columns(&columns, Category::Cube),
            cols(&["name", "table", "description", "extra"])
        );
        assert_eq!(resolve_columns(&columns, Category::Join), columns);
    }

    #[test]
    fn existing_canonical_column_wins() {
        let columns = cols(&["cube", "name", "title"]);
        assert_eq!(
            resolve_columns(&columns, Category::Cube),
            cols(&["cube", "name", "title"])
        );
    }

    #[test]
    fn first_alias_claims_target() {
        let columns = cols(&["table_name", "cube_table"]);
        assert_eq!(
            resolve_columns(&columns, Category::Cube),
            cols(&["table", "cube_table"])
        );
    }

    #[test]
    fn suggests_close_fields_only() {
        let suggestion = suggest_canonical("relationshp", Category::Join).expect("suggestion");
        assert_eq!(suggestion.canonical, "relationship");
        assert!(suggest_canonical("relationship", Category::Join).is_none());
        assert!(suggest_canonical("owner", Category::Join).is_none());
    }
}
