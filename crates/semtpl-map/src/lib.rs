//! Header normalization, alias resolution, and category scoring.
//!
//! The functions here turn a raw table into one whose headers are
//! canonical for a category, and decide which category a table belongs to.
//!
//! # Example
//!
//! ```ignore
//! use semtpl_map::{CategoryScorer, clean_table, resolve};
//!
//! let table = clean_table(raw);
//! let classification = CategoryScorer::new().classify(&table.columns, "joins");
//! if let Some(category) = classification.category {
//!     let table = resolve(table, category);
//! }
//! ```

#![deny(unsafe_code)]

pub mod alias;
pub mod header;
pub mod score;

pub use alias::{
    AliasSuggestion, SUGGESTION_MIN_SIMILARITY, alias_table, canonical_for, known_fields,
    resolve, resolve_columns, suggest_canonical,
};
pub use header::{
    clean_table, dedupe_headers, drop_empty, normalize_cells, normalize_header,
    normalize_headers,
};
pub use score::{
    CategoryScore, CategoryScorer, Classification, HINT_BONUS, MIN_CATEGORY_SCORE,
    ScoreComponent, hint_keywords, required_columns,
};
