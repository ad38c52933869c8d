//! Property tests for header handling and classification.

use std::collections::BTreeSet;

use proptest::prelude::*;
use semtpl_map::{CategoryScorer, dedupe_headers, normalize_headers, resolve_columns};
use semtpl_model::{Category, Table};

fn header_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Ca-c _]{0,6}", 0..12)
}

proptest! {
    #[test]
    fn normalized_headers_are_unique(headers in header_strategy()) {
        let table = normalize_headers(Table::new(headers.clone()));
        let unique: BTreeSet<&String> = table.columns.iter().collect();
        prop_assert_eq!(unique.len(), headers.len());
    }

    #[test]
    fn dedupe_is_deterministic(headers in header_strategy()) {
        let first = dedupe_headers(headers.clone());
        let second = dedupe_headers(headers);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn alias_resolution_never_merges_columns(headers in header_strategy()) {
        let columns = normalize_headers(Table::new(headers)).columns;
        for category in Category::ALL {
            let resolved = resolve_columns(&columns, category);
            let unique: BTreeSet<&String> = resolved.iter().collect();
            prop_assert_eq!(unique.len(), columns.len());
        }
    }

    #[test]
    fn classification_is_stable(headers in header_strategy(), hint in "[a-z]{0,10}") {
        let columns = normalize_headers(Table::new(headers)).columns;
        let scorer = CategoryScorer::new();
        prop_assert_eq!(scorer.classify(&columns, &hint), scorer.classify(&columns, &hint));
    }
}

#[test]
fn mixed_case_duplicates_get_suffixes() {
    let headers = vec!["A".to_string(), "a".to_string(), "A".to_string()];
    let table = normalize_headers(Table::new(headers));
    assert_eq!(table.columns, vec!["a", "a_2", "a_3"]);
}
