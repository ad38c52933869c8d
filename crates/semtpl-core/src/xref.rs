//! Cube name to physical table lookup.

use std::collections::{BTreeMap, BTreeSet};

/// Maps cube names to the physical table each cube is built on.
///
/// Filled by the cube pass and then lent immutably to the join pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CubeIndex {
    tables: BTreeMap<String, String>,
}

impl CubeIndex {
    /// Records `name -> table`. A later registration for the same name wins.
    pub fn register(&mut self, name: impl Into<String>, table: impl Into<String>) {
        self.tables.insert(name.into(), table.into());
    }

    pub fn table_for(&self, name: &str) -> Option<&str> {
        self.tables.get(name).map(String::as_str)
    }

    /// Primary-table values a join may carry when filtering to `only_cube`:
    /// the cube name itself plus its physical table when known.
    pub fn allowed_primaries(&self, only_cube: &str) -> BTreeSet<String> {
        let mut allowed = BTreeSet::from([only_cube.to_string()]);
        if let Some(table) = self.table_for(only_cube) {
            allowed.insert(table.to_string());
        }
        allowed
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_registration_wins() {
        let mut index = CubeIndex::default();
        index.register("orders", "raw.orders");
        index.register("orders", "public.orders");
        assert_eq!(index.table_for("orders"), Some("public.orders"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn allowed_primaries_include_physical_table() {
        let mut index = CubeIndex::default();
        index.register("orders", "public.orders");
        let allowed = index.allowed_primaries("orders");
        assert!(allowed.contains("orders"));
        assert!(allowed.contains("public.orders"));
        assert_eq!(allowed.len(), 2);
    }

    #[test]
    fn unknown_cube_allows_only_its_name() {
        let index = CubeIndex::default();
        assert!(index.is_empty());
        let allowed = index.allowed_primaries("users");
        assert_eq!(allowed.into_iter().collect::<Vec<_>>(), vec!["users"]);
    }
}
