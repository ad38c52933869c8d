//! Turning routed tables into output records.
//!
//! Cubes are assembled first and fill the [`CubeIndex`]; joins are assembled
//! afterwards against a shared borrow of that index, so `only_cube`
//! filtering can match a join's primary table by cube name or by the cube's
//! physical table.

use std::collections::BTreeMap;

use semtpl_model::{
    Category, CellValue, ConvertOptions, Document, FieldValue, Record, Row, Table,
    coerce_bool, collapse_multiline,
};
use tracing::debug;

use crate::xref::CubeIndex;

const CUBE_FIELDS: &[&str] = &["description", "name", "sql_table", "title"];
const CUBE_EXCLUDED: &[&str] = &["table"];

const JOIN_EXCLUDED: &[&str] = &[
    "primary_table",
    "secondary_table",
    "relationship",
    "primary_table_key_column",
    "secondary_table_key_column",
    "sql",
];

const DIMENSION_FIELDS: &[&str] = &["name", "title", "description", "sql", "type"];
const DIMENSION_EXCLUDED: &[&str] = &["name", "title", "description", "sql", "type", "primarykey"];

const MEASURE_FIELDS: &[&str] = &["name", "title", "description", "sql", "type"];

/// Output key for the dimension primary-key flag.
pub const PRIMARY_KEY_FIELD: &str = "primaryKey";

/// Display text of a present cell, used for name comparisons.
fn text_of(row: &Row, key: &str) -> Option<String> {
    row.get(key)
        .filter(|cell| !cell.is_missing())
        .map(ToString::to_string)
}

fn field_value(key: &str, cell: &CellValue) -> Option<FieldValue> {
    let value = FieldValue::from_cell(cell.clone())?;
    match value {
        FieldValue::Text(text) if key == "description" => {
            Some(FieldValue::Text(collapse_multiline(&text)))
        }
        other => Some(other),
    }
}

/// Copies the listed keys, in list order, when present in the row.
fn copy_fields(record: &mut Record, row: &Row, keys: &[&str]) {
    for key in keys {
        if let Some(value) = row.get(*key).and_then(|cell| field_value(key, cell)) {
            record.insert((*key).to_string(), value);
        }
    }
}

/// Copies every other column, in column order, without overwriting keys
/// already on the record.
fn copy_unknown(record: &mut Record, row: &Row, excluded: &[&str]) {
    for (key, cell) in row {
        if excluded.contains(&key.as_str()) || record.contains_key(key) {
            continue;
        }
        if let Some(value) = field_value(key, cell) {
            record.insert(key.clone(), value);
        }
    }
}

/// Assembles cube records and builds the cube index.
pub fn assemble_cubes(table: &Table, options: &ConvertOptions) -> (Vec<Record>, CubeIndex) {
    let mut index = CubeIndex::default();
    let mut records = Vec::new();

    for row in table.records() {
        let name = text_of(&row, "name");
        if let Some(only_cube) = &options.only_cube
            && name.as_deref() != Some(only_cube.as_str())
        {
            continue;
        }
        if let (Some(name), Some(physical)) = (&name, text_of(&row, "table")) {
            index.register(name.clone(), physical);
        }

        let mut record = Record::new();
        copy_fields(&mut record, &row, CUBE_FIELDS);
        if options.include_unknown {
            copy_unknown(&mut record, &row, CUBE_EXCLUDED);
        }
        records.push(record);
    }

    (records, index)
}

/// Assembles join records, filtering on `only_cube` through the index.
pub fn assemble_joins(table: &Table, index: &CubeIndex, options: &ConvertOptions) -> Vec<Record> {
    let allowed = options
        .only_cube
        .as_deref()
        .map(|cube| index.allowed_primaries(cube));
    let mut records = Vec::new();

    for row in table.records() {
        let primary = text_of(&row, "primary_table");
        if let Some(allowed) = &allowed
            && !primary.as_ref().is_some_and(|primary| allowed.contains(primary))
        {
            debug!(primary_table = ?primary, "Skipping join outside the selected cube");
            continue;
        }

        let mut record = Record::new();
        if let Some(secondary) = row.get("secondary_table").and_then(|c| field_value("name", c)) {
            record.insert("name".to_string(), secondary);
        }
        copy_fields(&mut record, &row, &["relationship"]);

        let sql = row.get("sql").and_then(|cell| field_value("sql", cell)).or_else(|| {
            let primary_key = text_of(&row, "primary_table_key_column")?;
            let secondary_key = text_of(&row, "secondary_table_key_column")?;
            Some(FieldValue::Text(format!("{primary_key}={secondary_key}")))
        });
        if let Some(sql) = sql {
            record.insert("sql".to_string(), sql);
        }

        if options.include_unknown {
            copy_unknown(&mut record, &row, JOIN_EXCLUDED);
        }
        records.push(record);
    }

    records
}

/// Assembles dimension records.
///
/// `primaryKey` is emitted only when the `primarykey` column holds a value.
pub fn assemble_dimensions(table: &Table, options: &ConvertOptions) -> Vec<Record> {
    table
        .records()
        .map(|row| {
            let mut record = Record::new();
            copy_fields(&mut record, &row, DIMENSION_FIELDS);
            if let Some(flag) = row.get("primarykey").and_then(coerce_bool) {
                record.insert(PRIMARY_KEY_FIELD.to_string(), FieldValue::Bool(flag));
            }
            if options.include_unknown {
                copy_unknown(&mut record, &row, DIMENSION_EXCLUDED);
            }
            record
        })
        .collect()
}

/// Assembles measure records.
pub fn assemble_measures(table: &Table, options: &ConvertOptions) -> Vec<Record> {
    table
        .records()
        .map(|row| {
            let mut record = Record::new();
            copy_fields(&mut record, &row, MEASURE_FIELDS);
            if options.include_unknown {
                copy_unknown(&mut record, &row, MEASURE_FIELDS);
            }
            record
        })
        .collect()
}

/// Builds the output document from per-category tables.
///
/// Tables are expected to be cleaned and alias-resolved, as produced by the
/// router. Categories without a table yield an empty list.
pub fn assemble(buckets: &BTreeMap<Category, Table>, options: &ConvertOptions) -> Document {
    let empty = Table::default();
    let bucket = |category: Category| buckets.get(&category).unwrap_or(&empty);

    let (cubes, index) = assemble_cubes(bucket(Category::Cube), options);
    debug!(cubes = cubes.len(), indexed = index.len(), "Assembled cubes");
    let joins = assemble_joins(bucket(Category::Join), &index, options);

    Document {
        cubes,
        joins,
        dimensions: assemble_dimensions(bucket(Category::Dimension), options),
        measures: assemble_measures(bucket(Category::Measure), options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        let mut table = Table::new(columns.iter().map(|c| (*c).to_string()).collect());
        for row in rows {
            table.push_row(
                row.iter()
                    .map(|cell| {
                        if cell.is_empty() {
                            CellValue::Missing
                        } else {
                            CellValue::text(*cell)
                        }
                    })
                    .collect(),
            );
        }
        table
    }

    fn keys(record: &Record) -> Vec<&str> {
        record.keys().map(String::as_str).collect()
    }

    #[test]
    fn cube_key_order_and_table_is_hidden() {
        let cubes = table(
            &["name", "table", "title", "sql_table", "owner", "description"],
            &[&["orders", "raw.orders", "Orders", "public.orders", "ops", "All\n  orders"]],
        );
        let (records, index) = assemble_cubes(&cubes, &ConvertOptions::default());
        assert_eq!(
            keys(&records[0]),
            vec!["description", "name", "sql_table", "title", "owner"]
        );
        assert_eq!(records[0]["description"], FieldValue::from("All orders"));
        assert_eq!(index.table_for("orders"), Some("raw.orders"));
    }

    #[test]
    fn join_sql_is_synthesized_from_key_columns() {
        let joins = table(
            &[
                "primary_table",
                "secondary_table",
                "relationship",
                "primary_table_key_column",
                "secondary_table_key_column",
            ],
            &[&["orders", "customers", "many_to_one", "customer_id", "id"]],
        );
        let records = assemble_joins(&joins, &CubeIndex::default(), &ConvertOptions::default());
        assert_eq!(keys(&records[0]), vec!["name", "relationship", "sql"]);
        assert_eq!(records[0]["name"], FieldValue::from("customers"));
        assert_eq!(records[0]["sql"], FieldValue::from("customer_id=id"));
    }

    #[test]
    fn explicit_join_sql_wins() {
        let joins = table(
            &[
                "primary_table",
                "secondary_table",
                "sql",
                "primary_table_key_column",
                "secondary_table_key_column",
            ],
            &[&["orders", "customers", "{CUBE}.a = b", "x", "y"]],
        );
        let records = assemble_joins(&joins, &CubeIndex::default(), &ConvertOptions::default());
        assert_eq!(records[0]["sql"], FieldValue::from("{CUBE}.a = b"));
    }

    #[test]
    fn join_without_sql_or_keys_omits_sql() {
        let joins = table(
            &["primary_table", "secondary_table", "primary_table_key_column"],
            &[&["orders", "customers", "x"]],
        );
        let records = assemble_joins(&joins, &CubeIndex::default(), &ConvertOptions::default());
        assert!(!records[0].contains_key("sql"));
    }

    #[test]
    fn only_cube_filters_joins_by_name_or_physical_table() {
        let mut index = CubeIndex::default();
        index.register("orders", "public.orders");
        let joins = table(
            &["primary_table", "secondary_table"],
            &[
                &["orders", "a"],
                &["public.orders", "b"],
                &["users", "c"],
                &["", "d"],
            ],
        );
        let options = ConvertOptions::new().with_only_cube(Some("orders".into()));
        let records = assemble_joins(&joins, &index, &options);
        let names: Vec<_> = records.iter().map(|r| r["name"].to_string()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn primary_key_only_when_present() {
        let dims = table(
            &["name", "primarykey"],
            &[&["id", "Yes"], &["status", ""], &["kind", "no"]],
        );
        let records = assemble_dimensions(&dims, &ConvertOptions::default());
        assert_eq!(records[0][PRIMARY_KEY_FIELD], FieldValue::Bool(true));
        assert!(!records[1].contains_key(PRIMARY_KEY_FIELD));
        assert_eq!(records[2][PRIMARY_KEY_FIELD], FieldValue::Bool(false));
        assert!(!records[0].contains_key("primarykey"));
    }

    #[test]
    fn unknown_fields_toggle() {
        let measures = table(&["name", "type", "format"], &[&["count", "count", "number"]]);
        let with = assemble_measures(&measures, &ConvertOptions::default());
        let without =
            assemble_measures(&measures, &ConvertOptions::new().with_include_unknown(false));
        assert_eq!(keys(&with[0]), vec!["name", "type", "format"]);
        assert_eq!(keys(&without[0]), vec!["name", "type"]);
    }

    #[test]
    fn numeric_names_compare_as_text() {
        let mut cubes = Table::new(vec!["name".into(), "table".into()]);
        cubes.push_row(vec![CellValue::Int(42), CellValue::text("t42")]);
        let options = ConvertOptions::new().with_only_cube(Some("42".into()));
        let (records, index) = assemble_cubes(&cubes, &options);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"], FieldValue::Int(42));
        assert_eq!(index.table_for("42"), Some("t42"));
    }

    #[test]
    fn missing_buckets_give_empty_lists() {
        let document = assemble(&BTreeMap::new(), &ConvertOptions::default());
        assert!(document.is_empty());
    }
}
