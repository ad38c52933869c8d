//! Tests for semtpl-model types.

use semtpl_model::{
    Category, CellValue, ConvertOptions, Document, FieldValue, Record, SourceTable, Table,
};

#[test]
fn document_serializes_sections_in_order() {
    let mut document = Document::default();
    let mut record = Record::new();
    record.insert("name".to_string(), FieldValue::from("orders"));
    record.insert("primaryKey".to_string(), FieldValue::Bool(true));
    document.dimensions.push(record);

    let json = serde_json::to_string(&document).expect("serialize document");
    assert_eq!(
        json,
        r#"{"cubes":[],"joins":[],"dimensions":[{"name":"orders","primaryKey":true}],"measures":[]}"#
    );

    let round: Document = serde_json::from_str(&json).expect("deserialize document");
    assert_eq!(round, document);
}

#[test]
fn field_values_keep_their_types() {
    let json = r#"{"a":1,"b":1.5,"c":false,"d":"x"}"#;
    let record: Record = serde_json::from_str(json).expect("deserialize record");
    assert_eq!(record["a"], FieldValue::Int(1));
    assert_eq!(record["b"], FieldValue::Float(1.5));
    assert_eq!(record["c"], FieldValue::Bool(false));
    assert_eq!(record["d"], FieldValue::Text("x".to_string()));
}

#[test]
fn convert_options_default_includes_unknown() {
    let options = ConvertOptions::default();
    assert!(options.include_unknown);
    assert!(options.only_cube.is_none());

    let options = ConvertOptions::new()
        .with_only_cube(Some("orders".to_string()))
        .with_include_unknown(false);
    assert_eq!(options.only_cube.as_deref(), Some("orders"));
    assert!(!options.include_unknown);
}

#[test]
fn source_table_with_fixed_category() {
    let mut table = Table::new(vec!["name".to_string()]);
    table.push_row(vec![CellValue::text("a")]);
    let source = SourceTable::new("cubes.csv", "cubes", table).with_category(Category::Cube);
    assert_eq!(source.category, Some(Category::Cube));
    assert_eq!(source.table.height(), 1);
}
