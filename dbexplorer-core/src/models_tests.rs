//! Tests for the schema models.

use super::*;

fn sample_schema() -> SchemaInfo {
    SchemaInfo::new(vec![
        TableSchema::new(
            "shop_order",
            vec![
                ColumnInfo::new("id", "Integer"),
                ColumnInfo::new("placed_at", "DateTime"),
            ],
        ),
        TableSchema::new("shop_item", vec![ColumnInfo::new("sku", "String")]),
    ])
}

#[test]
fn test_schema_preserves_table_order() {
    let schema = sample_schema();
    let names: Vec<&str> = schema
        .tables()
        .iter()
        .map(|t| t.table_name.as_str())
        .collect();

    // Enumeration order, not alphabetical
    assert_eq!(names, vec!["shop_order", "shop_item"]);
    assert_eq!(schema.len(), 2);
    assert_eq!(schema.column_count(), 3);
}

#[test]
fn test_table_lookup() {
    let schema = sample_schema();
    let table = schema.table("shop_item").expect("table should exist");
    assert_eq!(table.columns[0].column_name, "sku");
    assert!(schema.table("auth_user").is_none());
}

#[test]
fn test_empty_schema() {
    let schema = SchemaInfo::default();
    assert!(schema.is_empty());
    assert_eq!(schema.column_count(), 0);
}

#[test]
fn test_unknown_column() {
    assert!(ColumnInfo::new("shape", UNKNOWN_FIELD_TYPE).is_unknown());
    assert!(!ColumnInfo::new("id", FieldType::Integer.as_str()).is_unknown());
}

#[test]
fn test_field_type_display() {
    assert_eq!(FieldType::BigInteger.to_string(), "BigInteger");
    assert_eq!(FieldType::DateTimeTz.to_string(), "DateTimeTz");
    assert_eq!(FieldType::Json.to_string(), "Json");
}

#[test]
fn test_schema_serializes_as_table_list() {
    let schema = sample_schema();
    let json = serde_json::to_value(&schema).expect("serialize");

    assert!(json.is_array());
    assert_eq!(json[0]["table_name"], "shop_order");
    assert_eq!(json[0]["columns"][1]["column_name"], "placed_at");
    assert_eq!(json[0]["columns"][1]["field_type"], "DateTime");

    let restored: SchemaInfo = serde_json::from_value(json).expect("deserialize");
    assert_eq!(restored, schema);
}

#[test]
fn test_column_description_defaults() {
    let column = ColumnDescription::new("email", "varchar");
    assert!(column.nullable);
    assert_eq!(column.max_length, None);
    assert_eq!(column.type_code, "varchar");
}

#[test]
fn test_database_type_display() {
    assert_eq!(DatabaseType::PostgreSQL.to_string(), "PostgreSQL");
    assert_eq!(DatabaseType::MySQL.to_string(), "MySQL");
    assert_eq!(DatabaseType::SQLite.to_string(), "SQLite");
}
