//! Core data models for introspected database schemas.
//!
//! A [`SchemaInfo`] is produced once per introspection run and never mutated
//! afterwards; a cache refresh replaces it wholesale.

use serde::{Deserialize, Serialize};

/// Field type label used when a driver reports a type code we cannot map.
pub const UNKNOWN_FIELD_TYPE: &str = "Unknown";

/// Supported database types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatabaseType {
    PostgreSQL,
    MySQL,
    SQLite,
}

impl std::fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseType::PostgreSQL => write!(f, "PostgreSQL"),
            DatabaseType::MySQL => write!(f, "MySQL"),
            DatabaseType::SQLite => write!(f, "SQLite"),
        }
    }
}

/// Normalized, driver-independent column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// Bounded character data (VARCHAR, CHAR)
    String,
    /// Unbounded character data (TEXT, CLOB)
    Text,
    SmallInteger,
    Integer,
    BigInteger,
    /// Single precision floating point
    Float,
    /// Double precision floating point
    Double,
    /// Exact numeric with precision and scale
    Decimal,
    Boolean,
    Date,
    DateTime,
    /// Timestamp carrying a time zone
    DateTimeTz,
    Time,
    Interval,
    Binary,
    Json,
    Uuid,
    IpAddress,
    /// Array of any element type
    Array,
}

impl FieldType {
    /// Returns the label rendered into [`ColumnInfo::field_type`].
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "String",
            FieldType::Text => "Text",
            FieldType::SmallInteger => "SmallInteger",
            FieldType::Integer => "Integer",
            FieldType::BigInteger => "BigInteger",
            FieldType::Float => "Float",
            FieldType::Double => "Double",
            FieldType::Decimal => "Decimal",
            FieldType::Boolean => "Boolean",
            FieldType::Date => "Date",
            FieldType::DateTime => "DateTime",
            FieldType::DateTimeTz => "DateTimeTz",
            FieldType::Time => "Time",
            FieldType::Interval => "Interval",
            FieldType::Binary => "Binary",
            FieldType::Json => "Json",
            FieldType::Uuid => "Uuid",
            FieldType::IpAddress => "IpAddress",
            FieldType::Array => "Array",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column as described by the driver, before type normalization.
///
/// `type_code` is the engine-native type identifier (declared type for
/// SQLite, `udt_name` for PostgreSQL, `DATA_TYPE` for MySQL). The remaining
/// fields are the row metadata some engines need to pick a label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnDescription {
    pub name: String,
    pub type_code: String,
    /// Full declared type text, e.g. MySQL `COLUMN_TYPE` (`tinyint(1) unsigned`)
    pub declared_type: Option<String>,
    pub max_length: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub nullable: bool,
}

impl ColumnDescription {
    /// Creates a nullable column description with no size metadata.
    pub fn new(name: impl Into<String>, type_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_code: type_code.into(),
            nullable: true,
            ..Default::default()
        }
    }
}

/// A column name paired with its normalized type label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub column_name: String,
    pub field_type: String,
}

impl ColumnInfo {
    /// Creates a column entry.
    pub fn new(column_name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            field_type: field_type.into(),
        }
    }

    /// True when the driver type could not be mapped.
    pub fn is_unknown(&self) -> bool {
        self.field_type == UNKNOWN_FIELD_TYPE
    }
}

/// A table and its columns, in driver column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Raw identifier as returned by the driver
    pub table_name: String,
    pub columns: Vec<ColumnInfo>,
}

impl TableSchema {
    /// Creates a table entry.
    pub fn new(table_name: impl Into<String>, columns: Vec<ColumnInfo>) -> Self {
        Self {
            table_name: table_name.into(),
            columns,
        }
    }
}

/// Introspected schema of one connection.
///
/// Tables appear in the order the driver enumerated them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaInfo {
    tables: Vec<TableSchema>,
}

impl SchemaInfo {
    /// Wraps an already ordered list of tables.
    pub fn new(tables: Vec<TableSchema>) -> Self {
        Self { tables }
    }

    /// Tables in enumeration order.
    pub fn tables(&self) -> &[TableSchema] {
        &self.tables
    }

    /// Looks up a table by its exact name.
    pub fn table(&self, table_name: &str) -> Option<&TableSchema> {
        self.tables.iter().find(|t| t.table_name == table_name)
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// True when no table survived filtering.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Total number of columns across all tables.
    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|t| t.columns.len()).sum()
    }
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
