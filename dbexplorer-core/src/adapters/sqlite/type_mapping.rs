//! SQLite declared types to normalized field types.
//!
//! SQLite accepts any declared type name and only derives a storage affinity
//! from it. Mapping is by exact base name (case-insensitive, size arguments
//! stripped) so that types we have never seen surface as unrecognized rather
//! than being guessed from affinity.

use crate::adapters::split_type_arguments;
use crate::error::UnrecognizedType;
use crate::models::FieldType;

/// Maps a SQLite declared type to a normalized field type.
///
/// A column declared without a type has BLOB affinity and maps to
/// [`FieldType::Binary`].
///
/// # Example
/// ```rust
/// use dbexplorer_core::adapters::sqlite::map_sqlite_type;
/// use dbexplorer_core::models::FieldType;
///
/// assert_eq!(map_sqlite_type("varchar(30)"), Ok(FieldType::String));
/// assert_eq!(map_sqlite_type("integer unsigned"), Ok(FieldType::Integer));
/// assert!(map_sqlite_type("GEOMETRY").is_err());
/// ```
pub fn map_sqlite_type(declared_type: &str) -> Result<FieldType, UnrecognizedType> {
    let (base, _args) = split_type_arguments(declared_type);
    let base = base.to_uppercase();
    // Django declares e.g. "integer unsigned" for positive integer fields
    let base = base.strip_suffix(" UNSIGNED").unwrap_or(&base).trim_end();

    let field_type = match base {
        "" | "BLOB" => FieldType::Binary,

        "BOOL" | "BOOLEAN" => FieldType::Boolean,

        "TINYINT" | "SMALLINT" | "INT2" => FieldType::SmallInteger,
        "INT" | "INTEGER" | "MEDIUMINT" | "INT4" => FieldType::Integer,
        "BIGINT" | "INT8" | "UNSIGNED BIG INT" => FieldType::BigInteger,

        "CHAR" | "CHARACTER" | "NCHAR" | "VARCHAR" | "NVARCHAR" | "VARYING CHARACTER"
        | "CHARACTER VARYING" | "NATIVE CHARACTER" => FieldType::String,
        "TEXT" | "CLOB" => FieldType::Text,

        "FLOAT" => FieldType::Float,
        // SQLite REAL is an 8-byte IEEE float
        "REAL" | "DOUBLE" | "DOUBLE PRECISION" => FieldType::Double,
        "DECIMAL" | "NUMERIC" => FieldType::Decimal,

        "DATE" => FieldType::Date,
        "DATETIME" | "TIMESTAMP" => FieldType::DateTime,
        "TIME" => FieldType::Time,

        "JSON" => FieldType::Json,
        "UUID" => FieldType::Uuid,

        _ => return Err(UnrecognizedType::new(declared_type.trim())),
    };

    Ok(field_type)
}
