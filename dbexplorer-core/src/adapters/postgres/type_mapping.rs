//! PostgreSQL type names to normalized field types.
//!
//! The type code is the `udt_name` from `information_schema.columns`, which is
//! the internal type name (`int4`, `timestamptz`) rather than the SQL spelling
//! (`integer`, `timestamp with time zone`). Array types carry a leading
//! underscore (`_int4`).

use crate::error::UnrecognizedType;
use crate::models::FieldType;

/// Maps a PostgreSQL `udt_name` to a normalized field type.
///
/// Arrays map to [`FieldType::Array`] only when their element type is itself
/// recognized.
///
/// # Example
/// ```rust
/// use dbexplorer_core::adapters::postgres::map_postgresql_type;
/// use dbexplorer_core::models::FieldType;
///
/// assert_eq!(map_postgresql_type("timestamptz"), Ok(FieldType::DateTimeTz));
/// assert_eq!(map_postgresql_type("_int4"), Ok(FieldType::Array));
/// assert!(map_postgresql_type("geometry").is_err());
/// ```
pub fn map_postgresql_type(udt_name: &str) -> Result<FieldType, UnrecognizedType> {
    if let Some(element) = udt_name.strip_prefix('_') {
        return map_postgresql_type(element)
            .map(|_| FieldType::Array)
            .map_err(|_| UnrecognizedType::new(udt_name));
    }

    let field_type = match udt_name.to_lowercase().as_str() {
        // Character types
        "varchar" | "bpchar" | "char" | "name" => FieldType::String,
        "text" | "citext" => FieldType::Text,

        // Integer types
        "int2" => FieldType::SmallInteger,
        "int4" | "oid" => FieldType::Integer,
        "int8" => FieldType::BigInteger,

        // Floating point and exact numerics
        "float4" => FieldType::Float,
        "float8" => FieldType::Double,
        "numeric" | "money" => FieldType::Decimal,

        "bool" => FieldType::Boolean,

        // Date and time types
        "date" => FieldType::Date,
        "timestamp" => FieldType::DateTime,
        "timestamptz" => FieldType::DateTimeTz,
        "time" | "timetz" => FieldType::Time,
        "interval" => FieldType::Interval,

        "bytea" => FieldType::Binary,
        "json" | "jsonb" => FieldType::Json,
        "uuid" => FieldType::Uuid,
        "inet" | "cidr" => FieldType::IpAddress,

        _ => return Err(UnrecognizedType::new(udt_name)),
    };

    Ok(field_type)
}
