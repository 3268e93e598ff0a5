//! MySQL `DATA_TYPE` names to normalized field types.

use crate::error::UnrecognizedType;
use crate::models::FieldType;

/// Maps a MySQL `DATA_TYPE` to a normalized field type.
///
/// `column_type` is the full `COLUMN_TYPE` text; it distinguishes the
/// `tinyint(1)` and `bit(1)` boolean conventions from wider integers.
///
/// # Example
/// ```rust
/// use dbexplorer_core::adapters::mysql::map_mysql_type;
/// use dbexplorer_core::models::FieldType;
///
/// assert_eq!(map_mysql_type("tinyint", Some("tinyint(1)")), Ok(FieldType::Boolean));
/// assert_eq!(map_mysql_type("tinyint", Some("tinyint(4)")), Ok(FieldType::SmallInteger));
/// ```
pub fn map_mysql_type(
    data_type: &str,
    column_type: Option<&str>,
) -> Result<FieldType, UnrecognizedType> {
    let column_type = column_type.map(str::to_lowercase).unwrap_or_default();

    let field_type = match data_type.to_lowercase().as_str() {
        "tinyint" if column_type.starts_with("tinyint(1)") => FieldType::Boolean,
        "bit" if column_type == "bit(1)" => FieldType::Boolean,
        "bool" | "boolean" => FieldType::Boolean,

        "tinyint" | "smallint" | "year" => FieldType::SmallInteger,
        "mediumint" | "int" | "integer" => FieldType::Integer,
        "bigint" => FieldType::BigInteger,

        "float" => FieldType::Float,
        "double" | "real" => FieldType::Double,
        "decimal" | "numeric" => FieldType::Decimal,

        "char" | "varchar" | "enum" | "set" => FieldType::String,
        "tinytext" | "text" | "mediumtext" | "longtext" => FieldType::Text,

        "date" => FieldType::Date,
        "datetime" | "timestamp" => FieldType::DateTime,
        "time" => FieldType::Time,

        "bit" | "binary" | "varbinary" | "tinyblob" | "blob" | "mediumblob" | "longblob" => {
            FieldType::Binary
        }
        "json" => FieldType::Json,

        _ => return Err(UnrecognizedType::new(data_type)),
    };

    Ok(field_type)
}
