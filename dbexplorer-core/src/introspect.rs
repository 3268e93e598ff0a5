//! Schema introspection over a live adapter.
//!
//! Tables come back in driver enumeration order with their columns in
//! ordinal order. Tables rejected by the filter are left out entirely. A
//! column whose native type cannot be mapped is labelled
//! [`UNKNOWN_FIELD_TYPE`] and the run carries on. Any catalog query failure
//! aborts the run and discards what was collected so far.

use crate::Result;
use crate::adapters::DatabaseAdapter;
use crate::filter::{FilterConfigProvider, include_table};
use crate::models::{ColumnDescription, ColumnInfo, SchemaInfo, TableSchema, UNKNOWN_FIELD_TYPE};

/// Introspects every eligible table visible to `adapter`.
///
/// The filter configuration is read from `filter` once per table, so a
/// change made while a run is in progress applies to the remaining tables.
///
/// # Errors
/// - [`ExplorerError::Connection`](crate::ExplorerError::Connection) if no
///   cursor can be acquired
/// - [`ExplorerError::Introspection`](crate::ExplorerError::Introspection) if
///   enumerating or describing tables fails
pub async fn introspect(
    adapter: &dyn DatabaseAdapter,
    filter: &dyn FilterConfigProvider,
) -> Result<SchemaInfo> {
    let start_time = std::time::Instant::now();
    let database_type = adapter.database_type();

    tracing::debug!("Starting {} schema introspection", database_type);

    // Dropped on every return path below, releasing the pooled connection
    let mut cursor = adapter.cursor().await?;

    let table_names = cursor.table_names().await?;
    let enumerated = table_names.len();

    let mut tables = Vec::new();
    let mut unknown_columns = 0usize;

    for table_name in table_names {
        if !include_table(&table_name, &filter.filter_config()) {
            tracing::trace!("Skipping filtered table '{}'", table_name);
            continue;
        }

        let descriptions = cursor.describe_table(&table_name).await?;

        let columns: Vec<ColumnInfo> = descriptions
            .iter()
            .map(|column| {
                let info = normalize_column(adapter, &table_name, column);
                if info.is_unknown() {
                    unknown_columns = unknown_columns.saturating_add(1);
                }
                info
            })
            .collect();

        tracing::debug!(
            "Introspected table '{}' with {} columns",
            table_name,
            columns.len()
        );

        tables.push(TableSchema::new(table_name, columns));
    }

    drop(cursor);

    tracing::info!(
        "{} schema introspection completed in {:.2}s - {} of {} tables, {} unknown column types",
        database_type,
        start_time.elapsed().as_secs_f64(),
        tables.len(),
        enumerated,
        unknown_columns
    );

    Ok(SchemaInfo::new(tables))
}

fn normalize_column(
    adapter: &dyn DatabaseAdapter,
    table_name: &str,
    column: &ColumnDescription,
) -> ColumnInfo {
    match adapter.map_type(column) {
        Ok(field_type) => ColumnInfo::new(column.name.clone(), field_type.as_str()),
        Err(e) => {
            tracing::debug!("{}.{}: {}", table_name, column.name, e);
            ColumnInfo::new(column.name.clone(), UNKNOWN_FIELD_TYPE)
        }
    }
}
