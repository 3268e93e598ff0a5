//! SQLite introspection integration tests.
//!
//! This test suite covers:
//! - Table enumeration from sqlite_master
//! - Column order and type labels from PRAGMA table_info
//! - Unknown declared types
//! - End-to-end resolution and caching of a file database
//!
//! SQLite tests use in-memory or temporary file databases, so no
//! testcontainers needed.

#![cfg(feature = "sqlite")]

use dbexplorer_core::{
    ConnectionRegistry, DatabaseAdapter, FilterConfig, MemoryCacheStore, Result, SchemaCache,
    UNKNOWN_FIELD_TYPE, adapters::sqlite::SqliteAdapter, introspect,
};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::sync::Arc;

/// Creates an in-memory database populated by `ddl`.
async fn adapter_with_schema(ddl: &[&str]) -> SqliteAdapter {
    let pool: SqlitePool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory database");

    for statement in ddl {
        sqlx::query(statement)
            .execute(&pool)
            .await
            .expect("apply schema");
    }

    SqliteAdapter::from_pool(pool, "sqlite::memory:")
}

fn labels(schema: &dbexplorer_core::SchemaInfo, table: &str) -> Vec<(String, String)> {
    schema
        .table(table)
        .map(|t| {
            t.columns
                .iter()
                .map(|c| (c.column_name.clone(), c.field_type.clone()))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn test_sqlite_column_types() -> Result<()> {
    let adapter = adapter_with_schema(&[r#"
        CREATE TABLE shop_order (
            id INTEGER PRIMARY KEY,
            customer VARCHAR(120) NOT NULL,
            notes TEXT,
            total DECIMAL(10, 2),
            ratio REAL,
            paid BOOLEAN,
            placed_at DATETIME,
            payload BLOB
        )
    "#])
    .await;

    let schema = introspect(&adapter, &FilterConfig::default()).await?;

    assert_eq!(
        labels(&schema, "shop_order"),
        [
            ("id", "Integer"),
            ("customer", "String"),
            ("notes", "Text"),
            ("total", "Decimal"),
            ("ratio", "Double"),
            ("paid", "Boolean"),
            ("placed_at", "DateTime"),
            ("payload", "Binary"),
        ]
        .map(|(c, t)| (c.to_string(), t.to_string()))
    );
    Ok(())
}

#[tokio::test]
async fn test_sqlite_unknown_declared_type() -> Result<()> {
    let adapter = adapter_with_schema(&[
        "CREATE TABLE places (id INTEGER, area GEOMETRY, name TEXT)",
        "CREATE TABLE tags (label TEXT)",
    ])
    .await;

    let schema = introspect(&adapter, &FilterConfig::default()).await?;

    let places = labels(&schema, "places");
    assert_eq!(places.len(), 3);
    assert_eq!(places[1], ("area".to_string(), UNKNOWN_FIELD_TYPE.to_string()));
    assert_eq!(places[2].1, "Text");
    assert!(schema.table("tags").is_some());
    Ok(())
}

#[tokio::test]
async fn test_sqlite_filter_and_internal_tables() -> Result<()> {
    let adapter = adapter_with_schema(&[
        "CREATE TABLE auth_user (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT)",
        "CREATE TABLE shop_order (id INTEGER)",
        "INSERT INTO auth_user (name) VALUES ('admin')",
    ])
    .await;

    let all = introspect(&adapter, &FilterConfig::default()).await?;
    let names: Vec<&str> = all.tables().iter().map(|t| t.table_name.as_str()).collect();
    // AUTOINCREMENT creates sqlite_sequence, which is never reported
    assert_eq!(names, ["auth_user", "shop_order"]);

    let filtered = introspect(&adapter, &FilterConfig::excluding(["auth_"])).await?;
    assert_eq!(filtered.len(), 1);
    assert!(filtered.table("shop_order").is_some());
    Ok(())
}

#[tokio::test]
async fn test_sqlite_statistics_tables_follow_the_filter() -> Result<()> {
    let adapter = adapter_with_schema(&[
        "CREATE TABLE shop_order (id INTEGER PRIMARY KEY AUTOINCREMENT, sku TEXT)",
        "CREATE INDEX shop_order_sku ON shop_order (sku)",
        "INSERT INTO shop_order (sku) VALUES ('a'), ('b')",
        "ANALYZE",
    ])
    .await;

    let all = introspect(&adapter, &FilterConfig::default()).await?;
    assert!(all.table("sqlite_stat1").is_some());
    assert!(all.table("sqlite_sequence").is_none());

    let hidden = introspect(&adapter, &FilterConfig::excluding(["sqlite_stat"])).await?;
    let names: Vec<&str> = hidden.tables().iter().map(|t| t.table_name.as_str()).collect();
    assert_eq!(names, ["shop_order"]);

    let only_internal = introspect(&adapter, &FilterConfig::including(["sqlite_"])).await?;
    let names: Vec<&str> = only_internal
        .tables()
        .iter()
        .map(|t| t.table_name.as_str())
        .collect();
    // sqlite_stat4 also appears when the library is built with STAT4
    assert!(names.contains(&"sqlite_stat1"));
    assert!(names.iter().all(|name| name.starts_with("sqlite_stat")));
    Ok(())
}

#[tokio::test]
async fn test_sqlite_empty_database() -> Result<()> {
    let adapter = adapter_with_schema(&[]).await;
    adapter.test_connection().await?;

    let schema = introspect(&adapter, &FilterConfig::default()).await?;
    assert!(schema.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_sqlite_connection_returned_to_pool() -> Result<()> {
    let adapter = adapter_with_schema(&["CREATE TABLE t (id INTEGER)"]).await;

    // The pool holds a single connection, so a leaked cursor would make the
    // second run wait forever
    let first = introspect(&adapter, &FilterConfig::default()).await?;
    let second = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        introspect(&adapter, &FilterConfig::default()),
    )
    .await
    .expect("second introspection timed out")?;

    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn test_sqlite_file_database_through_registry_and_cache() -> Result<()> {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("app.db");

    let writer = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(&path)
                .create_if_missing(true),
        )
        .await
        .expect("create database file");
    sqlx::query("CREATE TABLE shop_item (id INTEGER PRIMARY KEY, sku VARCHAR(32))")
        .execute(&writer)
        .await
        .expect("create table");
    writer.close().await;

    let registry = ConnectionRegistry::new()
        .with_connection("app", format!("sqlite://{}", path.display()));
    let store = Arc::new(MemoryCacheStore::new());
    let cache = SchemaCache::new(
        Arc::new(registry),
        store.clone(),
        Arc::new(FilterConfig::default()),
    );

    let schema = cache.get_schema("app").await?;
    assert_eq!(
        labels(&schema, "shop_item"),
        [("id", "Integer"), ("sku", "String")].map(|(c, t)| (c.to_string(), t.to_string()))
    );
    assert_eq!(store.len().await, 1);

    let missing = cache.get_schema("other").await.unwrap_err();
    assert!(missing.is_connection());
    Ok(())
}
