//! In-memory adapter and resolver doubles with call counters.

#![allow(dead_code)]

use async_trait::async_trait;
use dbexplorer_core::{
    ColumnDescription, ConnectionConfig, ConnectionResolver, DatabaseAdapter, DatabaseType,
    ExplorerError, FieldType, IntrospectionCursor, Result, UnrecognizedType,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, Default)]
pub struct Counters {
    pub cursors_opened: Arc<AtomicUsize>,
    pub cursors_released: Arc<AtomicUsize>,
    pub enumerations: Arc<AtomicUsize>,
    pub describes: Arc<AtomicUsize>,
}

impl Counters {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

/// Fake database: ordered tables with `(column, native type)` pairs.
///
/// Native types are mapped by a small fixed table; anything else is
/// unrecognized.
#[derive(Debug, Clone, Default)]
pub struct MockDatabase {
    pub tables: Vec<(String, Vec<(String, String)>)>,
    pub fail_enumeration: bool,
    pub fail_describe_for: Option<String>,
    pub counters: Counters,
}

impl MockDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, name: &str, columns: &[(&str, &str)]) -> Self {
        self.tables.push((
            name.to_string(),
            columns
                .iter()
                .map(|(c, t)| ((*c).to_string(), (*t).to_string()))
                .collect(),
        ));
        self
    }

    pub fn failing_enumeration(mut self) -> Self {
        self.fail_enumeration = true;
        self
    }

    pub fn failing_describe(mut self, table: &str) -> Self {
        self.fail_describe_for = Some(table.to_string());
        self
    }

    pub fn adapter(&self) -> MockAdapter {
        MockAdapter { db: self.clone() }
    }
}

pub fn map_mock_type(type_code: &str) -> std::result::Result<FieldType, UnrecognizedType> {
    match type_code {
        "int" => Ok(FieldType::Integer),
        "bigint" => Ok(FieldType::BigInteger),
        "varchar" => Ok(FieldType::String),
        "text" => Ok(FieldType::Text),
        "bool" => Ok(FieldType::Boolean),
        "timestamp" => Ok(FieldType::DateTime),
        other => Err(UnrecognizedType::new(other)),
    }
}

#[derive(Debug, Clone)]
pub struct MockAdapter {
    db: MockDatabase,
}

#[async_trait]
impl DatabaseAdapter for MockAdapter {
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn cursor(&self) -> Result<Box<dyn IntrospectionCursor>> {
        self.db.counters.cursors_opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockCursor {
            db: self.db.clone(),
        }))
    }

    fn map_type(
        &self,
        column: &ColumnDescription,
    ) -> std::result::Result<FieldType, UnrecognizedType> {
        map_mock_type(&column.type_code)
    }

    fn database_type(&self) -> DatabaseType {
        DatabaseType::SQLite
    }

    fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig::new("mock".to_string())
    }
}

pub struct MockCursor {
    db: MockDatabase,
}

impl Drop for MockCursor {
    fn drop(&mut self) {
        self.db
            .counters
            .cursors_released
            .fetch_add(1, Ordering::SeqCst);
    }
}

fn driver_error(message: &str) -> std::io::Error {
    std::io::Error::other(message.to_string())
}

#[async_trait]
impl IntrospectionCursor for MockCursor {
    async fn table_names(&mut self) -> Result<Vec<String>> {
        self.db.counters.enumerations.fetch_add(1, Ordering::SeqCst);
        if self.db.fail_enumeration {
            return Err(ExplorerError::introspection_failed(
                "Failed to enumerate tables",
                driver_error("catalog unavailable"),
            ));
        }
        Ok(self.db.tables.iter().map(|(name, _)| name.clone()).collect())
    }

    async fn describe_table(&mut self, table_name: &str) -> Result<Vec<ColumnDescription>> {
        self.db.counters.describes.fetch_add(1, Ordering::SeqCst);
        if self.db.fail_describe_for.as_deref() == Some(table_name) {
            return Err(ExplorerError::introspection_failed(
                format!("Failed to describe table '{}'", table_name),
                driver_error("permission denied"),
            ));
        }

        let columns = self
            .db
            .tables
            .iter()
            .find(|(name, _)| name == table_name)
            .map(|(_, columns)| {
                columns
                    .iter()
                    .map(|(name, type_code)| {
                        ColumnDescription::new(name.as_str(), type_code.as_str())
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(columns)
    }
}

/// Resolver over a fixed set of mock databases.
#[derive(Debug, Clone, Default)]
pub struct MockResolver {
    databases: HashMap<String, MockDatabase>,
    pub resolves: Arc<AtomicUsize>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database(mut self, alias: &str, db: MockDatabase) -> Self {
        self.databases.insert(alias.to_string(), db);
        self
    }

    pub fn resolve_count(&self) -> usize {
        self.resolves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectionResolver for MockResolver {
    async fn resolve(&self, alias: &str) -> Result<Box<dyn DatabaseAdapter>> {
        self.resolves.fetch_add(1, Ordering::SeqCst);
        let db = self
            .databases
            .get(alias)
            .ok_or_else(|| ExplorerError::invalid_alias(alias))?;
        Ok(Box::new(db.adapter()))
    }
}
