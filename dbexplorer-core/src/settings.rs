//! Settings file for dbexplorer.
//!
//! ```json
//! {
//!   "connections": { "main": "postgres://app@db.internal/shop" },
//!   "default_connection": "main",
//!   "schema": { "exclude_prefixes": ["django_", "auth_"] },
//!   "cache_ttl_secs": 300
//! }
//! ```
//!
//! Every field is optional.

use crate::Result;
use crate::cache::DEFAULT_CACHE_TTL;
use crate::error::ExplorerError;
use crate::filter::FilterConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Top-level dbexplorer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerSettings {
    /// Connection alias to connection URL
    pub connections: BTreeMap<String, String>,
    /// Alias used when a command names none
    pub default_connection: Option<String>,
    /// Table filter applied during introspection
    pub schema: FilterConfig,
    /// Lifetime of cached schemas, in seconds
    pub cache_ttl_secs: u64,
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self {
            connections: BTreeMap::new(),
            default_connection: None,
            schema: FilterConfig::default(),
            cache_ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
        }
    }
}

impl ExplorerSettings {
    /// Loads and validates settings from a JSON file.
    ///
    /// # Errors
    /// Returns [`ExplorerError::Io`] if the file cannot be read,
    /// [`ExplorerError::Serialization`] if it is not valid settings JSON, and
    /// [`ExplorerError::Configuration`] if validation fails.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ExplorerError::Io {
            context: format!("Failed to read settings file '{}'", path.display()),
            source: e,
        })?;

        let settings = Self::from_json_str(&contents)?;
        tracing::debug!(
            "Loaded {} connection(s) from '{}'",
            settings.connections.len(),
            path.display()
        );
        Ok(settings)
    }

    /// Parses and validates settings from a JSON string.
    ///
    /// # Errors
    /// See [`ExplorerSettings::from_file`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| ExplorerError::Serialization {
                context: "Invalid settings JSON".to_string(),
                source: e,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks aliases, URLs, the default connection, and the cache TTL.
    ///
    /// # Errors
    /// Returns [`ExplorerError::Configuration`] describing the first problem.
    pub fn validate(&self) -> Result<()> {
        for (alias, url) in &self.connections {
            if alias.trim().is_empty() {
                return Err(ExplorerError::configuration(
                    "Connection aliases cannot be empty",
                ));
            }
            if url.trim().is_empty() {
                return Err(ExplorerError::configuration(format!(
                    "Connection '{}' has an empty URL",
                    alias
                )));
            }
        }

        if let Some(default) = &self.default_connection
            && !self.connections.contains_key(default)
        {
            return Err(ExplorerError::configuration(format!(
                "default_connection '{}' is not a configured connection alias",
                default
            )));
        }

        if self.cache_ttl_secs == 0 {
            return Err(ExplorerError::configuration(
                "cache_ttl_secs must be greater than zero",
            ));
        }

        Ok(())
    }

    /// The configured cache lifetime.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Picks `alias` when given, falling back to `default_connection`.
    ///
    /// # Errors
    /// Returns [`ExplorerError::Configuration`] if neither is available.
    pub fn connection_alias<'a>(&'a self, alias: Option<&'a str>) -> Result<&'a str> {
        alias
            .or(self.default_connection.as_deref())
            .ok_or_else(|| {
                ExplorerError::configuration(
                    "No connection alias given and no default_connection configured",
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = ExplorerSettings::default();
        assert!(settings.connections.is_empty());
        assert_eq!(settings.cache_ttl(), Duration::from_secs(300));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_parse_full_settings() {
        let json = r#"{
            "connections": {
                "main": "postgres://app@db.internal/shop",
                "local": "sqlite://./app.db"
            },
            "default_connection": "main",
            "schema": { "exclude_prefixes": ["django_", "auth_"] },
            "cache_ttl_secs": 60
        }"#;

        let settings = ExplorerSettings::from_json_str(json).unwrap();
        assert_eq!(settings.connections.len(), 2);
        assert_eq!(settings.default_connection.as_deref(), Some("main"));
        assert_eq!(
            settings.schema,
            FilterConfig::excluding(["django_", "auth_"])
        );
        assert_eq!(settings.cache_ttl(), Duration::from_secs(60));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = ExplorerSettings::from_json_str("{}").unwrap();
        assert_eq!(settings, ExplorerSettings::default());
    }

    #[test]
    fn test_unknown_default_connection_rejected() {
        let json = r#"{ "connections": { "a": "sqlite::memory:" }, "default_connection": "b" }"#;
        let error = ExplorerSettings::from_json_str(json).unwrap_err();
        assert!(matches!(error, ExplorerError::Configuration { .. }));
    }

    #[test]
    fn test_zero_ttl_and_empty_url_rejected() {
        assert!(ExplorerSettings::from_json_str(r#"{ "cache_ttl_secs": 0 }"#).is_err());
        assert!(ExplorerSettings::from_json_str(r#"{ "connections": { "a": " " } }"#).is_err());
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let error = ExplorerSettings::from_json_str("{ not json").unwrap_err();
        assert!(matches!(error, ExplorerError::Serialization { .. }));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "connections": {{ "scratch": "sqlite::memory:" }} }}"#
        )
        .unwrap();

        let settings = ExplorerSettings::from_file(file.path()).unwrap();
        assert_eq!(
            settings.connections.get("scratch").map(String::as_str),
            Some("sqlite::memory:")
        );
    }

    #[test]
    fn test_from_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let error = ExplorerSettings::from_file(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(error, ExplorerError::Io { .. }));
    }

    #[test]
    fn test_connection_alias_fallback() {
        let settings = ExplorerSettings::from_json_str(
            r#"{ "connections": { "main": "sqlite::memory:" }, "default_connection": "main" }"#,
        )
        .unwrap();

        assert_eq!(settings.connection_alias(Some("other")).unwrap(), "other");
        assert_eq!(settings.connection_alias(None).unwrap(), "main");
        assert!(
            ExplorerSettings::default()
                .connection_alias(None)
                .is_err()
        );
    }
}
