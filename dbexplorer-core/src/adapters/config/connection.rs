//! Pool settings derived from a connection URL.

use crate::Result;
use crate::error::ExplorerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Upper bound on pool size accepted from URLs and by [`ConnectionConfig::validate`].
pub const MAX_POOL_SIZE: u32 = 100;

/// Upper bound on `connect_timeout` accepted from URL query parameters.
pub const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(300);

/// Where an adapter connects and how its pool is sized.
///
/// Passwords are never stored here, so the value is safe to log.
///
/// ```rust
/// use dbexplorer_core::adapters::ConnectionConfig;
///
/// let config = ConnectionConfig::new("db.internal")
///     .with_port(5432)
///     .with_database("shop");
///
/// assert_eq!(config.to_string(), "db.internal:5432/shop");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: Option<u16>,
    pub database: Option<String>,
    pub username: Option<String>,
    /// How long a pool acquire may wait
    pub connect_timeout: Duration,
    pub max_connections: u32,
    /// Sessions are opened read-only where the engine supports it
    pub read_only: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::new("localhost")
    }
}

impl fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        if let Some(database) = &self.database {
            write!(f, "/{database}")?;
        }
        Ok(())
    }
}

impl ConnectionConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: None,
            database: None,
            username: None,
            connect_timeout: Duration::from_secs(30),
            max_connections: 5,
            read_only: true,
        }
    }

    /// Reads host, port, database and user from a networked URL, which must
    /// use one of `schemes` and name a host. `engine` labels error
    /// messages, which never echo the URL itself.
    ///
    /// `connect_timeout` (seconds) and `pool_max_conns` query parameters
    /// override the pool defaults when in range; anything else is left
    /// for the driver to interpret.
    ///
    /// # Errors
    /// Returns [`ExplorerError::Configuration`] if the URL does not parse,
    /// does not match, or the resulting config fails
    /// [`validate`](Self::validate).
    pub fn from_server_url(
        connection_string: &str,
        engine: &str,
        schemes: &[&str],
        default_port: u16,
    ) -> Result<Self> {
        let url = Url::parse(connection_string).map_err(|e| {
            ExplorerError::configuration(format!(
                "Invalid {} connection string format: {}",
                engine, e
            ))
        })?;

        if !schemes.contains(&url.scheme()) {
            let expected: Vec<String> = schemes.iter().map(|s| format!("{s}://")).collect();
            return Err(ExplorerError::configuration(format!(
                "{} connection string must use {} scheme",
                engine,
                expected.join(" or ")
            )));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(ExplorerError::configuration(format!(
                "{} connection string must specify a host",
                engine
            )));
        }

        Self::from_parsed(&url, default_port)
    }

    fn from_parsed(url: &Url, default_port: u16) -> Result<Self> {
        let mut config = Self::new(url.host_str().unwrap_or("localhost"))
            .with_port(url.port().unwrap_or(default_port));
        config.database = Some(url.path().trim_start_matches('/'))
            .filter(|db| !db.is_empty())
            .map(str::to_string);
        config.username = Some(url.username())
            .filter(|user| !user.is_empty())
            .map(str::to_string);

        for (key, value) in url.query_pairs() {
            config.apply_query_param(&key, &value);
        }

        config.validate()?;
        Ok(config)
    }

    fn apply_query_param(&mut self, key: &str, value: &str) {
        match key {
            "connect_timeout" => {
                if let Ok(secs) = value.parse::<u64>() {
                    let timeout = Duration::from_secs(secs);
                    if !timeout.is_zero() && timeout <= MAX_CONNECT_TIMEOUT {
                        self.connect_timeout = timeout;
                    }
                }
            }
            "pool_max_conns" => {
                if let Ok(size) = value.parse::<u32>()
                    && (1..=MAX_POOL_SIZE).contains(&size)
                {
                    self.max_connections = size;
                }
            }
            _ => {}
        }
    }

    /// # Errors
    /// Returns [`ExplorerError::Configuration`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        let problem = if self.host.is_empty() {
            Some("host cannot be empty")
        } else if self.port == Some(0) {
            Some("port must be greater than 0")
        } else if !(1..=MAX_POOL_SIZE).contains(&self.max_connections) {
            Some("max_connections must be between 1 and 100")
        } else if self.connect_timeout.is_zero() {
            Some("connect_timeout must be greater than 0")
        } else {
            None
        };

        match problem {
            Some(message) => Err(ExplorerError::configuration(message)),
            None => Ok(()),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }
}
