//! Log setup shared by the dbexplorer binary and embedding services.
//!
//! `RUST_LOG`, when set, takes precedence over the verbosity flags so a
//! single module (say `dbexplorer_core::cache`) can be traced on its own.

use crate::Result;
use crate::error::ExplorerError;
use tracing_subscriber::EnvFilter;

/// Maps `-v` count and `-q` to a level. Quiet wins.
pub fn level_for(verbose: u8, quiet: bool) -> tracing::Level {
    if quiet {
        return tracing::Level::ERROR;
    }
    match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

/// Builds the event filter: `RUST_LOG` if present and valid, otherwise
/// the level from [`level_for`] applied to dbexplorer crates only.
pub fn filter_for(verbose: u8, quiet: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level_for(verbose, quiet).as_str().to_lowercase();
        // Driver crates stay at warn; sqlx logs every statement at info
        EnvFilter::new(format!("warn,dbexplorer={level},dbexplorer_core={level}"))
    })
}

/// Installs the global stderr subscriber.
///
/// # Errors
/// Returns [`ExplorerError::Configuration`] if a global subscriber is
/// already installed.
///
/// # Example
/// ```rust,no_run
/// use dbexplorer_core::logging::init_logging;
///
/// init_logging(1, false).expect("Failed to initialize logging");
/// ```
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbose, quiet))
        .with_target(verbose > 1)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| ExplorerError::configuration(format!("Failed to initialize logging: {}", e)))
}
