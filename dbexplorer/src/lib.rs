//! Command-line front end for dbexplorer.
//!
//! The binary in `main.rs` only parses arguments and sets up logging; the
//! commands live here so they can be driven from tests with an in-memory
//! writer.

pub mod output;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dbexplorer_core::{
    ConnectionRegistry, ConnectionResolver, ExplorerSettings, FilterConfig, MemoryCacheStore,
    SchemaCache, error::redact_database_url,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// CLI argument structure
#[derive(Debug, Parser)]
#[command(name = "dbexplorer")]
#[command(about = "Inspect database schemas through a per-connection cache")]
#[command(version)]
#[command(long_about = "
dbexplorer - schema introspection for configured database connections

Connections are named by alias in a JSON settings file:

  {
    \"connections\": { \"main\": \"postgres://app@localhost/shop\" },
    \"default_connection\": \"main\",
    \"schema\": { \"exclude_prefixes\": [\"django_\", \"auth_\"] }
  }

SUPPORTED DATABASES:
- PostgreSQL (postgres://)
- MySQL (mysql://) [if compiled with --features mysql]
- SQLite (sqlite:// or .db/.sqlite files)

EXAMPLES:
  dbexplorer --config dbexplorer.json schema main
  dbexplorer --config dbexplorer.json schema main --format text --exclude auth_
  dbexplorer --config dbexplorer.json test main
")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the schema of a connection
    Schema(SchemaArgs),
    /// Resolve and validate a connection
    Test(TestArgs),
    /// List configured connection aliases
    List(ListArgs),
}

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Connection alias (defaults to `default_connection`)
    pub alias: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Only introspect tables starting with one of these prefixes
    #[arg(long, value_delimiter = ',', help = "Comma-separated table name prefixes to include")]
    pub include: Vec<String>,

    /// Skip tables starting with one of these prefixes
    #[arg(long, value_delimiter = ',', help = "Comma-separated table name prefixes to exclude")]
    pub exclude: Vec<String>,
}

#[derive(Debug, Args)]
pub struct TestArgs {
    /// Connection alias (defaults to `default_connection`)
    pub alias: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Settings file
    #[arg(
        short,
        long,
        global = true,
        env = "DBEXPLORER_CONFIG",
        value_name = "FILE",
        help = "JSON settings file with connection aliases"
    )]
    pub config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true, help = "Suppress all log output except errors")]
    pub quiet: bool,
}

/// Output rendering for schema and list commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

/// Loads settings from `--config`, or defaults when none is given.
pub fn load_settings(cli: &Cli) -> Result<ExplorerSettings> {
    match &cli.global.config {
        Some(path) => ExplorerSettings::from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(ExplorerSettings::default()),
    }
}

/// Combines the settings filter with command-line overrides.
///
/// `--include` replaces the configured include list, `--exclude` the
/// configured exclude list.
pub fn effective_filter(settings: &ExplorerSettings, args: &SchemaArgs) -> FilterConfig {
    let mut filter = settings.schema.clone();
    if !args.include.is_empty() {
        filter.include_prefixes = Some(args.include.clone());
    }
    if !args.exclude.is_empty() {
        filter.exclude_prefixes = Some(args.exclude.clone());
    }
    filter
}

/// Runs the parsed command, writing results to `out`.
pub async fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let settings = load_settings(cli)?;

    match &cli.command {
        Command::Schema(args) => print_schema(&settings, args, out).await,
        Command::Test(args) => test_connection(&settings, args.alias.as_deref(), out).await,
        Command::List(args) => output::write_connections(&settings, args.format, out),
    }
}

async fn print_schema(
    settings: &ExplorerSettings,
    args: &SchemaArgs,
    out: &mut dyn Write,
) -> Result<()> {
    let alias = settings.connection_alias(args.alias.as_deref())?;
    let filter = effective_filter(settings, args);

    let cache = SchemaCache::new(
        Arc::new(ConnectionRegistry::from_settings(settings)),
        Arc::new(MemoryCacheStore::with_ttl(settings.cache_ttl())),
        Arc::new(filter),
    );

    let schema = cache
        .get_schema(alias)
        .await
        .with_context(|| format!("Failed to load schema for '{}'", alias))?;

    info!(
        "Schema for '{}': {} tables, {} columns",
        alias,
        schema.len(),
        schema.column_count()
    );

    output::write_schema(&schema, args.format, out)
}

async fn test_connection(
    settings: &ExplorerSettings,
    alias: Option<&str>,
    out: &mut dyn Write,
) -> Result<()> {
    let alias = settings.connection_alias(alias)?;
    let registry = ConnectionRegistry::from_settings(settings);

    if let Some(url) = registry.url(alias) {
        info!("Testing '{}' at {}", alias, redact_database_url(url));
    }

    let adapter = registry
        .resolve(alias)
        .await
        .with_context(|| format!("Connection test failed for '{}'", alias))?;

    writeln!(
        out,
        "Connection '{}' to {} database successful",
        alias,
        adapter.database_type()
    )?;
    Ok(())
}
