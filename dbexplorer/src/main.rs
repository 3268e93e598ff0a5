//! dbexplorer command-line entry point.

use anyhow::Result;
use clap::Parser;
use dbexplorer::{Cli, run};
use dbexplorer_core::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out).await
}
