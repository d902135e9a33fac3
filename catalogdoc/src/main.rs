//! Catalog documentation tool.
//!
//! Searches the data catalog for the tables of one database and writes a
//! Markdown document per table plus a `README.md` index. Any error stops
//! the run with a logged message and a non-zero exit status; Ctrl-C stops it
//! with status 130.

use catalogdoc::{Cli, describe_error, print_report, run, run_until_interrupted};
use catalogdoc_core::init_logging;
use clap::Parser;
use tracing::{error, warn};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.global.verbose, cli.global.quiet, cli.global.log_json) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }

    let outcome = run_until_interrupted(run(&cli), interrupted()).await;

    if let Err(e) = outcome.and_then(|report| print_report(&report, cli.json)) {
        error!("{}", describe_error(&e));
        std::process::exit(e.exit_code());
    }
}

/// Resolves on Ctrl-C. If the handler cannot be installed the run is simply
/// not interruptible.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
