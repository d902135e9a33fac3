//! Markdown documentation generator for data catalog tables.
//!
//! The binary in `main.rs` parses the command line and calls [`run`]; the
//! pipeline itself lives in [`generate`] so it can be driven with any
//! [`CatalogSource`](catalogdoc_core::CatalogSource), including in-memory
//! catalogs in tests.

pub mod cli;
pub mod generate;
pub mod output;
pub mod render;

pub use cli::Cli;
pub use generate::{GenerateOptions, GenerationReport, generate_documentation};
pub use output::{DocumentWriter, INDEX_FILENAME};

use catalogdoc_core::{CatalogDocError, Result, catalog::create_catalog};
use tracing::{info, warn};

/// Runs one documentation pass as configured by `cli`.
///
/// Options are validated before the catalog client is created, so bad
/// arguments fail without touching the network.
///
/// # Errors
/// Returns the first configuration, catalog, render or output error.
pub async fn run(cli: &Cli) -> Result<GenerationReport> {
    let config = cli.catalog_config();
    let options = cli.generate_options();
    config.validate()?;
    options.validate()?;

    info!("Output: {}", options.output_dir.display());
    let catalog = create_catalog(config).await?;
    generate_documentation(catalog.as_ref(), &options).await
}

/// Drives `task` until it completes or `interrupt` resolves.
///
/// An interrupted task is dropped at its next await point, so no further
/// documents are started. A file write already handed to the blocking pool
/// still runs to completion.
///
/// # Errors
/// Returns the task's error, or [`CatalogDocError::Cancelled`] when
/// interrupted.
pub async fn run_until_interrupted<T>(
    task: impl Future<Output = Result<T>>,
    interrupt: impl Future<Output = ()>,
) -> Result<T> {
    tokio::select! {
        result = task => result,
        () = interrupt => {
            warn!("Interrupted, stopping");
            Err(CatalogDocError::Cancelled)
        }
    }
}

/// Prints the outcome of a run on stdout.
///
/// # Errors
/// Returns a serialization error if the JSON report cannot be produced.
pub fn print_report(report: &GenerationReport, json: bool) -> Result<()> {
    if json {
        let rendered =
            serde_json::to_string_pretty(report).map_err(|e| CatalogDocError::Serialization {
                context: "generation report".to_string(),
                source: e,
            })?;
        println!("{}", rendered);
    } else {
        println!("Documentation generated successfully");
        println!("Output: {}", report.output_dir.display());
        println!("Index: {}", report.index_path.display());
        println!("Tables: {}", report.table_count());
        println!("Columns: {}", report.total_columns());
    }
    Ok(())
}

/// Formats an error with its chain of sources, outermost first.
pub fn describe_error(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
