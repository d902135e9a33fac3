//! Command-line interface definition.

use crate::generate::{DEFAULT_PROJECT_NAME, GenerateOptions};
use catalogdoc_core::catalog::{CatalogConfig, DEFAULT_DATABASE_NAME};
use clap::{Args, Parser};
use std::path::PathBuf;

/// Command-line arguments for catalogdoc
#[derive(Parser, Debug)]
#[command(name = "catalogdoc")]
#[command(about = "Generate Markdown documentation for data catalog tables")]
#[command(version)]
#[command(long_about = "
catalogdoc - Markdown documentation for AWS Glue Data Catalog tables

Searches the catalog for every table of one database and writes:
- <table>.md with the table's properties, partition keys and columns
- README.md listing every table with a link and its column count

AWS credentials and region are resolved by the standard AWS provider chain
(environment, shared config/credentials files, instance metadata). Use
--region and --profile to override them.

EXAMPLES:
  catalogdoc --database-name sales --output-dir docs
  catalogdoc --project-name \"Sales Lake\" --database-name sales --region eu-west-1
")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Project name used as the index title
    #[arg(
        long,
        alias = "projectName",
        env = "CATALOGDOC_PROJECT_NAME",
        default_value = DEFAULT_PROJECT_NAME,
        help = "Project name used as the title of README.md"
    )]
    pub project_name: String,

    /// Output directory
    #[arg(
        long,
        alias = "outputDir",
        env = "CATALOGDOC_OUTPUT_DIR",
        default_value = ".",
        help = "Directory for the generated documents (created if missing)"
    )]
    pub output_dir: PathBuf,

    /// Database to document
    #[arg(
        long,
        alias = "databaseName",
        env = "CATALOGDOC_DATABASE_NAME",
        default_value = DEFAULT_DATABASE_NAME,
        help = "Catalog database whose tables are documented"
    )]
    pub database_name: String,

    /// Catalog owner account
    #[arg(
        long,
        env = "CATALOGDOC_CATALOG_ID",
        help = "Catalog id (AWS account) to search; defaults to the caller's account"
    )]
    pub catalog_id: Option<String>,

    /// AWS region override
    #[arg(long, help = "AWS region; overrides AWS_REGION and shared config")]
    pub region: Option<String>,

    /// AWS profile override
    #[arg(long, help = "Named profile from the shared AWS config files")]
    pub profile: Option<String>,

    /// Page size for catalog searches
    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(1..=1000),
        help = "Maximum tables requested per page (1-1000)"
    )]
    pub page_size: Option<u32>,

    /// Print the run report as JSON
    #[arg(long, help = "Print the generation report as JSON on stdout")]
    pub json: bool,
}

/// Flags shared by every invocation
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, help = "Suppress all log output except errors")]
    pub quiet: bool,

    /// Structured log output
    #[arg(long, help = "Write log events as JSON lines")]
    pub log_json: bool,
}

impl Cli {
    /// Catalog settings selected on the command line.
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            database_name: self.database_name.clone(),
            catalog_id: self.catalog_id.clone(),
            region: self.region.clone(),
            profile: self.profile.clone(),
            page_size: self.page_size,
        }
    }

    /// Output settings selected on the command line.
    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions::new(self.project_name.clone(), self.output_dir.clone())
    }
}
