//! The documentation pipeline: fetch, render, write.

use crate::output::{DocumentWriter, INDEX_FILENAME};
use crate::render::{render_index, render_table};
use catalogdoc_core::{CatalogDocError, CatalogSource, Result, Table, TableSummary};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Project name used when none is given
pub const DEFAULT_PROJECT_NAME: &str = "no name";

/// Options for one documentation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Title of the index document
    pub project_name: String,
    /// Directory receiving the documents
    pub output_dir: PathBuf,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl GenerateOptions {
    /// Creates options for the given project and output directory.
    pub fn new(project_name: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_name: project_name.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Validates the options.
    ///
    /// # Errors
    /// Returns a configuration error for an empty project name or output
    /// directory.
    pub fn validate(&self) -> Result<()> {
        if self.project_name.trim().is_empty() {
            return Err(CatalogDocError::configuration(
                "project name cannot be empty",
            ));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(CatalogDocError::configuration(
                "output directory cannot be empty",
            ));
        }
        Ok(())
    }
}

/// What a run produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Title used for the index
    pub project_name: String,
    /// Database that was documented
    pub database_name: String,
    /// Directory the documents were written to
    pub output_dir: PathBuf,
    /// Path of the written index
    pub index_path: PathBuf,
    /// One entry per written table document, in catalog order
    pub tables: Vec<TableSummary>,
}

impl GenerationReport {
    /// Number of table documents written.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Sum of the column counts of all documented tables.
    pub fn total_columns(&self) -> usize {
        self.tables
            .iter()
            .fold(0, |total, t| total.saturating_add(t.column_count))
    }
}

/// Fetches every table from `catalog` and writes one document per table
/// plus the index.
///
/// All tables are checked before anything is written, so invalid metadata
/// leaves the output directory untouched. After that the first failing
/// render or write stops the run.
///
/// # Errors
/// Returns the first error from option validation, the catalog, table
/// validation, rendering or file output.
pub async fn generate_documentation(
    catalog: &dyn CatalogSource,
    options: &GenerateOptions,
) -> Result<GenerationReport> {
    options.validate()?;
    let database_name = catalog.config().database_name.clone();

    info!(
        "Fetching tables of database '{}' from {}",
        database_name,
        catalog.catalog_type()
    );
    let tables = catalog.search_tables().await.map_err(|e| {
        error!("Table search failed: {}", e);
        e
    })?;
    info!("Found {} tables", tables.len());

    check_tables(&tables)?;

    let writer = DocumentWriter::new(&options.output_dir);
    writer.prepare().await?;

    let mut summaries = Vec::with_capacity(tables.len());
    for table in &tables {
        let summary = table.summary();
        let document = render_table(table)?;
        let path = writer.write_table(&summary.link, &document).await?;
        debug!("Documented {} as {}", table.name, path.display());
        summaries.push(summary);
    }

    let index = render_index(&options.project_name, &database_name, &summaries)?;
    let index_path = writer.write_index(&index).await?;
    info!("Index written to {}", index_path.display());

    Ok(GenerationReport {
        project_name: options.project_name.clone(),
        database_name,
        output_dir: options.output_dir.clone(),
        index_path,
        tables: summaries,
    })
}

/// Rejects tables that cannot be written side by side in one directory.
///
/// File names are compared case-insensitively so the result does not depend
/// on the file system.
fn check_tables(tables: &[Table]) -> Result<()> {
    let mut filenames = HashSet::with_capacity(tables.len());

    for table in tables {
        table.validate()?;

        let filename = table.document_filename().to_lowercase();
        if filename == INDEX_FILENAME.to_lowercase() {
            return Err(CatalogDocError::invalid_table(format!(
                "table '{}' would overwrite the index {}",
                table.name, INDEX_FILENAME
            )));
        }
        if !filenames.insert(filename) {
            return Err(CatalogDocError::invalid_table(format!(
                "more than one table maps to the file name {}",
                table.document_filename()
            )));
        }
    }

    Ok(())
}
