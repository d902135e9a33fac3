//! File output for generated documents.
//!
//! Writes table documents and the index into the output directory.

use catalogdoc_core::{CatalogDocError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the table-of-contents index
pub const INDEX_FILENAME: &str = "README.md";

/// Writes generated documents into one directory.
#[derive(Debug, Clone)]
pub struct DocumentWriter {
    output_dir: PathBuf,
}

impl DocumentWriter {
    /// Creates a writer for `output_dir`. Nothing is touched until
    /// [`prepare`](Self::prepare) or a write is called.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// The directory documents are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Creates the output directory and any missing parents.
    ///
    /// # Errors
    /// Returns an I/O error if the directory cannot be created, or if the
    /// path exists and is not a directory.
    pub async fn prepare(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| {
                CatalogDocError::io(
                    format!(
                        "Failed to create output directory {}",
                        self.output_dir.display()
                    ),
                    e,
                )
            })
    }

    /// Writes a table document under `filename` and returns its path.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be written.
    pub async fn write_table(&self, filename: &str, contents: &str) -> Result<PathBuf> {
        self.write(filename, contents).await
    }

    /// Writes the index and returns its path.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be written.
    pub async fn write_index(&self, contents: &str) -> Result<PathBuf> {
        self.write(INDEX_FILENAME, contents).await
    }

    async fn write(&self, filename: &str, contents: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(filename);
        tokio::fs::write(&path, contents)
            .await
            .map_err(|e| CatalogDocError::io(format!("Failed to write to {}", path.display()), e))?;
        debug!("Wrote {} ({} bytes)", path.display(), contents.len());
        Ok(path)
    }
}
