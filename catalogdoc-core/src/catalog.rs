//! Catalog source traits and factory.
//!
//! A catalog source answers one question: which tables belong to the
//! configured database. Sources that page their results implement
//! [`TablePageSource`] and hand the paging loop to [`collect_pages`].

mod config;
#[cfg(feature = "glue")]
pub mod glue;
mod pagination;

pub use config::{CatalogConfig, DEFAULT_DATABASE_NAME, MAX_PAGE_SIZE};
pub use pagination::{TablePage, TablePageSource, collect_pages};

use crate::{Result, models::Table};
use async_trait::async_trait;

/// Source of table metadata for one database.
///
/// This trait is object-safe, so the pipeline can take a
/// `&dyn CatalogSource` and tests can substitute an in-memory catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Returns every table of the configured database in catalog order.
    ///
    /// # Errors
    /// Returns an error if any page request fails; no partial result is
    /// returned.
    async fn search_tables(&self) -> Result<Vec<Table>>;

    /// Short name of the catalog backend, used in log messages.
    fn catalog_type(&self) -> &'static str;

    /// The configuration this source was built from.
    fn config(&self) -> &CatalogConfig;
}

/// Creates the catalog source for the given configuration.
///
/// # Errors
/// Returns a configuration error if the configuration is invalid, if AWS
/// settings cannot be resolved, or if no catalog backend is compiled in.
///
/// # Example
/// ```rust,no_run
/// use catalogdoc_core::catalog::{CatalogConfig, create_catalog};
///
/// # async fn example() -> catalogdoc_core::Result<()> {
/// let catalog = create_catalog(CatalogConfig::new("sales")).await?;
/// let tables = catalog.search_tables().await?;
/// println!("Found {} tables", tables.len());
/// # Ok(())
/// # }
/// ```
pub async fn create_catalog(config: CatalogConfig) -> Result<Box<dyn CatalogSource>> {
    config.validate()?;

    #[cfg(feature = "glue")]
    {
        let catalog = glue::GlueCatalog::new(config).await?;
        Ok(Box::new(catalog))
    }
    #[cfg(not(feature = "glue"))]
    {
        let _ = config;
        Err(crate::error::CatalogDocError::configuration(
            "No catalog backend compiled in. Compile with --features glue",
        ))
    }
}
