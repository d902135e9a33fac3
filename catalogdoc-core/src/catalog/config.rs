//! Catalog query configuration.

use serde::{Deserialize, Serialize};

/// Database queried when none is given
pub const DEFAULT_DATABASE_NAME: &str = "default";

/// Largest page size the search API accepts
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Configuration for catalog table searches.
///
/// Region and profile override the AWS SDK's own resolution chain; when they
/// are unset the environment and shared config files decide.
///
/// # Example
/// ```rust
/// use catalogdoc_core::catalog::CatalogConfig;
///
/// let config = CatalogConfig::new("sales")
///     .with_region("eu-west-1")
///     .with_page_size(100);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Database whose tables are listed
    pub database_name: String,
    /// Catalog owner account; the caller's account when unset
    pub catalog_id: Option<String>,
    /// AWS region override
    pub region: Option<String>,
    /// Shared-config profile override
    pub profile: Option<String>,
    /// Maximum tables per page; service default when unset
    pub page_size: Option<u32>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            catalog_id: None,
            region: None,
            profile: None,
            page_size: None,
        }
    }
}

impl std::fmt::Display for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            self.catalog_id
                .as_ref()
                .map_or_else(String::new, |id| format!("{}:", id)),
            self.database_name
        )?;
        if let Some(region) = &self.region {
            write!(f, " ({})", region)?;
        }
        Ok(())
    }
}

impl CatalogConfig {
    /// Creates a configuration for the given database.
    pub fn new(database_name: impl Into<String>) -> Self {
        Self {
            database_name: database_name.into(),
            ..Default::default()
        }
    }

    /// Validates configuration values before any request is made.
    ///
    /// # Errors
    /// Returns a configuration error if a value is empty or out of range.
    pub fn validate(&self) -> crate::Result<()> {
        if self.database_name.trim().is_empty() {
            return Err(crate::error::CatalogDocError::configuration(
                "database name cannot be empty",
            ));
        }

        if let Some(page_size) = self.page_size
            && !(1..=MAX_PAGE_SIZE).contains(&page_size)
        {
            return Err(crate::error::CatalogDocError::configuration(format!(
                "page size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, page_size
            )));
        }

        for (label, value) in [
            ("catalog id", &self.catalog_id),
            ("region", &self.region),
            ("profile", &self.profile),
        ] {
            if value.as_ref().is_some_and(|v| v.trim().is_empty()) {
                return Err(crate::error::CatalogDocError::configuration(format!(
                    "{} cannot be empty when given",
                    label
                )));
            }
        }

        Ok(())
    }

    /// Builder method to set the catalog id.
    #[must_use]
    pub fn with_catalog_id(mut self, catalog_id: impl Into<String>) -> Self {
        self.catalog_id = Some(catalog_id.into());
        self
    }

    /// Builder method to set the region.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Builder method to set the profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Builder method to set the page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }
}
