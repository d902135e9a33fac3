//! AWS Glue Data Catalog source.
//!
//! Tables are found with the Glue `SearchTables` API filtered on the
//! database name. Credentials come from the standard AWS provider chain;
//! only the region and profile can be overridden here.

use super::{CatalogConfig, CatalogSource, TablePage, TablePageSource, collect_pages};
use crate::{
    Result,
    error::CatalogDocError,
    models::{Column, Table},
};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_glue::{
    Client,
    error::DisplayErrorContext,
    types::{Comparator, PropertyPredicate},
};
use tracing::{debug, error, info, warn};

/// Search property that holds a table's database
const DATABASE_NAME_KEY: &str = "databaseName";

/// Glue-backed catalog source
pub struct GlueCatalog {
    client: Client,
    config: CatalogConfig,
}

impl GlueCatalog {
    /// Loads AWS configuration and creates a Glue client.
    ///
    /// # Errors
    /// Returns a configuration error if `config` is invalid or no AWS region
    /// can be resolved.
    pub async fn new(config: CatalogConfig) -> Result<Self> {
        config.validate()?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }
        let sdk_config = loader.load().await;

        match sdk_config.region() {
            Some(region) => debug!("Using AWS region {}", region),
            None => {
                return Err(CatalogDocError::configuration(
                    "No AWS region configured. Set AWS_REGION or pass --region",
                ));
            }
        }

        Ok(Self::from_client(Client::new(&sdk_config), config))
    }

    /// Wraps an already configured client.
    pub const fn from_client(client: Client, config: CatalogConfig) -> Self {
        Self { client, config }
    }

    fn database_predicate(&self) -> PropertyPredicate {
        PropertyPredicate::builder()
            .key(DATABASE_NAME_KEY)
            .value(&self.config.database_name)
            .comparator(Comparator::Equals)
            .build()
    }
}

#[async_trait]
impl TablePageSource for GlueCatalog {
    async fn fetch_page(&self, next_token: Option<String>) -> Result<TablePage> {
        let max_results = self
            .config
            .page_size
            .and_then(|size| i32::try_from(size).ok());

        let output = self
            .client
            .search_tables()
            .set_catalog_id(self.config.catalog_id.clone())
            .filters(self.database_predicate())
            .set_next_token(next_token)
            .set_max_results(max_results)
            .send()
            .await
            .map_err(|e| {
                error!("SearchTables failed: {}", DisplayErrorContext(&e));
                CatalogDocError::catalog_failed(
                    format!(
                        "SearchTables for database '{}'",
                        self.config.database_name
                    ),
                    e,
                )
            })?;

        let tables = output
            .table_list()
            .iter()
            .map(|table| convert_table(table, &self.config.database_name))
            .collect();
        let tables = retain_database(tables, &self.config.database_name);

        Ok(TablePage {
            tables,
            next_token: output.next_token().map(str::to_string),
        })
    }
}

#[async_trait]
impl CatalogSource for GlueCatalog {
    async fn search_tables(&self) -> Result<Vec<Table>> {
        info!("Searching Glue catalog {}", self.config);
        let tables = collect_pages(self).await?;

        if tables.is_empty() {
            warn!(
                "No tables found in database '{}'",
                self.config.database_name
            );
        }

        Ok(tables)
    }

    fn catalog_type(&self) -> &'static str {
        "AWS Glue"
    }

    fn config(&self) -> &CatalogConfig {
        &self.config
    }
}

/// Converts a Glue table into the catalog-independent model.
///
/// Tables without a database name inherit `fallback_database`; tables
/// without a storage descriptor have no columns.
pub(crate) fn convert_table(table: &aws_sdk_glue::types::Table, fallback_database: &str) -> Table {
    let columns = table
        .storage_descriptor()
        .map(|sd| sd.columns().iter().map(convert_column).collect())
        .unwrap_or_default();

    Table {
        name: table.name().to_string(),
        database_name: table
            .database_name()
            .unwrap_or(fallback_database)
            .to_string(),
        partition_keys: table.partition_keys().iter().map(convert_column).collect(),
        columns,
        description: non_empty(table.description()),
        table_type: non_empty(table.table_type()),
        location: non_empty(table.storage_descriptor().and_then(|sd| sd.location())),
        owner: non_empty(table.owner()),
    }
}

/// Keeps only tables of `database`.
///
/// `SearchTables` matches the database name on tokens, so a search for
/// `sales` also returns tables of `sales-eu`. Glue stores database names in
/// lower case, so the comparison ignores ASCII case.
pub(crate) fn retain_database(tables: Vec<Table>, database: &str) -> Vec<Table> {
    tables
        .into_iter()
        .filter(|table| {
            let keep = table.database_name.eq_ignore_ascii_case(database);
            if !keep {
                debug!(
                    "Skipping table '{}' of database '{}'",
                    table.name, table.database_name
                );
            }
            keep
        })
        .collect()
}

fn convert_column(column: &aws_sdk_glue::types::Column) -> Column {
    Column {
        name: column.name().to_string(),
        data_type: column.r#type().unwrap_or_default().to_string(),
        comment: non_empty(column.comment()),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
