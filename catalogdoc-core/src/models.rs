//! Data models for catalog table metadata.
//!
//! These types are the catalog-independent view of a table that the
//! renderer works from. Catalog adapters convert their wire types into
//! [`Table`] and [`Column`]; the generator derives a [`TableSummary`] per
//! written document to build the index.

use serde::{Deserialize, Serialize};

/// File extension used for generated table documents
pub const DOCUMENT_EXTENSION: &str = "md";

/// Type prefixes the catalog uses for nested (complex) column types
const COMPLEX_TYPE_PREFIXES: [&str; 4] = ["struct<", "array<", "map<", "uniontype<"];

/// Catalog column information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Catalog type string, e.g. `bigint` or `array<string>`
    pub data_type: String,
    /// Free-text comment from the catalog
    pub comment: Option<String>,
}

impl Column {
    /// Creates a column without a comment.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            comment: None,
        }
    }

    /// Builder method to set the comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Whether the column type is a nested struct, array, map or union.
    pub fn is_complex(&self) -> bool {
        let data_type = self.data_type.trim_start().to_ascii_lowercase();
        COMPLEX_TYPE_PREFIXES
            .iter()
            .any(|prefix| data_type.starts_with(prefix))
    }
}

/// Catalog table information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table name; also the document file stem
    pub name: String,
    /// Database the table belongs to
    pub database_name: String,
    /// Partition key columns
    pub partition_keys: Vec<Column>,
    /// Storage descriptor columns
    pub columns: Vec<Column>,
    /// Table description
    pub description: Option<String>,
    /// Catalog table type, e.g. `EXTERNAL_TABLE`
    pub table_type: Option<String>,
    /// Storage location of the data
    pub location: Option<String>,
    /// Table owner
    pub owner: Option<String>,
}

impl Table {
    /// Creates an empty table in the given database.
    pub fn new(name: impl Into<String>, database_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            database_name: database_name.into(),
            partition_keys: Vec::new(),
            columns: Vec::new(),
            description: None,
            table_type: None,
            location: None,
            owner: None,
        }
    }

    /// Builder method to set the storage columns.
    #[must_use]
    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    /// Builder method to set the partition keys.
    #[must_use]
    pub fn with_partition_keys(mut self, partition_keys: Vec<Column>) -> Self {
        self.partition_keys = partition_keys;
        self
    }

    /// Builder method to set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Checks that the table can be written out as a document.
    ///
    /// The name becomes a file stem, so it must be non-empty and must not
    /// contain path separators or be a relative path component.
    ///
    /// # Errors
    /// Returns [`CatalogDocError::InvalidTable`](crate::CatalogDocError::InvalidTable)
    /// describing the first problem found.
    pub fn validate(&self) -> crate::Result<()> {
        if self.name.trim().is_empty() {
            return Err(crate::error::CatalogDocError::invalid_table(format!(
                "table in database '{}' has an empty name",
                self.database_name
            )));
        }

        if self.name == "." || self.name == ".." {
            return Err(crate::error::CatalogDocError::invalid_table(format!(
                "table name '{}' is not a valid file name",
                self.name
            )));
        }

        if self.name.contains(['/', '\\', '\0']) {
            return Err(crate::error::CatalogDocError::invalid_table(format!(
                "table name '{}' contains a path separator",
                self.name.escape_default()
            )));
        }

        if let Some(column) = self
            .partition_keys
            .iter()
            .chain(&self.columns)
            .find(|c| c.name.trim().is_empty())
        {
            return Err(crate::error::CatalogDocError::invalid_table(format!(
                "table '{}' has a column with an empty name (type '{}')",
                self.name, column.data_type
            )));
        }

        Ok(())
    }

    /// Name of the Markdown document generated for this table.
    pub fn document_filename(&self) -> String {
        format!("{}.{}", self.name, DOCUMENT_EXTENSION)
    }

    /// Number of storage columns; partition keys are not counted.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Index entry for this table.
    pub fn summary(&self) -> TableSummary {
        TableSummary {
            name: self.name.clone(),
            link: self.document_filename(),
            column_count: self.column_count(),
        }
    }
}

/// Index entry for one generated table document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
    /// Table name
    pub name: String,
    /// Generated file name, relative to the index
    pub link: String,
    /// Number of storage columns
    pub column_count: usize,
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
