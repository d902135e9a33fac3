//! Core data structures and catalog access for catalogdoc.
//!
//! This crate provides the types shared by the documentation generator: the
//! table and column models, the error type, logging setup, and the catalog
//! abstraction that fetches table metadata page by page.
//!
//! # Architecture
//! - [`catalog::CatalogSource`] hides the metadata service behind an
//!   object-safe trait
//! - [`catalog::collect_pages`] drives token-based pagination for any
//!   [`catalog::TablePageSource`]
//! - [`catalog::glue::GlueCatalog`] is the AWS Glue implementation

pub mod catalog;
pub mod error;
pub mod logging;
pub mod models;

// Re-export commonly used types
pub use catalog::{CatalogConfig, CatalogSource, TablePage, TablePageSource, collect_pages};
pub use error::{CatalogDocError, Result};
pub use logging::init_logging;
pub use models::{Column, Table, TableSummary};
