//! Integration tests for the documentation pipeline.
//!
//! These tests drive `generate_documentation` with an in-memory catalog and
//! check the files it leaves in a temporary directory.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::arithmetic_side_effects)]

use async_trait::async_trait;
use catalogdoc::{GenerateOptions, INDEX_FILENAME, generate_documentation, run_until_interrupted};
use catalogdoc_core::{
    CatalogConfig, CatalogDocError, CatalogSource, Column, Result, Table, TablePage,
    TablePageSource, collect_pages,
};
use std::path::Path;
use std::sync::Mutex;
use tokio::sync::Notify;

/// Serves a fixed list of tables in pages of `page_size`.
struct InMemoryCatalog {
    config: CatalogConfig,
    tables: Vec<Table>,
    page_size: usize,
    pages_served: Mutex<usize>,
    /// Page request that never answers
    stall_at_page: Option<usize>,
    stalled: Notify,
}

impl InMemoryCatalog {
    fn new(database_name: &str, tables: Vec<Table>) -> Self {
        Self {
            config: CatalogConfig::new(database_name),
            tables,
            page_size: 2,
            pages_served: Mutex::new(0),
            stall_at_page: None,
            stalled: Notify::new(),
        }
    }

    fn stalling_at_page(mut self, page: usize) -> Self {
        self.stall_at_page = Some(page);
        self
    }

    fn pages_served(&self) -> usize {
        *self.pages_served.lock().unwrap()
    }
}

#[async_trait]
impl TablePageSource for InMemoryCatalog {
    async fn fetch_page(&self, next_token: Option<String>) -> Result<TablePage> {
        let page = {
            let mut served = self.pages_served.lock().unwrap();
            *served += 1;
            *served
        };
        if self.stall_at_page == Some(page) {
            self.stalled.notify_one();
            std::future::pending::<()>().await;
        }

        let start: usize = next_token.map_or(0, |t| t.parse().unwrap());
        let end = (start + self.page_size).min(self.tables.len());
        let next_token = (end < self.tables.len()).then(|| end.to_string());

        Ok(TablePage {
            tables: self.tables[start..end].to_vec(),
            next_token,
        })
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn search_tables(&self) -> Result<Vec<Table>> {
        collect_pages(self).await
    }

    fn catalog_type(&self) -> &'static str {
        "in-memory"
    }

    fn config(&self) -> &CatalogConfig {
        &self.config
    }
}

/// A catalog whose search always fails.
struct UnreachableCatalog {
    config: CatalogConfig,
}

#[async_trait]
impl CatalogSource for UnreachableCatalog {
    async fn search_tables(&self) -> Result<Vec<Table>> {
        Err(CatalogDocError::catalog_failed(
            "SearchTables for database 'sales'",
            std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out"),
        ))
    }

    fn catalog_type(&self) -> &'static str {
        "unreachable"
    }

    fn config(&self) -> &CatalogConfig {
        &self.config
    }
}

fn sales_tables() -> Vec<Table> {
    vec![
        Table::new("orders", "sales")
            .with_description("Customer orders")
            .with_partition_keys(vec![Column::new("dt", "string")])
            .with_columns(vec![
                Column::new("order_id", "bigint"),
                Column::new("customer_id", "bigint"),
                Column::new("amount", "decimal(10,2)").with_comment("gross | net"),
                Column::new("items", "array<struct<sku:string,qty:int>>"),
            ]),
        Table::new("customers", "sales").with_columns(vec![
            Column::new("customer_id", "bigint"),
            Column::new("email", "string"),
        ]),
        Table::new("refunds", "sales")
            .with_partition_keys(vec![Column::new("year", "int"), Column::new("month", "int")]),
        Table::new("shipments", "sales").with_columns(vec![Column::new("shipment_id", "string")]),
        Table::new("returns_v2", "sales").with_columns(vec![
            Column::new("return_id", "string"),
            Column::new("reason", "string"),
            Column::new("meta", "map<string,string>"),
        ]),
    ]
}

fn markdown_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".md"))
        .collect();
    names.sort();
    names
}

/// Parses `| [name](link) | count |` rows out of the index.
fn index_rows(index: &str) -> Vec<(String, String, usize)> {
    index
        .lines()
        .filter_map(|line| {
            let rest = line.strip_prefix("| [")?;
            let (name, rest) = rest.split_once("](")?;
            let (link, rest) = rest.split_once(") | ")?;
            let count = rest.strip_suffix(" |")?.parse().ok()?;
            Some((name.to_string(), link.to_string(), count))
        })
        .collect()
}

/// Reads the `| Columns | n |` property and counts rows of the columns table.
fn document_column_counts(document: &str) -> (usize, usize) {
    let declared = document
        .lines()
        .find_map(|line| line.strip_prefix("| Columns | ")?.strip_suffix(" |")?.parse().ok())
        .expect("columns property");

    let rows = document
        .lines()
        .skip_while(|line| *line != "## Columns")
        .skip(2)
        .take_while(|line| line.starts_with('|'))
        .count()
        .saturating_sub(2);

    (declared, rows)
}

#[tokio::test]
async fn test_generate_writes_one_file_per_table_plus_index() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = InMemoryCatalog::new("sales", sales_tables());
    let options = GenerateOptions::new("Sales Lake", dir.path());

    let report = generate_documentation(&catalog, &options).await.unwrap();

    assert_eq!(report.table_count(), 5);
    assert_eq!(catalog.pages_served(), 3);
    assert_eq!(report.index_path, dir.path().join(INDEX_FILENAME));
    assert_eq!(
        markdown_files(dir.path()),
        [
            "README.md",
            "customers.md",
            "orders.md",
            "refunds.md",
            "returns_v2.md",
            "shipments.md",
        ]
    );
}

#[tokio::test]
async fn test_generate_index_lists_every_file_in_catalog_order() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = InMemoryCatalog::new("sales", sales_tables());

    generate_documentation(&catalog, &GenerateOptions::new("Sales Lake", dir.path()))
        .await
        .unwrap();

    let index = std::fs::read_to_string(dir.path().join(INDEX_FILENAME)).unwrap();
    assert!(index.starts_with("# Sales Lake\n"));
    assert!(index.contains("`sales`"));

    let rows = index_rows(&index);
    let names: Vec<&str> = rows.iter().map(|(name, _, _)| name.as_str()).collect();
    assert_eq!(
        names,
        ["orders", "customers", "refunds", "shipments", "returns_v2"]
    );

    for (name, link, _) in &rows {
        assert_eq!(link, &format!("{}.md", name));
        assert!(dir.path().join(link).is_file(), "{} missing", link);
    }
}

#[tokio::test]
async fn test_generate_column_counts_match_documents() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = InMemoryCatalog::new("sales", sales_tables());

    let report = generate_documentation(&catalog, &GenerateOptions::new("p", dir.path()))
        .await
        .unwrap();

    let index = std::fs::read_to_string(dir.path().join(INDEX_FILENAME)).unwrap();
    let rows = index_rows(&index);
    assert_eq!(rows.len(), report.table_count());

    for ((name, link, count), summary) in rows.iter().zip(&report.tables) {
        assert_eq!(name, &summary.name);
        assert_eq!(*count, summary.column_count);

        let document = std::fs::read_to_string(dir.path().join(link)).unwrap();
        let (declared, table_rows) = document_column_counts(&document);
        assert_eq!(declared, *count, "declared count in {}", link);
        assert_eq!(table_rows, *count, "column rows in {}", link);
    }

    assert_eq!(report.total_columns(), 10);
}

#[tokio::test]
async fn test_generate_table_document_contents() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = InMemoryCatalog::new("sales", sales_tables());

    generate_documentation(&catalog, &GenerateOptions::new("p", dir.path()))
        .await
        .unwrap();

    let orders = std::fs::read_to_string(dir.path().join("orders.md")).unwrap();
    assert!(orders.starts_with("# orders\n\nCustomer orders\n"));
    assert!(orders.contains("| Database | `sales` |"));
    assert!(orders.contains("| dt | `string` |  |"));
    assert!(orders.contains("| amount | `decimal(10,2)` | gross \\| net |"));
    assert!(orders.contains("### items"));

    let refunds = std::fs::read_to_string(dir.path().join("refunds.md")).unwrap();
    assert!(refunds.contains("| year | `int` |  |"));
    assert!(refunds.contains("This table has no columns."));
}

#[tokio::test]
async fn test_generate_empty_database() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = InMemoryCatalog::new("empty", Vec::new());

    let report = generate_documentation(&catalog, &GenerateOptions::new("p", dir.path()))
        .await
        .unwrap();

    assert_eq!(report.table_count(), 0);
    assert_eq!(markdown_files(dir.path()), ["README.md"]);
    let index = std::fs::read_to_string(&report.index_path).unwrap();
    assert!(index.contains("No tables found."));
}

#[tokio::test]
async fn test_generate_creates_missing_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("docs").join("sales");
    let catalog = InMemoryCatalog::new("sales", sales_tables());

    let report = generate_documentation(&catalog, &GenerateOptions::new("p", &target))
        .await
        .unwrap();

    assert_eq!(report.output_dir, target);
    assert_eq!(markdown_files(&target).len(), 6);
}

#[tokio::test]
async fn test_generate_stops_on_catalog_error() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out");
    let catalog = UnreachableCatalog {
        config: CatalogConfig::new("sales"),
    };

    let error = generate_documentation(&catalog, &GenerateOptions::new("p", &target))
        .await
        .unwrap_err();

    assert!(matches!(error, CatalogDocError::Catalog { .. }));
    assert!(!target.exists());
}

#[tokio::test]
async fn test_generate_invalid_table_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut tables = sales_tables();
    tables.push(Table::new("../escape", "sales"));
    let catalog = InMemoryCatalog::new("sales", tables);

    let error = generate_documentation(&catalog, &GenerateOptions::new("p", dir.path()))
        .await
        .unwrap_err();

    assert!(matches!(error, CatalogDocError::InvalidTable { .. }));
    assert!(markdown_files(dir.path()).is_empty());
}

#[tokio::test]
async fn test_generate_duplicate_table_names_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let tables = vec![Table::new("orders", "sales"), Table::new("orders", "sales")];
    let catalog = InMemoryCatalog::new("sales", tables);

    let error = generate_documentation(&catalog, &GenerateOptions::new("p", dir.path()))
        .await
        .unwrap_err();

    assert!(error.to_string().contains("orders.md"));
    assert!(markdown_files(dir.path()).is_empty());
}

#[tokio::test]
async fn test_generate_rejects_blank_project_name() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = InMemoryCatalog::new("sales", sales_tables());

    let error = generate_documentation(&catalog, &GenerateOptions::new("", dir.path()))
        .await
        .unwrap_err();

    assert!(matches!(error, CatalogDocError::Configuration { .. }));
    assert_eq!(catalog.pages_served(), 0);
}

#[tokio::test]
async fn test_generate_output_error_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    let catalog = InMemoryCatalog::new("sales", sales_tables());

    let error = generate_documentation(&catalog, &GenerateOptions::new("p", &blocker))
        .await
        .unwrap_err();

    assert!(matches!(error, CatalogDocError::Io { .. }));
}

/// Decodes the `%XX` escapes of an index link.
fn decode_link(link: &str) -> String {
    let bytes = link.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).unwrap();
            decoded.push(u8::from_str_radix(hex, 16).unwrap());
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(decoded).unwrap()
}

#[tokio::test]
async fn test_generate_index_links_resolve_for_awkward_names() {
    let dir = tempfile::tempdir().unwrap();
    let names = ["q4#final", "a?b", "x<y z", "daily (v2)", "100%"];
    let tables = names.iter().map(|name| Table::new(*name, "sales")).collect();
    let catalog = InMemoryCatalog::new("sales", tables);

    generate_documentation(&catalog, &GenerateOptions::new("p", dir.path()))
        .await
        .unwrap();

    let index = std::fs::read_to_string(dir.path().join(INDEX_FILENAME)).unwrap();
    let rows = index_rows(&index);
    assert_eq!(rows.len(), names.len());

    for ((name, link, _), expected) in rows.iter().zip(names) {
        assert_eq!(name, expected);
        assert!(!link.contains([' ', '#', '?', '<', '>', '(', ')']), "{}", link);
        let file = decode_link(link);
        assert_eq!(file, format!("{}.md", expected));
        assert!(dir.path().join(&file).is_file(), "{} missing", file);
    }
}

#[tokio::test]
async fn test_interrupt_during_search_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out");
    let catalog = InMemoryCatalog::new("sales", sales_tables()).stalling_at_page(2);
    let options = GenerateOptions::new("p", &target);

    let error = run_until_interrupted(
        generate_documentation(&catalog, &options),
        catalog.stalled.notified(),
    )
    .await
    .unwrap_err();

    assert!(matches!(error, CatalogDocError::Cancelled));
    assert_eq!(error.exit_code(), 130);
    assert_eq!(catalog.pages_served(), 2);
    assert!(!target.exists());
}

#[tokio::test]
async fn test_uninterrupted_run_completes() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = InMemoryCatalog::new("sales", sales_tables());
    let options = GenerateOptions::new("p", dir.path());

    let report = run_until_interrupted(
        generate_documentation(&catalog, &options),
        std::future::pending(),
    )
    .await
    .unwrap();

    assert_eq!(report.table_count(), 5);
    assert_eq!(markdown_files(dir.path()).len(), 6);
}
