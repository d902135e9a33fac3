//! Token-based pagination over catalog search results.

use crate::{Result, models::Table};
use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// One page of search results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TablePage {
    /// Tables on this page, in catalog order
    pub tables: Vec<Table>,
    /// Token for the following page; absent or empty on the last page
    pub next_token: Option<String>,
}

/// A catalog endpoint that returns search results one page at a time.
#[async_trait]
pub trait TablePageSource: Send + Sync {
    /// Fetches the page that starts at `next_token`, or the first page when
    /// the token is `None`.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    async fn fetch_page(&self, next_token: Option<String>) -> Result<TablePage>;
}

#[derive(Debug, Error)]
#[error("catalog returned continuation token '{token}' twice in a row")]
struct RepeatedTokenError {
    token: String,
}

/// Fetches every page from `source` and concatenates the tables in order.
///
/// Paging stops when a page carries no token or an empty one. A catalog that
/// hands back the token it was just given would never finish, so that is
/// reported as an error.
///
/// # Errors
/// Returns the first page error, or a catalog error on a repeated token.
pub async fn collect_pages<S>(source: &S) -> Result<Vec<Table>>
where
    S: TablePageSource + ?Sized,
{
    let mut tables = Vec::new();
    let mut token: Option<String> = None;
    let mut page_number: usize = 0;

    loop {
        page_number = page_number.saturating_add(1);
        let page = source.fetch_page(token.clone()).await?;
        debug!(
            "Fetched page {} with {} tables",
            page_number,
            page.tables.len()
        );
        tables.extend(page.tables);

        match page.next_token.filter(|next| !next.is_empty()) {
            None => break,
            Some(next) if token.as_deref() == Some(next.as_str()) => {
                return Err(crate::error::CatalogDocError::catalog_failed(
                    format!("pagination stalled after page {}", page_number),
                    RepeatedTokenError { token: next },
                ));
            }
            Some(next) => token = Some(next),
        }
    }

    Ok(tables)
}
