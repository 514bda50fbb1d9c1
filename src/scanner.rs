//! Full-table retrieval via cursor-based pagination.

use crate::error::StoreError;
use crate::item::ResultSet;
use crate::store::{PageRequest, TableStore};

/// Reads every item of a table by following continuation tokens.
///
/// Pages are fetched one at a time: the next request is issued only after
/// the previous response has arrived. There is no page limit and no cap on
/// the number of round trips.
#[derive(Debug, Clone)]
pub struct TableScanner<S> {
    store: S,
}

impl<S: TableStore> TableScanner<S> {
    /// Creates a scanner reading from `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Scans `table_name` to the end.
    ///
    /// Any store failure aborts the scan; items from pages already fetched
    /// are dropped with it.
    pub async fn scan(&self, table_name: &str) -> Result<ResultSet, StoreError> {
        let mut result = ResultSet::new();
        let mut request = PageRequest::first(table_name);
        let mut pages = 0usize;

        loop {
            let page = self.store.fetch_page(request).await?;
            pages += 1;

            tracing::debug!(
                table_name = %table_name,
                page = pages,
                items = page.items.len(),
                has_more = page.has_more(),
                "Fetched page"
            );

            result.extend(page.items);

            match page.last_evaluated_key {
                Some(token) => request = PageRequest::resume(table_name, token),
                None => break,
            }
        }

        tracing::debug!(
            table_name = %table_name,
            pages = pages,
            items = result.len(),
            "Scan complete"
        );

        Ok(result)
    }
}
