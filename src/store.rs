//! Backing-store client for the table scan function.
//!
//! This module defines the [`TableStore`] trait, the single operation the
//! scanner needs from a key-value store, and [`DynamoDbTableStore`], its
//! implementation on top of the DynamoDB `Scan` API.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use crate::config::FunctionConfig;
use crate::error::StoreError;
use crate::item::{item_from_attributes, Item};

/// Opaque pagination cursor returned by the store.
///
/// Holds DynamoDB's `LastEvaluatedKey` verbatim so it can be sent back as
/// `ExclusiveStartKey` without any lossy conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuationToken(HashMap<String, AttributeValue>);

impl ContinuationToken {
    /// Wraps a raw key map.
    pub fn new(key: HashMap<String, AttributeValue>) -> Self {
        Self(key)
    }

    /// Consumes the token, returning the raw key map.
    pub fn into_key(self) -> HashMap<String, AttributeValue> {
        self.0
    }
}

/// Parameters of one page query.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    /// The table to read
    pub table_name: String,
    /// Where to resume; `None` for the first page
    pub exclusive_start_key: Option<ContinuationToken>,
}

impl PageRequest {
    /// Creates a request for the first page of a table.
    pub fn first(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            exclusive_start_key: None,
        }
    }

    /// Creates a request resuming after `token`.
    pub fn resume(table_name: impl Into<String>, token: ContinuationToken) -> Self {
        Self {
            table_name: table_name.into(),
            exclusive_start_key: Some(token),
        }
    }
}

/// One batch of items and the cursor for the next batch, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Items in the order the store returned them
    pub items: Vec<Item>,
    /// Present when more items remain
    pub last_evaluated_key: Option<ContinuationToken>,
}

impl Page {
    /// Creates a final page (no continuation).
    pub fn last(items: Vec<Item>) -> Self {
        Self {
            items,
            last_evaluated_key: None,
        }
    }

    /// Creates a page followed by more data.
    pub fn with_next(items: Vec<Item>, token: ContinuationToken) -> Self {
        Self {
            items,
            last_evaluated_key: Some(token),
        }
    }

    /// Returns true if the store reported more pages.
    pub fn has_more(&self) -> bool {
        self.last_evaluated_key.is_some()
    }
}

/// Trait for reading pages from a key-value table.
///
/// This abstracts the store so the scanner can run against DynamoDB in
/// production and against an in-memory mock in tests.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Fetches a single page.
    ///
    /// # Returns
    ///
    /// The page on success, or a [`StoreError`] describing why the query
    /// failed.
    async fn fetch_page(&self, request: PageRequest) -> Result<Page, StoreError>;
}

#[async_trait]
impl<S: TableStore + ?Sized> TableStore for std::sync::Arc<S> {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page, StoreError> {
        (**self).fetch_page(request).await
    }
}

/// DynamoDB implementation of [`TableStore`] using the `Scan` API.
#[derive(Debug, Clone)]
pub struct DynamoDbTableStore {
    client: Client,
}

impl DynamoDbTableStore {
    /// Creates a store from an existing DynamoDB client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a store from the function configuration.
    ///
    /// Loads the AWS SDK configuration for the configured region and applies
    /// the endpoint override, if any.
    pub async fn from_config(config: &FunctionConfig) -> Self {
        let sdk_config = config.load_sdk_config().await;
        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
        if let Some(endpoint_url) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint_url);
        }
        Self::new(Client::from_conf(builder.build()))
    }

    /// Returns the underlying DynamoDB client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl TableStore for DynamoDbTableStore {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page, StoreError> {
        let output = self
            .client()
            .scan()
            .table_name(request.table_name)
            .set_exclusive_start_key(request.exclusive_start_key.map(ContinuationToken::into_key))
            .send()
            .await?;

        let items = output
            .items
            .unwrap_or_default()
            .into_iter()
            .map(item_from_attributes)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page {
            items,
            last_evaluated_key: output.last_evaluated_key.map(ContinuationToken::new),
        })
    }
}
