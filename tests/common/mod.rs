//! Shared test utilities for integration tests.
//!
//! This module provides a mock store, item and token fixtures, and proptest
//! strategies used across integration tests.

#![allow(dead_code)] // These utilities are used by other integration test files

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use get_all_users::{ContinuationToken, Item, Page, PageRequest, StoreError, TableStore};
use proptest::prelude::*;

// =============================================================================
// Mock Store for Integration Tests
// =============================================================================

/// A mock implementation of TableStore for integration tests.
///
/// Responses are returned in the order they were added. Every request is
/// recorded so tests can check what the scanner asked for. Once the scripted
/// responses run out the store fails with `ResourceNotFoundException`.
pub struct MockTableStore {
    responses: Mutex<VecDeque<Result<Page, StoreError>>>,
    /// Track fetch calls for verification
    calls: Mutex<Vec<PageRequest>>,
}

impl MockTableStore {
    /// Creates a new MockTableStore with no pre-configured responses.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Adds a response to be returned on the next fetch.
    pub fn with_response(self, response: Result<Page, StoreError>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// Adds a successful page.
    pub fn with_page(self, page: Page) -> Self {
        self.with_response(Ok(page))
    }

    /// Adds a failure.
    pub fn with_error(self, error: StoreError) -> Self {
        self.with_response(Err(error))
    }

    /// Scripts the given item batches as a chain of pages linked by tokens.
    pub fn with_pages(mut self, batches: Vec<Vec<Item>>) -> Self {
        let count = batches.len();
        for (i, items) in batches.into_iter().enumerate() {
            let page = if i + 1 < count {
                Page::with_next(items, token(i))
            } else {
                Page::last(items)
            };
            self = self.with_page(page);
        }
        self
    }

    /// Returns all recorded fetch calls.
    pub fn calls(&self) -> Vec<PageRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns the number of fetch calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TableStore for MockTableStore {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page, StoreError> {
        self.calls.lock().unwrap().push(request);
        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(StoreError::with_code(
                "ResourceNotFoundException",
                "Requested resource not found",
            ))
        })
    }
}

/// A store that hands out a continuation token for the first `pages - 1`
/// pages, each with one item, and then stops.
pub struct ChainStore {
    pages: usize,
    calls: Mutex<usize>,
}

impl ChainStore {
    pub fn new(pages: usize) -> Self {
        Self {
            pages,
            calls: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl TableStore for ChainStore {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page, StoreError> {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls
        };

        let expected = if n == 1 { None } else { Some(token(n - 2)) };
        if request.exclusive_start_key != expected {
            return Err(StoreError::new(format!("unexpected start key on call {}", n)));
        }

        let items = vec![item(&format!("item-{}", n))];
        if n < self.pages {
            Ok(Page::with_next(items, token(n - 1)))
        } else {
            Ok(Page::last(items))
        }
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// Creates an item with a single `id` attribute.
pub fn item(id: &str) -> Item {
    let mut item = Item::new();
    item.insert("id".to_string(), serde_json::Value::String(id.to_string()));
    item
}

/// Creates a continuation token keyed on a numeric `id`.
pub fn token(n: usize) -> ContinuationToken {
    ContinuationToken::new(HashMap::from([(
        "id".to_string(),
        AttributeValue::N(n.to_string()),
    )]))
}

/// Error DynamoDB returns for an empty table name.
pub fn empty_table_name_error() -> StoreError {
    StoreError::with_code(
        "ValidationException",
        "1 validation error detected: Value '' at 'tableName' failed to satisfy constraint: Member must have length greater than or equal to 3",
    )
    .with_request_id("0QOF9ISJ6KNPN4J0UVCTRDQ7Q3VV4KQNSO5AEMVJF66Q9ASUAAJG")
    .with_status_code(400)
}

// =============================================================================
// Proptest Strategies
// =============================================================================

/// Strategy for a table split into pages: up to 8 pages of up to 6 items,
/// item ids unique across the whole table.
pub fn paged_table_strategy() -> impl Strategy<Value = Vec<Vec<Item>>> {
    prop::collection::vec(0usize..6, 1..8).prop_map(|sizes| {
        let mut next_id = 0usize;
        sizes
            .into_iter()
            .map(|size| {
                (0..size)
                    .map(|_| {
                        next_id += 1;
                        item(&format!("user-{}", next_id))
                    })
                    .collect()
            })
            .collect()
    })
}
