//! # get-all-users
//!
//! A Lambda function that returns every record of a DynamoDB table as JSON.
//!
//! ## Overview
//!
//! On each invocation the function logs the incoming event, scans the
//! configured table page by page until DynamoDB stops returning a
//! `LastEvaluatedKey`, and answers with an API Gateway style envelope:
//!
//! - `{"statusCode": 200, "body": "[...items...]"}` when the scan completes
//! - `{"statusCode": 400, "body": "{...error...}"}` when any page fails
//!
//! A failed page aborts the whole scan. Items already read are discarded and
//! nothing is retried.
//!
//! ## Configuration
//!
//! | Variable                | Meaning                                   |
//! |-------------------------|-------------------------------------------|
//! | `USER_TABLE`            | Table to scan (empty when unset)          |
//! | `REGION`                | DynamoDB region (SDK default when unset)  |
//! | `DYNAMODB_ENDPOINT_URL` | Optional endpoint override                |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use get_all_users::{DynamoDbTableStore, FunctionConfig, RequestHandler};
//!
//! let config = FunctionConfig::from_env();
//! let store = DynamoDbTableStore::from_config(&config).await;
//! let handler = RequestHandler::new(&config, store);
//!
//! let response = handler.handle(serde_json::json!({})).await;
//! ```
//!
//! The scanner works against any [`TableStore`], which is how the tests run
//! it without AWS.

pub mod config;
pub mod error;
pub mod handler;
pub mod item;
pub mod scanner;
pub mod store;

pub use config::FunctionConfig;
pub use error::{ErrorBody, StoreError};
pub use handler::{RequestHandler, Response};
pub use item::{Item, ResultSet};
pub use scanner::TableScanner;
pub use store::{ContinuationToken, DynamoDbTableStore, Page, PageRequest, TableStore};
