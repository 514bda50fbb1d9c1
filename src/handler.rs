//! Lambda integration for the table scan function.
//!
//! This module defines the response envelope and the [`RequestHandler`] that
//! maps a scan outcome onto it.

use lambda_runtime::LambdaEvent;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::Instrument;

use crate::config::FunctionConfig;
use crate::error::{ErrorBody, StoreError};
use crate::item::ResultSet;
use crate::scanner::TableScanner;
use crate::store::TableStore;

/// Response envelope returned by the function.
///
/// `body` is itself a JSON document serialized to a string, the shape API
/// Gateway proxy integrations expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// HTTP status code
    pub status_code: u16,
    /// JSON text of the result set or of the error
    pub body: String,
}

impl Response {
    /// Status code of a completed scan.
    pub const OK: u16 = 200;

    /// Status code of any failure, whatever its cause.
    pub const CLIENT_ERROR: u16 = 400;

    /// Creates a successful response carrying the serialized result set.
    ///
    /// Falls back to a 400 with a `SerializationError` body if the items
    /// cannot be serialized.
    pub fn from_result(result: &ResultSet) -> Self {
        match serde_json::to_string(result) {
            Ok(body) => Self {
                status_code: Self::OK,
                body,
            },
            Err(e) => Self::from_error_body(&ErrorBody::new(
                "SerializationError",
                format!("Failed to serialize result: {}", e),
            )),
        }
    }

    /// Creates a failed response from a store error.
    pub fn from_error(error: &StoreError) -> Self {
        Self::from_error_body(&ErrorBody::from(error))
    }

    fn from_error_body(error: &ErrorBody) -> Self {
        let body = serde_json::to_string(error)
            .unwrap_or_else(|_| serde_json::json!({ "message": error.message }).to_string());
        Self {
            status_code: Self::CLIENT_ERROR,
            body,
        }
    }
}

impl From<Result<ResultSet, StoreError>> for Response {
    fn from(result: Result<ResultSet, StoreError>) -> Self {
        match result {
            Ok(items) => Self::from_result(&items),
            Err(error) => Self::from_error(&error),
        }
    }
}

/// Entry point of the function.
///
/// Owns the scanner and the resolved table name; one instance serves every
/// invocation of a Lambda execution environment.
#[derive(Debug)]
pub struct RequestHandler<S> {
    scanner: TableScanner<S>,
    table_name: String,
}

impl<S: TableStore> RequestHandler<S> {
    /// Creates a handler scanning the table named in `config`.
    pub fn new(config: &FunctionConfig, store: S) -> Self {
        Self {
            scanner: TableScanner::new(store),
            table_name: config.table_name.clone(),
        }
    }

    /// Returns the table this handler scans.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Returns the scanner.
    pub fn scanner(&self) -> &TableScanner<S> {
        &self.scanner
    }

    /// Handles one invocation event.
    pub async fn handle(&self, event: Value) -> Response {
        tracing::info!(event = %event, "EVENT");

        let result = self.scanner.scan(self.table_name()).await;
        match &result {
            Ok(items) => tracing::info!(
                table_name = %self.table_name(),
                items = items.len(),
                "Scanned table"
            ),
            Err(error) => tracing::error!(
                table_name = %self.table_name(),
                code = error.code.as_deref().unwrap_or("Unknown"),
                request_id = error.request_id.as_deref().unwrap_or(""),
                retryable = error.retryable,
                error = %error,
                "Failed to scan table"
            ),
        }

        result.into()
    }

    /// Adapter for `lambda_runtime::service_fn`.
    ///
    /// Store failures are reported in the envelope, so this never returns
    /// `Err`.
    pub async fn invoke(&self, event: LambdaEvent<Value>) -> Result<Response, lambda_runtime::Error> {
        let (payload, context) = event.into_parts();
        let span = tracing::info_span!("invocation", request_id = %context.request_id);
        Ok(self.handle(payload).instrument(span).await)
    }
}
