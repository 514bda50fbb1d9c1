//! Error types for the table scan function.
//!
//! Every failure that can happen while reading the table is a [`StoreError`]:
//! connectivity, permissions, throttling, a missing table or a response that
//! cannot be unmarshalled. The handler does not distinguish between them; it
//! turns any of them into a 400 response whose body is an [`ErrorBody`].

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::RequestId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a backing-store query.
///
/// Carries whatever metadata the store reported. Fields that the store did
/// not provide (for example the request id of a request that never left the
/// process) are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StoreError {
    /// Human readable description of the failure
    pub message: String,
    /// Service error code, e.g. `ResourceNotFoundException`
    pub code: Option<String>,
    /// AWS request id if the request reached the service
    pub request_id: Option<String>,
    /// HTTP status of the raw response, if there was one
    pub status_code: Option<u16>,
    /// Whether the store considers the failure transient.
    ///
    /// Informational only; nothing in this crate retries.
    pub retryable: bool,
}

impl StoreError {
    /// Creates a new StoreError with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            request_id: None,
            status_code: None,
            retryable: false,
        }
    }

    /// Creates a new StoreError with a service error code.
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::new(message)
        }
    }

    /// Creates the error used when an item attribute cannot be unmarshalled.
    pub fn unsupported_attribute(attribute: &str) -> Self {
        Self::with_code(
            "UnsupportedAttributeType",
            format!("Attribute `{}` has a type that cannot be converted to JSON", attribute),
        )
    }

    /// Marks the error as retryable.
    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }

    /// Sets the AWS request id.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Sets the HTTP status code of the failed response.
    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }
}

/// Error codes the store uses for request throttling.
const THROTTLING_CODES: &[&str] = &["ThrottlingException", "Throttling", "TooManyRequestsException"];

impl From<SdkError<ScanError>> for StoreError {
    fn from(error: SdkError<ScanError>) -> Self {
        let status_code = error.raw_response().map(|r| r.status().as_u16());

        // Transport failures have no service code; name them the way the
        // JavaScript SDK does.
        let code = match &error {
            SdkError::TimeoutError(_) => Some("TimeoutError".to_string()),
            SdkError::DispatchFailure(failure) if failure.is_timeout() => {
                Some("TimeoutError".to_string())
            }
            SdkError::DispatchFailure(_) => Some("NetworkingError".to_string()),
            _ => error.code().map(str::to_string),
        };

        let transient = match &error {
            SdkError::ServiceError(context) => {
                let err = context.err();
                err.is_provisioned_throughput_exceeded_exception()
                    || err.is_request_limit_exceeded()
                    || err.is_internal_server_error()
            }
            SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => true,
            _ => false,
        };
        let throttled = code
            .as_deref()
            .is_some_and(|c| THROTTLING_CODES.contains(&c));
        let server_error = status_code.is_some_and(|s| s >= 500);
        let retryable = transient || throttled || server_error;

        // Service errors carry a message; transport errors only describe
        // themselves through their source chain.
        let message = error
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| DisplayErrorContext(&error).to_string());

        Self {
            message,
            code,
            request_id: error.request_id().map(str::to_string),
            status_code,
            retryable,
        }
    }
}

/// JSON body of a failed invocation.
///
/// Uses the field names of a serialized JavaScript AWS SDK error for the
/// fields it carries (`message`, `code`, `requestId`, `statusCode`,
/// `retryable`). The SDK's `time` and `retryDelay` are not emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// The error message
    pub message: String,
    /// The service error code
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub code: Option<String>,
    /// The AWS request id
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub request_id: Option<String>,
    /// HTTP status code returned by the store
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status_code: Option<u16>,
    /// Whether the failure was transient
    #[serde(default)]
    pub retryable: bool,
}

impl ErrorBody {
    /// Creates a new ErrorBody.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: Some(code.into()),
            request_id: None,
            status_code: None,
            retryable: false,
        }
    }
}

impl From<&StoreError> for ErrorBody {
    fn from(error: &StoreError) -> Self {
        Self {
            message: error.message.clone(),
            code: error.code.clone(),
            request_id: error.request_id.clone(),
            status_code: error.status_code,
            retryable: error.retryable,
        }
    }
}
