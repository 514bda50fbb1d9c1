//! Function configuration.
//!
//! Configuration is read once when the Lambda execution environment starts
//! and is passed by value into the store client and the handler. Nothing else
//! in the crate reads process environment.

use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Environment variable holding the store client region.
pub const REGION_VAR: &str = "REGION";

/// Environment variable holding the name of the table to scan.
pub const TABLE_NAME_VAR: &str = "USER_TABLE";

/// Environment variable overriding the DynamoDB endpoint (DynamoDB Local etc).
pub const ENDPOINT_URL_VAR: &str = "DYNAMODB_ENDPOINT_URL";

/// Configuration for the table scan function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionConfig {
    /// Region for the store client. `None` defers to the AWS SDK default chain.
    pub region: Option<String>,
    /// Table to scan. Empty when unset; the store rejects it at query time.
    pub table_name: String,
    /// Optional custom endpoint URL (for testing)
    pub endpoint_url: Option<String>,
}

impl FunctionConfig {
    /// Creates a configuration that scans the given table with SDK defaults.
    pub fn with_table(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            ..Self::default()
        }
    }

    /// Sets the region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the endpoint override.
    pub fn endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Blank region and endpoint values count as unset. The table name is
    /// taken as-is, so an unset table yields an empty string.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            region: non_blank(REGION_VAR),
            table_name: lookup(TABLE_NAME_VAR).unwrap_or_default(),
            endpoint_url: non_blank(ENDPOINT_URL_VAR),
        }
    }

    /// Loads the AWS SDK configuration, applying the configured region.
    pub async fn load_sdk_config(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        loader.load().await
    }
}
