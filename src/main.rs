//! Lambda entry point for the get-all-users function.
//!
//! Build with `cargo lambda build --release` and deploy with `USER_TABLE`
//! (and optionally `REGION`) set on the function.

use get_all_users::{DynamoDbTableStore, FunctionConfig, RequestHandler};
use lambda_runtime::{service_fn, LambdaEvent};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    // CloudWatch stamps every line, so the subscriber does not.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .without_time()
        .init();

    let config = FunctionConfig::from_env();
    tracing::info!(
        table_name = %config.table_name,
        region = config.region.as_deref().unwrap_or("default"),
        "Starting function"
    );

    let store = DynamoDbTableStore::from_config(&config).await;
    let handler = RequestHandler::new(&config, store);
    let handler = &handler;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| handler.invoke(event))).await
}
