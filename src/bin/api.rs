use std::sync::Arc;

use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use slackcmd::api::{SlackView, function_handler};
use slackcmd::core::config::AppConfig;
use slackcmd::core::store::MemoryStore;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    slackcmd::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let router = slackcmd::demo::router().map_err(|e| {
        error!("Command table error: {}", e);
        Error::from(e)
    })?;

    let view = Arc::new(SlackView::new(
        &config,
        Arc::new(router),
        Arc::new(MemoryStore::hierarchical()),
    ));

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let view = Arc::clone(&view);
        async move { function_handler(&view, event).await }
    }))
    .await
}
