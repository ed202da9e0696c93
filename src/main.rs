//! beanstore HTTP service
//!
//! Serves products, orders and users from an in-memory store.
//!
//! Usage:
//!   beanstore --bind 0.0.0.0:3000 --max-scan-batch 100
//!
//! Every flag also reads from its `BEANSTORE_*` environment variable.

use std::sync::Arc;

use beanstore::{http, InMemoryModelStore, ServiceConfig};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::parse();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_directive()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    info!(max_scan_batch = config.max_scan_batch, "beanstore starting");
    let store = Arc::new(InMemoryModelStore::with_config(config.store_config()));
    http::serve(store, &config.bind).await?;
    Ok(())
}
