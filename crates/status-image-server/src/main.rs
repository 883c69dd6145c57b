//! Status image server - caching proxy for status-code images

use clap::Parser;
use file_image_store::FileImageStore;
use status_image_origin::HttpOrigin;
use status_image_server::{start_server, Config, Result, ServerState, SharedState};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    // Initialize logging
    let env_filter = EnvFilter::from_default_env()
        .add_directive("status_image_server=info".parse()?)
        .add_directive("file_image_store=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting status image server...");

    let cache_dir = std::path::absolute(&config.cache_dir)?;
    let store = FileImageStore::new(cache_dir);
    store.init().await?;
    info!(
        "Cache dir: {:?} ({} entries)",
        store.cache_dir(),
        store.keys().await?.len()
    );

    let origin = HttpOrigin::new(&config.origin_url)?;
    info!("Origin: {}", origin.base_url());

    let state: SharedState = Arc::new(ServerState::new(Arc::new(store), Arc::new(origin)));

    start_server(state, &config.bind_addr()).await?;

    Ok(())
}
