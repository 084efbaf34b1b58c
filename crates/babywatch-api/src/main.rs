//! Babywatch API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p babywatch-api
//! ```
//!
//! Configuration is loaded from environment variables and an optional `.env` file.

use babywatch_common::{try_init_tracing, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize tracing
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Babywatch API Server...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        port = config.api.port,
        storage = ?config.storage.backend,
        change_bus = config.redis.is_some(),
        "Configuration loaded"
    );

    babywatch_api::run(config).await?;

    Ok(())
}
