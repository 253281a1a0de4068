// ShipTrack Server
//
// Main server binary: shipment CRUD, statistics, and carrier lookups
// over the configured storage backend.

mod config;
mod lifecycle;
mod logging;
mod routes;

use anyhow::Result;
use log::info;

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration
    let mut config = match config::ServerConfig::from_file("config.toml") {
        Ok(cfg) => cfg,
        Err(_) => {
            eprintln!("Warning: config.toml not found, using defaults");
            config::ServerConfig::default()
        }
    };
    config.apply_env_overrides();
    config.validate()?;

    // Initialize logging
    logging::init_logging(
        &config.logging.level,
        &config.logging.file_path,
        config.logging.log_to_console,
        &config.logging.format,
    )?;

    info!("Starting ShipTrack Server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded: host={}, port={}, backend={}",
        config.server.host, config.server.port, config.storage.backend
    );

    let components = lifecycle::bootstrap(&config).await?;
    lifecycle::run(&config, components).await?;

    info!("Server shutdown complete");
    Ok(())
}
