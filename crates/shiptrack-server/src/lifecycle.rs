//! Server lifecycle management helpers.
//!
//! This module encapsulates the heavy lifting otherwise handled directly
//! in `main.rs`: opening the configured store exactly once, wiring the
//! service and carrier client, and running the HTTP server. The store
//! handle lives inside the service for the whole process lifetime and is
//! dropped on shutdown.

use crate::config::{ServerConfig, StorageBackendKind};
use crate::routes;
use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Result;
use log::info;
use shiptrack_carrier::{CarrierClient, CarrierConfig};
use shiptrack_commons::SnowflakeGenerator;
use shiptrack_core::ShipmentService;
use shiptrack_store::{
    GistStore, JsonFileStore, MemoryStore, RocksDbStore, ShipmentStore,
};
use std::sync::Arc;

/// Aggregated application components shared across the HTTP workers.
pub struct ApplicationComponents {
    pub service: Arc<ShipmentService>,
    pub carrier: Arc<CarrierClient>,
}

/// Open the configured store, probe it, and build the service stack.
pub async fn bootstrap(config: &ServerConfig) -> Result<ApplicationComponents> {
    let store = open_store(config)?;

    // One probing load so a bad path/credential fails at startup, not on
    // the first request.
    let state = store.load().await?;
    info!(
        "Store opened: backend={}, {} shipments, {} events",
        config.storage.backend,
        state.shipments.len(),
        state.events.len()
    );

    let ids = Arc::new(SnowflakeGenerator::new(0));
    let service = Arc::new(ShipmentService::new(store, ids));

    let carrier_config = CarrierConfig::new(config.carrier.api_key.clone())
        .with_base_url(config.carrier.base_url.clone());
    if carrier_config.is_configured() {
        info!("Carrier lookups enabled against {}", config.carrier.base_url);
    } else {
        info!("Carrier lookups disabled (no API key configured)");
    }
    let carrier = Arc::new(CarrierClient::new(carrier_config));

    Ok(ApplicationComponents { service, carrier })
}

fn open_store(config: &ServerConfig) -> Result<Arc<dyn ShipmentStore>> {
    let store: Arc<dyn ShipmentStore> = match config.backend_kind()? {
        StorageBackendKind::Memory => Arc::new(MemoryStore::new()),
        StorageBackendKind::JsonFile => {
            Arc::new(JsonFileStore::new(&config.storage.file_path))
        }
        StorageBackendKind::RocksDb => Arc::new(RocksDbStore::open(&config.storage.rocksdb_path)?),
        StorageBackendKind::Gist => Arc::new(GistStore::new(
            &config.storage.gist.gist_id,
            &config.storage.gist.file_name,
            &config.storage.gist.token,
        )),
    };
    Ok(store)
}

/// Run the HTTP server until shutdown.
pub async fn run(config: &ServerConfig, components: ApplicationComponents) -> Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting HTTP server on {}", bind_addr);

    let service = components.service;
    let carrier = components.carrier;

    HttpServer::new(move || {
        // Configure CORS for web browser clients
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(service.clone()))
            .app_data(web::Data::new(carrier.clone()))
            .configure(routes::configure)
    })
    .bind(&bind_addr)?
    .workers(if config.server.workers == 0 {
        num_cpus::get()
    } else {
        config.server.workers
    })
    .run()
    .await?;

    Ok(())
}
