//! Vehicles API server.
//!
//! Loads configuration, wires the record store and lookup clients into the
//! aggregation service, and serves the REST API.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use vehicles_api::api::rest::{AppState, create_router};
use vehicles_api::application::services::VehicleAggregationService;
use vehicles_api::config::{AppConfig, StorageBackend, StorageConfig};
use vehicles_api::infrastructure::lookups::{MapsClient, PricingClient};
use vehicles_api::infrastructure::persistence::{
    InMemoryVehicleRepository, PostgresVehicleRepository, VehicleRepository,
};
use vehicles_api::telemetry;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "vehicles-server", version, about = "Vehicle record service")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = AppConfig::load(args.config.as_deref()).context("loading configuration")?;
    telemetry::init_tracing(&config.logging).context("initialising tracing")?;

    let repository = build_repository(&config.storage).await?;
    let pricing = PricingClient::new(config.pricing.base_url.clone(), config.pricing.timeout_ms)
        .context("building pricing client")?;
    let maps = MapsClient::new(config.maps.base_url.clone(), config.maps.timeout_ms)
        .context("building maps client")?;

    let service = VehicleAggregationService::new(
        repository,
        Arc::new(pricing),
        Arc::new(maps),
        config.enrichment.clone(),
    );
    let router = create_router(AppState::new(Arc::new(service)));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, backend = ?config.storage.backend, "vehicles server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving requests")?;

    tracing::info!("vehicles server stopped");
    Ok(())
}

async fn build_repository(storage: &StorageConfig) -> anyhow::Result<Arc<dyn VehicleRepository>> {
    match storage.backend {
        StorageBackend::Memory => Ok(Arc::new(InMemoryVehicleRepository::new())),
        StorageBackend::Postgres => {
            let url = storage
                .database_url
                .as_deref()
                .context("storage.database_url is not set")?;
            let repository = PostgresVehicleRepository::connect(url)
                .await
                .context("connecting to postgres")?;
            repository.migrate().await.context("running migrations")?;
            Ok(Arc::new(repository))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
