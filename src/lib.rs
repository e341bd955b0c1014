pub mod api; // HTTP surface: router, endpoints, server lifecycle
pub mod config;
pub mod db; // Result Store
pub mod gateway; // Diagnosis Gateway: mock data + ApiMedic client
pub mod models;
pub mod service; // Diagnosis Service

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::{gateway_router, start_server_on, ApiContext};
use crate::config::GatewayConfig;
use crate::db::ResultStore;
use crate::service::DiagnosisService;

/// Run the gateway until Ctrl-C.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Diagnosis Gateway starting v{}", config::APP_VERSION);

    let config = GatewayConfig::load()?;
    tracing::info!(?config, "Configuration loaded");
    if config.mock_enabled {
        tracing::info!("Mock mode enabled - upstream will not be contacted");
    }

    let store = Arc::new(ResultStore::open(&config.db_path)?);
    let service = DiagnosisService::from_config(&config, store)?;
    let app = gateway_router(ApiContext::new(Arc::new(service)), &config.cors_origin);

    let mut server = start_server_on(config.bind_addr, app).await?;
    tracing::info!(addr = %server.session.server_addr, "Listening");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Ctrl-C received, shutting down");

    server.shutdown();
    server.wait().await;
    Ok(())
}
