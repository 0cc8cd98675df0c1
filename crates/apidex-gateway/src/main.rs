//! Apidex Gateway - catalog-driven HTTP API gateway
//!
//! This is the main entry point for the gateway service.
//!
//! # Configuration
//!
//! See [`GatewayConfig::from_env`] for the recognised environment variables.
//! Route units are selected by the `<category>/<name>.unit` files under
//! `ROUTES_DIR`; a unit file naming an unknown unit, or a unit that fails to
//! register, aborts startup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use apidex_core::SettingsStore;
use apidex_gateway::{create_router, units, GatewayConfig, GatewayState, RouteLoader};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,apidex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Apidex Gateway");

    let config = GatewayConfig::from_env();
    tracing::info!(
        listen_addr = %config.listen_addr,
        settings_path = %config.settings_path.display(),
        ui_dir = %config.ui_dir.display(),
        assets_dir = %config.assets_dir.display(),
        routes_dir = %config.routes_dir.display(),
        "Gateway configuration loaded"
    );

    let settings = SettingsStore::load(&config.settings_path)?;
    tracing::info!(
        categories = settings.document().categories.len(),
        has_api_key = !settings.api_key().is_empty(),
        "Catalog loaded"
    );

    let selected = RouteLoader::discover(&config.routes_dir, units::builtin())?;
    let listen_addr = config.listen_addr.clone();

    let state = GatewayState::new(settings, config);
    let app = create_router(state, selected)?;
    tracing::info!("Router configured");

    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
