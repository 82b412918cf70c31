//! TernakPro API Server
//!
//! REST API untuk rekomendasi ternak berdasarkan kondisi peternak
//!
//! Usage:
//!   cargo run --bin ternakpro_api
//!
//! Environment:
//!   TERNAKPRO_HOST       - Server host (default: 0.0.0.0)
//!   PORT/TERNAKPRO_PORT  - Server port (default: 8000)
//!   TERNAKPRO_MODEL_PATH - Optional model artifact (JSON)
//!   RUST_LOG             - Log level (default: info)

use std::sync::Arc;
use ternakpro::utils::constants::{APP_NAME, APP_VERSION};
use ternakpro::{create_router, AppState, ServiceConfig};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = ServiceConfig::from_env()?;
    let addr = config.socket_addr()?;

    // Model load tidak pernah fatal: gagal = rule-based
    let state = Arc::new(AppState::initialize(config).await);
    let state_for_shutdown = state.clone();

    let app = create_router(state.clone());

    info!("🚀 {} v{} starting on http://{}", APP_NAME, APP_VERSION, addr);
    info!(
        model_loaded = state.model_state.loaded,
        strategy = state.engine.strategy_name(),
        "Model status"
    );
    info!("Endpoints:");
    info!("  POST /api/recommend  - Get livestock recommendation");
    info!("  GET  /api/health     - Health check");
    info!("  GET  /               - Service info");

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(
        uptime_seconds = state_for_shutdown.uptime_seconds(),
        "🛑 {} shutdown complete", APP_NAME
    );

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("⚠️ Failed to install Ctrl+C handler: {}", e);
        // Tanpa handler, tunggu selamanya dan biarkan proses dihentikan dari luar
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections...");
}
