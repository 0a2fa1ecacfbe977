use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fleet_dispatch::config::environment::EnvironmentConfig;
use fleet_dispatch::services::telemetry_service::spawn_simulation;
use fleet_dispatch::state::AppState;
use fleet_dispatch::{build_router, seed};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚚 Fleet Dispatch API");
    info!("=====================");

    let config = EnvironmentConfig::default();
    let state = AppState::new(config.clone());

    if config.seed_demo_data {
        seed::seed_demo_data(&state)
            .await
            .map_err(|e| anyhow::anyhow!("Demo seed failed: {}", e))?;
    }

    spawn_simulation(
        state.vehicles.clone(),
        state.alerts.clone(),
        config.simulation_interval_secs,
    );

    let app = build_router(state);

    let addr: SocketAddr = config.server_url().parse()?;
    info!("🌐 Server listening on http://{}", addr);
    info!("🔍 Key endpoints:");
    info!("   GET  /health - Liveness probe");
    info!("   POST /api/auth/register - Create an account");
    info!("   POST /api/auth/login - Obtain a token");
    info!("   GET  /api/vehicles - Fleet listing (role-scoped)");
    info!("   POST /api/bookings/recommend - Vehicle recommendations");
    info!("   GET  /api/journey - Journey planner session");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Ctrl+C received, shutting down...");
        },
        _ = terminate => {
            info!("🛑 Termination signal received, shutting down...");
        },
    }
}
