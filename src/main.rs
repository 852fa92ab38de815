use std::net::SocketAddr;

use anyhow::Context;
use dotenvy::dotenv;
use skillbridge::logging::init_tracing;
use skillbridge::metrics::{init_metrics, metrics_router};
use skillbridge::router::init_router;
use skillbridge::state::AppState;
use skillbridge_config::ServerConfig;
use skillbridge_db::{init_db_pool, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = ServerConfig::from_env();
    let _log_guard = init_tracing(config.log_format, config.log_dir.as_deref());

    let pool = init_db_pool(config.database_max_connections).await?;
    run_migrations(&pool).await?;

    let state = AppState::from_env(pool);
    tokio::fs::create_dir_all(&state.upload_config.dir)
        .await
        .context("Failed to create upload directory")?;

    let mut app = init_router(state);
    if config.metrics_enabled {
        let handle = init_metrics().context("Failed to install metrics recorder")?;
        app = app.merge(metrics_router(handle));
        tracing::info!("Prometheus metrics available at /metrics");
    }

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    tracing::info!(%address, "Server running");
    tracing::info!("Swagger UI available at http://{address}/api-docs");
    tracing::info!("Scalar UI available at http://{address}/scalar");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
