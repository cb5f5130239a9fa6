//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, background pipeline spawning, and Axum
//! server lifecycle.

use crate::analytics::{ClickQueue, ClickWorkerPool};
use crate::application::services::{LinkService, StatsService};
use crate::config::Config;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::infrastructure::persistence::{PgClickRepository, PgLinkRepository};
use crate::monitor::{LinkMonitor, MonitorConfig};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Bounded click queue and ingestion worker pool
/// - Liveness monitor task
/// - Axum HTTP server with graceful shutdown
///
/// On SIGINT/SIGTERM the monitor is cancelled, the click queue is closed so
/// no further events are accepted, and the workers drain whatever was already
/// queued before the process exits.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let link_repository: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(pool.clone()));
    let click_repository: Arc<dyn ClickRepository> = Arc::new(PgClickRepository::new(pool));

    let (queue, click_rx) = ClickQueue::bounded(config.click_queue_capacity);
    let clicks = Arc::new(queue);
    let workers = ClickWorkerPool::spawn(
        click_rx,
        click_repository.clone(),
        config.click_worker_count,
    );

    let shutdown = CancellationToken::new();
    let monitor = LinkMonitor::new(
        link_repository.clone(),
        MonitorConfig {
            interval: config.monitor_interval(),
            probe_timeout: config.probe_timeout(),
        },
    )?;
    let monitor_handle = tokio::spawn(monitor.run(shutdown.child_token()));

    let link_service = Arc::new(LinkService::new(link_repository.clone()));
    let stats_service = Arc::new(StatsService::new(link_repository, click_repository));

    let state = AppState::new(
        link_service,
        stats_service,
        clicks.clone(),
        config.base_url.clone(),
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // Stop the monitor, refuse new clicks, then drain the backlog.
    shutdown.cancel();
    clicks.close();
    workers.join().await;
    if let Err(e) = monitor_handle.await {
        tracing::error!(error = %e, "liveness monitor task failed");
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Resolves when SIGINT or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
