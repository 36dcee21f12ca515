mod api;
mod app;
mod bootstrap;
mod health;
mod predictions;
mod recommendations;

use std::time::Duration;

use anyhow::Result;
use nestling_core::config::{LoadOptions, LoggingConfig};
use tokio::net::TcpListener;
use tokio::sync::watch;

fn init_logging(logging: &LoggingConfig) {
    use nestling_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    let bootstrap::Application { config, router } = bootstrap::bootstrap(LoadOptions::default())?;
    init_logging(&config.logging);

    let address = config.listen_address();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!(
        event_name = "system.server.started",
        correlation_id = "bootstrap",
        bind_address = %address,
        max_results = config.recommendations.max_results,
        "nestling-server listening"
    );

    let (stop_tx, mut stop_rx) = watch::channel(false);
    let server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.changed().await;
            })
            .await
    });

    wait_for_shutdown().await?;
    tracing::info!(
        event_name = "system.server.stopping",
        correlation_id = "shutdown",
        grace_secs = config.server.graceful_shutdown_secs,
        "nestling-server stopping"
    );
    let _ = stop_tx.send(true);

    let grace = Duration::from_secs(config.server.graceful_shutdown_secs);
    match tokio::time::timeout(grace, server).await {
        Ok(joined) => joined??,
        Err(_) => tracing::warn!(
            event_name = "system.server.shutdown_timeout",
            correlation_id = "shutdown",
            "in-flight requests did not drain before the grace period elapsed"
        ),
    }

    Ok(())
}

async fn wait_for_shutdown() -> Result<()> {
    tokio::signal::ctrl_c().await?;
    Ok(())
}
