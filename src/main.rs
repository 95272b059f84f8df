use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use metric_graph_core::app_state::build_app_state;
use metric_graph_core::config::AppConfig;
use metric_graph_core::routes::app_router;

fn init_tracing(log_dir: Option<&Path>) -> WorkerGuard {
    let (writer, guard) = match log_dir {
        Some(dir) => tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "metric-graph.log")),
        None => tracing_appender::non_blocking(std::io::stdout()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .with_ansi(log_dir.is_none())
        .init();

    guard
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
    }
    info!("Shutting down...");
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let (config, rejected) = AppConfig::from_env();
    let _guard = init_tracing(config.log_dir.as_deref());
    for setting in &rejected {
        warn!("{setting}");
    }

    let bind_addr = config.bind_addr;
    let state = build_app_state(config)?;
    let app = app_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind to {bind_addr}"))?;
    info!("🚀 Server listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
