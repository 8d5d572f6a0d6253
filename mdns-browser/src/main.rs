mod collection;
mod config;
mod discovery;
mod mdns;
mod signal;
mod ui;

use std::fs::OpenOptions;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use anyhow::{Context, Result};
use crate::config::{Config, LogConfig};
use crate::mdns::browser::MdnsQuerier;

#[tokio::main]
async fn main() -> Result<()> {
    // Load config
    let config_path = std::env::args().nth(1);
    let config = Config::load_or_default(config_path.as_deref())
        .with_context(|| format!("Failed to load config from {}", config_path.as_deref().unwrap_or("defaults")))?;

    init_tracing(&config.log)?;
    tracing::info!("Starting mdns-browser");

    let daemon = mdns::start_daemon(config.discovery.interface.as_deref())?;
    let querier = MdnsQuerier::new(daemon.clone(), config.discovery.query_timeout());

    // Create cancellation token for graceful shutdown
    let cancel = CancellationToken::new();

    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        match signal::shutdown_signal().await {
            Ok(name) => {
                tracing::info!("{} received, shutting down", name);
                signal_cancel.cancel();
            }
            Err(e) => tracing::error!("Failed to listen for shutdown signals: {}", e),
        }
    });

    // Spawn discovery task; a failed query cancels the display too
    let (record_tx, record_rx) = mpsc::channel(config.discovery.output_buffer);
    let discovery_cancel = cancel.clone();
    let service_types = config.discovery.service_types.clone();
    let raw_buffer = config.discovery.raw_buffer;
    let discovery_handle = tokio::spawn(async move {
        let result = discovery::discover(
            &querier,
            &service_types,
            record_tx,
            raw_buffer,
            discovery_cancel.clone(),
        )
        .await;
        if let Err(e) = &result {
            tracing::error!("Error discovering services: {:#}", e);
            discovery_cancel.cancel();
        }
        result
    });

    let ui_result = ui::run(&config.ui, record_rx, cancel.clone()).await;

    // Stop discovery whichever way the display ended
    cancel.cancel();
    let discovery_result = discovery_handle
        .await
        .context("Discovery task panicked")?;

    // Shutdown mDNS daemon
    if let Err(e) = daemon.shutdown() {
        tracing::error!("Failed to shutdown mDNS daemon: {}", e);
    }

    ui_result?;
    discovery_result.context("error discovering services")?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Send logs to the configured file. Without one logging stays off, since the
/// terminal is taken by the display.
fn init_tracing(config: &LogConfig) -> Result<()> {
    let Some(path) = &config.file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.filter))
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
