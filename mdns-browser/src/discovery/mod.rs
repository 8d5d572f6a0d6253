pub mod normalize;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use anyhow::{Context, Result};
use shared::types::{RawService, ServiceRecord};

/// A source of discovery results for one service type at a time.
#[async_trait]
pub trait ServiceQuery: Send + Sync {
    /// Query `service_type` and push every result into `sink`.
    ///
    /// Returns once the query has finished collecting responses, the sink has
    /// been dropped, or `cancel` fires.
    async fn query(
        &self,
        service_type: &str,
        sink: &flume::Sender<RawService>,
        cancel: &CancellationToken,
    ) -> Result<()>;
}

/// Query each service type in order and stream normalized records to `tx`.
///
/// `tx` is closed when every type has been queried, on cancellation, or when
/// a query fails. A failed query aborts the whole run with its error; the
/// remaining types are not queried.
pub async fn discover<Q: ServiceQuery + ?Sized>(
    querier: &Q,
    service_types: &[String],
    tx: mpsc::Sender<ServiceRecord>,
    raw_buffer: usize,
    cancel: CancellationToken,
) -> Result<()> {
    let (raw_tx, raw_rx) = flume::bounded(raw_buffer.max(1));
    let forwarder = tokio::spawn(forward(raw_rx, tx, cancel.clone()));

    for service_type in service_types {
        if cancel.is_cancelled() {
            tracing::info!("Discovery cancelled before querying {}", service_type);
            break;
        }

        tracing::info!("Querying {}", service_type);
        querier
            .query(service_type, &raw_tx, &cancel)
            .await
            .with_context(|| format!("error querying for {}", service_type))?;
    }

    drop(raw_tx);
    forwarder.await.context("Record forwarder panicked")?;

    tracing::info!("Discovery finished");
    Ok(())
}

/// Normalize raw results and hand them to the display until the raw side
/// closes or cancellation fires. Dropping `tx` on return closes the output.
async fn forward(
    raw_rx: flume::Receiver<RawService>,
    tx: mpsc::Sender<ServiceRecord>,
    cancel: CancellationToken,
) {
    loop {
        let raw = tokio::select! {
            _ = cancel.cancelled() => break,
            raw = raw_rx.recv_async() => match raw {
                Ok(raw) => raw,
                Err(_) => break,
            },
        };

        let record = normalize::normalize(raw);
        tracing::debug!("Discovered {}", record.display_name());

        tokio::select! {
            _ = cancel.cancelled() => break,
            sent = tx.send(record) => {
                if sent.is_err() {
                    tracing::debug!("Record receiver dropped, stopping forwarder");
                    break;
                }
            }
        }
    }
}
