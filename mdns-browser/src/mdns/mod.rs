pub mod browser;

use mdns_sd::{IfKind, ServiceDaemon};
use anyhow::{Context, Result};

/// Start the mDNS daemon, optionally bound to a single interface
pub fn start_daemon(interface: Option<&str>) -> Result<ServiceDaemon> {
    let daemon = ServiceDaemon::new().context("Failed to create mDNS daemon")?;

    if let Some(interface) = interface {
        daemon
            .disable_interface(IfKind::All)
            .context("Failed to disable default interfaces")?;
        daemon
            .enable_interface(interface)
            .with_context(|| format!("Failed to enable interface {}", interface))?;
        tracing::info!("mDNS restricted to interface {}", interface);
    }

    Ok(daemon)
}
