use std::net::IpAddr;
use std::time::Duration;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use mdns_sd::{ServiceDaemon, ServiceEvent, ServiceInfo};
use anyhow::{anyhow, Context, Result};
use shared::protocol::qualify_service_type;
use shared::types::RawService;
use crate::discovery::ServiceQuery;

/// One-shot browsing on top of the mdns-sd daemon: each query browses a
/// service type for a fixed window and then stops.
pub struct MdnsQuerier {
    daemon: ServiceDaemon,
    window: Duration,
}

impl MdnsQuerier {
    pub fn new(daemon: ServiceDaemon, window: Duration) -> Self {
        Self { daemon, window }
    }
}

#[async_trait]
impl ServiceQuery for MdnsQuerier {
    async fn query(
        &self,
        service_type: &str,
        sink: &flume::Sender<RawService>,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let ty_domain = qualify_service_type(service_type);
        let receiver = self
            .daemon
            .browse(&ty_domain)
            .with_context(|| format!("Failed to browse {}", ty_domain))?;

        let deadline = tokio::time::sleep(self.window);
        tokio::pin!(deadline);

        let outcome = loop {
            tokio::select! {
                _ = &mut deadline => break Ok(()),
                _ = cancel.cancelled() => break Ok(()),
                event = receiver.recv_async() => {
                    match event {
                        Ok(ServiceEvent::ServiceResolved(info)) => {
                            let raw = convert_service_info(&info);
                            tracing::debug!("Resolved service: {}", raw.advertised_name);
                            let sent = tokio::select! {
                                _ = cancel.cancelled() => false,
                                sent = sink.send_async(raw) => sent.is_ok(),
                            };
                            if !sent {
                                break Ok(());
                            }
                        }
                        Ok(_) => {}
                        Err(e) => {
                            break Err(anyhow!("mDNS daemon closed while browsing {}: {}", ty_domain, e));
                        }
                    }
                }
            }
        };

        if let Err(e) = self.daemon.stop_browse(&ty_domain) {
            tracing::warn!("Failed to stop browsing {}: {}", ty_domain, e);
        }

        outcome
    }
}

/// Convert an mdns-sd ServiceInfo into a raw discovery result
fn convert_service_info(info: &ServiceInfo) -> RawService {
    let addresses = info.get_addresses();

    let ipv4 = addresses
        .iter()
        .filter(|addr| addr.is_ipv4())
        .min()
        .map(IpAddr::to_string)
        .unwrap_or_default();

    let ipv6 = addresses
        .iter()
        .filter(|addr| addr.is_ipv6())
        .min()
        .map(IpAddr::to_string)
        .unwrap_or_default();

    let mut info_fields: Vec<String> = info
        .get_properties()
        .iter()
        .map(|prop| format!("{}={}", prop.key(), prop.val_str()))
        .collect();
    info_fields.sort();

    RawService {
        advertised_name: info.get_fullname().to_string(),
        host: info.get_hostname().to_string(),
        ipv4,
        ipv6,
        port: info.get_port(),
        info_text: info_fields.join("|"),
        info_fields,
    }
}
