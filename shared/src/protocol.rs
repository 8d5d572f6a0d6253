/// Domain suffix every DNS-SD service type lives under on the local link
pub const LOCAL_DOMAIN: &str = "local.";

/// Service types browsed when no configuration overrides the list.
/// Queried in this order, one at a time.
pub const DEFAULT_SERVICE_TYPES: &[&str] = &[
    "_http._tcp",
    "_https._tcp",
    "_ssh._tcp",
    "_sftp-ssh._tcp",
    "_smb._tcp",
    "_afpovertcp._tcp",
    "_nfs._tcp",
    "_ftp._tcp",
    "_webdav._tcp",
    "_ipp._tcp",
    "_ipps._tcp",
    "_printer._tcp",
    "_pdl-datastream._tcp",
    "_scanner._tcp",
    "_uscan._tcp",
    "_airplay._tcp",
    "_raop._tcp",
    "_googlecast._tcp",
    "_spotify-connect._tcp",
    "_daap._tcp",
    "_rfb._tcp",
    "_workstation._tcp",
    "_device-info._tcp",
    "_companion-link._tcp",
    "_hap._tcp",
    "_homekit._tcp",
    "_home-assistant._tcp",
    "_matter._tcp",
    "_mqtt._tcp",
    "_sleep-proxy._udp",
];

/// Qualify a service type for the mDNS daemon, e.g. "_http._tcp" -> "_http._tcp.local."
pub fn qualify_service_type(service_type: &str) -> String {
    let trimmed = service_type.trim().trim_end_matches('.');
    let suffix = LOCAL_DOMAIN.trim_end_matches('.');
    if trimmed.ends_with(&format!(".{}", suffix)) {
        format!("{}.", trimmed)
    } else {
        format!("{}.{}", trimmed, LOCAL_DOMAIN)
    }
}
