/// One raw result from a discovery query, before normalization.
/// This is the shape the discovery collaborator hands to the ingestion bridge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawService {
    /// Advertised instance name, possibly carrying DNS escape sequences
    /// such as `\032` for a space
    pub advertised_name: String,

    /// Hostname, e.g. "nas.local."
    pub host: String,

    /// IPv4 address in dotted form, empty when none was advertised
    pub ipv4: String,

    /// IPv6 address, empty when none was advertised
    pub ipv6: String,

    pub port: u16,

    /// TXT record data flattened into one line
    pub info_text: String,

    /// TXT record entries, one per attribute
    pub info_fields: Vec<String>,
}

/// A discovered service instance as the display knows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceRecord {
    /// Decoded instance name; may be empty
    pub name: String,

    /// Hostname, shown when the name is blank
    pub host: String,

    pub address_v4: String,
    pub address_v6: String,

    /// Service port, 0 when absent
    pub port: u16,

    pub info_text: String,
    pub info_fields: Vec<String>,

    /// Columns allotted to the list pane. Set by the layout, never by discovery.
    pub list_width: usize,

    /// Columns allotted to the detail pane. Set by the layout, never by discovery.
    pub detail_width: usize,
}

impl ServiceRecord {
    /// The identifier shown for this record: its name, or the host when the
    /// name is blank.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.host
        } else {
            &self.name
        }
    }

    /// Whether `other` refers to the same service, comparing names case-insensitively.
    pub fn same_name(&self, other: &ServiceRecord) -> bool {
        let fold = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
        fold(&self.name) == fold(&other.name)
    }
}
