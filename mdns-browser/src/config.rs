use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::Deserialize;
use anyhow::{Context, Result};
use shared::protocol::DEFAULT_SERVICE_TYPES;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    /// Queried in order, one at a time
    #[serde(default = "default_service_types")]
    pub service_types: Vec<String>,
    /// How long a single query collects responses before moving on
    #[serde(default = "default_query_timeout")]
    pub query_timeout_ms: u64,
    #[serde(default = "default_raw_buffer")]
    pub raw_buffer: usize,
    #[serde(default = "default_output_buffer")]
    pub output_buffer: usize,
    /// Restrict the mDNS daemon to one interface
    #[serde(default)]
    pub interface: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_tick")]
    pub tick_ms: u64,
    #[serde(default = "default_show_full_help")]
    pub show_full_help: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log destination. Logging is off without one, the terminal belongs to the UI.
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_service_types() -> Vec<String> {
    DEFAULT_SERVICE_TYPES.iter().map(|s| s.to_string()).collect()
}

fn default_query_timeout() -> u64 {
    1000
}

fn default_raw_buffer() -> usize {
    100
}

fn default_output_buffer() -> usize {
    10
}

fn default_title() -> String {
    "Found Services".to_string()
}

fn default_tick() -> u64 {
    100
}

fn default_show_full_help() -> bool {
    true
}

fn default_filter() -> String {
    "mdns_browser=info".to_string()
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            service_types: default_service_types(),
            query_timeout_ms: default_query_timeout(),
            raw_buffer: default_raw_buffer(),
            output_buffer: default_output_buffer(),
            interface: None,
        }
    }
}

impl DiscoveryConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            tick_ms: default_tick(),
            show_full_help: default_show_full_help(),
        }
    }
}

impl UiConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            filter: default_filter(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load from `path` when one was given, otherwise use the built-in defaults
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default().normalized()),
        }
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        Ok(config.normalized())
    }

    /// Channels need room for at least one item and the tick needs a period
    fn normalized(mut self) -> Self {
        self.discovery.raw_buffer = self.discovery.raw_buffer.max(1);
        self.discovery.output_buffer = self.discovery.output_buffer.max(1);
        self.ui.tick_ms = self.ui.tick_ms.max(1);
        self
    }
}
