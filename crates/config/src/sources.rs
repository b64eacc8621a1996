//! Source configuration

use serde::Deserialize;

/// Kind of telemetry source backing a sampler
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A file holding the current gauge value (default)
    #[default]
    File,
    /// A TCP endpoint streaming newline-delimited samples
    Socket,
}

/// Telemetry sources, keyed by dimension
///
/// # Example
///
/// ```toml
/// [sources.cpu]
/// path = "/proc/vitals/cpu"
/// poll_interval_ms = 500
///
/// [sources.ram]
/// kind = "socket"
/// addr = "127.0.0.1:9400"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// CPU utilization source
    pub cpu: Option<SourceConfig>,

    /// GPU utilization source
    pub gpu: Option<SourceConfig>,

    /// RAM utilization source
    pub ram: Option<SourceConfig>,
}

impl SourcesConfig {
    /// Iterate over the configured sources with their dimension keys
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &SourceConfig)> {
        [
            ("cpu", self.cpu.as_ref()),
            ("gpu", self.gpu.as_ref()),
            ("ram", self.ram.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, source)| source.map(|s| (name, s)))
    }

    /// Names of the enabled sources
    pub fn enabled_sources(&self) -> Vec<&'static str> {
        self.iter()
            .filter(|(_, source)| source.enabled)
            .map(|(name, _)| name)
            .collect()
    }
}

/// Configuration for a single telemetry source
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Whether this source is enabled
    pub enabled: bool,

    /// Kind of backing reader
    pub kind: SourceKind,

    /// File path (required for `kind = "file"`)
    pub path: String,

    /// TCP address (required for `kind = "socket"`)
    pub addr: String,

    /// Poll period in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            kind: SourceKind::File,
            path: String::new(),
            addr: String::new(),
            poll_interval_ms: 500,
        }
    }
}
