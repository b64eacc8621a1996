//! Sink configuration

use serde::Deserialize;

/// Data sinks
///
/// Each section is optional; a section that is present is enabled unless
/// it says otherwise.
///
/// # Example
///
/// ```toml
/// [sinks.console]
/// color = false
///
/// [sinks.file]
/// path = "vitals.log"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SinksConfig {
    /// Severity-colored stdout sink
    pub console: Option<ConsoleSinkConfig>,

    /// Append-mode plaintext file sink
    pub file: Option<FileSinkConfig>,
}

impl SinksConfig {
    /// Names of the enabled sinks
    pub fn enabled_sinks(&self) -> Vec<&'static str> {
        let mut sinks = Vec::new();
        if self.console.as_ref().is_some_and(|c| c.enabled) {
            sinks.push("console");
        }
        if self.file.as_ref().is_some_and(|f| f.enabled) {
            sinks.push("file");
        }
        sinks
    }
}

/// Console sink configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleSinkConfig {
    /// Whether this sink is enabled
    pub enabled: bool,

    /// Enable ANSI colors
    pub color: bool,
}

impl Default for ConsoleSinkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            color: true,
        }
    }
}

/// File sink configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileSinkConfig {
    /// Whether this sink is enabled
    pub enabled: bool,

    /// Log file path (required when enabled)
    pub path: String,
}

impl Default for FileSinkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: String::new(),
        }
    }
}
