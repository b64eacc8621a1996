//! Vitals Configuration
//!
//! TOML-based configuration loading with sensible defaults. A minimal
//! config should just work - only specify what you need to change.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use std::str::FromStr;
//! use vitals_config::Config;
//!
//! let config = Config::from_str("[sinks.console]\ncolor = false").unwrap();
//! assert_eq!(config.app_name, "vitals");
//! ```
//!
//! # Example Config
//!
//! ```toml
//! app_name = "vitals"
//! buffer_size = 128
//! use_pool = true
//! pool_size = 4
//!
//! [log]
//! level = "info"
//!
//! [sinks.console]
//!
//! [sinks.file]
//! path = "vitals.log"
//!
//! [sources.cpu]
//! path = "/proc/vitals/cpu"
//! poll_interval_ms = 500
//! ```

mod error;
mod logging;
mod sinks;
mod sources;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogLevel};
pub use sinks::{ConsoleSinkConfig, FileSinkConfig, SinksConfig};
pub use sources::{SourceConfig, SourceKind, SourcesConfig};

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Application name stamped on every record
    pub app_name: String,

    /// Record queue capacity
    pub buffer_size: usize,

    /// Dispatch sink writes through a worker pool
    pub use_pool: bool,

    /// Worker pool size (used iff `use_pool`)
    pub pool_size: usize,

    /// Logging configuration
    pub log: LogConfig,

    /// Data sinks (console, file)
    pub sinks: SinksConfig,

    /// Telemetry sources (cpu, gpu, ram)
    pub sources: SourcesConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "vitals".into(),
            buffer_size: 128,
            use_pool: false,
            pool_size: 4,
            log: LogConfig::default(),
            sinks: SinksConfig::default(),
            sources: SourcesConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML,
    /// or fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    ///
    /// Prefer using the `FromStr` trait implementation.
    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
