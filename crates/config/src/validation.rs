//! Configuration validation
//!
//! Structural checks that TOML typing cannot express: numeric bounds and
//! fields that become required once a component is enabled.

use crate::error::{ConfigError, Result};
use crate::sources::SourceKind;
use crate::Config;

pub(crate) fn validate_config(config: &Config) -> Result<()> {
    if config.buffer_size == 0 {
        return Err(ConfigError::invalid_value(
            "global",
            &config.app_name,
            "buffer_size",
            "must be at least 1",
        ));
    }

    if config.use_pool && config.pool_size == 0 {
        return Err(ConfigError::invalid_value(
            "global",
            &config.app_name,
            "pool_size",
            "must be at least 1 when use_pool is set",
        ));
    }

    for (name, source) in config.sources.iter() {
        if !source.enabled {
            continue;
        }

        if source.poll_interval_ms == 0 {
            return Err(ConfigError::invalid_value(
                "source",
                name,
                "poll_interval_ms",
                "must be at least 1",
            ));
        }

        match source.kind {
            SourceKind::File if source.path.is_empty() => {
                return Err(ConfigError::missing_field("source", name, "path"));
            }
            SourceKind::Socket if source.addr.is_empty() => {
                return Err(ConfigError::missing_field("source", name, "addr"));
            }
            _ => {}
        }
    }

    if let Some(file) = &config.sinks.file
        && file.enabled
        && file.path.is_empty()
    {
        return Err(ConfigError::missing_field("sink", "file", "path"));
    }

    Ok(())
}
