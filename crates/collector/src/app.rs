//! Telemetry application facade
//!
//! Wires the whole pipeline together from a [`Config`]: sinks from the
//! factory, the log manager from its builder, one sampler thread per
//! enabled source, and a signal-driven shutdown flag. Construction is
//! atomic - any sink or config problem aborts before a single thread
//! starts.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context as _, Result};
use signal_hook::consts::{SIGINT, SIGTERM};
use vitals_config::{Config, SourceConfig, SourceKind};
use vitals_pipeline::{LogManager, LogManagerBuilder};
use vitals_protocol::{Classifier, CpuPolicy, GpuPolicy, RamPolicy};
use vitals_sinks::{Sink, SinkSpec};
use vitals_sources::{FileSource, Sampler, SocketSource, Source};

/// How often the shutdown wait loop re-checks its flag
const SHUTDOWN_POLL: Duration = Duration::from_millis(100);

/// The assembled telemetry application
pub struct TelemetryApp {
    config: Config,
    manager: Arc<LogManager>,
    samplers: Vec<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
}

impl TelemetryApp {
    /// Build the pipeline from a validated config
    pub fn new(config: Config) -> Result<Self> {
        let sinks = build_sinks(&config)?;

        let mut builder = LogManagerBuilder::new()
            .app_name(&config.app_name)
            .buffer_capacity(config.buffer_size);
        if config.use_pool {
            builder = builder.worker_pool(config.pool_size);
        }
        for sink in sinks {
            builder = builder.sink(sink);
        }
        let manager = Arc::new(builder.build());

        tracing::info!(
            app = %config.app_name,
            buffer_size = config.buffer_size,
            use_pool = config.use_pool,
            sinks = manager.sink_count(),
            sources = config.sources.enabled_sources().len(),
            "telemetry app initialized"
        );

        Ok(Self {
            config,
            manager,
            samplers: Vec::new(),
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Start the pipeline and the sampler threads (non-blocking)
    pub fn start(&mut self) -> Result<()> {
        signal_hook::flag::register(SIGINT, Arc::clone(&self.shutdown))
            .context("failed to register SIGINT handler")?;
        signal_hook::flag::register(SIGTERM, Arc::clone(&self.shutdown))
            .context("failed to register SIGTERM handler")?;

        self.manager.start();
        self.spawn_samplers();

        tracing::info!(samplers = self.samplers.len(), "telemetry app started");
        Ok(())
    }

    fn spawn_samplers(&mut self) {
        let sources: Vec<(&str, SourceConfig)> = self
            .config
            .sources
            .iter()
            .filter(|(_, source)| source.enabled)
            .map(|(name, source)| (name, source.clone()))
            .collect();

        for (name, source_config) in sources {
            let source = build_source(&source_config);
            let interval = Duration::from_millis(source_config.poll_interval_ms);
            let app_name = self.config.app_name.clone();
            let manager = Arc::clone(&self.manager);
            let shutdown = Arc::clone(&self.shutdown);

            // Policies are types, so the dimension key picks the
            // monomorphized sampler.
            let handle = match name {
                "cpu" => Sampler::new(name, source, Classifier::<CpuPolicy>::new(app_name), interval)
                    .spawn(manager, shutdown),
                "gpu" => Sampler::new(name, source, Classifier::<GpuPolicy>::new(app_name), interval)
                    .spawn(manager, shutdown),
                _ => Sampler::new(name, source, Classifier::<RamPolicy>::new(app_name), interval)
                    .spawn(manager, shutdown),
            };
            self.samplers.push(handle);
        }
    }

    /// Block until SIGINT/SIGTERM arrives or the pipeline stops on its own
    pub fn wait_for_shutdown(&self) {
        while !self.shutdown.load(Ordering::Relaxed) && self.manager.is_running() {
            thread::sleep(SHUTDOWN_POLL);
        }
        tracing::info!("shutdown requested");
    }

    /// Stop everything: samplers first, then the pipeline
    ///
    /// Idempotent; also invoked on drop.
    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);

        for sampler in self.samplers.drain(..) {
            let _ = sampler.join();
        }
        self.manager.stop();
    }

    /// True while the pipeline accepts records
    pub fn is_running(&self) -> bool {
        self.manager.is_running()
    }

    /// The loaded configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The pipeline manager (for tests and metrics inspection)
    pub fn manager(&self) -> &LogManager {
        &self.manager
    }
}

impl Drop for TelemetryApp {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Translate the sink config into factory specs and build them
fn build_sinks(config: &Config) -> Result<Vec<Arc<dyn Sink>>> {
    let mut specs = Vec::new();

    if let Some(console) = &config.sinks.console
        && console.enabled
    {
        specs.push(SinkSpec::Console {
            color: console.color,
        });
    }
    if let Some(file) = &config.sinks.file
        && file.enabled
    {
        specs.push(SinkSpec::File {
            path: file.path.clone().into(),
        });
    }

    specs
        .iter()
        .map(|spec| vitals_sinks::create(spec).context("failed to create sink"))
        .collect()
}

/// Build the reader behind one source config
fn build_source(config: &SourceConfig) -> Box<dyn Source> {
    match config.kind {
        SourceKind::File => Box::new(FileSource::new(&config.path)),
        SourceKind::Socket => Box::new(SocketSource::new(config.addr.clone())),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn end_to_end_file_source_to_file_sink() {
        let dir = tempfile::tempdir().unwrap();
        let gauge = dir.path().join("cpu");
        let log = dir.path().join("vitals.log");
        std::fs::write(&gauge, "95\n").unwrap();

        let toml = format!(
            r#"
app_name = "smoke"
buffer_size = 16

[sinks.file]
path = "{}"

[sources.cpu]
path = "{}"
poll_interval_ms = 10
"#,
            log.display(),
            gauge.display()
        );
        let config = Config::from_str(&toml).unwrap();

        let mut app = TelemetryApp::new(config).unwrap();
        app.start().unwrap();
        thread::sleep(Duration::from_millis(150));
        app.stop();

        assert!(!app.is_running());

        let contents = std::fs::read_to_string(&log).unwrap();
        assert!(!contents.is_empty());
        for line in contents.lines() {
            assert!(line.contains("[CPU]"));
            assert!(line.contains("[smoke]"));
            assert!(line.contains("[CRITICAL]"));
            assert!(line.contains("Payload value is: 95%"));
        }
    }

    #[test]
    fn empty_sink_config_falls_back_to_console() {
        let config = Config::from_str("").unwrap();
        let app = TelemetryApp::new(config).unwrap();
        assert_eq!(app.manager().sink_count(), 1);
    }

    #[test]
    fn stop_is_idempotent() {
        let config = Config::from_str("").unwrap();
        let mut app = TelemetryApp::new(config).unwrap();

        app.start().unwrap();
        app.stop();
        app.stop();
        assert!(!app.is_running());
    }

    #[test]
    fn pool_mode_app_starts_and_stops_cleanly() {
        let config = Config::from_str("use_pool = true\npool_size = 2").unwrap();
        let mut app = TelemetryApp::new(config).unwrap();

        app.start().unwrap();
        assert!(app.is_running());
        app.stop();
        assert!(!app.is_running());
    }

    #[test]
    fn bad_file_sink_path_aborts_construction() {
        let dir = tempfile::tempdir().unwrap();
        // A directory is not a writable file target.
        let toml = format!("[sinks.file]\npath = \"{}\"", dir.path().display());
        let config = Config::from_str(&toml).unwrap();

        assert!(TelemetryApp::new(config).is_err());
    }
}
