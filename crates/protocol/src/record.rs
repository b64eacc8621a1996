//! Record - The immutable log entry
//!
//! A `Record` is produced once (by a sampler or classifier), moved into the
//! queue, and read many times by sinks. Its canonical text form is rendered
//! at construction and never changes afterwards.
//!
//! # Example Output
//!
//! ```text
//! [2026-08-02 14:31:07] [CPU] [vitals] [CRITICAL] Payload value is: 95%
//! ```

use chrono::{DateTime, Local};

/// Upper bound of the semantic payload range (percent).
pub const MAX_PAYLOAD: u8 = 100;

/// Telemetry source dimension a record was sampled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    /// Processor utilization
    Cpu,
    /// Graphics processor utilization
    Gpu,
    /// Memory utilization
    Ram,
}

impl Context {
    /// Canonical upper-case tag used in the record text
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Gpu => "GPU",
            Self::Ram => "RAM",
        }
    }
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record severity, ordered INFO < WARN < CRITICAL
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Normal operation
    Info,
    /// Elevated but tolerable
    Warn,
    /// Threshold exceeded
    Critical,
}

impl Severity {
    /// Canonical upper-case tag used in the record text
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable, severity-tagged telemetry log entry
///
/// Two construction paths exist, and both are part of the public contract:
///
/// - [`Record::new`] derives the severity from the payload with the fixed
///   default buckets (`<=25` INFO, `26..=74` WARN, `>=75` CRITICAL)
/// - [`Record::with_severity`] takes an explicit severity, which always
///   wins; this is the path the policy classifier uses
///
/// The payload is capped at [`MAX_PAYLOAD`] and the canonical `text` is
/// rendered once, at construction.
#[derive(Debug, Clone)]
pub struct Record {
    app_name: String,
    timestamp: DateTime<Local>,
    context: Context,
    severity: Severity,
    payload: u8,
    text: String,
}

impl Record {
    /// Create a record, deriving the severity from the payload
    pub fn new(app_name: impl Into<String>, context: Context, payload: u8) -> Self {
        let payload = payload.min(MAX_PAYLOAD);
        Self::build(app_name.into(), context, default_severity(payload), payload)
    }

    /// Create a record with an explicit severity
    ///
    /// The explicit severity takes precedence over the default buckets; the
    /// payload is still capped at [`MAX_PAYLOAD`].
    pub fn with_severity(
        app_name: impl Into<String>,
        context: Context,
        severity: Severity,
        payload: u8,
    ) -> Self {
        Self::build(app_name.into(), context, severity, payload.min(MAX_PAYLOAD))
    }

    fn build(app_name: String, context: Context, severity: Severity, payload: u8) -> Self {
        let timestamp = Local::now();
        let text = format!(
            "[{}] [{}] [{}] [{}] Payload value is: {}%",
            timestamp.format("%Y-%m-%d %H:%M:%S"),
            context,
            app_name,
            severity,
            payload
        );

        Self {
            app_name,
            timestamp,
            context,
            severity,
            payload,
            text,
        }
    }

    /// Name of the application that produced this record
    #[inline]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Wall-clock instant captured at construction
    #[inline]
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Telemetry source dimension
    #[inline]
    pub fn context(&self) -> Context {
        self.context
    }

    /// Severity tag
    #[inline]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Utilization percentage in `[0, 100]`
    #[inline]
    pub fn payload(&self) -> u8 {
        self.payload
    }

    /// Canonical human-readable form
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Default severity buckets applied by the payload-only constructor
fn default_severity(payload: u8) -> Severity {
    if payload <= 25 {
        Severity::Info
    } else if payload < 75 {
        Severity::Warn
    } else {
        Severity::Critical
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;
