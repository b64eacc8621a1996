//! Vitals Protocol
//!
//! The data model shared by every stage of the pipeline:
//!
//! - [`Record`] - the immutable, severity-tagged log entry that flows from
//!   producers through the queue to the sinks
//! - [`Policy`] - compile-time per-source thresholds ([`CpuPolicy`],
//!   [`GpuPolicy`], [`RamPolicy`])
//! - [`Classifier`] - turns a raw sample string into a [`Record`] by
//!   applying a policy
//!
//! # Example
//!
//! ```
//! use vitals_protocol::{Classifier, Context, CpuPolicy, Severity};
//!
//! let classifier = Classifier::<CpuPolicy>::new("demo");
//! let record = classifier.format("95.0").unwrap();
//!
//! assert_eq!(record.context(), Context::Cpu);
//! assert_eq!(record.severity(), Severity::Critical);
//! assert_eq!(record.payload(), 95);
//! ```

mod classifier;
mod policy;
mod record;

pub use classifier::{Classifier, parse_value};
pub use policy::{CpuPolicy, GpuPolicy, Policy, RamPolicy};
pub use record::{Context, MAX_PAYLOAD, Record, Severity};
