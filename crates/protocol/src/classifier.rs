//! Sample classification
//!
//! Maps a raw sample string onto a [`Record`] under a [`Policy`]. Parsing is
//! deliberately strict: the whole string must be a float, nothing is
//! trimmed. Sources are responsible for delivering clean numeric text; a
//! sample that fails to parse yields `None` and is dropped by the caller.

use std::marker::PhantomData;

use crate::policy::Policy;
use crate::record::Record;

/// Parse a raw sample as a float
///
/// Whole-string parsing: trailing garbage (including a stray newline) is a
/// failure, not a partial parse.
pub fn parse_value(raw: &str) -> Option<f32> {
    raw.parse::<f32>().ok()
}

/// Builds [`Record`]s from raw sample strings under a fixed policy
///
/// The policy is a type parameter, so each sampler thread carries a
/// classifier specialized for its source at compile time. Severity is
/// inferred from the *unrounded* parsed value; the payload is rounded and
/// saturated into a byte, then capped at 100 by the record constructor.
pub struct Classifier<P> {
    app_name: String,
    _policy: PhantomData<P>,
}

impl<P: Policy> Classifier<P> {
    /// Create a classifier that stamps records with `app_name`
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            _policy: PhantomData,
        }
    }

    /// Application name stamped on produced records
    #[inline]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Classify one raw sample
    ///
    /// Returns `None` when the sample is not numeric.
    pub fn format(&self, raw: &str) -> Option<Record> {
        let value = parse_value(raw)?;

        // Byte saturation first; the record caps the semantic range at 100.
        let payload = value.round().clamp(0.0, 255.0) as u8;
        let severity = P::infer_severity(value);

        Some(Record::with_severity(
            self.app_name.clone(),
            P::CONTEXT,
            severity,
            payload,
        ))
    }
}

#[cfg(test)]
#[path = "classifier_test.rs"]
mod classifier_test;
