//! Per-source severity policies
//!
//! Each telemetry source carries its thresholds as compile-time constants.
//! Threshold sanity (`0 < warning < critical <= 100`) is enforced with
//! `const` assertions, so an invalid policy fails the build rather than a
//! test run.

use crate::record::{Context, Severity};

/// Compile-time thresholds and classifier for one telemetry source
///
/// Implementors are zero-sized marker types; the classifier and samplers
/// select a policy purely through the type system, so there is no runtime
/// policy registry to keep in sync.
pub trait Policy {
    /// Source dimension this policy applies to
    const CONTEXT: Context;

    /// Unit suffix for diagnostics
    const UNIT: &'static str;

    /// Above this value (strictly) a sample is at least WARN
    const WARNING: f32;

    /// Above this value (strictly) a sample is CRITICAL
    const CRITICAL: f32;

    /// Map a raw sample value onto a severity
    ///
    /// Both comparisons are strict, so a value sitting exactly on a
    /// threshold lands in the lower bucket.
    fn infer_severity(value: f32) -> Severity {
        if value > Self::CRITICAL {
            Severity::Critical
        } else if value > Self::WARNING {
            Severity::Warn
        } else {
            Severity::Info
        }
    }

    /// Human-readable description of a sample, for diagnostics
    fn describe(value: f32) -> String {
        format!("{} usage at {:.1}{}", Self::CONTEXT, value, Self::UNIT)
    }
}

/// Processor utilization thresholds
pub struct CpuPolicy;

impl Policy for CpuPolicy {
    const CONTEXT: Context = Context::Cpu;
    const UNIT: &'static str = "%";
    const WARNING: f32 = 75.0;
    const CRITICAL: f32 = 90.0;
}

/// Graphics processor utilization thresholds
pub struct GpuPolicy;

impl Policy for GpuPolicy {
    const CONTEXT: Context = Context::Gpu;
    const UNIT: &'static str = "%";
    const WARNING: f32 = 80.0;
    const CRITICAL: f32 = 95.0;
}

/// Memory utilization thresholds
pub struct RamPolicy;

impl Policy for RamPolicy {
    const CONTEXT: Context = Context::Ram;
    const UNIT: &'static str = "%";
    const WARNING: f32 = 70.0;
    const CRITICAL: f32 = 85.0;
}

const fn thresholds_valid(warning: f32, critical: f32) -> bool {
    warning < critical && warning > 0.0 && critical <= 100.0
}

const _: () = assert!(
    thresholds_valid(CpuPolicy::WARNING, CpuPolicy::CRITICAL),
    "CpuPolicy has invalid thresholds"
);
const _: () = assert!(
    thresholds_valid(GpuPolicy::WARNING, GpuPolicy::CRITICAL),
    "GpuPolicy has invalid thresholds"
);
const _: () = assert!(
    thresholds_valid(RamPolicy::WARNING, RamPolicy::CRITICAL),
    "RamPolicy has invalid thresholds"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_policy_boundaries() {
        assert_eq!(CpuPolicy::infer_severity(75.0), Severity::Info);
        assert_eq!(CpuPolicy::infer_severity(75.1), Severity::Warn);
        assert_eq!(CpuPolicy::infer_severity(90.0), Severity::Warn);
        assert_eq!(CpuPolicy::infer_severity(90.1), Severity::Critical);
    }

    #[test]
    fn gpu_policy_boundaries() {
        assert_eq!(GpuPolicy::infer_severity(80.0), Severity::Info);
        assert_eq!(GpuPolicy::infer_severity(80.5), Severity::Warn);
        assert_eq!(GpuPolicy::infer_severity(95.0), Severity::Warn);
        assert_eq!(GpuPolicy::infer_severity(95.5), Severity::Critical);
    }

    #[test]
    fn ram_policy_boundaries() {
        assert_eq!(RamPolicy::infer_severity(70.0), Severity::Info);
        assert_eq!(RamPolicy::infer_severity(70.1), Severity::Warn);
        assert_eq!(RamPolicy::infer_severity(85.0), Severity::Warn);
        assert_eq!(RamPolicy::infer_severity(85.1), Severity::Critical);
    }

    #[test]
    fn negative_and_zero_values_are_info() {
        assert_eq!(CpuPolicy::infer_severity(0.0), Severity::Info);
        assert_eq!(CpuPolicy::infer_severity(-12.5), Severity::Info);
    }

    #[test]
    fn out_of_range_values_are_critical() {
        assert_eq!(CpuPolicy::infer_severity(100.0), Severity::Critical);
        assert_eq!(CpuPolicy::infer_severity(250.0), Severity::Critical);
    }

    #[test]
    fn severity_is_monotonic_in_value() {
        let mut last = Severity::Info;
        let mut value = -10.0f32;
        while value <= 120.0 {
            let severity = CpuPolicy::infer_severity(value);
            assert!(severity >= last, "severity regressed at {value}");
            last = severity;
            value += 0.25;
        }
    }

    #[test]
    fn describe_includes_context_and_unit() {
        let text = CpuPolicy::describe(42.5);
        assert_eq!(text, "CPU usage at 42.5%");

        let text = RamPolicy::describe(7.0);
        assert_eq!(text, "RAM usage at 7.0%");
    }
}
