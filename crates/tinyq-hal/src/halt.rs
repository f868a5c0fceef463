//! Irrecoverable stop on resource exhaustion.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::error;

/// What the memory guard saw when it tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhaustionReport {
    /// Zero-based index of the last operation that was applied.
    pub step: usize,
    /// Bytes reported by the memory probe.
    pub free_memory: usize,
    /// The configured minimum.
    pub threshold: usize,
}

impl fmt::Display for ExhaustionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "free memory {} below threshold {} after operation {}",
            self.free_memory, self.threshold, self.step
        )
    }
}

/// Capability to stop execution for good.
pub trait FatalHalt: Send + Sync {
    /// Stop. Must not return.
    fn halt(&self, report: &ExhaustionReport) -> !;
}

/// Logs the report and aborts the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbortHalt;

impl FatalHalt for AbortHalt {
    fn halt(&self, report: &ExhaustionReport) -> ! {
        error!("halting: {report}");
        std::process::abort()
    }
}

/// Panics with the report. Useful on hosted builds and in tests, where
/// unwinding is observable.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicHalt;

impl FatalHalt for PanicHalt {
    fn halt(&self, report: &ExhaustionReport) -> ! {
        panic!("halted: {report}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_display() {
        let report = ExhaustionReport {
            step: 3,
            free_memory: 42,
            threshold: 100,
        };
        assert_eq!(
            report.to_string(),
            "free memory 42 below threshold 100 after operation 3"
        );
    }

    #[test]
    #[should_panic(expected = "free memory 0 below threshold 1")]
    fn test_panic_halt() {
        PanicHalt.halt(&ExhaustionReport {
            step: 0,
            free_memory: 0,
            threshold: 1,
        });
    }
}
