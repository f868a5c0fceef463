//! Free-memory check run after every applied operation.

use tinyq_hal::{Diagnostic, ExhaustionReport, Platform};
use tracing::{error, warn};

use crate::config::ExhaustionPolicy;
use crate::error::{SimError, SimResult};

/// Compares the platform's free memory against a threshold.
#[derive(Debug, Clone, Copy)]
pub struct MemoryGuard<'a> {
    platform: &'a Platform,
    threshold: usize,
    policy: ExhaustionPolicy,
    verbose: bool,
}

impl<'a> MemoryGuard<'a> {
    /// Create a guard over `platform`.
    pub fn new(platform: &'a Platform, threshold: usize, policy: ExhaustionPolicy) -> Self {
        Self {
            platform,
            threshold,
            policy,
            verbose: false,
        }
    }

    /// Also report the free-memory reading on every check.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Check after operation `step` has been applied.
    ///
    /// Below the threshold a low-memory diagnostic is emitted, then the run
    /// either ends with [`SimError::ResourceExhausted`] or the platform halts.
    pub fn check(&self, step: usize) -> SimResult<()> {
        let free = self.platform.free_memory();
        if self.verbose {
            self.platform.emit(&Diagnostic::FreeMemory { bytes: free });
        }
        if free >= self.threshold {
            return Ok(());
        }

        self.platform.emit(&Diagnostic::LowMemory {
            free,
            threshold: self.threshold,
        });
        let report = ExhaustionReport {
            step,
            free_memory: free,
            threshold: self.threshold,
        };

        match self.policy {
            ExhaustionPolicy::ReturnError => {
                warn!("Stopping simulation: {report}");
                Err(SimError::ResourceExhausted(report))
            }
            ExhaustionPolicy::Halt => {
                error!("Halting simulation: {report}");
                self.platform.halt(&report)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tinyq_hal::{FixedMemory, PanicHalt, RecordingSink};

    fn platform(free: usize) -> (Platform, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let platform = Platform::silent()
            .with_sink(sink.clone())
            .with_memory(Arc::new(FixedMemory::new(free)))
            .with_halt(Arc::new(PanicHalt));
        (platform, sink)
    }

    #[test]
    fn test_enough_memory_passes_quietly() {
        let (platform, sink) = platform(4096);
        MemoryGuard::new(&platform, 100, ExhaustionPolicy::ReturnError)
            .check(0)
            .unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_verbose_reports_reading() {
        let (platform, sink) = platform(4096);
        MemoryGuard::new(&platform, 100, ExhaustionPolicy::ReturnError)
            .verbose(true)
            .check(0)
            .unwrap();
        assert_eq!(sink.records(), vec![Diagnostic::FreeMemory { bytes: 4096 }]);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let (platform, _) = platform(100);
        assert!(
            MemoryGuard::new(&platform, 100, ExhaustionPolicy::ReturnError)
                .check(0)
                .is_ok()
        );
    }

    #[test]
    fn test_low_memory_returns_report() {
        let (platform, sink) = platform(99);
        let err = MemoryGuard::new(&platform, 100, ExhaustionPolicy::ReturnError)
            .check(3)
            .unwrap_err();

        match err {
            SimError::ResourceExhausted(report) => {
                assert_eq!(report.step, 3);
                assert_eq!(report.free_memory, 99);
                assert_eq!(report.threshold, 100);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(
            sink.records(),
            vec![Diagnostic::LowMemory {
                free: 99,
                threshold: 100
            }]
        );
    }

    #[test]
    #[should_panic(expected = "halted")]
    fn test_halt_policy_halts() {
        let (platform, _) = platform(0);
        let _ = MemoryGuard::new(&platform, 100, ExhaustionPolicy::Halt).check(0);
    }
}
