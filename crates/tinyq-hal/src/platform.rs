//! The collaborator bundle handed to the simulator.

use std::fmt;
use std::sync::Arc;

use crate::diagnostic::{Diagnostic, DiagnosticSink, NullSink, TracingSink};
use crate::halt::{AbortHalt, ExhaustionReport, FatalHalt};
use crate::memory::{MemoryProbe, UnboundedMemory};

/// Diagnostic sink, memory probe and fatal halt for one target.
///
/// Cloning is cheap; all collaborators are shared.
#[derive(Clone)]
pub struct Platform {
    sink: Arc<dyn DiagnosticSink>,
    memory: Arc<dyn MemoryProbe>,
    halt: Arc<dyn FatalHalt>,
}

impl Platform {
    /// Hosted defaults: diagnostics go to `tracing`, memory is unbounded,
    /// a halt aborts the process.
    pub fn hosted() -> Self {
        Self {
            sink: Arc::new(TracingSink),
            memory: Arc::new(UnboundedMemory),
            halt: Arc::new(AbortHalt),
        }
    }

    /// Like [`Platform::hosted`] but every diagnostic is dropped.
    pub fn silent() -> Self {
        Self {
            sink: Arc::new(NullSink),
            ..Self::hosted()
        }
    }

    /// Replace the diagnostic sink.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the memory probe.
    pub fn with_memory(mut self, memory: Arc<dyn MemoryProbe>) -> Self {
        self.memory = memory;
        self
    }

    /// Replace the fatal halt.
    pub fn with_halt(mut self, halt: Arc<dyn FatalHalt>) -> Self {
        self.halt = halt;
        self
    }

    /// The diagnostic sink.
    pub fn sink(&self) -> &Arc<dyn DiagnosticSink> {
        &self.sink
    }

    /// Forward a record to the sink.
    #[inline]
    pub fn emit(&self, diagnostic: &Diagnostic) {
        self.sink.emit(diagnostic);
    }

    /// Query the memory probe.
    #[inline]
    pub fn free_memory(&self) -> usize {
        self.memory.free_memory()
    }

    /// Stop for good.
    pub fn halt(&self, report: &ExhaustionReport) -> ! {
        self.halt.halt(report)
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::hosted()
    }
}

impl fmt::Debug for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Platform").finish_non_exhaustive()
    }
}
