//! Line-oriented diagnostic records and the sinks that consume them.

use std::fmt;
use std::io::Write;
use std::sync::Mutex;

use serde::Serialize;
use tracing::{debug, error, trace, warn};

/// A single diagnostic record.
///
/// The `Display` implementation renders the console line a device would
/// print over its serial port.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub enum Diagnostic {
    /// A register size, operand or basis index violated the circuit's bounds.
    Validation {
        /// Human-readable description of the violation.
        message: String,
    },

    /// Header emitted before the amplitudes of a statevector snapshot.
    Snapshot {
        /// Zero-based index of the operation that was just applied.
        step: usize,
        /// Mnemonic of that operation.
        gate: &'static str,
    },

    /// One amplitude of a statevector snapshot.
    Amplitude {
        /// Basis index.
        basis: usize,
        /// Number of qubits, used as the bitstring width.
        width: usize,
        /// Real part.
        real: f32,
        /// Imaginary part.
        imag: f32,
    },

    /// Result of a free-memory query.
    FreeMemory {
        /// Bytes reported by the probe.
        bytes: usize,
    },

    /// Free memory fell under the configured threshold.
    LowMemory {
        /// Bytes reported by the probe.
        free: usize,
        /// The configured minimum.
        threshold: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Validation { message } => write!(f, "Error: {message}"),
            Diagnostic::Snapshot { step, gate } => {
                write!(f, "+++Statevector+++ step {step} ({gate})")
            }
            Diagnostic::Amplitude {
                basis,
                width,
                real,
                imag,
            } => write!(
                f,
                "Amplitude of state |{basis:0width$b}>: {real:.4} + {imag:.4}i",
                width = (*width).max(1)
            ),
            Diagnostic::FreeMemory { bytes } => write!(f, "Free memory: {bytes}"),
            Diagnostic::LowMemory { free, threshold } => write!(
                f,
                ":::::::Warning::::::: free memory {free} is below threshold {threshold}"
            ),
        }
    }
}

/// Consumer of diagnostic records.
///
/// Implementations must never be required for correctness: the simulator
/// produces identical results whether records are printed, logged or dropped.
pub trait DiagnosticSink: Send + Sync {
    /// Accept one record.
    fn emit(&self, diagnostic: &Diagnostic);
}

/// Sink that drops every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _diagnostic: &Diagnostic) {}
}

/// Sink that forwards records to `tracing`.
///
/// Validation reports are warnings, low memory is an error, the per-step
/// free-memory figure is debug output and snapshots are trace output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::Validation { .. } => warn!("{diagnostic}"),
            Diagnostic::LowMemory { .. } => error!("{diagnostic}"),
            Diagnostic::FreeMemory { .. } => debug!("{diagnostic}"),
            Diagnostic::Snapshot { .. } | Diagnostic::Amplitude { .. } => {
                trace!("{diagnostic}");
            }
        }
    }
}

/// Sink that prints one line per record to a writer.
///
/// Write errors are logged at debug level and otherwise ignored; a broken
/// console must not stop a simulation.
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl WriterSink<std::io::Stdout> {
    /// Sink printing to standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> DiagnosticSink for WriterSink<W> {
    fn emit(&self, diagnostic: &Diagnostic) {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Err(e) = writeln!(writer, "{diagnostic}") {
            debug!(error = %e, "dropped diagnostic line");
        }
    }
}

impl<W: Write + Send> fmt::Debug for WriterSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink").finish_non_exhaustive()
    }
}

/// Sink that keeps every record in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all records received so far, in order.
    pub fn records(&self) -> Vec<Diagnostic> {
        self.records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Number of records received so far.
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Whether no record has been received.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Count records matching a predicate.
    pub fn count(&self, predicate: impl Fn(&Diagnostic) -> bool) -> usize {
        self.records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .filter(|d| predicate(d))
            .count()
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(diagnostic.clone());
    }
}
