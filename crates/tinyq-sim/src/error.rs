//! Error types for the simulator crate.

use std::collections::TryReserveError;

use thiserror::Error;
use tinyq_hal::ExhaustionReport;
use tinyq_ir::IrError;

/// Errors that can occur while simulating a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Circuit is wider than the simulator accepts.
    #[error("Circuit has {num_qubits} qubits but simulator only supports {max}")]
    CircuitTooLarge {
        /// Qubits requested.
        num_qubits: usize,
        /// Configured limit.
        max: usize,
    },

    /// The statevector could not be allocated.
    #[error("Could not allocate a statevector for {num_qubits} qubits")]
    AllocationFailed {
        /// Qubits requested.
        num_qubits: usize,
        /// Allocator failure.
        #[source]
        source: TryReserveError,
    },

    /// An operation addresses a qubit outside the statevector.
    #[error("Operation {step} ({gate}) addresses q[{qubit}] on a {num_qubits}-qubit statevector")]
    InvalidOperand {
        /// Zero-based operation index.
        step: usize,
        /// Gate mnemonic.
        gate: &'static str,
        /// The offending index.
        qubit: usize,
        /// Statevector width.
        num_qubits: usize,
    },

    /// A two-qubit operation uses the same qubit twice.
    #[error("Operation {step} ({gate}) uses q[{qubit}] as both control and target")]
    DuplicateOperand {
        /// Zero-based operation index.
        step: usize,
        /// Gate mnemonic.
        gate: &'static str,
        /// The repeated index.
        qubit: usize,
    },

    /// The memory guard stopped the run.
    #[error("Resource exhausted: {0}")]
    ResourceExhausted(ExhaustionReport),

    /// Configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// Circuit construction failed.
    #[error(transparent)]
    Ir(#[from] IrError),
}

/// Result type for simulator operations.
pub type SimResult<T> = Result<T, SimError>;
