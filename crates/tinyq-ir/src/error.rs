//! Error types for the IR crate.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors that can occur while building a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// The register is wider than any statevector this crate will address.
    #[error("Circuit requests {requested} qubits but at most {max} are supported")]
    TooManyQubits {
        /// Requested number of qubits.
        requested: usize,
        /// Supported maximum.
        max: usize,
    },

    /// Classical register must be empty or match the quantum register.
    #[error("Only num_clbits = num_qubits or num_clbits = 0 are supported, got {num_qubits} qubits and {num_clbits} classical bits")]
    RegisterMismatch {
        /// Number of qubits.
        num_qubits: usize,
        /// Number of classical bits.
        num_clbits: usize,
    },

    /// Qubit index beyond the register.
    #[error("Index for qubit out of range: q[{qubit}] on a {num_qubits}-qubit circuit{}", format_gate_context(.gate))]
    QubitOutOfRange {
        /// The offending index.
        qubit: usize,
        /// Register size.
        num_qubits: usize,
        /// Gate mnemonic for context.
        gate: Option<&'static str>,
    },

    /// Classical bit index beyond the register.
    #[error("Index for output bit out of range: c[{clbit}] with {num_clbits} classical bits")]
    ClbitOutOfRange {
        /// The offending index.
        clbit: usize,
        /// Register size.
        num_clbits: usize,
    },

    /// Control and target are the same qubit.
    #[error("Duplicate qubit q[{qubit}] in operation{}", format_gate_context(.gate))]
    DuplicateQubit {
        /// The repeated index.
        qubit: usize,
        /// Gate mnemonic for context.
        gate: Option<&'static str>,
    },

    /// Basis index outside the statevector.
    #[error("Basis index {index} out of range for a statevector of length {dimension}")]
    BasisIndexOutOfRange {
        /// The offending index.
        index: usize,
        /// 2^num_qubits.
        dimension: usize,
    },

    /// The operation buffer could not grow.
    #[error("Operation buffer could not grow past {len} entries")]
    BufferExhausted {
        /// Entries held when growth failed.
        len: usize,
        /// Allocator failure.
        #[source]
        source: TryReserveError,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate: &Option<&'static str>) -> String {
    match gate {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
