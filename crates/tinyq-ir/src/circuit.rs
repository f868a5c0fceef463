//! High-level circuit builder API.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tinyq_hal::{Diagnostic, DiagnosticSink, TracingSink};

use crate::buffer::{CircuitBuffer, GrowthPolicy};
use crate::error::{IrError, IrResult};
use crate::gate::{CompositeGate, GateKind, GateOperation};

/// Widest register a circuit accepts. 2^24 amplitudes is 128 MiB.
pub const MAX_QUBITS: usize = 24;

/// What to do with an operation that violates the register bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Report the violation and refuse the operation.
    #[default]
    Strict,
    /// Report the violation and append the operation anyway.
    Permissive,
}

/// Construction-time settings of a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitConfig {
    /// Violation handling.
    pub validation: ValidationMode,
    /// Slots preallocated in the operation buffer.
    pub initial_capacity: usize,
    /// Buffer growth once the preallocated slots are used up.
    pub growth: GrowthPolicy,
}

impl CircuitConfig {
    /// Default settings with permissive validation.
    pub fn permissive() -> Self {
        Self {
            validation: ValidationMode::Permissive,
            ..Self::default()
        }
    }
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            validation: ValidationMode::Strict,
            initial_capacity: 10,
            growth: GrowthPolicy::default(),
        }
    }
}

/// A quantum circuit over a fixed register.
///
/// Every gate method validates its operands, reports violations to the
/// diagnostic sink and then, depending on [`ValidationMode`], either
/// refuses the gate or appends it. Composite gates are validated once and
/// then expanded, so a refused composite leaves the circuit untouched.
#[derive(Clone)]
pub struct QuantumCircuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: usize,
    /// Number of classical bits.
    num_clbits: usize,
    /// Stored primitive operations.
    buffer: CircuitBuffer,
    /// Construction-time settings.
    config: CircuitConfig,
    /// Where validation reports go.
    sink: Arc<dyn DiagnosticSink>,
}

impl QuantumCircuit {
    /// Create a circuit with default settings, reporting through `tracing`.
    pub fn new(num_qubits: usize, num_clbits: usize) -> IrResult<Self> {
        Self::with_config(num_qubits, num_clbits, CircuitConfig::default())
    }

    /// Create a circuit with explicit settings, reporting through `tracing`.
    pub fn with_config(
        num_qubits: usize,
        num_clbits: usize,
        config: CircuitConfig,
    ) -> IrResult<Self> {
        Self::with_sink(num_qubits, num_clbits, config, Arc::new(TracingSink))
    }

    /// Create a circuit with explicit settings and diagnostic sink.
    pub fn with_sink(
        num_qubits: usize,
        num_clbits: usize,
        config: CircuitConfig,
        sink: Arc<dyn DiagnosticSink>,
    ) -> IrResult<Self> {
        if num_qubits > MAX_QUBITS {
            let err = IrError::TooManyQubits {
                requested: num_qubits,
                max: MAX_QUBITS,
            };
            sink.emit(&Diagnostic::Validation {
                message: err.to_string(),
            });
            return Err(err);
        }

        let circuit = Self {
            name: String::new(),
            num_qubits,
            num_clbits,
            buffer: CircuitBuffer::with_capacity(config.initial_capacity, config.growth)?,
            config,
            sink,
        };

        circuit.admit(Self::register_mismatch(num_qubits, num_clbits))?;

        Ok(circuit)
    }

    /// Set the circuit name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    // =========================================================================
    // Initialisation
    // =========================================================================

    /// Clear the circuit and record the starting basis state.
    ///
    /// Only the last index is kept, and simulation always starts from
    /// |0…0⟩ regardless; the record is a marker.
    pub fn initialise(&mut self, basis_indices: &[usize]) -> IrResult<&mut Self> {
        self.admit(
            basis_indices
                .iter()
                .filter_map(|&index| self.basis_violation(index)),
        )?;

        self.buffer.clear();
        let last = basis_indices.last().copied().unwrap_or(0);
        self.buffer.push(GateOperation::init(last))?;
        Ok(self)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: usize) -> IrResult<&mut Self> {
        self.append(GateOperation::single(GateKind::PauliX, qubit))
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: usize) -> IrResult<&mut Self> {
        self.append(GateOperation::single(GateKind::Hadamard, qubit))
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f32, qubit: usize) -> IrResult<&mut Self> {
        self.append(GateOperation::rotation(GateKind::RotateX, theta, qubit))
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f32, qubit: usize) -> IrResult<&mut Self> {
        self.append(GateOperation::rotation(GateKind::RotateZ, theta, qubit))
    }

    /// Apply Ry rotation gate as `rx(π/2)`, `rz(θ)`, `rx(-π/2)`.
    pub fn ry(&mut self, theta: f32, qubit: usize) -> IrResult<&mut Self> {
        self.append_composite(CompositeGate::RotateY(theta), qubit)
    }

    /// Apply Pauli-Y gate as `rz(π)`, `x`.
    pub fn y(&mut self, qubit: usize) -> IrResult<&mut Self> {
        self.append_composite(CompositeGate::PauliY, qubit)
    }

    /// Apply Pauli-Z gate as `rz(π)`.
    pub fn z(&mut self, qubit: usize) -> IrResult<&mut Self> {
        self.append_composite(CompositeGate::PauliZ, qubit)
    }

    /// Apply T gate as `rz(π/4)`.
    pub fn t(&mut self, qubit: usize) -> IrResult<&mut Self> {
        self.append_composite(CompositeGate::T, qubit)
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT gate.
    pub fn cx(&mut self, control: usize, target: usize) -> IrResult<&mut Self> {
        self.append(GateOperation::controlled(
            GateKind::ControlledX,
            0.0,
            control,
            target,
        ))
    }

    /// Apply controlled Rx gate.
    pub fn crx(&mut self, theta: f32, control: usize, target: usize) -> IrResult<&mut Self> {
        self.append(GateOperation::controlled(
            GateKind::ControlledRotateX,
            theta,
            control,
            target,
        ))
    }

    /// Apply controlled Rz gate.
    pub fn crz(&mut self, theta: f32, control: usize, target: usize) -> IrResult<&mut Self> {
        self.append(GateOperation::controlled(
            GateKind::ControlledRotateZ,
            theta,
            control,
            target,
        ))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: usize, q2: usize) -> IrResult<&mut Self> {
        self.append(GateOperation::controlled(GateKind::Swap, 0.0, q1, q2))
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Measure `qubit` into `clbit`.
    pub fn measure(&mut self, qubit: usize, clbit: usize) -> IrResult<&mut Self> {
        self.append(GateOperation::measure(qubit, clbit))
    }

    /// Measure every qubit into the classical bit of the same index.
    ///
    /// A circuit created without classical bits gets one per qubit. Every
    /// pair is validated before the first measurement is appended.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        let num_clbits = if self.num_clbits == 0 {
            self.num_qubits
        } else {
            self.num_clbits
        };
        self.admit((num_clbits..self.num_qubits).map(|clbit| IrError::ClbitOutOfRange {
            clbit,
            num_clbits,
        }))?;

        self.num_clbits = num_clbits;
        for q in 0..self.num_qubits {
            self.buffer.push(GateOperation::measure(q, q))?;
        }
        Ok(self)
    }

    // =========================================================================
    // Generic append
    // =========================================================================

    /// Validate and append one primitive operation.
    pub fn append(&mut self, op: GateOperation) -> IrResult<&mut Self> {
        let gate = Some(op.kind.name());
        match op.kind {
            GateKind::Init => self.admit(self.basis_violation(op.target))?,
            GateKind::Measure => self.admit(
                [
                    self.qubit_violation(op.target, gate),
                    self.clbit_violation(op.control),
                ]
                .into_iter()
                .flatten(),
            )?,
            kind if kind.num_qubits() == 1 => self.admit(self.qubit_violation(op.target, gate))?,
            _ => self.admit(self.pair_violations(op.control, op.target, gate))?,
        }
        self.buffer.push(op)?;
        Ok(self)
    }

    /// Validate a composite gate once, then append its primitives.
    pub fn append_composite(&mut self, gate: CompositeGate, qubit: usize) -> IrResult<&mut Self> {
        self.admit(self.qubit_violation(qubit, Some(gate.name())))?;
        for op in gate.expand(qubit) {
            self.buffer.push(op)?;
        }
        Ok(self)
    }

    /// A new circuit running this circuit's operations followed by `other`'s.
    ///
    /// The register is as wide as the wider of the two; name, settings and
    /// sink come from `self`.
    pub fn compose(&self, other: &QuantumCircuit) -> IrResult<Self> {
        let mut buffer = CircuitBuffer::with_capacity(
            self.len() + other.len(),
            self.config.growth,
        )?;
        buffer.extend_from_slice(self.operations())?;
        buffer.extend_from_slice(other.operations())?;

        let num_qubits = self.num_qubits.max(other.num_qubits);
        let num_clbits = self.num_clbits.max(other.num_clbits);
        let composed = Self {
            name: self.name.clone(),
            num_qubits,
            num_clbits,
            buffer,
            config: self.config.clone(),
            sink: Arc::clone(&self.sink),
        };
        composed.admit(Self::register_mismatch(num_qubits, num_clbits))?;

        Ok(composed)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    /// Stored operations in append order.
    pub fn operations(&self) -> &[GateOperation] {
        self.buffer.as_slice()
    }

    /// The underlying buffer.
    pub fn buffer(&self) -> &CircuitBuffer {
        &self.buffer
    }

    /// Number of stored operations.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether no operation is stored.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Allocated operation slots.
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Construction-time settings.
    pub fn config(&self) -> &CircuitConfig {
        &self.config
    }

    /// The diagnostic sink validation reports go to.
    pub fn sink(&self) -> &Arc<dyn DiagnosticSink> {
        &self.sink
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell state circuit.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::new(2, 2)?.with_name("bell");
        circuit.h(0)?.cx(0, 1)?.measure_all()?;
        Ok(circuit)
    }

    /// Create a GHZ state circuit.
    pub fn ghz(n: usize) -> IrResult<Self> {
        let mut circuit = Self::new(n, n)?.with_name("ghz");
        if n == 0 {
            return Ok(circuit);
        }

        circuit.h(0)?;
        for i in 0..n - 1 {
            circuit.cx(i, i + 1)?;
        }
        circuit.measure_all()?;

        Ok(circuit)
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Report every violation; in strict mode fail with the first one.
    fn admit(&self, violations: impl IntoIterator<Item = IrError>) -> IrResult<()> {
        let mut first = None;
        for violation in violations {
            self.sink.emit(&Diagnostic::Validation {
                message: violation.to_string(),
            });
            if first.is_none() {
                first = Some(violation);
            }
        }

        match (first, self.config.validation) {
            (Some(err), ValidationMode::Strict) => Err(err),
            _ => Ok(()),
        }
    }

    fn register_mismatch(num_qubits: usize, num_clbits: usize) -> Option<IrError> {
        (num_clbits != 0 && num_clbits != num_qubits).then_some(IrError::RegisterMismatch {
            num_qubits,
            num_clbits,
        })
    }

    fn qubit_violation(&self, qubit: usize, gate: Option<&'static str>) -> Option<IrError> {
        (qubit >= self.num_qubits).then_some(IrError::QubitOutOfRange {
            qubit,
            num_qubits: self.num_qubits,
            gate,
        })
    }

    fn clbit_violation(&self, clbit: usize) -> Option<IrError> {
        (clbit >= self.num_clbits).then_some(IrError::ClbitOutOfRange {
            clbit,
            num_clbits: self.num_clbits,
        })
    }

    fn basis_violation(&self, index: usize) -> Option<IrError> {
        let dimension = 1usize << self.num_qubits;
        (index >= dimension).then_some(IrError::BasisIndexOutOfRange { index, dimension })
    }

    fn pair_violations(
        &self,
        control: usize,
        target: usize,
        gate: Option<&'static str>,
    ) -> impl Iterator<Item = IrError> {
        let duplicate =
            (control == target).then_some(IrError::DuplicateQubit { qubit: target, gate });
        [
            self.qubit_violation(control, gate),
            self.qubit_violation(target, gate),
            duplicate,
        ]
        .into_iter()
        .flatten()
    }
}

impl fmt::Debug for QuantumCircuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuantumCircuit")
            .field("name", &self.name)
            .field("num_qubits", &self.num_qubits)
            .field("num_clbits", &self.num_clbits)
            .field("operations", &self.buffer.as_slice())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
