//! Gate encoding.
//!
//! Only [`GateKind`] values are ever stored in a circuit. [`CompositeGate`]s
//! are expanded into primitives when they are appended.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Primitive operations understood by the evolution engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// Marks the requested starting basis state.
    Init,
    /// Pauli-X (NOT).
    PauliX,
    /// Rotation around X.
    RotateX,
    /// Rotation around Z.
    RotateZ,
    /// Hadamard.
    Hadamard,
    /// Controlled-X (CNOT).
    ControlledX,
    /// Controlled rotation around X.
    ControlledRotateX,
    /// Controlled rotation around Z.
    ControlledRotateZ,
    /// SWAP.
    Swap,
    /// Measurement into a classical bit.
    Measure,
}

impl GateKind {
    /// Short mnemonic.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            GateKind::Init => "init",
            GateKind::PauliX => "x",
            GateKind::RotateX => "rx",
            GateKind::RotateZ => "rz",
            GateKind::Hadamard => "h",
            GateKind::ControlledX => "cx",
            GateKind::ControlledRotateX => "crx",
            GateKind::ControlledRotateZ => "crz",
            GateKind::Swap => "swap",
            GateKind::Measure => "m",
        }
    }

    /// Number of qubit operands.
    #[inline]
    pub fn num_qubits(self) -> usize {
        match self {
            GateKind::Init => 0,
            GateKind::PauliX
            | GateKind::RotateX
            | GateKind::RotateZ
            | GateKind::Hadamard
            | GateKind::Measure => 1,
            GateKind::ControlledX
            | GateKind::ControlledRotateX
            | GateKind::ControlledRotateZ
            | GateKind::Swap => 2,
        }
    }

    /// Whether the angle field is meaningful.
    #[inline]
    pub fn is_parameterized(self) -> bool {
        matches!(
            self,
            GateKind::RotateX
                | GateKind::RotateZ
                | GateKind::ControlledRotateX
                | GateKind::ControlledRotateZ
        )
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One stored operation.
///
/// Single-qubit gates leave `control` at zero. `Measure` reuses `control`
/// as the classical-bit index and `target` as the qubit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateOperation {
    /// Which primitive.
    pub kind: GateKind,
    /// Rotation angle in radians; zero for fixed gates.
    pub angle: f32,
    /// Control qubit, or classical bit for `Measure`.
    pub control: usize,
    /// Target qubit.
    pub target: usize,
}

impl GateOperation {
    /// Build a record from its fields.
    #[inline]
    pub const fn new(kind: GateKind, angle: f32, control: usize, target: usize) -> Self {
        Self {
            kind,
            angle,
            control,
            target,
        }
    }

    /// Fixed single-qubit gate.
    #[inline]
    pub const fn single(kind: GateKind, target: usize) -> Self {
        Self::new(kind, 0.0, 0, target)
    }

    /// Parameterized single-qubit gate.
    #[inline]
    pub const fn rotation(kind: GateKind, angle: f32, target: usize) -> Self {
        Self::new(kind, angle, 0, target)
    }

    /// Two-qubit gate.
    #[inline]
    pub const fn controlled(kind: GateKind, angle: f32, control: usize, target: usize) -> Self {
        Self::new(kind, angle, control, target)
    }

    /// Measurement of `qubit` into `clbit`.
    #[inline]
    pub const fn measure(qubit: usize, clbit: usize) -> Self {
        Self::new(GateKind::Measure, 0.0, clbit, qubit)
    }

    /// Start marker recording a basis index.
    #[inline]
    pub const fn init(basis_index: usize) -> Self {
        Self::new(GateKind::Init, 0.0, 0, basis_index)
    }

    /// Qubits this operation reads or writes.
    pub fn qubits(&self) -> impl Iterator<Item = usize> {
        let operands = match self.kind.num_qubits() {
            0 => [None, None],
            1 => [Some(self.target), None],
            _ => [Some(self.control), Some(self.target)],
        };
        operands.into_iter().flatten()
    }
}

impl fmt::Display for GateOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            GateKind::Init => write!(f, "init |{}>", self.target),
            GateKind::Measure => write!(f, "m q[{}] -> c[{}]", self.target, self.control),
            kind if kind.num_qubits() == 2 && kind.is_parameterized() => write!(
                f,
                "{kind}({}) q[{}], q[{}]",
                self.angle, self.control, self.target
            ),
            kind if kind.num_qubits() == 2 => {
                write!(f, "{kind} q[{}], q[{}]", self.control, self.target)
            }
            kind if kind.is_parameterized() => write!(f, "{kind}({}) q[{}]", self.angle, self.target),
            kind => write!(f, "{kind} q[{}]", self.target),
        }
    }
}

/// Gates built from a short fixed sequence of primitives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CompositeGate {
    /// Rotation around Y: `rx(π/2)`, `rz(θ)`, `rx(-π/2)`.
    RotateY(f32),
    /// Pauli-Z: `rz(π)`.
    PauliZ,
    /// Pauli-Y: `rz(π)`, `x`.
    PauliY,
    /// T gate: `rz(π/4)`.
    T,
}

impl CompositeGate {
    /// Short mnemonic.
    pub fn name(self) -> &'static str {
        match self {
            CompositeGate::RotateY(_) => "ry",
            CompositeGate::PauliZ => "z",
            CompositeGate::PauliY => "y",
            CompositeGate::T => "t",
        }
    }

    /// The primitive operations on `qubit`, in application order.
    pub fn expand(self, qubit: usize) -> impl Iterator<Item = GateOperation> {
        let ops: [Option<GateOperation>; 3] = match self {
            CompositeGate::RotateY(theta) => [
                Some(GateOperation::rotation(GateKind::RotateX, FRAC_PI_2, qubit)),
                Some(GateOperation::rotation(GateKind::RotateZ, theta, qubit)),
                Some(GateOperation::rotation(GateKind::RotateX, -FRAC_PI_2, qubit)),
            ],
            CompositeGate::PauliZ => [
                Some(GateOperation::rotation(GateKind::RotateZ, PI, qubit)),
                None,
                None,
            ],
            CompositeGate::PauliY => [
                Some(GateOperation::rotation(GateKind::RotateZ, PI, qubit)),
                Some(GateOperation::single(GateKind::PauliX, qubit)),
                None,
            ],
            CompositeGate::T => [
                Some(GateOperation::rotation(GateKind::RotateZ, FRAC_PI_4, qubit)),
                None,
                None,
            ],
        };
        ops.into_iter().flatten()
    }
}
