//! tinyq Circuit Representation
//!
//! This crate holds the data a tinyq circuit is made of: single-precision
//! [`Amplitude`]s, the primitive [`GateOperation`] encoding, the growable
//! [`CircuitBuffer`] and the [`QuantumCircuit`] builder on top of it.
//!
//! # Core Components
//!
//! - **Amplitudes**: [`Amplitude`], an 8-byte complex number
//! - **Gates**: [`GateKind`] for the primitives the evolution engine
//!   understands, [`CompositeGate`] for gates expanded into primitives
//! - **Buffer**: [`CircuitBuffer`] with a configurable [`GrowthPolicy`]
//! - **Circuit**: [`QuantumCircuit`] fluent builder with register validation
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use tinyq_ir::{GateKind, QuantumCircuit};
//!
//! let mut circuit = QuantumCircuit::new(2, 2).unwrap();
//! circuit.h(0).unwrap().cx(0, 1).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.len(), 4);
//! assert_eq!(circuit.operations()[1].kind, GateKind::ControlledX);
//! ```
//!
//! # Example: Validation Modes
//!
//! ```rust
//! use tinyq_ir::{CircuitConfig, IrError, QuantumCircuit};
//!
//! let mut strict = QuantumCircuit::new(1, 0).unwrap();
//! assert!(matches!(strict.x(3), Err(IrError::QubitOutOfRange { .. })));
//! assert!(strict.is_empty());
//!
//! let mut lenient = QuantumCircuit::with_config(1, 0, CircuitConfig::permissive()).unwrap();
//! lenient.x(3).unwrap();
//! assert_eq!(lenient.len(), 1);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Stored as |
//! |------|--------|-----------|
//! | `x`, `h` | 1 | itself |
//! | `rx`, `rz` | 1 | itself |
//! | `ry` | 1 | `rx(π/2)`, `rz(θ)`, `rx(-π/2)` |
//! | `y` | 1 | `rz(π)`, `x` |
//! | `z` | 1 | `rz(π)` |
//! | `t` | 1 | `rz(π/4)` |
//! | `cx`, `crx`, `crz` | 2 | itself |
//! | `swap` | 2 | itself |
//! | `measure` | 1 | itself (no state effect) |

pub mod amplitude;
pub mod buffer;
pub mod circuit;
pub mod error;
pub mod gate;

pub use amplitude::Amplitude;
pub use buffer::{CircuitBuffer, GrowthPolicy};
pub use circuit::{CircuitConfig, MAX_QUBITS, QuantumCircuit, ValidationMode};
pub use error::{IrError, IrResult};
pub use gate::{CompositeGate, GateKind, GateOperation};
