//! tinyq Statevector Simulator
//!
//! Exact statevector evolution for circuits built with `tinyq-ir`, sized
//! for devices with kilobytes of RAM but equally usable on a host.
//!
//! # Features
//!
//! - **Exact Simulation**: full statevector, no sampling
//! - **Real-valued kernels**: pair and quad index decompositions with
//!   single-precision arithmetic
//! - **Memory Guard**: free-memory check after every operation, ending the
//!   run with an error or a platform halt
//! - **Snapshots**: optional per-operation statevector dump to the
//!   diagnostic sink
//!
//! # Memory
//!
//! | Qubits | Statevector |
//! |--------|-------------|
//! | 5 | 256 B |
//! | 10 | 8 KiB |
//! | 15 | 256 KiB |
//! | 20 | 8 MiB |
//!
//! # Example
//!
//! ```rust
//! use tinyq_sim::{Amplitude, QuantumEngine};
//!
//! let mut engine = QuantumEngine::new(2, 2).unwrap();
//! engine.circuit_mut().x(0).unwrap().cx(0, 1).unwrap();
//!
//! let sv = engine.simulate().unwrap();
//! assert_eq!(sv.amplitude(3), Some(Amplitude::ONE));
//! ```

mod config;
mod engine;
mod error;
mod guard;
mod simulator;
mod statevector;

pub use config::{EngineConfig, ExhaustionPolicy, SimulatorConfig};
pub use engine::QuantumEngine;
pub use error::{SimError, SimResult};
pub use guard::MemoryGuard;
pub use simulator::Simulator;
pub use statevector::Statevector;

pub use tinyq_hal::Platform;
pub use tinyq_ir::{Amplitude, GateKind, GateOperation, QuantumCircuit};
