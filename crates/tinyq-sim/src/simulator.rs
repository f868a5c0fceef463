//! Simulator front end: size check, evolution loop, snapshots, memory guard.

use std::time::Instant;

use tinyq_hal::{Diagnostic, Platform};
use tinyq_ir::{GateOperation, QuantumCircuit};
use tracing::{debug, instrument};

use crate::config::SimulatorConfig;
use crate::error::{SimError, SimResult};
use crate::guard::MemoryGuard;
use crate::statevector::Statevector;

/// Local statevector simulator.
///
/// Replays an operation list against |0...0⟩. After each operation the
/// statevector is optionally dumped to the diagnostic sink and the memory
/// guard runs; a tripped guard ends the run before the next operation.
#[derive(Debug, Clone)]
pub struct Simulator {
    /// Simulator configuration.
    config: SimulatorConfig,
    /// Sink, memory probe and halt.
    platform: Platform,
}

impl Simulator {
    /// Create a simulator.
    pub fn new(config: SimulatorConfig, platform: Platform) -> Self {
        Self { config, platform }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Get the platform.
    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Simulate a circuit's operations over its own register.
    pub fn simulate(&self, circuit: &QuantumCircuit) -> SimResult<Statevector> {
        self.simulate_operations(circuit.operations(), circuit.num_qubits())
    }

    /// Simulate `ops` on `num_qubits` qubits.
    #[instrument(skip(self, ops), fields(num_ops = ops.len()))]
    pub fn simulate_operations(
        &self,
        ops: &[GateOperation],
        num_qubits: usize,
    ) -> SimResult<Statevector> {
        if num_qubits > self.config.max_qubits {
            return Err(SimError::CircuitTooLarge {
                num_qubits,
                max: self.config.max_qubits,
            });
        }

        let start = Instant::now();
        debug!(
            "Starting simulation: {} qubits, {} operations",
            num_qubits,
            ops.len()
        );

        let mut sv = Statevector::try_new(num_qubits)?;
        let guard = MemoryGuard::new(
            &self.platform,
            self.config.memory_threshold,
            self.config.exhaustion,
        )
        .verbose(self.config.snapshots);

        for (step, op) in ops.iter().enumerate() {
            sv.apply(op)?;
            if self.config.snapshots {
                self.snapshot(&sv, step, op);
            }
            guard.check(step)?;
        }

        debug!("Simulation completed in {:?}", start.elapsed());
        Ok(sv)
    }

    fn snapshot(&self, sv: &Statevector, step: usize, op: &GateOperation) {
        self.platform.emit(&Diagnostic::Snapshot {
            step,
            gate: op.kind.name(),
        });
        for (basis, amp) in sv.amplitudes().iter().enumerate() {
            self.platform.emit(&Diagnostic::Amplitude {
                basis,
                width: sv.num_qubits(),
                real: amp.real,
                imag: amp.imag,
            });
        }
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(SimulatorConfig::default(), Platform::hosted())
    }
}
