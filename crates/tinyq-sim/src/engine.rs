//! One-stop engine: a circuit, a simulator and the last statevector.

use std::sync::Arc;

use tinyq_hal::Platform;
use tinyq_ir::QuantumCircuit;

use crate::config::EngineConfig;
use crate::error::SimResult;
use crate::simulator::Simulator;
use crate::statevector::Statevector;

/// Owns a circuit under construction and the result of its last run.
///
/// Validation reports from the circuit and snapshots from the simulator go
/// to the same platform sink.
#[derive(Debug, Clone)]
pub struct QuantumEngine {
    circuit: QuantumCircuit,
    simulator: Simulator,
    statevector: Option<Statevector>,
}

impl QuantumEngine {
    /// Create an engine with default configuration on the hosted platform.
    pub fn new(num_qubits: usize, num_clbits: usize) -> SimResult<Self> {
        Self::with_config(
            num_qubits,
            num_clbits,
            EngineConfig::default(),
            Platform::hosted(),
        )
    }

    /// Create an engine with explicit configuration and platform.
    pub fn with_config(
        num_qubits: usize,
        num_clbits: usize,
        config: EngineConfig,
        platform: Platform,
    ) -> SimResult<Self> {
        let circuit = QuantumCircuit::with_sink(
            num_qubits,
            num_clbits,
            config.circuit,
            Arc::clone(platform.sink()),
        )?;

        Ok(Self {
            circuit,
            simulator: Simulator::new(config.simulator, platform),
            statevector: None,
        })
    }

    /// The circuit being built.
    pub fn circuit(&self) -> &QuantumCircuit {
        &self.circuit
    }

    /// The circuit being built, for appending gates.
    pub fn circuit_mut(&mut self) -> &mut QuantumCircuit {
        &mut self.circuit
    }

    /// The simulator runs go through.
    pub fn simulator(&self) -> &Simulator {
        &self.simulator
    }

    /// Replay this engine's circuit from |0...0⟩.
    pub fn simulate(&mut self) -> SimResult<&Statevector> {
        // Release the previous state before allocating the next one.
        self.statevector = None;
        let sv = self.simulator.simulate(&self.circuit)?;
        Ok(self.statevector.insert(sv))
    }

    /// Replay another circuit's operations over that circuit's register.
    pub fn simulate_circuit(&mut self, other: &QuantumCircuit) -> SimResult<&Statevector> {
        self.statevector = None;
        let sv = self.simulator.simulate(other)?;
        Ok(self.statevector.insert(sv))
    }

    /// The result of the last successful run.
    pub fn statevector(&self) -> Option<&Statevector> {
        self.statevector.as_ref()
    }
}
