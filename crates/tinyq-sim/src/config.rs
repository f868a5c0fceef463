//! Simulator and engine configuration.

use serde::{Deserialize, Serialize};
use tinyq_ir::CircuitConfig;

use crate::error::SimResult;

/// What the memory guard does once free memory drops below the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionPolicy {
    /// Stop and return [`SimError::ResourceExhausted`](crate::SimError::ResourceExhausted).
    #[default]
    ReturnError,
    /// Call the platform's fatal halt. Never returns.
    Halt,
}

/// Simulator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Widest circuit accepted.
    pub max_qubits: usize,
    /// Minimum free bytes after each operation.
    pub memory_threshold: usize,
    /// Reaction to a tripped memory guard.
    pub exhaustion: ExhaustionPolicy,
    /// Dump the statevector to the sink after every operation.
    pub snapshots: bool,
}

impl SimulatorConfig {
    /// Set the qubit limit.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Set the free-memory threshold.
    #[must_use]
    pub fn with_memory_threshold(mut self, bytes: usize) -> Self {
        self.memory_threshold = bytes;
        self
    }

    /// Set the exhaustion policy.
    #[must_use]
    pub fn with_exhaustion(mut self, policy: ExhaustionPolicy) -> Self {
        self.exhaustion = policy;
        self
    }

    /// Enable or disable per-operation snapshots.
    #[must_use]
    pub fn with_snapshots(mut self, enabled: bool) -> Self {
        self.snapshots = enabled;
        self
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: 20,
            memory_threshold: 100,
            exhaustion: ExhaustionPolicy::ReturnError,
            snapshots: false,
        }
    }
}

/// Everything a [`QuantumEngine`](crate::QuantumEngine) needs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Circuit construction settings.
    pub circuit: CircuitConfig,
    /// Simulation settings.
    pub simulator: SimulatorConfig,
}

impl EngineConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
