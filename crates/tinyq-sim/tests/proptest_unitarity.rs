//! Property-based tests for the evolution kernels.
//!
//! Every primitive is unitary, so random circuits must keep the norm at one,
//! and the self-inverse gates must undo themselves.

use proptest::prelude::*;
use tinyq_hal::Platform;
use tinyq_ir::QuantumCircuit;
use tinyq_sim::{Simulator, SimulatorConfig, Statevector};

/// Gate operations that can be applied to a circuit.
#[derive(Debug, Clone)]
enum GateOp {
    H(usize),
    X(usize),
    Rx(f32, usize),
    Rz(f32, usize),
    Ry(f32, usize),
    Cx(usize, usize),
    Crx(f32, usize, usize),
    Crz(f32, usize, usize),
    Swap(usize, usize),
}

impl GateOp {
    fn apply(&self, circuit: &mut QuantumCircuit) {
        let _ = match *self {
            GateOp::H(q) => circuit.h(q),
            GateOp::X(q) => circuit.x(q),
            GateOp::Rx(t, q) => circuit.rx(t, q),
            GateOp::Rz(t, q) => circuit.rz(t, q),
            GateOp::Ry(t, q) => circuit.ry(t, q),
            GateOp::Cx(c, t) => circuit.cx(c, t),
            GateOp::Crx(a, c, t) => circuit.crx(a, c, t),
            GateOp::Crz(a, c, t) => circuit.crz(a, c, t),
            GateOp::Swap(a, b) => circuit.swap(a, b),
        };
    }
}

fn arb_pair(num_qubits: usize) -> impl Strategy<Value = (usize, usize)> {
    (0..num_qubits, 0..num_qubits).prop_filter("Control and target must differ", |(c, t)| c != t)
}

/// Generate a random gate operation for a circuit with given number of qubits.
fn arb_gate_op(num_qubits: usize) -> BoxedStrategy<GateOp> {
    let angle = -7.0_f32..7.0;
    let single = prop_oneof![
        (0..num_qubits).prop_map(GateOp::H),
        (0..num_qubits).prop_map(GateOp::X),
        (angle.clone(), 0..num_qubits).prop_map(|(t, q)| GateOp::Rx(t, q)),
        (angle.clone(), 0..num_qubits).prop_map(|(t, q)| GateOp::Rz(t, q)),
        (angle.clone(), 0..num_qubits).prop_map(|(t, q)| GateOp::Ry(t, q)),
    ];

    // For single-qubit circuits, only generate single-qubit gates
    if num_qubits < 2 {
        return single.boxed();
    }

    prop_oneof![
        3 => single,
        1 => arb_pair(num_qubits).prop_map(|(c, t)| GateOp::Cx(c, t)),
        1 => (angle.clone(), arb_pair(num_qubits)).prop_map(|(a, (c, t))| GateOp::Crx(a, c, t)),
        1 => (angle, arb_pair(num_qubits)).prop_map(|(a, (c, t))| GateOp::Crz(a, c, t)),
        1 => arb_pair(num_qubits).prop_map(|(a, b)| GateOp::Swap(a, b)),
    ]
    .boxed()
}

fn arb_circuit() -> impl Strategy<Value = QuantumCircuit> {
    (1_usize..=5).prop_flat_map(|num_qubits| {
        prop::collection::vec(arb_gate_op(num_qubits), 0..=30).prop_map(move |ops| {
            let mut circuit = QuantumCircuit::new(num_qubits, 0).unwrap();
            for op in &ops {
                op.apply(&mut circuit);
            }
            circuit
        })
    })
}

fn simulate(circuit: &QuantumCircuit) -> Statevector {
    Simulator::new(SimulatorConfig::default(), Platform::silent())
        .simulate(circuit)
        .unwrap()
}

proptest! {
    /// Random circuits keep the statevector normalized.
    #[test]
    fn test_norm_is_preserved(circuit in arb_circuit()) {
        let sv = simulate(&circuit);
        prop_assert!((sv.norm_sqr() - 1.0).abs() < 1e-3,
            "norm drifted to {} over {} operations", sv.norm_sqr(), circuit.len());
    }

    /// Probabilities are a distribution over 2^n outcomes.
    #[test]
    fn test_probabilities_sum_to_one(circuit in arb_circuit()) {
        let sv = simulate(&circuit);
        let by_bits = sv.probabilities_by_bitstring();
        prop_assert_eq!(by_bits.len(), 1 << circuit.num_qubits());
        prop_assert!(by_bits.keys().all(|k| k.len() == circuit.num_qubits()));
        let total: f32 = by_bits.values().sum();
        prop_assert!((total - 1.0).abs() < 1e-3);
    }

    /// X and H undo themselves on any state.
    #[test]
    fn test_self_inverse_gates(circuit in arb_circuit(), pick in any::<prop::sample::Index>()) {
        let qubit = pick.index(circuit.num_qubits());
        let reference = simulate(&circuit);

        let mut xx = circuit.clone();
        xx.x(qubit).unwrap().x(qubit).unwrap();
        let xx_sv = simulate(&xx);
        prop_assert_eq!(xx_sv.amplitudes(), reference.amplitudes());

        let mut hh = circuit.clone();
        hh.h(qubit).unwrap().h(qubit).unwrap();
        for (a, b) in simulate(&hh).amplitudes().iter().zip(reference.amplitudes()) {
            prop_assert!((*a - *b).magnitude() < 1e-4);
        }
    }

    /// Rx(θ) followed by Rx(-θ) is the identity.
    #[test]
    fn test_rotation_inverse(circuit in arb_circuit(), theta in -7.0_f32..7.0) {
        let reference = simulate(&circuit);

        let mut undone = circuit.clone();
        undone.rx(theta, 0).unwrap().rx(-theta, 0).unwrap();
        for (a, b) in simulate(&undone).amplitudes().iter().zip(reference.amplitudes()) {
            prop_assert!((*a - *b).magnitude() < 1e-4);
        }
    }
}
