//! Property-based tests for the operation buffer and circuit builder.
//!
//! Appends must keep their order under every growth policy, and strict
//! validation must never store an operation it reported.

use std::sync::Arc;

use proptest::prelude::*;
use tinyq_hal::RecordingSink;
use tinyq_ir::{
    CircuitBuffer, CircuitConfig, GateKind, GateOperation, GrowthPolicy, QuantumCircuit,
    ValidationMode,
};

/// Gate requests a caller can make, possibly out of range.
#[derive(Debug, Clone)]
enum GateOp {
    X(usize),
    H(usize),
    Rx(f32, usize),
    Ry(f32, usize),
    Cx(usize, usize),
    Swap(usize, usize),
}

impl GateOp {
    fn apply(&self, circuit: &mut QuantumCircuit) -> bool {
        let result = match *self {
            GateOp::X(q) => circuit.x(q).map(|_| ()),
            GateOp::H(q) => circuit.h(q).map(|_| ()),
            GateOp::Rx(theta, q) => circuit.rx(theta, q).map(|_| ()),
            GateOp::Ry(theta, q) => circuit.ry(theta, q).map(|_| ()),
            GateOp::Cx(c, t) => circuit.cx(c, t).map(|_| ()),
            GateOp::Swap(a, b) => circuit.swap(a, b).map(|_| ()),
        };
        result.is_ok()
    }

    /// Stored operations this request expands to.
    fn stored_len(&self) -> usize {
        match self {
            GateOp::Ry(..) => 3,
            _ => 1,
        }
    }

    fn is_valid(&self, num_qubits: usize) -> bool {
        match *self {
            GateOp::X(q) | GateOp::H(q) | GateOp::Rx(_, q) | GateOp::Ry(_, q) => q < num_qubits,
            GateOp::Cx(a, b) | GateOp::Swap(a, b) => a < num_qubits && b < num_qubits && a != b,
        }
    }
}

/// Indices range one past the register so some requests are invalid.
fn arb_gate_op(num_qubits: usize) -> impl Strategy<Value = GateOp> {
    let q = 0..=num_qubits;
    let angle = -6.3_f32..6.3;
    prop_oneof![
        q.clone().prop_map(GateOp::X),
        q.clone().prop_map(GateOp::H),
        (angle.clone(), q.clone()).prop_map(|(a, q)| GateOp::Rx(a, q)),
        (angle, q.clone()).prop_map(|(a, q)| GateOp::Ry(a, q)),
        (q.clone(), q.clone()).prop_map(|(c, t)| GateOp::Cx(c, t)),
        (q.clone(), q).prop_map(|(a, b)| GateOp::Swap(a, b)),
    ]
}

fn arb_growth() -> impl Strategy<Value = GrowthPolicy> {
    prop_oneof![
        (0_usize..4).prop_map(|step| GrowthPolicy::Increment { step }),
        Just(GrowthPolicy::Amortized),
    ]
}

proptest! {
    /// Pushing past the initial capacity keeps every operation in order.
    #[test]
    fn test_buffer_preserves_order(
        growth in arb_growth(),
        initial in 0_usize..4,
        targets in prop::collection::vec(0_usize..8, 50..120),
    ) {
        let mut buffer = CircuitBuffer::with_capacity(initial, growth).unwrap();
        for &t in &targets {
            buffer.push(GateOperation::single(GateKind::Hadamard, t)).unwrap();
        }

        prop_assert_eq!(buffer.len(), targets.len());
        prop_assert!(buffer.capacity() >= targets.len());
        let stored: Vec<_> = buffer.iter().map(|op| op.target).collect();
        prop_assert_eq!(stored, targets);
    }

    /// Strict circuits store exactly the valid requests and report the rest.
    #[test]
    fn test_strict_stores_only_valid(
        (num_qubits, ops) in (1_usize..5).prop_flat_map(|n| {
            (Just(n), prop::collection::vec(arb_gate_op(n), 1..40))
        })
    ) {
        let sink = Arc::new(RecordingSink::new());
        let mut circuit = QuantumCircuit::with_sink(
            num_qubits, 0, CircuitConfig::default(), sink.clone(),
        ).unwrap();

        let mut expected_len = 0;
        for op in &ops {
            let accepted = op.apply(&mut circuit);
            prop_assert_eq!(accepted, op.is_valid(num_qubits));
            if accepted {
                expected_len += op.stored_len();
            }
        }

        prop_assert_eq!(circuit.len(), expected_len);
        let rejected = ops.iter().filter(|op| !op.is_valid(num_qubits)).count();
        prop_assert!(sink.len() >= rejected);
        for op in circuit.operations() {
            for q in op.qubits() {
                prop_assert!(q < num_qubits);
            }
        }
    }

    /// Permissive circuits store every request and report each invalid one.
    #[test]
    fn test_permissive_stores_everything(
        (num_qubits, ops) in (1_usize..5).prop_flat_map(|n| {
            (Just(n), prop::collection::vec(arb_gate_op(n), 1..40))
        })
    ) {
        let sink = Arc::new(RecordingSink::new());
        let config = CircuitConfig {
            validation: ValidationMode::Permissive,
            growth: GrowthPolicy::Increment { step: 1 },
            ..CircuitConfig::default()
        };
        let mut circuit = QuantumCircuit::with_sink(num_qubits, 0, config, sink.clone()).unwrap();

        for op in &ops {
            prop_assert!(op.apply(&mut circuit));
        }

        let expected: usize = ops.iter().map(GateOp::stored_len).sum();
        prop_assert_eq!(circuit.len(), expected);
        let rejected = ops.iter().filter(|op| !op.is_valid(num_qubits)).count();
        prop_assert!(sink.len() >= rejected);
    }
}
