//! Statevector evolution engine.

use std::collections::BTreeMap;
use std::f32::consts::FRAC_1_SQRT_2;

use tinyq_ir::{Amplitude, GateKind, GateOperation, MAX_QUBITS};

use crate::error::{SimError, SimResult};

/// Scale applied by the Hadamard butterfly.
const HADAMARD_SCALE: f32 = FRAC_1_SQRT_2;

/// A statevector representing a quantum state.
///
/// Bit `j` of a basis index is the value of qubit `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Amplitude>,
    /// Number of qubits.
    num_qubits: usize,
    /// Operations applied so far.
    steps: usize,
}

impl Statevector {
    /// Allocate a statevector initialized to |0...0⟩.
    ///
    /// Allocation is fallible so a device that cannot hold the state gets
    /// an error instead of an abort.
    pub fn try_new(num_qubits: usize) -> SimResult<Self> {
        if num_qubits > MAX_QUBITS {
            return Err(SimError::CircuitTooLarge {
                num_qubits,
                max: MAX_QUBITS,
            });
        }

        let dimension = 1usize << num_qubits;
        let mut amplitudes = Vec::new();
        amplitudes
            .try_reserve_exact(dimension)
            .map_err(|source| SimError::AllocationFailed { num_qubits, source })?;
        amplitudes.resize(dimension, Amplitude::ZERO);
        if let Some(first) = amplitudes.first_mut() {
            *first = Amplitude::ONE;
        }

        Ok(Self {
            amplitudes,
            num_qubits,
            steps: 0,
        })
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes, 2^n.
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// Operations applied so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// All amplitudes in basis-index order.
    pub fn amplitudes(&self) -> &[Amplitude] {
        &self.amplitudes
    }

    /// The amplitude of one basis state.
    pub fn amplitude(&self, index: usize) -> Option<Amplitude> {
        self.amplitudes.get(index).copied()
    }

    /// |amp|² for every basis index.
    pub fn probabilities(&self) -> Vec<f32> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Probabilities keyed by bitstring, qubit n-1 leftmost.
    pub fn probabilities_by_bitstring(&self) -> BTreeMap<String, f32> {
        self.amplitudes
            .iter()
            .enumerate()
            .map(|(index, a)| (self.bitstring(index), a.norm_sqr()))
            .collect()
    }

    /// Sum of all probabilities; 1 for a valid state.
    pub fn norm_sqr(&self) -> f32 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Render a basis index as an n-character bitstring, qubit n-1 leftmost.
    pub fn bitstring(&self, index: usize) -> String {
        if self.num_qubits == 0 {
            return String::new();
        }
        format!("{:0width$b}", index, width = self.num_qubits)
    }

    /// Apply one operation in place.
    ///
    /// `Init` and `Measure` leave the amplitudes untouched. Operands of every
    /// other kind are checked against the register first; a failed check
    /// leaves the state unchanged.
    pub fn apply(&mut self, op: &GateOperation) -> SimResult<()> {
        self.check_operands(op)?;

        match op.kind {
            GateKind::Init | GateKind::Measure => {}
            GateKind::PauliX => self.apply_x(op.target),
            GateKind::Hadamard => self.apply_h(op.target),
            GateKind::RotateX => self.apply_rx(op.target, op.angle),
            GateKind::RotateZ => self.apply_rz(op.target, op.angle),
            GateKind::ControlledX => self.apply_cx(op.control, op.target),
            GateKind::ControlledRotateX => self.apply_crx(op.control, op.target, op.angle),
            GateKind::ControlledRotateZ => self.apply_crz(op.control, op.target, op.angle),
            GateKind::Swap => self.apply_swap(op.control, op.target),
        }

        self.steps += 1;
        Ok(())
    }

    fn check_operands(&self, op: &GateOperation) -> SimResult<()> {
        if matches!(op.kind, GateKind::Init | GateKind::Measure) {
            return Ok(());
        }

        let gate = op.kind.name();
        for qubit in op.qubits() {
            if qubit >= self.num_qubits {
                return Err(SimError::InvalidOperand {
                    step: self.steps,
                    gate,
                    qubit,
                    num_qubits: self.num_qubits,
                });
            }
        }
        if op.kind.num_qubits() == 2 && op.control == op.target {
            return Err(SimError::DuplicateOperand {
                step: self.steps,
                gate,
                qubit: op.target,
            });
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit gate implementations
    // =========================================================================

    /// Visit every amplitude pair that differs only in bit `qubit`.
    ///
    /// Pairs are `(b0, b1)` with `b0 = i0 + i1·2^(qubit+1)` and
    /// `b1 = b0 + 2^qubit`.
    fn for_each_pair(&mut self, qubit: usize, mut f: impl FnMut(&mut Amplitude, &mut Amplitude)) {
        let stride = 1 << qubit;
        for block in self.amplitudes.chunks_exact_mut(stride << 1) {
            let (low, high) = block.split_at_mut(stride);
            for (x, y) in low.iter_mut().zip(high) {
                f(x, y);
            }
        }
    }

    fn apply_x(&mut self, qubit: usize) {
        self.for_each_pair(qubit, std::mem::swap);
    }

    fn apply_h(&mut self, qubit: usize) {
        self.for_each_pair(qubit, |x, y| {
            let (a, b) = (*x, *y);
            *x = (a + b) * HADAMARD_SCALE;
            *y = (a - b) * HADAMARD_SCALE;
        });
    }

    fn apply_rx(&mut self, qubit: usize, theta: f32) {
        let mix = RotateX::new(theta);
        self.for_each_pair(qubit, |x, y| mix.apply(x, y));
    }

    fn apply_rz(&mut self, qubit: usize, theta: f32) {
        let mix = RotateZ::new(theta);
        self.for_each_pair(qubit, |x, y| mix.apply(x, y));
    }

    // =========================================================================
    // Two-qubit gate implementations
    // =========================================================================

    fn apply_cx(&mut self, control: usize, target: usize) {
        for [_, _, b10, b11] in quads(self.num_qubits, control, target) {
            self.amplitudes.swap(b10, b11);
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        for [_, b01, b10, _] in quads(self.num_qubits, q1, q2) {
            self.amplitudes.swap(b01, b10);
        }
    }

    fn apply_crx(&mut self, control: usize, target: usize, theta: f32) {
        let mix = RotateX::new(theta);
        for [_, _, b10, b11] in quads(self.num_qubits, control, target) {
            let (mut x, mut y) = (self.amplitudes[b10], self.amplitudes[b11]);
            mix.apply(&mut x, &mut y);
            self.amplitudes[b10] = x;
            self.amplitudes[b11] = y;
        }
    }

    fn apply_crz(&mut self, control: usize, target: usize, theta: f32) {
        let mix = RotateZ::new(theta);
        for [_, _, b10, b11] in quads(self.num_qubits, control, target) {
            let (mut x, mut y) = (self.amplitudes[b10], self.amplitudes[b11]);
            mix.apply(&mut x, &mut y);
            self.amplitudes[b10] = x;
            self.amplitudes[b11] = y;
        }
    }
}

/// Basis indices `[b00, b01, b10, b11]` for every assignment of the other
/// qubits, where the first digit is the control bit and the second the
/// target bit.
///
/// Operands must be distinct and below `num_qubits`.
fn quads(num_qubits: usize, control: usize, target: usize) -> impl Iterator<Item = [usize; 4]> {
    let (low, high) = (control.min(target), control.max(target));
    let below = 1usize << low;
    let between = 1usize << (high - low - 1);
    let above = 1usize << (num_qubits - high - 1);

    (0..above).flat_map(move |i2| {
        (0..between).flat_map(move |i1| {
            (0..below).map(move |i0| {
                let b00 = i0 + (i1 << (low + 1)) + (i2 << (high + 1));
                let b01 = b00 + (1 << target);
                let b10 = b00 + (1 << control);
                [b00, b01, b10, b10 + (1 << target)]
            })
        })
    })
}

/// Real-valued Rx mix with precomputed half-angle terms.
#[derive(Debug, Clone, Copy)]
struct RotateX {
    cos: f32,
    sin: f32,
}

impl RotateX {
    fn new(theta: f32) -> Self {
        let half = theta / 2.0;
        Self {
            cos: half.cos(),
            sin: half.sin(),
        }
    }

    #[inline]
    fn apply(self, x: &mut Amplitude, y: &mut Amplitude) {
        let (a, b) = (*x, *y);
        let (c, s) = (self.cos, self.sin);
        *x = Amplitude::new(a.real * c + b.imag * s, a.imag * c - b.real * s);
        *y = Amplitude::new(b.real * c + a.imag * s, b.imag * c - a.real * s);
    }
}

/// Rz phase turn: |0⟩ picks up e^{-iθ/2}, |1⟩ picks up e^{iθ/2}.
#[derive(Debug, Clone, Copy)]
struct RotateZ {
    cos: f32,
    sin_neg: f32,
    sin_pos: f32,
}

impl RotateZ {
    fn new(theta: f32) -> Self {
        let half = theta / 2.0;
        Self {
            cos: half.cos(),
            sin_neg: (-half).sin(),
            sin_pos: half.sin(),
        }
    }

    #[inline]
    fn apply(self, x: &mut Amplitude, y: &mut Amplitude) {
        let (a, b) = (*x, *y);
        let c = self.cos;
        *x = Amplitude::new(
            a.real * c - a.imag * self.sin_neg,
            a.imag * c + a.real * self.sin_neg,
        );
        *y = Amplitude::new(
            b.real * c - b.imag * self.sin_pos,
            b.imag * c + b.real * self.sin_pos,
        );
    }
}
