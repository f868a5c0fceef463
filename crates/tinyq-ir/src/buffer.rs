//! Append-only operation storage with predictable growth.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IrError, IrResult};
use crate::gate::GateOperation;

/// How the buffer grows once it is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GrowthPolicy {
    /// Reserve exactly `step` more slots. Keeps the footprint predictable on
    /// small heaps at the cost of more reallocations.
    Increment {
        /// Slots added per growth; zero is treated as one.
        step: usize,
    },
    /// Let the allocator pick (amortized doubling).
    Amortized,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        GrowthPolicy::Increment { step: 2 }
    }
}

/// Ordered sequence of gate operations.
///
/// Growth is fallible: when the allocator refuses, the push fails with
/// [`IrError::BufferExhausted`] and the buffer is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitBuffer {
    ops: Vec<GateOperation>,
    growth: GrowthPolicy,
}

impl CircuitBuffer {
    /// Create an empty buffer with no preallocated slots.
    pub fn new(growth: GrowthPolicy) -> Self {
        Self {
            ops: Vec::new(),
            growth,
        }
    }

    /// Create an empty buffer with `capacity` preallocated slots.
    pub fn with_capacity(capacity: usize, growth: GrowthPolicy) -> IrResult<Self> {
        let mut buffer = Self::new(growth);
        buffer.reserve(capacity)?;
        Ok(buffer)
    }

    /// Append one operation, growing first if full.
    pub fn push(&mut self, op: GateOperation) -> IrResult<()> {
        if self.ops.len() == self.ops.capacity() {
            self.grow()?;
        }
        self.ops.push(op);
        Ok(())
    }

    /// Append a run of operations, keeping their order.
    pub fn extend_from_slice(&mut self, ops: &[GateOperation]) -> IrResult<()> {
        for op in ops {
            self.push(*op)?;
        }
        Ok(())
    }

    /// Drop every operation. Capacity is kept.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Number of stored operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether no operation is stored.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Allocated slots.
    pub fn capacity(&self) -> usize {
        self.ops.capacity()
    }

    /// The growth policy in effect.
    pub fn growth(&self) -> GrowthPolicy {
        self.growth
    }

    /// Operations in append order.
    pub fn as_slice(&self) -> &[GateOperation] {
        &self.ops
    }

    /// Iterate operations in append order.
    pub fn iter(&self) -> std::slice::Iter<'_, GateOperation> {
        self.ops.iter()
    }

    fn grow(&mut self) -> IrResult<()> {
        match self.growth {
            GrowthPolicy::Increment { step } => self.reserve(step.max(1))?,
            GrowthPolicy::Amortized => {
                self.ops
                    .try_reserve(1)
                    .map_err(|source| IrError::BufferExhausted {
                        len: self.ops.len(),
                        source,
                    })?;
            }
        }
        debug!(
            "Operation buffer grew to {} slots ({} used)",
            self.ops.capacity(),
            self.ops.len()
        );
        Ok(())
    }

    fn reserve(&mut self, additional: usize) -> IrResult<()> {
        self.ops
            .try_reserve_exact(additional)
            .map_err(|source| IrError::BufferExhausted {
                len: self.ops.len(),
                source,
            })
    }
}

impl Default for CircuitBuffer {
    fn default() -> Self {
        Self::new(GrowthPolicy::default())
    }
}

impl<'a> IntoIterator for &'a CircuitBuffer {
    type Item = &'a GateOperation;
    type IntoIter = std::slice::Iter<'a, GateOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::GateKind;

    fn x(q: usize) -> GateOperation {
        GateOperation::single(GateKind::PauliX, q)
    }

    #[test]
    fn test_initial_capacity() {
        let buffer = CircuitBuffer::with_capacity(10, GrowthPolicy::default()).unwrap();
        assert!(buffer.capacity() >= 10);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_grows_when_full() {
        let mut buffer =
            CircuitBuffer::with_capacity(1, GrowthPolicy::Increment { step: 1 }).unwrap();
        for q in 0..5 {
            buffer.push(x(q)).unwrap();
        }
        assert_eq!(buffer.len(), 5);
        assert!(buffer.capacity() >= 5);
        let targets: Vec<_> = buffer.iter().map(|op| op.target).collect();
        assert_eq!(targets, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_zero_step_still_grows() {
        let mut buffer = CircuitBuffer::new(GrowthPolicy::Increment { step: 0 });
        buffer.push(x(0)).unwrap();
        buffer.push(x(1)).unwrap();
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut buffer = CircuitBuffer::with_capacity(4, GrowthPolicy::Amortized).unwrap();
        buffer.extend_from_slice(&[x(0), x(1), x(2)]).unwrap();
        let capacity = buffer.capacity();
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), capacity);
    }

    #[test]
    fn test_growth_policy_serde() {
        let json = serde_json::to_string(&GrowthPolicy::Increment { step: 4 }).unwrap();
        assert_eq!(json, r#"{"kind":"increment","step":4}"#);
        let parsed: GrowthPolicy = serde_json::from_str(r#"{"kind":"amortized"}"#).unwrap();
        assert_eq!(parsed, GrowthPolicy::Amortized);
    }
}
