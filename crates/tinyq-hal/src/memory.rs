//! Free-memory probes.

/// Oracle for the memory still available to the process.
///
/// Queried once after every applied operation, so implementations must
/// answer in constant time and must not allocate.
pub trait MemoryProbe: Send + Sync {
    /// Estimated free bytes.
    fn free_memory(&self) -> usize;
}

/// Probe for hosted targets where the simulator is not the memory bottleneck.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnboundedMemory;

impl MemoryProbe for UnboundedMemory {
    fn free_memory(&self) -> usize {
        usize::MAX
    }
}

/// Probe that always reports the same figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedMemory {
    bytes: usize,
}

impl FixedMemory {
    /// Report `bytes` on every query.
    pub const fn new(bytes: usize) -> Self {
        Self { bytes }
    }
}

impl MemoryProbe for FixedMemory {
    fn free_memory(&self) -> usize {
        self.bytes
    }
}

/// Any thread-safe closure returning a byte count is a probe.
///
/// On AVR-class boards this is typically the distance between the stack
/// pointer and the heap break.
impl<F> MemoryProbe for F
where
    F: Fn() -> usize + Send + Sync,
{
    fn free_memory(&self) -> usize {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_fixed_memory() {
        assert_eq!(FixedMemory::new(99).free_memory(), 99);
        assert_eq!(UnboundedMemory.free_memory(), usize::MAX);
    }

    #[test]
    fn test_closure_probe() {
        let heap_break = AtomicUsize::new(2048);
        let probe = move || 8192 - heap_break.load(Ordering::Relaxed);
        assert_eq!(probe.free_memory(), 6144);
    }
}
