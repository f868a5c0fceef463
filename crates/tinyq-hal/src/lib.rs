//! tinyq Platform Abstraction Layer
//!
//! The simulator core never talks to a console, an allocator or a reset line
//! directly. Everything it needs from the host or device goes through the
//! three traits in this crate, bundled together as a [`Platform`].
//!
//! # Collaborators
//!
//! | Trait | Called | Hosted default | Device use |
//! |-------|--------|---------------|------------|
//! | [`DiagnosticSink`] | validation reports, per-step snapshots, low memory | [`TracingSink`] | [`WriterSink`] over a serial port |
//! | [`MemoryProbe`] | after every applied operation | [`UnboundedMemory`] | closure over the heap/stack pointers |
//! | [`FatalHalt`] | low memory, when the simulator is configured to halt | [`AbortHalt`] | board reset / spin |
//!
//! Every sink must be optional for correctness: [`NullSink`] absorbs all
//! records and the simulator behaves identically.
//!
//! # Example: A Test Platform
//!
//! ```rust
//! use std::sync::Arc;
//! use tinyq_hal::{FixedMemory, Platform, RecordingSink};
//!
//! let sink = Arc::new(RecordingSink::new());
//! let platform = Platform::silent()
//!     .with_sink(sink.clone())
//!     .with_memory(Arc::new(FixedMemory::new(64)));
//!
//! assert_eq!(platform.free_memory(), 64);
//! assert!(sink.is_empty());
//! ```

pub mod diagnostic;
pub mod halt;
pub mod memory;
pub mod platform;

pub use diagnostic::{
    Diagnostic, DiagnosticSink, NullSink, RecordingSink, TracingSink, WriterSink,
};
pub use halt::{AbortHalt, ExhaustionReport, FatalHalt, PanicHalt};
pub use memory::{FixedMemory, MemoryProbe, UnboundedMemory};
pub use platform::Platform;
