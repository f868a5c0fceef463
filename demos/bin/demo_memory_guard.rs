//! Memory Guard Demo
//!
//! Simulates a layered circuit on a pretend device whose free memory drops
//! with every operation, and shows where the guard stops the run.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tinyq_hal::{Platform, WriterSink};
use tinyq_sim::{EngineConfig, ExhaustionPolicy, QuantumEngine, SimError};
use tracing::warn;

use tinyq_demos::{
    draining_probe, init_logging, print_header, print_result, print_section, print_statevector,
    print_success, print_warning,
};

#[derive(Parser, Debug)]
#[command(name = "demo-memory-guard")]
#[command(about = "Stop a simulation when the device runs low on memory")]
struct Args {
    /// Number of qubits
    #[arg(short = 'n', long, default_value = "4")]
    qubits: usize,

    /// Free bytes before the first operation
    #[arg(long, default_value = "400")]
    budget: usize,

    /// Bytes lost per operation
    #[arg(long, default_value = "40")]
    cost: usize,

    /// Minimum free bytes
    #[arg(long, default_value = "100")]
    threshold: usize,

    /// Halt the process instead of returning an error
    #[arg(long)]
    halt: bool,

    /// Print the statevector after every operation
    #[arg(long)]
    snapshots: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    print_header("Memory Guard Demo");
    print_result("Budget", format!("{} bytes", args.budget));
    print_result("Cost per operation", format!("{} bytes", args.cost));
    print_result("Threshold", format!("{} bytes", args.threshold));

    let mut config = EngineConfig::default();
    config.simulator.memory_threshold = args.threshold;
    config.simulator.snapshots = args.snapshots;
    if args.halt {
        config.simulator.exhaustion = ExhaustionPolicy::Halt;
    }

    let platform = Platform::hosted()
        .with_sink(Arc::new(WriterSink::stdout()))
        .with_memory(Arc::new(draining_probe(args.budget, args.cost)));

    let mut engine = QuantumEngine::with_config(args.qubits, 0, config, platform)?;
    let circuit = engine.circuit_mut();
    for q in 0..args.qubits {
        circuit.h(q)?;
    }
    for q in 0..args.qubits.saturating_sub(1) {
        circuit.cx(q, q + 1)?;
    }
    for q in 0..args.qubits {
        circuit.rz(0.5, q)?;
    }
    let total = engine.circuit().len();

    print_section("Simulation");
    match engine.simulate() {
        Ok(sv) => {
            print_statevector(sv);
            print_success(&format!("All {total} operations applied"));
        }
        Err(SimError::ResourceExhausted(report)) => {
            warn!("{report}");
            print_warning(&format!(
                "Stopped after operation {} of {}",
                report.step + 1,
                total
            ));
            print_result("Free memory", report.free_memory);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
