//! Bell State Demo
//!
//! Builds h(0), cx(0, 1), simulates it and prints the entangled state.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tinyq_hal::{Platform, WriterSink};
use tracing::info;

use tinyq_demos::{
    bell_engine, init_logging, load_config, print_header, print_result, print_section,
    print_statevector, print_success,
};

#[derive(Parser, Debug)]
#[command(name = "demo-bell")]
#[command(about = "Prepare and simulate a Bell state")]
struct Args {
    /// Print the statevector after every operation
    #[arg(long)]
    snapshots: bool,

    /// Engine configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    config.simulator.snapshots |= args.snapshots;

    print_header("Bell State Demo");

    // Snapshots are console lines, so route diagnostics to stdout.
    let platform = if config.simulator.snapshots {
        Platform::hosted().with_sink(Arc::new(WriterSink::stdout()))
    } else {
        Platform::hosted()
    };

    let mut engine = bell_engine(config, platform)?;

    print_section("Circuit");
    for op in engine.circuit().operations() {
        println!("  {op}");
    }

    print_section("Simulation");
    let sv = engine.simulate()?;
    info!("Simulated {} operations", sv.steps());
    print_result("Qubits", sv.num_qubits());
    print_result("Norm", format!("{:.6}", sv.norm_sqr()));
    print_statevector(sv);

    print_section("Outcome probabilities");
    for (bits, p) in sv.probabilities_by_bitstring() {
        print_result(&bits, format!("{p:.4}"));
    }

    print_success("Bell state prepared");
    Ok(())
}
