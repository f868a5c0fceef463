//! Rotation Kernels Demo
//!
//! Applies rx, ry and rz at a chosen angle and compares the result with
//! the closed-form single-qubit state.

use std::f32::consts::PI;

use anyhow::Result;
use clap::Parser;
use tinyq_hal::Platform;
use tinyq_ir::{Amplitude, QuantumCircuit};
use tinyq_sim::{Simulator, SimulatorConfig};

use tinyq_demos::{
    init_logging, print_header, print_result, print_section, print_statevector, print_success,
    print_warning,
};

#[derive(Parser, Debug)]
#[command(name = "demo-rotations")]
#[command(about = "Compare rotation gates with their closed forms")]
struct Args {
    /// Rotation angle as a fraction of π
    #[arg(short, long, default_value = "0.25")]
    theta: f32,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let theta = args.theta * PI;
    let (c, s) = ((theta / 2.0).cos(), (theta / 2.0).sin());
    let simulator = Simulator::new(SimulatorConfig::default(), Platform::hosted());

    print_header("Rotation Kernels Demo");
    print_result("θ", format!("{:.4} rad ({}π)", theta, args.theta));

    let cases: [(&str, QuantumCircuit, [Amplitude; 2]); 3] = [
        (
            "rx(θ)|0⟩",
            {
                let mut circuit = QuantumCircuit::new(1, 0)?;
                circuit.rx(theta, 0)?;
                circuit
            },
            [Amplitude::new(c, 0.0), Amplitude::new(0.0, -s)],
        ),
        (
            "ry(θ)|0⟩",
            {
                let mut circuit = QuantumCircuit::new(1, 0)?;
                circuit.ry(theta, 0)?;
                circuit
            },
            [Amplitude::new(c, 0.0), Amplitude::new(s, 0.0)],
        ),
        (
            "h·rz(θ)·h|0⟩",
            {
                let mut circuit = QuantumCircuit::new(1, 0)?;
                circuit.h(0)?.rz(theta, 0)?.h(0)?;
                circuit
            },
            [Amplitude::new(c, 0.0), Amplitude::new(0.0, -s)],
        ),
    ];

    let mut mismatches = 0;
    for (label, circuit, expected) in &cases {
        print_section(label);
        let sv = simulator.simulate(circuit)?;
        print_statevector(&sv);

        let error = sv
            .amplitudes()
            .iter()
            .zip(expected)
            .map(|(got, want)| (*got - *want).magnitude())
            .fold(0.0_f32, f32::max);
        print_result("Max deviation", format!("{error:.2e}"));
        if error > 1e-4 {
            mismatches += 1;
            print_warning("deviation above tolerance");
        }
    }

    if mismatches == 0 {
        print_success("All rotations match their closed forms");
    }
    Ok(())
}
