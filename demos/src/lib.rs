//! tinyq Demo Suite
//!
//! Small programs showing the simulator the way a device firmware would
//! drive it:
//!
//! - **Bell**: two-qubit entanglement with optional per-step snapshots
//! - **Rotations**: the single-qubit rotation kernels against closed forms
//! - **Memory guard**: a shrinking heap stopping a run mid-circuit

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use console::style;
use tinyq_hal::Platform;
use tinyq_sim::{EngineConfig, QuantumEngine, SimResult, Statevector};
use tracing_subscriber::EnvFilter;

/// Install a `tracing` subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Read an engine configuration file, or use the defaults.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    EngineConfig::from_json(&json).with_context(|| format!("parsing config {}", path.display()))
}

/// An engine holding `h(0)`, `cx(0, 1)` on two qubits.
pub fn bell_engine(config: EngineConfig, platform: Platform) -> SimResult<QuantumEngine> {
    let mut engine = QuantumEngine::with_config(2, 2, config, platform)?;
    engine.circuit_mut().h(0)?.cx(0, 1)?;
    Ok(engine)
}

/// A free-memory probe that starts at `budget` bytes and loses `cost`
/// bytes on every reading.
pub fn draining_probe(budget: usize, cost: usize) -> impl Fn() -> usize + Send + Sync {
    let reads = Arc::new(AtomicUsize::new(0));
    move || {
        let n = reads.fetch_add(1, Ordering::SeqCst);
        budget.saturating_sub(n.saturating_mul(cost))
    }
}

const BANNER_WIDTH: usize = 48;

/// Print a boot-style banner naming the demo and the simulator version.
pub fn print_header(title: &str) {
    let rule = format!("+{}+", "-".repeat(BANNER_WIDTH - 2));
    let version = format!("tinyq {}", env!("CARGO_PKG_VERSION"));
    println!("{}", style(&rule).cyan());
    println!(
        "{}{}{}",
        style("| ").cyan(),
        style(format!("{title:<w$}", w = BANNER_WIDTH - 4)).bold(),
        style(" |").cyan()
    );
    println!(
        "{}{}{}",
        style("| ").cyan(),
        style(format!("{version:<w$}", w = BANNER_WIDTH - 4)).dim(),
        style(" |").cyan()
    );
    println!("{}", style(&rule).cyan());
}

/// Print a `[title]` section marker.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("[{title}]")).green().bold());
}

/// Unstyled `label ... value` line with the label dot-padded to a fixed column.
pub fn result_line(label: &str, value: impl std::fmt::Display) -> String {
    format!("  {label:.<24} {value}")
}

/// Print a [`result_line`] with the label dimmed.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {value}", style(format!("{label:.<24}")).dim());
}

/// Print an `OK` status line.
pub fn print_success(message: &str) {
    println!("{} {message}", style("OK  ").green().bold());
}

/// Print a `WARN` status line.
pub fn print_warning(message: &str) {
    println!("{} {message}", style("WARN").yellow().bold());
}

/// Print every amplitude with its probability, skipping zeros.
pub fn print_statevector(sv: &Statevector) {
    for (index, amp) in sv.amplitudes().iter().enumerate() {
        let p = amp.norm_sqr();
        if p < 1e-9 {
            continue;
        }
        println!(
            "  |{}⟩  {}  {}",
            style(sv.bitstring(index)).bold(),
            amp,
            style(format!("p = {p:.4}")).dim()
        );
    }
}
