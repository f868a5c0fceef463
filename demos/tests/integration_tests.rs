//! Integration tests for the demo helpers.

use std::sync::Arc;

use tinyq_demos::{bell_engine, draining_probe, load_config, result_line};
use tinyq_hal::{MemoryProbe, Platform};
use tinyq_sim::{EngineConfig, ExhaustionPolicy, SimError};

#[test]
fn test_bell_engine_probabilities() {
    let mut engine = bell_engine(EngineConfig::default(), Platform::silent()).unwrap();
    let probs = engine.simulate().unwrap().probabilities_by_bitstring();

    assert!((probs["00"] - 0.5).abs() < 1e-5);
    assert!((probs["11"] - 0.5).abs() < 1e-5);
    assert!(probs["01"].abs() < 1e-5);
    assert!(probs["10"].abs() < 1e-5);
}

#[test]
fn test_draining_probe_counts_down() {
    let probe = draining_probe(100, 30);
    assert_eq!(probe.free_memory(), 100);
    assert_eq!(probe.free_memory(), 70);
    assert_eq!(probe.free_memory(), 40);
    assert_eq!(probe.free_memory(), 10);
    assert_eq!(probe.free_memory(), 0);
}

#[test]
fn test_bell_engine_stops_on_draining_memory() {
    let mut config = EngineConfig::default();
    config.simulator.memory_threshold = 100;
    config.simulator.exhaustion = ExhaustionPolicy::ReturnError;

    let platform = Platform::silent().with_memory(Arc::new(draining_probe(120, 30)));
    let mut engine = bell_engine(config, platform).unwrap();

    // First reading 120 passes, second reading 90 trips after cx.
    let err = engine.simulate().unwrap_err();
    assert!(matches!(err, SimError::ResourceExhausted(report) if report.step == 1));
}

#[test]
fn test_load_config_defaults_without_path() {
    assert_eq!(load_config(None).unwrap(), EngineConfig::default());
}

#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join(format!("tinyq-demo-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "simulator": { "snapshots": true } }"#).unwrap();

    let config = load_config(Some(&path)).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(config.simulator.snapshots);
    assert_eq!(config.simulator.memory_threshold, 100);
}

#[test]
fn test_load_config_reports_missing_file() {
    let path = std::env::temp_dir().join("tinyq-demo-config-does-not-exist.json");
    let err = load_config(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("reading config"));
}

#[test]
fn test_result_line_pads_label_to_column() {
    assert_eq!(
        result_line("Budget", "400 bytes"),
        "  Budget.................. 400 bytes"
    );
    let long = result_line("Cost per operation", 40);
    assert_eq!(long.find(" 40"), Some(2 + 24));
}
