//! End-to-end scenario: 5y receive-fixed swap against a 150 bp counterparty.
//!
//! Notional 100,000,000, fixed 2.5%, 40% recovery, 1000 seeded paths under
//! the default Hull-White settings. The swap starts out of the money for
//! the fixed receiver, so the assertions check structure and an
//! order-of-magnitude band rather than a point value.

use cva_models::instruments::{SwapPosition, SwapSpec};
use cva_pricing::mc::CancellationToken;
use cva_xva::{CreditSpec, CvaEngine, CvaReport, CvaRequest, SimulationSettings};

const NOTIONAL: f64 = 100_000_000.0;

fn scenario() -> CvaRequest {
    let swap = SwapSpec::new(NOTIONAL, 0.025, 5.0, SwapPosition::ReceiveFixed).unwrap();
    let credit = CreditSpec::new(150.0, 0.4).unwrap();
    CvaRequest::new(swap, credit)
        .with_counterparty("ACME Corp")
        .with_simulation(SimulationSettings {
            num_paths: Some(1_000),
            seed: Some(42),
            retained_paths: Some(10),
            ..Default::default()
        })
}

fn run(request: &CvaRequest) -> CvaReport {
    CvaEngine::run(request, &CancellationToken::new())
        .unwrap()
        .into_report()
        .unwrap()
}

#[test]
fn test_scenario_structure() {
    let report = run(&scenario());
    let result = &report.result;
    let exposure = &result.exposure;

    assert_eq!(report.counterparty.as_deref(), Some("ACME Corp"));
    assert_eq!(report.effective_seed, 42);
    assert_eq!(report.num_paths, 1_000);
    assert_eq!(report.time_grid.n_steps(), 60);
    assert_eq!(exposure.len(), 61);
    assert_eq!(exposure.num_paths, 1_000);
    assert_eq!(result.contributions.len(), 60);
    assert_eq!(report.sample_paths.len(), 10);

    assert_eq!(exposure.epe[60], 0.0);
    assert_eq!(exposure.ene[60], 0.0);
    assert!((result.hazard_rate - 0.025).abs() < 1e-12);
    assert!((result.lgd - 0.6).abs() < 1e-12);
    assert_eq!(result.cva_bps, result.cva / NOTIONAL * 1e4);
}

#[test]
fn test_scenario_magnitudes() {
    let report = run(&scenario());
    let result = &report.result;
    let exposure = &result.exposure;

    assert!(
        result.cva_bps > 0.5 && result.cva_bps < 50.0,
        "cva_bps = {}",
        result.cva_bps
    );
    assert!(
        exposure.max_epe > 1e5 && exposure.max_epe < 5e6,
        "max_epe = {}",
        exposure.max_epe
    );
    assert!(exposure.avg_ene < 0.0);
    assert!(exposure.max_ene <= exposure.avg_ene);
    assert!(exposure.max_epe >= exposure.avg_epe);

    // Out-of-the-money receiver: negative exposure dominates
    assert!(exposure.avg_ene.abs() > exposure.avg_epe);
}

#[test]
fn test_scenario_is_reproducible() {
    let first = run(&scenario());
    let second = run(&scenario());
    assert_eq!(first.result, second.result);
    assert_eq!(first.sample_paths, second.sample_paths);
}

#[test]
fn test_report_serialises_to_json() {
    let report = run(&scenario());
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["counterparty"], "ACME Corp");
    assert_eq!(json["effective_seed"], 42);
    assert_eq!(json["swap"]["position"], "receive_fixed");
    assert_eq!(json["result"]["exposure"]["epe"].as_array().unwrap().len(), 61);
    assert_eq!(json["sample_paths"].as_array().unwrap().len(), 10);
}
