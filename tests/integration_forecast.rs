//! Library-level properties of the forecasting strategies and request runner.

mod common;

use approx::assert_relative_eq;

use savings_forecast::config::ForecasterConfig;
use savings_forecast::error::ErrorKind;
use savings_forecast::forecast::{Forecaster, RecencyAverager, TrendEstimator};
use savings_forecast::io::ledger::{LedgerSummary, read_transactions_from_path};
use savings_forecast::runner::{run_json, run_ledger, run_scenario};
use savings_forecast::scenario::ScenarioAdjustment;

#[test]
fn every_valid_horizon_yields_exact_length() {
    let averager = RecencyAverager::default();
    for len in [0, 1, 2, 3, 7, 24] {
        let history = common::random_history(len, 42 + len as u64);
        for k in 1..=24 {
            assert_eq!(TrendEstimator.forecast(&history, k).len(), k);
            assert_eq!(averager.forecast(&history, k).len(), k);
        }
    }
}

#[test]
fn empty_history_forecasts_zeros_for_both_strategies() {
    for k in [1, 12, 24] {
        assert_eq!(TrendEstimator.forecast(&[], k), vec![0.0; k]);
        assert_eq!(RecencyAverager::default().forecast(&[], k), vec![0.0; k]);
    }
}

#[test]
fn single_value_repeats_under_trend() {
    assert_eq!(TrendEstimator.forecast(&[-75.25], 9), vec![-75.25; 9]);
}

#[test]
fn trend_continues_a_linear_series() {
    let forecast = TrendEstimator.forecast(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
    for (got, want) in forecast.iter().zip([6.0, 7.0, 8.0]) {
        assert_relative_eq!(*got, want, epsilon = 1e-9);
    }
}

#[test]
fn recency_of_constant_series() {
    let forecast = RecencyAverager::new(3).forecast(&[10.0, 10.0, 10.0, 10.0], 2);
    assert_eq!(forecast, vec![10.0, 10.0]);
}

#[test]
fn recency_forecast_is_flat() {
    let history = common::random_history(18, 7);
    let forecast = RecencyAverager::default().forecast(&history, 24);
    assert!(forecast.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn horizon_edges_through_json() {
    let cfg = ForecasterConfig::default();
    for ok in [1, 24] {
        let input = format!(r#"{{"net_savings": [1, 2, 3], "forecast_horizon": {ok}}}"#);
        let outcome = run_json(&input, &cfg).expect("edge horizon should be accepted");
        assert_eq!(outcome.predictions.len(), ok);
    }
    for bad in [0, 25] {
        let input = format!(r#"{{"net_savings": [1, 2, 3], "forecast_horizon": {bad}}}"#);
        let err = run_json(&input, &cfg).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Computation);
    }
}

#[test]
fn malformed_and_invalid_requests_differ() {
    let cfg = ForecasterConfig::default();
    let malformed = run_json("{\"net_savings\": [1, 2", &cfg).unwrap_err();
    let invalid = run_json(r#"{"forecast_horizon": 0}"#, &cfg).unwrap_err();

    assert_eq!(malformed.kind(), ErrorKind::MalformedInput);
    assert_eq!(invalid.kind(), ErrorKind::Computation);
    assert_ne!(malformed.to_string(), invalid.to_string());
}

#[test]
fn only_json_objects_are_requests() {
    let cfg = ForecasterConfig::default();
    for input in ["[]", r#"[[1,2,3,4,5],3,"linear"]"#] {
        let err = run_json(input, &cfg).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput, "input: {input}");
    }
}

#[test]
fn integer_horizons_of_any_size_are_range_checked() {
    let cfg = ForecasterConfig::default();
    for huge in ["9223372036854775808", "18446744073709551616", "-9223372036854775809"] {
        let input = format!(r#"{{"net_savings": [1, 2], "forecast_horizon": {huge}}}"#);
        let err = run_json(&input, &cfg).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Computation, "horizon: {huge}");
    }
    let err = run_json(r#"{"forecast_horizon": 3.5}"#, &cfg).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}

#[test]
fn explicit_null_fields_are_malformed() {
    let cfg = ForecasterConfig::default();
    for input in [r#"{"forecast_horizon": null}"#, r#"{"method": null}"#] {
        let err = run_json(input, &cfg).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput, "input: {input}");
    }
}

#[test]
fn repeated_requests_are_identical() {
    let cfg = ForecasterConfig::default();
    let history = common::random_history(10, 99);
    let input = serde_json::json!({ "net_savings": history, "forecast_horizon": 6 }).to_string();
    let a = run_json(&input, &cfg).expect("first run should succeed");
    let b = run_json(&input, &cfg).expect("second run should succeed");
    assert_eq!(a, b);
}

#[test]
fn ledger_fixture_drives_a_forecast() {
    let cfg = ForecasterConfig::default();
    let transactions = read_transactions_from_path(&common::fixture("transactions.csv"))
        .expect("fixture ledger should parse");
    let summary = LedgerSummary::from_transactions(&transactions, cfg.ledger.trailing_months)
        .expect("fixture ledger should aggregate");

    // 2023-02 falls outside the trailing twelve months.
    assert_eq!(summary.history(), vec![1380.0, 1420.0, 1200.0, 1500.0]);
    assert_eq!(summary.starting_balance, 5500.0);

    let (outcome, balance) =
        run_ledger(&summary, Some(3), None, &cfg).expect("ledger forecast should succeed");
    assert_eq!(balance, 5500.0);
    assert_eq!(outcome.data_points, 4);
    for (got, want) in outcome.predictions.iter().zip([1410.0, 1424.0, 1438.0]) {
        assert_relative_eq!(*got, want, epsilon = 1e-6);
    }
}

#[test]
fn scenario_on_fixture_ledger() {
    let cfg = ForecasterConfig::default();
    let transactions = read_transactions_from_path(&common::fixture("transactions.csv"))
        .expect("fixture ledger should parse");
    let summary = LedgerSummary::from_transactions(&transactions, cfg.ledger.trailing_months)
        .expect("fixture ledger should aggregate");

    // February to April expenses: (1780 + 2000 + 1800) / 3
    assert_relative_eq!(summary.recent_monthly_expenses(3), 1860.0, epsilon = 1e-9);

    let (outcome, _) =
        run_ledger(&summary, Some(3), None, &cfg).expect("ledger forecast should succeed");
    let scenario = ScenarioAdjustment::new(100.0, 10.0, &cfg.scenario).expect("scenario should be valid");
    let adjusted = run_scenario(&summary, &outcome.predictions, &scenario, &cfg);

    for (got, want) in adjusted.adjusted.iter().zip([1696.0, 1710.0, 1724.0]) {
        assert_relative_eq!(*got, want, epsilon = 1e-6);
    }
    assert_relative_eq!(adjusted.total_impact, 858.0, epsilon = 1e-6);
}
