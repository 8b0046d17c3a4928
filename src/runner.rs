//! Single-shot forecast execution: request validation, dispatch, and the
//! stdin/ledger entry points used by the binary.

use std::io::Read;

use tracing::{debug, warn};

use crate::cli::CliOptions;
use crate::config::{ForecasterConfig, RequestConfig};
use crate::error::{ForecastError, Result};
use crate::forecast::{Forecaster, Method, Strategy};
use crate::io::export::export_csv;
use crate::io::ledger::{LedgerSummary, read_transactions_from_path};
use crate::io::types::{ForecastRequest, ForecastResponse, SuccessResponse};
use crate::scenario::{ScenarioAdjustment, ScenarioOutcome};

/// Predictions produced for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastOutcome {
    /// One value per future month, in order.
    pub predictions: Vec<f64>,
    /// Method label the request was dispatched on.
    pub method_used: String,
    /// Number of historical values consumed.
    pub data_points: usize,
}

impl ForecastOutcome {
    /// Converts the outcome into a success response body.
    pub fn into_response(self) -> ForecastResponse {
        ForecastResponse::success(self.predictions, self.method_used, self.data_points)
    }
}

/// Ledger forecast with its starting balance and optional scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerForecast {
    pub outcome: ForecastOutcome,
    /// Net savings accumulated over the kept ledger months.
    pub starting_balance: f64,
    pub scenario: Option<ScenarioOutcome>,
}

impl LedgerForecast {
    /// Converts the forecast into a success response body carrying the
    /// ledger and scenario fields.
    pub fn into_response(self) -> ForecastResponse {
        let (adjusted_net_savings, total_impact) = match self.scenario {
            Some(s) => (Some(s.adjusted), Some(s.total_impact)),
            None => (None, None),
        };
        ForecastResponse::Success(SuccessResponse {
            success: true,
            predicted_net_savings: self.outcome.predictions,
            method_used: self.outcome.method_used,
            data_points: self.outcome.data_points,
            starting_balance: Some(self.starting_balance),
            adjusted_net_savings,
            total_impact,
        })
    }
}

/// Checks a requested horizon against the configured policy range.
///
/// # Errors
///
/// Returns [`ForecastError::HorizonOutOfRange`] if `requested` lies outside
/// `[min_horizon, max_horizon]`.
pub fn validate_horizon(requested: i128, policy: &RequestConfig) -> Result<usize> {
    let out_of_range = || ForecastError::HorizonOutOfRange {
        min: policy.min_horizon,
        max: policy.max_horizon,
        got: requested,
    };
    let horizon = usize::try_from(requested).map_err(|_| out_of_range())?;
    if (policy.min_horizon..=policy.max_horizon).contains(&horizon) {
        Ok(horizon)
    } else {
        Err(out_of_range())
    }
}

/// Runs one forecast request.
///
/// Missing request fields take their defaults from `config`. The method label
/// is echoed back verbatim in `method_used` even when it fell back to linear.
///
/// # Errors
///
/// Returns a `ForecastError` if the horizon is out of range or any
/// prediction is not finite.
pub fn run_forecast(request: &ForecastRequest, config: &ForecasterConfig) -> Result<ForecastOutcome> {
    let policy = &config.request;
    let horizon = validate_horizon(
        request
            .forecast_horizon
            .unwrap_or(policy.default_horizon as i128),
        policy,
    )?;

    let method_used = request
        .method
        .clone()
        .unwrap_or_else(|| policy.default_method.clone());
    let strategy = Strategy::select(
        Method::from_label(&method_used),
        config.moving_average.window,
    );

    let predictions = strategy.forecast(&request.net_savings, horizon);
    if let Some(idx) = predictions.iter().position(|p| !p.is_finite()) {
        return Err(ForecastError::NonFinitePrediction { period: idx + 1 });
    }

    debug!(
        strategy = strategy.name(),
        horizon,
        data_points = request.net_savings.len(),
        "forecast complete"
    );

    Ok(ForecastOutcome {
        predictions,
        method_used,
        data_points: request.net_savings.len(),
    })
}

/// Decodes a JSON request and runs it.
///
/// # Errors
///
/// Returns [`ForecastError::MalformedInput`] for undecodable input, otherwise
/// any error from [`run_forecast`].
pub fn run_json(input: &str, config: &ForecasterConfig) -> Result<ForecastOutcome> {
    let request = ForecastRequest::from_json(input)?;
    run_forecast(&request, config)
}

/// Forecasts from an aggregated ledger.
///
/// Returns the outcome together with the ledger's starting balance.
///
/// # Errors
///
/// Returns [`ForecastError::EmptyLedger`] when the ledger has no months,
/// otherwise any error from [`run_forecast`].
pub fn run_ledger(
    summary: &LedgerSummary,
    horizon: Option<i64>,
    method: Option<String>,
    config: &ForecasterConfig,
) -> Result<(ForecastOutcome, f64)> {
    if summary.months.is_empty() {
        return Err(ForecastError::EmptyLedger);
    }

    let request = ForecastRequest {
        net_savings: summary.history(),
        forecast_horizon: horizon.map(i128::from),
        method,
    };
    let outcome = run_forecast(&request, config)?;
    Ok((outcome, summary.starting_balance))
}

/// Applies a what-if scenario to ledger predictions.
///
/// Expense reductions are taken from the ledger's average monthly expenses
/// over the configured lookback window.
pub fn run_scenario(
    summary: &LedgerSummary,
    baseline: &[f64],
    scenario: &ScenarioAdjustment,
    config: &ForecasterConfig,
) -> ScenarioOutcome {
    let avg_expenses = summary.recent_monthly_expenses(config.scenario.expense_lookback_months);
    debug!(
        avg_expenses,
        extra = scenario.extra_monthly_savings(),
        reduction = scenario.expense_reduction_percent(),
        "running scenario"
    );
    scenario.apply(baseline, avg_expenses)
}

/// Executes one invocation as configured on the command line.
///
/// Reads the request from `input` unless a ledger was given, writes the
/// optional prediction export, and returns the response to print. Every
/// failure is folded into a failure response.
pub fn execute(options: &CliOptions, config: &ForecasterConfig, input: impl Read) -> ForecastResponse {
    match try_execute(options, config, input) {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, "forecast failed");
            ForecastResponse::from(&err)
        }
    }
}

fn try_execute(
    options: &CliOptions,
    config: &ForecasterConfig,
    mut input: impl Read,
) -> Result<ForecastResponse> {
    let Some(ref path) = options.ledger else {
        let mut raw = String::new();
        input.read_to_string(&mut raw)?;
        let outcome = run_json(&raw, config)?;
        if let Some(ref out) = options.predictions_out {
            export_csv(&outcome.predictions, None, 0.0, out)?;
            debug!(path = %out.display(), "wrote prediction export");
        }
        return Ok(outcome.into_response());
    };

    let scenario = if options.has_scenario() {
        Some(ScenarioAdjustment::new(
            options.extra_savings.unwrap_or(0.0),
            options.expense_reduction.unwrap_or(0.0),
            &config.scenario,
        )?)
    } else {
        None
    };

    let transactions = read_transactions_from_path(path)?;
    let summary = LedgerSummary::from_transactions(&transactions, config.ledger.trailing_months)?;
    let (outcome, starting_balance) =
        run_ledger(&summary, options.horizon, options.method.clone(), config)?;
    let scenario = scenario.map(|s| run_scenario(&summary, &outcome.predictions, &s, config));

    if let Some(ref out) = options.predictions_out {
        let adjusted = scenario.as_ref().map(|s| s.adjusted.as_slice());
        export_csv(&outcome.predictions, adjusted, starting_balance, out)?;
        debug!(path = %out.display(), "wrote prediction export");
    }

    Ok(LedgerForecast {
        outcome,
        starting_balance,
        scenario,
    }
    .into_response())
}
