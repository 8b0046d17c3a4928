//! What-if scenarios layered on top of a baseline forecast.
//!
//! A scenario adds a fixed amount of extra savings to every forecast month
//! and converts a percentage cut of recent average expenses into additional
//! monthly savings.

use tracing::debug;

use crate::config::ScenarioConfig;
use crate::error::{ForecastError, Result};

/// Validated scenario parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioAdjustment {
    extra_monthly_savings: f64,
    expense_reduction_percent: f64,
}

/// Baseline predictions with a scenario applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    /// Adjusted prediction per forecast month, rounded to cents.
    pub adjusted: Vec<f64>,
    /// Sum of adjusted minus sum of baseline predictions, rounded to cents.
    pub total_impact: f64,
}

impl ScenarioAdjustment {
    /// Validates scenario parameters against the configured bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidScenario`] if the extra savings are
    /// outside `[0, max_extra_monthly_savings]` or the reduction is outside
    /// `[0, 100]`.
    pub fn new(
        extra_monthly_savings: f64,
        expense_reduction_percent: f64,
        policy: &ScenarioConfig,
    ) -> Result<Self> {
        if !(0.0..=policy.max_extra_monthly_savings).contains(&extra_monthly_savings) {
            return Err(ForecastError::InvalidScenario(format!(
                "Invalid extra savings amount: must be between 0 and {}, got {extra_monthly_savings}",
                policy.max_extra_monthly_savings
            )));
        }
        if !(0.0..=100.0).contains(&expense_reduction_percent) {
            return Err(ForecastError::InvalidScenario(format!(
                "Invalid expense reduction percentage: must be between 0 and 100, got {expense_reduction_percent}"
            )));
        }
        Ok(Self {
            extra_monthly_savings,
            expense_reduction_percent,
        })
    }

    pub fn extra_monthly_savings(&self) -> f64 {
        self.extra_monthly_savings
    }

    pub fn expense_reduction_percent(&self) -> f64 {
        self.expense_reduction_percent
    }

    /// Monthly savings freed by cutting `avg_monthly_expenses`, rounded to cents.
    pub fn expense_adjustment(&self, avg_monthly_expenses: f64) -> f64 {
        if self.expense_reduction_percent == 0.0 {
            return 0.0;
        }
        round_cents(avg_monthly_expenses * self.expense_reduction_percent / 100.0)
    }

    /// Applies the scenario to every baseline prediction.
    pub fn apply(&self, baseline: &[f64], avg_monthly_expenses: f64) -> ScenarioOutcome {
        let per_month = self.extra_monthly_savings + self.expense_adjustment(avg_monthly_expenses);
        let adjusted: Vec<f64> = baseline.iter().map(|b| round_cents(b + per_month)).collect();
        let total_impact = round_cents(adjusted.iter().sum::<f64>() - baseline.iter().sum::<f64>());

        debug!(per_month, total_impact, "applied scenario");

        ScenarioOutcome {
            adjusted,
            total_impact,
        }
    }
}

/// Rounds half away from zero to two decimal places.
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
