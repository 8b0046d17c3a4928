//! TOML-based forecaster configuration.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::forecast::Method;
use crate::forecast::recency::DEFAULT_WINDOW;

/// Top-level forecaster configuration parsed from TOML.
///
/// All fields have defaults matching the built-in forecasting policy. Load
/// from TOML with [`ForecasterConfig::from_toml_file`] or use
/// [`ForecasterConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecasterConfig {
    /// Request defaults and horizon policy.
    #[serde(default)]
    pub request: RequestConfig,
    /// Recency averager parameters.
    #[serde(default)]
    pub moving_average: MovingAverageConfig,
    /// Transactions ledger aggregation.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// What-if scenario bounds.
    #[serde(default)]
    pub scenario: ScenarioConfig,
    /// Diagnostic output on stderr.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Request defaults and horizon policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RequestConfig {
    /// Horizon used when a request omits `forecast_horizon`.
    pub default_horizon: usize,
    /// Smallest accepted horizon (inclusive).
    pub min_horizon: usize,
    /// Largest accepted horizon (inclusive).
    pub max_horizon: usize,
    /// Method label used when a request omits `method`.
    pub default_method: String,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            default_horizon: 12,
            min_horizon: 1,
            max_horizon: 24,
            default_method: Method::Linear.as_str().to_string(),
        }
    }
}

/// Recency averager parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MovingAverageConfig {
    /// Number of trailing months averaged (must be >= 1).
    pub window: usize,
}

impl Default for MovingAverageConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }
}

/// Transactions ledger aggregation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// Calendar months of history kept, ending at the latest ledger month.
    pub trailing_months: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            trailing_months: 12,
        }
    }
}

/// What-if scenario bounds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Largest accepted extra monthly savings amount (inclusive).
    pub max_extra_monthly_savings: f64,
    /// Calendar months averaged when estimating monthly expenses.
    pub expense_lookback_months: usize,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            max_extra_monthly_savings: 10_000.0,
            expense_lookback_months: 3,
        }
    }
}

/// Diagnostic output on stderr.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing` filter directive, used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

impl ForecasterConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let r = &self.request;

        if r.min_horizon == 0 {
            errors.push(ConfigError {
                field: "request.min_horizon".into(),
                message: "must be >= 1".into(),
            });
        }
        if r.min_horizon > r.max_horizon {
            errors.push(ConfigError {
                field: "request.min_horizon".into(),
                message: "must be <= request.max_horizon".into(),
            });
        }
        if !(r.min_horizon..=r.max_horizon).contains(&r.default_horizon) {
            errors.push(ConfigError {
                field: "request.default_horizon".into(),
                message: format!(
                    "must be in [{}, {}], got {}",
                    r.min_horizon, r.max_horizon, r.default_horizon
                ),
            });
        }
        if !Method::is_known(&r.default_method) {
            errors.push(ConfigError {
                field: "request.default_method".into(),
                message: format!(
                    "must be one of {}, got \"{}\"",
                    Method::LABELS.join(", "),
                    r.default_method
                ),
            });
        }

        if self.moving_average.window == 0 {
            errors.push(ConfigError {
                field: "moving_average.window".into(),
                message: "must be >= 1".into(),
            });
        }

        if self.ledger.trailing_months == 0 {
            errors.push(ConfigError {
                field: "ledger.trailing_months".into(),
                message: "must be >= 1".into(),
            });
        }

        let sc = &self.scenario;
        if !(sc.max_extra_monthly_savings.is_finite() && sc.max_extra_monthly_savings >= 0.0) {
            errors.push(ConfigError {
                field: "scenario.max_extra_monthly_savings".into(),
                message: format!("must be finite and >= 0, got {}", sc.max_extra_monthly_savings),
            });
        }
        if sc.expense_lookback_months == 0 {
            errors.push(ConfigError {
                field: "scenario.expense_lookback_months".into(),
                message: "must be >= 1".into(),
            });
        }

        if self.logging.filter.trim().is_empty() {
            errors.push(ConfigError {
                field: "logging.filter".into(),
                message: "must not be empty".into(),
            });
        }

        errors
    }
}
