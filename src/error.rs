//! Error types for request handling, configuration, and ledger ingestion.

use thiserror::Error;

/// Result type alias for forecasting operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Broad failure classes reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request could not be decoded into the expected shape.
    MalformedInput,
    /// Validation, arithmetic, or I/O failure after decoding.
    Computation,
}

/// Errors that can terminate a forecasting run.
#[derive(Error, Debug)]
pub enum ForecastError {
    /// Request body is not valid JSON or does not match the request shape.
    #[error("Invalid JSON input: {0}")]
    MalformedInput(#[from] serde_json::Error),

    /// Requested horizon lies outside the configured policy range.
    #[error("Forecasting error: Forecast horizon must be between {min} and {max} months, got {got}")]
    HorizonOutOfRange { min: usize, max: usize, got: i128 },

    /// A strategy produced NaN or an infinity.
    #[error("Forecasting error: prediction for period {period} is not a finite number")]
    NonFinitePrediction { period: usize },

    /// Scenario parameters fall outside their accepted bounds.
    #[error("Forecasting error: {0}")]
    InvalidScenario(String),

    /// Ledger held no transactions inside the trailing window.
    #[error("Forecasting error: No transaction data available for forecasting")]
    EmptyLedger,

    #[error("Forecasting error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Forecasting error: {0}")]
    Config(#[from] ConfigError),

    #[error("Forecasting error: {0}")]
    Io(#[from] std::io::Error),
}

impl ForecastError {
    /// Classifies the error for reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedInput(_) => ErrorKind::MalformedInput,
            _ => ErrorKind::Computation,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"request.max_horizon"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

/// Errors raised while reading a transactions ledger.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("cannot read ledger: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid date \"{value}\" on ledger row {row} (expected YYYY-MM-DD)")]
    InvalidDate { row: usize, value: String },

    #[error("amount on ledger row {row} is not a finite number")]
    InvalidAmount { row: usize },
}
