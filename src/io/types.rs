//! Request and response bodies exchanged over stdin/stdout.
//!
//! Field names are the public JSON contract and must not be renamed.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};

/// Forecast request decoded from the input stream.
///
/// Every field is optional; absent fields take their defaults from the
/// forecaster configuration. Unknown fields are ignored. An explicit `null`
/// is not treated as absent and fails to decode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastRequest {
    /// Historical monthly net savings, oldest first.
    #[serde(default)]
    pub net_savings: Vec<f64>,
    /// Number of future months to predict. Any JSON integer decodes, so that
    /// negative or huge values reach horizon validation instead of failing
    /// here.
    #[serde(default, deserialize_with = "integer_horizon")]
    pub forecast_horizon: Option<i128>,
    /// Method label; anything other than `"moving_average"` means linear.
    #[serde(default, deserialize_with = "present")]
    pub method: Option<String>,
}

impl ForecastRequest {
    /// Decodes a request from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::MalformedInput`] if the text is not valid JSON,
    /// is not a JSON object, or does not match the request shape.
    pub fn from_json(input: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        if !value.is_object() {
            return Err(ForecastError::MalformedInput(de::Error::custom(
                "request must be a JSON object",
            )));
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Decodes a present field, rejecting `null`.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Decodes the horizon as any JSON integer.
///
/// Integers beyond the `u64` range only survive JSON parsing as floats; those
/// are kept as saturated integers. Other fractional numbers are rejected.
fn integer_horizon<'de, D>(deserializer: D) -> std::result::Result<Option<i128>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    number
        .as_i64()
        .map(i128::from)
        .or_else(|| number.as_u64().map(i128::from))
        .or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() >= i64::MAX as f64)
                .map(|f| f as i128)
        })
        .map(Some)
        .ok_or_else(|| de::Error::custom(format!("forecast_horizon must be an integer, got {number}")))
}

/// Successful forecast body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessResponse {
    /// Always `true`.
    pub success: bool,
    /// One prediction per future month, in order.
    pub predicted_net_savings: Vec<f64>,
    /// Method label the request was dispatched on.
    pub method_used: String,
    /// Length of the input history.
    pub data_points: usize,
    /// Ledger balance the predictions build on; only present in ledger mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_balance: Option<f64>,
    /// Predictions with a what-if scenario applied; only present when one was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_net_savings: Option<Vec<f64>>,
    /// Sum of adjusted minus sum of baseline predictions, rounded to cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_impact: Option<f64>,
}

/// Failure body carrying a human-readable message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureResponse {
    /// Always `false`.
    pub success: bool,
    /// Human-readable error message.
    pub error: String,
}

/// Body written to stdout at the end of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ForecastResponse {
    Success(SuccessResponse),
    Failure(FailureResponse),
}

impl ForecastResponse {
    /// Builds a success body without ledger or scenario fields.
    pub fn success(predicted_net_savings: Vec<f64>, method_used: String, data_points: usize) -> Self {
        Self::Success(SuccessResponse {
            success: true,
            predicted_net_savings,
            method_used,
            data_points,
            starting_balance: None,
            adjusted_net_savings: None,
            total_impact: None,
        })
    }

    /// Process exit status for this response: `0` on success, `1` otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Success(_) => 0,
            Self::Failure(_) => 1,
        }
    }

    /// Serializes the response as a single line of JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":"Forecasting error: cannot encode response"}"#.to_string()
        })
    }
}

impl From<&ForecastError> for ForecastResponse {
    fn from(err: &ForecastError) -> Self {
        Self::Failure(FailureResponse {
            success: false,
            error: err.to_string(),
        })
    }
}
