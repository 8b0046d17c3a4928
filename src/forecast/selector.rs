use std::fmt;

use tracing::{debug, warn};

use super::{Forecaster, RecencyAverager, TrendEstimator};

/// Forecasting method requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// Least-squares trend extrapolation.
    #[default]
    Linear,
    /// Flat mean of the most recent months.
    MovingAverage,
}

impl Method {
    /// Recognized method labels.
    pub const LABELS: &[&str] = &["linear", "moving_average"];

    /// Maps a request label to a method.
    ///
    /// Only `"moving_average"` selects [`Method::MovingAverage`]; every other
    /// label, recognized or not, selects [`Method::Linear`].
    pub fn from_label(label: &str) -> Self {
        match label {
            "moving_average" => Self::MovingAverage,
            "linear" => Self::Linear,
            other => {
                warn!(method = other, "unrecognized forecast method, using linear");
                Self::Linear
            }
        }
    }

    /// Returns `true` if `label` names a method without falling back.
    pub fn is_known(label: &str) -> bool {
        Self::LABELS.contains(&label)
    }

    /// Canonical label for this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::MovingAverage => "moving_average",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured forecasting strategy.
#[derive(Debug, Clone, Copy)]
pub enum Strategy {
    Trend(TrendEstimator),
    Recency(RecencyAverager),
}

impl Strategy {
    /// Builds the strategy for `method`, using `window` for the recency averager.
    pub fn select(method: Method, window: usize) -> Self {
        let strategy = match method {
            Method::MovingAverage => Self::Recency(RecencyAverager::new(window)),
            Method::Linear => Self::Trend(TrendEstimator),
        };
        debug!(strategy = strategy.name(), "selected forecasting strategy");
        strategy
    }
}

impl Forecaster for Strategy {
    fn forecast(&self, history: &[f64], horizon: usize) -> Vec<f64> {
        match self {
            Self::Trend(s) => s.forecast(history, horizon),
            Self::Recency(s) => s.forecast(history, horizon),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Trend(s) => s.name(),
            Self::Recency(s) => s.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_average_label_selects_recency() {
        assert_eq!(Method::from_label("moving_average"), Method::MovingAverage);
        let strategy = Strategy::select(Method::MovingAverage, 3);
        assert_eq!(strategy.name(), "moving_average");
    }

    #[test]
    fn unknown_labels_fall_back_to_linear() {
        assert_eq!(Method::from_label("arima"), Method::Linear);
        assert_eq!(Method::from_label(""), Method::Linear);
        assert_eq!(Method::from_label("Moving_Average"), Method::Linear);
        assert!(!Method::is_known("arima"));
    }

    #[test]
    fn strategies_dispatch_to_their_estimators() {
        let history = [1.0, 2.0, 3.0, 4.0];
        let trend = Strategy::select(Method::Linear, 3).forecast(&history, 1);
        let recency = Strategy::select(Method::MovingAverage, 3).forecast(&history, 1);
        assert_eq!(trend, TrendEstimator.forecast(&history, 1));
        assert_eq!(recency, vec![3.0]);
    }

    #[test]
    fn display_uses_canonical_label() {
        assert_eq!(Method::MovingAverage.to_string(), "moving_average");
        assert_eq!(Method::default().to_string(), "linear");
    }
}
