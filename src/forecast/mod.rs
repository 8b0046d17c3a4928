//! Forecasting strategies for monthly net savings.

/// Moving-average strategy over the most recent months.
pub mod recency;
/// Strategy selection by method label.
pub mod selector;
/// Least-squares trend extrapolation.
pub mod trend;

pub use recency::RecencyAverager;
pub use selector::{Method, Strategy};
pub use trend::{LinearFit, TrendEstimator};

/// Common interface for the interchangeable forecasting strategies.
///
/// Implementations are pure: the same history and horizon always yield the
/// same predictions, and the returned vector has exactly `horizon` entries.
pub trait Forecaster {
    /// Predicts the next `horizon` values following `history`.
    ///
    /// # Arguments
    ///
    /// * `history` - Chronological monthly values, oldest first (may be empty)
    /// * `horizon` - Number of future periods to predict
    fn forecast(&self, history: &[f64], horizon: usize) -> Vec<f64>;

    /// Returns a short, human-readable strategy name.
    fn name(&self) -> &'static str;
}

/// Arithmetic mean of `values`, or `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
