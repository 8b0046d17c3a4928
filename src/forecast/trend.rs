use tracing::debug;

use super::{Forecaster, mean};

/// Straight line fitted to a series by index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Change per period.
    pub slope: f64,
    /// Fitted value at index 0.
    pub intercept: f64,
}

impl LinearFit {
    /// Fits `y = slope * i + intercept` over the points `(i, series[i])` by
    /// ordinary least squares.
    ///
    /// Returns `None` for fewer than two points, where the slope is undefined.
    pub fn fit(series: &[f64]) -> Option<Self> {
        if series.len() < 2 {
            return None;
        }

        let n = series.len() as f64;
        // Indices 0..n-1 have mean (n-1)/2.
        let mean_x = (n - 1.0) / 2.0;
        let mean_y = mean(series);

        let mut ss_xy = 0.0;
        let mut ss_xx = 0.0;
        for (i, &y) in series.iter().enumerate() {
            let dx = i as f64 - mean_x;
            ss_xy += dx * (y - mean_y);
            ss_xx += dx * dx;
        }

        let slope = ss_xy / ss_xx;
        Some(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    /// Evaluates the fitted line at index `x`.
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Trend estimator: extrapolates a least-squares line through the history.
///
/// With fewer than two observations there is no trend to fit, so every
/// period receives the mean of whatever history exists (`0.0` when empty).
#[derive(Debug, Default, Clone, Copy)]
pub struct TrendEstimator;

impl Forecaster for TrendEstimator {
    fn forecast(&self, history: &[f64], horizon: usize) -> Vec<f64> {
        let Some(fit) = LinearFit::fit(history) else {
            return vec![mean(history); horizon];
        };

        debug!(
            slope = fit.slope,
            intercept = fit.intercept,
            points = history.len(),
            "fitted linear trend"
        );

        let n = history.len();
        (n..n + horizon).map(|i| fit.at(i as f64)).collect()
    }

    fn name(&self) -> &'static str {
        "linear"
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn empty_history_predicts_zeros() {
        let forecast = TrendEstimator.forecast(&[], 4);
        assert_eq!(forecast, vec![0.0; 4]);
    }

    #[test]
    fn single_point_is_repeated() {
        let forecast = TrendEstimator.forecast(&[250.0], 3);
        assert_eq!(forecast, vec![250.0; 3]);
    }

    #[test]
    fn continues_a_perfect_line() {
        let forecast = TrendEstimator.forecast(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(forecast.len(), 3);
        assert_relative_eq!(forecast[0], 6.0, epsilon = 1e-9);
        assert_relative_eq!(forecast[1], 7.0, epsilon = 1e-9);
        assert_relative_eq!(forecast[2], 8.0, epsilon = 1e-9);
    }

    #[test]
    fn fit_matches_closed_form() {
        // y = 2 + 3x
        let fit = LinearFit::fit(&[2.0, 5.0, 8.0]).expect("three points should fit");
        assert_relative_eq!(fit.slope, 3.0, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn noisy_series_uses_least_squares() {
        // Points (0,1), (1,3), (2,2), (3,6): slope 1.4, intercept 0.9.
        let fit = LinearFit::fit(&[1.0, 3.0, 2.0, 6.0]).expect("four points should fit");
        assert_relative_eq!(fit.slope, 1.4, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 0.9, epsilon = 1e-12);

        let forecast = TrendEstimator.forecast(&[1.0, 3.0, 2.0, 6.0], 2);
        assert_relative_eq!(forecast[0], 6.5, epsilon = 1e-9);
        assert_relative_eq!(forecast[1], 7.9, epsilon = 1e-9);
    }

    #[test]
    fn flat_history_stays_flat() {
        let forecast = TrendEstimator.forecast(&[-40.0, -40.0, -40.0], 5);
        for value in forecast {
            assert_relative_eq!(value, -40.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn too_short_to_fit() {
        assert!(LinearFit::fit(&[]).is_none());
        assert!(LinearFit::fit(&[1.0]).is_none());
    }
}
