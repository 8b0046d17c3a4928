use super::{Forecaster, mean};

/// Default number of trailing months averaged by [`RecencyAverager`].
pub const DEFAULT_WINDOW: usize = 3;

/// Recency averager: repeats the mean of the last `window` observations.
///
/// The forecast is flat, every period receiving the same value. When the
/// history is shorter than the window the mean of the whole history is used,
/// and an empty history yields zeros.
#[derive(Debug, Clone, Copy)]
pub struct RecencyAverager {
    window: usize,
}

impl RecencyAverager {
    /// Creates an averager over the last `window` values (at least one).
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
        }
    }

    /// Number of trailing values averaged.
    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for RecencyAverager {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl Forecaster for RecencyAverager {
    fn forecast(&self, history: &[f64], horizon: usize) -> Vec<f64> {
        let recent = if history.len() < self.window {
            history
        } else {
            &history[history.len() - self.window..]
        };
        vec![mean(recent); horizon]
    }

    fn name(&self) -> &'static str {
        "moving_average"
    }
}
