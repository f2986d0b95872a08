//! Moving-average baseline model.

use crate::core::{Forecast, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;

/// Default trailing window width, in weeks.
const DEFAULT_WINDOW: usize = 4;

/// Moving-average baseline.
///
/// Fitting stores the trailing `window` training values verbatim; no
/// coefficients are estimated. Each forecast step appends the mean of the
/// current window, then slides the window over the freshly predicted value
/// before the next step, so the sequence flattens toward the recent
/// average. That convergence is the intended baseline behavior.
///
/// The baseline exists as a fallback that does not fail on short history:
/// a series shorter than `window` is used as-is.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    window: usize,
    last_values: Option<Vec<f64>>,
}

impl MovingAverage {
    /// Create an unfitted baseline with the given window width.
    pub fn new(window: usize) -> Self {
        Self {
            window,
            last_values: None,
        }
    }

    /// Get the window width.
    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl Forecaster for MovingAverage {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        if self.window == 0 {
            return Err(ForecastError::InvalidArgument(
                "window must be at least 1".to_string(),
            ));
        }

        if series.is_empty() {
            return Err(ForecastError::EmptyData);
        }

        let values = series.values();
        let start = values.len().saturating_sub(self.window);
        self.last_values = Some(values[start..].to_vec());
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Forecast> {
        let last_values = self.last_values.as_ref().ok_or(ForecastError::NotFitted)?;
        if steps < 1 {
            return Err(ForecastError::InvalidArgument(
                "steps must be at least 1".to_string(),
            ));
        }

        let mut window = last_values.clone();
        let mut predictions = Vec::with_capacity(steps);
        for _ in 0..steps {
            let tail = &window[window.len().saturating_sub(self.window)..];
            let mean = tail.iter().sum::<f64>() / tail.len() as f64;
            predictions.push(mean);
            window.push(mean);
        }

        Ok(Forecast::from_values(
            predictions.into_iter().map(|v| v.max(0.0)).collect(),
        ))
    }

    fn is_fitted(&self) -> bool {
        self.last_values.is_some()
    }

    fn name(&self) -> &str {
        "MovingAverage"
    }

    fn summary(&self) -> String {
        match &self.last_values {
            Some(values) => format!(
                "MovingAverage: window {} over {} stored values",
                self.window,
                values.len()
            ),
            None => format!("MovingAverage: window {}, not fitted", self.window),
        }
    }
}
