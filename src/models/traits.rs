//! Forecaster trait defining the common interface for both strategies.

use crate::core::{Forecast, TimeSeries};
use crate::error::Result;

/// Common interface for forecasting models: fit on a training series, then
/// produce point forecasts for future weeks.
///
/// This trait is object-safe and can be used with `Box<dyn Forecaster>`.
pub trait Forecaster {
    /// Fit the model to the training series.
    ///
    /// A new fit replaces any previous fitted state wholesale; fitted state
    /// is never mutated in place.
    fn fit(&mut self, series: &TimeSeries) -> Result<()>;

    /// Forecast `steps` values beyond the end of the fitted series.
    ///
    /// `steps` must be at least 1. Every returned value is floor-clamped
    /// at zero.
    fn predict(&self, steps: usize) -> Result<Forecast>;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool;

    /// Get the model name.
    fn name(&self) -> &str;

    /// One-line description of the model and, once fitted, its state.
    fn summary(&self) -> String;
}
