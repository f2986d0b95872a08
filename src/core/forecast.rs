//! Forecast container for point predictions.

/// Point predictions for future weeks beyond the end of the fitted series.
///
/// Producing models floor-clamp every value at zero, since a percentage of
/// clinical visits cannot be negative.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    values: Vec<f64>,
}

impl Forecast {
    /// Create a forecast from point predictions.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Number of forecast steps.
    pub fn horizon(&self) -> usize {
        self.values.len()
    }

    /// Check if the forecast holds no predictions.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The predicted values in step order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consume the forecast, yielding its values.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_reports_horizon() {
        let forecast = Forecast::from_values(vec![1.2, 3.4, 0.0]);
        assert_eq!(forecast.horizon(), 3);
        assert!(!forecast.is_empty());
        assert_eq!(forecast.values(), &[1.2, 3.4, 0.0]);
    }

    #[test]
    fn empty_forecast() {
        let forecast = Forecast::default();
        assert_eq!(forecast.horizon(), 0);
        assert!(forecast.is_empty());
    }

    #[test]
    fn into_values_consumes() {
        let forecast = Forecast::from_values(vec![2.5, 2.5]);
        assert_eq!(forecast.into_values(), vec![2.5, 2.5]);
    }
}
