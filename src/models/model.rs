//! Tagged model variant wrapping the two forecasting strategies.

use std::fmt;

use serde::Serialize;

use crate::core::{Forecast, TimeSeries};
use crate::error::Result;
use crate::models::{Arima, Forecaster, MovingAverage};

/// Identifier of the strategy behind a forecast, reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModelType {
    #[serde(rename = "ARIMA")]
    Arima,
    MovingAverage,
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelType::Arima => write!(f, "ARIMA"),
            ModelType::MovingAverage => write!(f, "MovingAverage"),
        }
    }
}

/// One of the two supported forecasting strategies.
///
/// Callers can match on the variant to learn which strategy they hold;
/// both variants share the `Forecaster` capability.
#[derive(Debug, Clone)]
pub enum Model {
    Arima(Arima),
    MovingAverage(MovingAverage),
}

impl Model {
    /// The identifier reported for this strategy.
    pub fn model_type(&self) -> ModelType {
        match self {
            Model::Arima(_) => ModelType::Arima,
            Model::MovingAverage(_) => ModelType::MovingAverage,
        }
    }
}

impl Forecaster for Model {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        match self {
            Model::Arima(m) => m.fit(series),
            Model::MovingAverage(m) => m.fit(series),
        }
    }

    fn predict(&self, steps: usize) -> Result<Forecast> {
        match self {
            Model::Arima(m) => m.predict(steps),
            Model::MovingAverage(m) => m.predict(steps),
        }
    }

    fn is_fitted(&self) -> bool {
        match self {
            Model::Arima(m) => m.is_fitted(),
            Model::MovingAverage(m) => m.is_fitted(),
        }
    }

    fn name(&self) -> &str {
        match self {
            Model::Arima(m) => m.name(),
            Model::MovingAverage(m) => m.name(),
        }
    }

    fn summary(&self) -> String {
        match self {
            Model::Arima(m) => m.summary(),
            Model::MovingAverage(m) => m.summary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArimaOrder;

    #[test]
    fn variants_report_their_type() {
        let arima = Model::Arima(Arima::new(ArimaOrder::default()));
        let baseline = Model::MovingAverage(MovingAverage::default());

        assert_eq!(arima.model_type(), ModelType::Arima);
        assert_eq!(baseline.model_type(), ModelType::MovingAverage);
    }

    #[test]
    fn model_type_display_matches_report_strings() {
        assert_eq!(ModelType::Arima.to_string(), "ARIMA");
        assert_eq!(ModelType::MovingAverage.to_string(), "MovingAverage");
    }

    #[test]
    fn model_type_serializes_as_report_string() {
        assert_eq!(
            serde_json::to_value(ModelType::Arima).unwrap(),
            serde_json::json!("ARIMA")
        );
        assert_eq!(
            serde_json::to_value(ModelType::MovingAverage).unwrap(),
            serde_json::json!("MovingAverage")
        );
    }

    #[test]
    fn enum_delegates_fit_and_predict() {
        let series = TimeSeries::new((1..=10).map(|i| i as f64).collect());
        let mut model = Model::MovingAverage(MovingAverage::new(2));

        assert!(!model.is_fitted());
        model.fit(&series).unwrap();
        assert!(model.is_fitted());
        assert_eq!(model.name(), "MovingAverage");

        let forecast = model.predict(2).unwrap();
        assert_eq!(forecast.horizon(), 2);
    }
}
