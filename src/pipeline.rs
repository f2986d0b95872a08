//! End-to-end forecasting pipeline.
//!
//! One run walks a fixed sequence: split the series, fit on the training
//! prefix, forecast the held-out window, score it, refit on the entire
//! series, forecast the future horizon, assemble the report. Any failure
//! propagates immediately; no partial report is returned.

use serde::Serialize;

use crate::core::{TimeSeries, WeekLabel};
use crate::error::{ForecastError, Result};
use crate::models::{Arima, ArimaOrder, Forecaster, Model, ModelType, MovingAverage};
use crate::utils::metrics::{evaluate, EvaluationMetrics};

/// Strategy selection for a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelConfig {
    Arima { order: ArimaOrder },
    MovingAverage { window: usize },
}

impl ModelConfig {
    /// Build a fresh unfitted model. Each fit in the pipeline gets its own
    /// instance so fitted state is never shared between steps.
    fn build(&self) -> Model {
        match *self {
            ModelConfig::Arima { order } => Model::Arima(Arima::new(order)),
            ModelConfig::MovingAverage { window } => {
                Model::MovingAverage(MovingAverage::new(window))
            }
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig::Arima {
            order: ArimaOrder::default(),
        }
    }
}

/// Configuration for one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Horizon for the user-facing future forecast, in weeks.
    pub forecast_weeks: usize,
    /// Trailing weeks held out for evaluation.
    pub test_weeks: usize,
    /// Forecasting strategy.
    pub model: ModelConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            forecast_weeks: 4,
            test_weeks: 12,
            model: ModelConfig::default(),
        }
    }
}

impl PipelineConfig {
    fn validate(&self) -> Result<()> {
        if self.forecast_weeks < 1 {
            return Err(ForecastError::InvalidArgument(
                "forecast_weeks must be at least 1".to_string(),
            ));
        }
        if self.test_weeks < 1 {
            return Err(ForecastError::InvalidArgument(
                "test_weeks must be at least 1".to_string(),
            ));
        }
        if let ModelConfig::MovingAverage { window: 0 } = self.model {
            return Err(ForecastError::InvalidArgument(
                "window must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Report produced by one pipeline run; the engine's only external artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    /// Accuracy over the held-out window, from the train-only fit.
    pub metrics: EvaluationMetrics,
    /// Held-out actual values.
    pub test_actual: Vec<f64>,
    /// Held-out predictions.
    pub test_predicted: Vec<f64>,
    /// Future forecast from the full-series refit.
    pub future_forecast: Vec<f64>,
    /// Week labels for the future horizon, present when the input carried
    /// labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub future_weeks: Option<Vec<WeekLabel>>,
    /// Which strategy produced the forecasts.
    pub model_type: ModelType,
}

/// Run the full pipeline over `series`.
///
/// The evaluation metrics come from a model fit only on the training
/// prefix, so they reflect data that fit never saw. The future forecast
/// comes from a second fit on the entire series, so the final `test_weeks`
/// of signal are not discarded when producing the forecast users care
/// about. The two fits are distinct on purpose.
pub fn run_forecast_pipeline(
    series: &TimeSeries,
    config: &PipelineConfig,
) -> Result<PipelineReport> {
    config.validate()?;

    let (train, test) = series.train_test_split(config.test_weeks)?;

    let mut model = config.model.build();
    model.fit(&train)?;
    let test_predicted = model.predict(test.len())?;

    let metrics = evaluate(test.values(), test_predicted.values())?;

    let mut refit = config.model.build();
    refit.fit(series)?;
    let future = refit.predict(config.forecast_weeks)?;

    let future_weeks = series.last_label().map(|last| {
        let mut labels = Vec::with_capacity(future.horizon());
        let mut week = last;
        for _ in 0..future.horizon() {
            week = week.next();
            labels.push(week);
        }
        labels
    });

    Ok(PipelineReport {
        metrics,
        test_actual: test.values().to_vec(),
        test_predicted: test_predicted.into_values(),
        future_forecast: future.into_values(),
        future_weeks,
        model_type: refit.model_type(),
    })
}
