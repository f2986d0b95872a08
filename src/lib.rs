//! # ili-forecast
//!
//! Weekly influenza-like illness (ILI%) forecasting engine.
//!
//! The engine takes a chronologically ordered weekly series, splits off a
//! trailing holdout window, fits one of two interchangeable models (ARIMA or
//! a moving-average baseline), scores the held-out forecast, then refits on
//! the full history to produce the user-facing future forecast. The holdout
//! metrics stay honest because they are computed only against observations
//! the evaluated fit never saw.
//!
//! ```
//! use ili_forecast::prelude::*;
//!
//! let values: Vec<f64> = (0..112)
//!     .map(|i| 3.0 + 2.0 * (2.0 * std::f64::consts::PI * i as f64 / 52.0).sin())
//!     .collect();
//! let series = TimeSeries::new(values);
//!
//! let report = run_forecast_pipeline(&series, &PipelineConfig::default()).unwrap();
//! assert_eq!(report.future_forecast.len(), 4);
//! assert!(report.future_forecast.iter().all(|v| *v >= 0.0));
//! ```

pub mod core;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::core::{Forecast, TimeSeries, WeekLabel};
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::{Arima, ArimaOrder, Forecaster, Model, ModelType, MovingAverage};
    pub use crate::pipeline::{run_forecast_pipeline, ModelConfig, PipelineConfig, PipelineReport};
    pub use crate::utils::{evaluate, EvaluationMetrics};
}
