//! Error types for the ili-forecast engine.

use thiserror::Error;

/// Result type alias for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while preparing data, fitting, or forecasting.
///
/// Every error surfaces synchronously to the immediate caller; the engine
/// never downgrades a failure to a default value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Not enough observations for the requested split or fit.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Malformed configuration or argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Model estimation failed numerically, wrapping the cause.
    #[error("model fitting failed: {0}")]
    Fitting(String),

    /// Forecast requested before a successful fit.
    #[error("model must be fitted before prediction")]
    NotFitted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = ForecastError::EmptyData;
        assert_eq!(err.to_string(), "empty input data");

        let err = ForecastError::InsufficientData { needed: 22, got: 15 };
        assert_eq!(
            err.to_string(),
            "insufficient data: need at least 22, got 15"
        );

        let err = ForecastError::InvalidArgument("steps must be at least 1".to_string());
        assert_eq!(err.to_string(), "invalid argument: steps must be at least 1");

        let err = ForecastError::Fitting("coefficients diverged".to_string());
        assert_eq!(err.to_string(), "model fitting failed: coefficients diverged");

        let err = ForecastError::NotFitted;
        assert_eq!(err.to_string(), "model must be fitted before prediction");
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = ForecastError::InsufficientData { needed: 20, got: 5 };
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
