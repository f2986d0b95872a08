//! Forecast accuracy metrics.

use serde::Serialize;

use crate::error::{ForecastError, Result};

/// Accuracy of a forecast against held-out actuals.
///
/// Values are rounded at construction: MAE and RMSE to four decimals, MAPE
/// to two. The rounding is part of the contract; downstream consumers
/// compare against these literals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct EvaluationMetrics {
    /// Mean absolute error.
    pub mae: f64,
    /// Root mean squared error.
    pub rmse: f64,
    /// Mean absolute percentage error; absent when every actual is zero.
    pub mape: Option<f64>,
}

/// Score `predicted` against `actual`.
///
/// Mismatched lengths are truncated to the shorter side rather than
/// rejected, so a boundary mismatch at the end of a series never aborts a
/// report. MAPE averages only over positions with a nonzero actual; when
/// there are none it is reported as absent, since the ratio is undefined.
///
/// ```
/// use ili_forecast::utils::evaluate;
///
/// let metrics = evaluate(&[1.0, 2.0, 4.0], &[1.0, 2.0, 4.0]).unwrap();
/// assert_eq!(metrics.mae, 0.0);
/// assert_eq!(metrics.rmse, 0.0);
/// assert_eq!(metrics.mape, Some(0.0));
/// ```
pub fn evaluate(actual: &[f64], predicted: &[f64]) -> Result<EvaluationMetrics> {
    let n = actual.len().min(predicted.len());
    if n == 0 {
        return Err(ForecastError::EmptyData);
    }
    let actual = &actual[..n];
    let predicted = &predicted[..n];

    let mae = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / n as f64;

    let mse = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / n as f64;

    let mut pct_sum = 0.0;
    let mut pct_count = 0usize;
    for (a, p) in actual.iter().zip(predicted) {
        if *a != 0.0 {
            pct_sum += ((a - p) / a).abs();
            pct_count += 1;
        }
    }
    let mape = (pct_count > 0).then(|| round_to(100.0 * pct_sum / pct_count as f64, 2));

    Ok(EvaluationMetrics {
        mae: round_to(mae, 4),
        rmse: round_to(mse.sqrt(), 4),
        mape,
    })
}

/// Round to a fixed number of decimal places.
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perfect_prediction_scores_zero() {
        let metrics = evaluate(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(metrics.mae, 0.0);
        assert_eq!(metrics.rmse, 0.0);
        assert_eq!(metrics.mape, Some(0.0));
    }

    #[test]
    fn known_errors() {
        let metrics = evaluate(&[1.0, 2.0, 3.0, 4.0], &[1.5, 2.5, 2.5, 4.5]).unwrap();
        assert_relative_eq!(metrics.mae, 0.5, epsilon = 1e-12);
        assert_relative_eq!(metrics.rmse, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn mape_skips_zero_actuals() {
        // Position 0 has a zero actual and is excluded from MAPE only.
        let metrics = evaluate(&[0.0, 2.0, 4.0], &[1.0, 1.0, 2.0]).unwrap();
        // |2-1|/2 = 0.5, |4-2|/4 = 0.5 -> mean 0.5 -> 50%
        assert_eq!(metrics.mape, Some(50.0));
        assert!(metrics.mae > 0.0);
    }

    #[test]
    fn mape_absent_when_all_actuals_zero() {
        let metrics = evaluate(&[0.0, 0.0, 0.0], &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(metrics.mape, None);
        assert_relative_eq!(metrics.mae, 2.0, epsilon = 1e-12);
        assert!(metrics.rmse > 0.0);
    }

    #[test]
    fn mismatched_lengths_truncate_to_shorter() {
        let metrics = evaluate(&[1.0, 2.0, 3.0, 4.0, 5.0], &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(metrics.mae, 0.0);
        assert_eq!(metrics.rmse, 0.0);

        let metrics = evaluate(&[1.0, 2.0], &[2.0, 3.0, 9.0, 9.0]).unwrap();
        assert_relative_eq!(metrics.mae, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_inputs_are_rejected() {
        assert_eq!(evaluate(&[], &[]), Err(ForecastError::EmptyData));
        assert_eq!(evaluate(&[1.0], &[]), Err(ForecastError::EmptyData));
    }

    #[test]
    fn values_are_rounded_per_contract() {
        // Error of 1/3 at every position.
        let metrics = evaluate(&[3.0, 3.0, 3.0], &[3.0 + 1.0 / 3.0; 3]).unwrap();
        assert_eq!(metrics.mae, 0.3333);
        assert_eq!(metrics.rmse, 0.3333);
        // (1/3)/3 * 100 = 11.11...%
        assert_eq!(metrics.mape, Some(11.11));
    }

    #[test]
    fn serializes_with_uppercase_keys() {
        let metrics = evaluate(&[2.0, 2.0], &[1.0, 3.0]).unwrap();
        let value = serde_json::to_value(&metrics).unwrap();
        assert_eq!(value["MAE"], serde_json::json!(1.0));
        assert_eq!(value["RMSE"], serde_json::json!(1.0));
        assert_eq!(value["MAPE"], serde_json::json!(50.0));
    }

    #[test]
    fn absent_mape_serializes_as_null() {
        let metrics = evaluate(&[0.0, 0.0], &[1.0, 1.0]).unwrap();
        let value = serde_json::to_value(&metrics).unwrap();
        assert!(value["MAPE"].is_null());
    }
}
