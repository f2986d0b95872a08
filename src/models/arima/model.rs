//! ARIMA model fitted by conditional least squares.

use serde::Serialize;

use crate::core::{Forecast, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::models::arima::diff::{difference, integrate};
use crate::models::Forecaster;
use crate::utils::optimization::simplex_minimize;

/// Minimum training length for a meaningful coefficient estimate.
const MIN_TRAIN_POINTS: usize = 20;

/// Stationarity/invertibility bound on AR and MA coefficients.
const COEFFICIENT_BOUND: f64 = 0.99;

/// ARIMA order triple (p, d, q).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArimaOrder {
    /// Autoregressive lag terms.
    pub p: usize,
    /// Differencing order.
    pub d: usize,
    /// Moving-average error lag terms.
    pub q: usize,
}

impl ArimaOrder {
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }
}

impl Default for ArimaOrder {
    fn default() -> Self {
        Self::new(2, 1, 2)
    }
}

/// State produced by a successful fit; replaced wholesale on refit.
#[derive(Debug, Clone)]
struct FittedState {
    intercept: f64,
    ar: Vec<f64>,
    ma: Vec<f64>,
    /// Training series on the original scale, kept for integration.
    original: Vec<f64>,
    /// Training series after `d` rounds of differencing.
    differenced: Vec<f64>,
    /// One-step-ahead residuals on the differenced scale.
    residuals: Vec<f64>,
}

/// ARIMA forecasting model.
///
/// ARIMA(p, d, q) combines an autoregression over `p` lags, `d` rounds of
/// differencing for stationarity, and a moving average over `q` error lags.
/// Coefficients are estimated by minimizing the conditional sum of squares
/// with a derivative-free simplex search.
#[derive(Debug, Clone)]
pub struct Arima {
    order: ArimaOrder,
    fitted: Option<FittedState>,
}

impl Arima {
    /// Create an unfitted model with the given order.
    pub fn new(order: ArimaOrder) -> Self {
        Self {
            order,
            fitted: None,
        }
    }

    /// Get the model order.
    pub fn order(&self) -> ArimaOrder {
        self.order
    }

    /// AR coefficients of the fitted model.
    pub fn ar_coefficients(&self) -> Option<&[f64]> {
        self.fitted.as_ref().map(|s| s.ar.as_slice())
    }

    /// MA coefficients of the fitted model.
    pub fn ma_coefficients(&self) -> Option<&[f64]> {
        self.fitted.as_ref().map(|s| s.ma.as_slice())
    }

    /// Intercept of the fitted model.
    pub fn intercept(&self) -> Option<f64> {
        self.fitted.as_ref().map(|s| s.intercept)
    }

    fn min_train_points(&self) -> usize {
        // The CSS recursion needs observations beyond the longest lag even
        // after differencing.
        MIN_TRAIN_POINTS.max(self.order.d + self.order.p.max(self.order.q) + 2)
    }
}

impl Default for Arima {
    fn default() -> Self {
        Self::new(ArimaOrder::default())
    }
}

impl Forecaster for Arima {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        let values = series.values();
        let needed = self.min_train_points();
        if values.len() < needed {
            return Err(ForecastError::InsufficientData {
                needed,
                got: values.len(),
            });
        }

        let differenced = difference(values, self.order.d);
        let (intercept, ar, ma) = estimate(&differenced, self.order)?;
        let residuals = one_step_residuals(&differenced, &ar, &ma, intercept);

        self.fitted = Some(FittedState {
            intercept,
            ar,
            ma,
            original: values.to_vec(),
            differenced,
            residuals,
        });
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Forecast> {
        let state = self.fitted.as_ref().ok_or(ForecastError::NotFitted)?;
        if steps < 1 {
            return Err(ForecastError::InvalidArgument(
                "steps must be at least 1".to_string(),
            ));
        }

        // Extend the recursion on the differenced scale with zero future
        // shocks, then integrate back to the original scale.
        let mut extended = state.differenced.clone();
        let mut shocks = state.residuals.clone();

        for _ in 0..steps {
            let t = extended.len();
            let mut pred = state.intercept;
            for (i, phi) in state.ar.iter().enumerate() {
                if t > i {
                    pred += phi * (extended[t - 1 - i] - state.intercept);
                }
            }
            for (i, theta) in state.ma.iter().enumerate() {
                if t > i {
                    pred += theta * shocks[t - 1 - i];
                }
            }
            extended.push(pred);
            shocks.push(0.0);
        }

        let ahead = &extended[state.differenced.len()..];
        let values = integrate(ahead, &state.original, self.order.d);

        // ILI% cannot be negative; clamp after integration.
        Ok(Forecast::from_values(
            values.into_iter().map(|v| v.max(0.0)).collect(),
        ))
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    fn name(&self) -> &str {
        "ARIMA"
    }

    fn summary(&self) -> String {
        let ArimaOrder { p, d, q } = self.order;
        match &self.fitted {
            Some(state) => format!(
                "ARIMA({},{},{}): intercept {:.4}, {} AR + {} MA coefficients",
                p,
                d,
                q,
                state.intercept,
                state.ar.len(),
                state.ma.len()
            ),
            None => format!("ARIMA({},{},{}): not fitted", p, d, q),
        }
    }
}

/// Estimate intercept and AR/MA coefficients by conditional least squares.
fn estimate(differenced: &[f64], order: ArimaOrder) -> Result<(f64, Vec<f64>, Vec<f64>)> {
    let ArimaOrder { p, q, .. } = order;

    let mean = differenced.iter().sum::<f64>() / differenced.len() as f64;
    if !mean.is_finite() {
        return Err(ForecastError::Fitting(
            "training series contains non-finite values".to_string(),
        ));
    }

    if p == 0 && q == 0 {
        return Ok((mean, vec![], vec![]));
    }

    // Intercept starts at the differenced mean; lag coefficients start
    // small and decay with lag depth.
    let mut initial = vec![mean];
    initial.extend((0..p).map(|i| 0.1 / (i + 1) as f64));
    initial.extend((0..q).map(|i| 0.1 / (i + 1) as f64));

    let mut bounds = vec![(f64::NEG_INFINITY, f64::INFINITY)];
    bounds.extend(std::iter::repeat((-COEFFICIENT_BOUND, COEFFICIENT_BOUND)).take(p + q));

    let outcome = simplex_minimize(
        |params| conditional_sum_of_squares(differenced, p, q, params),
        &initial,
        &bounds,
    );

    if !outcome.value.is_finite() || outcome.point.iter().any(|c| !c.is_finite()) {
        return Err(ForecastError::Fitting(
            "conditional sum of squares did not converge to finite coefficients".to_string(),
        ));
    }

    let intercept = outcome.point[0];
    let ar = outcome.point[1..1 + p].to_vec();
    let ma = outcome.point[1 + p..].to_vec();
    Ok((intercept, ar, ma))
}

/// Objective for the simplex search: sum of squared one-step-ahead errors.
fn conditional_sum_of_squares(differenced: &[f64], p: usize, q: usize, params: &[f64]) -> f64 {
    let intercept = params[0];
    let ar = &params[1..1 + p];
    let ma = &params[1 + p..];

    one_step_residuals(differenced, ar, ma, intercept)
        .iter()
        .map(|e| e * e)
        .sum()
}

/// One-step-ahead residuals of the ARMA recursion on the differenced scale.
///
/// The first `max(p, q)` positions carry zero residuals; the recursion has
/// no history to predict them from.
fn one_step_residuals(differenced: &[f64], ar: &[f64], ma: &[f64], intercept: f64) -> Vec<f64> {
    let n = differenced.len();
    let start = ar.len().max(ma.len());
    let mut residuals = vec![0.0; n];

    for t in start..n {
        let mut pred = intercept;
        for (i, phi) in ar.iter().enumerate() {
            pred += phi * (differenced[t - 1 - i] - intercept);
        }
        for (i, theta) in ma.iter().enumerate() {
            pred += theta * residuals[t - 1 - i];
        }
        residuals[t] = differenced[t] - pred;
    }

    residuals
}
