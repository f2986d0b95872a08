//! Differencing and integration for the ARIMA pipeline.

/// Difference a series `d` times.
pub(super) fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut out = series.to_vec();
    for _ in 0..d {
        if out.len() <= 1 {
            break;
        }
        out = out.windows(2).map(|w| w[1] - w[0]).collect();
    }
    out
}

/// Undo `d` rounds of differencing for values forecast beyond `original`.
///
/// Each level is a cumulative sum seeded with the final value of the
/// original series differenced to that level.
pub(super) fn integrate(forecast_diff: &[f64], original: &[f64], d: usize) -> Vec<f64> {
    if d == 0 || forecast_diff.is_empty() {
        return forecast_diff.to_vec();
    }

    let mut out = forecast_diff.to_vec();
    for level in (0..d).rev() {
        let seed = if level == 0 {
            original.last().copied().unwrap_or(0.0)
        } else {
            difference(original, level).last().copied().unwrap_or(0.0)
        };

        let mut acc = seed;
        for v in &mut out {
            acc += *v;
            *v = acc;
        }
    }
    out
}
