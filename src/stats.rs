//! Descriptive statistics over measurement samples
//!
//! Every function here fails explicitly instead of returning NaN: empty input
//! is `InsufficientData`, a degenerate denominator is `Domain`.

use crate::error::{AnalysisError, Result};

/// Arithmetic mean
pub fn mean(samples: &[f64]) -> Result<f64> {
    if samples.is_empty() {
        return Err(AnalysisError::insufficient("mean", 1, 0));
    }
    Ok(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Unbiased sample variance (n - 1 denominator)
pub fn sample_variance(samples: &[f64]) -> Result<f64> {
    if samples.len() < 2 {
        return Err(AnalysisError::insufficient("sample variance", 2, samples.len()));
    }
    let m = mean(samples)?;
    let sum_sq: f64 = samples.iter().map(|x| (x - m) * (x - m)).sum();
    Ok(sum_sq / (samples.len() - 1) as f64)
}

/// Smallest and largest value
pub fn min_max(samples: &[u64]) -> Result<(u64, u64)> {
    let min = samples.iter().copied().min();
    let max = samples.iter().copied().max();
    match (min, max) {
        (Some(min), Some(max)) => Ok((min, max)),
        _ => Err(AnalysisError::insufficient("min/max", 1, 0)),
    }
}

/// Ordinary least-squares slope of `ys` against `xs`
///
/// Returns `None` when all `xs` are equal (the slope is undefined).
pub fn least_squares_slope(xs: &[f64], ys: &[f64]) -> Result<Option<f64>> {
    if xs.len() != ys.len() {
        return Err(AnalysisError::Domain(format!(
            "slope needs paired samples, got {} x and {} y",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < 2 {
        return Err(AnalysisError::insufficient("trend slope", 2, xs.len()));
    }

    let x_mean = mean(xs)?;
    let y_mean = mean(ys)?;
    let (mut sxy, mut sxx) = (0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        sxy += (x - x_mean) * (y - y_mean);
        sxx += (x - x_mean) * (x - x_mean);
    }

    if sxx == 0.0 {
        return Ok(None);
    }
    Ok(Some(sxy / sxx))
}
