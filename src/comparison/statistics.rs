// Size difference and significance testing between two datasets
//
// Welch's t and its degrees of freedom are computed in f64. The p-value
// comes from aprender's unequal-variance t-test, which works in f32; both
// samples are first centred on the midpoint of their means so that large
// message sizes keep their spread after narrowing. Welch's t is invariant
// under a common shift, so the backend sees the same test.

use crate::error::{AnalysisError, Result};
use crate::stats;

/// Difference of mean message size, candidate minus baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeDifference {
    pub baseline_mean: f64,
    pub candidate_mean: f64,
    /// `candidate_mean - baseline_mean`
    pub difference: f64,
    /// `difference / baseline_mean * 100`
    pub percent_difference: f64,
}

/// # Errors
/// `InsufficientData` on empty input, `Domain` if the baseline mean is zero.
pub fn size_difference(baseline: &[f64], candidate: &[f64]) -> Result<SizeDifference> {
    let baseline_mean = stats::mean(baseline)?;
    let candidate_mean = stats::mean(candidate)?;

    if baseline_mean == 0.0 {
        return Err(AnalysisError::Domain(
            "percentage difference undefined: baseline mean size is 0".to_string(),
        ));
    }

    let difference = candidate_mean - baseline_mean;
    Ok(SizeDifference {
        baseline_mean,
        candidate_mean,
        difference,
        percent_difference: difference / baseline_mean * 100.0,
    })
}

/// Outcome of Welch's t-test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WelchTest {
    /// `(mean(baseline) - mean(candidate)) / standard error`
    pub statistic: f64,
    /// Two-tailed p-value
    pub p_value: f64,
    /// Welch-Satterthwaite degrees of freedom
    pub degrees_of_freedom: f64,
}

/// Welch's independent two-sample t-test
///
/// # Errors
/// `InsufficientData` with fewer than 2 samples on either side, `Domain` if
/// both samples have zero variance, `Statistics` if the backend rejects the
/// input or returns a non-finite p-value.
pub fn welch_t_test(baseline: &[f64], candidate: &[f64]) -> Result<WelchTest> {
    if baseline.len() < 2 || candidate.len() < 2 {
        return Err(AnalysisError::insufficient(
            "Welch t-test",
            2,
            baseline.len().min(candidate.len()),
        ));
    }

    let (na, nb) = (baseline.len() as f64, candidate.len() as f64);
    let (mean_a, mean_b) = (stats::mean(baseline)?, stats::mean(candidate)?);
    let se_a = stats::sample_variance(baseline)? / na;
    let se_b = stats::sample_variance(candidate)? / nb;
    let se_sq = se_a + se_b;

    if se_sq == 0.0 {
        return Err(AnalysisError::Domain(
            "t-test undefined: both samples have zero variance".to_string(),
        ));
    }

    let statistic = (mean_a - mean_b) / se_sq.sqrt();
    let degrees_of_freedom =
        se_sq * se_sq / (se_a * se_a / (na - 1.0) + se_b * se_b / (nb - 1.0));

    let centre = (mean_a + mean_b) / 2.0;
    let a: Vec<f32> = baseline.iter().map(|&x| (x - centre) as f32).collect();
    let b: Vec<f32> = candidate.iter().map(|&x| (x - centre) as f32).collect();

    let result = aprender::stats::hypothesis::ttest_ind(&a, &b, false)
        .map_err(|e| AnalysisError::Statistics(e.to_string()))?;
    let p_value = f64::from(result.pvalue);

    if !p_value.is_finite() {
        return Err(AnalysisError::Statistics(format!(
            "t-test backend returned p-value {} for t = {:.3}",
            p_value, statistic
        )));
    }

    Ok(WelchTest {
        statistic,
        p_value,
        degrees_of_freedom,
    })
}
