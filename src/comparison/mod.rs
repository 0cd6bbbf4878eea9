// Comparative statistics between two protocol datasets
//
// Given a baseline dataset A and a candidate dataset B, reports:
// - the difference of mean total message size (B - A), absolute and relative
// - Welch's two-sample t-test on the total-size distributions
// - Cohen's d with a configurable Small/Medium/Large label
//
// The significance decision is reported, never acted upon: no code path in
// the engine depends on whether p < alpha.

mod config;
mod effect;
mod statistics;

pub use config::ComparisonConfig;
pub use effect::{cohens_d, EffectSize, EffectSizeBand, EffectSizeBands};
pub use statistics::{size_difference, welch_t_test, SizeDifference, WelchTest};

use crate::error::Result;
use crate::metrics::derive;
use crate::record::Dataset;
use crate::stats;
use serde::Serialize;
use tracing::debug;

/// Minimum records per dataset for a comparison
pub const MIN_RECORDS: usize = 2;

/// Immutable outcome of comparing two datasets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub baseline_name: String,
    pub candidate_name: String,
    pub baseline_count: usize,
    pub candidate_count: usize,
    pub baseline_mean_size: f64,
    pub candidate_mean_size: f64,
    /// `mean(B.total_size) - mean(A.total_size)` in bytes
    pub size_difference: f64,
    /// `size_difference / mean(A.total_size) * 100`
    pub percent_difference: f64,
    pub baseline_variance: f64,
    pub candidate_variance: f64,
    /// Welch t, `(mean(A) - mean(B)) / SE`
    pub t_statistic: f64,
    pub degrees_of_freedom: f64,
    /// Two-tailed
    pub p_value: f64,
    pub significance_level: f64,
    /// `p_value < significance_level`
    pub significant: bool,
    /// Cohen's d, positive when B is larger
    pub effect_size: f64,
    pub pooled_std: f64,
    pub effect_band: EffectSizeBand,
    /// `mean_eff(A) - mean_eff(B)` in percentage points
    pub efficiency_gap: f64,
}

fn mean_efficiency(dataset: &Dataset) -> Result<f64> {
    let efficiencies: Vec<f64> = derive(dataset)?
        .iter()
        .map(|d| d.efficiency_percent)
        .collect();
    stats::mean(&efficiencies)
}

/// Compare `candidate` (B) against `baseline` (A)
///
/// Both datasets are borrowed and left untouched.
///
/// # Errors
/// - `Config` if `config` is invalid
/// - `InsufficientData` if either dataset has fewer than [`MIN_RECORDS`]
/// - `Domain` if the baseline mean is zero, the pooled standard deviation is
///   zero, or a record has zero total size
///
/// # Example
/// ```
/// use overhead_analyzer::comparison::{compare, ComparisonConfig, EffectSizeBand};
/// use overhead_analyzer::dataset::generate;
/// use overhead_analyzer::record::Protocol;
///
/// let lwm2m = generate(42, Protocol::LwM2M, 50)?;
/// let matter = generate(43, Protocol::Matter, 50)?;
///
/// let result = compare(&lwm2m, &matter, &ComparisonConfig::default())?;
/// assert!(result.size_difference > 0.0);
/// assert_eq!(result.effect_band, EffectSizeBand::Large);
/// # Ok::<(), overhead_analyzer::AnalysisError>(())
/// ```
pub fn compare(
    baseline: &Dataset,
    candidate: &Dataset,
    config: &ComparisonConfig,
) -> Result<ComparisonResult> {
    config.validate()?;
    baseline.require(MIN_RECORDS, "comparison")?;
    candidate.require(MIN_RECORDS, "comparison")?;

    let a = baseline.total_sizes();
    let b = candidate.total_sizes();

    let sizes = size_difference(&a, &b)?;
    let effect = cohens_d(&a, &b)?;
    let welch = welch_t_test(&a, &b)?;
    let efficiency_gap = mean_efficiency(baseline)? - mean_efficiency(candidate)?;

    debug!(
        baseline = baseline.name(),
        candidate = candidate.name(),
        t = welch.statistic,
        p = welch.p_value,
        d = effect.d,
        "compared datasets"
    );

    Ok(ComparisonResult {
        baseline_name: baseline.name().to_string(),
        candidate_name: candidate.name().to_string(),
        baseline_count: baseline.len(),
        candidate_count: candidate.len(),
        baseline_mean_size: sizes.baseline_mean,
        candidate_mean_size: sizes.candidate_mean,
        size_difference: sizes.difference,
        percent_difference: sizes.percent_difference,
        baseline_variance: effect.baseline_variance,
        candidate_variance: effect.candidate_variance,
        t_statistic: welch.statistic,
        degrees_of_freedom: welch.degrees_of_freedom,
        p_value: welch.p_value,
        significance_level: config.significance_level,
        significant: welch.p_value < config.significance_level,
        effect_size: effect.d,
        pooled_std: effect.pooled_std,
        effect_band: config.effect_bands.classify(effect.d),
        efficiency_gap,
    })
}

#[cfg(test)]
mod tests;
