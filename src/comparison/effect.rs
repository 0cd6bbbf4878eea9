// Standardized effect size (Cohen's d) and its conventional bands
//
//   d = (mean(B) - mean(A)) / sqrt((var(A) + var(B)) / 2)
//
// with unbiased sample variances. d is independent of sample size, so it
// complements the p-value: a tiny difference can be "significant" with enough
// records, but it stays a small effect.

use crate::error::{AnalysisError, Result};
use crate::stats;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cutoffs for labelling |d|
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSizeBands {
    /// |d| below this is Small
    pub small: f64,
    /// |d| below this (and at least `small`) is Medium; otherwise Large
    pub medium: f64,
}

impl Default for EffectSizeBands {
    fn default() -> Self {
        Self {
            small: 0.2,
            medium: 0.8,
        }
    }
}

impl EffectSizeBands {
    pub fn validate(&self) -> Result<()> {
        if !(self.small > 0.0 && self.medium > self.small && self.medium.is_finite()) {
            return Err(AnalysisError::Config(format!(
                "effect size bands need 0 < small < medium, got small={} medium={}",
                self.small, self.medium
            )));
        }
        Ok(())
    }

    pub fn classify(&self, d: f64) -> EffectSizeBand {
        let magnitude = d.abs();
        if magnitude < self.small {
            EffectSizeBand::Small
        } else if magnitude < self.medium {
            EffectSizeBand::Medium
        } else {
            EffectSizeBand::Large
        }
    }
}

/// Practical magnitude of a standardized difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EffectSizeBand {
    Small,
    Medium,
    Large,
}

impl fmt::Display for EffectSizeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EffectSizeBand::Small => "Small",
            EffectSizeBand::Medium => "Medium",
            EffectSizeBand::Large => "Large",
        })
    }
}

/// Cohen's d together with the pieces it was computed from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectSize {
    pub d: f64,
    pub pooled_std: f64,
    pub baseline_variance: f64,
    pub candidate_variance: f64,
}

/// Cohen's d of `candidate` relative to `baseline`
///
/// # Errors
/// `InsufficientData` if either side has fewer than 2 samples, `Domain` if
/// the pooled standard deviation is zero.
pub fn cohens_d(baseline: &[f64], candidate: &[f64]) -> Result<EffectSize> {
    let baseline_variance = stats::sample_variance(baseline)?;
    let candidate_variance = stats::sample_variance(candidate)?;
    let pooled_std = ((baseline_variance + candidate_variance) / 2.0).sqrt();

    if pooled_std == 0.0 {
        return Err(AnalysisError::Domain(
            "effect size undefined: pooled standard deviation is 0".to_string(),
        ));
    }

    let d = (stats::mean(candidate)? - stats::mean(baseline)?) / pooled_std;
    Ok(EffectSize {
        d,
        pooled_std,
        baseline_variance,
        candidate_variance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        let bands = EffectSizeBands::default();
        assert_eq!(bands.classify(0.0), EffectSizeBand::Small);
        assert_eq!(bands.classify(0.19), EffectSizeBand::Small);
        assert_eq!(bands.classify(0.2), EffectSizeBand::Medium);
        assert_eq!(bands.classify(-0.5), EffectSizeBand::Medium);
        assert_eq!(bands.classify(0.8), EffectSizeBand::Large);
        assert_eq!(bands.classify(-3.0), EffectSizeBand::Large);
    }

    #[test]
    fn test_custom_bands() {
        let bands = EffectSizeBands {
            small: 0.5,
            medium: 1.2,
        };
        assert_eq!(bands.classify(0.3), EffectSizeBand::Small);
        assert_eq!(bands.classify(1.0), EffectSizeBand::Medium);
    }

    #[test]
    fn test_invalid_bands() {
        assert!(EffectSizeBands { small: 0.8, medium: 0.2 }.validate().is_err());
        assert!(EffectSizeBands { small: 0.0, medium: 0.2 }.validate().is_err());
        assert!(EffectSizeBands::default().validate().is_ok());
    }

    #[test]
    fn test_cohens_d_value() {
        // var(A) = 72.9166.., var(B) = 72.9166.. -> pooled std = 8.539..
        let a = [100.0, 110.0, 90.0, 105.0];
        let b = [150.0, 160.0, 140.0, 155.0];
        let effect = cohens_d(&a, &b).unwrap();
        let expected_var = 218.75 / 3.0;
        assert!((effect.baseline_variance - expected_var).abs() < 1e-9);
        assert!((effect.d - 50.0 / expected_var.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_zero_pooled_std_is_domain_error() {
        let result = cohens_d(&[50.0, 50.0], &[50.0, 50.0]);
        assert!(matches!(result, Err(AnalysisError::Domain(_))));
    }

    #[test]
    fn test_too_few_samples() {
        assert!(matches!(
            cohens_d(&[1.0], &[2.0, 3.0]),
            Err(AnalysisError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_band_display() {
        assert_eq!(EffectSizeBand::Large.to_string(), "Large");
    }
}
