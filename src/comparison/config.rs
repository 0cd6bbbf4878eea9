// Configuration for the comparative statistics engine
//
// The significance level and effect-size cutoffs are conventions, not facts
// about the data, so they live here as caller-supplied values.

use crate::comparison::effect::EffectSizeBands;
use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// Parameters for [`compare`](crate::comparison::compare)
///
/// # Example
/// ```
/// use overhead_analyzer::comparison::ComparisonConfig;
///
/// let config = ComparisonConfig::default();
/// assert_eq!(config.significance_level, 0.05);
/// assert_eq!(config.effect_bands.medium, 0.8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Alpha for the two-tailed Welch test; `p < alpha` is reported as
    /// significant. Nothing inside the engine branches on the outcome.
    pub significance_level: f64,

    /// Cutoffs used to label |Cohen's d|
    pub effect_bands: EffectSizeBands,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            significance_level: 0.05,
            effect_bands: EffectSizeBands::default(),
        }
    }
}

impl ComparisonConfig {
    /// 99% confidence
    pub fn strict() -> Self {
        Self {
            significance_level: 0.01,
            ..Self::default()
        }
    }

    /// 90% confidence
    pub fn permissive() -> Self {
        Self {
            significance_level: 0.10,
            ..Self::default()
        }
    }

    pub fn with_significance_level(mut self, alpha: f64) -> Self {
        self.significance_level = alpha;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(AnalysisError::Config(format!(
                "significance_level must be in (0, 1), got {}",
                self.significance_level
            )));
        }
        self.effect_bands.validate()
    }
}
