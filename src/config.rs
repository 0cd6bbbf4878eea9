//! Analysis configuration loaded from TOML
//!
//! Every section is optional; omitted values fall back to the conventional
//! defaults (alpha 0.05, effect bands 0.2/0.8, the seven-boundary payload
//! bins and 50 synthetic messages per protocol).
//!
//! # Example TOML
//! ```toml
//! [comparison]
//! significance_level = 0.01
//!
//! [effect_size]
//! small = 0.2
//! medium = 0.8
//!
//! [bins]
//! boundaries = [0, 10, 50, 200]
//! labels = ["small", "medium", "large"]
//!
//! [synthetic]
//! message_count = 100
//! ```

use crate::binning::BinSpec;
use crate::comparison::{ComparisonConfig, EffectSizeBands};
use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComparisonSection {
    pub significance_level: f64,
}

impl Default for ComparisonSection {
    fn default() -> Self {
        Self {
            significance_level: ComparisonConfig::default().significance_level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BinsSection {
    pub boundaries: Vec<u64>,
    pub labels: Vec<String>,
}

impl Default for BinsSection {
    fn default() -> Self {
        let spec = BinSpec::default();
        Self {
            boundaries: spec.boundaries().to_vec(),
            labels: spec.labels().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyntheticSection {
    pub message_count: usize,
}

impl Default for SyntheticSection {
    fn default() -> Self {
        Self { message_count: 50 }
    }
}

/// Top-level analysis configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub comparison: ComparisonSection,
    pub effect_size: EffectSizeBands,
    pub bins: BinsSection,
    pub synthetic: SyntheticSection,
}

impl AnalysisConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| AnalysisError::Config(format!("invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.comparison_config().validate()?;
        self.bin_spec()?;
        if self.synthetic.message_count == 0 {
            return Err(AnalysisError::Config(
                "synthetic.message_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn comparison_config(&self) -> ComparisonConfig {
        ComparisonConfig {
            significance_level: self.comparison.significance_level,
            effect_bands: self.effect_size,
        }
    }

    pub fn bin_spec(&self) -> Result<BinSpec> {
        BinSpec::new(self.bins.boundaries.clone(), self.bins.labels.clone())
    }
}
