//! End-to-end analysis of a baseline/candidate dataset pair

use crate::binning::efficiency_by_bin;
use crate::comparison::compare;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::metrics::summarize;
use crate::record::Dataset;
use crate::report::Report;
use tracing::info;

/// Summarize, bin and compare two datasets, then assemble the report
///
/// The first error from any stage is returned unchanged.
pub fn analyze(baseline: &Dataset, candidate: &Dataset, config: &AnalysisConfig) -> Result<Report> {
    config.validate()?;
    let bins = config.bin_spec()?;

    let baseline_section = (summarize(baseline)?, efficiency_by_bin(baseline, &bins)?);
    let candidate_section = (summarize(candidate)?, efficiency_by_bin(candidate, &bins)?);
    let comparison = compare(baseline, candidate, &config.comparison_config())?;

    info!(
        baseline = baseline.name(),
        candidate = candidate.name(),
        significant = comparison.significant,
        effect = %comparison.effect_band,
        "analysis complete"
    );

    Ok(Report::assemble(baseline_section, candidate_section, comparison))
}
