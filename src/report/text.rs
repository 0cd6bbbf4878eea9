//! Console rendering of a [`Report`]
//!
//! Precision is fixed per field kind: bytes and percentages to one decimal,
//! t and d to three, p to six.

use super::{ProtocolSection, Report};
use crate::binning::BinEfficiency;
use crate::comparison::ComparisonResult;
use std::fmt;

const RULE: &str = "════════════════════════════════════════════════════════════";
const THIN_RULE: &str = "─────────────────────────────────────────";

/// `Display` adapter that renders a report as console text
pub struct TextReport<'a>(pub &'a Report);

fn bin_line(f: &mut fmt::Formatter<'_>, bin: &BinEfficiency) -> fmt::Result {
    writeln!(
        f,
        "  {}: {:.1}% ({} messages)",
        bin.label, bin.mean_efficiency_percent, bin.count
    )
}

fn protocol_section(f: &mut fmt::Formatter<'_>, section: &ProtocolSection) -> fmt::Result {
    let s = &section.summary;
    writeln!(
        f,
        "\n{} PROTOCOL STATISTICS ({} messages):",
        s.name.to_uppercase(),
        s.count
    )?;
    writeln!(f, "  Average Message Size: {:.1} bytes", s.total_size.mean)?;
    writeln!(
        f,
        "  Message Size Range: {} - {} bytes",
        s.total_size.min, s.total_size.max
    )?;
    writeln!(f, "  Average Payload: {:.1} bytes", s.payload_size.mean)?;
    writeln!(
        f,
        "  Payload Range: {} - {} bytes",
        s.payload_size.min, s.payload_size.max
    )?;
    writeln!(f, "  Average Efficiency: {:.1}%", s.mean_efficiency_percent)?;
    writeln!(f, "  Average Overhead: {:.1}%", s.mean_overhead_percent)?;
    match s.efficiency_trend {
        Some(slope) => writeln!(f, "  Efficiency Trend: {:+.3} points per payload byte", slope)?,
        None => writeln!(f, "  Efficiency Trend: n/a (constant payload size)")?,
    }

    writeln!(f, "\n  Layer Overhead Breakdown:")?;
    for layer in &s.layers {
        writeln!(
            f,
            "    {}: {:.1} bytes ({:.1}% of overhead, {:.1}% of message)",
            layer.layer,
            layer.mean_bytes,
            layer.share_of_overhead_percent,
            layer.share_of_total_percent
        )?;
    }

    writeln!(f, "\n  Mean Size by Message Type:")?;
    for kind in &s.message_types {
        writeln!(
            f,
            "    {}: {:.1} bytes ({} messages)",
            kind.message_type, kind.mean_total_size, kind.count
        )?;
    }

    let bins = &section.efficiency_by_bin;
    writeln!(f, "\n  Efficiency by Payload Size:")?;
    for bin in bins.bins.iter().chain(bins.overflow.iter()) {
        bin_line(f, bin)?;
    }
    if bins.unassigned > 0 {
        writeln!(
            f,
            "  ({} messages below the first bin boundary)",
            bins.unassigned
        )?;
    }
    Ok(())
}

fn comparison_section(f: &mut fmt::Formatter<'_>, c: &ComparisonResult) -> fmt::Result {
    writeln!(
        f,
        "\nCOMPARATIVE ANALYSIS ({} vs {}):",
        c.candidate_name, c.baseline_name
    )?;
    writeln!(f, "{}", THIN_RULE)?;
    writeln!(
        f,
        "  Mean Size: {:.1} bytes ({}) vs {:.1} bytes ({})",
        c.baseline_mean_size, c.baseline_name, c.candidate_mean_size, c.candidate_name
    )?;
    writeln!(f, "  Size Difference: {:.1} bytes", c.size_difference)?;
    writeln!(
        f,
        "  {} is {:.1}% {} than {}",
        c.candidate_name,
        c.percent_difference.abs(),
        if c.percent_difference >= 0.0 {
            "larger"
        } else {
            "smaller"
        },
        c.baseline_name
    )?;
    writeln!(f, "  Efficiency Gap: {:.1} percentage points", c.efficiency_gap)?;
    writeln!(
        f,
        "  Variance: {:.1} ({}) / {:.1} ({})",
        c.baseline_variance, c.baseline_name, c.candidate_variance, c.candidate_name
    )?;

    writeln!(f, "\nSTATISTICAL SIGNIFICANCE (Welch's t-test):")?;
    writeln!(f, "  T-statistic: {:.3}", c.t_statistic)?;
    writeln!(f, "  Degrees of freedom: {:.1}", c.degrees_of_freedom)?;
    writeln!(f, "  P-value: {:.6}", c.p_value)?;
    writeln!(
        f,
        "  Significant difference: {} (alpha = {})",
        if c.significant { "Yes" } else { "No" },
        c.significance_level
    )?;
    writeln!(f, "  Effect size (Cohen's d): {:.3}", c.effect_size)?;
    writeln!(f, "  Pooled standard deviation: {:.1}", c.pooled_std)?;
    writeln!(f, "  Effect interpretation: {} effect", c.effect_band)?;
    writeln!(
        f,
        "  Sample size: {} {}, {} {} messages",
        c.baseline_count, c.baseline_name, c.candidate_count, c.candidate_name
    )
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        writeln!(f, "PROTOCOL OVERHEAD ANALYSIS")?;
        writeln!(f, "{}", RULE)?;
        for section in &self.0.protocols {
            protocol_section(f, section)?;
        }
        writeln!(f)?;
        comparison_section(f, &self.0.comparison)
    }
}

/// Render `report` for a terminal
pub fn render(report: &Report) -> String {
    TextReport(report).to_string()
}
