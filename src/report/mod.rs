//! Report assembly
//!
//! [`Report::assemble`] only orders already-computed results; renderers in
//! [`text`], [`json`] and [`csv`] only format them. Neither computes.

pub mod csv;
pub mod json;
pub mod text;

use crate::binning::BinnedEfficiency;
use crate::comparison::ComparisonResult;
use crate::metrics::AggregateSummary;
use serde::Serialize;

/// Version of the report field set
pub const REPORT_VERSION: u32 = 1;

/// Everything computed for one protocol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtocolSection {
    pub summary: AggregateSummary,
    pub efficiency_by_bin: BinnedEfficiency,
}

/// Structured analysis report, baseline first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub version: u32,
    pub protocols: Vec<ProtocolSection>,
    pub comparison: ComparisonResult,
}

impl Report {
    pub fn assemble(
        baseline: (AggregateSummary, BinnedEfficiency),
        candidate: (AggregateSummary, BinnedEfficiency),
        comparison: ComparisonResult,
    ) -> Self {
        let section = |(summary, efficiency_by_bin): (AggregateSummary, BinnedEfficiency)| {
            ProtocolSection {
                summary,
                efficiency_by_bin,
            }
        };
        Self {
            version: REPORT_VERSION,
            protocols: vec![section(baseline), section(candidate)],
            comparison,
        }
    }

    pub fn baseline(&self) -> &ProtocolSection {
        &self.protocols[0]
    }

    pub fn candidate(&self) -> &ProtocolSection {
        &self.protocols[1]
    }
}
