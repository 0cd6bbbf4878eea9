//! Metric deriver
//!
//! Per-record derived fields (total size, efficiency, overhead share) and the
//! per-dataset aggregate summary, including the four-layer breakdown.

use crate::error::{AnalysisError, Result};
use crate::record::{Dataset, Layer, MessageRecord, Protocol};
use crate::stats;
use serde::Serialize;

/// A record annotated with its derived metrics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedRecord<'a> {
    pub record: &'a MessageRecord,
    pub total_size: u64,
    pub efficiency_percent: f64,
    pub overhead_percent: f64,
}

impl<'a> DerivedRecord<'a> {
    /// # Errors
    /// `Domain` when the record's total size is zero.
    pub fn new(record: &'a MessageRecord) -> Result<Self> {
        let efficiency_percent = record.efficiency_percent()?;
        Ok(Self {
            record,
            total_size: record.total_size(),
            efficiency_percent,
            overhead_percent: 100.0 - efficiency_percent,
        })
    }
}

/// Annotate every record of `dataset`
///
/// # Errors
/// `Domain` if any record has `total_size == 0`.
pub fn derive(dataset: &Dataset) -> Result<Vec<DerivedRecord<'_>>> {
    dataset.records().iter().map(DerivedRecord::new).collect()
}

/// Mean, minimum and maximum of a byte-count field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizeStats {
    pub mean: f64,
    pub min: u64,
    pub max: u64,
}

impl SizeStats {
    fn of(values: &[u64]) -> Result<Self> {
        let as_f64: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        let (min, max) = stats::min_max(values)?;
        Ok(Self {
            mean: stats::mean(&as_f64)?,
            min,
            max,
        })
    }
}

/// Mean overhead of one layer and its share of the message
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerBreakdown {
    pub layer: Layer,
    pub mean_bytes: f64,
    /// `mean_bytes / Σ layer means * 100`
    pub share_of_overhead_percent: f64,
    /// `mean_bytes / mean total size * 100`
    pub share_of_total_percent: f64,
}

/// Mean message size for one message type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageTypeSummary {
    pub message_type: String,
    pub count: usize,
    pub mean_total_size: f64,
}

/// Aggregate statistics for one dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateSummary {
    pub name: String,
    pub protocol: Protocol,
    pub count: usize,
    pub total_size: SizeStats,
    pub payload_size: SizeStats,
    pub mean_efficiency_percent: f64,
    pub mean_overhead_percent: f64,
    /// In [`Layer::ALL`] order
    pub layers: Vec<LayerBreakdown>,
    /// Ordered by first appearance in the dataset
    pub message_types: Vec<MessageTypeSummary>,
    /// Efficiency percentage points gained per extra payload byte;
    /// `None` when every record has the same payload size
    pub efficiency_trend: Option<f64>,
}

fn layer_breakdown(dataset: &Dataset, mean_total: f64) -> Result<Vec<LayerBreakdown>> {
    let means = Layer::ALL
        .iter()
        .map(|&layer| {
            let bytes: Vec<f64> = dataset
                .records()
                .iter()
                .map(|r| r.layer_overheads().get(layer) as f64)
                .collect();
            stats::mean(&bytes).map(|m| (layer, m))
        })
        .collect::<Result<Vec<_>>>()?;

    let overhead_sum: f64 = means.iter().map(|(_, m)| m).sum();
    if overhead_sum == 0.0 {
        return Err(AnalysisError::Domain(format!(
            "layer shares undefined for {}: mean overhead is 0",
            dataset.name()
        )));
    }

    Ok(means
        .into_iter()
        .map(|(layer, mean_bytes)| LayerBreakdown {
            layer,
            mean_bytes,
            share_of_overhead_percent: mean_bytes / overhead_sum * 100.0,
            share_of_total_percent: mean_bytes / mean_total * 100.0,
        })
        .collect())
}

fn message_types(dataset: &Dataset) -> Vec<MessageTypeSummary> {
    let mut groups: Vec<(String, u64, usize)> = Vec::new();
    for record in dataset.records() {
        match groups.iter_mut().find(|(name, _, _)| name == record.message_type()) {
            Some((_, sum, count)) => {
                *sum += record.total_size();
                *count += 1;
            }
            None => groups.push((record.message_type().to_string(), record.total_size(), 1)),
        }
    }

    groups
        .into_iter()
        .map(|(message_type, sum, count)| MessageTypeSummary {
            message_type,
            count,
            mean_total_size: sum as f64 / count as f64,
        })
        .collect()
}

/// Summarize `dataset`
///
/// # Errors
/// `InsufficientData` on an empty dataset, `Domain` if any record has zero
/// total size or every layer overhead is zero.
pub fn summarize(dataset: &Dataset) -> Result<AggregateSummary> {
    dataset.require(1, "aggregate summary")?;
    let derived = derive(dataset)?;

    let totals: Vec<u64> = derived.iter().map(|d| d.total_size).collect();
    let payloads: Vec<u64> = derived.iter().map(|d| d.record.payload_size()).collect();
    let efficiencies: Vec<f64> = derived.iter().map(|d| d.efficiency_percent).collect();

    let total_size = SizeStats::of(&totals)?;
    let mean_efficiency_percent = stats::mean(&efficiencies)?;

    let efficiency_trend = if derived.len() < 2 {
        None
    } else {
        let xs: Vec<f64> = payloads.iter().map(|&p| p as f64).collect();
        stats::least_squares_slope(&xs, &efficiencies)?
    };

    Ok(AggregateSummary {
        name: dataset.name().to_string(),
        protocol: dataset.protocol(),
        count: dataset.len(),
        total_size,
        payload_size: SizeStats::of(&payloads)?,
        mean_efficiency_percent,
        mean_overhead_percent: 100.0 - mean_efficiency_percent,
        layers: layer_breakdown(dataset, total_size.mean)?,
        message_types: message_types(dataset),
        efficiency_trend,
    })
}
