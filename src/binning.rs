//! Binning analyzer
//!
//! Groups records by payload size into closed-left/open-right intervals and
//! reports mean efficiency per interval. Bins without records are absent from
//! the result; absence means "no data", never "zero efficiency".

use crate::error::{AnalysisError, Result};
use crate::metrics::derive;
use crate::record::Dataset;
use serde::Serialize;
use std::collections::HashSet;

/// Ascending payload-size boundaries with one label per interval
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinSpec {
    boundaries: Vec<u64>,
    labels: Vec<String>,
}

/// Where a payload size falls relative to a [`BinSpec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinSlot {
    /// Smaller than the first boundary
    Below,
    /// Index of the interval `[boundaries[i], boundaries[i + 1])`
    Bin(usize),
    /// At or beyond the last boundary
    Overflow,
}

impl BinSpec {
    /// # Errors
    /// `Config` unless there are at least two strictly ascending boundaries
    /// and exactly one label per interval.
    pub fn new(boundaries: Vec<u64>, labels: Vec<String>) -> Result<Self> {
        if boundaries.len() < 2 {
            return Err(AnalysisError::Config(format!(
                "bins need at least 2 boundaries, got {}",
                boundaries.len()
            )));
        }
        if boundaries.windows(2).any(|w| w[0] >= w[1]) {
            return Err(AnalysisError::Config(format!(
                "bin boundaries must be strictly ascending: {:?}",
                boundaries
            )));
        }
        if labels.len() != boundaries.len() - 1 {
            return Err(AnalysisError::Config(format!(
                "{} boundaries need {} labels, got {}",
                boundaries.len(),
                boundaries.len() - 1,
                labels.len()
            )));
        }
        let spec = Self { boundaries, labels };
        let overflow = spec.overflow_label();
        let mut seen = HashSet::with_capacity(spec.labels.len() + 1);
        seen.insert(overflow.as_str());
        for label in &spec.labels {
            if !seen.insert(label.as_str()) {
                return Err(AnalysisError::Config(format!(
                    "bin label '{}' is used twice (overflow bin is '{}')",
                    label, overflow
                )));
            }
        }
        Ok(spec)
    }

    pub fn boundaries(&self) -> &[u64] {
        &self.boundaries
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label used for sizes at or beyond the last boundary, e.g. `"200+"`
    pub fn overflow_label(&self) -> String {
        format!("{}+", self.boundaries[self.boundaries.len() - 1])
    }

    /// A size equal to a boundary belongs to the bin starting there
    pub fn assign(&self, payload_size: u64) -> BinSlot {
        let idx = self.boundaries.partition_point(|&b| b <= payload_size);
        if idx == 0 {
            BinSlot::Below
        } else if idx == self.boundaries.len() {
            BinSlot::Overflow
        } else {
            BinSlot::Bin(idx - 1)
        }
    }
}

impl Default for BinSpec {
    fn default() -> Self {
        Self {
            boundaries: vec![0, 5, 15, 30, 50, 100, 200],
            labels: [
                "Tiny (0-5)",
                "Small (5-15)",
                "Medium (15-30)",
                "Large (30-50)",
                "Very Large (50-100)",
                "Huge (100-200)",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Mean efficiency of the records in one interval
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinEfficiency {
    pub label: String,
    pub lower: u64,
    /// `None` for the overflow interval
    pub upper: Option<u64>,
    pub count: usize,
    pub mean_efficiency_percent: f64,
}

/// Binned efficiency table for one dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinnedEfficiency {
    pub name: String,
    /// Non-empty bins in ascending order
    pub bins: Vec<BinEfficiency>,
    /// Records at or beyond the last boundary, if any
    pub overflow: Option<BinEfficiency>,
    /// Records below the first boundary
    pub unassigned: usize,
}

impl BinnedEfficiency {
    /// Mean efficiency for `label`, or `None` if that bin had no records
    pub fn mean_for(&self, label: &str) -> Option<f64> {
        self.bins
            .iter()
            .chain(self.overflow.iter())
            .find(|b| b.label == label)
            .map(|b| b.mean_efficiency_percent)
    }
}

#[derive(Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn finish(self, label: String, lower: u64, upper: Option<u64>) -> Option<BinEfficiency> {
        (self.count > 0).then(|| BinEfficiency {
            label,
            lower,
            upper,
            count: self.count,
            mean_efficiency_percent: self.sum / self.count as f64,
        })
    }
}

/// Mean efficiency per payload-size bin
///
/// # Errors
/// `InsufficientData` on an empty dataset, `Domain` if a record has zero
/// total size.
pub fn efficiency_by_bin(dataset: &Dataset, spec: &BinSpec) -> Result<BinnedEfficiency> {
    dataset.require(1, "efficiency binning")?;
    let derived = derive(dataset)?;

    let mut bins = vec![Accumulator::default(); spec.labels.len()];
    let mut overflow = Accumulator::default();
    let mut unassigned = 0usize;

    for d in &derived {
        match spec.assign(d.record.payload_size()) {
            BinSlot::Bin(i) => bins[i].push(d.efficiency_percent),
            BinSlot::Overflow => overflow.push(d.efficiency_percent),
            BinSlot::Below => unassigned += 1,
        }
    }

    let last = spec.boundaries[spec.boundaries.len() - 1];
    Ok(BinnedEfficiency {
        name: dataset.name().to_string(),
        bins: bins
            .into_iter()
            .enumerate()
            .filter_map(|(i, acc)| {
                acc.finish(
                    spec.labels[i].clone(),
                    spec.boundaries[i],
                    Some(spec.boundaries[i + 1]),
                )
            })
            .collect(),
        overflow: overflow.finish(spec.overflow_label(), last, None),
        unassigned,
    })
}
