//! Overhead Analyzer - protocol overhead analysis for constrained IoT stacks
//!
//! This library quantifies how many bytes each protocol layer adds on top of
//! the application payload, and compares two protocols (LwM2M and Matter) with
//! descriptive statistics, a Welch t-test and Cohen's d.
//!
//! The pipeline is strictly one-directional:
//! [`dataset`] builds validated records, [`metrics`] and [`binning`] summarize
//! them, [`comparison`] runs the statistics, and [`report`] assembles and
//! renders the results.
//!
//! ```
//! use overhead_analyzer::config::AnalysisConfig;
//! use overhead_analyzer::dataset::generate;
//! use overhead_analyzer::pipeline::analyze;
//! use overhead_analyzer::record::Protocol;
//!
//! let lwm2m = generate(42, Protocol::LwM2M, 30)?;
//! let matter = generate(43, Protocol::Matter, 30)?;
//! let report = analyze(&lwm2m, &matter, &AnalysisConfig::default())?;
//! assert!(report.comparison.size_difference > 0.0);
//! # Ok::<(), overhead_analyzer::AnalysisError>(())
//! ```

pub mod binning;
pub mod cli;
pub mod comparison;
pub mod config;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod stats;

pub use error::{AnalysisError, Result};
