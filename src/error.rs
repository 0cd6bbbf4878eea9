//! Error taxonomy for the overhead analysis engine
//!
//! Every failure is terminal for the operation that raised it. Nothing is
//! retried and no variant is ever replaced by a default value or NaN.

use thiserror::Error;

/// Errors produced while building datasets or computing statistics
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Malformed or absent measurement text
    #[error("parse error: {0}")]
    Parse(String),

    /// Tabular input is missing a required column
    #[error("schema error: missing required column '{column}'")]
    Schema { column: String },

    /// Mathematically undefined operation (zero denominator, zero variance)
    #[error("domain error: {0}")]
    Domain(String),

    /// Too few records for the requested statistic
    #[error("insufficient data: {context} needs at least {required} records, got {actual}")]
    InsufficientData {
        context: String,
        required: usize,
        actual: usize,
    },

    /// Invalid analysis configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The hypothesis-test backend rejected its input
    #[error("statistical test failed: {0}")]
    Statistics(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    pub(crate) fn insufficient(context: impl Into<String>, required: usize, actual: usize) -> Self {
        Self::InsufficientData {
            context: context.into(),
            required,
            actual,
        }
    }
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, AnalysisError>;
