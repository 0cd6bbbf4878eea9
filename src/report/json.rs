//! JSON rendering of a [`Report`]

use super::Report;
use crate::dataset::LOG_GRAMMAR_VERSION;
use serde::Serialize;

/// Versioned envelope around the report body
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    /// Format name
    pub format: &'static str,
    /// Crate version that produced the document
    pub generator_version: &'static str,
    /// Version of the measurement log grammar the inputs were read with
    pub log_grammar_version: u32,
    #[serde(flatten)]
    pub report: &'a Report,
}

impl<'a> JsonReport<'a> {
    pub fn new(report: &'a Report) -> Self {
        Self {
            format: "overhead-analyzer-json-v1",
            generator_version: env!("CARGO_PKG_VERSION"),
            log_grammar_version: LOG_GRAMMAR_VERSION,
            report,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
