//! CLI argument parsing for the overhead analyzer

use crate::record::Protocol;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the analysis report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "overhead-analyzer")]
#[command(version)]
#[command(
    about = "Per-layer overhead analysis and statistical comparison of IoT protocols",
    long_about = None
)]
pub struct Cli {
    /// Protocol of the baseline dataset (lwm2m or matter)
    #[arg(long = "baseline-protocol", value_name = "PROTOCOL", default_value = "lwm2m")]
    pub baseline_protocol: Protocol,

    /// Baseline measurement log, or CSV file if the extension is .csv
    #[arg(long = "baseline-input", value_name = "FILE")]
    pub baseline_input: Option<PathBuf>,

    /// Seed for a synthetic baseline (ignored with --baseline-input)
    #[arg(long = "baseline-seed", value_name = "SEED")]
    pub baseline_seed: Option<u64>,

    /// Protocol of the candidate dataset (lwm2m or matter)
    #[arg(long = "candidate-protocol", value_name = "PROTOCOL", default_value = "matter")]
    pub candidate_protocol: Protocol,

    /// Candidate measurement log, or CSV file if the extension is .csv
    #[arg(long = "candidate-input", value_name = "FILE")]
    pub candidate_input: Option<PathBuf>,

    /// Seed for a synthetic candidate (ignored with --candidate-input)
    #[arg(long = "candidate-seed", value_name = "SEED")]
    pub candidate_seed: Option<u64>,

    /// Messages per synthetic dataset (overrides [synthetic] message_count)
    #[arg(short = 'n', long = "messages", value_name = "COUNT")]
    pub messages: Option<usize>,

    /// TOML configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Significance level (overrides [comparison] significance_level)
    #[arg(long = "alpha", value_name = "ALPHA")]
    pub alpha: Option<f64>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug tracing to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["overhead-analyzer"]);
        assert_eq!(cli.baseline_protocol, Protocol::LwM2M);
        assert_eq!(cli.candidate_protocol, Protocol::Matter);
        assert!(cli.baseline_input.is_none());
        assert!(cli.candidate_input.is_none());
        assert!(cli.messages.is_none());
        assert!(cli.alpha.is_none());
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_protocols_case_insensitive() {
        let cli = Cli::parse_from([
            "overhead-analyzer",
            "--baseline-protocol",
            "MATTER",
            "--candidate-protocol",
            "LwM2M",
        ]);
        assert_eq!(cli.baseline_protocol, Protocol::Matter);
        assert_eq!(cli.candidate_protocol, Protocol::LwM2M);
    }

    #[test]
    fn test_cli_unknown_protocol_rejected() {
        let result = Cli::try_parse_from(["overhead-analyzer", "--baseline-protocol", "coap"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_inputs_and_seeds() {
        let cli = Cli::parse_from([
            "overhead-analyzer",
            "--baseline-input",
            "lwm2m.log",
            "--candidate-seed",
            "7",
            "-n",
            "120",
        ]);
        assert_eq!(cli.baseline_input, Some(PathBuf::from("lwm2m.log")));
        assert_eq!(cli.candidate_seed, Some(7));
        assert_eq!(cli.messages, Some(120));
    }

    #[test]
    fn test_cli_format_and_alpha() {
        let cli = Cli::parse_from(["overhead-analyzer", "--format", "json", "--alpha", "0.01"]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.alpha, Some(0.01));

        let cli = Cli::parse_from(["overhead-analyzer", "--format", "csv"]);
        assert_eq!(cli.format, OutputFormat::Csv);
    }

    #[test]
    fn test_cli_config_and_debug() {
        let cli = Cli::parse_from(["overhead-analyzer", "-c", "analysis.toml", "--debug"]);
        assert_eq!(cli.config, Some(PathBuf::from("analysis.toml")));
        assert!(cli.debug);
    }
}
