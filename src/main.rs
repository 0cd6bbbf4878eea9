use anyhow::{Context, Result};
use clap::Parser;
use overhead_analyzer::cli::{Cli, OutputFormat};
use overhead_analyzer::config::AnalysisConfig;
use overhead_analyzer::dataset::{self, DatasetSource};
use overhead_analyzer::pipeline::analyze;
use overhead_analyzer::record::Dataset;
use overhead_analyzer::report::{self, json::JsonReport, Report};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Load the TOML config (or defaults) and apply command-line overrides
fn load_config(args: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(alpha) = args.alpha {
        config.comparison.significance_level = alpha;
    }
    if let Some(count) = args.messages {
        config.synthetic.message_count = count;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn load_dataset(role: &str, source: &DatasetSource) -> Result<Dataset> {
    debug!(role, ?source, "building dataset");
    dataset::build(source).with_context(|| match source {
        DatasetSource::Log { path, .. } | DatasetSource::Tabular { path, .. } => {
            format!("failed to load {} dataset from {}", role, path.display())
        }
        DatasetSource::Synthetic { .. } => format!("failed to generate {} dataset", role),
    })
}

fn render(report: &Report, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => report::text::render(report),
        OutputFormat::Json => JsonReport::new(report).to_json()?,
        OutputFormat::Csv => report::csv::render(report)?,
    })
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    let config = load_config(&args)?;
    let message_count = config.synthetic.message_count;

    let baseline_source = DatasetSource::resolve(
        args.baseline_protocol,
        args.baseline_input.as_deref(),
        args.baseline_seed,
        message_count,
    );
    let candidate_source = DatasetSource::resolve(
        args.candidate_protocol,
        args.candidate_input.as_deref(),
        args.candidate_seed,
        message_count,
    );

    let (baseline, candidate) = dataset::distinguish_names(
        load_dataset("baseline", &baseline_source)?,
        load_dataset("candidate", &candidate_source)?,
    );

    let report = analyze(&baseline, &candidate, &config).context("analysis failed")?;
    let output = render(&report, args.format)?;
    print!("{}", output);
    Ok(())
}
