//! Dataset builder
//!
//! Turns a [`DatasetSource`] into a fully validated [`Dataset`]. All I/O
//! happens here; once a dataset is returned, every later stage is pure.
//!
//! Three sources are supported:
//! - measurement logs (see [`log`] for the line grammar)
//! - CSV files with snake_case headers matching the record fields
//! - deterministic synthetic generation from a seed

pub mod log;
pub mod synthetic;
pub mod tabular;

pub use log::{parse_log, LogScan, LOG_GRAMMAR_VERSION};
pub use synthetic::{generate, MessageKind, SyntheticProfile};
pub use tabular::{parse_tabular, REQUIRED_COLUMNS};

use crate::error::Result;
use crate::record::{Dataset, Protocol};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Where a dataset comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// Line-oriented measurement log
    Log { path: PathBuf, protocol: Protocol },
    /// CSV file with a header row
    Tabular { path: PathBuf, protocol: Protocol },
    /// Seeded synthetic generation
    Synthetic {
        seed: u64,
        protocol: Protocol,
        message_count: usize,
    },
}

impl DatasetSource {
    /// Pick a source for `protocol`: a file if one is given (`.csv` means
    /// tabular, anything else a log), otherwise synthetic generation with
    /// `seed` or the protocol's default seed.
    pub fn resolve(
        protocol: Protocol,
        input: Option<&Path>,
        seed: Option<u64>,
        message_count: usize,
    ) -> Self {
        match input {
            Some(path) if is_csv(path) => DatasetSource::Tabular {
                path: path.to_path_buf(),
                protocol,
            },
            Some(path) => DatasetSource::Log {
                path: path.to_path_buf(),
                protocol,
            },
            None => DatasetSource::Synthetic {
                seed: seed.unwrap_or(SyntheticProfile::for_protocol(protocol).default_seed),
                protocol,
                message_count,
            },
        }
    }

    pub fn protocol(&self) -> Protocol {
        match self {
            DatasetSource::Log { protocol, .. }
            | DatasetSource::Tabular { protocol, .. }
            | DatasetSource::Synthetic { protocol, .. } => *protocol,
        }
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Give two datasets distinct names for a side-by-side report
///
/// Names are kept when they already differ; otherwise each gets its role as a
/// suffix, e.g. `"LwM2M (baseline)"` and `"LwM2M (candidate)"`.
pub fn distinguish_names(baseline: Dataset, candidate: Dataset) -> (Dataset, Dataset) {
    if baseline.name() != candidate.name() {
        return (baseline, candidate);
    }
    let baseline_name = format!("{} (baseline)", baseline.name());
    let candidate_name = format!("{} (candidate)", candidate.name());
    (
        baseline.with_name(baseline_name),
        candidate.with_name(candidate_name),
    )
}

/// Build the dataset described by `source`
///
/// # Errors
/// `Io` if a file cannot be read, otherwise the errors of the chosen path.
pub fn build(source: &DatasetSource) -> Result<Dataset> {
    match source {
        DatasetSource::Log { path, protocol } => {
            let text = fs::read_to_string(path)?;
            Ok(parse_log(&text, *protocol)?.dataset)
        }
        DatasetSource::Tabular { path, protocol } => {
            let file = File::open(path)?;
            parse_tabular(BufReader::new(file), *protocol)
        }
        DatasetSource::Synthetic {
            seed,
            protocol,
            message_count,
        } => generate(*seed, *protocol, *message_count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_resolve_defaults_to_protocol_seed() {
        let source = DatasetSource::resolve(Protocol::Matter, None, None, 10);
        assert_eq!(
            source,
            DatasetSource::Synthetic {
                seed: 43,
                protocol: Protocol::Matter,
                message_count: 10
            }
        );
    }

    #[test]
    fn test_resolve_by_extension() {
        let csv = DatasetSource::resolve(Protocol::LwM2M, Some(Path::new("data/run.CSV")), None, 1);
        assert!(matches!(csv, DatasetSource::Tabular { .. }));
        let log = DatasetSource::resolve(Protocol::LwM2M, Some(Path::new("serial.txt")), None, 1);
        assert!(matches!(log, DatasetSource::Log { .. }));
        assert_eq!(log.protocol(), Protocol::LwM2M);
    }

    #[test]
    fn test_same_protocol_names_distinguished() {
        let a = generate(42, Protocol::LwM2M, 5).unwrap();
        let b = generate(7, Protocol::LwM2M, 5).unwrap();
        let (a, b) = distinguish_names(a, b);
        assert_eq!(a.name(), "LwM2M (baseline)");
        assert_eq!(b.name(), "LwM2M (candidate)");
        assert_eq!(a.len(), 5);
    }

    #[test]
    fn test_distinct_names_kept() {
        let a = generate(42, Protocol::LwM2M, 5).unwrap();
        let b = generate(43, Protocol::Matter, 5).unwrap();
        let (a, b) = distinguish_names(a, b);
        assert_eq!(a.name(), "LwM2M");
        assert_eq!(b.name(), "Matter");
    }

    #[test]
    fn test_build_log_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "boot").unwrap();
        writeln!(file, "Data: 150611,LwM2M,6,45,2,8,12,15,8").unwrap();
        let source = DatasetSource::Log {
            path: file.path().to_path_buf(),
            protocol: Protocol::LwM2M,
        };
        let dataset = build(&source).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.name(), "LwM2M");
    }

    #[test]
    fn test_build_missing_file_is_io_error() {
        let source = DatasetSource::Tabular {
            path: PathBuf::from("/nonexistent/matter_research_data.csv"),
            protocol: Protocol::Matter,
        };
        assert!(matches!(build(&source), Err(AnalysisError::Io(_))));
    }

    #[test]
    fn test_build_synthetic_is_repeatable() {
        let source = DatasetSource::resolve(Protocol::LwM2M, None, Some(7), 25);
        assert_eq!(build(&source).unwrap(), build(&source).unwrap());
    }
}
