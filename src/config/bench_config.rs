//! Benchmark configuration derived from CLI arguments

use std::path::PathBuf;

use super::cli::{CliArgs, ListSelection};
use crate::workload::Mix;

/// Complete benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchConfig {
    // Matrix
    pub worker_counts: Vec<u32>,
    pub ops_per_worker: u64,
    pub mixes: Vec<Mix>,
    pub lists: ListSelection,

    // Data
    pub prepopulate: u64,
    pub value_range: u64,

    // Output
    pub output_path: Option<PathBuf>,
    pub csv_output: Option<PathBuf>,
    pub quiet: bool,
    pub verbose: bool,
}

impl BenchConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self, String> {
        // Validate first
        args.validate()?;

        let mixes = match &args.mixes {
            Some(names) => {
                let mut mixes = Vec::with_capacity(names.len());
                for name in names {
                    mixes.push(Mix::parse(name).ok_or_else(|| format!("Unknown mix: {name}"))?);
                }
                mixes
            }
            None => Mix::ALL.to_vec(),
        };

        Ok(Self {
            worker_counts: args.workers.clone(),
            ops_per_worker: args.ops_per_worker,
            mixes,
            lists: args.lists,
            prepopulate: args.prepopulate,
            value_range: args.value_range,
            output_path: args.output.clone(),
            csv_output: args.csv_output.clone(),
            quiet: args.quiet,
            verbose: args.verbose,
        })
    }

    /// One-line summary for the banner and JSON export
    pub fn summary(&self) -> String {
        format!(
            "workers={:?}, ops-per-worker={}, mixes={:?}, prepopulate={}, value-range={}",
            self.worker_counts,
            self.ops_per_worker,
            self.mixes.iter().map(|m| m.as_str()).collect::<Vec<_>>(),
            self.prepopulate,
            self.value_range
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli_defaults() {
        let args = CliArgs::parse_from(["test"]);
        let config = BenchConfig::from_cli(&args).unwrap();

        assert_eq!(config.worker_counts, vec![1, 2, 4, 8, 16]);
        assert_eq!(config.mixes, Mix::ALL.to_vec());
        assert_eq!(config.prepopulate, 100);
    }

    #[test]
    fn test_from_cli_selected_mixes() {
        let args = CliArgs::parse_from(["test", "-t", "read-heavy,write-heavy"]);
        let config = BenchConfig::from_cli(&args).unwrap();

        assert_eq!(config.mixes, vec![Mix::ReadHeavy, Mix::WriteHeavy]);
    }

    #[test]
    fn test_from_cli_rejects_invalid() {
        let args = CliArgs::parse_from(["test", "-n", "0"]);
        assert!(BenchConfig::from_cli(&args).is_err());
    }
}
