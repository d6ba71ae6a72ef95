//! Command-line argument parsing
//!
//! Arguments are grouped by category. The benchmark matrix (worker counts
//! and mixes) crosses every combination; each cell runs the selected list
//! implementations against a fresh, prepopulated instance.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::workload::Mix;

/// Microbenchmark comparing coarse-grained and hand-over-hand locking on a
/// concurrent sorted list
#[derive(Parser, Debug, Clone)]
#[command(name = "lockbench")]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    // ===== Benchmark Matrix =====
    /// Worker thread counts to run (comma separated)
    #[arg(short = 'w', long = "workers", value_delimiter = ',', default_values_t = [1u32, 2, 4, 8, 16])]
    pub workers: Vec<u32>,

    /// Operations performed by each worker
    #[arg(short = 'n', long = "ops", default_value_t = 10_000)]
    pub ops_per_worker: u64,

    /// Workload mixes to run (insert-heavy, read-heavy, write-heavy; default all)
    #[arg(short = 't', long = "mixes", value_delimiter = ',')]
    pub mixes: Option<Vec<String>>,

    /// List implementations to benchmark
    #[arg(long = "lists", value_enum, default_value_t = ListSelection::Both)]
    pub lists: ListSelection,

    // ===== Data =====
    /// Pre-populate each fresh list with values 0..N
    #[arg(long = "prepopulate", default_value_t = 100)]
    pub prepopulate: u64,

    /// Benchmark values are derived modulo this range
    #[arg(long = "value-range", default_value_t = 1000)]
    pub value_range: u64,

    // ===== Output Options =====
    /// Write results to a JSON file
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Write results to a CSV file
    #[arg(long = "csv")]
    pub csv_output: Option<PathBuf>,

    /// Quiet mode (minimal output)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Which list implementations a run covers
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListSelection {
    /// Only the coarse-grained list
    Coarse,
    /// Only the fine-grained list
    Fine,
    /// Both, with a pairwise comparison per matrix cell
    #[default]
    Both,
}

impl ListSelection {
    pub fn includes_coarse(&self) -> bool {
        matches!(self, Self::Coarse | Self::Both)
    }

    pub fn includes_fine(&self) -> bool {
        matches!(self, Self::Fine | Self::Both)
    }
}

impl CliArgs {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if self.workers.is_empty() {
            return Err("--workers needs at least one count".to_string());
        }
        if self.workers.iter().any(|&w| w == 0) {
            return Err("--workers counts must be at least 1".to_string());
        }
        if self.ops_per_worker == 0 {
            return Err("--ops must be at least 1".to_string());
        }
        if self.value_range == 0 {
            return Err("--value-range must be at least 1".to_string());
        }
        if let Some(ref mixes) = self.mixes {
            for name in mixes {
                if Mix::parse(name).is_none() {
                    return Err(format!(
                        "Unknown mix '{name}' (expected insert-heavy, read-heavy, or write-heavy)"
                    ));
                }
            }
        }
        Ok(())
    }
}
