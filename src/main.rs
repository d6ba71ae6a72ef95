//! lockbench - concurrent sorted-list locking benchmark
//!
//! Compares a single coarse mutex against per-node hand-over-hand locks
//! across a matrix of worker counts and operation mixes, and prints a
//! pairwise throughput comparison per cell.

// The bin target compiles the same modules as the library; helpers that are
// only reached through the library surface are not dead there.
#![allow(dead_code)]

use anyhow::Result;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

mod benchmark;
mod config;
mod list;
mod metrics;
mod utils;
mod workload;

use benchmark::{format_count, Orchestrator};
use config::{BenchConfig, CliArgs};
use utils::BenchError;

fn setup_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn print_banner(config: &BenchConfig) {
    if config.quiet {
        return;
    }

    println!("lockbench v{}", env!("CARGO_PKG_VERSION"));
    println!("====================================");
    println!("Worker counts: {:?}", config.worker_counts);
    println!("Ops per worker: {}", format_count(config.ops_per_worker));
    println!(
        "Mixes: {:?}",
        config.mixes.iter().map(|m| m.as_str()).collect::<Vec<_>>()
    );
    println!("Prepopulate: 0..{}", config.prepopulate);
    println!("Value range: {}", config.value_range);
    println!("====================================");
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse_args();

    // Setup logging
    setup_logging(args.verbose, args.quiet);

    // Build configuration
    let config = BenchConfig::from_cli(&args).map_err(BenchError::Config)?;

    // Print banner
    print_banner(&config);

    // Run the full matrix
    let orchestrator = Orchestrator::new(config.clone());
    let results = orchestrator.run_all()?;

    // Export to JSON if requested
    if let Some(ref output_path) = config.output_path {
        info!("Writing results to: {:?}", output_path);
        metrics::write_json(&results, &config.summary(), output_path)?;
    }

    // Export to CSV if requested
    if let Some(ref csv_path) = config.csv_output {
        info!("Writing CSV to: {:?}", csv_path);
        metrics::write_csv(&results, csv_path)?;
    }

    // Print summary
    println!("\n====================================");
    println!("BENCHMARK COMPLETE");
    println!("====================================");
    println!("Cells run: {}", results.len());

    let total_ops: u64 = results.iter().map(|r| r.total_ops).sum();
    println!("Total operations: {}", format_count(total_ops));

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}
