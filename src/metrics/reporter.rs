//! Metrics reporter - output formatting and export
//!
//! Supports the console comparison per matrix cell plus JSON and CSV
//! export of every collected result.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::benchmark::BenchmarkResult;
use crate::utils::Result;

/// Print the pairwise throughput comparison for one matrix cell.
///
/// Mirrors the headline number of the report: how much faster one locking
/// discipline is than the other under identical load.
pub fn print_comparison(coarse: &BenchmarkResult, fine: &BenchmarkResult) {
    if coarse.throughput <= 0.0 {
        return;
    }
    let difference = (fine.throughput - coarse.throughput) / coarse.throughput * 100.0;
    if difference >= 0.0 {
        println!("  => fine-grained is {difference:.2}% faster");
    } else {
        println!("  => coarse-grained is {:.2}% faster", -difference);
    }
}

/// Convert one result to a JSON value
fn result_to_json(result: &BenchmarkResult) -> serde_json::Value {
    serde_json::json!({
        "list": result.list_name,
        "mix": result.mix.as_str(),
        "workers": result.worker_count,
        "total_ops": result.total_ops,
        "duration_secs": result.duration.as_secs_f64(),
        "throughput": result.throughput,
        "latency_us": {
            "mean": result.mean_us(),
            "p50": result.percentile_us(50.0),
            "p95": result.percentile_us(95.0),
            "p99": result.percentile_us(99.0),
            "p999": result.percentile_us(99.9),
            "max": result.max_us(),
        },
        "outcomes": {
            "inserts": result.tally.inserts,
            "inserted": result.tally.inserted,
            "deletes": result.tally.deletes,
            "deleted": result.tally.deleted,
            "searches": result.tally.searches,
            "search_hits": result.tally.search_hits,
        }
    })
}

/// Export all results to JSON
pub fn to_json(results: &[BenchmarkResult], config_summary: &str) -> serde_json::Value {
    serde_json::json!({
        "config": config_summary,
        "results": results.iter().map(result_to_json).collect::<Vec<_>>(),
    })
}

/// Write all results to a JSON file
pub fn write_json(results: &[BenchmarkResult], config_summary: &str, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    writeln!(
        file,
        "{}",
        serde_json::to_string_pretty(&to_json(results, config_summary)).unwrap()
    )?;
    Ok(())
}

/// Write all results to a CSV file
pub fn write_csv(results: &[BenchmarkResult], path: &Path) -> Result<()> {
    let mut file = File::create(path)?;

    // Write header
    writeln!(
        file,
        "list,mix,workers,total_ops,duration_secs,throughput,mean_us,p50_us,p99_us,max_us"
    )?;

    // Write rows
    for result in results {
        writeln!(
            file,
            "{},{},{},{},{:.4},{:.2},{:.3},{:.3},{:.3},{:.3}",
            result.list_name,
            result.mix.as_str(),
            result.worker_count,
            result.total_ops,
            result.duration.as_secs_f64(),
            result.throughput,
            result.mean_us(),
            result.percentile_us(50.0),
            result.percentile_us(99.0),
            result.max_us(),
        )?;
    }

    Ok(())
}
